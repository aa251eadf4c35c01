//! Plugin Registry - 플러그인 저장소
//!
//! discovery로 채워진 뒤에는 거의 읽기 전용으로 사용됩니다.
//! 플러그인 호출 중에는 잠금을 잡지 않으므로, 서로 다른 플러그인에 대한
//! 호출은 동시에 진행될 수 있습니다. 같은 인스턴스를 동시에 호출할 때의
//! 내부 상태 보호는 각 플러그인의 책임입니다.

use super::discovery::{self, DiscoveryReport};
use super::entry::{PluginDescriptor, PluginEntry, PluginSource};
use super::events::RegistryEvent;
use crate::invoke::{panic_message, Outcome, RawArg};
use crate::manifest::short_type_name;
use crate::testable::{Hosted, Testable, TestableDefinition};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::panic::catch_unwind;
use std::sync::Arc;
use testable_foundation::{Error, Result, TestableConfig};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    /// 등록 순서
    entries: Vec<PluginEntry>,

    /// 식별자 -> entries 인덱스
    by_identity: HashMap<Uuid, usize>,

    /// 이미 등록된 discovery factory
    discovered: HashSet<&'static str>,

    /// 마지막으로 할당한 저장 키
    last_key: u32,
}

/// 플러그인 레지스트리
pub struct PluginRegistry {
    inner: RwLock<Inner>,

    /// discovery 직렬화 (확인 → 생성 → 등록이 한 단계로 진행)
    discovery_lock: Mutex<()>,

    /// 이벤트 채널
    event_tx: broadcast::Sender<RegistryEvent>,

    config: TestableConfig,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    /// 빈 레지스트리 생성
    pub fn new() -> Self {
        Self::with_config(TestableConfig::default())
    }

    pub fn with_config(config: TestableConfig) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_capacity());
        Self {
            inner: RwLock::new(Inner::default()),
            discovery_lock: Mutex::new(()),
            event_tx,
            config,
        }
    }

    /// 레지스트리 생성 후 discovery 실행
    pub fn discovered(config: TestableConfig) -> Self {
        let registry = Self::with_config(config);
        registry.discover();
        registry
    }

    pub fn config(&self) -> &TestableConfig {
        &self.config
    }

    // ========================================================================
    // Discovery
    // ========================================================================

    /// `register_testable!`로 제출된 모든 타입을 등록 (best-effort)
    ///
    /// 다시 호출하면 이미 등록된 타입은 건너뛰고 새 타입만 추가합니다.
    /// 동시에 호출되면 한 번에 하나씩 진행됩니다.
    /// 생성 실패, 빈 식별자, 중복 식별자는 제외되고 나머지는 계속 진행됩니다.
    pub fn discover(&self) -> DiscoveryReport {
        let _walk = self.discovery_lock.lock();
        let mut report = DiscoveryReport::default();

        for factory in discovery::factories() {
            let type_name = factory.type_name;

            if self.config.is_disabled(&factory.identity) {
                debug!(plugin = type_name, "Plugin disabled by configuration");
                report.skipped.push(type_name.to_string());
                continue;
            }
            if self.inner.read().discovered.contains(type_name) {
                report.skipped.push(type_name.to_string());
                continue;
            }

            let result = match catch_unwind(factory.construct) {
                Ok(Ok(plugin)) => self.insert(plugin, PluginSource::Builtin),
                Ok(Err(err)) => Err(self.rejected(type_name, err)),
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    Err(self.rejected(type_name, Error::construction(type_name, message)))
                }
            };

            match result {
                Ok(entry) => {
                    self.inner.write().discovered.insert(type_name);
                    report.registered.push(entry.identity());
                }
                Err(err) => report.rejected.push((type_name.to_string(), err.to_string())),
            }
        }

        info!(
            registered = report.registered.len(),
            skipped = report.skipped.len(),
            rejected = report.rejected.len(),
            total = self.len(),
            "Plugin discovery finished"
        );
        report
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// 특정 타입을 기본 생성자로 등록
    pub fn register<P>(&self) -> Result<PluginEntry>
    where
        P: TestableDefinition + Default,
    {
        let type_name = short_type_name::<P>();
        let plugin = match catch_unwind(discovery::construct::<P>) {
            Ok(Ok(plugin)) => plugin,
            Ok(Err(err)) => return Err(self.rejected(&type_name, err)),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                return Err(self.rejected(&type_name, Error::construction(&type_name, message)));
            }
        };
        self.insert(plugin, PluginSource::Runtime)
    }

    /// 호출자가 만든 인스턴스 등록
    pub fn register_instance<P: TestableDefinition>(&self, plugin: P) -> Result<PluginEntry> {
        let hosted = Hosted::new(plugin).map_err(|err| self.rejected(&short_type_name::<P>(), err))?;
        self.insert(Arc::new(hosted), PluginSource::Runtime)
    }

    /// 생성된 플러그인 추가 (빈/중복 식별자 거부)
    pub fn insert(&self, plugin: Arc<dyn Testable>, source: PluginSource) -> Result<PluginEntry> {
        let identity = plugin.identity();

        if identity.is_nil() {
            return Err(self.rejected(
                plugin.type_name(),
                Error::Registration(format!("{} has an empty identity", plugin.type_name())),
            ));
        }

        let entry = {
            let mut inner = self.inner.write();
            let existing = inner
                .by_identity
                .get(&identity)
                .map(|&index| inner.entries[index].plugin.type_name().to_string());
            if let Some(existing) = existing {
                drop(inner);
                return Err(self.rejected(
                    plugin.type_name(),
                    Error::Registration(format!(
                        "identity {} of {} is already registered by {}",
                        identity,
                        plugin.type_name(),
                        existing
                    )),
                ));
            }

            inner.last_key += 1;
            let entry = PluginEntry::new(inner.last_key, plugin, source);
            let index = inner.entries.len();
            inner.by_identity.insert(identity, index);
            inner.entries.push(entry.clone());
            entry
        };

        info!(
            identity = %identity,
            key = entry.key,
            name = entry.plugin.name(),
            source = %source,
            "Registered plugin"
        );
        let _ = self.event_tx.send(RegistryEvent::Registered {
            identity,
            key: entry.key,
            name: entry.plugin.name().to_string(),
            source,
        });

        Ok(entry)
    }

    fn rejected(&self, plugin: &str, err: Error) -> Error {
        warn!(plugin, error = %err, "Plugin excluded from registry");
        let _ = self
            .event_tx
            .send(RegistryEvent::rejected(plugin, err.to_string()));
        err
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// 식별자로 조회
    pub fn get(&self, identity: &Uuid) -> Option<Arc<dyn Testable>> {
        self.entry(identity).map(|entry| entry.plugin)
    }

    pub fn entry(&self, identity: &Uuid) -> Option<PluginEntry> {
        let inner = self.inner.read();
        inner
            .by_identity
            .get(identity)
            .map(|&index| inner.entries[index].clone())
    }

    /// 식별자 문자열로 조회
    ///
    /// UUID로 해석할 수 없으면 `InvalidIdentity`, 등록되지 않았으면 `PluginNotFound`
    pub fn resolve(&self, identity: &str) -> Result<Arc<dyn Testable>> {
        let parsed = Uuid::parse_str(identity.trim())
            .map_err(|_| Error::InvalidIdentity(identity.to_string()))?;
        self.get(&parsed).ok_or_else(|| {
            debug!(identity = %parsed, "Plugin lookup missed");
            Error::PluginNotFound(parsed.to_string())
        })
    }

    /// 저장 키로 조회
    pub fn get_by_key(&self, key: u32) -> Option<Arc<dyn Testable>> {
        let inner = self.inner.read();
        inner
            .entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| Arc::clone(&entry.plugin))
    }

    /// 이름으로 조회 (이름은 고유하지 않음, 등록 순서)
    pub fn find_by_name(&self, name: &str) -> Vec<Arc<dyn Testable>> {
        let inner = self.inner.read();
        inner
            .entries
            .iter()
            .filter(|entry| entry.plugin.name() == name)
            .map(|entry| Arc::clone(&entry.plugin))
            .collect()
    }

    /// 전체 설명 정보 (등록 순서)
    pub fn list(&self) -> Vec<PluginDescriptor> {
        self.entries().iter().map(PluginEntry::descriptor).collect()
    }

    pub fn entries(&self) -> Vec<PluginEntry> {
        self.inner.read().entries.clone()
    }

    pub fn descriptor(&self, identity: &Uuid) -> Option<PluginDescriptor> {
        self.entry(identity).map(|entry| entry.descriptor())
    }

    pub fn contains(&self, identity: &Uuid) -> bool {
        self.inner.read().by_identity.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// 변경 이벤트 구독
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.event_tx.subscribe()
    }

    // ========================================================================
    // Invocation
    // ========================================================================

    /// 식별자 문자열로 플러그인을 찾아 연산 호출
    ///
    /// 플러그인 조회 실패만 `Err`이고, 호출 실패는 항상 `Outcome`에 담깁니다.
    pub fn invoke(&self, identity: &str, operation: &str, args: Vec<RawArg>) -> Result<Outcome> {
        let plugin = self.resolve(identity)?;
        debug!(plugin = plugin.name(), operation, args = args.len(), "Dispatching invocation");
        Ok(plugin.invoke(operation, args))
    }

    /// 식별자 문자열로 플러그인을 찾아 필드 읽기
    pub fn read_field(&self, identity: &str, field: &str) -> Result<Outcome> {
        let plugin = self.resolve(identity)?;
        Ok(plugin.read_field(field))
    }
}
