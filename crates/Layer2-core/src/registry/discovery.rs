//! Discovery - 플러그인 자동 등록 테이블
//!
//! 플러그인 타입은 `register_testable!`로 프로세스 전역 테이블에 factory를
//! 제출하고, `PluginRegistry::discover()`가 이 테이블을 순회하며 인스턴스를
//! 만듭니다. 기본 생성자(`Default`)가 없는 타입은 컴파일 시점에 거부됩니다.
//!
//! ```ignore
//! #[derive(Default)]
//! pub struct MathsTest;
//!
//! impl TestableDefinition for MathsTest { /* ... */ }
//!
//! register_testable!(MathsTest);
//! ```

use crate::testable::{Hosted, Testable, TestableDefinition};
use serde::Serialize;
use std::sync::Arc;
use testable_foundation::Result;
use uuid::Uuid;

/// 플러그인 factory (타입 이름 + 식별자 + 생성 함수)
pub struct PluginFactory {
    pub type_name: &'static str,
    pub identity: Uuid,
    pub construct: fn() -> Result<Arc<dyn Testable>>,
}

impl PluginFactory {
    pub const fn new(
        type_name: &'static str,
        identity: Uuid,
        construct: fn() -> Result<Arc<dyn Testable>>,
    ) -> Self {
        Self {
            type_name,
            identity,
            construct,
        }
    }
}

inventory::collect!(PluginFactory);

/// 기본 생성자로 인스턴스 생성
pub fn construct<P>() -> Result<Arc<dyn Testable>>
where
    P: TestableDefinition + Default,
{
    Ok(Arc::new(Hosted::<P>::create()?))
}

/// 제출된 모든 factory (타입 이름 순)
pub fn factories() -> Vec<&'static PluginFactory> {
    let mut all = Vec::new();
    for factory in inventory::iter::<PluginFactory> {
        all.push(factory);
    }
    all.sort_by(|a, b| a.type_name.cmp(b.type_name));
    all
}

/// 플러그인 타입을 discovery 테이블에 등록
#[macro_export]
macro_rules! register_testable {
    ($ty:ty) => {
        $crate::inventory::submit! {
            $crate::registry::PluginFactory::new(
                stringify!($ty),
                <$ty as $crate::testable::TestableDefinition>::IDENTITY,
                $crate::registry::construct::<$ty>,
            )
        }
    };
}

// ============================================================================
// DiscoveryReport
// ============================================================================

/// discovery 한 번의 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryReport {
    /// 새로 등록된 식별자
    pub registered: Vec<Uuid>,

    /// 이미 등록되었거나 설정에서 꺼진 타입
    pub skipped: Vec<String>,

    /// 제외된 타입과 이유
    pub rejected: Vec<(String, String)>,
}

impl DiscoveryReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}
