//! Testable Contract - 모든 플러그인이 만족해야 하는 최소 인터페이스
//!
//! 플러그인 작성자는 `TestableDefinition`을 구현하고, 레지스트리는
//! 이를 `Hosted<P>`로 감싸 object-safe한 `Testable`로 다룹니다.

use crate::invoke::{self, Outcome, RawArg};
use crate::manifest::{short_type_name, FieldSignature, Manifest, OperationSignature};
use std::any::Any;
use std::fmt;
use testable_foundation::Result;
use uuid::Uuid;

// ============================================================================
// Testable - 레지스트리가 다루는 형태
// ============================================================================

/// 발견/호출 가능한 플러그인
///
/// `invoke`와 `read_field`는 어떤 입력에도 panic하거나 에러를 전파하지 않습니다.
pub trait Testable: Send + Sync + 'static {
    /// 타입별 고유 식별자
    fn identity(&self) -> Uuid;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn author(&self) -> &str;

    /// 호출 가능한 연산 시그니처 (선언 순서, 매번 새로 계산)
    fn operations(&self) -> Vec<OperationSignature>;

    /// 읽기 가능한 필드 시그니처
    fn fields(&self) -> Vec<FieldSignature>;

    /// 이름으로 연산 호출
    fn invoke(&self, operation: &str, args: Vec<RawArg>) -> Outcome;

    /// 이름으로 필드 읽기
    fn read_field(&self, field: &str) -> Outcome;

    /// 구현 타입 이름
    fn type_name(&self) -> &str;

    /// 구체 플러그인 타입으로 downcast할 때 사용
    fn as_any(&self) -> &dyn Any;
}

impl fmt::Debug for dyn Testable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Testable")
            .field("identity", &self.identity())
            .field("name", &self.name())
            .field("type", &self.type_name())
            .finish()
    }
}

// ============================================================================
// TestableDefinition - 플러그인 작성자가 구현
// ============================================================================

/// 플러그인 정의
///
/// ```ignore
/// impl TestableDefinition for MathsTest {
///     const IDENTITY: Uuid = Uuid::from_u128(0xB510C950_F320_4F4A_8D61_588896FC1534);
///     const NAME: &'static str = "MathsTest";
///
///     fn manifest() -> Result<Manifest<Self>> {
///         Manifest::builder()
///             .operation("AddNumbers", &["num1", "num2"], Self::add_numbers)
///             .build()
///     }
/// }
/// ```
pub trait TestableDefinition: Send + Sync + Sized + 'static {
    const IDENTITY: Uuid;
    const NAME: &'static str;
    const DESCRIPTION: &'static str = "";
    const AUTHOR: &'static str = "";

    /// 호출 가능한 멤버 allow-list
    fn manifest() -> Result<Manifest<Self>>;
}

// ============================================================================
// Hosted - Definition + Manifest
// ============================================================================

/// 인스턴스와 Manifest를 묶어 `Testable`로 노출
pub struct Hosted<P: TestableDefinition> {
    plugin: P,
    manifest: Manifest<P>,
    type_name: String,
}

impl<P: TestableDefinition> Hosted<P> {
    /// 이미 만들어진 인스턴스로 생성
    pub fn new(plugin: P) -> Result<Self> {
        Ok(Self {
            plugin,
            manifest: P::manifest()?,
            type_name: short_type_name::<P>(),
        })
    }

    /// 기본 생성자로 생성
    pub fn create() -> Result<Self>
    where
        P: Default,
    {
        Self::new(P::default())
    }

    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    pub fn manifest(&self) -> &Manifest<P> {
        &self.manifest
    }
}

impl<P: TestableDefinition> Testable for Hosted<P> {
    fn identity(&self) -> Uuid {
        P::IDENTITY
    }

    fn name(&self) -> &str {
        P::NAME
    }

    fn description(&self) -> &str {
        P::DESCRIPTION
    }

    fn author(&self) -> &str {
        P::AUTHOR
    }

    fn operations(&self) -> Vec<OperationSignature> {
        self.manifest.operation_signatures()
    }

    fn fields(&self) -> Vec<FieldSignature> {
        self.manifest.field_signatures()
    }

    fn invoke(&self, operation: &str, args: Vec<RawArg>) -> Outcome {
        invoke::invoke(&self.manifest, &self.plugin, operation, args)
    }

    fn read_field(&self, field: &str) -> Outcome {
        invoke::read_field(&self.manifest, &self.plugin, field)
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn as_any(&self) -> &dyn Any {
        &self.plugin
    }
}
