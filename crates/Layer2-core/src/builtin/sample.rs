//! SampleObjectTest - 구조화된 객체 인자/결과 플러그인

use crate::manifest::Manifest;
use crate::testable::TestableDefinition;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use testable_foundation::Result;
use uuid::Uuid;

// ============================================================================
// SampleObject
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleObject {
    pub id: i32,
    pub name: String,
    pub is_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_obj: Option<SubSampleObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSampleObject {
    pub obj_id: Uuid,
    pub key_name: String,
}

impl SampleObject {
    pub fn new(id: i32, name: impl Into<String>, is_enabled: bool) -> Self {
        let name = name.into();
        Self {
            sub_obj: Some(SubSampleObject {
                obj_id: Uuid::new_v4(),
                key_name: format!("{}_sub", name),
            }),
            id,
            name,
            is_enabled,
        }
    }
}

// ============================================================================
// SampleObjectTest
// ============================================================================

/// 고정 샘플 데이터와 객체 변환 연산
///
/// `Created` 필드는 이 인스턴스가 만든 샘플 수입니다. 여러 호출이 동시에
/// 들어올 수 있으므로 카운터는 atomic입니다.
#[derive(Debug, Default)]
pub struct SampleObjectTest {
    created: AtomicU64,
}

impl SampleObjectTest {
    pub fn test_string_out(&self) -> anyhow::Result<&'static str> {
        Ok("This is a test!")
    }

    pub fn test_int_out(&self) -> anyhow::Result<i32> {
        Ok(1)
    }

    pub fn test_int_array_out(&self) -> anyhow::Result<Vec<i32>> {
        Ok(vec![1, 2])
    }

    pub fn test_obj_array_out(&self) -> anyhow::Result<Vec<SampleObject>> {
        let samples = vec![
            SampleObject::new(1, "TestObj1", true),
            SampleObject::new(2, "TestObj2", false),
            SampleObject::new(3, "TestObjXX", true),
        ];
        self.created.fetch_add(samples.len() as u64, Ordering::Relaxed);
        Ok(samples)
    }

    pub fn make_sample(&self, id: i32, name: String, is_enabled: bool) -> anyhow::Result<SampleObject> {
        self.created.fetch_add(1, Ordering::Relaxed);
        Ok(SampleObject::new(id, name, is_enabled))
    }

    pub fn describe(&self, obj: SampleObject) -> anyhow::Result<String> {
        let state = if obj.is_enabled { "enabled" } else { "disabled" };
        Ok(match obj.sub_obj {
            Some(sub) => format!("{} (#{}, {}, key {})", obj.name, obj.id, state, sub.key_name),
            None => format!("{} (#{}, {})", obj.name, obj.id, state),
        })
    }

    pub fn toggle(&self, mut obj: SampleObject) -> anyhow::Result<SampleObject> {
        obj.is_enabled = !obj.is_enabled;
        Ok(obj)
    }

    pub fn reset(&self) -> anyhow::Result<()> {
        self.created.store(0, Ordering::Relaxed);
        Ok(())
    }

    pub fn created(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }
}

impl TestableDefinition for SampleObjectTest {
    const IDENTITY: Uuid = Uuid::from_u128(0x3F2A8C61_5B7D_4E19_A0C4_9D1E6B2F7A83);
    const NAME: &'static str = "SampleObjectTest";
    const DESCRIPTION: &'static str = "Structured object Testable implementation";
    const AUTHOR: &'static str = "JPS";

    fn manifest() -> Result<Manifest<Self>> {
        Manifest::builder()
            .operation("TestStringOut", &[], Self::test_string_out)
            .operation("TestIntOut", &[], Self::test_int_out)
            .operation("TestIntArrayOut", &[], Self::test_int_array_out)
            .operation("TestObjArrayOut", &[], Self::test_obj_array_out)
            .operation("MakeSample", &["id", "name", "isEnabled"], Self::make_sample)
            .operation("Describe", &["obj"], Self::describe)
            .operation("Toggle", &["obj"], Self::toggle)
            .operation("Reset", &[], Self::reset)
            .field("Created", SampleObjectTest::created)
            .build()
    }
}
