//! 单元与单元清单
//!
//! 一个单元 = 编号 + 尺寸规格 + 计算后的几何。清单保持添加顺序，
//! 编号在清单内唯一（也是导出的 DXF 文件名）。

use crate::segment::{GeometryError, SegmentGeometry, SegmentSpec};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Unit ID must not be empty")]
    EmptyId,

    #[error("Unit {0} already exists")]
    DuplicateId(String),

    #[error("Unit {id}: {source}")]
    Geometry {
        id: String,
        #[source]
        source: GeometryError,
    },
}

/// 环形分段单元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub spec: SegmentSpec,
    pub geometry: SegmentGeometry,
}

impl Unit {
    pub fn new(id: impl Into<String>, spec: SegmentSpec) -> Result<Self, UnitError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(UnitError::EmptyId);
        }
        let geometry = SegmentGeometry::calculate(&spec).map_err(|source| UnitError::Geometry {
            id: id.clone(),
            source,
        })?;
        Ok(Self { id, spec, geometry })
    }
}

/// 单元清单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitSchedule {
    units: Vec<Unit>,
}

impl UnitSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加单元，编号重复时拒绝
    pub fn add(&mut self, unit: Unit) -> Result<(), UnitError> {
        if self.get(&unit.id).is_some() {
            return Err(UnitError::DuplicateId(unit.id));
        }
        tracing::debug!("Added unit {}", unit.id);
        self.units.push(unit);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Unit> {
        let index = self.units.iter().position(|u| u.id == id)?;
        Some(self.units.remove(index))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Unit> {
        (index < self.units.len()).then(|| self.units.remove(index))
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Unit> {
        self.units.iter()
    }

    pub fn as_slice(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl<'a> IntoIterator for &'a UnitSchedule {
    type Item = &'a Unit;
    type IntoIter = std::slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

/// 项目信息（图框标题栏）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
}

/// 空字符串视为未填写
fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ProjectInfo {
    pub const DEFAULT_COMPANY: &'static str = "London Stone";
    pub const DEFAULT_PROJECT: &'static str = "Ring Segments";
    pub const DEFAULT_CUSTOMER: &'static str = "Customer";

    pub fn company(&self) -> &str {
        filled(&self.company).unwrap_or(Self::DEFAULT_COMPANY)
    }

    pub fn project(&self) -> &str {
        filled(&self.project).unwrap_or(Self::DEFAULT_PROJECT)
    }

    pub fn customer(&self) -> &str {
        filled(&self.customer).unwrap_or(Self::DEFAULT_CUSTOMER)
    }

    /// 订单号，未填写时为 `ORD-YYYYMMDD`
    pub fn order_number(&self, date: NaiveDate) -> String {
        filled(&self.order_number)
            .map(str::to_string)
            .unwrap_or_else(|| format!("ORD-{}", date.format("%Y%m%d")))
    }

    /// 用 other 中已填写的字段覆盖
    pub fn merge(&mut self, other: ProjectInfo) {
        if other.company.is_some() {
            self.company = other.company;
        }
        if other.project.is_some() {
            self.project = other.project;
        }
        if other.customer.is_some() {
            self.customer = other.customer;
        }
        if other.order_number.is_some() {
            self.order_number = other.order_number;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{RadialInput, SpanInput};

    fn spec() -> SegmentSpec {
        SegmentSpec::new(
            RadialInput::Radii { inner: 1000.0, outer: 1200.0 },
            SpanInput::Angle(30.0),
        )
    }

    #[test]
    fn test_unit_id_trimmed() {
        let unit = Unit::new("  Type-A ", spec()).unwrap();
        assert_eq!(unit.id, "Type-A");
        assert_eq!(Unit::new("   ", spec()), Err(UnitError::EmptyId));
    }

    #[test]
    fn test_unit_geometry_error_carries_id() {
        let bad = SegmentSpec::new(
            RadialInput::Radii { inner: 1000.0, outer: 900.0 },
            SpanInput::Angle(30.0),
        );
        let err = Unit::new("B", bad).unwrap_err();
        assert!(err.to_string().starts_with("Unit B: Inner radius"));
    }

    #[test]
    fn test_schedule_operations() {
        let mut schedule = UnitSchedule::new();
        schedule.add(Unit::new("A", spec()).unwrap()).unwrap();
        schedule.add(Unit::new("B", spec()).unwrap()).unwrap();
        schedule.add(Unit::new("C", spec()).unwrap()).unwrap();

        assert_eq!(
            schedule.add(Unit::new("A", spec()).unwrap()),
            Err(UnitError::DuplicateId("A".to_string()))
        );
        assert_eq!(schedule.len(), 3);

        assert_eq!(schedule.remove("B").map(|u| u.id), Some("B".to_string()));
        assert!(schedule.remove("B").is_none());
        let ids: Vec<&str> = schedule.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["A", "C"]);

        assert!(schedule.remove_at(5).is_none());
        assert_eq!(schedule.remove_at(0).map(|u| u.id), Some("A".to_string()));

        schedule.clear();
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_project_defaults() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let info = ProjectInfo {
            customer: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(info.company(), "London Stone");
        assert_eq!(info.project(), "Ring Segments");
        assert_eq!(info.customer(), "Customer");
        assert_eq!(info.order_number(date), "ORD-20240307");
    }

    #[test]
    fn test_project_merge() {
        let mut info = ProjectInfo {
            company: Some("Acme".to_string()),
            project: Some("Museum".to_string()),
            ..Default::default()
        };
        info.merge(ProjectInfo {
            project: Some("Library".to_string()),
            order_number: Some("LS-1".to_string()),
            ..Default::default()
        });
        assert_eq!(info.company(), "Acme");
        assert_eq!(info.project(), "Library");
        assert_eq!(info.order_number(NaiveDate::MIN), "LS-1");
    }
}
