//! 任务文件（.json）
//!
//! 一个任务 = 项目信息 + 单元列表，可以保存后重复生成图纸：
//!
//! ```json
//! {
//!   "project": { "company": "London Stone", "order_number": "LS-2024-001" },
//!   "units": [
//!     {
//!       "id": "Type-A",
//!       "radial": { "kind": "radii", "inner": 1000, "outer": 1200 },
//!       "span": { "kind": "chord", "value": 500 }
//!     }
//!   ]
//! }
//! ```

use crate::error::FileError;
use ringseg_core::segment::SegmentSpec;
use ringseg_core::unit::{ProjectInfo, Unit, UnitSchedule};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// 任务中的单元条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitEntry {
    pub id: String,
    #[serde(flatten)]
    pub spec: SegmentSpec,
}

/// 任务文件内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub project: ProjectInfo,
    #[serde(default)]
    pub units: Vec<UnitEntry>,
}

impl Job {
    /// 校验并计算所有单元
    pub fn to_schedule(&self) -> Result<UnitSchedule, FileError> {
        let mut schedule = UnitSchedule::new();
        for entry in &self.units {
            schedule.add(Unit::new(entry.id.clone(), entry.spec.clone())?)?;
        }
        Ok(schedule)
    }

    pub fn from_schedule(project: ProjectInfo, schedule: &UnitSchedule) -> Self {
        Self {
            project,
            units: schedule
                .iter()
                .map(|unit| UnitEntry {
                    id: unit.id.clone(),
                    spec: unit.spec.clone(),
                })
                .collect(),
        }
    }
}

/// 从文件加载任务
pub fn load(path: &Path) -> Result<Job, FileError> {
    let file = File::open(path)?;
    let job: Job = serde_json::from_reader(BufReader::new(file))?;
    tracing::info!("Loaded {} units from {}", job.units.len(), path.display());
    Ok(job)
}

/// 保存任务到文件
pub fn save(job: &Job, path: &Path) -> Result<(), FileError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, job)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::info!("Saved {} units to {}", job.units.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringseg_core::segment::{MeasuredOn, RadialInput, SpanInput};
    use ringseg_core::unit::UnitError;

    const SAMPLE: &str = r#"{
        "project": { "customer": "Natural History Museum" },
        "units": [
            {
                "id": "Type-A",
                "radial": { "kind": "radii", "inner": 1000, "outer": 1200 },
                "span": { "kind": "chord", "value": 500 }
            },
            {
                "id": "Type-B",
                "radial": { "kind": "inner_depth", "inner": 1000, "depth": 200 },
                "span": { "kind": "angle", "value": 30 },
                "measured_on": "inner",
                "thickness": 50
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let job: Job = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(job.project.customer(), "Natural History Museum");
        assert_eq!(job.project.company(), "London Stone");
        assert_eq!(job.units.len(), 2);
        assert_eq!(job.units[0].spec.span, SpanInput::Chord(500.0));
        assert_eq!(job.units[1].spec.measured_on, MeasuredOn::Inner);
        assert_eq!(job.units[1].spec.thickness, Some(50.0));

        let schedule = job.to_schedule().unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.get("Type-B").unwrap().geometry.outer_radius, 1200.0);
    }

    #[test]
    fn test_invalid_unit_in_job() {
        let mut job: Job = serde_json::from_str(SAMPLE).unwrap();
        job.units[1].spec.radial = RadialInput::Radii { inner: 1200.0, outer: 1000.0 };
        assert!(matches!(
            job.to_schedule(),
            Err(FileError::Unit(UnitError::Geometry { .. }))
        ));

        job.units[1] = job.units[0].clone();
        assert!(matches!(
            job.to_schedule(),
            Err(FileError::Unit(UnitError::DuplicateId(_)))
        ));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("job.json");

        let job: Job = serde_json::from_str(SAMPLE).unwrap();
        let schedule = job.to_schedule().unwrap();
        let rebuilt = Job::from_schedule(job.project.clone(), &schedule);

        save(&rebuilt, &path).expect("Failed to save");
        let loaded = load(&path).expect("Failed to load");
        assert_eq!(loaded, job);
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ \"units\": [ { \"id\": 1 } ] }").unwrap();
        assert!(matches!(load(&path), Err(FileError::Json(_))));
    }
}
