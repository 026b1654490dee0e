//! 文件操作错误定义

use ringseg_core::segment::GeometryError;
use ringseg_core::unit::UnitError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("DXF error: {0}")]
    Dxf(String),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Not a ring segment: {0}")]
    NotASegment(String),

    #[error("No units to export")]
    NoUnits,

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
