//! 环形分段文件输出
//!
//! 支持：
//! - `.dxf` 单元轮廓导出（及回读校验）
//! - `.pdf` 多单元技术图纸
//! - `.json` 任务文件

pub mod dxf_io;
pub mod error;
pub mod job;
pub mod layout;
pub mod pdf;

pub use dxf_io::DxfOptions;
pub use error::FileError;
pub use job::{Job, UnitEntry};
pub use layout::{Orientation, PageSetup, PaperSize, SheetLayout};
pub use pdf::ReportOptions;
