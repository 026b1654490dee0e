//! 环形分段核心几何
//!
//! 把弧形石材单元的尺寸（内外半径 / 厚度 + 弦长 / 弧长 / 角度）
//! 换算成完整几何：角点、圆弧、面积和标注位置。
//!
//! # 示例
//!
//! ```rust
//! use ringseg_core::prelude::*;
//!
//! let spec = SegmentSpec::new(
//!     RadialInput::Radii { inner: 1000.0, outer: 1200.0 },
//!     SpanInput::Chord(500.0),
//! );
//! let geometry = SegmentGeometry::calculate(&spec).unwrap();
//!
//! println!("Angle: {:.1}°", geometry.angle_degrees);
//! ```

pub mod geometry;
pub mod input_parser;
pub mod math;
pub mod segment;
pub mod transform;
pub mod unit;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::geometry::{
        Arc, Dimension, DimensionType, Geometry, Line, Polyline, PolylineVertex, Text,
        TextAlignment,
    };
    pub use crate::input_parser::{InputParser, InputValue, ParseError};
    pub use crate::math::{BoundingBox2, Point2, Vector2};
    pub use crate::segment::{
        Annotation, AnnotationKind, GeometryError, MeasuredOn, RadialInput, SegmentGeometry,
        SegmentSpec, SpanInput,
    };
    pub use crate::transform::Transform2D;
    pub use crate::unit::{ProjectInfo, Unit, UnitError, UnitSchedule};
}
