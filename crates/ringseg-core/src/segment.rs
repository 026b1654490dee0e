//! 环形分段（弧形石材单元）几何计算
//!
//! 分段以原点为圆心，从 0 度逆时针扫到 θ。输入由两部分组成：
//! - 径向尺寸：内外半径，或一个半径加厚度（depth）
//! - 跨度：弦长、弧长或角度，弦长与弧长默认在外半径上测量
//!
//! 四个角点约定：
//! ```text
//!            p3
//!           /  \   外弧
//!         p4    \
//!  内弧  (       )
//!         p1----p2
//! ```
//! p1 = 内弧起点，p2 = 外弧起点，p3 = 外弧终点，p4 = 内弧终点。

use crate::geometry::{Arc, Geometry, Line, Polyline, PolylineVertex};
use crate::math::{BoundingBox2, Point2, Vector2, EPSILON};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use thiserror::Error;

/// 几何计算错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{name} must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("Inner radius {inner} must be less than outer radius {outer}")]
    InvertedRadii { inner: f64, outer: f64 },

    #[error("Chord length {chord} exceeds diameter {diameter}")]
    ChordExceedsDiameter { chord: f64, diameter: f64 },

    #[error("Arc length {arc} exceeds circumference {circumference}")]
    ArcExceedsCircumference { arc: f64, circumference: f64 },

    #[error("Angle {0} must be greater than 0 and at most 360 degrees")]
    AngleOutOfRange(f64),
}

fn positive(name: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NonPositive { name, value })
    }
}

/// 径向尺寸输入
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RadialInput {
    /// 内外半径
    Radii { inner: f64, outer: f64 },
    /// 内半径 + 厚度
    InnerDepth { inner: f64, depth: f64 },
    /// 外半径 + 厚度
    OuterDepth { outer: f64, depth: f64 },
}

impl RadialInput {
    /// 解析为 (内半径, 外半径)
    pub fn resolve(&self) -> Result<(f64, f64), GeometryError> {
        let (inner, outer) = match *self {
            RadialInput::Radii { inner, outer } => {
                (positive("Inner radius", inner)?, positive("Outer radius", outer)?)
            }
            RadialInput::InnerDepth { inner, depth } => {
                let inner = positive("Inner radius", inner)?;
                (inner, inner + positive("Depth", depth)?)
            }
            RadialInput::OuterDepth { outer, depth } => {
                let outer = positive("Outer radius", outer)?;
                let inner = outer - positive("Depth", depth)?;
                (positive("Inner radius", inner)?, outer)
            }
        };

        if inner >= outer {
            return Err(GeometryError::InvertedRadii { inner, outer });
        }
        Ok((inner, outer))
    }
}

/// 跨度输入
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SpanInput {
    /// 弦长（毫米）
    Chord(f64),
    /// 弧长（毫米）
    Arc(f64),
    /// 角度（度）
    Angle(f64),
}

/// 弦长/弧长的测量半径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MeasuredOn {
    #[default]
    Outer,
    Inner,
}

/// 分段尺寸规格（用户输入）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub radial: RadialInput,
    pub span: SpanInput,
    #[serde(default)]
    pub measured_on: MeasuredOn,
    /// 石材板厚（可选，仅用于标注和体积）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}

impl SegmentSpec {
    pub fn new(radial: RadialInput, span: SpanInput) -> Self {
        Self {
            radial,
            span,
            measured_on: MeasuredOn::Outer,
            thickness: None,
        }
    }

    pub fn measured_on(mut self, measured_on: MeasuredOn) -> Self {
        self.measured_on = measured_on;
        self
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }
}

/// 标注类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    InnerRadius,
    OuterRadius,
    Chord,
    ArcLength,
    Angle,
}

/// 标注文字的定位信息（模型坐标）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub kind: AnnotationKind,
    /// 锚点
    pub anchor: Point2,
    /// 文字偏移方向（单位向量，零向量表示直接放在锚点上）
    pub direction: Vector2,
    pub text: String,
}

/// 计算后的分段几何
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentGeometry {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub depth: f64,
    pub angle_rad: f64,
    pub angle_degrees: f64,
    pub inner_arc_length: f64,
    pub outer_arc_length: f64,
    pub inner_chord_length: f64,
    pub outer_chord_length: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}

impl SegmentGeometry {
    /// 根据规格计算完整几何
    pub fn calculate(spec: &SegmentSpec) -> Result<Self, GeometryError> {
        let (inner_radius, outer_radius) = spec.radial.resolve()?;
        let reference = match spec.measured_on {
            MeasuredOn::Outer => outer_radius,
            MeasuredOn::Inner => inner_radius,
        };

        let angle_rad = match spec.span {
            SpanInput::Angle(degrees) => {
                if !degrees.is_finite() || degrees <= 0.0 || degrees > 360.0 {
                    return Err(GeometryError::AngleOutOfRange(degrees));
                }
                degrees.to_radians()
            }
            SpanInput::Chord(chord) => {
                let chord = positive("Chord length", chord)?;
                let diameter = 2.0 * reference;
                if chord > diameter {
                    return Err(GeometryError::ChordExceedsDiameter { chord, diameter });
                }
                2.0 * (chord / diameter).asin()
            }
            SpanInput::Arc(arc) => {
                let arc = positive("Arc length", arc)?;
                let circumference = TAU * reference;
                if arc > circumference {
                    return Err(GeometryError::ArcExceedsCircumference { arc, circumference });
                }
                arc / reference
            }
        };

        let thickness = spec
            .thickness
            .map(|t| positive("Thickness", t))
            .transpose()?;

        let geometry = Self::from_radii_and_angle(inner_radius, outer_radius, angle_rad, thickness);
        tracing::debug!(
            inner = geometry.inner_radius,
            outer = geometry.outer_radius,
            angle = geometry.angle_degrees,
            "Calculated segment geometry"
        );
        Ok(geometry)
    }

    /// 从已确定的半径与角度构造（不做校验）
    pub fn from_radii_and_angle(
        inner_radius: f64,
        outer_radius: f64,
        angle_rad: f64,
        thickness: Option<f64>,
    ) -> Self {
        let half_sin = (angle_rad / 2.0).sin();
        Self {
            inner_radius,
            outer_radius,
            depth: outer_radius - inner_radius,
            angle_rad,
            angle_degrees: angle_rad.to_degrees(),
            inner_arc_length: inner_radius * angle_rad,
            outer_arc_length: outer_radius * angle_rad,
            inner_chord_length: 2.0 * inner_radius * half_sin,
            outer_chord_length: 2.0 * outer_radius * half_sin,
            thickness,
        }
    }

    /// 四个角点 [p1, p2, p3, p4]
    pub fn corners(&self) -> [Point2; 4] {
        let (sin, cos) = self.angle_rad.sin_cos();
        [
            Point2::new(self.inner_radius, 0.0),
            Point2::new(self.outer_radius, 0.0),
            Point2::new(self.outer_radius * cos, self.outer_radius * sin),
            Point2::new(self.inner_radius * cos, self.inner_radius * sin),
        ]
    }

    pub fn inner_arc(&self) -> Arc {
        Arc::new(Point2::origin(), self.inner_radius, 0.0, self.angle_rad)
    }

    pub fn outer_arc(&self) -> Arc {
        Arc::new(Point2::origin(), self.outer_radius, 0.0, self.angle_rad)
    }

    /// 起始径向边 p1 → p2
    pub fn start_edge(&self) -> Line {
        let [p1, p2, _, _] = self.corners();
        Line::new(p1, p2)
    }

    /// 终止径向边 p3 → p4
    pub fn end_edge(&self) -> Line {
        let [_, _, p3, p4] = self.corners();
        Line::new(p3, p4)
    }

    /// 外弧弦 p2 → p3
    pub fn outer_chord(&self) -> Line {
        let [_, p2, p3, _] = self.corners();
        Line::new(p2, p3)
    }

    /// 轮廓：内弧、外弧和两条径向边
    pub fn outline(&self) -> Vec<Geometry> {
        vec![
            Geometry::Arc(self.inner_arc()),
            Geometry::Arc(self.outer_arc()),
            Geometry::Line(self.start_edge()),
            Geometry::Line(self.end_edge()),
        ]
    }

    /// 带凸度的闭合多段线轮廓：p1 → p2 → (外弧) → p3 → p4 → (内弧, 顺时针) → p1
    ///
    /// 超过半圆时每条弧在 θ/2 处拆成两段，凸度保持在 [0, 1] 内。
    /// 整圆时 p2/p3 重合，不拆分无法表示。
    pub fn outline_polyline(&self) -> Polyline {
        let [p1, p2, p3, p4] = self.corners();
        let pieces = if self.angle_rad > PI + EPSILON { 2 } else { 1 };
        let bulge = (self.angle_rad / (4.0 * pieces as f64)).tan();

        let mut vertices = vec![PolylineVertex::new(p1), PolylineVertex::with_bulge(p2, bulge)];
        if pieces == 2 {
            vertices.push(PolylineVertex::with_bulge(self.outer_arc().midpoint(), bulge));
        }
        vertices.push(PolylineVertex::new(p3));
        vertices.push(PolylineVertex::with_bulge(p4, -bulge));
        if pieces == 2 {
            vertices.push(PolylineVertex::with_bulge(self.inner_arc().midpoint(), -bulge));
        }
        Polyline::new(vertices, true)
    }

    /// 每条弧的离散段数
    pub fn arc_segments(&self) -> usize {
        ((self.angle_degrees / 5.0) as usize).max(10)
    }

    /// 离散为闭合多边形（不重复首点）
    pub fn flatten(&self) -> Vec<Point2> {
        let n = self.arc_segments();
        let mut points = self.outer_arc().flatten(n);
        points.extend(self.inner_arc().flatten(n).into_iter().rev());
        points
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        self.outer_arc()
            .bounding_box()
            .union(&self.inner_arc().bounding_box())
    }

    /// 面积（平方毫米）
    pub fn area(&self) -> f64 {
        self.angle_rad / 2.0 * (self.outer_radius.powi(2) - self.inner_radius.powi(2))
    }

    /// 体积（立方毫米），需要板厚
    pub fn volume(&self) -> Option<f64> {
        self.thickness.map(|t| self.area() * t)
    }

    /// 外弧矢高（弦中点到弧的距离）
    pub fn outer_rise(&self) -> f64 {
        self.outer_radius * (1.0 - (self.angle_rad / 2.0).cos())
    }

    /// 标注文字位置
    pub fn annotations(&self) -> Vec<Annotation> {
        let [p1, p2, _, _] = self.corners();
        let half = self.angle_rad / 2.0;
        let bisector = Vector2::new(half.cos(), half.sin());
        let down = Vector2::new(0.0, -1.0);
        let mid_radius = (self.inner_radius + self.outer_radius) / 2.0;

        vec![
            Annotation {
                kind: AnnotationKind::InnerRadius,
                anchor: p1,
                direction: down,
                text: format!("R{:.0}", self.inner_radius),
            },
            Annotation {
                kind: AnnotationKind::OuterRadius,
                anchor: p2,
                direction: down,
                text: format!("R{:.0}", self.outer_radius),
            },
            Annotation {
                kind: AnnotationKind::Chord,
                anchor: self.outer_chord().midpoint(),
                direction: -bisector,
                text: format!("{:.0}", self.outer_chord_length),
            },
            Annotation {
                kind: AnnotationKind::ArcLength,
                anchor: self.outer_arc().midpoint(),
                direction: bisector,
                text: format!("{:.0}", self.outer_arc_length),
            },
            Annotation {
                kind: AnnotationKind::Angle,
                anchor: Point2::origin() + bisector * mid_radius,
                direction: Vector2::zeros(),
                text: format!("{:.0}°", self.angle_degrees),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn radii(inner: f64, outer: f64) -> RadialInput {
        RadialInput::Radii { inner, outer }
    }

    #[test]
    fn test_chord_on_outer_radius() {
        let spec = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Chord(500.0));
        let g = SegmentGeometry::calculate(&spec).unwrap();

        let expected = 2.0 * (500.0_f64 / 2400.0).asin();
        assert_relative_eq!(g.angle_rad, expected, epsilon = 1e-12);
        assert_relative_eq!(g.outer_chord_length, 500.0, epsilon = 1e-9);
        assert_relative_eq!(g.inner_chord_length, 2000.0 * (expected / 2.0).sin(), epsilon = 1e-9);
        assert_relative_eq!(g.depth, 200.0);
    }

    #[test]
    fn test_chord_on_inner_radius() {
        let spec = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Chord(500.0))
            .measured_on(MeasuredOn::Inner);
        let g = SegmentGeometry::calculate(&spec).unwrap();
        assert_relative_eq!(g.inner_chord_length, 500.0, epsilon = 1e-9);
        assert!(g.outer_chord_length > 500.0);
    }

    #[test]
    fn test_arc_length() {
        let spec = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Arc(600.0));
        let g = SegmentGeometry::calculate(&spec).unwrap();
        assert_relative_eq!(g.angle_rad, 0.5, epsilon = 1e-12);
        assert_relative_eq!(g.outer_arc_length, 600.0, epsilon = 1e-9);
        assert_relative_eq!(g.inner_arc_length, 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angle_input() {
        let spec = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Angle(30.0));
        let g = SegmentGeometry::calculate(&spec).unwrap();
        assert_relative_eq!(g.angle_degrees, 30.0, epsilon = 1e-9);
        assert_relative_eq!(g.outer_chord_length, 2.0 * 1200.0 * 15.0_f64.to_radians().sin(), epsilon = 1e-9);
    }

    #[test]
    fn test_depth_modes() {
        let inner = SegmentSpec::new(
            RadialInput::InnerDepth { inner: 1000.0, depth: 200.0 },
            SpanInput::Angle(30.0),
        );
        let g = SegmentGeometry::calculate(&inner).unwrap();
        assert_relative_eq!(g.outer_radius, 1200.0);

        let outer = SegmentSpec::new(
            RadialInput::OuterDepth { outer: 1200.0, depth: 150.0 },
            SpanInput::Angle(30.0),
        );
        let g = SegmentGeometry::calculate(&outer).unwrap();
        assert_relative_eq!(g.inner_radius, 1050.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let inverted = SegmentSpec::new(radii(1200.0, 1000.0), SpanInput::Angle(30.0));
        assert!(matches!(
            SegmentGeometry::calculate(&inverted),
            Err(GeometryError::InvertedRadii { .. })
        ));

        let equal = SegmentSpec::new(radii(1000.0, 1000.0), SpanInput::Angle(30.0));
        assert!(matches!(
            SegmentGeometry::calculate(&equal),
            Err(GeometryError::InvertedRadii { .. })
        ));

        let chord = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Chord(2401.0));
        assert!(matches!(
            SegmentGeometry::calculate(&chord),
            Err(GeometryError::ChordExceedsDiameter { .. })
        ));

        let arc = SegmentSpec::new(radii(1.0, 2.0), SpanInput::Arc(13.0));
        assert!(matches!(
            SegmentGeometry::calculate(&arc),
            Err(GeometryError::ArcExceedsCircumference { .. })
        ));

        for angle in [0.0, -5.0, 360.5, f64::NAN] {
            let spec = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Angle(angle));
            assert!(matches!(
                SegmentGeometry::calculate(&spec),
                Err(GeometryError::AngleOutOfRange(_))
            ));
        }

        let too_deep = SegmentSpec::new(
            RadialInput::OuterDepth { outer: 100.0, depth: 100.0 },
            SpanInput::Angle(30.0),
        );
        assert!(matches!(
            SegmentGeometry::calculate(&too_deep),
            Err(GeometryError::NonPositive { name: "Inner radius", .. })
        ));

        let thin = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Angle(30.0))
            .with_thickness(0.0);
        assert!(matches!(
            SegmentGeometry::calculate(&thin),
            Err(GeometryError::NonPositive { name: "Thickness", .. })
        ));
    }

    #[test]
    fn test_full_diameter_chord_is_half_ring() {
        let spec = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Chord(2400.0));
        let g = SegmentGeometry::calculate(&spec).unwrap();
        assert_relative_eq!(g.angle_degrees, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_corners_on_radii() {
        let spec = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Angle(30.0));
        let g = SegmentGeometry::calculate(&spec).unwrap();
        let [p1, p2, p3, p4] = g.corners();

        assert_eq!(p1, Point2::new(1000.0, 0.0));
        assert_eq!(p2, Point2::new(1200.0, 0.0));
        assert_relative_eq!(p3.coords.norm(), 1200.0, epsilon = 1e-9);
        assert_relative_eq!(p4.coords.norm(), 1000.0, epsilon = 1e-9);
        assert_relative_eq!(p3.y.atan2(p3.x), g.angle_rad, epsilon = 1e-12);
        assert_relative_eq!(g.outer_chord().length(), g.outer_chord_length, epsilon = 1e-9);
    }

    #[test]
    fn test_outline_polyline_matches_arcs() {
        let spec = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Angle(40.0));
        let g = SegmentGeometry::calculate(&spec).unwrap();
        let parts = g.outline_polyline().explode();
        assert_eq!(parts.len(), 4);

        let radii: Vec<f64> = parts
            .iter()
            .filter_map(|p| match p {
                Geometry::Arc(a) => Some(a.radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii.len(), 2);
        assert_relative_eq!(radii[0], 1200.0, epsilon = 1e-6);
        assert_relative_eq!(radii[1], 1000.0, epsilon = 1e-6);

        if let Geometry::Arc(inner) = &parts[3] {
            assert!(inner.center.coords.norm() < 1e-6);
            assert_relative_eq!(inner.sweep_angle(), g.angle_rad, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_outline_polyline_splits_large_angles() {
        for degrees in [270.0, 360.0] {
            let spec = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Angle(degrees));
            let g = SegmentGeometry::calculate(&spec).unwrap();
            let polyline = g.outline_polyline();
            assert_eq!(polyline.vertices.len(), 6);
            assert!(polyline.vertices.iter().all(|v| v.bulge.abs() <= 1.0 + 1e-12));

            let arcs: Vec<_> = polyline.explode().iter().filter_map(Geometry::as_arc).cloned().collect();
            assert_eq!(arcs.len(), 4);
            let outer_sweep: f64 = arcs
                .iter()
                .filter(|a| (a.radius - 1200.0).abs() < 1e-6)
                .map(|a| a.sweep_angle())
                .sum();
            assert_relative_eq!(outer_sweep, g.angle_rad, epsilon = 1e-9);
            assert!(arcs.iter().all(|a| a.center.coords.norm() < 1e-6));
        }
    }

    #[test]
    fn test_flatten_point_count() {
        let spec = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Angle(90.0));
        let g = SegmentGeometry::calculate(&spec).unwrap();
        // 90 / 5 = 18 段
        assert_eq!(g.arc_segments(), 18);
        assert_eq!(g.flatten().len(), 2 * 19);

        let small = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Angle(12.0));
        let g = SegmentGeometry::calculate(&small).unwrap();
        assert_eq!(g.arc_segments(), 10);
    }

    #[test]
    fn test_area_and_volume() {
        let spec = SegmentSpec::new(radii(1.0, 2.0), SpanInput::Angle(360.0)).with_thickness(10.0);
        let g = SegmentGeometry::calculate(&spec).unwrap();
        let area = std::f64::consts::PI * 3.0;
        assert_relative_eq!(g.area(), area, epsilon = 1e-9);
        assert_relative_eq!(g.volume().unwrap(), area * 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bounding_box_of_quarter() {
        let spec = SegmentSpec::new(radii(100.0, 200.0), SpanInput::Angle(90.0));
        let g = SegmentGeometry::calculate(&spec).unwrap();
        let bbox = g.bounding_box();
        assert!(bbox.min.x.abs() < 1e-9);
        assert!(bbox.min.y.abs() < 1e-9);
        assert_relative_eq!(bbox.max.x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(bbox.max.y, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_annotations() {
        let spec = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Chord(500.0));
        let g = SegmentGeometry::calculate(&spec).unwrap();
        let notes = g.annotations();
        assert_eq!(notes.len(), 5);

        let text = |kind| {
            notes
                .iter()
                .find(|a| a.kind == kind)
                .map(|a| a.text.clone())
                .unwrap()
        };
        assert_eq!(text(AnnotationKind::InnerRadius), "R1000");
        assert_eq!(text(AnnotationKind::OuterRadius), "R1200");
        assert_eq!(text(AnnotationKind::Chord), "500");
        assert_eq!(text(AnnotationKind::ArcLength), format!("{:.0}", g.outer_arc_length));

        let arc_note = notes.iter().find(|a| a.kind == AnnotationKind::ArcLength).unwrap();
        assert_relative_eq!(arc_note.anchor.coords.norm(), 1200.0, epsilon = 1e-9);
        assert!(arc_note.direction.dot(&arc_note.anchor.coords) > 0.0);

        let chord_note = notes.iter().find(|a| a.kind == AnnotationKind::Chord).unwrap();
        assert!(chord_note.direction.dot(&chord_note.anchor.coords) < 0.0);
    }

    #[test]
    fn test_spec_json_shape() {
        let spec = SegmentSpec::new(radii(1000.0, 1200.0), SpanInput::Chord(500.0));
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["radial"]["kind"], "radii");
        assert_eq!(json["span"]["kind"], "chord");
        assert_eq!(json["span"]["value"], 500.0);
        assert_eq!(json["measured_on"], "outer");
        assert!(json.get("thickness").is_none());

        let back: SegmentSpec = serde_json::from_value(json).unwrap();
        assert!((back.radial.resolve().unwrap().1 - 1200.0).abs() < EPSILON);
    }
}
