//! 几何图元定义
//!
//! 环形分段的轮廓和标注用到的图元：
//! - 线段 (Line)
//! - 圆弧 (Arc)
//! - 带凸度的多段线 (Polyline)
//! - 文本 (Text)
//! - 尺寸标注 (Dimension)

use crate::math::{normalize_angle, BoundingBox2, Point2, Vector2, EPSILON};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

/// 几何类型枚举
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Geometry {
    Line(Line),
    Arc(Arc),
    Polyline(Polyline),
    Text(Text),
    Dimension(Dimension),
}

impl Geometry {
    pub fn as_arc(&self) -> Option<&Arc> {
        match self {
            Geometry::Arc(arc) => Some(arc),
            _ => None,
        }
    }
}

/// 线段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
}

impl Line {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.start, &self.end)
    }

    pub fn midpoint(&self) -> Point2 {
        nalgebra::center(&self.start, &self.end)
    }
}

/// 圆弧，从起始角逆时针扫到终止角（弧度）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub fn new(center: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// 扫角，范围 (0, 2π]
    ///
    /// 终止角比起始角大一整圈时视为整圆。
    pub fn sweep_angle(&self) -> f64 {
        let raw = self.end_angle - self.start_angle;
        let sweep = normalize_angle(raw);
        if sweep < EPSILON && raw > EPSILON {
            TAU
        } else {
            sweep
        }
    }

    pub fn length(&self) -> f64 {
        self.sweep_angle() * self.radius
    }

    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        let (sin, cos) = angle.sin_cos();
        self.center + Vector2::new(cos, sin) * self.radius
    }

    pub fn midpoint(&self) -> Point2 {
        self.point_at_angle(self.start_angle + self.sweep_angle() / 2.0)
    }

    /// 等分为 `segments` 段，返回 segments + 1 个点（含两端）
    pub fn flatten(&self, segments: usize) -> Vec<Point2> {
        let segments = segments.max(1);
        let step = self.sweep_angle() / segments as f64;
        (0..=segments)
            .map(|i| self.point_at_angle(self.start_angle + step * i as f64))
            .collect()
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        let sweep = self.sweep_angle();
        let mut bbox = BoundingBox2::from_points([
            self.point_at_angle(self.start_angle),
            self.point_at_angle(self.start_angle + sweep),
        ]);

        // 扫过的坐标轴方向是极值点
        for quadrant in 0..4 {
            let angle = quadrant as f64 * FRAC_PI_2;
            if normalize_angle(angle - self.start_angle) <= sweep + EPSILON {
                bbox.expand_to_include(&self.point_at_angle(angle));
            }
        }
        bbox
    }
}

/// 多段线顶点，bulge 描述到下一顶点的弧段（0 为直线，tan(圆心角/4)）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolylineVertex {
    pub point: Point2,
    pub bulge: f64,
}

impl PolylineVertex {
    pub fn new(point: Point2) -> Self {
        Self { point, bulge: 0.0 }
    }

    pub fn with_bulge(point: Point2, bulge: f64) -> Self {
        Self { point, bulge }
    }
}

/// 多段线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<PolylineVertex>,
    pub closed: bool,
}

impl Polyline {
    pub fn new(vertices: Vec<PolylineVertex>, closed: bool) -> Self {
        Self { vertices, closed }
    }

    /// 拆分为线段和圆弧
    pub fn explode(&self) -> Vec<Geometry> {
        let n = self.vertices.len();
        if n < 2 {
            return Vec::new();
        }
        let segments = if self.closed { n } else { n - 1 };

        (0..segments)
            .map(|i| {
                let from = &self.vertices[i];
                let to = &self.vertices[(i + 1) % n];
                match bulge_arc(from.point, to.point, from.bulge) {
                    Some(arc) => Geometry::Arc(arc),
                    None => Geometry::Line(Line::new(from.point, to.point)),
                }
            })
            .collect()
    }
}

/// 由弦的两端点和凸度求圆弧
///
/// 负凸度是顺时针弧，返回时起止点对调，保持逆时针表示。
fn bulge_arc(a: Point2, b: Point2, bulge: f64) -> Option<Arc> {
    let chord = nalgebra::distance(&a, &b);
    if bulge.abs() < EPSILON || chord < EPSILON {
        return None;
    }

    let included = 4.0 * bulge.abs().atan();
    let radius = chord / (2.0 * (included / 2.0).sin());
    let (from, to) = if bulge > 0.0 { (a, b) } else { (b, a) };

    // 圆心在逆时针弦的左侧，大于半圆时 cos 为负，落到右侧
    let along = (to - from) / chord;
    let left = Vector2::new(-along.y, along.x);
    let center = nalgebra::center(&from, &to) + left * (radius * (included / 2.0).cos());

    let angle_of = |p: Point2| (p.y - center.y).atan2(p.x - center.x);
    Some(Arc::new(center, radius, angle_of(from), angle_of(to)))
}

/// 文本对齐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// 单行文本
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    /// 插入点
    pub position: Point2,
    pub content: String,
    pub height: f64,
    /// 旋转角度（弧度）
    pub rotation: f64,
    pub alignment: TextAlignment,
}

impl Text {
    pub fn new(position: Point2, content: impl Into<String>, height: f64) -> Self {
        Self {
            position,
            content: content.into(),
            height,
            rotation: 0.0,
            alignment: TextAlignment::Left,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// 对齐后的左下角基准点，字宽按 0.6 倍字高估算
    pub fn baseline_origin(&self) -> Point2 {
        let width = self.content.chars().count() as f64 * self.height * 0.6;
        let shift = match self.alignment {
            TextAlignment::Left => 0.0,
            TextAlignment::Center => width / 2.0,
            TextAlignment::Right => width,
        };
        Point2::new(self.position.x - shift, self.position.y)
    }
}

/// 标注类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DimensionType {
    /// 平行于测量边
    #[default]
    Aligned,
    Radius,
}

/// 尺寸标注
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimension {
    /// 第一个测量点（半径标注时为圆心）
    pub definition_point1: Point2,
    /// 第二个测量点（半径标注时为圆上一点）
    pub definition_point2: Point2,
    /// 标注线经过的点
    pub line_location: Point2,
    pub dim_type: DimensionType,
    pub text_override: Option<String>,
    pub text_height: f64,
}

impl Dimension {
    pub fn new(p1: Point2, p2: Point2, location: Point2) -> Self {
        Self {
            definition_point1: p1,
            definition_point2: p2,
            line_location: location,
            dim_type: DimensionType::Aligned,
            text_override: None,
            text_height: 10.0,
        }
    }

    pub fn radius(center: Point2, point_on_curve: Point2) -> Self {
        Self {
            dim_type: DimensionType::Radius,
            ..Self::new(center, point_on_curve, point_on_curve)
        }
    }

    pub fn with_text_height(mut self, height: f64) -> Self {
        self.text_height = height;
        self
    }

    /// 文字中点：对齐标注放在标注线外侧，半径标注放在圆上的点
    pub fn text_position(&self) -> Point2 {
        match self.dim_type {
            DimensionType::Radius => self.definition_point2,
            DimensionType::Aligned => {
                let mid = nalgebra::center(&self.definition_point1, &self.definition_point2);
                let along = (self.definition_point2 - self.definition_point1)
                    .try_normalize(EPSILON)
                    .unwrap_or_else(Vector2::x);
                let normal = Vector2::new(-along.y, along.x);
                let offset = (self.line_location - mid).dot(&normal);
                let side = if offset < 0.0 { -1.0 } else { 1.0 };
                mid + normal * (offset + side * 0.8 * self.text_height)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_4, PI};

    #[test]
    fn test_line_length() {
        let line = Line::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert_relative_eq!(line.length(), 5.0);
        assert_eq!(line.midpoint(), Point2::new(1.5, 2.0));
    }

    #[test]
    fn test_arc_sweep() {
        let full = Arc::new(Point2::origin(), 10.0, 0.0, TAU);
        assert_relative_eq!(full.sweep_angle(), TAU);
        assert_relative_eq!(full.length(), TAU * 10.0, epsilon = 1e-9);

        // 跨越 ±π
        let wrapped = Arc::new(Point2::origin(), 1.0, 3.0, -3.0);
        assert_relative_eq!(wrapped.sweep_angle(), TAU - 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_arc_bounding_box_includes_axis_point() {
        let arc = Arc::new(Point2::origin(), 10.0, -FRAC_PI_4, FRAC_PI_4);
        let bbox = arc.bounding_box();
        assert_relative_eq!(bbox.max.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(bbox.min.x, 10.0 * FRAC_PI_4.cos(), epsilon = 1e-9);
        assert_relative_eq!(bbox.max.y, 10.0 * FRAC_PI_4.sin(), epsilon = 1e-9);
    }

    #[test]
    fn test_arc_flatten_endpoints() {
        let arc = Arc::new(Point2::origin(), 5.0, 0.0, FRAC_PI_2);
        let pts = arc.flatten(10);
        assert_eq!(pts.len(), 11);
        assert_relative_eq!(pts[0].x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(pts[10].y, 5.0, epsilon = 1e-9);
        for p in &pts {
            assert_relative_eq!(p.coords.norm(), 5.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_polyline_explode_lines() {
        let pl = Polyline::new(
            vec![
                PolylineVertex::new(Point2::new(0.0, 0.0)),
                PolylineVertex::new(Point2::new(10.0, 0.0)),
                PolylineVertex::new(Point2::new(10.0, 10.0)),
            ],
            true,
        );
        let parts = pl.explode();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|g| matches!(g, Geometry::Line(_))));
    }

    #[test]
    fn test_bulge_semicircle() {
        let pl = Polyline::new(
            vec![
                PolylineVertex::with_bulge(Point2::new(1.0, 0.0), 1.0),
                PolylineVertex::new(Point2::new(-1.0, 0.0)),
            ],
            false,
        );
        let parts = pl.explode();
        let arc = parts[0].as_arc().expect("Expected arc");
        assert_relative_eq!(arc.radius, 1.0, epsilon = 1e-9);
        assert!(arc.center.coords.norm() < 1e-9);
        assert_relative_eq!(arc.sweep_angle(), PI, epsilon = 1e-9);
        assert_relative_eq!(arc.midpoint().y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_bulge_is_clockwise() {
        // 从 (1,0) 顺时针到 (0,-1)，圆心在原点
        let arc = bulge_arc(
            Point2::new(1.0, 0.0),
            Point2::new(0.0, -1.0),
            -(FRAC_PI_2 / 4.0).tan(),
        )
        .expect("Expected arc");
        assert!(arc.center.coords.norm() < 1e-9);
        assert_relative_eq!(arc.sweep_angle(), FRAC_PI_2, epsilon = 1e-9);
        assert_relative_eq!(arc.midpoint().x, FRAC_PI_4.cos(), epsilon = 1e-9);
        assert_relative_eq!(arc.midpoint().y, -FRAC_PI_4.sin(), epsilon = 1e-9);
    }

    #[test]
    fn test_centered_text_origin() {
        let text = Text::new(Point2::new(10.0, 0.0), "ABCD", 5.0).with_alignment(TextAlignment::Center);
        // 宽度 = 4 * 5 * 0.6 = 12
        assert_relative_eq!(text.baseline_origin().x, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dimension_text_position() {
        let aligned = Dimension::new(
            Point2::new(0.0, 0.0),
            Point2::new(500.0, 0.0),
            Point2::new(100.0, 50.0),
        )
        .with_text_height(10.0);
        let pos = aligned.text_position();
        assert_relative_eq!(pos.x, 250.0, epsilon = 1e-9);
        assert_relative_eq!(pos.y, 58.0, epsilon = 1e-9);

        let radius = Dimension::radius(Point2::origin(), Point2::new(0.0, 1200.0));
        assert_eq!(radius.dim_type, DimensionType::Radius);
        assert_eq!(radius.text_position(), Point2::new(0.0, 1200.0));
    }
}
