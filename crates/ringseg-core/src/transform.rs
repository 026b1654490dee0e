//! 二维仿射变换
//!
//! 用于把模型坐标（毫米，以圆心为原点）映射到图纸坐标。

use crate::math::{BoundingBox2, Point2};
use nalgebra::Matrix3;

/// 二维变换（3x3 齐次矩阵）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub matrix: Matrix3<f64>,
}

impl Transform2D {
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            matrix: Matrix3::new(1.0, 0.0, dx, 0.0, 1.0, dy, 0.0, 0.0, 1.0),
        }
    }

    /// 等比缩放
    pub fn scale(factor: f64) -> Self {
        Self {
            matrix: Matrix3::new(factor, 0.0, 0.0, 0.0, factor, 0.0, 0.0, 0.0, 1.0),
        }
    }

    /// 先应用 self，再应用 other
    pub fn then(&self, other: &Transform2D) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    pub fn apply(&self, point: &Point2) -> Point2 {
        self.matrix.transform_point(point)
    }

    /// 统一缩放系数
    pub fn scale_factor(&self) -> f64 {
        (self.matrix[(0, 0)] * self.matrix[(1, 1)] - self.matrix[(0, 1)] * self.matrix[(1, 0)])
            .abs()
            .sqrt()
    }

    /// 把包围盒等比缩放并居中放入目标框
    ///
    /// 源包围盒退化（宽高均为 0）时返回 `None`。
    pub fn fit(source: &BoundingBox2, target: &BoundingBox2) -> Option<Self> {
        if source.is_empty() || target.is_empty() {
            return None;
        }
        let sx = if source.width() > 0.0 {
            target.width() / source.width()
        } else {
            f64::INFINITY
        };
        let sy = if source.height() > 0.0 {
            target.height() / source.height()
        } else {
            f64::INFINITY
        };
        let factor = sx.min(sy);
        if !factor.is_finite() || factor <= 0.0 {
            return None;
        }

        let from = source.center();
        let to = target.center();
        Some(
            Self::translation(-from.x, -from.y)
                .then(&Self::scale(factor))
                .then(&Self::translation(to.x, to.y)),
        )
    }
}
