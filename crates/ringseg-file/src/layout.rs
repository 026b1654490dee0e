//! 图纸版面计算
//!
//! 所有尺寸单位为毫米，原点在页面左下角（与 PDF 坐标一致）。
//!
//! ```text
//! ┌──────────────────────────────────────────┐  外框 10mm
//! │┌────────────────────────────────────────┐│  内框 12mm
//! ││   ┌─────┐ ┌─────┐ ┌─────┐              ││
//! ││   │ 单元 │ │ 单元 │ │ 单元 │   绘图区     ││
//! ││   └─────┘ └─────┘ └─────┘              ││
//! ││                        ┌──────────────┐││
//! ││ 免责声明                │    标题栏     │││
//! │└────────────────────────┴──────────────┴┘│
//! └──────────────────────────────────────────┘
//! ```

use ringseg_core::math::{BoundingBox2, Point2};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// 外框距页边距离
pub const OUTER_BORDER: f64 = 10.0;
/// 内框距页边距离
pub const INNER_BORDER: f64 = 12.0;
/// 绘图区边距
pub const DRAWING_MARGIN: f64 = 20.0;
/// 标题栏宽度
pub const TITLE_BLOCK_WIDTH: f64 = 150.0;
/// 标题栏高度
pub const TITLE_BLOCK_HEIGHT: f64 = 30.0;
/// 每行最多单元数
pub const MAX_COLUMNS: usize = 3;

/// 纸张尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A3,
    A4,
}

impl PaperSize {
    /// 纵向尺寸 (宽, 高)
    pub fn portrait_size(&self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
        }
    }
}

/// 纸张方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

/// 页面设置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageSetup {
    pub paper: PaperSize,
    pub orientation: Orientation,
}

impl PageSetup {
    pub fn size(&self) -> (f64, f64) {
        let (w, h) = self.paper.portrait_size();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// 单张图纸的版面
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    pub page_width: f64,
    pub page_height: f64,
}

fn rect(x: f64, y: f64, width: f64, height: f64) -> BoundingBox2 {
    BoundingBox2::new(Point2::new(x, y), Point2::new(x + width, y + height))
}

impl SheetLayout {
    pub fn new(setup: &PageSetup) -> Self {
        let (page_width, page_height) = setup.size();
        Self {
            page_width,
            page_height,
        }
    }

    pub fn outer_border(&self) -> BoundingBox2 {
        rect(
            OUTER_BORDER,
            OUTER_BORDER,
            self.page_width - 2.0 * OUTER_BORDER,
            self.page_height - 2.0 * OUTER_BORDER,
        )
    }

    pub fn inner_border(&self) -> BoundingBox2 {
        rect(
            INNER_BORDER,
            INNER_BORDER,
            self.page_width - 2.0 * INNER_BORDER,
            self.page_height - 2.0 * INNER_BORDER,
        )
    }

    /// 标题栏（右下角，贴外框）
    pub fn title_block(&self) -> BoundingBox2 {
        rect(
            self.page_width - OUTER_BORDER - TITLE_BLOCK_WIDTH,
            OUTER_BORDER,
            TITLE_BLOCK_WIDTH,
            TITLE_BLOCK_HEIGHT,
        )
    }

    /// 绘图区（标题栏上方）
    pub fn drawing_area(&self) -> BoundingBox2 {
        let bottom = OUTER_BORDER + TITLE_BLOCK_HEIGHT + OUTER_BORDER;
        rect(
            DRAWING_MARGIN,
            bottom,
            self.page_width - 2.0 * DRAWING_MARGIN,
            self.page_height - DRAWING_MARGIN - bottom,
        )
    }

    /// 网格列数与行数：cols = min(3, ceil(sqrt(n)))，rows = ceil(n / cols)
    pub fn grid(count: usize) -> (usize, usize) {
        if count == 0 {
            return (0, 0);
        }
        let cols = ((count as f64).sqrt().ceil() as usize).clamp(1, MAX_COLUMNS);
        let rows = count.div_ceil(cols);
        (cols, rows)
    }

    /// 各单元格，按行优先从左上开始
    pub fn cells(&self, count: usize) -> Vec<BoundingBox2> {
        let (cols, rows) = Self::grid(count);
        if count == 0 {
            return Vec::new();
        }
        let area = self.drawing_area();
        let cell_width = area.width() / cols as f64;
        let cell_height = area.height() / rows as f64;

        (0..count)
            .map(|idx| {
                let row = idx / cols;
                let col = idx % cols;
                rect(
                    area.min.x + col as f64 * cell_width,
                    area.max.y - (row + 1) as f64 * cell_height,
                    cell_width,
                    cell_height,
                )
            })
            .collect()
    }
}

/// 按每页数量分页，返回各页的单元下标范围
pub fn paginate(count: usize, per_sheet: usize) -> Vec<Range<usize>> {
    let per_sheet = per_sheet.max(1);
    (0..count)
        .step_by(per_sheet)
        .map(|start| start..(start + per_sheet).min(count))
        .collect()
}

/// 收缩矩形（四边分别留出边距）
pub fn inset(rect: &BoundingBox2, left: f64, right: f64, bottom: f64, top: f64) -> BoundingBox2 {
    BoundingBox2::new(
        Point2::new(rect.min.x + left, rect.min.y + bottom),
        Point2::new(rect.max.x - right, rect.max.y - top),
    )
}
