//! PDF 技术图纸
//!
//! 每张图纸包含双线图框、标题栏、免责声明和若干单元：
//! 单元轮廓按格子等比缩放居中绘制，并标注半径、弦长、弧长和角度。
//! 单元超过每页上限时自动分页。

use crate::error::FileError;
use crate::layout::{inset, paginate, PageSetup, SheetLayout};
use chrono::{Local, NaiveDate};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, LineDashPattern, Mm, PdfDocument, PdfLayerReference,
    Point, Rgb,
};
use ringseg_core::geometry::{Arc, Text, TextAlignment};
use ringseg_core::math::{BoundingBox2, Point2};
use ringseg_core::transform::Transform2D;
use ringseg_core::unit::{ProjectInfo, Unit, UnitSchedule};
use std::path::Path;

/// 磅转毫米
const PT_TO_MM: f64 = 25.4 / 72.0;

/// 标注文字距锚点的距离（毫米）
const LABEL_GAP: f64 = 4.0;

const DISCLAIMER: &str = "ALL DIMENSIONS TO BE VERIFIED ON SITE. \
    ALL CONSTRUCTION DRAWINGS AND DIVERSIONS FROM THE DESIGN TO BE APPROVED BY THE \
    CUSTOMER PRIOR TO CONSTRUCTION OR FABRICATION";

/// 图纸输出选项
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub page: PageSetup,
    /// 每张图纸最多单元数
    pub units_per_sheet: usize,
    /// 标题栏日期
    pub date: NaiveDate,
    pub drawing_title: String,
    pub drawing_number: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            page: PageSetup::default(),
            units_per_sheet: 9,
            date: Local::now().date_naive(),
            drawing_title: "Ring Segments".to_string(),
            drawing_number: None,
        }
    }
}

fn pdf_error(e: printpdf::Error) -> FileError {
    FileError::Pdf(e.to_string())
}

fn mm(value: f64) -> Mm {
    Mm(value as f32)
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn red() -> Color {
    Color::Rgb(Rgb::new(1.0, 0.0, 0.0, None))
}

/// 对 printpdf 图层的简单封装，坐标单位为毫米
struct Canvas<'a> {
    layer: PdfLayerReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
}

impl Canvas<'_> {
    fn stroke(&self, color: Color, width_pt: f32) {
        self.layer.set_outline_color(color);
        self.layer.set_outline_thickness(width_pt);
    }

    fn dashed(&self, on: bool) {
        let pattern = if on {
            LineDashPattern {
                dash_1: Some(2),
                gap_1: Some(2),
                ..Default::default()
            }
        } else {
            LineDashPattern::default()
        };
        self.layer.set_line_dash_pattern(pattern);
    }

    fn polyline(&self, points: &[Point2], closed: bool) {
        if points.len() < 2 {
            return;
        }
        self.layer.add_line(Line {
            points: points
                .iter()
                .map(|p| (Point::new(mm(p.x), mm(p.y)), false))
                .collect(),
            is_closed: closed,
        });
    }

    fn rect(&self, rect: &BoundingBox2) {
        self.polyline(
            &[
                rect.min,
                Point2::new(rect.max.x, rect.min.y),
                rect.max,
                Point2::new(rect.min.x, rect.max.y),
            ],
            true,
        );
    }

    fn text(&self, content: &str, size_pt: f64, position: Point2, bold: bool) {
        let font = if bold { self.bold } else { self.regular };
        self.layer
            .use_text(content, size_pt as f32, mm(position.x), mm(position.y), font);
    }

    /// 以 position 为中心绘制文字
    fn text_centered(&self, content: &str, size_pt: f64, position: Point2, bold: bool) {
        let height = size_pt * PT_TO_MM;
        let text = Text::new(position, content, height).with_alignment(TextAlignment::Center);
        let origin = text.baseline_origin();
        self.text(content, size_pt, Point2::new(origin.x, origin.y - height * 0.35), bold);
    }
}

/// 生成包含所有单元的 PDF
pub fn render(
    schedule: &UnitSchedule,
    project: &ProjectInfo,
    options: &ReportOptions,
) -> Result<Vec<u8>, FileError> {
    if schedule.is_empty() {
        return Err(FileError::NoUnits);
    }

    let layout = SheetLayout::new(&options.page);
    let sheets = paginate(schedule.len(), options.units_per_sheet);
    let (width, height) = (mm(layout.page_width), mm(layout.page_height));

    let (doc, first_page, first_layer) =
        PdfDocument::new(options.drawing_title.as_str(), width, height, "Sheet 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

    for (index, range) in sheets.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(width, height, format!("Sheet {}", index + 1));
            doc.get_page(page).get_layer(layer)
        };
        let canvas = Canvas {
            layer,
            regular: &regular,
            bold: &bold,
        };

        draw_title_block(&canvas, &layout, project, options, index + 1, sheets.len());

        let units = &schedule.as_slice()[range.clone()];
        for (unit, cell) in units.iter().zip(layout.cells(units.len())) {
            draw_unit(&canvas, unit, &cell);
        }
        tracing::debug!("Rendered sheet {} with {} units", index + 1, units.len());
    }

    let bytes = doc.save_to_bytes().map_err(pdf_error)?;
    tracing::info!(
        "Rendered {} units on {} sheets ({} bytes)",
        schedule.len(),
        sheets.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// 生成 PDF 并写入文件
pub fn export(
    schedule: &UnitSchedule,
    project: &ProjectInfo,
    options: &ReportOptions,
    path: &Path,
) -> Result<(), FileError> {
    let bytes = render(schedule, project, options)?;
    std::fs::write(path, bytes)?;
    tracing::info!("Saved technical drawing to {}", path.display());
    Ok(())
}

/// 图框、标题栏和免责声明
fn draw_title_block(
    canvas: &Canvas,
    layout: &SheetLayout,
    project: &ProjectInfo,
    options: &ReportOptions,
    sheet: usize,
    sheet_count: usize,
) {
    canvas.dashed(false);
    canvas.stroke(black(), 2.0);
    canvas.rect(&layout.outer_border());
    canvas.stroke(black(), 1.0);
    canvas.rect(&layout.inner_border());

    let block = layout.title_block();
    let (x, y) = (block.min.x, block.min.y);
    let at = |dx: f64, dy: f64| Point2::new(x + dx, y + dy);

    canvas.rect(&block);
    canvas.polyline(&[at(0.0, 15.0), at(block.width(), 15.0)], false);
    canvas.polyline(&[at(75.0, 0.0), at(75.0, block.height())], false);

    canvas.text("Order Nr", 8.0, at(5.0, 25.0), true);
    canvas.text("Customer Name", 8.0, at(5.0, 20.0), true);
    canvas.text("Drawing Title", 8.0, at(5.0, 10.0), true);
    canvas.text("Project Name", 8.0, at(5.0, 5.0), true);

    canvas.text(project.company(), 8.0, at(80.0, 25.0), true);
    canvas.text("Drawing Number", 8.0, at(80.0, 10.0), true);
    canvas.text(&options.date.format("%d/%m/%Y").to_string(), 8.0, at(80.0, 5.0), true);

    canvas.text(&project.order_number(options.date), 10.0, at(30.0, 25.0), false);
    canvas.text(project.customer(), 10.0, at(30.0, 20.0), false);
    canvas.text(&options.drawing_title, 10.0, at(30.0, 10.0), false);
    canvas.text(project.project(), 10.0, at(30.0, 5.0), false);

    if let Some(number) = &options.drawing_number {
        canvas.text(number, 10.0, at(112.0, 10.0), false);
    }
    canvas.text(
        &format!("Sheet {} of {}", sheet, sheet_count),
        8.0,
        at(112.0, 5.0),
        false,
    );

    canvas.text(DISCLAIMER, 6.0, Point2::new(15.0, 15.0), false);
}

/// 在格子中绘制单元轮廓和标注
fn draw_unit(canvas: &Canvas, unit: &Unit, cell: &BoundingBox2) {
    let geometry = &unit.geometry;
    // 四周留出标注文字的位置，底部额外留出编号
    let target = inset(cell, 12.0, 12.0, 18.0, 10.0);
    let Some(transform) = Transform2D::fit(&geometry.bounding_box(), &target) else {
        tracing::warn!("Unit {} has a degenerate outline, skipped", unit.id);
        return;
    };
    tracing::debug!("Unit {} drawn at 1:{:.1}", unit.id, 1.0 / transform.scale_factor());
    let to_page = |p: &Point2| transform.apply(p);

    // 轮廓
    canvas.dashed(false);
    canvas.stroke(black(), 1.0);
    let outline: Vec<Point2> = geometry.flatten().iter().map(to_page).collect();
    canvas.polyline(&outline, true);

    // 弦线与中心弧（虚线）
    canvas.stroke(red(), 0.5);
    canvas.dashed(true);
    let chord = geometry.outer_chord();
    canvas.polyline(&[to_page(&chord.start), to_page(&chord.end)], false);

    let mid_radius = (geometry.inner_radius + geometry.outer_radius) / 2.0;
    let center_arc = Arc::new(Point2::origin(), mid_radius, 0.0, geometry.angle_rad);
    let center_line: Vec<Point2> = center_arc
        .flatten(geometry.arc_segments())
        .iter()
        .map(to_page)
        .collect();
    canvas.polyline(&center_line, false);
    canvas.dashed(false);

    // 尺寸文字
    for note in geometry.annotations() {
        let anchor = to_page(&note.anchor);
        let position = anchor + note.direction * LABEL_GAP;
        canvas.text_centered(&note.text, 8.0, position, false);
    }

    // 单元编号（及板厚）
    let page_bbox = BoundingBox2::from_points(outline.iter().copied());
    let id_position = Point2::new(page_bbox.center().x, page_bbox.min.y - 10.0);
    canvas.text_centered(&unit.id, 10.0, id_position, true);
    if let Some(thickness) = geometry.thickness {
        canvas.text_centered(
            &format!("T{:.0}", thickness),
            8.0,
            Point2::new(id_position.x, id_position.y - 4.5),
            false,
        );
    }
}
