//! DXF文件导入/导出
//!
//! 每个单元导出为一个独立的 DXF（R2010，毫米单位）：
//! - `OUTLINE` 图层：内外两条 ARC + 两条径向 LINE
//! - `DIMENSIONS` 图层（可选）：半径/弦长标注和文字
//!
//! 导入用于回读校验：从两条同心圆弧恢复半径和角度。

use crate::error::FileError;
use rayon::prelude::*;
use ringseg_core::geometry::{Arc, Dimension, DimensionType, Geometry, Line, Polyline, PolylineVertex, Text, TextAlignment};
use ringseg_core::math::{Point2, Vector2};
use ringseg_core::segment::{AnnotationKind, SegmentGeometry};
use ringseg_core::unit::{Unit, UnitSchedule};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

/// 轮廓图层
pub const OUTLINE_LAYER: &str = "OUTLINE";
/// 标注图层
pub const DIMENSION_LAYER: &str = "DIMENSIONS";

/// 圆弧比较容差（毫米 / 弧度）
const MATCH_TOLERANCE: f64 = 1e-6;

/// DXF 导出选项
#[derive(Debug, Clone, Default)]
pub struct DxfOptions {
    /// 是否输出标注图层
    pub annotate: bool,
    /// 轮廓输出为单条带凸度的闭合 LWPOLYLINE
    pub polyline: bool,
}

/// 构建单元的 DXF 图纸
pub fn segment_drawing(unit: &Unit, options: &DxfOptions) -> dxf::Drawing {
    let mut drawing = dxf::Drawing::new();
    drawing.header.version = dxf::enums::AcadVersion::R2010;
    drawing.header.default_drawing_units = dxf::enums::Units::Millimeters;

    add_layer(&mut drawing, OUTLINE_LAYER, 7);
    let outline = if options.polyline {
        vec![Geometry::Polyline(unit.geometry.outline_polyline())]
    } else {
        unit.geometry.outline()
    };
    for geometry in outline {
        drawing.add_entity(convert_to_dxf_entity(&geometry, OUTLINE_LAYER));
    }

    if options.annotate {
        add_layer(&mut drawing, DIMENSION_LAYER, 1);
        for geometry in annotation_entities(unit) {
            drawing.add_entity(convert_to_dxf_entity(&geometry, DIMENSION_LAYER));
        }
    }

    drawing
}

fn add_layer(drawing: &mut dxf::Drawing, name: &str, aci: u8) {
    let mut layer = dxf::tables::Layer::default();
    layer.name = name.to_string();
    layer.color = dxf::Color::from_index(aci);
    drawing.add_layer(layer);
}

/// 标注几何：两个半径标注、外弦对齐标注、编号/弧长/角度文字
fn annotation_entities(unit: &Unit) -> Vec<Geometry> {
    let g = &unit.geometry;
    let bbox = g.bounding_box();
    let text_height = (bbox.width().max(bbox.height()) / 40.0).max(1.0);
    let half = g.angle_rad / 2.0;
    let center = Point2::origin();

    let mut result = vec![
        Geometry::Dimension(
            Dimension::radius(center, g.inner_arc().point_at_angle(half)).with_text_height(text_height),
        ),
        Geometry::Dimension(
            Dimension::radius(center, g.outer_arc().point_at_angle(half)).with_text_height(text_height),
        ),
    ];

    // 弦长标注线放在外弧之外
    let chord = g.outer_chord();
    let location = g.outer_arc().midpoint() + Vector2::new(half.cos(), half.sin()) * (2.0 * text_height);
    result.push(Geometry::Dimension(
        Dimension::new(chord.start, chord.end, location).with_text_height(text_height),
    ));

    for note in g.annotations() {
        if matches!(note.kind, AnnotationKind::ArcLength | AnnotationKind::Angle) {
            let position = note.anchor + note.direction * (4.0 * text_height);
            let text = Text::new(position, note.text.replace('°', "%%d"), text_height)
                .with_alignment(TextAlignment::Center);
            result.push(Geometry::Text(Text::new(
                text.baseline_origin(),
                text.content,
                text_height,
            )));
        }
    }

    let id_text = Text::new(
        Point2::new(bbox.center().x, bbox.min.y - 3.0 * text_height),
        unit.id.clone(),
        text_height * 1.5,
    )
    .with_alignment(TextAlignment::Center);
    result.push(Geometry::Text(Text::new(
        id_text.baseline_origin(),
        id_text.content,
        id_text.height,
    )));

    result
}

/// 将几何转换为DXF实体
fn convert_to_dxf_entity(geometry: &Geometry, layer: &str) -> dxf::entities::Entity {
    let specific = match geometry {
        Geometry::Line(line) => {
            let mut dxf_line = dxf::entities::Line::default();
            dxf_line.p1 = dxf::Point::new(line.start.x, line.start.y, 0.0);
            dxf_line.p2 = dxf::Point::new(line.end.x, line.end.y, 0.0);
            dxf::entities::EntityType::Line(dxf_line)
        }

        Geometry::Arc(arc) => {
            let mut dxf_arc = dxf::entities::Arc::default();
            dxf_arc.center = dxf::Point::new(arc.center.x, arc.center.y, 0.0);
            dxf_arc.radius = arc.radius;
            dxf_arc.start_angle = arc.start_angle.to_degrees();
            dxf_arc.end_angle = (arc.start_angle + arc.sweep_angle()).to_degrees();
            dxf::entities::EntityType::Arc(dxf_arc)
        }

        Geometry::Polyline(polyline) => {
            let mut lwpoly = dxf::entities::LwPolyline::default();
            lwpoly.set_is_closed(polyline.closed);
            lwpoly.vertices = polyline
                .vertices
                .iter()
                .map(|v| {
                    let mut vertex = dxf::LwPolylineVertex::default();
                    vertex.x = v.point.x;
                    vertex.y = v.point.y;
                    vertex.bulge = v.bulge;
                    vertex
                })
                .collect();
            dxf::entities::EntityType::LwPolyline(lwpoly)
        }

        Geometry::Text(text) => {
            let mut dxf_text = dxf::entities::Text::default();
            dxf_text.location = dxf::Point::new(text.position.x, text.position.y, 0.0);
            dxf_text.text_height = text.height;
            dxf_text.value = text.content.clone();
            dxf_text.rotation = text.rotation.to_degrees();
            dxf::entities::EntityType::Text(dxf_text)
        }

        Geometry::Dimension(dim) => {
            let mut base = dxf::entities::DimensionBase::default();
            base.text = dim.text_override.clone().unwrap_or_default();
            let text_pos = dim.text_position();
            base.text_mid_point = dxf::Point::new(text_pos.x, text_pos.y, 0.0);

            match dim.dim_type {
                DimensionType::Radius => {
                    base.dimension_type = dxf::enums::DimensionType::Radius;
                    // 10: 圆心
                    base.definition_point_1 =
                        dxf::Point::new(dim.definition_point1.x, dim.definition_point1.y, 0.0);

                    let mut dxf_dim = dxf::entities::RadialDimension::default();
                    dxf_dim.dimension_base = base;
                    // 15: 圆上一点
                    dxf_dim.definition_point_2 =
                        dxf::Point::new(dim.definition_point2.x, dim.definition_point2.y, 0.0);
                    dxf::entities::EntityType::RadialDimension(dxf_dim)
                }
                DimensionType::Aligned => {
                    base.dimension_type = dxf::enums::DimensionType::Aligned;
                    // 10: 标注线定义点
                    base.definition_point_1 =
                        dxf::Point::new(dim.line_location.x, dim.line_location.y, 0.0);

                    let mut dxf_dim = dxf::entities::RotatedDimension::default();
                    dxf_dim.dimension_base = base;
                    // 13/14: 两条尺寸界线原点
                    dxf_dim.definition_point_2 =
                        dxf::Point::new(dim.definition_point1.x, dim.definition_point1.y, 0.0);
                    dxf_dim.definition_point_3 =
                        dxf::Point::new(dim.definition_point2.x, dim.definition_point2.y, 0.0);
                    dxf_dim.insertion_point =
                        dxf::Point::new(dim.line_location.x, dim.line_location.y, 0.0);
                    dxf::entities::EntityType::RotatedDimension(dxf_dim)
                }
            }
        }
    };

    let mut entity = dxf::entities::Entity::new(specific);
    entity.common.layer = layer.to_string();
    entity
}

/// 写入单元 DXF 到任意输出
pub fn write_segment<W: Write>(unit: &Unit, options: &DxfOptions, writer: &mut W) -> Result<(), FileError> {
    segment_drawing(unit, options)
        .save(writer)
        .map_err(|e| FileError::Dxf(e.to_string()))
}

/// 导出单元到DXF文件
pub fn export(unit: &Unit, options: &DxfOptions, path: &Path) -> Result<(), FileError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_segment(unit, options, &mut writer)?;
    writer.flush()?;

    tracing::info!("Exported unit {} to {}", unit.id, path.display());
    Ok(())
}

/// 把单元编号转换为安全的文件名（不含扩展名）
pub fn file_stem_for(id: &str) -> String {
    let stem: String = id
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches('.').trim();
    if stem.is_empty() {
        "unit".to_string()
    } else {
        stem.to_string()
    }
}

/// 为清单中的每个单元分配不重复的 DXF 文件名
pub fn file_names(schedule: &UnitSchedule) -> Vec<String> {
    let mut taken = HashSet::new();
    schedule
        .iter()
        .map(|unit| {
            let stem = file_stem_for(&unit.id);
            let mut name = format!("{}.dxf", stem);
            let mut n = 2;
            while !taken.insert(name.to_lowercase()) {
                name = format!("{}_{}.dxf", stem, n);
                n += 1;
            }
            name
        })
        .collect()
}

/// 并行序列化清单中所有单元，返回 (文件名, DXF 内容)，按清单顺序
fn encode_all(schedule: &UnitSchedule, options: &DxfOptions) -> Result<Vec<(String, Vec<u8>)>, FileError> {
    if schedule.is_empty() {
        return Err(FileError::NoUnits);
    }

    let encoded: Vec<Vec<u8>> = schedule
        .as_slice()
        .par_iter()
        .map(|unit| {
            let mut buffer = Vec::new();
            write_segment(unit, options, &mut buffer)?;
            Ok(buffer)
        })
        .collect::<Result<_, FileError>>()?;

    Ok(file_names(schedule).into_iter().zip(encoded).collect())
}

/// 导出清单中所有单元到目录，返回写入的文件路径
pub fn export_all(schedule: &UnitSchedule, dir: &Path, options: &DxfOptions) -> Result<Vec<PathBuf>, FileError> {
    let files = encode_all(schedule, options)?;
    std::fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(files.len());
    for (name, bytes) in files {
        let path = dir.join(name);
        std::fs::write(&path, bytes)?;
        paths.push(path);
    }

    tracing::info!("Exported {} DXF files to {}", paths.len(), dir.display());
    Ok(paths)
}

/// 把所有单元的 DXF 打包写入 ZIP（每个单元一个 `<id>.dxf`）
pub fn write_zip<W: Write + Seek>(schedule: &UnitSchedule, options: &DxfOptions, writer: W) -> Result<(), FileError> {
    let files = encode_all(schedule, options)?;

    let mut zip = zip::ZipWriter::new(writer);
    let file_options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, bytes) in &files {
        zip.start_file(name.as_str(), file_options)?;
        zip.write_all(bytes)?;
    }
    zip.finish()?;
    Ok(())
}

/// 导出所有单元到单个 ZIP 文件
pub fn export_zip(schedule: &UnitSchedule, options: &DxfOptions, path: &Path) -> Result<(), FileError> {
    let file = File::create(path)?;
    write_zip(schedule, options, BufWriter::new(file))?;
    tracing::info!("Exported {} DXF files to {}", schedule.len(), path.display());
    Ok(())
}

/// 从DXF文件导入几何
pub fn import(path: &Path) -> Result<Vec<Geometry>, FileError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let drawing = dxf::Drawing::load(&mut reader).map_err(|e| FileError::Dxf(e.to_string()))?;

    let geometries: Vec<Geometry> = drawing.entities().filter_map(convert_dxf_entity).collect();
    tracing::debug!("Imported {} entities from {}", geometries.len(), path.display());
    Ok(geometries)
}

/// 将DXF实体转换为几何
fn convert_dxf_entity(entity: &dxf::entities::Entity) -> Option<Geometry> {
    let geometry = match &entity.specific {
        dxf::entities::EntityType::Line(line) => Geometry::Line(Line::new(
            Point2::new(line.p1.x, line.p1.y),
            Point2::new(line.p2.x, line.p2.y),
        )),

        dxf::entities::EntityType::Arc(arc) => Geometry::Arc(Arc::new(
            Point2::new(arc.center.x, arc.center.y),
            arc.radius,
            arc.start_angle.to_radians(),
            arc.end_angle.to_radians(),
        )),

        dxf::entities::EntityType::LwPolyline(lwpoly) => {
            let vertices: Vec<PolylineVertex> = lwpoly
                .vertices
                .iter()
                .map(|v| PolylineVertex::with_bulge(Point2::new(v.x, v.y), v.bulge))
                .collect();
            Geometry::Polyline(Polyline::new(vertices, lwpoly.is_closed()))
        }

        dxf::entities::EntityType::Text(text) => {
            let position = Point2::new(text.location.x, text.location.y);
            Geometry::Text(
                Text::new(position, text.value.clone(), text.text_height)
                    .with_rotation(text.rotation.to_radians()),
            )
        }

        _ => return None,
    };
    Some(geometry)
}

/// 同一圆上的圆弧合并后的结果
struct Ring {
    center: Point2,
    radius: f64,
    sweep: f64,
}

/// 从导入的几何中恢复分段：取两条同心、等扫角、半径不同的圆弧
///
/// 多段线会先被拆成线段和圆弧；同一圆上的多段圆弧（超过半圆时的拆分）合并计算扫角。
pub fn recover_segment(geometries: &[Geometry]) -> Result<SegmentGeometry, FileError> {
    let mut arcs: Vec<Arc> = Vec::new();
    for geometry in geometries {
        match geometry {
            Geometry::Arc(arc) => arcs.push(arc.clone()),
            Geometry::Polyline(pl) => arcs.extend(pl.explode().iter().filter_map(Geometry::as_arc).cloned()),
            _ => {}
        }
    }

    let mut rings: Vec<Ring> = Vec::new();
    for arc in &arcs {
        let tolerance = MATCH_TOLERANCE * arc.radius.max(1.0);
        let same_circle = |ring: &&mut Ring| {
            (ring.center - arc.center).norm() <= tolerance && (ring.radius - arc.radius).abs() <= tolerance
        };
        if let Some(ring) = rings.iter_mut().find(same_circle) {
            ring.sweep += arc.sweep_angle();
            continue;
        }
        rings.push(Ring {
            center: arc.center,
            radius: arc.radius,
            sweep: arc.sweep_angle(),
        });
    }

    if rings.len() != 2 {
        return Err(FileError::NotASegment(format!(
            "expected arcs on 2 circles, found {}",
            rings.len()
        )));
    }

    let (a, b) = (&rings[0], &rings[1]);
    let tolerance = MATCH_TOLERANCE * a.radius.max(b.radius).max(1.0);
    if (a.center - b.center).norm() > tolerance {
        return Err(FileError::NotASegment("arcs are not concentric".to_string()));
    }
    if (a.sweep - b.sweep).abs() > MATCH_TOLERANCE {
        return Err(FileError::NotASegment("arcs have different sweep angles".to_string()));
    }

    let (inner, outer) = if a.radius < b.radius {
        (a.radius, b.radius)
    } else {
        (b.radius, a.radius)
    };
    Ok(SegmentGeometry::from_radii_and_angle(inner, outer, a.sweep, None))
}
