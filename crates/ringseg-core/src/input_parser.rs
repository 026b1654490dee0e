//! 单元定义输入解析器
//!
//! 单行格式：`<编号> key=value ...`
//!
//! 支持的键：
//! - 径向: `inner`, `outer`, `depth`（内外半径、或任一半径 + 厚度）
//! - 跨度: `chord`, `arc`, `angle`（三选一）
//! - 可选: `thickness`, `on=inner|outer`
//!
//! 数值格式：
//! - 长度: `500` 或 `500mm`
//! - 角度: `30`, `30deg`, `30°` 或 `<30`
//!
//! 示例：`Type-A inner=1000 outer=1200 chord=500`

use crate::segment::{MeasuredOn, RadialInput, SegmentSpec, SpanInput};

/// 解析后的输入值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputValue {
    /// 长度值（毫米）
    Length(f64),
    /// 角度值（弧度）
    Angle(f64),
}

/// 解析错误
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// 无效格式
    InvalidFormat(String),
    /// 缺少必需的值
    MissingValue(String),
    /// 值冲突（例如同时给出弦长和弧长）
    Conflict(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            ParseError::MissingValue(msg) => write!(f, "Missing value: {}", msg),
            ParseError::Conflict(msg) => write!(f, "Conflicting values: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

/// 输入解析器
pub struct InputParser;

impl InputParser {
    /// 解析单个数值
    ///
    /// 以 `<` 开头或以 `deg`/`°` 结尾的视为角度，其余视为长度。
    pub fn parse(input: &str) -> Result<InputValue, ParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::InvalidFormat("Empty input".to_string()));
        }

        if let Some(angle_str) = input.strip_prefix('<') {
            return Self::parse_number(angle_str, "angle").map(|deg| InputValue::Angle(deg.to_radians()));
        }

        for suffix in ["deg", "°"] {
            if let Some(angle_str) = input.strip_suffix(suffix) {
                return Self::parse_number(angle_str, "angle")
                    .map(|deg| InputValue::Angle(deg.to_radians()));
            }
        }

        let length_str = input.strip_suffix("mm").unwrap_or(input);
        Self::parse_number(length_str, "length").map(InputValue::Length)
    }

    /// 解析长度（拒绝角度格式）
    pub fn parse_length(input: &str) -> Result<f64, ParseError> {
        match Self::parse(input)? {
            InputValue::Length(len) => Ok(len),
            InputValue::Angle(_) => Err(ParseError::InvalidFormat(format!(
                "Expected a length, got angle: {}",
                input.trim()
            ))),
        }
    }

    /// 解析角度，纯数字按度处理；返回值单位为度
    pub fn parse_angle_degrees(input: &str) -> Result<f64, ParseError> {
        match Self::parse(input)? {
            InputValue::Angle(rad) => Ok(rad.to_degrees()),
            InputValue::Length(deg) => Ok(deg),
        }
    }

    /// 解析单元定义行，返回 (编号, 规格)
    pub fn parse_unit(line: &str) -> Result<(String, SegmentSpec), ParseError> {
        let mut tokens = line.split_whitespace();
        let id = tokens
            .next()
            .ok_or_else(|| ParseError::MissingValue("unit ID".to_string()))?;
        if id.contains('=') {
            return Err(ParseError::MissingValue(format!(
                "unit ID must come first, got: {}",
                id
            )));
        }

        let mut inner = None;
        let mut outer = None;
        let mut depth = None;
        let mut span = None;
        let mut thickness = None;
        let mut measured_on = MeasuredOn::default();

        for token in tokens {
            let (key, value) = token.split_once('=').ok_or_else(|| {
                ParseError::InvalidFormat(format!("Expected key=value, got: {}", token))
            })?;

            match key.to_ascii_lowercase().as_str() {
                "inner" => Self::set_length(&mut inner, "inner", value)?,
                "outer" => Self::set_length(&mut outer, "outer", value)?,
                "depth" => Self::set_length(&mut depth, "depth", value)?,
                "thickness" => Self::set_length(&mut thickness, "thickness", value)?,
                "chord" => Self::set_span(&mut span, SpanInput::Chord(Self::parse_length(value)?))?,
                "arc" => Self::set_span(&mut span, SpanInput::Arc(Self::parse_length(value)?))?,
                "angle" => {
                    Self::set_span(&mut span, SpanInput::Angle(Self::parse_angle_degrees(value)?))?
                }
                "on" => {
                    measured_on = match value.to_ascii_lowercase().as_str() {
                        "inner" => MeasuredOn::Inner,
                        "outer" => MeasuredOn::Outer,
                        other => {
                            return Err(ParseError::InvalidFormat(format!(
                                "on must be inner or outer, got: {}",
                                other
                            )))
                        }
                    }
                }
                other => {
                    return Err(ParseError::InvalidFormat(format!("Unknown key: {}", other)));
                }
            }
        }

        let radial = Self::radial_from(inner, outer, depth)?;
        let span = span.ok_or_else(|| {
            ParseError::MissingValue("one of chord, arc or angle is required".to_string())
        })?;

        Ok((
            id.to_string(),
            SegmentSpec {
                radial,
                span,
                measured_on,
                thickness,
            },
        ))
    }

    /// 根据给出的半径/厚度组合确定径向输入
    pub fn radial_from(
        inner: Option<f64>,
        outer: Option<f64>,
        depth: Option<f64>,
    ) -> Result<RadialInput, ParseError> {
        match (inner, outer, depth) {
            (Some(inner), Some(outer), None) => Ok(RadialInput::Radii { inner, outer }),
            (Some(inner), None, Some(depth)) => Ok(RadialInput::InnerDepth { inner, depth }),
            (None, Some(outer), Some(depth)) => Ok(RadialInput::OuterDepth { outer, depth }),
            (Some(_), Some(_), Some(_)) => Err(ParseError::Conflict(
                "give two of inner, outer and depth, not all three".to_string(),
            )),
            _ => Err(ParseError::MissingValue(
                "must specify both radii or one radius with depth".to_string(),
            )),
        }
    }

    fn set_length(slot: &mut Option<f64>, key: &str, value: &str) -> Result<(), ParseError> {
        if slot.is_some() {
            return Err(ParseError::Conflict(format!("{} given more than once", key)));
        }
        *slot = Some(Self::parse_length(value)?);
        Ok(())
    }

    fn set_span(slot: &mut Option<SpanInput>, value: SpanInput) -> Result<(), ParseError> {
        if slot.is_some() {
            return Err(ParseError::Conflict(
                "only one of chord, arc or angle may be given".to_string(),
            ));
        }
        *slot = Some(value);
        Ok(())
    }

    fn parse_number(input: &str, what: &str) -> Result<f64, ParseError> {
        let input = input.trim();
        input
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidFormat(format!("Invalid {}: {}", what, input)))
    }
}
