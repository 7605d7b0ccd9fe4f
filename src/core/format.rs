// Data structures for the C3D format

use serde::Serialize;
use std::collections::HashMap;

/// 4x4 rigid-body transform, indexed `[row][col]`.
pub type Matrix4 = [[f32; 4]; 4];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    /// 1-based block where the parameter dictionary starts
    pub parameter_block_index: u8,
    pub point_count: u16,
    /// Channels per frame, already divided by `analog_samples_per_frame`
    pub analog_channel_count: u16,
    pub first_frame: u16,
    pub last_frame: u16,
    pub max_gap: u16,
    /// Negative means float samples, non-negative means quantized `u16` samples
    pub scale_factor: f32,
    pub data_block_index: u16,
    pub analog_samples_per_frame: u16,
    pub frame_rate: f32,
}

impl Header {
    /// Frames in every rotation stream: `last_frame - first_frame + 1`.
    pub fn frame_count(&self) -> usize {
        (self.last_frame as usize).saturating_sub(self.first_frame as usize) + 1
    }

    pub fn is_float(&self) -> bool {
        self.scale_factor < 0.0
    }
}

/// Stored parameter payload, shaped by the on-disk element type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParameterValue {
    /// Character data with zero or one dimension
    Text(String),
    /// Character data with two or more dimensions, one trimmed row per entry
    Strings(Vec<String>),
    Int8(Vec<i8>),
    UInt16(Vec<u16>),
    Float32(Vec<f32>),
}

impl ParameterValue {
    /// Element count for numeric values, row count for string tables.
    /// A single text value counts as one.
    pub fn len(&self) -> usize {
        match self {
            ParameterValue::Text(_) => 1,
            ParameterValue::Strings(v) => v.len(),
            ParameterValue::Int8(v) => v.len(),
            ParameterValue::UInt16(v) => v.len(),
            ParameterValue::Float32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries as strings; a single text value yields itself.
    pub fn as_strings(&self) -> Option<Vec<&str>> {
        match self {
            ParameterValue::Text(s) => Some(vec![s.as_str()]),
            ParameterValue::Strings(v) => Some(v.iter().map(String::as_str).collect()),
            _ => None,
        }
    }
}

/// Result of a parameter lookup after optional singleton unwrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Text(&'a str),
    Int8(i8),
    UInt16(u16),
    Float32(f32),
    Sequence(&'a ParameterValue),
}

impl<'a> Resolved<'a> {
    pub(crate) fn from_value(value: &'a ParameterValue, unwrap_singleton: bool) -> Self {
        if !unwrap_singleton {
            return Resolved::Sequence(value);
        }
        match value {
            ParameterValue::Text(s) => Resolved::Text(s),
            ParameterValue::Strings(v) if v.len() == 1 => Resolved::Text(&v[0]),
            ParameterValue::Int8(v) if v.len() == 1 => Resolved::Int8(v[0]),
            ParameterValue::UInt16(v) if v.len() == 1 => Resolved::UInt16(v[0]),
            ParameterValue::Float32(v) if v.len() == 1 => Resolved::Float32(v[0]),
            _ => Resolved::Sequence(value),
        }
    }

    /// Integer scalar, if this is one.
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Resolved::Int8(v) => Some(v as i64),
            Resolved::UInt16(v) => Some(v as i64),
            _ => None,
        }
    }

    /// Numeric scalar widened to `f32`.
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Resolved::Int8(v) => Some(v as f32),
            Resolved::UInt16(v) => Some(v as f32),
            Resolved::Float32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Resolved::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&'a ParameterValue> {
        match *self {
            Resolved::Sequence(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub value: ParameterValue,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub name: String,
    pub description: String,
    pub parameters: HashMap<String, Parameter>,
}

impl Group {
    pub fn new(name: String, description: String) -> Self {
        Self {
            name,
            description,
            parameters: HashMap::new(),
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }
}

/// Per-label series of transforms, one matrix per frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RotationStream {
    label: String,
    frames: Vec<Matrix4>,
}

impl RotationStream {
    pub fn new(label: String, frame_count: usize) -> Self {
        Self {
            label,
            frames: vec![[[0.0; 4]; 4]; frame_count],
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Matrix4] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Matrix4> {
        self.frames.get(index)
    }

    pub(crate) fn set_frame(&mut self, index: usize, matrix: Matrix4) {
        if let Some(slot) = self.frames.get_mut(index) {
            *slot = matrix;
        }
    }

    /// Translation column of every frame.
    pub fn origins(&self) -> Vec<[f32; 3]> {
        self.frames
            .iter()
            .map(|m| [m[0][3], m[1][3], m[2][3]])
            .collect()
    }
}
