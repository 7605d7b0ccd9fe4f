// Per-frame rigid-body transform payload

use crate::core::constants::*;
use crate::core::error::{C3dError, Result, Section};
use crate::core::format::{Group, Header, Matrix4, ParameterValue, Resolved, RotationStream};
use crate::core::source::ByteSource;
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Read, Seek};

/// Decoded rotation streams plus their labels in order of first appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct Rotations {
    pub labels: Vec<String>,
    pub streams: HashMap<String, RotationStream>,
}

fn rotation_parameter<'a>(
    groups: &'a BTreeMap<u8, Group>,
    name: &str,
) -> Result<&'a ParameterValue> {
    groups
        .values()
        .find(|g| g.name == ROTATION_GROUP)
        .and_then(|g| g.parameter(name))
        .map(|p| &p.value)
        .ok_or_else(|| C3dError::missing(ROTATION_GROUP, name))
}

fn integer_parameter(groups: &BTreeMap<u8, Group>, name: &str) -> Result<u64> {
    let value = rotation_parameter(groups, name)?;
    match Resolved::from_value(value, true).as_int() {
        Some(v) if v >= 0 => Ok(v as u64),
        Some(v) => Err(C3dError::invalid(
            ROTATION_GROUP,
            name,
            format!("negative value {}", v),
        )),
        None => Err(C3dError::invalid(
            ROTATION_GROUP,
            name,
            "expected a single integer",
        )),
    }
}

fn transpose(m: Matrix4) -> Matrix4 {
    std::array::from_fn(|row| std::array::from_fn(|col| m[col][row]))
}

fn read_float_matrix<R: Read + Seek>(src: &mut ByteSource<'_, R>) -> Result<Matrix4> {
    let mut m = [[0.0f32; 4]; 4];
    for row in m.iter_mut() {
        for cell in row.iter_mut() {
            *cell = src.read_f32()?;
        }
    }
    // Stored column-major
    Ok(transpose(m))
}

fn read_quantized_matrix<R: Read + Seek>(src: &mut ByteSource<'_, R>) -> Result<Matrix4> {
    let mut m = [[0.0f32; 4]; 4];
    for row in m.iter_mut() {
        for cell in row.iter_mut() {
            // Raw sample, the header scale factor is not applied
            *cell = src.read_u16()? as f32;
        }
    }
    Ok(m)
}

pub fn read_rotations<R: Read + Seek>(
    reader: &mut R,
    header: &Header,
    groups: &BTreeMap<u8, Group>,
) -> Result<Rotations> {
    let data_start = integer_parameter(groups, DATA_START)?;
    if data_start == 0 {
        return Err(C3dError::invalid(
            ROTATION_GROUP,
            DATA_START,
            "block index is 0",
        ));
    }
    let rotation_count = integer_parameter(groups, USED)? as usize;

    let mut labels: Vec<String> = rotation_parameter(groups, LABELS)?
        .as_strings()
        .ok_or_else(|| C3dError::invalid(ROTATION_GROUP, LABELS, "expected character data"))?
        .into_iter()
        .map(str::to_string)
        .collect();
    if labels.len() < rotation_count {
        return Err(C3dError::invalid(
            ROTATION_GROUP,
            LABELS,
            format!("{} label(s) for {} rotation(s)", labels.len(), rotation_count),
        ));
    }
    labels.truncate(rotation_count);

    let frame_count = header.frame_count();
    let is_float = header.is_float();

    let mut src = ByteSource::new(reader, Section::RotationData);

    // Streams are sized up front, so a payload the source cannot hold is
    // rejected before any of them is allocated
    let sample_size = if is_float { 4 } else { 2 };
    let block_size = (MATRIX_SAMPLES * sample_size + ROTATION_TRAILER_SIZE) as u64;
    let start = (data_start - 1).saturating_mul(BLOCK_SIZE);
    let needed = (frame_count as u64)
        .saturating_mul(rotation_count as u64)
        .saturating_mul(block_size);
    let available = src.total_len()?.saturating_sub(start);
    if needed > available {
        return Err(C3dError::TruncatedRotationData(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "{} frame(s) of {} rotation(s) need {} bytes, {} available",
                frame_count, rotation_count, needed, available
            ),
        )));
    }

    src.seek_block(data_start)?;

    let mut order: Vec<String> = Vec::new();
    let mut streams: HashMap<String, RotationStream> = HashMap::new();

    for frame_index in 0..frame_count {
        for label in &labels {
            let matrix = if is_float {
                read_float_matrix(&mut src)?
            } else {
                read_quantized_matrix(&mut src)?
            };
            src.skip(ROTATION_TRAILER_SIZE)?;

            let stream = streams.entry(label.clone()).or_insert_with(|| {
                order.push(label.clone());
                RotationStream::new(label.clone(), frame_count)
            });
            stream.set_frame(frame_index, matrix);
        }
    }

    Ok(Rotations {
        labels: order,
        streams,
    })
}
