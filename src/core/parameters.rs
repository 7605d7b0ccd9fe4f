// Group/parameter dictionary

use crate::core::constants::*;
use crate::core::error::{C3dError, Result, Section};
use crate::core::format::{Group, Header, Parameter, ParameterValue};
use crate::core::source::ByteSource;
use std::collections::BTreeMap;
use std::io::{Read, Seek};
use tracing::debug;

/// Decodes the parameter section into groups keyed by their positive id.
pub fn read_parameters<R: Read + Seek>(
    reader: &mut R,
    header: &Header,
) -> Result<BTreeMap<u8, Group>> {
    let mut src = ByteSource::new(reader, Section::Dictionary);

    src.seek_block(header.parameter_block_index as u64)?;
    src.skip(2)?;
    let block_count = src.read_u8()?;
    src.skip(1)?;
    debug!("parameter section: {} block(s)", block_count);

    let mut groups: BTreeMap<u8, Group> = BTreeMap::new();

    loop {
        let name_length = src.read_i8()?;
        if name_length == 0 {
            break;
        }
        let group_id = src.read_i8()?;
        let raw_name = src.read_string(name_length.unsigned_abs() as usize)?;
        let name = raw_name.trim_end().to_string();

        let declared = src.read_u16()?;
        let is_last_record = declared == 0;
        // Bytes left in this record after the offset field itself
        let mut remaining = declared as i64 - 2;

        if group_id < 0 {
            let desc_len = src.read_u8()?;
            let description = src.read_string(desc_len as usize)?;
            debug!("group {} registered as {}", name, group_id.unsigned_abs());
            groups.insert(group_id.unsigned_abs(), Group::new(name, description));
        } else {
            let group = groups
                .get_mut(&group_id.unsigned_abs())
                .filter(|_| group_id > 0)
                .ok_or_else(|| C3dError::UnknownGroup {
                    group_id,
                    parameter: name.clone(),
                })?;
            if group.parameters.contains_key(&name) {
                return Err(C3dError::DuplicateParameter {
                    group: group.name.clone(),
                    parameter: name,
                });
            }

            let (value, consumed) = read_value(&mut src, &group.name, &name)?;
            remaining -= consumed as i64;

            let mut parameter = Parameter {
                value,
                description: None,
            };
            // A terminal record has no usable byte count, so its description
            // is read as well
            if remaining != 0 {
                let desc_len = src.read_u8()?;
                parameter.description = Some(src.read_string(desc_len as usize)?);
                remaining -= 1 + desc_len as i64;
                if remaining != 0 && !is_last_record {
                    debug!(
                        "record {}.{} declares {} more byte(s) than it holds",
                        group.name, name, remaining
                    );
                }
            }
            group.parameters.insert(name, parameter);
        }

        if is_last_record {
            break;
        }
    }

    Ok(groups)
}

// Up-front allocation bound; longer payloads grow as they are read
const PREALLOC_LIMIT: usize = 4096;

// Zero-width string rows consume no bytes, so their count is bounded here
const MAX_ZERO_WIDTH_ROWS: usize = u16::MAX as usize;

fn checked_product(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

fn read_many<T, R: Read + Seek>(
    src: &mut ByteSource<'_, R>,
    count: usize,
    mut read: impl FnMut(&mut ByteSource<'_, R>) -> Result<T>,
) -> Result<Vec<T>> {
    let mut out = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        out.push(read(src)?);
    }
    Ok(out)
}

/// Reads a parameter's type, dimensions and payload. Returns the value and
/// the number of bytes consumed.
fn read_value<R: Read + Seek>(
    src: &mut ByteSource<'_, R>,
    group: &str,
    name: &str,
) -> Result<(ParameterValue, usize)> {
    let code = src.read_i8()?;
    let element_type =
        ElementType::from_i8(code).ok_or_else(|| C3dError::UnsupportedElementType {
            code,
            parameter: name.to_string(),
        })?;

    let dimension_count = src.read_i8()?.max(0) as usize;
    let mut dims = Vec::with_capacity(dimension_count);
    for _ in 0..dimension_count {
        dims.push(src.read_u8()? as usize);
    }
    let too_large = || C3dError::invalid(group, name, format!("dimensions {:?} overflow", dims));
    let element_count = checked_product(&dims).ok_or_else(too_large)?;
    let byte_count = element_count
        .checked_mul(element_type.size())
        .ok_or_else(too_large)?;

    let value = match element_type {
        ElementType::Character if dims.len() >= 2 => {
            let width = dims[0];
            let rows = checked_product(&dims[1..]).ok_or_else(too_large)?;
            if width == 0 && rows > MAX_ZERO_WIDTH_ROWS {
                return Err(C3dError::invalid(
                    group,
                    name,
                    format!("{} rows of width 0", rows),
                ));
            }
            ParameterValue::Strings(read_many(src, rows, |s| {
                Ok(s.read_string(width)?.trim().to_string())
            })?)
        }
        ElementType::Character => ParameterValue::Text(src.read_string(element_count)?),
        ElementType::Int8 => ParameterValue::Int8(read_many(src, element_count, |s| s.read_i8())?),
        ElementType::UInt16 => {
            ParameterValue::UInt16(read_many(src, element_count, |s| s.read_u16())?)
        }
        ElementType::Float32 => {
            ParameterValue::Float32(read_many(src, element_count, |s| s.read_f32())?)
        }
    };

    Ok((value, byte_count.saturating_add(2 + dimension_count)))
}
