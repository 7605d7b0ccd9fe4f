// Fixed-layout file header

use crate::core::constants::*;
use crate::core::error::{C3dError, Result, Section};
use crate::core::format::Header;
use crate::core::source::ByteSource;
use std::io::{Read, Seek};

pub fn read_header<R: Read + Seek>(reader: &mut R) -> Result<Header> {
    let mut src = ByteSource::new(reader, Section::Header);

    src.seek(0)?;
    let parameter_block_index = src.read_u8()?;
    let magic = src.read_u8()?;
    if magic != MAGIC {
        return Err(C3dError::NotThisFormat {
            expected: MAGIC,
            got: magic,
        });
    }
    if parameter_block_index == 0 {
        return Err(C3dError::InvalidHeader(
            "parameter block index is 0".to_string(),
        ));
    }

    src.seek((parameter_block_index as u64 - 1) * BLOCK_SIZE + PROCESSOR_OFFSET)?;
    let processor = src.read_u8()?;
    if processor != PROCESSOR_INTEL {
        return Err(C3dError::UnsupportedProcessor {
            code: processor,
            name: processor_name(processor),
        });
    }

    src.seek(HEADER_FIELDS_OFFSET)?;
    let point_count = src.read_u16()?;
    let mut analog_channel_count = src.read_u16()?;
    let first_frame = src.read_u16()?;
    let last_frame = src.read_u16()?;
    let max_gap = src.read_u16()?;
    let scale_factor = src.read_f32()?;
    let data_block_index = src.read_u16()?;
    let mut analog_samples_per_frame = src.read_u16()?;
    let frame_rate = src.read_f32()?;

    if analog_samples_per_frame > 0 && analog_channel_count > 0 {
        analog_channel_count /= analog_samples_per_frame;
    }
    if analog_samples_per_frame == 0 {
        analog_samples_per_frame = 1;
    }

    if last_frame < first_frame {
        return Err(C3dError::InvalidHeader(format!(
            "last frame {} precedes first frame {}",
            last_frame, first_frame
        )));
    }

    Ok(Header {
        parameter_block_index,
        point_count,
        analog_channel_count,
        first_frame,
        last_frame,
        max_gap,
        scale_factor,
        data_block_index,
        analog_samples_per_frame,
        frame_rate,
    })
}
