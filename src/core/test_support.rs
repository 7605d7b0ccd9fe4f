// Builders for synthetic C3D files used by the unit tests

use crate::core::constants::*;

pub(crate) struct HeaderBlock {
    pub parameter_block_index: u8,
    pub processor: u8,
    pub point_count: u16,
    pub analog_channel_count: u16,
    pub first_frame: u16,
    pub last_frame: u16,
    pub max_gap: u16,
    pub scale_factor: f32,
    pub data_block_index: u16,
    pub analog_samples_per_frame: u16,
    pub frame_rate: f32,
}

impl Default for HeaderBlock {
    fn default() -> Self {
        Self {
            parameter_block_index: 2,
            processor: PROCESSOR_INTEL,
            point_count: 0,
            analog_channel_count: 0,
            first_frame: 1,
            last_frame: 1,
            max_gap: 0,
            scale_factor: -1.0,
            data_block_index: 3,
            analog_samples_per_frame: 1,
            frame_rate: 100.0,
        }
    }
}

impl HeaderBlock {
    /// One 512-byte header block.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![self.parameter_block_index, MAGIC];
        for v in [
            self.point_count,
            self.analog_channel_count,
            self.first_frame,
            self.last_frame,
            self.max_gap,
        ] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out.extend_from_slice(&self.scale_factor.to_le_bytes());
        out.extend_from_slice(&self.data_block_index.to_le_bytes());
        out.extend_from_slice(&self.analog_samples_per_frame.to_le_bytes());
        out.extend_from_slice(&self.frame_rate.to_le_bytes());
        out.resize(BLOCK_SIZE as usize, 0);
        out
    }
}

struct Record {
    bytes: Vec<u8>,
    offset_pos: usize,
}

/// Parameter section assembled record by record.
pub(crate) struct ParameterSection {
    pub processor: u8,
    /// End with an offset-0 record instead of a zero name length
    pub zero_offset_terminator: bool,
    records: Vec<Record>,
    trailing: Vec<u8>,
}

impl ParameterSection {
    pub fn new() -> Self {
        Self {
            processor: PROCESSOR_INTEL,
            zero_offset_terminator: false,
            records: Vec::new(),
            trailing: Vec::new(),
        }
    }

    fn push(mut self, name: &str, group_id: i8, body: Vec<u8>) -> Self {
        let mut bytes = vec![name.len() as u8, group_id as u8];
        bytes.extend_from_slice(name.as_bytes());
        let offset_pos = bytes.len();
        bytes.extend_from_slice(&((body.len() + 2) as u16).to_le_bytes());
        bytes.extend_from_slice(&body);
        self.records.push(Record { bytes, offset_pos });
        self
    }

    pub fn group(self, id: i8, name: &str, description: &str) -> Self {
        let mut body = vec![description.len() as u8];
        body.extend_from_slice(description.as_bytes());
        self.push(name, -id, body)
    }

    pub fn param(
        self,
        group_id: i8,
        name: &str,
        element_type: i8,
        dims: &[u8],
        data: &[u8],
        description: &str,
    ) -> Self {
        let mut body = vec![element_type as u8, dims.len() as u8];
        body.extend_from_slice(dims);
        body.extend_from_slice(data);
        body.push(description.len() as u8);
        body.extend_from_slice(description.as_bytes());
        self.push(name, group_id, body)
    }

    /// Parameter whose byte count ends right after its payload.
    pub fn param_without_description(
        self,
        group_id: i8,
        name: &str,
        element_type: i8,
        dims: &[u8],
        data: &[u8],
    ) -> Self {
        let mut body = vec![element_type as u8, dims.len() as u8];
        body.extend_from_slice(dims);
        body.extend_from_slice(data);
        self.push(name, group_id, body)
    }

    /// Raw bytes placed after the last record.
    pub fn trailing_bytes(mut self, bytes: &[u8]) -> Self {
        self.trailing.extend_from_slice(bytes);
        self
    }

    pub fn uint16(self, group_id: i8, name: &str, values: &[u16]) -> Self {
        let data: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.param(group_id, name, 2, &[values.len() as u8], &data, "")
    }

    pub fn int8(self, group_id: i8, name: &str, values: &[i8]) -> Self {
        let data: Vec<u8> = values.iter().map(|v| *v as u8).collect();
        self.param(group_id, name, 1, &[values.len() as u8], &data, "")
    }

    pub fn float32(self, group_id: i8, name: &str, values: &[f32]) -> Self {
        let data: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.param(group_id, name, 4, &[values.len() as u8], &data, "")
    }

    pub fn text(self, group_id: i8, name: &str, value: &str) -> Self {
        self.param(group_id, name, -1, &[value.len() as u8], value.as_bytes(), "")
    }

    /// Fixed-width string table padded with spaces.
    pub fn strings(self, group_id: i8, name: &str, width: u8, rows: &[&str]) -> Self {
        let mut data = Vec::new();
        for row in rows {
            let mut cell = row.as_bytes().to_vec();
            cell.resize(width as usize, b' ');
            data.extend_from_slice(&cell);
        }
        self.param(group_id, name, -1, &[width, rows.len() as u8], &data, "")
    }

    /// ROTATION group with `DATA_START`, `USED` and `LABELS`.
    pub fn rotation(self, data_start: u16, used: u16, labels: &[&str]) -> Self {
        let width = labels.iter().map(|l| l.len()).max().unwrap_or(1) as u8;
        self.group(1, "ROTATION", "Rigid body transforms")
            .uint16(1, "DATA_START", &[data_start])
            .uint16(1, "USED", &[used])
            .strings(1, "LABELS", width, labels)
    }

    /// Section padded to whole blocks.
    pub fn encode(&self) -> Vec<u8> {
        let mut body = Vec::new();
        let last = self.records.len().saturating_sub(1);
        for (i, record) in self.records.iter().enumerate() {
            let mut bytes = record.bytes.clone();
            if self.zero_offset_terminator && i == last {
                bytes[record.offset_pos] = 0;
                bytes[record.offset_pos + 1] = 0;
            }
            body.extend_from_slice(&bytes);
        }
        body.extend_from_slice(&self.trailing);
        if !self.zero_offset_terminator {
            body.push(0);
        }

        let total = PARAMETER_PREFIX_SIZE as usize + body.len();
        let blocks = total.div_ceil(BLOCK_SIZE as usize);
        let mut out = vec![1, MAGIC, blocks as u8, self.processor];
        out.extend_from_slice(&body);
        out.resize(blocks * BLOCK_SIZE as usize, 0);
        out
    }
}

/// Header, parameter section and payload laid out with the payload starting
/// at the 1-based block `data_start`.
pub(crate) fn assemble(
    header: &HeaderBlock,
    params: &ParameterSection,
    data_start: u16,
    payload: &[u8],
) -> Vec<u8> {
    let mut out = header.encode();
    out.extend_from_slice(&params.encode());
    let start = (data_start as usize - 1) * BLOCK_SIZE as usize;
    assert!(out.len() <= start, "parameter section overlaps payload");
    out.resize(start, 0);
    out.extend_from_slice(payload);
    out
}

/// One float-mode rotation block, samples in on-disk order.
pub(crate) fn float_block(samples: [f32; 16]) -> Vec<u8> {
    let mut out: Vec<u8> = samples.iter().flat_map(|v| v.to_le_bytes()).collect();
    out.extend_from_slice(&[0u8; ROTATION_TRAILER_SIZE]);
    out
}

/// One quantized rotation block, samples in on-disk order.
pub(crate) fn u16_block(samples: [u16; 16]) -> Vec<u8> {
    let mut out: Vec<u8> = samples.iter().flat_map(|v| v.to_le_bytes()).collect();
    out.extend_from_slice(&[0u8; ROTATION_TRAILER_SIZE]);
    out
}

pub(crate) fn sequential_f32() -> [f32; 16] {
    std::array::from_fn(|i| i as f32)
}

pub(crate) fn sequential_u16() -> [u16; 16] {
    std::array::from_fn(|i| i as u16)
}

/// Single-frame, two-label float file with the subject prefix `S1`.
pub(crate) fn theia_file() -> Vec<u8> {
    let params = ParameterSection::new()
        .rotation(3, 2, &["S1:PELVIS_4X4", "S1:L_THIGH_4X4"])
        .group(2, "THEIA3D", "Theia3D model")
        .float32(2, "S1:PELVIS_LENGTH", &[0.25])
        .text(2, "VERSION", "2023.1");
    let mut payload = float_block(sequential_f32());
    payload.extend(float_block([1.0; 16]));
    assemble(&HeaderBlock::default(), &params, 3, &payload)
}
