// Format constants for C3D files

// Files are addressed in fixed 512-byte blocks, block indices are 1-based
pub const BLOCK_SIZE: u64 = 512;

// Second byte of the file
pub const MAGIC: u8 = 80;

// Processor code stored at byte 3 of the parameter block
pub const PROCESSOR_INTEL: u8 = 84;
pub const PROCESSOR_DEC: u8 = 85;
pub const PROCESSOR_MIPS: u8 = 86;

pub fn processor_name(code: u8) -> &'static str {
    match code {
        PROCESSOR_INTEL => "Intel",
        PROCESSOR_DEC => "DEC",
        PROCESSOR_MIPS => "MIPS",
        _ => "unknown",
    }
}

// Offset of the processor code inside the parameter block
pub const PROCESSOR_OFFSET: u64 = 3;

// Header fields start right after the block-index/magic pair
pub const HEADER_FIELDS_OFFSET: u64 = 2;

// Parameter section prefix: block/magic(2) block_count(1) processor(1)
pub const PARAMETER_PREFIX_SIZE: u64 = 4;

// Rotation block: 16 samples followed by an uninterpreted 4-byte field
pub const MATRIX_SAMPLES: usize = 16;
pub const ROTATION_TRAILER_SIZE: usize = 4;

pub const ROTATION_GROUP: &str = "ROTATION";
pub const DATA_START: &str = "DATA_START";
pub const USED: &str = "USED";
pub const LABELS: &str = "LABELS";

pub const THEIA_GROUP: &str = "THEIA3D";
pub const SEGMENT_SUFFIX: &str = "_4X4";
pub const LENGTH_SUFFIX: &str = "_LENGTH";

// Parameter element type codes
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Character = -1,
    Int8 = 1,
    UInt16 = 2,
    Float32 = 4,
}

impl ElementType {
    pub fn from_i8(val: i8) -> Option<Self> {
        match val {
            -1 => Some(ElementType::Character),
            1 => Some(ElementType::Int8),
            2 => Some(ElementType::UInt16),
            4 => Some(ElementType::Float32),
            _ => None,
        }
    }

    /// Bytes occupied by one element on disk.
    pub fn size(self) -> usize {
        (self as i8).unsigned_abs() as usize
    }
}
