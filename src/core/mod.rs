pub mod constants;
pub mod error;
pub mod format;
pub mod header;
pub mod parameters;
pub mod reader;
pub mod rotations;
pub mod segments;
pub mod source;

#[cfg(test)]
pub(crate) mod test_support;
