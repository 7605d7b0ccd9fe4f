// Error handling for the C3D reader

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, C3dError>;

#[derive(Error, Debug)]
pub enum C3dError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Not a C3D file: expected magic byte {expected}, got {got}")]
    NotThisFormat { expected: u8, got: u8 },

    #[error("Unsupported processor: {code} ({name})")]
    UnsupportedProcessor { code: u8, name: &'static str },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Truncated header: {0}")]
    TruncatedHeader(#[source] io::Error),

    #[error("Truncated parameter dictionary: {0}")]
    TruncatedDictionary(#[source] io::Error),

    #[error("Truncated rotation data: {0}")]
    TruncatedRotationData(#[source] io::Error),

    #[error("Parameter {parameter} refers to unknown group {group_id}")]
    UnknownGroup { group_id: i8, parameter: String },

    #[error("Duplicate parameter {group}.{parameter}")]
    DuplicateParameter { group: String, parameter: String },

    #[error("Unsupported element type {code} for parameter {parameter}")]
    UnsupportedElementType { code: i8, parameter: String },

    #[error("Missing required parameter {group}.{parameter}")]
    MissingRequiredParameter { group: String, parameter: String },

    #[error("Invalid parameter {group}.{parameter}: {reason}")]
    InvalidParameter {
        group: String,
        parameter: String,
        reason: String,
    },

    #[error("Invalid UTF-8 string")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Which decode stage a short read happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Dictionary,
    RotationData,
}

impl C3dError {
    /// Maps an I/O failure inside `section`. End-of-file becomes the
    /// section's truncation error, anything else stays an `Io` error.
    pub fn from_io(section: Section, err: io::Error) -> Self {
        if err.kind() != io::ErrorKind::UnexpectedEof {
            return C3dError::Io(err);
        }
        match section {
            Section::Header => C3dError::TruncatedHeader(err),
            Section::Dictionary => C3dError::TruncatedDictionary(err),
            Section::RotationData => C3dError::TruncatedRotationData(err),
        }
    }

    pub fn missing(group: &str, parameter: &str) -> Self {
        C3dError::MissingRequiredParameter {
            group: group.to_string(),
            parameter: parameter.to_string(),
        }
    }

    pub fn invalid(group: &str, parameter: &str, reason: impl Into<String>) -> Self {
        C3dError::InvalidParameter {
            group: group.to_string(),
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }
}
