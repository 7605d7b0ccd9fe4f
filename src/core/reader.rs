// Decoded motion file and its query API

use crate::core::error::Result;
use crate::core::format::*;
use crate::core::header::read_header;
use crate::core::parameters::read_parameters;
use crate::core::rotations::read_rotations;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A fully decoded file. Only produced when every stage succeeds and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionFile {
    path: Option<PathBuf>,
    header: Header,
    groups: BTreeMap<u8, Group>,
    labels: Vec<String>,
    rotations: HashMap<String, RotationStream>,
}

impl MotionFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = BufReader::new(File::open(&path)?);

        let mut motion = Self::decode(&mut file)?;
        motion.path = Some(path);
        Ok(motion)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(&mut Cursor::new(bytes))
    }

    /// Runs header, parameter and rotation decoding in order over `source`.
    pub fn decode<R: Read + Seek>(source: &mut R) -> Result<Self> {
        let header = read_header(source)?;
        debug!(
            "header: frames {}..={}, {} Hz, scale {}",
            header.first_frame, header.last_frame, header.frame_rate, header.scale_factor
        );

        let groups = read_parameters(source, &header)?;
        debug!("parameter dictionary: {} group(s)", groups.len());

        let rotations = read_rotations(source, &header, &groups)?;
        info!(
            "decoded {} frame(s) for {} rotation stream(s)",
            header.frame_count(),
            rotations.streams.len()
        );

        Ok(Self {
            path: None,
            header,
            groups,
            labels: rotations.labels,
            rotations: rotations.streams,
        })
    }

    /// Source path when opened from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn frame_count(&self) -> usize {
        self.header.frame_count()
    }

    pub fn groups(&self) -> &BTreeMap<u8, Group> {
        &self.groups
    }

    /// First group, by id, whose name matches exactly.
    pub fn find_group(&self, name: &str) -> Option<&Group> {
        self.groups.values().find(|g| g.name == name)
    }

    pub fn parameter(&self, group: &str, name: &str) -> Option<&Parameter> {
        self.find_group(group)?.parameter(name)
    }

    /// Parameter value, with one-element sequences unwrapped to a scalar
    /// when `unwrap_singleton` is set.
    pub fn get_parameter(
        &self,
        group: &str,
        name: &str,
        unwrap_singleton: bool,
    ) -> Option<Resolved<'_>> {
        self.parameter(group, name)
            .map(|p| Resolved::from_value(&p.value, unwrap_singleton))
    }

    pub fn rotations(&self) -> &HashMap<String, RotationStream> {
        &self.rotations
    }

    pub fn rotation(&self, label: &str) -> Option<&RotationStream> {
        self.rotations.get(label)
    }

    /// Stream labels in the order they first appear in the payload.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
