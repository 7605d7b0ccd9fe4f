//! Segment queries over rotation labels.
//!
//! Theia3D exports one stream per body segment, labelled
//! `<subject>:<SEGMENT>_4X4` (or `<SEGMENT>_4X4` when no subject is set),
//! and stores segment lengths in the `THEIA3D` group as
//! `<subject>:<SEGMENT>_LENGTH`.

use crate::core::constants::{LENGTH_SUFFIX, SEGMENT_SUFFIX, THEIA_GROUP};
use crate::core::format::RotationStream;
use crate::core::reader::MotionFile;

/// A body segment and its transform stream.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub name: &'a str,
    pub stream: &'a RotationStream,
}

impl MotionFile {
    /// Subject name taken from the first label that carries one.
    pub fn subject_prefix(&self) -> Option<&str> {
        self.labels()
            .iter()
            .find_map(|label| label.split_once(':').map(|(prefix, _)| prefix))
    }

    fn segment_label(&self, name: &str) -> String {
        match self.subject_prefix() {
            Some(prefix) => format!("{}:{}{}", prefix, name, SEGMENT_SUFFIX),
            None => format!("{}{}", name, SEGMENT_SUFFIX),
        }
    }

    /// Every `_4X4` stream belonging to the detected subject, in label order.
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let prefix = self.subject_prefix();
        self.labels()
            .iter()
            .filter_map(|label| {
                let rest = match prefix {
                    Some(p) => label.strip_prefix(p)?.strip_prefix(':')?,
                    None => label.as_str(),
                };
                let name = rest.strip_suffix(SEGMENT_SUFFIX)?;
                let stream = self.rotation(label)?;
                Some(Segment { name, stream })
            })
            .collect()
    }

    pub fn segment(&self, name: &str) -> Option<&RotationStream> {
        self.rotation(&self.segment_label(name))
    }

    /// Length stored by Theia3D for `name`, if the file carries one.
    pub fn segment_length(&self, name: &str) -> Option<f32> {
        let parameter = match self.subject_prefix() {
            Some(prefix) => format!("{}:{}{}", prefix, name.to_uppercase(), LENGTH_SUFFIX),
            None => format!("{}{}", name.to_uppercase(), LENGTH_SUFFIX),
        };
        self.get_parameter(THEIA_GROUP, &parameter, true)?.as_f32()
    }
}
