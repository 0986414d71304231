//! Portable form of a transformation list, for handing to a persistence codec
use serde::{Deserialize, Serialize};

use crate::entry::{TaggedTransform, TransformKind};
use crate::error::{ComposerError, Result};
use crate::transform::Transform;

/// A `(kind, matrix)` pair holding plain values only.
///
/// The matrix is stored row-major. Fields are kept loosely typed so that
/// whatever a codec produced can be carried here and checked by [`decode`].
///
/// [`decode`]: PortableTransform::decode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortableTransform {
    pub kind: String,
    pub matrix: Vec<Vec<f64>>,
}

impl PortableTransform {
    pub fn from_entry(entry: &TaggedTransform) -> Self {
        Self {
            kind: entry.kind().tag().to_string(),
            matrix: entry
                .transform()
                .to_rows()
                .iter()
                .map(|row| row.to_vec())
                .collect(),
        }
    }

    pub fn decode(&self) -> Result<TaggedTransform> {
        let kind: TransformKind = self.kind.parse()?;

        if self.matrix.len() != 4 {
            return Err(ComposerError::decode(format!(
                "expected 4 matrix rows, found {}",
                self.matrix.len()
            )));
        }

        let mut rows = [[0.0; 4]; 4];
        for (i, (row, values)) in rows.iter_mut().zip(&self.matrix).enumerate() {
            if values.len() != 4 {
                return Err(ComposerError::decode(format!(
                    "expected 4 values in matrix row {i}, found {}",
                    values.len()
                )));
            }
            row.copy_from_slice(values);
        }

        TaggedTransform::new(kind, Transform::from_rows(rows))
            .map_err(|err| ComposerError::decode(err.to_string()))
    }
}

impl From<&TaggedTransform> for PortableTransform {
    fn from(entry: &TaggedTransform) -> Self {
        Self::from_entry(entry)
    }
}

/// Decode a whole list, failing on the first malformed pair.
pub fn decode_all(pairs: &[PortableTransform]) -> Result<Vec<TaggedTransform>> {
    pairs
        .iter()
        .enumerate()
        .map(|(position, pair)| pair.decode().map_err(|err| err.at(position)))
        .collect()
}
