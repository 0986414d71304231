//! Tagged transformations: the entries of a transformation list
use std::fmt;
use std::str::FromStr;

use crate::error::{ComposerError, Result};
use crate::transform::{EulerRotation, Transform};

/// How a transformation was produced.
///
/// The composer never looks at the kind; it is carried along so that
/// consumers can tell entries apart and so persisted lists round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Translation,
    Rotation,
    Scale,
    /// Result of a point-pair (landmark) registration.
    Landmark,
    /// Entered or edited by hand.
    User,
}

impl TransformKind {
    pub const ALL: [TransformKind; 5] = [
        TransformKind::Translation,
        TransformKind::Rotation,
        TransformKind::Scale,
        TransformKind::Landmark,
        TransformKind::User,
    ];

    /// Tag used in the portable form.
    pub fn tag(self) -> &'static str {
        match self {
            TransformKind::Translation => "translation",
            TransformKind::Rotation => "rotation",
            TransformKind::Scale => "scale",
            TransformKind::Landmark => "landmark",
            TransformKind::User => "user",
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for TransformKind {
    type Err = ComposerError;

    fn from_str(tag: &str) -> Result<Self> {
        TransformKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| ComposerError::decode(format!("unknown transformation kind `{tag}`")))
    }
}

/// One entry of a transformation list.
///
/// Only well-formed values can be built: the matrix is finite and affine.
/// Entries are never modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedTransform {
    kind: TransformKind,
    transform: Transform,
}

impl TaggedTransform {
    pub fn new(kind: TransformKind, transform: Transform) -> Result<Self> {
        if !transform.is_finite() {
            return Err(ComposerError::InvalidEntry(format!(
                "{kind} matrix contains non-finite values"
            )));
        }
        if !transform.is_affine() {
            return Err(ComposerError::InvalidEntry(format!(
                "{kind} matrix is not affine (last row must be [0, 0, 0, 1])"
            )));
        }

        Ok(Self { kind, transform })
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Result<Self> {
        Self::new(TransformKind::Translation, Transform::translation(x, y, z))
    }

    pub fn rotation(rotation: &EulerRotation) -> Result<Self> {
        Self::new(TransformKind::Rotation, Transform::rotation(rotation))
    }

    pub fn scale(sx: f64, sy: f64, sz: f64) -> Result<Self> {
        Self::new(TransformKind::Scale, Transform::scale(sx, sy, sz))
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in TransformKind::ALL {
            assert_eq!(kind.tag().parse::<TransformKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = "shear".parse::<TransformKind>().unwrap_err();
        assert!(matches!(err, ComposerError::Decode { .. }));
    }

    #[test]
    fn test_non_affine_matrix_is_rejected() {
        let mut rows = Transform::identity().to_rows();
        rows[3][2] = 1.0;
        let result = TaggedTransform::new(TransformKind::User, Transform::from_rows(rows));
        assert!(matches!(result, Err(ComposerError::InvalidEntry(_))));
    }

    #[test]
    fn test_non_finite_matrix_is_rejected() {
        let result = TaggedTransform::translation(f64::INFINITY, 0.0, 0.0);
        assert!(matches!(result, Err(ComposerError::InvalidEntry(_))));
    }

    #[test]
    fn test_factories_tag_entries() {
        let entry = TaggedTransform::scale(2.0, 2.0, 2.0).unwrap();
        assert_eq!(entry.kind(), TransformKind::Scale);
        assert_eq!(*entry.transform(), Transform::scale(2.0, 2.0, 2.0));
    }
}
