//! YAML persistence for transformation lists
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use tlist_core::{PortableTransform, TransformComposer};

/// On-disk shape of a transformation list.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformDocument {
    #[serde(default)]
    pub transformations: Vec<PortableTransform>,
}

impl TransformDocument {
    pub fn from_composer(composer: &TransformComposer) -> Self {
        Self {
            transformations: composer.to_portable(),
        }
    }

    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse transformation document")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to encode transformation document")
    }

    /// Read a document; a missing file yields an empty one when `allow_missing` is set.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Self> {
        if allow_missing && !path.exists() {
            debug!("{} does not exist, starting an empty list", path.display());
            return Ok(Self::default());
        }

        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&yaml).with_context(|| format!("Invalid document {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(
            "saved {} transformations to {}",
            self.transformations.len(),
            path.display()
        );
        Ok(())
    }

    /// Load the transformations into `composer`, replacing its entries.
    pub fn restore_into(&self, composer: &mut TransformComposer) -> Result<()> {
        composer
            .restore_portable(&self.transformations)
            .context("Document contains an invalid transformation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlist_core::TaggedTransform;

    #[test]
    fn test_parse_document() {
        let yaml = "\
transformations:
  - kind: translation
    matrix:
      - [1.0, 0.0, 0.0, 2.0]
      - [0.0, 1.0, 0.0, 0.0]
      - [0.0, 0.0, 1.0, 0.0]
      - [0.0, 0.0, 0.0, 1.0]
";
        let document = TransformDocument::parse(yaml).unwrap();
        let mut composer = TransformComposer::new();
        document.restore_into(&mut composer).unwrap();

        assert_eq!(
            composer.get(0).unwrap(),
            &TaggedTransform::translation(2.0, 0.0, 0.0).unwrap()
        );
    }

    #[test]
    fn test_empty_document() {
        let document = TransformDocument::parse("{}").unwrap();
        assert!(document.transformations.is_empty());
    }

    #[test]
    fn test_unknown_kind_fails_restore() {
        let yaml = "\
transformations:
  - kind: warp
    matrix: [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]
";
        let document = TransformDocument::parse(yaml).unwrap();
        let mut composer = TransformComposer::new();
        assert!(document.restore_into(&mut composer).is_err());
        assert!(composer.is_empty());
    }
}
