/// Example: Build a transformation list in code and save it as YAML
///
/// Usage: cargo run --example build_list -- path/to/list.yaml

use std::env;
use std::io::stdout;
use std::path::PathBuf;
use tlist_core::{EulerRotation, TaggedTransform, TransformComposer};
use tlist_terminal::{MatrixPrinter, TerminalApp, TransformDocument};

fn main() -> anyhow::Result<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("transformations.yaml"));

    let mut composer = TransformComposer::new();
    composer.append(TaggedTransform::scale(2.0, 2.0, 2.0)?);
    composer.append(TaggedTransform::rotation(&EulerRotation::from_degrees(0.0, 0.0, 45.0))?);
    composer.append(TaggedTransform::translation(10.0, 0.0, -5.0)?);

    TransformDocument::from_composer(&composer).save(&path)?;
    println!("Saved {} transformations to {}", composer.len(), path.display());

    let app = TerminalApp::open(&path, false, MatrixPrinter::default())?;
    app.show(&mut stdout())?;
    Ok(())
}
