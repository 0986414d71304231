//! TList Terminal - inspect and edit transformation lists stored as YAML
//!
//! Examples:
//!   tlist append scene.yaml --translate 10,0,0
//!   tlist append scene.yaml --rotate 0,0,90
//!   tlist show scene.yaml
//!   tlist compose scene.yaml --prefix 1

use anyhow::Result;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::io::stdout;
use std::path::PathBuf;
use tlist_core::{EulerRotation, TaggedTransform};
use tlist_terminal::{parse_vector, MatrixPrinter, TerminalApp};

#[derive(Parser, Debug)]
#[command(name = "tlist", version, about = "Inspect and edit ordered transformation lists")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    /// Digits printed after the decimal point
    #[arg(long, default_value_t = 4, global = true)]
    precision: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every transformation with its running composite
    Show { file: PathBuf },
    /// Print the complete transformation, or a prefix of it
    Compose {
        file: PathBuf,
        /// Compose only the first N transformations
        #[arg(long, conflicts_with = "scaling")]
        prefix: Option<usize>,
        /// Print the scaling transformation
        #[arg(long)]
        scaling: bool,
    },
    /// Append a transformation, creating the file if needed
    Append {
        file: PathBuf,
        #[command(flatten)]
        transform: NewTransform,
    },
    /// Remove the transformation at INDEX
    Remove { file: PathBuf, index: usize },
    /// Remove every transformation
    Clear { file: PathBuf },
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("transform").required(true).args(["translate", "rotate", "scale"])))]
struct NewTransform {
    /// Translation X,Y,Z
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    translate: Option<[f64; 3]>,
    /// Rotation about X, then Y, then Z, in degrees
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    rotate: Option<[f64; 3]>,
    /// Scale factors X,Y,Z
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    scale: Option<[f64; 3]>,
}

impl NewTransform {
    fn build(&self) -> Result<TaggedTransform> {
        let entry = match (self.translate, self.rotate, self.scale) {
            (Some([x, y, z]), _, _) => TaggedTransform::translation(x, y, z)?,
            (_, Some([x, y, z]), _) => {
                TaggedTransform::rotation(&EulerRotation::from_degrees(x, y, z))?
            }
            (_, _, Some([x, y, z])) => TaggedTransform::scale(x, y, z)?,
            _ => anyhow::bail!("no transformation given"),
        };
        Ok(entry)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let printer = MatrixPrinter::new(cli.precision, !cli.no_color);
    let mut out = stdout();

    match cli.command {
        Command::Show { file } => {
            TerminalApp::open(&file, false, printer)?.show(&mut out)?;
        }
        Command::Compose {
            file,
            prefix,
            scaling,
        } => {
            TerminalApp::open(&file, false, printer)?.compose(&mut out, prefix, scaling)?;
        }
        Command::Append { file, transform } => {
            let mut app = TerminalApp::open(&file, true, printer)?;
            app.append(transform.build()?);
            app.save()?;
            app.show(&mut out)?;
        }
        Command::Remove { file, index } => {
            let mut app = TerminalApp::open(&file, false, printer)?;
            let removed = app.remove(index)?;
            log::info!("removed {} transformation at {index}", removed.kind());
            app.save()?;
        }
        Command::Clear { file } => {
            let mut app = TerminalApp::open(&file, false, printer)?;
            app.clear();
            app.save()?;
        }
    }

    Ok(())
}
