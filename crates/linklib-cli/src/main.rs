//! linklib CLI - installs the library sources and inspects filesystem links.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use linklib::install::default_lib_dir;
use linklib::{InstallReport, Installer, PathLink};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Library sources copied by `install`, relative to the library directory.
const SOURCES: &[(&str, &str)] = &[
    ("lib.rs", include_str!("../../linklib-core/src/lib.rs")),
    ("config.rs", include_str!("../../linklib-core/src/config.rs")),
    ("error.rs", include_str!("../../linklib-core/src/error.rs")),
    ("path.rs", include_str!("../../linklib-core/src/path.rs")),
    ("hook.rs", include_str!("../../linklib-core/src/hook.rs")),
    ("module.rs", include_str!("../../linklib-core/src/module.rs")),
    ("dotted.rs", include_str!("../../linklib-core/src/dotted.rs")),
    ("fs_link.rs", include_str!("../../linklib-core/src/fs_link.rs")),
    ("install.rs", include_str!("../../linklib-core/src/install.rs")),
    ("bridge/mod.rs", include_str!("../../linklib-core/src/bridge/mod.rs")),
    ("bridge/store.rs", include_str!("../../linklib-core/src/bridge/store.rs")),
    ("bridge/endpoint.rs", include_str!("../../linklib-core/src/bridge/endpoint.rs")),
    ("bridge/factory.rs", include_str!("../../linklib-core/src/bridge/factory.rs")),
];

#[derive(Parser, Debug)]
#[command(name = "linklib")]
#[command(about = "Install linklib and inspect filesystem links")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Copy the library sources into a library directory
    Install {
        /// Parent directory for the `linklib` folder (defaults to $LIB, then the data dir)
        #[arg(long)]
        target: Option<PathBuf>,
    },
    /// Check whether a path exists
    Exists { path: String },
    /// Print each fold step of a path as `segment:previous`
    Walk {
        path: String,

        /// Print the running history instead of the previous segment
        #[arg(long)]
        history: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match args.command {
        Command::Install { target } => install(target, args.json),
        Command::Exists { path } => {
            let link: PathLink = PathLink::new(&path);
            let exists = link.exists();
            if args.json {
                println!(
                    "{}",
                    serde_json::json!({ "path": link.to_string(), "exists": exists })
                );
            } else {
                println!("{}", exists);
            }
            Ok(())
        }
        Command::Walk { path, history } => walk(&path, history, args.json),
    }
}

fn install(target: Option<PathBuf>, json: bool) -> Result<()> {
    let lib_dir = match target {
        Some(dir) => dir,
        None => default_lib_dir().context("No target given and no default library directory")?,
    };

    let report = install_sources(&lib_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!(
            "Installed {} files to {}",
            report.written.len(),
            report.library_dir.display()
        );
    }
    Ok(())
}

/// Write every embedded source under `<lib_dir>/linklib/`.
fn install_sources(lib_dir: &Path) -> Result<InstallReport> {
    let installer = SOURCES
        .iter()
        .fold(Installer::new(lib_dir), |installer, (name, contents)| {
            installer.artifact(*name, *contents)
        });

    installer
        .install()
        .with_context(|| format!("Failed to install into {}", lib_dir.display()))
}

/// One fold step: the segment being folded and what it was folded onto.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    segment: String,
    previous: String,
}

/// Fold `path`, returning every step taken and the final result.
///
/// Each step returns its own segment, so `previous` is the segment before it.
/// With `history`, `previous` is the comma-joined running history instead.
fn walk_steps(path: &str, history: bool) -> Result<(Vec<Step>, String)> {
    let mut link: PathLink = PathLink::new(path);
    let steps = Rc::new(RefCell::new(Vec::new()));
    let record = steps.clone();

    let last = if history {
        link.fold_with_history(move |segment, _previous: String, trail: &[String]| {
            record.borrow_mut().push(Step {
                segment: segment.to_string(),
                previous: trail.join(","),
            });
            segment.to_string()
        })?
    } else {
        link.fold_with(move |segment, previous: String| {
            record.borrow_mut().push(Step {
                segment: segment.to_string(),
                previous,
            });
            segment.to_string()
        })?
    };

    let steps = steps.take();
    Ok((steps, last))
}

fn walk(path: &str, history: bool, json: bool) -> Result<()> {
    let (steps, last) = walk_steps(path, history)?;

    if json {
        let rows: Vec<_> = steps
            .iter()
            .map(|step| serde_json::json!({ "segment": step.segment, "previous": step.previous }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "steps": rows, "result": last }))?
        );
    } else {
        for step in &steps {
            println!("{}:{}", step.segment, step.previous);
        }
    }
    Ok(())
}
