use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use clap::{ArgAction, Parser};
use tracing::{debug, info};
use tracing_subscriber::{filter::Directive, EnvFilter};

use std::path::{PathBuf, MAIN_SEPARATOR};
use std::str::FromStr;

mod clock;
mod device;
mod fs;
mod model;
mod parser;
mod sync;

use device::Autographer;

const DEFAULT_DEST_DIR: &str = "camera/test/";

/// Set up Vicon Autographer cameras for data collection and download their
/// data.
#[derive(Parser, Debug)]
#[command(version, arg_required_else_help = true)]
struct Cli {
    #[arg(short, long)]
    log_level: Option<Directive>,

    /// Path with the root of the mounted camera
    #[arg(long = "cameraDir", default_value = device::DEFAULT_MOUNT_POINT)]
    camera_dir: PathBuf,

    /// Destination path to copy camera data to
    #[arg(long = "destDir", default_value = DEFAULT_DEST_DIR)]
    dest_dir: String,

    /// Set up the camera with the correct time. Run this immediately after
    /// the camera is plugged in.
    #[arg(long = "setTime", value_name = "True/False", action = ArgAction::Set,
          value_parser = parse_flag, default_value = "false")]
    set_time: bool,

    /// Download data from the camera to the destination directory
    #[arg(long, value_name = "True/False", action = ArgAction::Set,
          value_parser = parse_flag, default_value = "false")]
    download: bool,

    /// Delete all of the participant's data from the camera
    #[arg(long, value_name = "True/False", action = ArgAction::Set,
          value_parser = parse_flag, default_value = "false")]
    delete: bool,
}

/// `yes`, `true`, `t` and `1` in any case are true, anything else is false.
fn parse_flag(value: &str) -> Result<bool, String> {
    Ok(matches!(
        value.to_lowercase().as_str(),
        "yes" | "true" | "t" | "1"
    ))
}

/// Makes sure the destination ends with a path separator.
fn normalize_dest_dir(dest_dir: &str) -> PathBuf {
    if dest_dir.ends_with('/') || dest_dir.ends_with(MAIN_SEPARATOR) {
        PathBuf::from(dest_dir)
    } else {
        PathBuf::from(format!("{dest_dir}{MAIN_SEPARATOR}"))
    }
}

/// Runs the selected operations in order: download, set time, delete.
fn run(cli: &Cli, now: NaiveDateTime) -> Result<()> {
    let camera = Autographer::at(&cli.camera_dir);
    let dest_dir = normalize_dest_dir(&cli.dest_dir);
    debug!("camera at {:?}, destination {:?}", camera.root(), dest_dir);

    if cli.download {
        sync::download(&camera, &dest_dir)?;
    }

    if cli.set_time {
        clock::set_camera_time(&camera, now)?;
    }

    if cli.delete {
        camera.erase()?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_directive = match cli.log_level.clone() {
        Some(directive) => directive,
        None => Directive::from_str("info")?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_directive)
                .from_env_lossy(),
        )
        .init();

    info!("Parsed CLI command: {:?}", cli);

    run(&cli, Local::now().naive_local())
}
