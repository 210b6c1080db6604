use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, trace};

/// Where the camera's volume gets mounted when no `--cameraDir` is given.
#[cfg(target_os = "macos")]
pub const DEFAULT_MOUNT_POINT: &str = "/Volumes/Autographer/";
#[cfg(windows)]
pub const DEFAULT_MOUNT_POINT: &str = "E:\\";
#[cfg(not(any(target_os = "macos", windows)))]
pub const DEFAULT_MOUNT_POINT: &str = "/media/Autographer/";

const DATA_DIR: &str = "DATA";
const LOGS_DIR: &str = "LOGS";
const INFO_FILE: &str = "autographer.inf";
const CLOCK_CORRECTION_FILE: &str = "clock_correction.txt";

/// Logical representation of the Autographer, mounted as a plain filesystem
#[derive(Debug, Clone)]
pub struct Autographer {
    root: PathBuf,
}

impl Autographer {
    /// Doesn't check that anything is actually mounted at `root`; each
    /// operation deals with missing paths in its own way.
    pub fn at<P: AsRef<Path>>(root: P) -> Self {
        Autographer {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Images and sensor logs
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    /// Written by the camera when it's plugged in; holds its clock reading.
    pub fn info_file(&self) -> PathBuf {
        self.root.join(INFO_FILE)
    }

    /// Read by the camera once unplugged to adjust its clock.
    pub fn clock_correction_file(&self) -> PathBuf {
        self.root.join(CLOCK_CORRECTION_FILE)
    }

    /// Wipes `DATA/` and then `LOGS/`. Fails if either is missing.
    pub fn erase(&self) -> Result<()> {
        for dir in [self.data_dir(), self.logs_dir()] {
            trace!("removing {dir:?}");
            std::fs::remove_dir_all(&dir).context(format!("failed to remove {dir:?}"))?;
        }

        info!("Camera data has now been deleted.");
        Ok(())
    }
}
