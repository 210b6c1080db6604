use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

use crate::device::Autographer;

/// Subfolder of the destination receiving the thumbnails.
pub const THUMBNAIL_DIR: &str = "small";

/// Copies images and sensor files off the camera into `dest_dir`, thumbnails
/// into its `small/` folder. Existing files are overwritten.
///
/// Returns how many full resolution files were copied. A camera without a
/// `DATA/` directory has nothing to download and isn't an error.
pub fn download<P: AsRef<Path>>(camera: &Autographer, dest_dir: P) -> Result<usize> {
    let dest_dir = dest_dir.as_ref();
    let data_dir = camera.data_dir();

    if !data_dir.is_dir() {
        debug!("no data directory at {data_dir:?}, nothing to download");
        return Ok(0);
    }

    info!("downloading camera data from {data_dir:?} to {dest_dir:?}");
    let buckets = crate::fs::scan(&data_dir)?;
    if buckets.is_empty() {
        debug!("no matching files under {data_dir:?}");
    }

    let thumbnail_dir = dest_dir.join(THUMBNAIL_DIR);
    std::fs::create_dir_all(&thumbnail_dir)
        .context(format!("failed to create destination directory {thumbnail_dir:?}"))?;

    copy_files(&buckets.full, dest_dir)?;
    copy_files(&buckets.thumbnails, &thumbnail_dir)?;

    info!(
        "copy of {} data items to {:?} is now complete",
        buckets.full.len(),
        dest_dir
    );
    Ok(buckets.full.len())
}

fn copy_files(files: &[PathBuf], dest_dir: &Path) -> Result<()> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("{pos}/{len} {wide_bar} {msg}")?);

    for file in files {
        let name = destination_name(file);
        let dest = dest_dir.join(&name);
        pb.set_message(name.to_string_lossy().into_owned());

        trace!("copying {file:?} to {dest:?}");
        std::fs::copy(file, &dest).context(format!("failed to copy {file:?} to {dest:?}"))?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(())
}

/// Name a file is stored under at the destination: its last path segment,
/// splitting on either separator, with `.RES` swapped for `.JPG`. The rest
/// of the name is kept byte for byte.
pub fn destination_name<P: AsRef<Path>>(source: P) -> OsString {
    let source = source.as_ref().as_os_str().as_encoded_bytes();
    let start = source
        .iter()
        .rposition(|&b| b == b'/' || b == b'\\')
        .map_or(0, |sep| sep + 1);

    let mut name = source[start..].to_vec();
    let mut i = 0;
    while i + RES.len() <= name.len() {
        if name[i..].starts_with(RES) {
            name[i..i + JPG.len()].copy_from_slice(JPG);
            i += JPG.len();
        } else {
            i += 1;
        }
    }

    os_string_from_bytes(name)
}

const RES: &[u8] = b".RES";
const JPG: &[u8] = b".JPG";

#[cfg(unix)]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    String::from_utf8_lossy(&bytes).into_owned().into()
}
