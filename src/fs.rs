//! Scans the camera's `DATA/` tree for files to download
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::model::fs::{extension_rank, Buckets, Resolution};

pub fn scan<T: AsRef<Path>>(data_dir: T) -> Result<Buckets> {
    let data_dir = data_dir.as_ref();
    let mut buckets = Buckets::default();

    let dirs = WalkDir::new(data_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) if e.file_type().is_dir() => Some(e.into_path()),
            Ok(_) => None,
            Err(e) => {
                warn!("skipping unreadable entry under {data_dir:?}: {e}");
                None
            }
        });

    for dir in dirs {
        let resolution = Resolution::of_dir(&dir);
        let bucket = match buckets.bucket_mut(resolution) {
            Some(bucket) => bucket,
            None => {
                debug!("skipping excluded directory {dir:?}");
                continue;
            }
        };

        match matching_files(&dir) {
            Ok(files) => {
                trace!("{} matching files in {dir:?} ({resolution:?})", files.len());
                bucket.extend(files);
            }
            Err(e) => warn!("skipping {dir:?}: {e:#}"),
        }
    }

    Ok(buckets)
}

/// Files directly inside `dir` matching one of the copied extensions,
/// grouped by extension and sorted by name within each group.
fn matching_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries =
        std::fs::read_dir(dir).context(format!("failed to read directory at {dir:?}"))?;

    for entry in entries {
        let entry = entry.context(format!("failed to read entry in {dir:?}"))?;
        if entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name();
        match extension_rank(&name) {
            Some(rank) => files.push((rank, entry.path())),
            None => trace!("ignoring {:?}", entry.path()),
        }
    }

    files.sort();
    Ok(files.into_iter().map(|(_rank, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, write};
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        create_dir_all(path.parent().unwrap()).unwrap();
        write(path, rel).unwrap();
    }

    fn names(paths: &[PathBuf], root: &Path) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_scan_missing_data_dir() {
        let tmp = TempDir::new().unwrap();
        let buckets = scan(tmp.path().join("DATA")).unwrap();
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_scan_routes_by_directory_suffix() {
        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("DATA");

        touch(&data, "top.CSV");
        touch(&data, "130101/B001.JPG");
        touch(&data, "130101/B001.RES");
        touch(&data, "130101/IMG_640_480/B001.JPG");
        touch(&data, "130101/IMG_640_480/B001.RES");
        touch(&data, "130101/IMG_256_192/B001.JPG");
        touch(&data, "130101/IMG_256_192/ACC.CSV");

        let buckets = scan(&data).unwrap();

        assert_eq!(
            names(&buckets.full, &data),
            vec!["top.CSV", "130101/B001.JPG", "130101/B001.RES"]
        );
        assert_eq!(
            names(&buckets.thumbnails, &data),
            vec!["130101/IMG_640_480/B001.JPG", "130101/IMG_640_480/B001.RES"]
        );
    }

    #[test]
    fn test_scan_groups_by_extension_and_ignores_others() {
        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("DATA");

        touch(&data, "b.CSV");
        touch(&data, "a.CSV");
        touch(&data, "z.JPG");
        touch(&data, "log.txt");
        touch(&data, "m.RES");
        touch(&data, "lower.jpg");
        touch(&data, "image.PNG");
        touch(&data, "notes.TXT");

        let buckets = scan(&data).unwrap();

        assert_eq!(
            names(&buckets.full, &data),
            vec!["z.JPG", "m.RES", "log.txt", "a.CSV", "b.CSV"]
        );
        assert!(buckets.thumbnails.is_empty());
    }

    // Linux filesystems accept any bytes in a name; others may refuse them.
    #[cfg(target_os = "linux")]
    #[test]
    fn test_scan_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("DATA");
        touch(&data, "a/B002.JPG");
        let odd = data.join("a").join(OsStr::from_bytes(b"B\xff01.JPG"));
        write(&odd, b"odd").unwrap();

        let buckets = scan(&data).unwrap();

        assert_eq!(buckets.full.len(), 2);
        assert!(buckets.full.contains(&odd));
    }

    #[test]
    fn test_scan_directory_named_like_a_file_is_not_collected() {
        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("DATA");

        touch(&data, "folder.JPG/inner.txt");

        let buckets = scan(&data).unwrap();
        assert_eq!(names(&buckets.full, &data), vec!["folder.JPG/inner.txt"]);
    }
}
