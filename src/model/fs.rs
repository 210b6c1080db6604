use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Directory suffix of the 640x480 folders, copied into the thumbnail folder.
pub const THUMBNAIL_SUFFIX: &str = "640_480";

/// Directory suffix of the 256x192 folders, which are never copied.
pub const EXCLUDED_SUFFIX: &str = "256_192";

/// File extensions copied off the camera, in the order they're collected
/// within a single directory. Matching is case-sensitive.
pub const EXTENSIONS: [&str; 4] = ["JPG", "RES", "txt", "CSV"];

/// Where the files of a single directory under `DATA/` end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Full,
    Thumbnail,
    Excluded,
}

impl Resolution {
    /// Routes a directory by the suffix of its path.
    pub fn of_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_string_lossy();
        let dir = dir.trim_end_matches(['/', '\\']);

        if dir.ends_with(EXCLUDED_SUFFIX) {
            Resolution::Excluded
        } else if dir.ends_with(THUMBNAIL_SUFFIX) {
            Resolution::Thumbnail
        } else {
            Resolution::Full
        }
    }
}

/// Index into [`EXTENSIONS`] of the pattern `*.<ext>` a file name matches.
/// Works on the raw name, so names that aren't valid UTF-8 still match.
pub fn extension_rank<S: AsRef<OsStr>>(file_name: S) -> Option<usize> {
    let name = file_name.as_ref().as_encoded_bytes();
    EXTENSIONS.iter().position(|ext| {
        name.strip_suffix(ext.as_bytes())
            .is_some_and(|stem| stem.ends_with(b"."))
    })
}

/// Files found under `DATA/`, in walk order.
#[derive(Debug, Default)]
pub struct Buckets {
    pub full: Vec<PathBuf>,
    pub thumbnails: Vec<PathBuf>,
}

impl Buckets {
    pub fn bucket_mut(&mut self, resolution: Resolution) -> Option<&mut Vec<PathBuf>> {
        match resolution {
            Resolution::Full => Some(&mut self.full),
            Resolution::Thumbnail => Some(&mut self.thumbnails),
            Resolution::Excluded => None,
        }
    }

    pub fn len(&self) -> usize {
        self.full.len() + self.thumbnails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/Volumes/Autographer/DATA/", Resolution::Full)]
    #[case("DATA/130101_120000", Resolution::Full)]
    #[case("DATA/130101_120000/640_480", Resolution::Thumbnail)]
    #[case("DATA/IMG_640_480", Resolution::Thumbnail)]
    #[case("DATA/IMG_640_480/", Resolution::Thumbnail)]
    #[case("DATA/IMG_256_192", Resolution::Excluded)]
    #[case("DATA/256_192/inner", Resolution::Full)]
    #[case("DATA/640_480_old", Resolution::Full)]
    fn test_resolution_of_dir(#[case] dir: &str, #[case] expected: Resolution) {
        assert_eq!(Resolution::of_dir(dir), expected);
    }

    #[rstest]
    #[case("B00001.JPG", Some(0))]
    #[case("B00001.RES", Some(1))]
    #[case("sensor.txt", Some(2))]
    #[case("ACC.CSV", Some(3))]
    #[case(".JPG", Some(0))]
    #[case("B00001.jpg", None)]
    #[case("notes.TXT", None)]
    #[case("ACC.csv", None)]
    #[case("JPG", None)]
    #[case("B00001.JPG.bak", None)]
    #[case("autographer.inf", None)]
    fn test_extension_rank(#[case] file_name: &str, #[case] expected: Option<usize>) {
        assert_eq!(extension_rank(file_name), expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_extension_rank_non_utf8_name() {
        use std::os::unix::ffi::OsStrExt;

        assert_eq!(extension_rank(OsStr::from_bytes(b"B\xff01.JPG")), Some(0));
        assert_eq!(extension_rank(OsStr::from_bytes(b"B\xff01.RES")), Some(1));
        assert_eq!(extension_rank(OsStr::from_bytes(b"B\xff01.png")), None);
    }

    #[test]
    fn test_excluded_has_no_bucket() {
        let mut buckets = Buckets::default();
        assert!(buckets.bucket_mut(Resolution::Excluded).is_none());

        buckets
            .bucket_mut(Resolution::Thumbnail)
            .unwrap()
            .push("a.JPG".into());
        assert_eq!(buckets.thumbnails.len(), 1);
        assert!(buckets.full.is_empty());
        assert_eq!(buckets.len(), 1);
    }
}
