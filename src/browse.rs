//! Directory listing and the image/annotation naming conventions.
//!
//! A chosen image directory `D` is paired with `D/../annotations/`, which
//! holds one `<image-stem>.xml` per image.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::VocviewError;

/// Name of the annotation directory, a sibling of the image directory.
pub const ANNOTATIONS_DIR: &str = "annotations";

/// Image suffixes that may be selected for display (case-sensitive).
pub const IMAGE_SUFFIXES: [&str; 2] = [".jpg", ".png"];

const ANNOTATION_EXTENSION: &str = "xml";

/// The sorted entry names of one directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileListing {
    names: Vec<String>,
}

impl FileListing {
    /// Entry names in lexicographic order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the directory had no entries.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns true if `name` is one of the listed entries.
    pub fn contains(&self, name: &str) -> bool {
        self.names.binary_search_by(|probe| probe.as_str().cmp(name)).is_ok()
    }
}

/// List the direct children of `dir`, sorted lexicographically.
///
/// Files and subdirectories are both listed; nothing is filtered. Names that
/// are not valid UTF-8 are converted lossily.
pub fn list_directory(dir: &Path) -> Result<FileListing, VocviewError> {
    let read_error = |source: std::io::Error| VocviewError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    debug!("listed {} entries in {}", names.len(), dir.display());
    Ok(FileListing { names })
}

/// Returns true if `name` ends in one of [`IMAGE_SUFFIXES`].
pub fn is_supported_image(name: &str) -> bool {
    IMAGE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Resolve the annotation file that belongs to `image_path`.
///
/// `<dir>/<stem>.<ext>` maps to `<dir>/../annotations/<stem>.xml`. An image
/// directory without a parent uses itself as the base.
pub fn annotation_path_for(image_path: &Path) -> PathBuf {
    let image_dir = image_path.parent().unwrap_or_else(|| Path::new(""));
    let base = image_dir.parent().unwrap_or(image_dir);
    let mut file_name = image_path.file_stem().unwrap_or_default().to_os_string();
    file_name.push(".");
    file_name.push(ANNOTATION_EXTENSION);

    base.join(ANNOTATIONS_DIR).join(file_name)
}
