//! Headless viewer shell.
//!
//! [`Viewer`] owns everything a viewer window shows: the current directory,
//! its listing, and the image currently on display. A windowing front end
//! forwards "choose directory" and "select entry" events to it and paints
//! [`Viewer::displayed`]; the CLI does the same and writes the buffer to a file.
//! Each call runs its whole pipeline synchronously.

use std::fmt;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use log::{debug, info, warn};

use crate::annotation::io_voc_xml::read_annotation_set;
use crate::browse::{annotation_path_for, is_supported_image, list_directory, FileListing};
use crate::config::ViewerConfig;
use crate::error::VocviewError;
use crate::render::load_display_image;

/// Size of the surface shown before anything is selected.
pub const PLACEHOLDER_SIZE: (u32, u32) = (700, 500);

/// What happened to the overlay of a displayed image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnotationStatus {
    /// No annotation file exists for the image.
    Missing,
    /// The annotation file was read and its boxes drawn.
    Drawn { boxes: usize },
    /// The annotation file could not be read; the image is shown bare.
    Failed(String),
}

/// Result of selecting a listing entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Not a selectable image; nothing was loaded and the display is unchanged.
    Ignored,
    /// The image replaced the previous display.
    Displayed {
        image: PathBuf,
        annotation: AnnotationStatus,
    },
}

impl fmt::Display for SelectOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectOutcome::Ignored => write!(f, "not a listed .jpg/.png image, nothing displayed"),
            SelectOutcome::Displayed { image, annotation } => {
                write!(f, "{}: ", image.display())?;
                match annotation {
                    AnnotationStatus::Missing => write!(f, "no annotation"),
                    AnnotationStatus::Drawn { boxes } => write!(f, "{boxes} box(es) drawn"),
                    AnnotationStatus::Failed(message) => {
                        write!(f, "annotation skipped ({message})")
                    }
                }
            }
        }
    }
}

/// One independent viewer instance.
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
    current_dir: Option<PathBuf>,
    listing: FileListing,
    displayed: RgbaImage,
}

impl Viewer {
    /// Creates a viewer showing the placeholder surface.
    ///
    /// Fails if the config is invalid or its initial directory cannot be listed.
    pub fn new(config: ViewerConfig) -> Result<Self, VocviewError> {
        config.validate()?;

        let initial_dir = config.initial_dir.clone();
        let mut viewer = Self {
            config,
            current_dir: None,
            listing: FileListing::default(),
            displayed: placeholder_surface(),
        };

        if let Some(dir) = initial_dir {
            viewer.choose_directory(&dir)?;
        }

        Ok(viewer)
    }

    /// Switch to `dir` and rebuild the listing from scratch.
    ///
    /// On failure the listing is left empty and no directory is current. The
    /// displayed image is not touched either way.
    pub fn choose_directory(&mut self, dir: &Path) -> Result<&FileListing, VocviewError> {
        self.current_dir = None;
        self.listing = FileListing::default();

        let listing = list_directory(dir)?;
        info!("opened {} ({} entries)", dir.display(), listing.len());

        self.current_dir = Some(dir.to_path_buf());
        self.listing = listing;
        Ok(&self.listing)
    }

    /// Select an entry of the current listing for display.
    ///
    /// Entries that are not `.jpg`/`.png` images, or not in the listing, are
    /// ignored without touching the filesystem. A missing annotation file
    /// shows the bare image; an unreadable one shows the bare image and is
    /// reported in the outcome. If the image itself cannot be decoded the
    /// error is returned and the previous display stays.
    pub fn select(&mut self, name: &str) -> Result<SelectOutcome, VocviewError> {
        if !is_supported_image(name) || !self.listing.contains(name) {
            debug!("ignoring selection {name:?}");
            return Ok(SelectOutcome::Ignored);
        }
        let Some(dir) = self.current_dir.as_ref() else {
            return Ok(SelectOutcome::Ignored);
        };

        let image_path = dir.join(name);
        let mut display = load_display_image(&image_path, self.config.display)?;

        let annotation_path = annotation_path_for(&image_path);
        debug!("annotation path {}", annotation_path.display());

        let annotation = if annotation_path.exists() {
            match read_annotation_set(&annotation_path) {
                Ok(set) => {
                    display.draw(&set, &self.config.style);
                    AnnotationStatus::Drawn { boxes: set.len() }
                }
                Err(err) => {
                    warn!("showing {name} without overlay: {err}");
                    AnnotationStatus::Failed(err.to_string())
                }
            }
        } else {
            AnnotationStatus::Missing
        };

        self.displayed = display.into_display_buffer();
        Ok(SelectOutcome::Displayed {
            image: image_path,
            annotation,
        })
    }

    /// The directory whose listing is shown, if any.
    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// The current listing; empty before a directory is chosen.
    pub fn listing(&self) -> &FileListing {
        &self.listing
    }

    /// The RGBA buffer on display.
    pub fn displayed(&self) -> &RgbaImage {
        &self.displayed
    }
}

/// The opaque black surface shown before any image is selected.
pub fn placeholder_surface() -> RgbaImage {
    let (width, height) = PLACEHOLDER_SIZE;
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]))
}
