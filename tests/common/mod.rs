#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use tempfile::TempDir;

pub const GRAY: Rgb<u8> = Rgb([90, 90, 90]);

/// A temporary `images/` + `annotations/` pair.
pub struct ImageSet {
    pub temp: TempDir,
    pub images: PathBuf,
    pub annotations: PathBuf,
}

impl ImageSet {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("create temp dir");
        let images = temp.path().join("images");
        let annotations = temp.path().join("annotations");
        fs::create_dir_all(&images).expect("create images dir");
        fs::create_dir_all(&annotations).expect("create annotations dir");
        Self {
            temp,
            images,
            annotations,
        }
    }

    /// Saves a uniformly gray image; the format follows the extension.
    pub fn add_image(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.images.join(name);
        write_gray(&path, width, height);
        path
    }

    pub fn add_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.images.join(name);
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn add_annotation(&self, stem: &str, xml: &str) -> PathBuf {
        let path = self.annotations.join(format!("{stem}.xml"));
        fs::write(&path, xml).expect("write annotation");
        path
    }

    /// The standard set: `a.png` (annotated), `b.jpg` (bare), `c.txt`.
    pub fn scenario() -> Self {
        let set = Self::new();
        set.add_image("a.png", 64, 64);
        set.add_image("b.jpg", 64, 64);
        set.add_file("c.txt", b"not an image");
        set.add_annotation("a", &voc_xml(&[["10", "10", "50", "50"]]));
        set
    }

    pub fn out_path(&self, name: &str) -> PathBuf {
        self.temp.path().join(name)
    }
}

pub fn write_gray(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    RgbImage::from_pixel(width, height, GRAY)
        .save(path)
        .expect("save image");
}

/// A VOC annotation document with one object per `[xmin, ymin, xmax, ymax]`.
pub fn voc_xml(boxes: &[[&str; 4]]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<annotation>\n");
    xml.push_str("  <filename>img.png</filename>\n");
    for [xmin, ymin, xmax, ymax] in boxes {
        xml.push_str("  <object>\n    <name>thing</name>\n    <bndbox>\n");
        xml.push_str(&format!("      <xmin>{xmin}</xmin>\n"));
        xml.push_str(&format!("      <ymin>{ymin}</ymin>\n"));
        xml.push_str(&format!("      <xmax>{xmax}</xmax>\n"));
        xml.push_str(&format!("      <ymax>{ymax}</ymax>\n"));
        xml.push_str("    </bndbox>\n  </object>\n");
    }
    xml.push_str("</annotation>\n");
    xml
}

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}
