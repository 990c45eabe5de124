//! Pascal VOC XML box reader.
//!
//! Every `<bndbox>` element in the document becomes one box. Its child
//! elements are read in document order as a flat coordinate list, so both the
//! usual `xmin/ymin/xmax/ymax` layout and longer polygon-style lists
//! (`x1/y1/x2/y2/x3/y3/...`) are accepted. The reader does not check element
//! names inside `<bndbox>`; only their count and numeric content matter.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use roxmltree::Node;

use super::{AnnotationSet, BoxShape, Natural};
use crate::error::VocviewError;

const BNDBOX_TAG: &str = "bndbox";

/// Read the boxes of one VOC annotation file.
///
/// The caller decides what a missing file means; here it is a read error
/// carrying the path, like any other file that cannot be read as UTF-8 text.
pub fn read_annotation_set(path: &Path) -> Result<AnnotationSet, VocviewError> {
    debug!("reading annotation {}", path.display());
    let xml = fs::read_to_string(path).map_err(|source| VocviewError::AnnotationRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_voc_xml_str(&xml, path)
}

/// Parse VOC XML from a UTF-8 string.
///
/// This helper is primarily useful for testing/fuzzing parse behavior in-memory.
pub fn from_voc_xml_str(xml: &str) -> Result<AnnotationSet, VocviewError> {
    parse_voc_xml_str(xml, Path::new("<memory>"))
}

/// Parse VOC XML from bytes.
///
/// The input must be valid UTF-8.
pub fn from_voc_xml_slice(bytes: &[u8]) -> Result<AnnotationSet, VocviewError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| VocviewError::AnnotationParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    from_voc_xml_str(xml)
}

fn parse_voc_xml_str(xml: &str, path: &Path) -> Result<AnnotationSet, VocviewError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| VocviewError::AnnotationParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let mut boxes = Vec::new();
    for (index, bndbox) in document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == BNDBOX_TAG)
        .enumerate()
    {
        boxes.push(parse_bndbox(bndbox, index, path)?);
    }

    debug!("{} box(es) in {}", boxes.len(), path.display());
    Ok(AnnotationSet::new(boxes))
}

fn parse_bndbox(
    bndbox: Node<'_, '_>,
    index: usize,
    path: &Path,
) -> Result<BoxShape<Natural>, VocviewError> {
    let values = bndbox
        .children()
        .filter(Node::is_element)
        .map(|child| parse_coordinate(child, index, path))
        .collect::<Result<Vec<i32>, _>>()?;

    BoxShape::from_flat(&values).map_err(|message| VocviewError::AnnotationParse {
        path: path.to_path_buf(),
        message: format!("<{BNDBOX_TAG}> #{}: {message}", index + 1),
    })
}

/// Reads a child's text as a float and truncates it toward zero.
fn parse_coordinate(node: Node<'_, '_>, index: usize, path: &Path) -> Result<i32, VocviewError> {
    let tag = node.tag_name().name();
    let parse_error = |message: String| VocviewError::AnnotationParse {
        path: path.to_path_buf(),
        message: format!("<{BNDBOX_TAG}> #{}: {message}", index + 1),
    };

    let raw = node
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| parse_error(format!("missing value in <{tag}>")))?;

    let value = raw.parse::<f64>().map_err(|_| {
        parse_error(format!(
            "invalid <{tag}> value '{raw}'; expected a number"
        ))
    })?;

    let truncated = value.trunc();
    if !truncated.is_finite()
        || truncated < f64::from(i32::MIN)
        || truncated > f64::from(i32::MAX)
    {
        return Err(parse_error(format!(
            "<{tag}> value '{raw}' is out of range"
        )));
    }

    Ok(truncated as i32)
}
