//! Summary of one annotation file, as printed by `vocview inspect`.

use serde::Serialize;
use std::fmt;

use super::{AnnotationSet, BoxShape};

/// What an annotation file contains, in a printable form.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    /// Path the set was read from.
    pub source: String,
    /// Number of two-corner rectangles.
    pub rects: usize,
    /// Number of polygons.
    pub polygons: usize,
    /// The boxes themselves, in document order.
    pub boxes: Vec<BoxEntry>,
}

/// One box in the report.
#[derive(Clone, Debug, Serialize)]
pub struct BoxEntry {
    pub kind: &'static str,
    pub coords: Vec<i32>,
}

impl InspectReport {
    /// Builds a report for a parsed set.
    pub fn new(source: impl Into<String>, set: &AnnotationSet) -> Self {
        let boxes = set
            .iter()
            .map(|shape| BoxEntry {
                kind: match shape {
                    BoxShape::Rect { .. } => "rect",
                    BoxShape::Polygon { .. } => "polygon",
                },
                coords: shape.to_flat(),
            })
            .collect();

        Self {
            source: source.into(),
            rects: set.rect_count(),
            polygons: set.polygon_count(),
            boxes,
        }
    }

    /// Total number of boxes.
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.source)?;
        writeln!(
            f,
            "  {} box(es): {} rect(s), {} polygon(s)",
            self.box_count(),
            self.rects,
            self.polygons
        )?;

        for (i, entry) in self.boxes.iter().enumerate() {
            let coords: Vec<String> = entry.coords.iter().map(i32::to_string).collect();
            writeln!(f, "  [{}] {} {}", i + 1, entry.kind, coords.join(","))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_report_lists_each_box() {
        let set = AnnotationSet::new(vec![
            BoxShape::from_flat(&[10, 10, 50, 50]).unwrap(),
            BoxShape::from_flat(&[0, 0, 4, 0, 4, 4]).unwrap(),
        ]);
        let report = InspectReport::new("a.xml", &set);
        let text = report.to_string();

        assert!(text.contains("2 box(es): 1 rect(s), 1 polygon(s)"));
        assert!(text.contains("[1] rect 10,10,50,50"));
        assert!(text.contains("[2] polygon 0,0,4,0,4,4"));
    }

    #[test]
    fn json_report_has_counts() {
        let set = AnnotationSet::new(vec![BoxShape::from_flat(&[1, 2, 3, 4]).unwrap()]);
        let json = serde_json::to_value(InspectReport::new("a.xml", &set)).unwrap();
        assert_eq!(json["rects"], 1);
        assert_eq!(json["polygons"], 0);
        assert_eq!(json["boxes"][0]["kind"], "rect");
        assert_eq!(json["boxes"][0]["coords"][3], 4);
    }
}
