//! Bounding-box annotations for a single image.
//!
//! # Design Principles
//!
//! 1. **Shape decided once**: a box is a [`BoxShape::Rect`] or a
//!    [`BoxShape::Polygon`] from the moment it is parsed; renderers match on
//!    the variant instead of re-inspecting coordinate counts.
//!
//! 2. **Typed spaces**: points carry a [`Natural`] or [`Display`] marker so a
//!    file coordinate cannot be drawn without passing through a [`Scale`].
//!
//! # Example
//!
//! ```
//! use vocview::annotation::{io_voc_xml::from_voc_xml_str, Scale};
//!
//! let set = from_voc_xml_str(
//!     "<annotation><bndbox><xmin>10</xmin><ymin>10</ymin>\
//!      <xmax>50</xmax><ymax>50</ymax></bndbox></annotation>",
//! )
//! .unwrap();
//! let shown = set.boxes[0].to_display(Scale { x: 2.0, y: 2.0 });
//! assert_eq!(shown.to_flat(), vec![5, 5, 25, 25]);
//! ```

pub mod io_voc_xml;
mod model;
mod point;
mod report;
mod shape;
mod space;

pub use model::AnnotationSet;
pub use point::{Point, Scale};
pub use report::InspectReport;
pub use shape::BoxShape;
pub use space::{Display, Natural};
