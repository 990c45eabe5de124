//! Image loading, resizing and box overlay drawing.
//!
//! Boxes are drawn on the decoder's RGB buffer. The buffer is converted to the
//! RGBA layout display surfaces consume exactly once, in
//! [`DisplayImage::into_display_buffer`], after all drawing is done.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use log::debug;

use crate::annotation::{AnnotationSet, BoxShape, Display, Point, Scale};
use crate::error::VocviewError;

/// Stroke color for every box: pure green.
pub const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// How boxes are stroked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayStyle {
    /// Stroke width in display pixels. Must be positive.
    pub thickness: u32,
    color: Rgb<u8>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            thickness: 1,
            color: BOX_COLOR,
        }
    }
}

impl OverlayStyle {
    /// Default color with the given stroke width.
    pub fn with_thickness(thickness: u32) -> Self {
        Self {
            thickness,
            ..Self::default()
        }
    }

    /// Offsets, relative to the outline, covered by one stroke.
    ///
    /// Odd widths are centred on the outline; even widths lean outward.
    fn stroke_offsets(&self) -> std::ops::RangeInclusive<i32> {
        let t = self.thickness.max(1) as i32;
        -((t - 1) / 2)..=(t / 2)
    }
}

/// Largest display buffer, in bytes of RGBA pixels, a viewer will allocate.
pub const MAX_DISPLAY_BYTES: u64 = 1 << 30;

/// Bytes of an RGBA buffer of the given extents, or `None` on overflow.
pub fn display_bytes(width: u32, height: u32) -> Option<u64> {
    u64::from(width)
        .checked_mul(u64::from(height))?
        .checked_mul(4)
}

/// Requested display extents. A missing axis keeps the natural extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplaySize {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl DisplaySize {
    /// Show images at their natural size.
    pub const NATURAL: DisplaySize = DisplaySize {
        width: None,
        height: None,
    };

    /// A fixed display size on both axes.
    pub fn fixed(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// The `(width, height)` an image of `natural` size is shown at.
    pub fn resolve(&self, natural: (u32, u32)) -> (u32, u32) {
        (
            self.width.unwrap_or(natural.0),
            self.height.unwrap_or(natural.1),
        )
    }
}

/// A decoded image prepared for display, with the size it was decoded at.
#[derive(Clone, Debug)]
pub struct DisplayImage {
    buffer: RgbImage,
    natural_width: u32,
    natural_height: u32,
}

impl DisplayImage {
    /// Wraps a decoded buffer, resizing it if `size` asks for other extents.
    pub fn from_rgb(natural: RgbImage, size: DisplaySize) -> Self {
        let (natural_width, natural_height) = natural.dimensions();
        let (width, height) = size.resolve((natural_width, natural_height));

        let buffer = if (width, height) != (natural_width, natural_height) {
            debug!(
                "resizing {}x{} to {}x{}",
                natural_width, natural_height, width, height
            );
            imageops::resize(&natural, width, height, FilterType::Triangle)
        } else {
            natural
        };

        Self {
            buffer,
            natural_width,
            natural_height,
        }
    }

    /// `(width, height)` of the decoded image before any resize.
    pub fn natural_size(&self) -> (u32, u32) {
        (self.natural_width, self.natural_height)
    }

    /// `(width, height)` of the buffer that is shown.
    pub fn display_size(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Natural-to-display scale for this image.
    pub fn scale(&self) -> Scale {
        Scale::between(self.natural_size(), self.display_size())
    }

    /// The RGB buffer boxes are drawn on.
    pub fn buffer(&self) -> &RgbImage {
        &self.buffer
    }

    /// Draws `set` onto this image, mapping natural coordinates to display
    /// coordinates with [`DisplayImage::scale`].
    pub fn draw(&mut self, set: &AnnotationSet, style: &OverlayStyle) {
        let scale = self.scale();
        draw_overlay(&mut self.buffer, set, scale, style);
    }

    /// Converts the finished RGB buffer into an opaque RGBA display buffer.
    pub fn into_display_buffer(self) -> RgbaImage {
        DynamicImage::ImageRgb8(self.buffer).into_rgba8()
    }
}

/// Decode the image at `path` and size it for display.
pub fn load_display_image(path: &Path, size: DisplaySize) -> Result<DisplayImage, VocviewError> {
    debug!("reading image {}", path.display());
    let decoded = image::open(path).map_err(|source| VocviewError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    let natural = decoded.into_rgb8();

    let (width, height) = size.resolve(natural.dimensions());
    match display_bytes(width, height) {
        Some(bytes) if bytes <= MAX_DISPLAY_BYTES => {}
        _ => {
            return Err(VocviewError::InvalidConfig(format!(
                "display size {width}x{height} for {} exceeds {MAX_DISPLAY_BYTES} bytes",
                path.display()
            )));
        }
    }
    Ok(DisplayImage::from_rgb(natural, size))
}

/// Draw every box of `set` onto `image`.
///
/// `scale` maps the set's natural coordinates into `image`'s space; it is
/// applied to rectangles and polygons alike. Drawing is clipped to the image.
pub fn draw_overlay(image: &mut RgbImage, set: &AnnotationSet, scale: Scale, style: &OverlayStyle) {
    for shape in set {
        match shape.to_display(scale) {
            BoxShape::Rect { p1, p2 } => draw_rect(image, p1, p2, style),
            BoxShape::Polygon { points } => draw_polygon(image, &points, style),
        }
    }
}

/// Hollow rectangle through two opposite corners, corners included.
fn draw_rect(image: &mut RgbImage, p1: Point<Display>, p2: Point<Display>, style: &OverlayStyle) {
    let bounds = CanvasBounds::new(image, style);
    let left = bounds.clamp_x(i64::from(p1.x.min(p2.x)));
    let right = bounds.clamp_x(i64::from(p1.x.max(p2.x)));
    let top = bounds.clamp_y(i64::from(p1.y.min(p2.y)));
    let bottom = bounds.clamp_y(i64::from(p1.y.max(p2.y)));

    for offset in style.stroke_offsets() {
        let offset = i64::from(offset);
        let width = right - left + 2 * offset + 1;
        let height = bottom - top + 2 * offset + 1;
        if width <= 0 || height <= 0 {
            continue;
        }

        // clamped values fit comfortably in i32/u32
        let rect = Rect::at((left - offset) as i32, (top - offset) as i32)
            .of_size(width as u32, height as u32);
        draw_hollow_rect_mut(image, rect, style.color);
    }
}

/// Closed contour through `points`.
fn draw_polygon(image: &mut RgbImage, points: &[Point<Display>], style: &OverlayStyle) {
    let Some(&last) = points.last() else {
        return;
    };
    let bounds = CanvasBounds::new(image, style);

    let mut previous = last;
    for &current in points {
        let start = (f64::from(previous.x), f64::from(previous.y));
        let end = (f64::from(current.x), f64::from(current.y));
        if let Some((start, end)) = bounds.clip_segment(start, end) {
            for dx in style.stroke_offsets() {
                for dy in style.stroke_offsets() {
                    let (dx, dy) = (dx as f32, dy as f32);
                    draw_line_segment_mut(
                        image,
                        (start.0 as f32 + dx, start.1 as f32 + dy),
                        (end.0 as f32 + dx, end.1 as f32 + dy),
                        style.color,
                    );
                }
            }
        }
        previous = current;
    }
}

/// The canvas plus a margin wide enough that strokes drawn outside it can
/// never reach a visible pixel.
///
/// Line drawing walks every point of a segment, visible or not, so geometry
/// is cut down to these bounds before it is handed to `imageproc`.
struct CanvasBounds {
    min: f64,
    max_x: f64,
    max_y: f64,
}

impl CanvasBounds {
    fn new(image: &RgbImage, style: &OverlayStyle) -> Self {
        let margin = f64::from(style.thickness.max(1)) + 1.0;
        let (width, height) = image.dimensions();
        Self {
            min: -margin,
            max_x: f64::from(width) + margin,
            max_y: f64::from(height) + margin,
        }
    }

    fn clamp_x(&self, x: i64) -> i64 {
        x.clamp(self.min as i64, self.max_x as i64)
    }

    fn clamp_y(&self, y: i64) -> i64 {
        y.clamp(self.min as i64, self.max_y as i64)
    }

    /// Liang-Barsky clipping of the segment `start..end` to the bounds.
    fn clip_segment(&self, start: (f64, f64), end: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        let (dx, dy) = (end.0 - start.0, end.1 - start.1);
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;

        for (p, q) in [
            (-dx, start.0 - self.min),
            (dx, self.max_x - start.0),
            (-dy, start.1 - self.min),
            (dy, self.max_y - start.1),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((
            (start.0 + t0 * dx, start.1 + t0 * dy),
            (start.0 + t1 * dx, start.1 + t1 * dy),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn rect_set(coords: [i32; 4]) -> AnnotationSet {
        AnnotationSet::new(vec![BoxShape::from_flat(&coords).unwrap()])
    }

    fn patterned(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 3 % 256) as u8, (y * 5 % 256) as u8, ((x + y) % 256) as u8])
        })
    }

    #[test]
    fn rect_corners_land_on_exact_pixels() {
        let mut image = RgbImage::new(64, 64);
        draw_overlay(
            &mut image,
            &rect_set([10, 10, 50, 50]),
            Scale::IDENTITY,
            &OverlayStyle::default(),
        );

        for (x, y) in [(10, 10), (50, 10), (10, 50), (50, 50), (30, 10), (10, 30)] {
            assert_eq!(*image.get_pixel(x, y), BOX_COLOR, "edge pixel ({x}, {y})");
        }
        for (x, y) in [(9, 10), (51, 50), (30, 30), (11, 11), (49, 49)] {
            assert_eq!(*image.get_pixel(x, y), BLACK, "non-edge pixel ({x}, {y})");
        }
    }

    #[test]
    fn rect_corners_are_divided_by_scale() {
        // natural 200x100 shown at 100x100: scale (2, 1)
        let mut display = DisplayImage::from_rgb(RgbImage::new(200, 100), DisplaySize::fixed(100, 100));
        assert_eq!(display.scale(), Scale { x: 2.0, y: 1.0 });

        display.draw(&rect_set([21, 10, 81, 50]), &OverlayStyle::default());
        let buffer = display.buffer();

        // (21 / 2, 10) = (10, 10) and (81 / 2, 50) = (40, 50)
        assert_eq!(*buffer.get_pixel(10, 10), BOX_COLOR);
        assert_eq!(*buffer.get_pixel(40, 50), BOX_COLOR);
        assert_eq!(*buffer.get_pixel(41, 50), BLACK);
    }

    #[test]
    fn reversed_corners_draw_same_rect() {
        let mut forward = RgbImage::new(32, 32);
        let mut reversed = RgbImage::new(32, 32);
        let style = OverlayStyle::default();
        draw_overlay(&mut forward, &rect_set([5, 6, 20, 25]), Scale::IDENTITY, &style);
        draw_overlay(&mut reversed, &rect_set([20, 25, 5, 6]), Scale::IDENTITY, &style);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn thick_rect_grows_around_outline() {
        let mut image = RgbImage::new(64, 64);
        draw_overlay(
            &mut image,
            &rect_set([10, 10, 50, 50]),
            Scale::IDENTITY,
            &OverlayStyle::with_thickness(3),
        );

        for x in [9, 10, 11] {
            assert_eq!(*image.get_pixel(x, 30), BOX_COLOR, "x = {x}");
        }
        assert_eq!(*image.get_pixel(8, 30), BLACK);
        assert_eq!(*image.get_pixel(12, 30), BLACK);
    }

    #[test]
    fn degenerate_and_offscreen_rects_do_not_panic() {
        let mut image = RgbImage::new(16, 16);
        let style = OverlayStyle::with_thickness(4);
        draw_overlay(&mut image, &rect_set([5, 5, 5, 5]), Scale::IDENTITY, &style);
        draw_overlay(&mut image, &rect_set([-40, -40, 400, 400]), Scale::IDENTITY, &style);
        draw_overlay(
            &mut image,
            &rect_set([i32::MIN, i32::MIN, i32::MAX, i32::MAX]),
            Scale::IDENTITY,
            &style,
        );
        assert_eq!(*image.get_pixel(5, 5), BOX_COLOR);
    }

    #[test]
    fn huge_polygon_is_clipped() {
        let mut image = RgbImage::new(16, 16);
        let set = AnnotationSet::new(vec![BoxShape::from_flat(&[
            i32::MIN, 8, i32::MAX, 8, 0, i32::MAX,
        ])
        .unwrap()]);
        draw_overlay(&mut image, &set, Scale::IDENTITY, &OverlayStyle::default());
        assert_eq!(*image.get_pixel(3, 8), BOX_COLOR);
    }

    #[test]
    fn clip_segment_keeps_inner_and_drops_outer() {
        let image = RgbImage::new(10, 10);
        let bounds = CanvasBounds::new(&image, &OverlayStyle::default());

        let inner = bounds.clip_segment((1.0, 1.0), (5.0, 5.0));
        assert_eq!(inner, Some(((1.0, 1.0), (5.0, 5.0))));

        let outer = bounds.clip_segment((-50.0, -50.0), (-40.0, 90.0));
        assert_eq!(outer, None);

        let ((x0, _), (x1, _)) = bounds.clip_segment((-100.0, 5.0), (100.0, 5.0)).unwrap();
        assert!((x0 + 2.0).abs() < 1e-9, "x0 = {x0}");
        assert!((x1 - 12.0).abs() < 1e-9, "x1 = {x1}");
    }

    #[test]
    fn polygon_is_closed() {
        let mut image = RgbImage::new(32, 32);
        let set = AnnotationSet::new(vec![
            BoxShape::from_flat(&[4, 4, 20, 4, 20, 20, 4, 20]).unwrap(),
        ]);
        draw_overlay(&mut image, &set, Scale::IDENTITY, &OverlayStyle::default());

        // top edge, right edge, bottom edge and the closing left edge
        for (x, y) in [(12, 4), (20, 12), (12, 20), (4, 12)] {
            assert_eq!(*image.get_pixel(x, y), BOX_COLOR, "edge pixel ({x}, {y})");
        }
        assert_eq!(*image.get_pixel(12, 12), BLACK);
    }

    #[test]
    fn polygon_is_scaled_like_rects() {
        let mut image = RgbImage::new(32, 32);
        let set = AnnotationSet::new(vec![
            BoxShape::from_flat(&[8, 8, 40, 8, 40, 40, 8, 40]).unwrap(),
        ]);
        draw_overlay(&mut image, &set, Scale { x: 2.0, y: 2.0 }, &OverlayStyle::default());

        assert_eq!(*image.get_pixel(4, 12), BOX_COLOR);
        assert_eq!(*image.get_pixel(20, 12), BOX_COLOR);
        assert_eq!(*image.get_pixel(8, 8), BLACK);
    }

    #[test]
    fn empty_set_leaves_pixels_untouched() {
        let source = patterned(40, 30);
        let mut display = DisplayImage::from_rgb(source.clone(), DisplaySize::NATURAL);
        display.draw(&AnnotationSet::default(), &OverlayStyle::default());
        let shown = display.into_display_buffer();

        assert_eq!(shown.dimensions(), source.dimensions());
        for (x, y, pixel) in source.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            assert_eq!(shown.get_pixel(x, y).0, [r, g, b, 255]);
        }
    }

    #[test]
    fn display_size_keeps_missing_axis_natural() {
        let size = DisplaySize {
            width: Some(320),
            height: None,
        };
        assert_eq!(size.resolve((640, 480)), (320, 480));
        assert_eq!(DisplaySize::NATURAL.resolve((640, 480)), (640, 480));

        let display = DisplayImage::from_rgb(RgbImage::new(640, 480), size);
        assert_eq!(display.display_size(), (320, 480));
        assert_eq!(display.natural_size(), (640, 480));
        assert_eq!(display.scale(), Scale { x: 2.0, y: 1.0 });
    }

    #[test]
    fn load_display_image_reports_decode_failure() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("broken.png");
        std::fs::write(&path, b"not a png").expect("write file");

        let err = load_display_image(&path, DisplaySize::NATURAL).unwrap_err();
        assert!(matches!(err, VocviewError::ImageDecode { .. }));
    }

    #[test]
    fn load_display_image_decodes_png() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("ok.png");
        patterned(12, 8).save(&path).expect("save png");

        let display = load_display_image(&path, DisplaySize::fixed(6, 4)).expect("load png");
        assert_eq!(display.natural_size(), (12, 8));
        assert_eq!(display.display_size(), (6, 4));
    }

    #[test]
    fn load_display_image_rejects_oversized_display() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("ok.png");
        patterned(2, 2).save(&path).expect("save png");

        let err = load_display_image(&path, DisplaySize::fixed(u32::MAX, u32::MAX)).unwrap_err();
        assert!(matches!(err, VocviewError::InvalidConfig(_)), "{err:?}");

        // the natural height fills in the missing axis before the check
        let size = DisplaySize {
            width: Some(200_000_000),
            height: None,
        };
        assert!(load_display_image(&path, size).is_err());
    }

    #[test]
    fn display_bytes_detects_overflow() {
        assert_eq!(display_bytes(10, 10), Some(400));
        assert_eq!(display_bytes(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn every_style_strokes_in_box_color() {
        for style in [OverlayStyle::default(), OverlayStyle::with_thickness(4)] {
            let mut image = RgbImage::new(20, 20);
            draw_overlay(&mut image, &rect_set([5, 5, 15, 15]), Scale::IDENTITY, &style);
            assert_eq!(*image.get_pixel(5, 5), BOX_COLOR);
        }
    }
}
