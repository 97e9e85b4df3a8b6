//! Rendering layers for the compass face
//!
//! Everything here is generic over [`DrawTarget`], so the same routines drive
//! the device framebuffer, a simulator window, or the mock display used in
//! tests. Colors are parameters; the layers have no opinion on palette.

pub mod needle;
pub mod ring;
pub mod rose;

pub use needle::draw_needle;
pub use ring::{RING_THICKNESS, draw_calibration_ring};
pub use rose::draw_rose;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use heapless::Vec;

/// Fill a polygon using even-odd scanline rasterization.
///
/// For every scanline crossing the polygon's bounding range, edge
/// intersections are collected (half-open in y, so shared vertices count
/// once), sorted, and the spans between alternating pairs are filled. Convex
/// or concave, self-intersecting or not; the ring segments and the needle
/// only ever hand it quads and triangles.
///
/// The intersection buffer holds 16 crossings per scanline, i.e. polygons
/// with up to 16 edges crossing any one row. Exceeding that is a bug in the
/// caller and trips a debug assertion.
pub fn fill_polygon<D>(target: &mut D, points: &[Point], color: D::Color) -> Result<(), D::Error>
where
    D: DrawTarget,
{
    if points.len() < 3 {
        return Ok(());
    }

    let (min_y, max_y) = points
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));

    for y in min_y..=max_y {
        let mut intersections: Vec<i32, 16> = Vec::new();

        for i in 0..points.len() {
            let p = points[i];
            let q = points[(i + 1) % points.len()];
            if p.y == q.y {
                continue;
            }
            let (top, bottom) = if p.y < q.y { (p, q) } else { (q, p) };
            if y >= top.y && y < bottom.y {
                let x = top.x + (y - top.y) * (bottom.x - top.x) / (bottom.y - top.y);
                let pushed = intersections.push(x);
                debug_assert!(pushed.is_ok(), "scanline crossing buffer overflow");
            }
        }

        intersections.sort_unstable();
        for span in intersections.chunks_exact(2) {
            let width = (span[1] - span[0] + 1) as u32;
            target.fill_solid(
                &Rectangle::new(Point::new(span[0], y), Size::new(width, 1)),
                color,
            )?;
        }
    }

    Ok(())
}

/// Stroke a polygon's outline with 1px lines.
pub fn stroke_polygon<D>(target: &mut D, points: &[Point], color: D::Color) -> Result<(), D::Error>
where
    D: DrawTarget,
{
    let style = PrimitiveStyle::with_stroke(color, 1);
    for i in 0..points.len() {
        Line::new(points[i], points[(i + 1) % points.len()])
            .into_styled(style)
            .draw(target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::BinaryColor;

    fn display() -> MockDisplay<BinaryColor> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    #[test]
    fn test_fill_polygon_covers_rectangle_interior() {
        let mut display = display();
        let quad = [
            Point::new(2, 2),
            Point::new(10, 2),
            Point::new(10, 8),
            Point::new(2, 8),
        ];

        fill_polygon(&mut display, &quad, BinaryColor::On).unwrap();

        assert_eq!(display.get_pixel(Point::new(5, 5)), Some(BinaryColor::On));
        assert_eq!(display.get_pixel(Point::new(2, 2)), Some(BinaryColor::On));
        assert_eq!(display.get_pixel(Point::new(10, 7)), Some(BinaryColor::On));
        // outside stays untouched
        assert_eq!(display.get_pixel(Point::new(11, 5)), None);
        assert_eq!(display.get_pixel(Point::new(5, 9)), None);
    }

    #[test]
    fn test_fill_polygon_triangle_stays_inside_bounds() {
        let mut display = display();
        let triangle = [Point::new(10, 2), Point::new(18, 14), Point::new(2, 14)];

        fill_polygon(&mut display, &triangle, BinaryColor::On).unwrap();

        // apex column is filled, corners outside the slanted edges are not
        assert_eq!(display.get_pixel(Point::new(10, 6)), Some(BinaryColor::On));
        assert_eq!(display.get_pixel(Point::new(2, 3)), None);
        assert_eq!(display.get_pixel(Point::new(18, 3)), None);
    }

    #[test]
    fn test_fill_polygon_comb_alternates_spans() {
        // three-toothed comb: six crossings on the upper scanlines, well
        // inside the per-scanline buffer
        let mut display = display();
        let comb = [
            Point::new(0, 10),
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(2, 6),
            Point::new(4, 6),
            Point::new(4, 0),
            Point::new(6, 0),
            Point::new(6, 6),
            Point::new(8, 6),
            Point::new(8, 0),
            Point::new(10, 0),
            Point::new(10, 10),
        ];

        fill_polygon(&mut display, &comb, BinaryColor::On).unwrap();

        // teeth filled, gaps between them empty, solid below the notches
        assert_eq!(display.get_pixel(Point::new(1, 3)), Some(BinaryColor::On));
        assert_eq!(display.get_pixel(Point::new(5, 3)), Some(BinaryColor::On));
        assert_eq!(display.get_pixel(Point::new(3, 3)), None);
        assert_eq!(display.get_pixel(Point::new(7, 3)), None);
        assert_eq!(display.get_pixel(Point::new(3, 8)), Some(BinaryColor::On));
        assert_eq!(display.get_pixel(Point::new(7, 8)), Some(BinaryColor::On));
    }

    #[test]
    fn test_fill_polygon_degenerate_input_is_noop() {
        let mut display = display();
        fill_polygon(&mut display, &[Point::new(1, 1), Point::new(5, 5)], BinaryColor::On).unwrap();
        assert_eq!(display.get_pixel(Point::new(3, 3)), None);
    }

    #[test]
    fn test_stroke_polygon_draws_closed_outline() {
        let mut display = display();
        let quad = [
            Point::new(1, 1),
            Point::new(8, 1),
            Point::new(8, 6),
            Point::new(1, 6),
        ];

        stroke_polygon(&mut display, &quad, BinaryColor::On).unwrap();

        assert_eq!(display.get_pixel(Point::new(4, 1)), Some(BinaryColor::On));
        assert_eq!(display.get_pixel(Point::new(1, 4)), Some(BinaryColor::On));
        assert_eq!(display.get_pixel(Point::new(8, 4)), Some(BinaryColor::On));
        assert_eq!(display.get_pixel(Point::new(4, 6)), Some(BinaryColor::On));
        // interior untouched
        assert_eq!(display.get_pixel(Point::new(4, 4)), None);
    }
}
