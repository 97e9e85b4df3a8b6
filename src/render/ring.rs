//! Calibration ring rendering
//!
//! The ring visualizes the per-segment coverage of the
//! [`CalibrationTracker`]: the inner boundary is always drawn, the outer
//! boundary appears once a segment has been visited, radial connectors close
//! the outline between visited and unvisited stretches, and segments above
//! the mid/filled thresholds are filled to the mid or outer radius. A dot
//! just inside the ring marks the live heading.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};

use crate::angle::{self, FULL_TURN};
use crate::calibration::{CalibrationTracker, SEGMENT_COUNT};
use crate::render::fill_polygon;

/// Radial distance between the inner and outer ring boundary.
pub const RING_THICKNESS: i32 = 10;

/// Angle of the boundary between segment `index - 1` and `index`; segment
/// centers sit on their index angle, so boundaries are offset half a step.
fn boundary_angle(index: usize) -> i32 {
    ((2 * index as i32 - 1) * FULL_TURN) / (2 * SEGMENT_COUNT as i32)
}

/// Draw the full calibration ring and the live-heading indicator into
/// `bounds`.
pub fn draw_calibration_ring<D>(
    target: &mut D,
    bounds: Rectangle,
    tracker: &CalibrationTracker,
    color: D::Color,
) -> Result<(), D::Error>
where
    D: DrawTarget,
{
    let center = bounds.center();
    let outer_radius = (bounds.size.width.min(bounds.size.height) / 2) as i32;
    let inner_radius = outer_radius - RING_THICKNESS;
    let mid_radius = (outer_radius + inner_radius) / 2;

    let stroke = PrimitiveStyle::with_stroke(color, 1);
    let point_at = |index: usize, radius: i32| {
        angle::point_from_polar(center, boundary_angle(index), radius)
    };

    for segment in 0..SEGMENT_COUNT {
        let flags = tracker.segment_flags(segment);
        let next_flags = tracker.segment_flags((segment + 1) % SEGMENT_COUNT);

        let inner_a = point_at(segment, inner_radius);
        let inner_b = point_at(segment + 1, inner_radius);
        let outer_a = point_at(segment, outer_radius);
        let outer_b = point_at(segment + 1, outer_radius);

        Line::new(inner_a, inner_b).into_styled(stroke).draw(target)?;
        if flags.visited {
            Line::new(outer_a, outer_b).into_styled(stroke).draw(target)?;
        }
        if flags.visited || next_flags.visited {
            Line::new(inner_b, outer_b).into_styled(stroke).draw(target)?;
        }
        if flags.mid || flags.filled {
            let (top_a, top_b) = if flags.filled {
                (outer_a, outer_b)
            } else {
                (point_at(segment, mid_radius), point_at(segment + 1, mid_radius))
            };
            fill_polygon(target, &[inner_a, top_a, top_b, inner_b], color)?;
        }
    }

    let dot = angle::point_from_polar(center, tracker.current_angle(), inner_radius - 6);
    Circle::with_center(dot, 8)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(target)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::BinaryColor;

    fn draw(tracker: &CalibrationTracker) -> MockDisplay<BinaryColor> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        let bounds = Rectangle::new(Point::zero(), Size::new(64, 64));
        draw_calibration_ring(&mut display, bounds, tracker, BinaryColor::On).unwrap();
        display
    }

    fn lit_pixels(display: &MockDisplay<BinaryColor>) -> usize {
        let mut count = 0;
        for y in 0..64 {
            for x in 0..64 {
                if display.get_pixel(Point::new(x, y)) == Some(BinaryColor::On) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_empty_ring_draws_inner_boundary_and_indicator() {
        let tracker = CalibrationTracker::new();
        let display = draw(&tracker);
        assert!(lit_pixels(&display) > 0);
    }

    #[test]
    fn test_visited_segments_add_outline_pixels() {
        let empty = CalibrationTracker::new();
        let baseline = lit_pixels(&draw(&empty));

        let mut seeded = CalibrationTracker::new();
        seeded.seed_demo_pattern();
        let seeded_pixels = lit_pixels(&draw(&seeded));

        assert!(
            seeded_pixels > baseline,
            "visited/filled segments must add outline and fill pixels ({} vs {})",
            seeded_pixels,
            baseline
        );
    }

    #[test]
    fn test_filled_segment_fills_more_than_mid_segment() {
        let mut mid = CalibrationTracker::new();
        mid.merge_value(0, crate::calibration::THRESHOLD_MID);

        let mut filled = CalibrationTracker::new();
        filled.merge_value(0, crate::calibration::THRESHOLD_FILLED);

        assert!(lit_pixels(&draw(&filled)) > lit_pixels(&draw(&mid)));
    }

    #[test]
    fn test_boundary_angles_cover_the_circle() {
        assert_eq!(boundary_angle(0), -FULL_TURN / (2 * SEGMENT_COUNT as i32));
        // one full revolution from first boundary to the same boundary again
        assert_eq!(
            boundary_angle(SEGMENT_COUNT) - boundary_angle(0),
            FULL_TURN
        );
    }
}
