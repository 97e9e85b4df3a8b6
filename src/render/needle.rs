//! Compass needle rendering
//!
//! Two mirrored triangles around the center: the north half is filled, the
//! south half drawn in the counter color with an outline, rotated to the
//! presentation angle of the smoothing simulator.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use nalgebra::ComplexField;

use crate::angle::{self, Angle, HALF_TURN};
use crate::render::{fill_polygon, stroke_polygon};

/// Rotate a needle-local point (y up toward the tip) by `angle` and translate
/// it to `center`. Screen coordinates, clockwise-positive.
fn transform(point: Point, angle: Angle, center: Point) -> Point {
    let rad = angle::to_radians(angle);
    let (sin, cos) = (rad.sin(), rad.cos());
    Point::new(
        center.x + angle::round_i32(point.x as f32 * cos - point.y as f32 * sin),
        center.y + angle::round_i32(point.x as f32 * sin + point.y as f32 * cos),
    )
}

fn half_needle(angle: Angle, center: Point, radius: i32) -> [Point; 3] {
    let width = radius / 4;
    [
        transform(Point::new(-width, 0), angle, center),
        transform(Point::new(width, 0), angle, center),
        transform(Point::new(0, -radius), angle, center),
    ]
}

/// Draw the needle at `angle` inside `bounds`.
pub fn draw_needle<D>(
    target: &mut D,
    bounds: Rectangle,
    angle: Angle,
    north_color: D::Color,
    south_color: D::Color,
) -> Result<(), D::Error>
where
    D: DrawTarget,
{
    let center = bounds.center();
    let radius = (bounds.size.width.min(bounds.size.height) / 2) as i32;

    let north = half_needle(angle, center, radius);
    fill_polygon(target, &north, north_color)?;

    let south = half_needle(angle + HALF_TURN, center, radius);
    fill_polygon(target, &south, south_color)?;
    stroke_polygon(target, &south, south_color)?;

    Ok(())
}
