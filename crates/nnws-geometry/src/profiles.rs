//! Closed sketch profiles built from numeric parameters.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use nnws_types::{Point2, Profile, Segment};

use crate::hex::{cell_radius, offset_angle, WALL_SIDES};

/// Corner radii at or below this are drawn sharp.
const MIN_FILLET: f64 = 0.01;

/// Regular polygon with `sides` vertices on a circle of `circumradius`, vertex 0 at
/// `rotation` radians, wound counter-clockwise.
pub fn regular_polygon(center: Point2, circumradius: f64, sides: usize, rotation: f64) -> Profile {
    let points: Vec<Point2> = (0..sides)
        .map(|i| center.polar(circumradius, TAU * i as f64 / sides as f64 + rotation))
        .collect();
    Profile::polygon(&points)
}

/// Wall cell outline: a hexagon whose flat sides are `inscribed_radius` from the center
/// and whose first vertex points up.
pub fn hexagon(center: Point2, inscribed_radius: f64) -> Profile {
    regular_polygon(
        center,
        cell_radius(inscribed_radius * 2.0, WALL_SIDES),
        WALL_SIDES,
        offset_angle(WALL_SIDES),
    )
}

/// Rectangle with the same fillet radius on every corner.
pub fn rect_with_fillet(a: Point2, b: Point2, radius: f64) -> Profile {
    rect_with_fillets(a, b, [radius; 4])
}

/// Rectangle with per-corner fillets, ordered bottom-left, bottom-right, top-right,
/// top-left. Radii are clamped to half the shorter side; radii at or below 0.01 leave
/// the corner sharp.
pub fn rect_with_fillets(a: Point2, b: Point2, radii: [f64; 4]) -> Profile {
    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
    let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
    let limit = ((x1 - x0).min(y1 - y0) / 2.0).max(0.0);
    let r = radii.map(|r| if r > MIN_FILLET { r.min(limit) } else { 0.0 });

    // corner position, arc center offset direction, arc start angle
    let corners = [
        (Point2::new(x0, y0), (1.0, 1.0), PI),
        (Point2::new(x1, y0), (-1.0, 1.0), -FRAC_PI_2),
        (Point2::new(x1, y1), (-1.0, -1.0), 0.0),
        (Point2::new(x0, y1), (1.0, -1.0), FRAC_PI_2),
    ];

    let mut segments = Vec::with_capacity(8);
    for i in 0..4 {
        let (corner, (dx, dy), start_angle) = corners[i];
        let radius = r[i];
        let arc_end = if radius > 0.0 {
            let center = corner.translated(dx * radius, dy * radius);
            segments.push(Segment::Arc {
                center,
                radius,
                start_angle,
                sweep: FRAC_PI_2,
            });
            center.polar(radius, start_angle + FRAC_PI_2)
        } else {
            corner
        };

        let (next, (ndx, ndy), next_start) = corners[(i + 1) % 4];
        let next_radius = r[(i + 1) % 4];
        let line_end = if next_radius > 0.0 {
            next.translated(ndx * next_radius, ndy * next_radius)
                .polar(next_radius, next_start)
        } else {
            next
        };
        if arc_end.distance_to(&line_end) > 1e-12 {
            segments.push(Segment::line(arc_end, line_end));
        }
    }

    Profile::Loop { segments }
}

/// Curved slot on a ring: inner edge at `inner_radius`, `width` wide, spanning
/// `angular_length` radians centered on `rotation`, with semicircular ends.
pub fn arc_slot(inner_radius: f64, angular_length: f64, width: f64, rotation: f64) -> Profile {
    let origin = Point2::ORIGIN;
    let half = angular_length / 2.0;
    let start = rotation - half;
    let end = rotation + half;
    let mid_radius = inner_radius + width / 2.0;

    Profile::Loop {
        segments: vec![
            Segment::Arc {
                center: origin,
                radius: inner_radius + width,
                start_angle: start,
                sweep: angular_length,
            },
            Segment::Arc {
                center: origin.polar(mid_radius, end),
                radius: width / 2.0,
                start_angle: end,
                sweep: PI,
            },
            Segment::Arc {
                center: origin,
                radius: inner_radius,
                start_angle: end,
                sweep: -angular_length,
            },
            Segment::Arc {
                center: origin.polar(mid_radius, start),
                radius: width / 2.0,
                start_angle: start + PI,
                sweep: PI,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_hexagon_flat_sides() {
        let hex = hexagon(Point2::ORIGIN, 2.1);
        let (min, max) = hex.bounds();
        assert_abs_diff_eq!(min.x, -2.1, epsilon = 1e-9);
        assert_abs_diff_eq!(max.x, 2.1, epsilon = 1e-9);
        assert_eq!(hex.curve_count(), 6);
        assert!(hex.is_closed(1e-9));
    }

    #[test]
    fn test_octagon() {
        let oct = regular_polygon(Point2::new(1.0, 1.0), 0.5, 8, 0.0);
        assert_eq!(oct.curve_count(), 8);
        assert!(oct.is_closed(1e-9));
    }

    #[test]
    fn test_filleted_rect_closed_and_smaller() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 2.0);
        let sharp = Profile::rect(a, b);
        let rounded = rect_with_fillet(a, b, 0.35);
        assert!(rounded.is_closed(1e-9));
        assert_eq!(rounded.curve_count(), 8);
        assert!(rounded.area() < sharp.area());
        let expected = 8.0 - (4.0 - PI) * 0.35 * 0.35;
        assert_abs_diff_eq!(rounded.area(), expected, epsilon = 5e-3);
    }

    #[test]
    fn test_mixed_corners() {
        let p = rect_with_fillets(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 2.0),
            [0.0, 0.0, 0.75, 0.75],
        );
        assert!(p.is_closed(1e-9));
        // two arcs + four lines
        assert_eq!(p.curve_count(), 6);
    }

    #[test]
    fn test_radius_clamped_to_half_side() {
        let p = rect_with_fillet(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), 5.0);
        assert!(p.is_closed(1e-9));
        // fully rounded square collapses to four arcs
        assert_eq!(p.curve_count(), 4);
        assert_abs_diff_eq!(p.area(), PI * 0.25, epsilon = 1e-2);
    }

    #[test]
    fn test_slot_closed() {
        let slot = arc_slot(1.665, 0.25, 0.275, 0.0);
        assert!(slot.is_closed(1e-9));
        let (min, max) = slot.bounds();
        assert!(min.x > 1.5 && max.x < 2.0);
        assert!(max.y > 0.0 && min.y < 0.0);
    }
}
