use crate::wheel::DRAG_DIVISOR;
use rondelctl::geom::Point;
use std::f64::consts::PI;

/// Pointer anchors of an ongoing drag, in the wheel's local space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    current: Point,
    previous: Point,
}

impl DragState {
    pub fn begin(&mut self, local: Point) {
        self.current = local;
        self.previous = local;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Records a new pointer sample and returns the rotation it implies.
    pub fn advance(&mut self, local: Point, drag_speed: f64) -> f64 {
        self.current = local;
        let delta = drag_delta(self.previous, self.current, drag_speed);
        self.previous = self.current;
        delta
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn previous(&self) -> Point {
        self.previous
    }
}

/// Angular delta for a pointer moving from `previous` to `current`.
///
/// Only the dominant axis counts. A horizontal move turns the wheel one way
/// above the center and the other way below it; a vertical move likewise
/// depends on which side of the center the pointer is on.
///
/// One sample turns the wheel by at most half a turn, so a single wrap keeps
/// item angles in (-PI, PI] however far the pointer jumped.
pub fn drag_delta(previous: Point, current: Point, drag_speed: f64) -> f64 {
    let dx = current.x - previous.x;
    let dy = current.y - previous.y;

    let raw = if dx.abs() > dy.abs() {
        -sign(current.y) * dx
    } else {
        sign(current.x) * dy
    };
    (raw / DRAG_DIVISOR * drag_speed).clamp(-PI, PI)
}

// zero counts as positive
fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_drag_depends_on_half() {
        // above center, dragging right turns clockwise
        let d = drag_delta(Point::new(0.0, 50.0), Point::new(10.0, 50.0), 1.0);
        assert!((d + 0.02).abs() < 1e-12);

        let d = drag_delta(Point::new(0.0, -50.0), Point::new(10.0, -50.0), 1.0);
        assert!((d - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_vertical_drag_depends_on_side() {
        let d = drag_delta(Point::new(50.0, 0.0), Point::new(50.0, 20.0), 2.0);
        assert!((d - 0.08).abs() < 1e-12);

        let d = drag_delta(Point::new(-50.0, 0.0), Point::new(-50.0, 20.0), 2.0);
        assert!((d + 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_ties_use_vertical_axis_and_zero_is_positive() {
        let d = drag_delta(Point::new(0.0, 0.0), Point::new(5.0, 5.0), 1.0);
        assert!((d - 0.01).abs() < 1e-12);
        assert_eq!(drag_delta(Point::new(3.0, 3.0), Point::new(3.0, 3.0), 1.0), 0.0);
    }

    #[test]
    fn test_large_jump_is_capped_at_half_a_turn() {
        let d = drag_delta(Point::new(0.0, 100.0), Point::new(5000.0, 100.0), 1.0);
        assert_eq!(d, -PI);

        let d = drag_delta(Point::new(80.0, 0.0), Point::new(80.0, 9000.0), 4.0);
        assert_eq!(d, PI);
    }

    #[test]
    fn test_advance_moves_previous_anchor() {
        let mut drag = DragState::default();
        drag.begin(Point::new(0.0, 80.0));
        drag.advance(Point::new(25.0, 80.0), 1.0);
        assert_eq!(drag.previous(), Point::new(25.0, 80.0));

        let d = drag.advance(Point::new(25.0, 80.0), 1.0);
        assert_eq!(d, 0.0);
    }
}
