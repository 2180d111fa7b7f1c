use crate::geometry::{Point, Size};

/// Distance kept between the cursor and each canvas edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margin {
    pub x: f64,
    pub y: f64,
}

impl Margin {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub type MoveFn = dyn FnMut(Point, Size);

/// Simulated pointer confined to a canvas.
///
/// Every move clamps the position into
/// `[margin, canvas - margin]` and then calls the move callback, even when the
/// position did not change.
pub struct VirtualCursor {
    position: Point,
    canvas: Size,
    margin: Margin,
    on_move: Box<MoveFn>,
}

impl VirtualCursor {
    pub fn new(canvas: Size, margin: Margin) -> Self {
        Self {
            position: Point::default(),
            canvas,
            margin,
            on_move: Box::new(|_, _| {}),
        }
    }

    pub fn with_on_move(mut self, on_move: impl FnMut(Point, Size) + 'static) -> Self {
        self.on_move = Box::new(on_move);
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    pub fn center_point(&self) -> Point {
        self.canvas.center()
    }

    /// Does not move the cursor; the next move clamps against the new size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.canvas = Size::new(width, height);
    }

    pub fn move_absolute(&mut self, x: f64, y: f64) -> Point {
        self.position = self.clamp(Point::new(x, y));
        (self.on_move)(self.position, self.canvas);
        self.position
    }

    pub fn move_relative(&mut self, dx: f64, dy: f64) -> Point {
        self.move_absolute(self.position.x + dx, self.position.y + dy)
    }

    pub fn move_to_fraction(&mut self, fx: f64, fy: f64) -> Point {
        self.move_absolute(self.canvas.width * fx, self.canvas.height * fy)
    }

    fn clamp(&self, p: Point) -> Point {
        Point::new(
            clamp_axis(p.x, self.margin.x, self.canvas.width - self.margin.x),
            clamp_axis(p.y, self.margin.y, self.canvas.height - self.margin.y),
        )
    }
}

// `f64::clamp` panics when the canvas is smaller than twice the margin.
fn clamp_axis(v: f64, min: f64, max: f64) -> f64 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn cursor() -> VirtualCursor {
        VirtualCursor::new(Size::new(1920.0, 1080.0), Margin::new(10.0, 10.0))
    }

    fn assert_within_margin(c: &VirtualCursor) {
        let p = c.position();
        let (m, s) = (c.margin(), c.canvas());
        assert!(p.x >= m.x && p.x <= s.width - m.x, "{p:?}");
        assert!(p.y >= m.y && p.y <= s.height - m.y, "{p:?}");
    }

    #[test]
    fn test_move_to_fraction_centers() {
        let mut c = cursor();
        assert_eq!(c.move_to_fraction(0.5, 0.5), Point::new(960.0, 540.0));
        assert_eq!(c.center_point(), Point::new(960.0, 540.0));
    }

    #[test]
    fn test_moves_stay_inside_margin() {
        let mut c = cursor();
        c.move_to_fraction(0.5, 0.5);
        let deltas = [
            (-5000.0, 0.0),
            (3.0, -7000.0),
            (40.0, 40.0),
            (99999.0, 99999.0),
            (-1.5, 0.25),
        ];
        for (dx, dy) in deltas {
            c.move_relative(dx, dy);
            assert_within_margin(&c);
        }

        c.move_absolute(-100.0, 5000.0);
        assert_eq!(c.position(), Point::new(10.0, 1070.0));
    }

    #[test]
    fn test_resize_clamps_on_next_move() {
        let mut c = cursor();
        c.move_absolute(1900.0, 1000.0);
        c.resize(800.0, 600.0);
        assert_eq!(c.position(), Point::new(1900.0, 1000.0));

        c.move_relative(0.0, 0.0);
        assert_eq!(c.position(), Point::new(790.0, 590.0));
    }

    #[test]
    fn test_callback_fires_on_every_move() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let mut c = cursor().with_on_move(move |p, s| log.borrow_mut().push((p, s)));

        c.move_absolute(100.0, 100.0);
        c.move_absolute(100.0, 100.0);
        c.move_relative(0.0, 0.0);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|&(p, s)| p == Point::new(100.0, 100.0)
            && s == Size::new(1920.0, 1080.0)));
    }
}
