use crate::foundation::core::Point;

/// Last-known cursor position; absent until the first move.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pos: Option<Point>,
}

impl PointerState {
    pub fn moved(&mut self, pos: Point) {
        self.pos = Some(pos);
    }

    pub fn left(&mut self) {
        self.pos = None;
    }

    pub fn position(&self) -> Option<Point> {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_latest_position_until_left() {
        let mut p = PointerState::default();
        assert_eq!(p.position(), None);
        p.moved(Point::new(1.0, 2.0));
        p.moved(Point::new(-5.0, 1e9));
        assert_eq!(p.position(), Some(Point::new(-5.0, 1e9)));
        p.left();
        assert_eq!(p.position(), None);
    }
}
