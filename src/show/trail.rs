#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

pub const TRAIL_LEN: usize = 5;

/// The last few positions of a moving entity, newest first.
///
/// Backed by a fixed array and a cursor that always points at the newest
/// slot, so pushing overwrites the oldest entry in place.
#[derive(Debug, Clone)]
pub struct Trail {
    points: [Point; TRAIL_LEN],
    head: usize,
}

impl Trail {
    /// A trail with every slot at `origin`.
    pub fn new(origin: Point) -> Self {
        Self {
            points: [origin; TRAIL_LEN],
            head: 0,
        }
    }

    pub fn push(&mut self, point: Point) {
        self.head = (self.head + TRAIL_LEN - 1) % TRAIL_LEN;
        self.points[self.head] = point;
    }

    pub fn newest(&self) -> Point {
        self.points[self.head]
    }

    pub fn oldest(&self) -> Point {
        self.points[(self.head + TRAIL_LEN - 1) % TRAIL_LEN]
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        (0..TRAIL_LEN).map(move |i| self.points[(self.head + i) % TRAIL_LEN])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trail_is_filled_with_origin() {
        let trail = Trail::new(Point::new(3.0, 4.0));
        assert_eq!(trail.iter().count(), TRAIL_LEN);
        assert!(trail.iter().all(|p| p == Point::new(3.0, 4.0)));
    }

    #[test]
    fn push_inserts_at_front_and_drops_oldest() {
        let mut trail = Trail::new(Point::new(0.0, 0.0));
        for i in 1..=7 {
            trail.push(Point::new(i as f32, 0.0));
        }
        let xs: Vec<f32> = trail.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![7.0, 6.0, 5.0, 4.0, 3.0]);
        assert_eq!(trail.newest().x, 7.0);
        assert_eq!(trail.oldest().x, 3.0);
    }

    #[test]
    fn oldest_lags_until_trail_fills() {
        let mut trail = Trail::new(Point::new(0.0, 0.0));
        trail.push(Point::new(1.0, 1.0));
        trail.push(Point::new(2.0, 2.0));
        assert_eq!(trail.oldest(), Point::new(0.0, 0.0));
        assert_eq!(trail.newest(), Point::new(2.0, 2.0));
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
