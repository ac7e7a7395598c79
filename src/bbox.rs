use crate::geometry::Point3;

/// Axis-aligned bounding box as a min/max point pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox {
    pub p_min: Point3,
    pub p_max: Point3,
}

impl Bbox {
    pub fn new(p_min: Point3, p_max: Point3) -> Self {
        Self { p_min, p_max }
    }

    /// Tightest box around `points`. Requires a non-empty slice; use
    /// [`Bbox::empty`] plus [`Bbox::union_point`] when the count is unknown.
    pub fn from_points(points: &[Point3]) -> Self {
        debug_assert!(!points.is_empty());
        let mut p_min = points[0];
        let mut p_max = points[0];
        points.iter().skip(1).for_each(|p| {
            p_min = min_point3(p_min, *p);
            p_max = max_point3(p_max, *p);
        });
        Self { p_min, p_max }
    }

    pub fn empty() -> Self {
        Self {
            p_min: Point3::new(f32::MAX, f32::MAX, f32::MAX),
            p_max: Point3::new(f32::MIN, f32::MIN, f32::MIN),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    pub fn merge(mut self, another: Bbox) -> Self {
        self.p_min = min_point3(self.p_min, another.p_min);
        self.p_max = max_point3(self.p_max, another.p_max);
        self
    }

    pub fn union_point(mut self, p: Point3) -> Self {
        self.p_min = min_point3(self.p_min, p);
        self.p_max = max_point3(self.p_max, p);
        self
    }

    /// All 8 corners, p_min to p_max.
    pub fn corners(&self) -> [Point3; 8] {
        [
            Point3::new(self.p_min.x, self.p_min.y, self.p_min.z),
            Point3::new(self.p_min.x, self.p_min.y, self.p_max.z),
            Point3::new(self.p_min.x, self.p_max.y, self.p_min.z),
            Point3::new(self.p_min.x, self.p_max.y, self.p_max.z),
            Point3::new(self.p_max.x, self.p_min.y, self.p_min.z),
            Point3::new(self.p_max.x, self.p_min.y, self.p_max.z),
            Point3::new(self.p_max.x, self.p_max.y, self.p_min.z),
            Point3::new(self.p_max.x, self.p_max.y, self.p_max.z),
        ]
    }
}

fn min_point3(a: Point3, b: Point3) -> Point3 {
    Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

fn max_point3(a: Point3, b: Point3) -> Point3 {
    Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}
