/// Planar coordinates, implemented for arrays, tuples and joints.
pub trait Point: Sized {
    /// Create a point from its coordinates.
    fn point(x: f64, y: f64) -> Self;
    /// X coordinate.
    fn x(&self) -> f64;
    /// Y coordinate.
    fn y(&self) -> f64;

    /// Euclidean distance to another point.
    fn dist<P: Point>(&self, rhs: &P) -> f64 {
        (rhs.x() - self.x()).hypot(rhs.y() - self.y())
    }

    /// Reflect the point across the y axis (`x`) and/or the x axis (`y`).
    fn mirror(&self, x: bool, y: bool) -> Self {
        let sx = if x { -1. } else { 1. };
        let sy = if y { -1. } else { 1. };
        Self::point(sx * self.x(), sy * self.y())
    }

    /// Copy the coordinates into an array.
    fn to_array(&self) -> [f64; 2] {
        [self.x(), self.y()]
    }
}

impl Point for [f64; 2] {
    #[inline(always)]
    fn point(x: f64, y: f64) -> Self {
        [x, y]
    }
    #[inline(always)]
    fn x(&self) -> f64 {
        self[0]
    }
    #[inline(always)]
    fn y(&self) -> f64 {
        self[1]
    }
}

impl Point for (f64, f64) {
    #[inline(always)]
    fn point(x: f64, y: f64) -> Self {
        (x, y)
    }
    #[inline(always)]
    fn x(&self) -> f64 {
        self.0
    }
    #[inline(always)]
    fn y(&self) -> f64 {
        self.1
    }
}
