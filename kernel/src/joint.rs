use crate::Point;

/// Index of a joint inside its [`Platform`](crate::Platform).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JointId(pub(crate) usize);

impl JointId {
    /// Position in the joint arena.
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// A named pivot in the plane.
///
/// A fixed joint belongs to the frame, the solver never moves it.
#[derive(Clone, Debug, PartialEq)]
pub struct Joint {
    /// Unique name
    pub name: String,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Immovable flag
    pub fixed: bool,
}

impl Joint {
    /// Create a free joint.
    pub fn new<S: Into<String>>(name: S, x: f64, y: f64) -> Self {
        Self { name: name.into(), x, y, fixed: false }
    }

    /// Create a fixed joint.
    pub fn fixed<S: Into<String>>(name: S, x: f64, y: f64) -> Self {
        Self { fixed: true, ..Self::new(name, x, y) }
    }

    /// Position of the joint.
    pub fn pos(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    pub(crate) fn shift(&mut self, dx: f64, dy: f64) {
        if !self.fixed {
            self.x += dx;
            self.y += dy;
        }
    }
}

impl Point for Joint {
    fn point(x: f64, y: f64) -> Self {
        Self::new(String::new(), x, y)
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn mirror(&self, x: bool, y: bool) -> Self {
        let [x, y] = self.pos().mirror(x, y);
        Self { x, y, ..self.clone() }
    }
}
