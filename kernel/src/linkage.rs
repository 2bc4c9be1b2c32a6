use crate::{Joint, JointId, Point};

/// Index of a linkage inside its [`Platform`](crate::Platform).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub(crate) usize);

impl LinkId {
    /// Position in the declaration order.
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// A bar between two joints.
#[derive(Clone, Debug, PartialEq)]
pub struct Linkage {
    pub(crate) name: String,
    pub(crate) j1: JointId,
    pub(crate) j2: JointId,
    pub(crate) target: Option<f64>,
}

impl Linkage {
    /// Unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Endpoint indices.
    pub fn ends(&self) -> [JointId; 2] {
        [self.j1, self.j2]
    }

    /// The length the solver must reach, if constrained.
    pub fn target(&self) -> Option<f64> {
        self.target
    }

    /// Distance between the endpoints.
    pub fn current_length(&self, joints: &[Joint]) -> f64 {
        joints[self.j1.0].dist(&joints[self.j2.0])
    }

    /// Signed length error `target - current`.
    pub fn error(&self, joints: &[Joint]) -> Option<f64> {
        self.target.map(|t| t - self.current_length(joints))
    }

    /// Move the free endpoints along the bar to cancel its length error.
    pub(crate) fn adjust(&self, joints: &mut [Joint]) {
        let Some(err) = self.error(joints) else { return };
        let (a, b) = (&joints[self.j1.0], &joints[self.j2.0]);
        let free = match (a.fixed, b.fixed) {
            (true, true) => return,
            (false, false) => 2.,
            _ => 1.,
        };
        if err == 0. {
            return;
        }
        let adj = err / free;
        // Too long pulls together, too short pushes apart
        let sign = if err < 0. { 1. } else { -1. };
        let run = b.x - a.x;
        let rise = b.y - a.y;
        let (dx, dy) = if run != 0. {
            let angle = (rise / run).atan();
            ((adj * angle.cos()).abs() * sign, (adj * angle.sin()).abs() * sign)
        } else {
            (0., adj.abs() * sign)
        };
        let dx = if a.x < b.x { dx } else { -dx };
        let dy = if a.y < b.y { dy } else { -dy };
        joints[self.j1.0].shift(dx, dy);
        joints[self.j2.0].shift(-dx, -dy);
    }
}
