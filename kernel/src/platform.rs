use crate::{
    cfg::SolverCfg,
    error::{SolveError, ValidationError},
    Joint, JointId, LinkId, Linkage,
};

/// Constraint graph of joints and linkages.
///
/// The platform is the arena of the joints, linkages refer to them by
/// [`JointId`]. Linkages keep their declaration order, which is also the
/// relaxation order.
#[derive(Clone, Debug, Default)]
pub struct Platform {
    joints: Vec<Joint>,
    linkages: Vec<Linkage>,
}

impl Platform {
    /// Create an empty platform.
    pub const fn new() -> Self {
        Self { joints: Vec::new(), linkages: Vec::new() }
    }

    /// Add a joint, names must be unique.
    pub fn add_joint(&mut self, joint: Joint) -> Result<JointId, ValidationError> {
        if self.joint_id(&joint.name).is_some() {
            return Err(ValidationError::DuplicateJoint(joint.name));
        }
        self.joints.push(joint);
        Ok(JointId(self.joints.len() - 1))
    }

    /// Add an unconstrained linkage between two declared joints.
    pub fn add_linkage<S>(
        &mut self,
        name: S,
        j1: JointId,
        j2: JointId,
    ) -> Result<LinkId, ValidationError>
    where
        S: Into<String>,
    {
        let name = name.into();
        if self.link_id(&name).is_some() {
            return Err(ValidationError::DuplicateLink(name));
        }
        for j in [j1, j2] {
            if j.0 >= self.joints.len() {
                let joint = format!("#{}", j.0);
                return Err(ValidationError::UnknownJoint { link: name, joint });
            }
        }
        if j1 == j2 {
            let joint = self.joints[j1.0].name.clone();
            return Err(ValidationError::SelfLoop { link: name, joint });
        }
        self.linkages.push(Linkage { name, j1, j2, target: None });
        Ok(LinkId(self.linkages.len() - 1))
    }

    /// Constrain a linkage to the target length,
    /// `None` keeps its current length rigid.
    pub fn constrain(&mut self, id: LinkId, target: Option<f64>) {
        let target = target.unwrap_or_else(|| self.length(id));
        self.linkages[id.0].target = Some(target);
    }

    /// Constrain every linkage to its current length.
    pub fn constrain_all(&mut self) {
        for link in &mut self.linkages {
            link.target = Some(link.current_length(&self.joints));
        }
    }

    /// Find a joint by name.
    pub fn joint_id(&self, name: &str) -> Option<JointId> {
        self.joints.iter().position(|j| j.name == name).map(JointId)
    }

    /// Find a linkage by name.
    pub fn link_id(&self, name: &str) -> Option<LinkId> {
        self.linkages.iter().position(|l| l.name == name).map(LinkId)
    }

    /// Get the joint.
    pub fn joint(&self, id: JointId) -> &Joint {
        &self.joints[id.0]
    }

    /// Get the linkage.
    pub fn linkage(&self, id: LinkId) -> &Linkage {
        &self.linkages[id.0]
    }

    /// All joints in declaration order.
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// All linkages in declaration order.
    pub fn linkages(&self) -> &[Linkage] {
        &self.linkages
    }

    /// Current length of the linkage.
    pub fn length(&self, id: LinkId) -> f64 {
        self.linkages[id.0].current_length(&self.joints)
    }

    /// Sum of the absolute length errors of the constrained linkages.
    pub fn error(&self) -> f64 {
        self.linkages
            .iter()
            .filter_map(|l| l.error(&self.joints))
            .map(f64::abs)
            .sum()
    }

    /// Relax the free joints until every linkage reaches its target length.
    ///
    /// Return the number of passes over the linkages.
    pub fn solve(&mut self, cfg: &SolverCfg) -> Result<usize, SolveError> {
        if let Some(link) = self.linkages.iter().find(|l| l.target.is_none()) {
            return Err(SolveError::Unconstrained(link.name.clone()));
        }
        let mut residual = self.error();
        let mut iter = 0;
        let mut stalled = false;
        // NaN never counts as solved
        while residual.is_nan() || residual > cfg.tol {
            if iter >= cfg.max_iter {
                tracing::debug!(iter, residual, "platform diverged");
                return Err(SolveError::NonConvergence { iter, residual });
            }
            self.relax(stalled);
            let prev = residual;
            residual = self.error();
            iter += 1;
            // A pass that cancels itself out is retried backward
            stalled = (prev - residual).abs() <= f64::EPSILON * prev;
            if stalled {
                tracing::trace!(iter, residual, "relaxation stalled");
            }
        }
        tracing::trace!(iter, residual, "platform solved");
        Ok(iter)
    }

    /// One pass over the linkages, in declaration order or backward.
    fn relax(&mut self, rev: bool) {
        let Self { joints, linkages } = self;
        if rev {
            linkages.iter().rev().for_each(|link| link.adjust(joints));
        } else {
            linkages.iter().for_each(|link| link.adjust(joints));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn single_pivot(sx: f64, sy: f64) -> (Platform, JointId, LinkId) {
        let mut p = Platform::new();
        let axle = p.add_joint(Joint::new("axle", 0., 0.)).unwrap();
        let pivot = p.add_joint(Joint::fixed("pivot", 10. * sx, 0.)).unwrap();
        let mount = p.add_joint(Joint::fixed("shock_mount", 10. * sx, 10. * sy)).unwrap();
        let swing_arm = p.add_linkage("swing_arm", axle, pivot).unwrap();
        let shock = p.add_linkage("shock", axle, mount).unwrap();
        p.constrain(swing_arm, None);
        p.constrain(shock, None);
        (p, axle, shock)
    }

    #[test]
    fn single_pivot_quadrants() {
        for (sx, sy) in [(1., 1.), (-1., 1.), (-1., -1.), (1., -1.)] {
            let (mut p, axle, shock) = single_pivot(sx, sy);
            let rest = p.joints().to_vec();
            assert_eq!(p.solve(&SolverCfg::new()), Ok(0));
            assert_eq!(p.joints(), &rest[..]);

            p.constrain(shock, Some(10.));
            p.solve(&SolverCfg::new()).unwrap();
            let [x, y] = p.joint(axle).pos();
            assert_abs_diff_eq!(x, sx * 1.33975095, epsilon = 1e-7);
            assert_abs_diff_eq!(y, sy * 4.99999135, epsilon = 1e-7);
            assert_eq!(&p.joints()[1..], &rest[1..]);

            p.constrain(shock, Some(15.));
            p.solve(&SolverCfg::new()).unwrap();
            let [x, y] = p.joint(axle).pos();
            assert_abs_diff_eq!(x, sx * 0.07842415, epsilon = 1e-7);
            assert_abs_diff_eq!(y, sy * -1.24999256, epsilon = 1e-7);
            assert_eq!(&p.joints()[1..], &rest[1..]);
            for link in p.linkages() {
                assert!(link.error(p.joints()).unwrap().abs() < 1e-4);
            }
        }
    }

    #[test]
    fn vertical_linkage() {
        let mut p = Platform::new();
        let top = p.add_joint(Joint::fixed("top", 0., 10.)).unwrap();
        let bottom = p.add_joint(Joint::new("bottom", 0., 0.)).unwrap();
        let link = p.add_linkage("link", top, bottom).unwrap();
        p.constrain(link, Some(15.));
        p.solve(&SolverCfg::new()).unwrap();
        assert_eq!(p.joint(top).pos(), [0., 10.]);
        assert_eq!(p.joint(bottom).x, 0.);
        assert_abs_diff_eq!(p.joint(bottom).y, -5., epsilon = 1e-7);
    }

    #[test]
    fn vertical_linkage_shrink() {
        let mut p = Platform::new();
        let top = p.add_joint(Joint::fixed("top", 0., 10.)).unwrap();
        let bottom = p.add_joint(Joint::new("bottom", 0., 0.)).unwrap();
        let link = p.add_linkage("link", top, bottom).unwrap();
        p.constrain(link, Some(4.));
        p.solve(&SolverCfg::new()).unwrap();
        assert_eq!(p.joint(bottom).x, 0.);
        assert_abs_diff_eq!(p.joint(bottom).y, 6., epsilon = 1e-7);
    }

    #[test]
    fn horizontal_linkage() {
        let mut p = Platform::new();
        let left = p.add_joint(Joint::fixed("left", 0., 0.)).unwrap();
        let right = p.add_joint(Joint::new("right", 10., 0.)).unwrap();
        let link = p.add_linkage("link", left, right).unwrap();
        p.constrain(link, Some(15.));
        p.solve(&SolverCfg::new()).unwrap();
        assert_eq!(p.joint(left).pos(), [0., 0.]);
        assert_abs_diff_eq!(p.joint(right).x, 15., epsilon = 1e-7);
        assert_eq!(p.joint(right).y, 0.);
    }

    #[test]
    fn both_free_share_the_correction() {
        let mut p = Platform::new();
        let a = p.add_joint(Joint::new("a", 0., 0.)).unwrap();
        let b = p.add_joint(Joint::new("b", 10., 0.)).unwrap();
        let link = p.add_linkage("link", a, b).unwrap();
        p.constrain(link, Some(6.));
        p.solve(&SolverCfg::new()).unwrap();
        assert_abs_diff_eq!(p.joint(a).x, 2., epsilon = 1e-7);
        assert_abs_diff_eq!(p.joint(b).x, 8., epsilon = 1e-7);
    }

    #[test]
    fn patrol_like_platform() {
        let mut p = Platform::new();
        let mut add = |name, x, y, fixed| {
            let joint = if fixed { Joint::fixed(name, x, y) } else { Joint::new(name, x, y) };
            p.add_joint(joint).unwrap()
        };
        let a = add("a", 0., 0., false);
        let b = add("b", 5., 5., false);
        let c = add("c", 7., 4., true);
        let d = add("d", 9., 5., false);
        let e = add("e", 7., 1., true);
        let f = add("f", 9., 1., true);
        let chainstay = p.add_linkage("chainstay", a, e).unwrap();
        let seatstay = p.add_linkage("seatstay", a, b).unwrap();
        p.add_linkage("ttop", b, d).unwrap();
        p.add_linkage("tleft", b, c).unwrap();
        p.add_linkage("tright", c, d).unwrap();
        p.constrain_all();
        let shock = p.add_linkage("shock", d, f).unwrap();
        let chainstay_len = p.length(chainstay);
        let seatstay_len = p.length(seatstay);
        assert_eq!(p.length(shock), 4.);
        assert_eq!(
            p.solve(&SolverCfg::new()),
            Err(SolveError::Unconstrained("shock".into()))
        );

        // The first pass pulls the shock straight down and lines up the
        // triangle b-c-d, where the forward sweep cancels itself
        p.constrain(shock, Some(2.));
        let iter = p.solve(&SolverCfg::new()).unwrap();
        assert!(iter < 10_000);
        assert!(p.error() <= 1e-5);
        assert_abs_diff_eq!(p.length(shock), 2., epsilon = 1e-5);
        assert_abs_diff_eq!(p.length(chainstay), chainstay_len, epsilon = 1e-5);
        assert_abs_diff_eq!(p.length(seatstay), seatstay_len, epsilon = 1e-5);
        let [x, y] = p.joint(d).pos();
        assert_abs_diff_eq!(x, 9., epsilon = 1e-4);
        assert_abs_diff_eq!(y, 3., epsilon = 1e-4);
        assert_eq!(p.joint(c).pos(), [7., 4.]);
        assert_eq!(p.joint(e).pos(), [7., 1.]);
        assert_eq!(p.joint(f).pos(), [9., 1.]);
    }

    #[test]
    fn nan_target_never_converges() {
        let mut p = Platform::new();
        let a = p.add_joint(Joint::fixed("a", 0., 0.)).unwrap();
        let b = p.add_joint(Joint::new("b", 0., 10.)).unwrap();
        let link = p.add_linkage("link", a, b).unwrap();
        p.constrain(link, Some(f64::NAN));
        let err = p.solve(&SolverCfg::new().max_iter(10)).unwrap_err();
        assert!(matches!(err, SolveError::NonConvergence { iter: 10, .. }));
    }

    #[test]
    fn impossible_geometry() {
        let mut p = Platform::new();
        let a = p.add_joint(Joint::fixed("a", 0., 0.)).unwrap();
        let b = p.add_joint(Joint::fixed("b", 3., 4.)).unwrap();
        let l1 = p.add_linkage("l1", a, b).unwrap();
        let l2 = p.add_linkage("l2", b, a).unwrap();
        p.constrain(l1, Some(5.));
        p.constrain(l2, Some(7.));
        let err = p.solve(&SolverCfg::new()).unwrap_err();
        assert!(matches!(err, SolveError::NonConvergence { iter: 100_000, .. }));
        let err = p.solve(&SolverCfg::new().max_iter(10)).unwrap_err();
        assert!(matches!(err, SolveError::NonConvergence { iter: 10, .. }));
    }

    #[test]
    fn invalid_linkages() {
        let mut p = Platform::new();
        let a = p.add_joint(Joint::new("a", 0., 0.)).unwrap();
        let b = p.add_joint(Joint::new("b", 1., 0.)).unwrap();
        assert_eq!(
            p.add_joint(Joint::new("a", 2., 0.)),
            Err(ValidationError::DuplicateJoint("a".into()))
        );
        assert!(matches!(
            p.add_linkage("loop", a, a),
            Err(ValidationError::SelfLoop { .. })
        ));
        p.add_linkage("bar", a, b).unwrap();
        assert_eq!(
            p.add_linkage("bar", b, a),
            Err(ValidationError::DuplicateLink("bar".into()))
        );
    }
}
