//! Rear suspension mechanism and its loader.
use crate::{
    datasheet::{from_pixel, Datasheet, Kinematics},
    error::{Result, ValidationError},
    JointId, LinkId, Platform, SolverCfg,
};

/// Physical parameters of the suspension.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    /// Vertical wheel travel
    pub travel: f64,
    /// Shock length at full extension
    pub eye_to_eye: f64,
    /// Shock shortening across the travel
    pub stroke: f64,
}

impl Params {
    fn check(self) -> Result<Self, ValidationError> {
        let Self { travel, eye_to_eye, stroke } = self;
        for (name, value) in [("wheel_travel", travel), ("eyetoeye", eye_to_eye), ("stroke", stroke)] {
            // Also rejects NaN
            if !(value > 0.) || value.is_infinite() {
                return Err(ValidationError::NonPositiveParam { name, value });
            }
        }
        if stroke >= eye_to_eye {
            return Err(ValidationError::StrokeTooLong { stroke, eye_to_eye });
        }
        Ok(self)
    }
}

/// A bike: the linkage platform with its designated axle and shock.
///
/// Every curve computation clones the platform, so the rest geometry is
/// never altered.
#[derive(Clone, Debug)]
pub struct Mechanism {
    pub(crate) platform: Platform,
    pub(crate) axle: JointId,
    pub(crate) shock: LinkId,
    pub(crate) shadow: Option<LinkId>,
    pub(crate) params: Params,
}

impl Mechanism {
    /// Assemble a mechanism from a platform.
    ///
    /// Unconstrained linkages are constrained to their current length.
    pub fn new(
        mut platform: Platform,
        axle: JointId,
        shock: LinkId,
        shadow: Option<LinkId>,
        params: Params,
    ) -> Result<Self, ValidationError> {
        let params = params.check()?;
        if axle.0 >= platform.joints().len() {
            return Err(ValidationError::NoAxle);
        }
        if shock.0 >= platform.linkages().len() {
            return Err(ValidationError::NoShock);
        }
        if let Some(id) = shadow.filter(|id| id.0 >= platform.linkages().len()) {
            return Err(ValidationError::UnknownShadow(id.0));
        }
        if Some(shock) == shadow {
            let name = platform.linkage(shock).name().to_string();
            return Err(ValidationError::ShadowIsShock(name));
        }
        let ids = (0..platform.linkages().len()).map(LinkId).collect::<Vec<_>>();
        for id in ids {
            if platform.linkage(id).target().is_none() {
                platform.constrain(id, None);
            }
        }
        Ok(Self { platform, axle, shock, shadow, params })
    }

    /// Load from a datasheet.
    pub fn from_datasheet(data: &Datasheet) -> Result<Self, ValidationError> {
        let kin = data.kinematics.as_ref().ok_or(ValidationError::MissingKinematics)?;
        let param = |v: Option<f64>, name| v.ok_or(ValidationError::MissingParam(name));
        let params = Params {
            travel: param(data.wheel_travel, "wheel_travel")?,
            eye_to_eye: param(data.eyetoeye, "eyetoeye")?,
            stroke: param(data.stroke, "stroke")?,
        };
        Self::from_kinematics(kin, params)
    }

    /// Load from the digitized geometry, in pixel space.
    pub fn from_kinematics(kin: &Kinematics, params: Params) -> Result<Self, ValidationError> {
        let mut platform = Platform::new();
        let mut axle = None::<JointId>;
        for (i, raw) in kin.joints.iter().enumerate() {
            let name = raw.name.clone().ok_or(ValidationError::UnnamedJoint(i))?;
            let coord = |v: Option<f64>, axis| {
                v.ok_or_else(|| ValidationError::MissingCoord { joint: name.clone(), axis })
            };
            let px = [coord(raw.x, 'x')?, coord(raw.y, 'y')?];
            if !px.iter().all(|v| v.is_finite()) {
                return Err(ValidationError::NonFiniteCoord(name));
            }
            let [x, y] = from_pixel(px, kin.reverse_x);
            let joint = crate::Joint { name, x, y, fixed: raw.is_fixed };
            let id = platform.add_joint(joint)?;
            if raw.is_axle {
                if let Some(first) = axle {
                    let first = platform.joint(first).name.clone();
                    let second = platform.joint(id).name.clone();
                    return Err(ValidationError::MultipleAxles(first, second));
                }
                axle = Some(id);
            }
        }
        let axle = axle.ok_or(ValidationError::NoAxle)?;

        let mut shock = None::<LinkId>;
        let mut shadow = None::<LinkId>;
        for (i, raw) in kin.links.iter().enumerate() {
            let name = raw.name.clone().ok_or(ValidationError::UnnamedLink(i))?;
            let end = |v: &Option<String>, end| {
                let joint = v.clone().ok_or_else(|| ValidationError::MissingEndpoint {
                    link: name.clone(),
                    end,
                })?;
                platform
                    .joint_id(&joint)
                    .ok_or_else(|| ValidationError::UnknownJoint { link: name.clone(), joint })
            };
            let j1 = end(&raw.j1, "j1")?;
            let j2 = end(&raw.j2, "j2")?;
            let id = platform.add_linkage(name, j1, j2)?;
            platform.constrain(id, None);
            if raw.is_shock {
                if let Some(first) = shock {
                    let [first, second] = [first, id].map(|id| platform.linkage(id).name().to_string());
                    return Err(ValidationError::MultipleShocks(first, second));
                }
                shock = Some(id);
            }
            if raw.is_shock_shadow {
                if let Some(first) = shadow {
                    let [first, second] = [first, id].map(|id| platform.linkage(id).name().to_string());
                    return Err(ValidationError::MultipleShadows(first, second));
                }
                shadow = Some(id);
            }
        }
        let shock = shock.ok_or(ValidationError::NoShock)?;
        Self::new(platform, axle, shock, shadow, params)
    }

    /// The constraint graph at rest.
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Rear axle joint.
    pub fn axle(&self) -> JointId {
        self.axle
    }

    /// Shock linkage.
    pub fn shock(&self) -> LinkId {
        self.shock
    }

    /// Shock shadow linkage.
    pub fn shock_shadow(&self) -> Option<LinkId> {
        self.shadow
    }

    /// Physical parameters.
    pub fn params(&self) -> Params {
        self.params
    }

    /// Overall leverage ratio `travel / stroke`.
    pub fn avg_leverage(&self) -> f64 {
        self.params.travel / self.params.stroke
    }

    /// Shock length at rest.
    pub fn shock_length(&self) -> f64 {
        self.platform.length(self.shock)
    }

    /// Solve the mechanism at evenly spaced fractions of the full stroke.
    ///
    /// Return the joint positions of each frame, from full extension to
    /// full compression.
    pub fn poses(&self, frames: usize, cfg: &SolverCfg) -> Result<Vec<Vec<[f64; 2]>>> {
        if frames < 2 {
            return Err(crate::Error::Cfg("pose frames must be 2 or greater"));
        }
        let mut sweep = Sweep::new(self);
        let mut poses = Vec::with_capacity(frames);
        for i in 0..frames {
            sweep.compress(i as f64 / (frames - 1) as f64, cfg)?;
            poses.push(sweep.platform.joints().iter().map(|j| j.pos()).collect());
        }
        Ok(poses)
    }
}

/// A mutable copy of the platform driven through the travel.
pub(crate) struct Sweep<'a> {
    pub(crate) mech: &'a Mechanism,
    pub(crate) platform: Platform,
    shock0: f64,
    shadow0: Option<f64>,
}

impl<'a> Sweep<'a> {
    pub(crate) fn new(mech: &'a Mechanism) -> Self {
        let platform = mech.platform.clone();
        let shock0 = platform.length(mech.shock);
        let shadow0 = mech.shadow.map(|id| platform.length(id));
        Self { mech, platform, shock0, shadow0 }
    }

    /// Shorten the shock by the fraction of the stroke, then solve.
    pub(crate) fn compress(&mut self, frac: f64, cfg: &SolverCfg) -> Result<usize> {
        let Params { eye_to_eye, stroke, .. } = self.mech.params;
        let remove = stroke / eye_to_eye * frac * self.shock0;
        self.platform.constrain(self.mech.shock, Some(self.shock0 - remove));
        if let (Some(id), Some(len)) = (self.mech.shadow, self.shadow0) {
            self.platform.constrain(id, Some(len - remove));
        }
        Ok(self.platform.solve(cfg)?)
    }
}
