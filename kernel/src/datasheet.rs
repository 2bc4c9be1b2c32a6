//! Raw kinematic description, as digitized from a bike photo.
//!
//! Coordinates are pixels with the origin at the top-left corner. Values the
//! loader must report on are kept optional, so a missing field becomes a
//! [`ValidationError`](crate::error::ValidationError) instead of a parse error.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Big number to flip the pixel space into a bottom-left origin.
pub const PIXEL_FLIP: f64 = 100_000.;

/// A datasheet of one bike.
///
/// Only the fields consumed by the solver are declared, other datasheet
/// fields are ignored.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Datasheet {
    /// Digitized geometry
    #[cfg_attr(feature = "serde", serde(default))]
    pub kinematics: Option<Kinematics>,
    /// Vertical wheel travel
    #[cfg_attr(feature = "serde", serde(default))]
    pub wheel_travel: Option<f64>,
    /// Shock eye-to-eye length
    #[cfg_attr(feature = "serde", serde(default))]
    pub eyetoeye: Option<f64>,
    /// Shock stroke
    #[cfg_attr(feature = "serde", serde(default))]
    pub stroke: Option<f64>,
}

/// Joints and linkages of the digitized geometry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Kinematics {
    /// Reference image of the digitizer
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub img: Option<String>,
    /// Mirror the x axis
    #[cfg_attr(feature = "serde", serde(default))]
    pub reverse_x: bool,
    /// Joints
    #[cfg_attr(feature = "serde", serde(default))]
    pub joints: Vec<RawJoint>,
    /// Linkages
    #[cfg_attr(feature = "serde", serde(default))]
    pub links: Vec<RawLink>,
}

/// A joint in pixel space.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawJoint {
    /// Name
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// X pixel
    #[cfg_attr(feature = "serde", serde(default))]
    pub x: Option<f64>,
    /// Y pixel, downward
    #[cfg_attr(feature = "serde", serde(default))]
    pub y: Option<f64>,
    /// Part of the frame
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_fixed: bool,
    /// Rear wheel axle
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_axle: bool,
}

/// A linkage between two named joints.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawLink {
    /// Name
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// First joint name
    #[cfg_attr(feature = "serde", serde(default))]
    pub j1: Option<String>,
    /// Second joint name
    #[cfg_attr(feature = "serde", serde(default))]
    pub j2: Option<String>,
    /// Driven shock
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_shock: bool,
    /// Tracks the shock length change
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_shock_shadow: bool,
}

impl RawJoint {
    /// Create a joint at the pixel.
    pub fn new<S: Into<String>>(name: S, x: f64, y: f64) -> Self {
        Self { name: Some(name.into()), x: Some(x), y: Some(y), ..Self::default() }
    }

    /// Flag as the frame.
    pub fn fixed(self) -> Self {
        Self { is_fixed: true, ..self }
    }

    /// Flag as the axle.
    pub fn axle(self) -> Self {
        Self { is_axle: true, ..self }
    }
}

impl RawLink {
    /// Create a linkage between the named joints.
    pub fn new<S: Into<String>>(name: S, j1: S, j2: S) -> Self {
        Self {
            name: Some(name.into()),
            j1: Some(j1.into()),
            j2: Some(j2.into()),
            ..Self::default()
        }
    }

    /// Flag as the shock.
    pub fn shock(self) -> Self {
        Self { is_shock: true, ..self }
    }

    /// Flag as the shock shadow.
    pub fn shadow(self) -> Self {
        Self { is_shock_shadow: true, ..self }
    }
}

/// Convert a pixel into the bottom-left origin space.
pub fn from_pixel([x, y]: [f64; 2], reverse_x: bool) -> [f64; 2] {
    let x = if reverse_x { PIXEL_FLIP - x } else { x };
    [x, PIXEL_FLIP - y]
}
