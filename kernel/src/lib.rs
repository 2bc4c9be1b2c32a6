//! Leverage is a planar constraint solver for bicycle rear suspensions.
//!
//! A [`Mechanism`] is loaded from a hand-digitized [`Datasheet`]. Its shock
//! is driven from full extension to full compression, the [`Platform`]
//! relaxes the other linkages at every step, and the motion of the axle
//! gives the leverage ratio curve.
//!
//! ```
//! use leverage::*;
//!
//! let mut p = Platform::new();
//! let axle = p.add_joint(Joint::new("axle", 0., 0.)).unwrap();
//! let pivot = p.add_joint(Joint::fixed("pivot", 10., 0.)).unwrap();
//! let mount = p.add_joint(Joint::fixed("shock mount", 10., 10.)).unwrap();
//! p.add_linkage("swing arm", axle, pivot).unwrap();
//! let shock = p.add_linkage("shock", axle, mount).unwrap();
//! let params = Params { travel: 100., eye_to_eye: 200., stroke: 50. };
//! let mech = Mechanism::new(p, axle, shock, None, params).unwrap();
//! let curve = mech.leverage_curve(&CurveCfg::new().res(4)).unwrap();
//! assert_eq!(curve.len(), 4);
//! ```
#![cfg_attr(doc_cfg, feature(doc_cfg))]
pub use crate::{
    cfg::*,
    datasheet::{Datasheet, Kinematics, RawJoint, RawLink},
    error::{Error, Result},
    joint::*,
    linkage::*,
    mech::*,
    platform::*,
    point::*,
};

mod cfg;
#[cfg(feature = "csv")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "csv")))]
pub mod csv;
pub mod curve;
pub mod datasheet;
pub mod error;
mod joint;
mod linkage;
mod mech;
mod platform;
#[cfg(feature = "plot")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "plot")))]
pub mod plot;
mod point;
mod sim;
