//! Tunable constants of the solver pipeline.
//!
//! The defaults are empirical: they converge on the 4-to-7-bar rear
//! suspension layouts found on real bikes.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! impl_builders {
    ($($(#[$meta:meta])* fn $name:ident($ty:ty))+) => {$(
        $(#[$meta])*
        pub fn $name(self, $name: $ty) -> Self {
            Self { $name, ..self }
        }
    )+};
}

/// Relaxation solver config.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverCfg {
    /// Total length error regarded as solved
    pub tol: f64,
    /// Maximum number of relaxation passes
    pub max_iter: usize,
}

impl Default for SolverCfg {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverCfg {
    /// Constant default value.
    pub const fn new() -> Self {
        Self { tol: 1e-5, max_iter: 100_000 }
    }

    impl_builders! {
        /// Total length error regarded as solved
        fn tol(f64)
        /// Maximum number of relaxation passes
        fn max_iter(usize)
    }
}

/// Travel sweep config.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimCfg {
    /// Number of shock length steps across the stroke
    pub steps: usize,
}

impl Default for SimCfg {
    fn default() -> Self {
        Self::new()
    }
}

impl SimCfg {
    /// Constant default value.
    pub const fn new() -> Self {
        Self { steps: 100 }
    }

    impl_builders! {
        /// Number of shock length steps across the stroke
        fn steps(usize)
    }
}

/// Integral correction config.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrectCfg {
    /// Relative stroke error regarded as corrected
    pub tol: f64,
    /// Nudge size as a fraction of the minimum leverage
    pub step: f64,
    /// Maximum number of nudges
    pub max_iter: usize,
}

impl Default for CorrectCfg {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrectCfg {
    /// Constant default value.
    pub const fn new() -> Self {
        Self { tol: 1e-5, step: 1e-5, max_iter: 10_000 }
    }

    impl_builders! {
        /// Relative stroke error regarded as corrected
        fn tol(f64)
        /// Nudge size as a fraction of the minimum leverage
        fn step(f64)
        /// Maximum number of nudges
        fn max_iter(usize)
    }
}

/// Leverage curve pipeline config.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveCfg {
    /// Relaxation solver
    pub solver: SolverCfg,
    /// Travel sweep
    pub sim: SimCfg,
    /// Integral correction
    pub correct: CorrectCfg,
    /// Number of points of the quantized curve
    pub res: usize,
    /// Divide the quantized curve by the average leverage ratio
    pub normalized: bool,
}

impl Default for CurveCfg {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveCfg {
    /// Constant default value.
    pub const fn new() -> Self {
        Self {
            solver: SolverCfg::new(),
            sim: SimCfg::new(),
            correct: CorrectCfg::new(),
            res: 6,
            normalized: false,
        }
    }

    impl_builders! {
        /// Relaxation solver
        fn solver(SolverCfg)
        /// Travel sweep
        fn sim(SimCfg)
        /// Integral correction
        fn correct(CorrectCfg)
        /// Number of points of the quantized curve
        fn res(usize)
        /// Divide the quantized curve by the average leverage ratio
        fn normalized(bool)
    }
}
