//! Error types of the kernel.
use thiserror::Error;

/// Malformed or incomplete mechanism description, raised at load time.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    /// The description has no kinematics section.
    #[error("kinematics not found in datasheet")]
    MissingKinematics,
    /// A joint without a name.
    #[error("found unnamed joint (#{0})")]
    UnnamedJoint(usize),
    /// A joint without one of its coordinates.
    #[error("{joint} is missing its {axis} coordinate")]
    MissingCoord {
        /// Joint name
        joint: String,
        /// Missing axis
        axis: char,
    },
    /// A joint with NaN or infinite coordinates.
    #[error("{0} has a non-finite coordinate")]
    NonFiniteCoord(String),
    /// Two joints share a name.
    #[error("duplicate joint: {0}")]
    DuplicateJoint(String),
    /// No joint is flagged as the axle.
    #[error("no axle is defined")]
    NoAxle,
    /// More than one joint is flagged as the axle.
    #[error("more than one axle is defined ({0} and {1})")]
    MultipleAxles(String, String),
    /// A linkage without a name.
    #[error("found unnamed link (#{0})")]
    UnnamedLink(usize),
    /// A linkage without one of its endpoints.
    #[error("{link} must have {end} defined")]
    MissingEndpoint {
        /// Linkage name
        link: String,
        /// `j1` or `j2`
        end: &'static str,
    },
    /// A linkage refers to a joint that was never declared.
    #[error("{link} refers to unknown joint {joint}")]
    UnknownJoint {
        /// Linkage name
        link: String,
        /// Referred joint name
        joint: String,
    },
    /// A linkage connects a joint to itself.
    #[error("{link} j1 and j2 cannot be the same ({joint})")]
    SelfLoop {
        /// Linkage name
        link: String,
        /// Joint name
        joint: String,
    },
    /// Two linkages share a name.
    #[error("duplicate linkage: {0}")]
    DuplicateLink(String),
    /// No linkage is flagged as the shock.
    #[error("no shock is defined")]
    NoShock,
    /// More than one linkage is flagged as the shock.
    #[error("more than one shock is defined ({0} and {1})")]
    MultipleShocks(String, String),
    /// More than one linkage is flagged as the shock shadow.
    #[error("more than one shock shadow is defined ({0} and {1})")]
    MultipleShadows(String, String),
    /// The shock shadow is not a linkage of the platform.
    #[error("shock shadow (#{0}) is not a linkage of the platform")]
    UnknownShadow(usize),
    /// The shock shadow is the shock itself.
    #[error("{0} cannot be both the shock and its shadow")]
    ShadowIsShock(String),
    /// A physical parameter is absent.
    #[error("{0} not defined")]
    MissingParam(&'static str),
    /// A physical parameter is zero, negative or not a number.
    #[error("{name} must be positive, got {value}")]
    NonPositiveParam {
        /// Parameter name
        name: &'static str,
        /// Given value
        value: f64,
    },
    /// The stroke would collapse the shock.
    #[error("stroke ({stroke}) must be shorter than eyetoeye ({eye_to_eye})")]
    StrokeTooLong {
        /// Shock stroke
        stroke: f64,
        /// Shock eye-to-eye length
        eye_to_eye: f64,
    },
}

/// Relaxation failures of [`Platform::solve`](crate::Platform::solve).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SolveError {
    /// A linkage has no target length.
    #[error("{0} must have constrained length")]
    Unconstrained(String),
    /// The iteration cap was reached.
    #[error("unable to solve platform: residual {residual:e} after {iter} passes")]
    NonConvergence {
        /// Passes run
        iter: usize,
        /// Total length error left
        residual: f64,
    },
}

/// Kernel error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// Invalid mechanism description
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Solver failure
    #[error(transparent)]
    Solve(#[from] SolveError),
    /// The axle never moved vertically so travel cannot be scaled.
    #[error("the axle does not move vertically through the travel")]
    StaticAxle,
    /// A config value out of range.
    #[error("invalid config: {0}")]
    Cfg(&'static str),
}

/// Result type of the kernel.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::from(ValidationError::MissingParam("wheel_travel"));
        assert_eq!(err.to_string(), "wheel_travel not defined");
        let err = Error::from(SolveError::Unconstrained("shock".into()));
        assert_eq!(err.to_string(), "shock must have constrained length");
        let err = ValidationError::MissingCoord { joint: "axle".into(), axis: 'y' };
        assert_eq!(err.to_string(), "axle is missing its y coordinate");
    }
}
