use thiserror::Error;

/// Errors produced while querying monitors or resolving one of their fields.
///
/// Only [`Error::BackendInitFailure`] and [`Error::Backend`] are fatal to an
/// inventory; the others describe a single missing value and are rendered as
/// placeholders by the [report](crate::report).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The display backend could not be brought up
    #[error("display backend failed to initialize: {0}")]
    BackendInitFailure(String),

    /// Monitor enumeration failed on an initialized backend
    #[error("display backend query failed: {0}")]
    Backend(String),

    /// A monitor index past the end of the inventory was requested
    #[error("Monitor #{index} not available.")]
    MonitorIndexOutOfRange {
        /// The requested index
        index: usize,
        /// Number of monitors in the inventory
        count: usize,
    },

    /// The backend reported no name for the monitor
    #[error("monitor name not available")]
    NameUnavailable,

    /// The backend could not report the monitor's current video mode
    #[error("current video mode not available")]
    ModeUnavailable,

    /// The backend could not read the monitor's gamma ramp
    #[error("gamma ramp not available")]
    GammaUnavailable,
}

/// Shorthand for results carrying this crate's [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_is_user_facing() {
        let err = Error::MonitorIndexOutOfRange { index: 5, count: 2 };
        assert_eq!(err.to_string(), "Monitor #5 not available.");
    }

    #[test]
    fn init_failure_carries_reason() {
        let err = Error::BackendInitFailure("no display".into());
        assert_eq!(err.to_string(), "display backend failed to initialize: no display");
    }
}
