/// Configuration errors. Fatal at startup: an explicitly supplied value that
/// fails to parse is never replaced by a default.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid duration {value:?}: expected <digits><d|h|m>, e.g. \"7d\"")]
    InvalidDuration { value: String },

    #[error("invalid weight {name} = {value}: must lie within [0, 1]")]
    InvalidWeight { name: String, value: f64 },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("failed to parse configuration: {reason}")]
    Parse { reason: String },
}
