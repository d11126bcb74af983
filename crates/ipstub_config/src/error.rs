//! Failures while reading `ipstub.toml`.

/// Why a configuration could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed TOML, an unknown key or a value of the wrong type.
    #[error("invalid configuration: {0}")]
    ParseError(String),

    /// The defaults could not be turned into TOML.
    #[error("cannot write default configuration: {0}")]
    SerializeError(String),

    /// A setting that must be non-blank is blank.
    #[error("`{0}` must not be empty")]
    MissingField(String),

    /// A setting is present but unusable.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let cases = [
            (
                ConfigError::MissingField("clock.name".into()),
                "`clock.name` must not be empty",
            ),
            (
                ConfigError::ValidationError("clock.period_ns must be positive".into()),
                "invalid configuration: clock.period_ns must be positive",
            ),
        ];
        for (err, text) in cases {
            assert_eq!(err.to_string(), text);
        }
    }

    #[test]
    fn io_errors_convert() {
        let err: ConfigError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(matches!(err, ConfigError::IoError(_)));
        assert!(err.to_string().starts_with("cannot read configuration"));
    }
}
