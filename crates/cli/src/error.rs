//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: simulation error (bad dimensions, attractors or sink bounds)
//! - 11: I/O error (PNG write, recipe read)
//! - 12: input error (bad palette, bad or out-of-range params)
//! - 13: serialization error

use gravity_basin_core::BasinError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A configuration or simulation error from the core.
    Basin(BasinError),
    /// An I/O error (image write, recipe file read).
    Io(String),
    /// A user input error (unknown palette, malformed JSON params).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Basin(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Basin(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<BasinError> for CliError {
    fn from(e: BasinError) -> Self {
        match e {
            BasinError::Io(msg) => CliError::Io(msg),
            BasinError::UnknownPalette(_) | BasinError::InvalidParam { .. } => {
                CliError::Input(e.to_string())
            }
            other => CliError::Basin(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basin_error_exit_code_is_10() {
        let err = CliError::Basin(BasinError::InvalidDimensions);
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        assert_eq!(CliError::Io("write failed".into()).exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        assert_eq!(CliError::Input("bad params".into()).exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        assert_eq!(CliError::Serialization("json fail".into()).exit_code(), 13);
    }

    #[test]
    fn from_basin_io_routes_to_cli_io() {
        let cli_err = CliError::from(BasinError::Io("disk full".into()));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("disk full"));
    }

    #[test]
    fn from_unknown_palette_routes_to_input() {
        let cli_err = CliError::from(BasinError::UnknownPalette("sepia".into()));
        assert_eq!(cli_err.exit_code(), 12);
        assert!(cli_err.to_string().contains("sepia"));
    }

    #[test]
    fn from_invalid_param_routes_to_input() {
        let cli_err = CliError::from(BasinError::invalid_param("zoom", "must be positive"));
        assert_eq!(cli_err.exit_code(), 12);
        assert!(cli_err.to_string().contains("zoom"));
    }

    #[test]
    fn from_invalid_dimensions_stays_basin() {
        let cli_err = CliError::from(BasinError::InvalidDimensions);
        assert!(matches!(cli_err, CliError::Basin(BasinError::InvalidDimensions)));
        assert_eq!(cli_err.exit_code(), 10);
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
