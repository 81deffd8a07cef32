//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use csv::Error as CsvError;
use serde_json::Error as JsonError;
use sitecode_domain::SiteCodeError;
use tokio::task::JoinError;
use toml::de::Error as TomlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SiteCodeError);

impl From<InfraError> for SiteCodeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SiteCodeError> for InfraError {
    fn from(value: SiteCodeError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSiteCodeError {
    fn into_sitecode(self) -> SiteCodeError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → SiteCodeError */
/* -------------------------------------------------------------------------- */

impl IntoSiteCodeError for IoError {
    fn into_sitecode(self) -> SiteCodeError {
        match self.kind() {
            ErrorKind::NotFound => SiteCodeError::Io(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => SiteCodeError::Io(format!("permission denied: {self}")),
            ErrorKind::InvalidData => {
                SiteCodeError::InvalidInput(format!("file is not valid UTF-8 text: {self}"))
            }
            _ => SiteCodeError::Io(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_sitecode())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json / toml / csv → SiteCodeError */
/* -------------------------------------------------------------------------- */

impl IntoSiteCodeError for JsonError {
    fn into_sitecode(self) -> SiteCodeError {
        if self.is_io() {
            SiteCodeError::Io(self.to_string())
        } else {
            SiteCodeError::Serialization(format!("JSON: {self}"))
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_sitecode())
    }
}

impl IntoSiteCodeError for TomlError {
    fn into_sitecode(self) -> SiteCodeError {
        SiteCodeError::Serialization(format!("TOML: {}", self.message()))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        InfraError(value.into_sitecode())
    }
}

impl IntoSiteCodeError for CsvError {
    fn into_sitecode(self) -> SiteCodeError {
        if self.is_io_error() {
            SiteCodeError::Io(self.to_string())
        } else {
            SiteCodeError::Serialization(format!("CSV: {self}"))
        }
    }
}

impl From<CsvError> for InfraError {
    fn from(value: CsvError) -> Self {
        InfraError(value.into_sitecode())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → SiteCodeError */
/* -------------------------------------------------------------------------- */

impl IntoSiteCodeError for JoinError {
    fn into_sitecode(self) -> SiteCodeError {
        if self.is_cancelled() {
            SiteCodeError::Cancelled("task was cancelled".into())
        } else {
            SiteCodeError::BatchFailure(format!("task panicked: {self}"))
        }
    }
}

impl From<JoinError> for InfraError {
    fn from(value: JoinError) -> Self {
        InfraError(value.into_sitecode())
    }
}

/// Map any convertible infrastructure error straight into the domain error.
pub fn map_infra_error<E>(err: E) -> SiteCodeError
where
    InfraError: From<E>,
{
    InfraError::from(err).into()
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
