//! Conversions from external infrastructure errors into domain errors.

use crier_domain::CrierError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CrierError);

impl From<InfraError> for CrierError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CrierError> for InfraError {
    fn from(value: CrierError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCrierError {
    fn into_crier(self) -> CrierError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CrierError */
/* -------------------------------------------------------------------------- */

impl IntoCrierError for HttpError {
    fn into_crier(self) -> CrierError {
        if self.is_timeout() {
            return CrierError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return CrierError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => CrierError::Auth(message),
                404 => CrierError::NotFound(message),
                429 => CrierError::Network(message),
                400..=499 => CrierError::InvalidInput(message),
                _ => CrierError::Network(message),
            };
        }

        if self.is_decode() {
            return CrierError::InvalidInput(format!("failed to decode HTTP response: {self}"));
        }

        CrierError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_crier())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
