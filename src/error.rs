use thiserror::Error;

/// Bad user input, caught before any facility data is touched.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid country code: {0}")]
    InvalidCountry(String),
    #[error("Invalid postal code: {0}")]
    InvalidPostalCode(String),
    #[error("Unsupported facility type: {0} (expected airports or airspaces)")]
    UnsupportedKind(String),
}
