use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Country not in result: {0}")]
    CountryNotInResult(String),

    #[error("Unknown origin country: {0}")]
    UnknownOrigin(String),

    #[error("Unknown year: {0}")]
    UnknownYear(i64),

    #[error("Unknown filter scope: {0}")]
    UnknownScope(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("InvalidData: {0}")]
    InvalidData(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FlowError {
    /// True when the selection is valid but the chart has nothing to show
    /// for it. The dashboard renders these as "no data" instead of failing.
    pub fn is_no_data(&self) -> bool {
        matches!(self, FlowError::CountryNotInResult(_))
    }

    /// True for errors caused by the caller's selection rather than the data.
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            FlowError::UnknownCategory(_)
                | FlowError::UnknownOrigin(_)
                | FlowError::UnknownYear(_)
                | FlowError::UnknownScope(_)
        )
    }
}

#[cfg(feature = "python")]
impl From<FlowError> for pyo3::PyErr {
    fn from(err: FlowError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyRuntimeError, PyValueError};

        if err.is_selection_error() {
            PyValueError::new_err(err.to_string())
        } else {
            PyRuntimeError::new_err(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_country_not_in_result_is_no_data() {
        assert!(FlowError::CountryNotInResult("Syria".into()).is_no_data());
        assert!(!FlowError::UnknownYear(1999).is_no_data());
        assert!(!FlowError::InvalidData("x".into()).is_no_data());
    }

    #[test]
    fn selection_errors_are_classified() {
        assert!(FlowError::UnknownCategory("Migrants".into()).is_selection_error());
        assert!(FlowError::UnknownOrigin("Atlantis".into()).is_selection_error());
        assert!(!FlowError::MissingColumn("Year".into()).is_selection_error());
    }
}
