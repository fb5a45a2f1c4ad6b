use thiserror::Error;

#[derive(Error, Debug)]
pub enum WendaError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(Box<csv::Error>),

    #[error("Data file not found: {0}")]
    MissingDataFile(String),

    #[error("Unrecognized {setting} value: {value}")]
    InvalidPreference { setting: &'static str, value: String },

    #[error("WendaError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for WendaError {
    fn from(error: std::io::Error) -> Self {
        WendaError::Io(Box::new(error))
    }
}

impl From<csv::Error> for WendaError {
    fn from(error: csv::Error) -> Self {
        WendaError::Csv(Box::new(error))
    }
}
