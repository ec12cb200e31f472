use thiserror::Error;

/// Startup faults. Once the controller is built nothing else can fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("no global window available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("required element `{0}` is missing from the page")]
    MissingElement(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
}
