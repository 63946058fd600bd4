use thiserror::Error;

pub type DmResult<T> = Result<T, DmError>;

#[derive(Error, Debug)]
pub enum DmError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
