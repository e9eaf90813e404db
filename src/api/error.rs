use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("{field} is too large for safe calculation")]
    TooLarge { field: &'static str },

    #[error("{field} must be a finite percent greater than -100, got {value}")]
    InvalidRate { field: &'static str, value: f64 },
}
