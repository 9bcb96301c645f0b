use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("platform rejected {operation}: {message}")]
    Platform {
        operation: &'static str,
        message: String,
    },
}

impl NotifyError {
    pub fn platform(operation: &'static str, message: impl Into<String>) -> Self {
        NotifyError::Platform {
            operation,
            message: message.into(),
        }
    }
}

pub type Result<T, E = NotifyError> = std::result::Result<T, E>;
