//! Error types for the action layer.

use talento_core::error::TalentoError;
use talento_docs::DocumentError;

/// Errors raised by action handlers.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Action handler failed: {0}")]
    HandlerFailed(String),
    #[error("Action handler panicked: {0}")]
    Panicked(String),
    #[error("Invalid value for parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },
    #[error("Document service error: {0}")]
    Document(#[from] DocumentError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from registry lookups and registration.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Action not registered: {0}")]
    NotFound(String),
    #[error("Action already registered: {0}")]
    Duplicate(String),
}

/// Errors returned by [`Dispatcher::dispatch`](crate::Dispatcher::dispatch).
///
/// `Display` is meant for logs. Use [`DispatchError::user_message`] for
/// anything shown to the end user.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Action not found: {0}")]
    ActionNotFound(String),
    #[error("Permission denied for action: {0}")]
    PermissionDenied(String),
    #[error("Missing required parameter '{parameter}' for action {action}")]
    MissingParameter { action: String, parameter: String },
    #[error("Action {action} failed: {source}")]
    Execution {
        action: String,
        source: ActionError,
    },
}

impl DispatchError {
    /// Message safe to show the person chatting.
    ///
    /// Never reveals required permissions or the underlying failure cause.
    pub fn user_message(&self) -> String {
        match self {
            DispatchError::ActionNotFound(_) => {
                "Lo siento, esa acción no está disponible.".to_string()
            }
            DispatchError::PermissionDenied(_) => {
                "No tienes permiso para realizar esta acción.".to_string()
            }
            DispatchError::MissingParameter { parameter, .. } => format!(
                "Necesito el dato \"{}\" para continuar. ¿Puedes proporcionarlo?",
                parameter
            ),
            DispatchError::Execution { .. } => {
                "No fue posible completar la acción. Intenta de nuevo más tarde.".to_string()
            }
        }
    }

    /// Whether re-prompting the user can fix the request.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DispatchError::MissingParameter { .. })
    }
}

impl From<RegistryError> for TalentoError {
    fn from(err: RegistryError) -> Self {
        TalentoError::Action(err.to_string())
    }
}
