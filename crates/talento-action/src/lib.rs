//! Action layer for Talento.
//!
//! Holds the catalogue of named, permission-gated actions the chat layer can
//! invoke, and the dispatcher that authorizes and runs them.

pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod permission;
pub mod registry;
pub mod types;

pub use descriptor::{ActionDescriptor, ActionDescriptorBuilder};
pub use dispatcher::Dispatcher;
pub use error::{ActionError, DispatchError, RegistryError};
pub use handler::documents::register_document_actions;
pub use handler::{handler_fn, ActionHandler};
pub use permission::{is_authorized, PermissionGate};
pub use registry::ActionRegistry;
pub use types::{ActionParams, ActionResult, ActionSummary, ParamSpec};
