//! Dispatcher: authorizes and runs actions by name.
//!
//! This is the failure boundary between action implementations and the chat
//! layer. Every outcome leaves here as an `ActionResult` or a `DispatchError`.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use talento_core::types::CallerContext;
use tracing::Instrument;

use crate::error::{ActionError, DispatchError};
use crate::permission::PermissionGate;
use crate::registry::ActionRegistry;
use crate::types::{ActionParams, ActionResult, ActionSummary};

/// Runs registered actions on behalf of callers.
///
/// Owns the registry read-only; cloning is cheap and clones share it, so one
/// dispatcher can serve concurrent requests. No retries or timeouts are
/// applied: a slow handler stalls its caller unless the caller sets a deadline.
/// A panicking handler is reported as [`DispatchError::Execution`].
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ActionRegistry>,
}

impl Dispatcher {
    /// Freeze `registry` and start serving dispatches from it.
    pub fn new(registry: ActionRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Actions `caller` may run, for building the intent-resolution prompt.
    pub fn available_actions(&self, caller: &CallerContext) -> Vec<ActionSummary> {
        self.registry.catalogue(&caller.roles)
    }

    /// Run `action_name` with `params` for `caller`.
    ///
    /// Checks happen in order: lookup, permissions, required parameters. The
    /// handler runs only if all pass. Its result is returned unmodified; its
    /// error is wrapped in [`DispatchError::Execution`] and the cause logged.
    pub async fn dispatch(
        &self,
        action_name: &str,
        params: &ActionParams,
        caller: &CallerContext,
    ) -> Result<ActionResult, DispatchError> {
        let span = tracing::info_span!("dispatch", action = %action_name);
        self.dispatch_inner(action_name, params, caller)
            .instrument(span)
            .await
    }

    async fn dispatch_inner(
        &self,
        action_name: &str,
        params: &ActionParams,
        caller: &CallerContext,
    ) -> Result<ActionResult, DispatchError> {
        let descriptor = self.registry.get(action_name).map_err(|_| {
            tracing::warn!("Unknown action requested");
            DispatchError::ActionNotFound(action_name.to_string())
        })?;

        if let Err(e) = PermissionGate::check(descriptor, caller) {
            tracing::warn!(user_id = ?caller.user_id, "Caller not authorized for action");
            return Err(e);
        }

        if let Some(missing) = descriptor
            .required_parameters()
            .find(|p| !params.is_present(&p.name))
        {
            tracing::info!(parameter = %missing.name, "Required parameter missing");
            return Err(DispatchError::MissingParameter {
                action: action_name.to_string(),
                parameter: missing.name.clone(),
            });
        }

        let outcome = AssertUnwindSafe(descriptor.handler().execute(params, caller))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(ActionError::Panicked(panic_message(payload))));

        match outcome {
            Ok(result) => {
                tracing::info!(success = result.success, "Action completed");
                Ok(result)
            }
            Err(e) => {
                tracing::error!(error = %e, "Action handler failed");
                Err(DispatchError::Execution {
                    action: action_name.to_string(),
                    source: e,
                })
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
