//! Action handler trait and the built-in handler modules.
//!
//! Every action implementation satisfies [`ActionHandler`]. Plain closures
//! are adapted with [`handler_fn`].

pub mod documents;

use std::sync::Arc;

use async_trait::async_trait;
use talento_core::types::CallerContext;

use crate::error::ActionError;
use crate::types::{ActionParams, ActionResult};

/// The single interface every action implementation satisfies.
///
/// Handlers receive the parameters already validated for presence and the
/// caller already authorized; they apply their own tenant scoping from
/// `caller.company_id`.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn execute(
        &self,
        params: &ActionParams,
        caller: &CallerContext,
    ) -> Result<ActionResult, ActionError>;
}

/// Adapter running a synchronous closure as an [`ActionHandler`].
pub struct FnHandler<F>(F);

#[async_trait]
impl<F> ActionHandler for FnHandler<F>
where
    F: Fn(&ActionParams, &CallerContext) -> Result<ActionResult, ActionError> + Send + Sync,
{
    async fn execute(
        &self,
        params: &ActionParams,
        caller: &CallerContext,
    ) -> Result<ActionResult, ActionError> {
        (self.0)(params, caller)
    }
}

/// Wrap a closure as a shareable handler.
pub fn handler_fn<F>(f: F) -> Arc<dyn ActionHandler>
where
    F: Fn(&ActionParams, &CallerContext) -> Result<ActionResult, ActionError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnHandler(f))
}
