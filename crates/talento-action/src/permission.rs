//! Role-based authorization for actions.

use talento_core::types::{CallerContext, PermissionSet};

use crate::descriptor::ActionDescriptor;
use crate::error::DispatchError;

/// True iff `required` is empty or shares at least one tag with `caller_roles`.
pub fn is_authorized(required: &PermissionSet, caller_roles: &PermissionSet) -> bool {
    required.is_empty() || !required.is_disjoint(caller_roles)
}

/// Gate applied by the dispatcher before any handler runs.
pub struct PermissionGate;

impl PermissionGate {
    pub fn allows(descriptor: &ActionDescriptor, caller: &CallerContext) -> bool {
        is_authorized(descriptor.required_permissions(), &caller.roles)
    }

    /// Fails with a generic denial that does not name the required roles.
    pub fn check(descriptor: &ActionDescriptor, caller: &CallerContext) -> Result<(), DispatchError> {
        if Self::allows(descriptor, caller) {
            Ok(())
        } else {
            Err(DispatchError::PermissionDenied(descriptor.name().to_string()))
        }
    }
}
