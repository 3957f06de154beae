//! Action descriptors: the static metadata plus handler for one action.

use std::fmt;
use std::sync::Arc;

use talento_core::types::{Permission, PermissionSet};

use crate::handler::ActionHandler;
use crate::types::{ActionSummary, ParamSpec};

/// Immutable description of one invocable action.
///
/// Built once with [`ActionDescriptor::builder`] during startup and never
/// mutated afterwards; fields are only reachable through getters.
#[derive(Clone)]
pub struct ActionDescriptor {
    name: String,
    description: String,
    required_permissions: PermissionSet,
    parameters: Vec<ParamSpec>,
    example: String,
    handler: Arc<dyn ActionHandler>,
}

impl ActionDescriptor {
    pub fn builder(name: impl Into<String>, handler: Arc<dyn ActionHandler>) -> ActionDescriptorBuilder {
        ActionDescriptorBuilder {
            name: name.into(),
            description: String::new(),
            required_permissions: PermissionSet::new(),
            parameters: Vec::new(),
            example: String::new(),
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Empty means anyone may run the action.
    pub fn required_permissions(&self) -> &PermissionSet {
        &self.required_permissions
    }

    /// Declared parameters in declaration order.
    pub fn parameters(&self) -> &[ParamSpec] {
        &self.parameters
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ParamSpec> {
        self.parameters.iter().filter(|p| !p.optional)
    }

    pub fn example(&self) -> &str {
        &self.example
    }

    pub fn handler(&self) -> &Arc<dyn ActionHandler> {
        &self.handler
    }

    pub fn summary(&self) -> ActionSummary {
        ActionSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameters.clone(),
            example: self.example.clone(),
        }
    }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("name", &self.name)
            .field("required_permissions", &self.required_permissions)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ActionDescriptor`].
pub struct ActionDescriptorBuilder {
    name: String,
    description: String,
    required_permissions: PermissionSet,
    parameters: Vec<ParamSpec>,
    example: String,
    handler: Arc<dyn ActionHandler>,
}

impl ActionDescriptorBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Roles allowed to run the action. Calling more than once accumulates.
    pub fn permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.required_permissions.extend(permissions);
        self
    }

    pub fn required_param(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.param(name, description, false)
    }

    pub fn optional_param(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.param(name, description, true)
    }

    fn param(mut self, name: impl Into<String>, description: impl Into<String>, optional: bool) -> Self {
        let name = name.into();
        let spec = ParamSpec {
            name: name.clone(),
            description: description.into(),
            optional,
        };
        // Redeclaring a parameter replaces it in place.
        match self.parameters.iter_mut().find(|p| p.name == name) {
            Some(existing) => *existing = spec,
            None => self.parameters.push(spec),
        }
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    pub fn build(self) -> ActionDescriptor {
        ActionDescriptor {
            name: self.name,
            description: self.description,
            required_permissions: self.required_permissions,
            parameters: self.parameters,
            example: self.example,
            handler: self.handler,
        }
    }
}
