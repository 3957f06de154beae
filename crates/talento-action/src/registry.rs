//! The action catalogue.

use std::collections::HashMap;
use std::fmt::Write as _;

use talento_core::config::DuplicatePolicy;
use talento_core::types::PermissionSet;
use tracing::{debug, warn};

use crate::descriptor::ActionDescriptor;
use crate::error::RegistryError;
use crate::permission::is_authorized;
use crate::types::ActionSummary;

/// Catalogue of named actions, keyed by action name.
///
/// Built mutably during a single-threaded startup registration phase, then
/// handed to a [`Dispatcher`](crate::Dispatcher), which owns it behind an
/// `Arc` and only reads from it. Every registration therefore happens before
/// any dispatch; there is no way to register through a running dispatcher.
///
/// Listing order is insertion order. Overwriting a name keeps its original
/// position.
#[derive(Default)]
pub struct ActionRegistry {
    actions: Vec<ActionDescriptor>,
    index: HashMap<String, usize>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `descriptor`, replacing any action with the same name.
    ///
    /// Later registrations win. Replacements are logged so that one module
    /// shadowing another is visible at startup.
    pub fn register(&mut self, descriptor: ActionDescriptor) {
        match self.index.get(descriptor.name()) {
            Some(&slot) => {
                warn!(action = %descriptor.name(), "Action re-registered; replacing previous definition");
                self.actions[slot] = descriptor;
            }
            None => {
                debug!(action = %descriptor.name(), "Action registered");
                self.index
                    .insert(descriptor.name().to_string(), self.actions.len());
                self.actions.push(descriptor);
            }
        }
    }

    /// Insert `descriptor`, failing if the name is already taken.
    pub fn try_register(&mut self, descriptor: ActionDescriptor) -> Result<(), RegistryError> {
        if self.contains(descriptor.name()) {
            return Err(RegistryError::Duplicate(descriptor.name().to_string()));
        }
        self.register(descriptor);
        Ok(())
    }

    /// Register according to the configured duplicate policy.
    pub fn register_with_policy(
        &mut self,
        descriptor: ActionDescriptor,
        policy: DuplicatePolicy,
    ) -> Result<(), RegistryError> {
        match policy {
            DuplicatePolicy::LastWriterWins => {
                self.register(descriptor);
                Ok(())
            }
            DuplicatePolicy::Reject => self.try_register(descriptor),
        }
    }

    /// Look up an action by exact name.
    pub fn get(&self, name: &str) -> Result<&ActionDescriptor, RegistryError> {
        self.index
            .get(name)
            .map(|&slot| &self.actions[slot])
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.actions.iter().map(ActionDescriptor::name).collect()
    }

    /// All descriptors, or only those runnable by `roles` when a filter is given.
    pub fn list_all(&self, roles: Option<&PermissionSet>) -> Vec<&ActionDescriptor> {
        self.actions
            .iter()
            .filter(|d| roles.map_or(true, |r| is_authorized(d.required_permissions(), r)))
            .collect()
    }

    /// Summaries of the actions runnable by `roles`.
    pub fn catalogue(&self, roles: &PermissionSet) -> Vec<ActionSummary> {
        self.list_all(Some(roles))
            .into_iter()
            .map(ActionDescriptor::summary)
            .collect()
    }

    /// Plain-text catalogue for `roles`, one block per action.
    ///
    /// This is what the intent-resolution prompt lists as available actions.
    pub fn render_catalogue(&self, roles: &PermissionSet) -> String {
        let mut out = String::new();
        for action in self.list_all(Some(roles)) {
            let _ = writeln!(out, "- {}: {}", action.name(), action.description());
            if !action.parameters().is_empty() {
                let _ = writeln!(out, "  parámetros:");
                for p in action.parameters() {
                    let marker = if p.optional { " (opcional)" } else { "" };
                    let _ = writeln!(out, "    {}{}: {}", p.name, marker, p.description);
                }
            }
            if !action.example().is_empty() {
                let _ = writeln!(out, "  ejemplo: \"{}\"", action.example());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{handler_fn, ActionHandler};
    use crate::types::ActionResult;
    use std::sync::Arc;
    use talento_core::types::Permission;

    fn replying(msg: &'static str) -> Arc<dyn ActionHandler> {
        handler_fn(move |_, _| Ok(ActionResult::ok(msg)))
    }

    fn action(name: &str, perms: &[Permission]) -> ActionDescriptor {
        ActionDescriptor::builder(name, replying("ok"))
            .description(format!("{} description", name))
            .permissions(perms.iter().copied())
            .build()
    }

    fn roles(perms: &[Permission]) -> PermissionSet {
        perms.iter().copied().collect()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ActionRegistry::new();
        assert!(registry.is_empty());
        registry.register(action("buscar_en_documentos", &[Permission::Empleado]));

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("buscar_en_documentos"));
        assert_eq!(
            registry.get("buscar_en_documentos").unwrap().name(),
            "buscar_en_documentos"
        );
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let registry = ActionRegistry::new();
        let err = registry.get("nope").unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(ref n) if n == "nope"));
    }

    #[tokio::test]
    async fn test_last_writer_wins_keeps_position() {
        let mut registry = ActionRegistry::new();
        registry.register(ActionDescriptor::builder("a", replying("first")).build());
        registry.register(action("b", &[]));
        registry.register(ActionDescriptor::builder("a", replying("second")).build());

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["a", "b"]);

        let result = registry
            .get("a")
            .unwrap()
            .handler()
            .execute(&Default::default(), &Default::default())
            .await
            .unwrap();
        assert_eq!(result.message, "second");
    }

    #[test]
    fn test_try_register_rejects_duplicates() {
        let mut registry = ActionRegistry::new();
        registry.try_register(action("a", &[])).unwrap();
        let err = registry.try_register(action("a", &[Permission::Admin])).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(ref n) if n == "a"));
        // The original entry is untouched.
        assert!(registry.get("a").unwrap().required_permissions().is_empty());
    }

    #[test]
    fn test_register_with_policy() {
        let mut registry = ActionRegistry::new();
        registry
            .register_with_policy(action("a", &[]), DuplicatePolicy::LastWriterWins)
            .unwrap();
        registry
            .register_with_policy(action("a", &[Permission::Hr]), DuplicatePolicy::LastWriterWins)
            .unwrap();
        assert!(registry
            .get("a")
            .unwrap()
            .required_permissions()
            .contains(&Permission::Hr));

        assert!(registry
            .register_with_policy(action("a", &[]), DuplicatePolicy::Reject)
            .is_err());
    }

    #[test]
    fn test_list_all_unfiltered_is_insertion_order() {
        let mut registry = ActionRegistry::new();
        for name in ["c", "a", "b"] {
            registry.register(action(name, &[Permission::Admin]));
        }
        let names: Vec<&str> = registry.list_all(None).iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_list_all_filtered_by_roles() {
        let mut registry = ActionRegistry::new();
        registry.register(action("open", &[]));
        registry.register(action("hr_only", &[Permission::Hr]));
        registry.register(action("staff", &[Permission::Empleado, Permission::Jefe]));
        registry.register(action("admin_only", &[Permission::Admin]));

        let names: Vec<&str> = registry
            .list_all(Some(&roles(&[Permission::Empleado])))
            .iter()
            .map(|d| d.name())
            .collect();
        assert_eq!(names, vec!["open", "staff"]);

        let names: Vec<&str> = registry
            .list_all(Some(&roles(&[])))
            .iter()
            .map(|d| d.name())
            .collect();
        assert_eq!(names, vec!["open"]);
    }

    #[test]
    fn test_catalogue_omits_unauthorized() {
        let mut registry = ActionRegistry::new();
        registry.register(action("open", &[]));
        registry.register(action("hr_only", &[Permission::Hr]));

        let catalogue = registry.catalogue(&roles(&[Permission::Jefe]));
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue[0].name, "open");
    }

    #[test]
    fn test_render_catalogue() {
        let mut registry = ActionRegistry::new();
        registry.register(
            ActionDescriptor::builder("buscar_en_documentos", replying("ok"))
                .description("Busca en documentos")
                .permissions([Permission::Empleado])
                .required_param("consulta", "Texto a buscar")
                .optional_param("limite", "Máximo de resultados")
                .example("¿Qué dice la política de vacaciones?")
                .build(),
        );
        registry.register(action("secreto", &[Permission::Admin]));

        let text = registry.render_catalogue(&roles(&[Permission::Empleado]));
        assert_eq!(
            text,
            "- buscar_en_documentos: Busca en documentos\n\
             \x20 parámetros:\n\
             \x20   consulta: Texto a buscar\n\
             \x20   limite (opcional): Máximo de resultados\n\
             \x20 ejemplo: \"¿Qué dice la política de vacaciones?\"\n"
        );
        assert!(!text.contains("secreto"));
    }
}
