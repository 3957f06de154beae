//! Document actions: semantic search, listing, and lookup.
//!
//! Registered at startup by [`register_document_actions`]. Each handler
//! scopes its reads to the caller's company.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use talento_core::config::ActionsConfig;
use talento_core::types::{CallerContext, Permission};
use talento_docs::{DocumentError, DocumentFilter, DocumentService, DocumentType};

use crate::descriptor::ActionDescriptor;
use crate::error::{ActionError, RegistryError};
use crate::handler::ActionHandler;
use crate::registry::ActionRegistry;
use crate::types::{ActionParams, ActionResult};

pub const BUSCAR_EN_DOCUMENTOS: &str = "buscar_en_documentos";
pub const LISTAR_DOCUMENTOS: &str = "listar_documentos";
pub const OBTENER_DOCUMENTO: &str = "obtener_documento";

const ALL_STAFF: [Permission; 4] = [
    Permission::Admin,
    Permission::Hr,
    Permission::Jefe,
    Permission::Empleado,
];

const DOCUMENT_READERS: [Permission; 3] = [Permission::Admin, Permission::Hr, Permission::Jefe];

/// Register the document actions into `registry` using the configured
/// search limits and duplicate policy.
pub fn register_document_actions(
    registry: &mut ActionRegistry,
    service: Arc<dyn DocumentService>,
    settings: &ActionsConfig,
) -> Result<(), RegistryError> {
    let policy = settings.duplicate_policy;

    registry.register_with_policy(
        ActionDescriptor::builder(
            BUSCAR_EN_DOCUMENTOS,
            Arc::new(SearchDocumentsHandler {
                service: Arc::clone(&service),
                default_limit: settings.default_search_limit,
                max_limit: settings.max_search_limit,
            }),
        )
        .description(
            "Busca información en los documentos de la empresa (políticas, reglamentos, \
             manuales, contratos) y devuelve los fragmentos más relevantes.",
        )
        .permissions(ALL_STAFF)
        .required_param("consulta", "Pregunta o texto a buscar")
        .optional_param("limite", "Número máximo de resultados")
        .example("¿Cuántos días de vacaciones me corresponden?")
        .build(),
        policy,
    )?;

    registry.register_with_policy(
        ActionDescriptor::builder(
            LISTAR_DOCUMENTOS,
            Arc::new(ListDocumentsHandler {
                service: Arc::clone(&service),
            }),
        )
        .description("Lista los documentos disponibles, opcionalmente filtrados por tipo.")
        .permissions(ALL_STAFF)
        .optional_param(
            "tipo",
            "Tipo de documento: politica, reglamento, contrato, manual, formato u otro",
        )
        .example("¿Qué manuales hay disponibles?")
        .build(),
        policy,
    )?;

    registry.register_with_policy(
        ActionDescriptor::builder(OBTENER_DOCUMENTO, Arc::new(GetDocumentHandler { service }))
            .description("Muestra el contenido completo de un documento por su título o identificador.")
            .permissions(DOCUMENT_READERS)
            .required_param("documento", "Título o identificador del documento")
            .example("Muéstrame el reglamento interior de trabajo")
            .build(),
        policy,
    )?;

    tracing::info!(actions = 3, "Document actions registered");
    Ok(())
}

/// Text value of a required parameter. The dispatcher has already checked
/// presence, so a `None` here means the value has the wrong JSON type.
fn required_text(params: &ActionParams, name: &str) -> Result<String, ActionError> {
    params
        .get_text(name)
        .ok_or_else(|| ActionError::InvalidParameter {
            name: name.to_string(),
            reason: "expected text".to_string(),
        })
}

// =============================================================================
// Search
// =============================================================================

/// Ranked search over the caller's documents.
pub struct SearchDocumentsHandler {
    service: Arc<dyn DocumentService>,
    default_limit: usize,
    max_limit: usize,
}

impl SearchDocumentsHandler {
    fn limit(&self, params: &ActionParams) -> Result<usize, ActionError> {
        if !params.is_present("limite") {
            return Ok(self.default_limit);
        }
        let requested = params
            .get_u64("limite")
            .ok_or_else(|| ActionError::InvalidParameter {
                name: "limite".to_string(),
                reason: "expected a positive whole number".to_string(),
            })?;
        let requested = usize::try_from(requested).unwrap_or(usize::MAX);
        Ok(requested.clamp(1, self.max_limit.max(1)))
    }
}

#[async_trait]
impl ActionHandler for SearchDocumentsHandler {
    async fn execute(
        &self,
        params: &ActionParams,
        caller: &CallerContext,
    ) -> Result<ActionResult, ActionError> {
        let query = required_text(params, "consulta")?;
        let limit = self.limit(params)?;

        let hits = self.service.search(&query, caller.company_id, limit).await?;
        tracing::info!(hits = hits.len(), limit, "Document search served");

        if hits.is_empty() {
            return Ok(ActionResult::ok(format!(
                "No encontré documentos relacionados con \"{}\".",
                query
            ))
            .with_data(json!([])));
        }

        let message = format!(
            "Encontré {} resultado(s) relacionados con \"{}\".",
            hits.len(),
            query
        );
        Ok(ActionResult::ok(message).with_data(serde_json::to_value(&hits)?))
    }
}

// =============================================================================
// Listing
// =============================================================================

/// Lists documents visible to the caller.
pub struct ListDocumentsHandler {
    service: Arc<dyn DocumentService>,
}

#[async_trait]
impl ActionHandler for ListDocumentsHandler {
    async fn execute(
        &self,
        params: &ActionParams,
        caller: &CallerContext,
    ) -> Result<ActionResult, ActionError> {
        let doc_type = params
            .get_str("tipo")
            .map(|t| {
                t.parse::<DocumentType>()
                    .map_err(|reason| ActionError::InvalidParameter {
                        name: "tipo".to_string(),
                        reason,
                    })
            })
            .transpose()?;

        let documents = self
            .service
            .list_documents(DocumentFilter {
                doc_type,
                company_id: caller.company_id,
            })
            .await?;

        let message = match (documents.len(), doc_type) {
            (0, Some(t)) => format!("No hay documentos de tipo {}.", t),
            (0, None) => "No hay documentos disponibles.".to_string(),
            (n, Some(t)) => format!("Hay {} documento(s) de tipo {}.", n, t),
            (n, None) => format!("Hay {} documento(s) disponibles.", n),
        };
        Ok(ActionResult::ok(message).with_data(serde_json::to_value(&documents)?))
    }
}

// =============================================================================
// Lookup
// =============================================================================

/// Fetches one document by ID or title.
pub struct GetDocumentHandler {
    service: Arc<dyn DocumentService>,
}

#[async_trait]
impl ActionHandler for GetDocumentHandler {
    async fn execute(
        &self,
        params: &ActionParams,
        caller: &CallerContext,
    ) -> Result<ActionResult, ActionError> {
        let key = required_text(params, "documento")?;

        match self.service.get_document(&key, caller.company_id).await {
            Ok(doc) => Ok(ActionResult::ok(doc.title.clone()).with_data(json!({
                "id": doc.id,
                "title": doc.title,
                "doc_type": doc.doc_type,
                "content": doc.content,
            }))),
            Err(DocumentError::NotFound(_)) => Ok(ActionResult::failure(format!(
                "No encontré el documento \"{}\".",
                key
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talento_docs::{InMemoryDocumentStore, NewDocument};
    use uuid::Uuid;

    fn store(company: Uuid) -> Arc<InMemoryDocumentStore> {
        Arc::new(InMemoryDocumentStore::with_documents(vec![
            NewDocument {
                id: None,
                title: "Política de vacaciones".to_string(),
                doc_type: DocumentType::Politica,
                company_id: None,
                content: "Doce días de vacaciones al cumplir un año.".to_string(),
            },
            NewDocument {
                id: None,
                title: "Manual de inducción".to_string(),
                doc_type: DocumentType::Manual,
                company_id: Some(company),
                content: "Horario, vacaciones y prestaciones.".to_string(),
            },
            NewDocument {
                id: None,
                title: "Manual ajeno".to_string(),
                doc_type: DocumentType::Manual,
                company_id: Some(Uuid::new_v4()),
                content: "Vacaciones de otra empresa.".to_string(),
            },
        ]))
    }

    fn search_handler(service: Arc<InMemoryDocumentStore>) -> SearchDocumentsHandler {
        SearchDocumentsHandler {
            service,
            default_limit: 5,
            max_limit: 20,
        }
    }

    #[test]
    fn test_register_document_actions() {
        let mut registry = ActionRegistry::new();
        register_document_actions(
            &mut registry,
            store(Uuid::new_v4()),
            &ActionsConfig::default(),
        )
        .unwrap();
        assert_eq!(
            registry.names(),
            vec![BUSCAR_EN_DOCUMENTOS, LISTAR_DOCUMENTOS, OBTENER_DOCUMENTO]
        );
        let get = registry.get(OBTENER_DOCUMENTO).unwrap();
        assert!(!get.required_permissions().contains(&Permission::Empleado));
    }

    #[test]
    fn test_register_twice_rejected_under_reject_policy() {
        let settings = ActionsConfig {
            duplicate_policy: talento_core::config::DuplicatePolicy::Reject,
            ..ActionsConfig::default()
        };
        let mut registry = ActionRegistry::new();
        let docs = store(Uuid::new_v4());
        register_document_actions(&mut registry, docs.clone(), &settings).unwrap();
        let err = register_document_actions(&mut registry, docs, &settings).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_search_scoped_to_company() {
        let company = Uuid::new_v4();
        let handler = search_handler(store(company));
        let caller = CallerContext::new([Permission::Empleado]).with_company(company);
        let params = ActionParams::new().with("consulta", "vacaciones");

        let result = handler.execute(&params, &caller).await.unwrap();
        assert!(result.success);
        let hits = result.data.unwrap();
        let titles: Vec<&str> = hits
            .as_array()
            .unwrap()
            .iter()
            .map(|h| h["document"]["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles.len(), 2);
        assert!(!titles.contains(&"Manual ajeno"));
    }

    #[tokio::test]
    async fn test_search_limit_handling() {
        let company = Uuid::new_v4();
        let handler = search_handler(store(company));
        let caller = CallerContext::new([Permission::Empleado]).with_company(company);

        let params = ActionParams::new().with("consulta", "vacaciones").with("limite", "1");
        let result = handler.execute(&params, &caller).await.unwrap();
        assert_eq!(result.data.unwrap().as_array().unwrap().len(), 1);

        // Zero is clamped up to one.
        let params = ActionParams::new().with("consulta", "vacaciones").with("limite", 0);
        let result = handler.execute(&params, &caller).await.unwrap();
        assert_eq!(result.data.unwrap().as_array().unwrap().len(), 1);

        let params = ActionParams::new().with("consulta", "vacaciones").with("limite", "muchos");
        let err = handler.execute(&params, &caller).await.unwrap_err();
        assert!(matches!(err, ActionError::InvalidParameter { ref name, .. } if name == "limite"));
    }

    #[test]
    fn test_limit_clamped_to_max() {
        let handler = search_handler(Arc::new(InMemoryDocumentStore::new()));
        let params = ActionParams::new().with("limite", 500);
        assert_eq!(handler.limit(&params).unwrap(), 20);
        assert_eq!(handler.limit(&ActionParams::new()).unwrap(), 5);
    }

    #[tokio::test]
    async fn test_search_no_results() {
        let handler = search_handler(store(Uuid::new_v4()));
        let params = ActionParams::new().with("consulta", "aguinaldo");
        let result = handler
            .execute(&params, &CallerContext::new([Permission::Hr]))
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.message.contains("No encontré"));
        assert_eq!(result.data, Some(json!([])));
    }

    #[tokio::test]
    async fn test_list_documents_by_type() {
        let company = Uuid::new_v4();
        let handler = ListDocumentsHandler {
            service: store(company),
        };
        let caller = CallerContext::new([Permission::Jefe]).with_company(company);

        let result = handler.execute(&ActionParams::new(), &caller).await.unwrap();
        assert_eq!(result.message, "Hay 2 documento(s) disponibles.");

        let params = ActionParams::new().with("tipo", "manuales");
        let result = handler.execute(&params, &caller).await.unwrap();
        assert_eq!(result.message, "Hay 1 documento(s) de tipo manual.");

        let params = ActionParams::new().with("tipo", "contrato");
        let result = handler.execute(&params, &caller).await.unwrap();
        assert_eq!(result.message, "No hay documentos de tipo contrato.");

        let params = ActionParams::new().with("tipo", "memes");
        let err = handler.execute(&params, &caller).await.unwrap_err();
        assert!(matches!(err, ActionError::InvalidParameter { .. }));
    }

    #[tokio::test]
    async fn test_get_document_found_and_missing() {
        let company = Uuid::new_v4();
        let handler = GetDocumentHandler {
            service: store(company),
        };
        let caller = CallerContext::new([Permission::Hr]).with_company(company);

        let params = ActionParams::new().with("documento", "manual de inducción");
        let result = handler.execute(&params, &caller).await.unwrap();
        assert!(result.success);
        assert_eq!(result.message, "Manual de inducción");
        assert_eq!(
            result.data.unwrap()["content"],
            "Horario, vacaciones y prestaciones."
        );

        let params = ActionParams::new().with("documento", "Manual ajeno");
        let result = handler.execute(&params, &caller).await.unwrap();
        assert!(!result.success);
        assert!(result.message.contains("Manual ajeno"));
    }

    #[tokio::test]
    async fn test_get_document_numeric_key_used_as_text() {
        let handler = GetDocumentHandler {
            service: Arc::new(InMemoryDocumentStore::with_documents(vec![NewDocument {
                id: None,
                title: "42".to_string(),
                doc_type: DocumentType::Formato,
                company_id: None,
                content: "Formato de alta.".to_string(),
            }])),
        };
        let params = ActionParams::new().with("documento", 42);
        let result = handler
            .execute(&params, &CallerContext::new([Permission::Hr]))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.message, "42");
    }

    #[tokio::test]
    async fn test_non_text_required_parameters_rejected() {
        let caller = CallerContext::new([Permission::Hr]);

        let search = search_handler(store(Uuid::new_v4()));
        let params = ActionParams::new().with("consulta", json!(["vacaciones"]));
        let err = search.execute(&params, &caller).await.unwrap_err();
        assert!(matches!(err, ActionError::InvalidParameter { ref name, .. } if name == "consulta"));

        let get = GetDocumentHandler {
            service: store(Uuid::new_v4()),
        };
        let params = ActionParams::new().with("documento", json!({"id": 1}));
        let err = get.execute(&params, &caller).await.unwrap_err();
        assert!(matches!(err, ActionError::InvalidParameter { ref name, .. } if name == "documento"));
    }
}
