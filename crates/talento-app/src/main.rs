//! Talento application binary - composition root.
//!
//! 1. Load configuration from TOML
//! 2. Initialize tracing
//! 3. Load the document corpus into the in-memory store
//! 4. Run the action registration phase and freeze the registry
//! 5. Execute the requested subcommand against the dispatcher

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use talento_action::{register_document_actions, ActionParams, ActionRegistry, Dispatcher};
use talento_core::config::TalentoConfig;
use talento_core::types::CallerContext;
use talento_docs::InMemoryDocumentStore;

use cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> talento_core::Result<ExitCode> {
    let args = CliArgs::parse();

    // Configuration is read before tracing so its log level can apply.
    // Load errors are reported once the subscriber is up.
    let config_file = args.resolve_config_path();
    let (config, load_error) = if config_file.exists() {
        match TalentoConfig::load(&config_file) {
            Ok(config) => (config, None),
            Err(e) => (TalentoConfig::default(), Some(e)),
        }
    } else {
        (TalentoConfig::default(), None)
    };

    // Tracing. Priority: --log-level > RUST_LOG > config.
    let filter = match args.log_level.as_deref() {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match load_error {
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load config; using defaults"
        ),
        None => tracing::debug!(path = %config_file.display(), "Configuration resolved"),
    }

    // Documents.
    let corpus = args
        .resolve_corpus(config.documents.corpus_path.as_deref())
        .or_else(|| {
            let fallback = cli::expand_home(&config.general.data_dir).join("corpus.json");
            fallback.exists().then_some(fallback)
        });
    let store = match corpus {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading document corpus");
            InMemoryDocumentStore::load_corpus(&path)?
        }
        None => {
            tracing::info!("No document corpus configured; starting with an empty store");
            InMemoryDocumentStore::new()
        }
    };
    tracing::info!(documents = store.len(), "Document store ready");

    // Registration phase. The registry is read-only once the dispatcher owns it.
    let mut registry = ActionRegistry::new();
    register_document_actions(&mut registry, Arc::new(store), &config.actions)?;
    let dispatcher = Dispatcher::new(registry);

    match args.command {
        Command::Actions { roles, json } => {
            let caller = CallerContext::new(roles);
            if json {
                let catalogue = dispatcher.available_actions(&caller);
                println!("{}", serde_json::to_string_pretty(&catalogue)?);
            } else {
                print!("{}", dispatcher.registry().render_catalogue(&caller.roles));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Run {
            action,
            roles,
            company,
            user,
            params,
        } => {
            let mut caller = CallerContext::new(roles);
            if let Some(company) = company {
                caller = caller.with_company(company);
            }
            if let Some(user) = user {
                caller = caller.with_user(user);
            }
            let params: ActionParams = params
                .into_iter()
                .map(|(name, value)| (name, serde_json::Value::String(value)))
                .collect();

            match dispatcher.dispatch(&action, &params, &caller).await {
                Ok(result) => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
