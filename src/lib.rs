//! ProtoGraph
//!
//! A small HTTP service over a property graph:
//! - Neo4j-backed nodes and weighted edges organized into clusters
//! - Bounded-depth neighborhood exploration for the visualization dashboard
//! - Team coupling analytics polled by the BI tool
//! - A graph assistant forwarding selected context to a hosted language model

pub mod api;
pub mod chat;
pub mod graph;
pub mod neo4j;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
    pub neo4j: Neo4jYamlConfig,
    pub llm: LlmYamlConfig,
    pub chat: ChatYamlConfig,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub port: u16,
    /// Allowed CORS origins; empty or `*` allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            cors_origins: Vec::new(),
        }
    }
}

/// Neo4j configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Neo4jYamlConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for Neo4jYamlConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".into(),
            user: "neo4j".into(),
            password: "protograph".into(),
        }
    }
}

/// Language model configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmYamlConfig {
    pub host: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for LlmYamlConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".into(),
            model: "llama3".into(),
            timeout_secs: 120,
        }
    }
}

/// Chat configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatYamlConfig {
    /// Question/answer exchanges replayed per client
    pub history_exchanges: usize,
}

impl Default for ChatYamlConfig {
    fn default() -> Self {
        Self {
            history_exchanges: chat::history::DEFAULT_HISTORY_EXCHANGES,
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub llm_host: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub chat_history_exchanges: usize,
}

fn env_parsed<T: std::str::FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|s| s.parse().ok())
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        Ok(Self {
            neo4j_uri: std::env::var("NEO4J_URI").unwrap_or(yaml.neo4j.uri),
            neo4j_user: std::env::var("NEO4J_USER").unwrap_or(yaml.neo4j.user),
            neo4j_password: std::env::var("NEO4J_PASSWORD").unwrap_or(yaml.neo4j.password),
            server_port: env_parsed("SERVER_PORT").unwrap_or(yaml.server.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or(yaml.server.cors_origins),
            llm_host: std::env::var("LLM_HOST").unwrap_or(yaml.llm.host),
            llm_model: std::env::var("LLM_MODEL").unwrap_or(yaml.llm.model),
            llm_timeout_secs: env_parsed("LLM_TIMEOUT_SECS").unwrap_or(yaml.llm.timeout_secs),
            chat_history_exchanges: env_parsed("CHAT_HISTORY_EXCHANGES")
                .unwrap_or(yaml.chat.history_exchanges),
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }

    /// True when CORS should accept any origin
    pub fn cors_allows_any(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub graph: graph::GraphService,
    pub chat: chat::ChatManager,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state, connecting to Neo4j and building the LLM bridge.
    ///
    /// A failed database connection does not abort startup: the service
    /// comes up and every graph endpoint reports the outage.
    pub async fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn neo4j::GraphStore> = match neo4j::Neo4jClient::new(
            &config.neo4j_uri,
            &config.neo4j_user,
            &config.neo4j_password,
        )
        .await
        {
            Ok(client) => {
                tracing::info!("Connected to Neo4j at {}", config.neo4j_uri);
                Arc::new(client)
            }
            Err(e) => {
                tracing::error!("Failed to connect to Neo4j at {}: {:#}", config.neo4j_uri, e);
                Arc::new(neo4j::DisconnectedGraphStore::new(format!("{:#}", e)))
            }
        };

        let bridge = Arc::new(chat::OllamaBridge::new(
            &config.llm_host,
            &config.llm_model,
            Duration::from_secs(config.llm_timeout_secs),
        )?);

        Ok(Self::with_parts(store, bridge, config))
    }

    /// Assemble state from already-built collaborators
    pub fn with_parts(
        store: Arc<dyn neo4j::GraphStore>,
        bridge: Arc<dyn chat::AssistantBridge>,
        config: Config,
    ) -> Self {
        let sessions = Arc::new(chat::SessionStore::new(config.chat_history_exchanges));
        Self {
            graph: graph::GraphService::new(store),
            chat: chat::ChatManager::new(bridge, sessions),
            config: Arc::new(config),
        }
    }
}

/// Build the application state and serve the API until shutdown
pub async fn start_server(config: Config) -> Result<()> {
    let port = config.server_port;
    let state = AppState::new(config).await?;
    let app = api::create_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("ProtoGraph API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

// ============================================================================
// Tests
// ============================================================================
