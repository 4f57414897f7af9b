//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `DEJAVU_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

use crate::constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_CANDIDATES, DEFAULT_MAX_UPLOAD_BYTES,
    DEFAULT_SIMILARITY_THRESHOLD,
};
use crate::embedding::config::DEFAULT_EMBEDDING_MODEL;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `DEJAVU_*` overrides on top of defaults.
/// Strings that fail to parse as numbers or booleans fall back to the
/// default; only the port and bind address are strict, since a typo there
/// silently binds the wrong socket.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Base URL of an Ollama-compatible embedding endpoint. Unset selects
    /// the deterministic hashed stub backend.
    pub embedding_url: Option<String>,

    /// Embedding model name. Default: `all-minilm`.
    pub embedding_model: String,

    /// Expected embedding dimension. Default: `384`.
    pub embedding_dim: usize,

    /// Chat model for concept extraction and recommendations. Unset selects
    /// the local heuristic backend.
    pub textgen_model: Option<String>,

    /// Minimum similarity for a concept match. Default: `0.75`.
    pub similarity_threshold: f32,

    /// Candidate papers retained per analysis. Default: `5`.
    pub max_candidates: usize,

    /// Request body cap for document uploads. Default: 50 MB.
    pub max_upload_bytes: usize,

    /// Whether the arXiv provider participates in retrieval. Default: `true`.
    pub arxiv_enabled: bool,

    /// Whether the Semantic Scholar provider participates in retrieval.
    /// Default: `true`.
    pub semantic_scholar_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            embedding_url: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            textgen_model: None,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            arxiv_enabled: true,
            semantic_scholar_enabled: true,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "DEJAVU_PORT";
    const ENV_BIND_ADDR: &'static str = "DEJAVU_BIND_ADDR";
    const ENV_EMBEDDING_URL: &'static str = "DEJAVU_EMBEDDING_URL";
    const ENV_EMBEDDING_MODEL: &'static str = "DEJAVU_EMBEDDING_MODEL";
    const ENV_EMBEDDING_DIM: &'static str = "DEJAVU_EMBEDDING_DIM";
    const ENV_TEXTGEN_MODEL: &'static str = "DEJAVU_TEXTGEN_MODEL";
    const ENV_SIMILARITY_THRESHOLD: &'static str = "DEJAVU_SIMILARITY_THRESHOLD";
    const ENV_MAX_CANDIDATES: &'static str = "DEJAVU_MAX_CANDIDATES";
    const ENV_MAX_UPLOAD_BYTES: &'static str = "DEJAVU_MAX_UPLOAD_BYTES";
    const ENV_ARXIV_ENABLED: &'static str = "DEJAVU_ARXIV_ENABLED";
    const ENV_SEMANTIC_SCHOLAR_ENABLED: &'static str = "DEJAVU_SEMANTIC_SCHOLAR_ENABLED";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let embedding_url = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_URL);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let embedding_dim =
            Self::parse_usize_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim);
        let textgen_model = Self::parse_optional_string_from_env(Self::ENV_TEXTGEN_MODEL);
        let similarity_threshold = Self::parse_f32_from_env(
            Self::ENV_SIMILARITY_THRESHOLD,
            defaults.similarity_threshold,
        );
        let max_candidates =
            Self::parse_usize_from_env(Self::ENV_MAX_CANDIDATES, defaults.max_candidates);
        let max_upload_bytes =
            Self::parse_usize_from_env(Self::ENV_MAX_UPLOAD_BYTES, defaults.max_upload_bytes);
        let arxiv_enabled = Self::parse_bool_from_env(Self::ENV_ARXIV_ENABLED, true);
        let semantic_scholar_enabled =
            Self::parse_bool_from_env(Self::ENV_SEMANTIC_SCHOLAR_ENABLED, true);

        Ok(Self {
            port,
            bind_addr,
            embedding_url,
            embedding_model,
            embedding_dim,
            textgen_model,
            similarity_threshold,
            max_candidates,
            max_upload_bytes,
            arxiv_enabled,
            semantic_scholar_enabled,
        })
    }

    /// Validates numeric invariants the analysis engine depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(ConfigError::InvalidThreshold {
                value: self.similarity_threshold,
            });
        }

        if self.max_candidates == 0 {
            return Err(ConfigError::InvalidCandidateLimit {
                value: self.max_candidates,
            });
        }

        if self.embedding_dim == 0 {
            return Err(ConfigError::InvalidDimension {
                value: self.embedding_dim,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_f32_from_env(var_name: &str, default: f32) -> f32 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => default,
            },
            Err(_) => default,
        }
    }
}
