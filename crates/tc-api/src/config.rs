use serde::Deserialize;
use tc_nav::ExcerptConfig;

/// Deployment environment, read from `APP_ENV`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Where documents are kept, read from `STORE_BACKEND`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

/// Server configuration, loaded from the environment.
///
/// Every field maps to the upper-cased variable of the same name, e.g.
/// `admin_token_sha256` is read from `ADMIN_TOKEN_SHA256`.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub app_env: Environment,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default)]
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    /// Directory served under `/objects`
    #[serde(default = "default_object_store_root")]
    pub object_store_root: String,
    /// Base URL clients use to reach this server
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Hex SHA-256 of the admin bearer token. Admin routes reject every
    /// request when unset.
    pub admin_token_sha256: Option<String>,
    /// Comma separated list of allowed CORS origins
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,

    #[serde(default = "default_excerpt_words")]
    pub excerpt_words: usize,
    #[serde(default = "default_excerpt_ellipsis_after")]
    pub excerpt_ellipsis_after: usize,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

const fn default_max_connections() -> u32 {
    10
}

fn default_object_store_root() -> String {
    "./objects".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_allowed_origins() -> String {
    "http://localhost:8080".to_string()
}

const fn default_excerpt_words() -> usize {
    tc_nav::excerpt::DEFAULT_TAKE_WORDS
}

const fn default_excerpt_ellipsis_after() -> usize {
    tc_nav::excerpt::DEFAULT_ELLIPSIS_AFTER
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let config: Self = envy::from_env()?;

        if config.store_backend == StoreBackend::Postgres && config.database_url.is_none() {
            anyhow::bail!("DATABASE_URL is required when STORE_BACKEND=postgres");
        }

        Ok(config)
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    /// URL prefix for files of the local object store
    pub fn objects_base_url(&self) -> String {
        format!("{}/objects", self.public_base_url.trim_end_matches('/'))
    }

    pub const fn excerpt_config(&self) -> ExcerptConfig {
        ExcerptConfig {
            take_words: self.excerpt_words,
            ellipsis_after: self.excerpt_ellipsis_after,
        }
    }
}
