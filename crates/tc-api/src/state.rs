use std::sync::Arc;

use axum::extract::FromRef;
use tc_db::{DocumentStore, ObjectStore};
use tc_nav::ExcerptConfig;

use crate::{ApiConfig, config::Environment};

/// Admin guard configuration
#[derive(Clone, Debug, Default)]
pub struct AdminAuth {
    /// Lower-case hex SHA-256 of the admin token
    pub token_sha256: Option<String>,
}

#[derive(Clone)]
pub struct ApiState {
    pub documents: Arc<dyn DocumentStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub admin: AdminAuth,
    pub environment: Environment,
    pub excerpt: ExcerptConfig,
}

impl ApiState {
    pub fn new(
        config: &ApiConfig,
        documents: Arc<dyn DocumentStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        if config.admin_token_sha256.is_none() {
            tracing::warn!("ADMIN_TOKEN_SHA256 not set, admin routes are disabled");
        }

        Self {
            documents,
            objects,
            admin: AdminAuth {
                token_sha256: config
                    .admin_token_sha256
                    .as_ref()
                    .map(|hash| hash.trim().to_lowercase()),
            },
            environment: config.app_env,
            excerpt: config.excerpt_config(),
        }
    }
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState")
            .field("environment", &self.environment)
            .field("excerpt", &self.excerpt)
            .finish_non_exhaustive()
    }
}

impl FromRef<ApiState> for AdminAuth {
    fn from_ref(state: &ApiState) -> Self {
        state.admin.clone()
    }
}
