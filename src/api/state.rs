use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::{Config, DatasetPaths},
    db::JsonUserStore,
    middleware::SessionSigner,
    models::CatalogStats,
    services::{AuthService, Catalog, RecommendationPolicy, SummaryCleaner},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<RwLock<Arc<Catalog>>>,
    dataset_paths: DatasetPaths,
    pub cleaner: Arc<SummaryCleaner>,
    pub policy: RecommendationPolicy,
    pub auth: Arc<AuthService>,
    pub sessions: SessionSigner,
}

impl AppState {
    /// Assembles state from already-built parts
    pub fn new(
        catalog: Catalog,
        dataset_paths: DatasetPaths,
        cleaner: SummaryCleaner,
        policy: RecommendationPolicy,
        auth: AuthService,
        sessions: SessionSigner,
    ) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Arc::new(catalog))),
            dataset_paths,
            cleaner: Arc::new(cleaner),
            policy,
            auth: Arc::new(auth),
            sessions,
        }
    }

    /// Loads datasets and prepares the users file described by `config`
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cleaner = SummaryCleaner::new(&config.summary_junk_pattern)
            .map_err(|e| anyhow::anyhow!("Invalid SUMMARY_JUNK_PATTERN: {}", e))?;

        let store = JsonUserStore::new(config.users_path());
        store.ensure_exists().await?;

        let dataset_paths = config.dataset_paths();
        let catalog = Catalog::load(&dataset_paths).await;

        let policy = RecommendationPolicy {
            min_score: config.min_score,
            limit: config.recommendation_limit,
        };

        Ok(Self::new(
            catalog,
            dataset_paths,
            cleaner,
            policy,
            AuthService::new(Arc::new(store)),
            SessionSigner::new(&config.secret_key),
        ))
    }

    /// Snapshot of the current catalog
    pub async fn catalog(&self) -> Arc<Catalog> {
        self.catalog.read().await.clone()
    }

    /// Re-reads the datasets and swaps them in
    ///
    /// Requests already holding a snapshot keep using the old catalog.
    pub async fn reload_catalog(&self) -> CatalogStats {
        let fresh = Arc::new(Catalog::load(&self.dataset_paths).await);
        let stats = fresh.stats();
        *self.catalog.write().await = fresh;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &std::path::Path, extra: &[(&str, &str)]) -> Config {
        let mut vars = vec![("DATA_DIR".to_string(), dir.display().to_string())];
        vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        Config::from_vars(vars).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_junk_pattern_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), &[("SUMMARY_JUNK_PATTERN", "(")]);

        let err = AppState::from_config(&config).await.err().unwrap();
        assert!(err.to_string().contains("SUMMARY_JUNK_PATTERN"));
        assert!(!dir.path().join("users.json").exists());
    }

    #[tokio::test]
    async fn test_from_config_with_empty_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::from_config(&config(dir.path(), &[])).await.unwrap();

        assert!(state.catalog().await.movies().is_empty());
        assert!(dir.path().join("users.json").exists());
    }
}
