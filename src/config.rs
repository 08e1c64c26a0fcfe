use std::path::PathBuf;

use serde::Deserialize;

/// Placeholder used when `SECRET_KEY` is unset. Sessions signed with it are forgeable.
pub const INSECURE_SECRET_KEY: &str = "change-me-in-prod";

/// Default pattern for the recurring filler clauses found in generated summaries
pub const DEFAULT_JUNK_PATTERN: &str = r"(it's a [^,\.]+[,\.]?)+";

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the datasets and the users file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Override for the movie summaries dataset
    #[serde(default)]
    pub movie_summaries_file: Option<PathBuf>,

    /// Override for the genre predictions dataset
    #[serde(default)]
    pub genre_predictions_file: Option<PathBuf>,

    /// Override for the top-k recommendations dataset
    #[serde(default)]
    pub topk_recommendations_file: Option<PathBuf>,

    /// Override for the users document
    #[serde(default)]
    pub users_file: Option<PathBuf>,

    /// Key used to sign session cookies
    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    /// Minimum score a recommendation needs to be shown
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Maximum number of recommendations returned per request
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Regex stripped from summaries before deduplication
    #[serde(default = "default_junk_pattern")]
    pub summary_junk_pattern: String,

    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Comma-separated CORS origins; empty disables CORS
    #[serde(default)]
    pub allowed_origins: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_secret_key() -> String {
    INSECURE_SECRET_KEY.to_string()
}

fn default_min_score() -> f64 {
    3.0
}

fn default_recommendation_limit() -> usize {
    10
}

fn default_junk_pattern() -> String {
    DEFAULT_JUNK_PATTERN.to_string()
}

/// Resolved locations of the three datasets
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub summaries: PathBuf,
    pub genre_predictions: PathBuf,
    pub recommendations: PathBuf,
}

impl DatasetPaths {
    /// Standard file names inside a data directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            summaries: dir.join("huggingface_movie_summaries.json"),
            genre_predictions: dir.join("huggingface_genre_predictions.json"),
            recommendations: dir.join("huggingface_topk_recommendations.json"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from explicit `(NAME, value)` pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Dataset paths, honoring per-file overrides
    pub fn dataset_paths(&self) -> DatasetPaths {
        let defaults = DatasetPaths::in_dir(&self.data_dir);
        DatasetPaths {
            summaries: self.movie_summaries_file.clone().unwrap_or(defaults.summaries),
            genre_predictions: self
                .genre_predictions_file
                .clone()
                .unwrap_or(defaults.genre_predictions),
            recommendations: self
                .topk_recommendations_file
                .clone()
                .unwrap_or(defaults.recommendations),
        }
    }

    pub fn users_path(&self) -> PathBuf {
        self.users_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("users.json"))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_insecure_secret(&self) -> bool {
        self.secret_key == INSECURE_SECRET_KEY
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: Vec<(&str, &str)>) -> Config {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()));
        Config::from_vars(vars).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config_from(vec![]);
        assert_eq!(config.port, 5000);
        assert_eq!(config.min_score, 3.0);
        assert_eq!(config.recommendation_limit, 10);
        assert!(config.uses_insecure_secret());
        assert_eq!(config.users_path(), PathBuf::from("data").join("users.json"));
        assert!(config.cors_origins().is_empty());
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let vars = vec![("PORT".to_string(), "not-a-port".to_string())];
        assert!(Config::from_vars(vars).is_err());
    }

    #[test]
    fn test_file_overrides_win_over_data_dir() {
        let config = config_from(vec![
            ("DATA_DIR", "/srv/movies"),
            ("TOPK_RECOMMENDATIONS_FILE", "/tmp/topk.json"),
        ]);
        let paths = config.dataset_paths();
        assert_eq!(
            paths.summaries,
            PathBuf::from("/srv/movies/huggingface_movie_summaries.json")
        );
        assert_eq!(paths.recommendations, PathBuf::from("/tmp/topk.json"));
    }

    #[test]
    fn test_cors_origins_split() {
        let config = config_from(vec![(
            "ALLOWED_ORIGINS",
            "http://localhost:3000, ,https://example.org",
        )]);
        assert_eq!(
            config.cors_origins(),
            vec!["http://localhost:3000", "https://example.org"]
        );
    }
}
