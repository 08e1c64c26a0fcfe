use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod team;
pub mod user;

pub use team::{TeamMember, TEAM};
pub use user::{User, UsersDocument};

/// Integer key shared by all three datasets
pub type MovieId = i64;

// ============================================================================
// Source dataset records
// ============================================================================

/// Row of the movie summaries dataset
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRecord {
    #[serde(default)]
    pub movie_id: Option<MovieId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Row of the genre predictions dataset
#[derive(Debug, Clone, Deserialize)]
pub struct GenrePredictionRecord {
    #[serde(default)]
    pub movie_id: Option<MovieId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub predicted_genres: Option<Vec<String>>,
}

/// Row of the top-k recommendations dataset
///
/// `score` stays untyped here: the dataset is not consistent about numbers vs strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRecord {
    #[serde(default)]
    pub movie_id: Option<MovieId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub predicted_genres: Option<Vec<String>>,
    #[serde(default)]
    pub score: Value,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Coerces a loosely typed score into a float, falling back to 0.0
pub fn coerce_score(value: &Value) -> f64 {
    let score = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };

    if score.is_finite() {
        score
    } else {
        0.0
    }
}

// ============================================================================
// Merged catalog types
// ============================================================================

/// A movie in the merged catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub movie_id: MovieId,
    pub title: String,
    pub summary: String,
    pub predicted_genres: Vec<String>,
}

impl Movie {
    pub fn new(movie_id: MovieId, title: String, summary: String) -> Self {
        Self {
            movie_id,
            title,
            summary,
            predicted_genres: Vec::new(),
        }
    }
}

/// A scored entry of the top-k pool
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub predicted_genres: Vec<String>,
    pub score: f64,
    pub summary: String,
}

impl Recommendation {
    /// Builds a recommendation from a source row; rows without an id are dropped
    pub fn from_record(record: RecommendationRecord) -> Option<Self> {
        let movie_id = record.movie_id?;
        Some(Self {
            movie_id,
            title: record.title.unwrap_or_default(),
            predicted_genres: record.predicted_genres.unwrap_or_default(),
            score: coerce_score(&record.score),
            summary: record.summary.unwrap_or_default(),
        })
    }

    /// True if any of the movie's genres, lower-cased, is in `wanted`
    pub fn matches_any_genre(&self, wanted: &[String]) -> bool {
        self.predicted_genres
            .iter()
            .map(|g| g.to_lowercase())
            .any(|g| wanted.contains(&g))
    }
}

// ============================================================================
// API payloads
// ============================================================================

/// Body of `POST /api/recommend`
#[derive(Debug, Default, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub genres: Vec<Option<String>>,
}

/// One entry of the `/api/recommend` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedMovie {
    pub movie_id: MovieId,
    pub title: String,
    pub predicted_genres: Vec<String>,
    pub score: f64,
    pub summary: String,
}

/// Response of `GET /api/movie/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub movie_id: MovieId,
    pub title: String,
    pub summary: String,
    pub predicted_genres: Vec<String>,
    pub score: f64,
}

/// Search suggestion returned by `GET /api/search`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub movie_id: MovieId,
    pub title: String,
}

/// Dataset sizes reported after a (re)load
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogStats {
    pub movies: usize,
    pub recommendations: usize,
    pub genres: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_score_numbers_and_strings() {
        assert_eq!(coerce_score(&json!(4)), 4.0);
        assert_eq!(coerce_score(&json!(3.5)), 3.5);
        assert_eq!(coerce_score(&json!(" 3.25 ")), 3.25);
    }

    #[test]
    fn test_coerce_score_garbage_is_zero() {
        assert_eq!(coerce_score(&Value::Null), 0.0);
        assert_eq!(coerce_score(&json!("n/a")), 0.0);
        assert_eq!(coerce_score(&json!([1, 2])), 0.0);
        assert_eq!(coerce_score(&json!({"value": 5})), 0.0);
        assert_eq!(coerce_score(&json!("inf")), 0.0);
    }

    #[test]
    fn test_recommendation_record_missing_fields() {
        let record: RecommendationRecord =
            serde_json::from_value(json!({"movie_id": 12, "title": null})).unwrap();
        let rec = Recommendation::from_record(record).unwrap();
        assert_eq!(rec.movie_id, 12);
        assert_eq!(rec.title, "");
        assert!(rec.predicted_genres.is_empty());
        assert_eq!(rec.score, 0.0);
    }

    #[test]
    fn test_recommendation_without_id_is_dropped() {
        let record: RecommendationRecord =
            serde_json::from_value(json!({"title": "Orphan", "score": 5})).unwrap();
        assert!(Recommendation::from_record(record).is_none());
    }

    #[test]
    fn test_genre_match_is_case_insensitive_on_movie_side() {
        let rec = Recommendation {
            movie_id: 1,
            title: "Heat".to_string(),
            predicted_genres: vec!["Crime".to_string(), "Thriller".to_string()],
            score: 4.0,
            summary: String::new(),
        };
        assert!(rec.matches_any_genre(&["thriller".to_string()]));
        assert!(!rec.matches_any_genre(&["comedy".to_string()]));
        assert!(!rec.matches_any_genre(&[]));
    }

    #[test]
    fn test_recommend_request_tolerates_null_genres() {
        let req: RecommendRequest =
            serde_json::from_value(json!({"genres": ["Drama", null, " "]})).unwrap();
        assert_eq!(req.genres.len(), 3);

        let empty: RecommendRequest = serde_json::from_value(json!({})).unwrap();
        assert!(empty.genres.is_empty());
    }
}
