use crate::{
    models::RecommendedMovie,
    services::{catalog::Catalog, summary::SummaryCleaner},
};

/// Thresholds applied to the top-k pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationPolicy {
    /// Minimum coerced score to be considered at all
    pub min_score: f64,
    /// Maximum number of results
    pub limit: usize,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            min_score: 3.0,
            limit: 10,
        }
    }
}

/// Lower-cases and trims requested genres, dropping blanks and nulls
pub fn normalize_genres(requested: &[Option<String>]) -> Vec<String> {
    requested
        .iter()
        .flatten()
        .map(|genre| genre.trim().to_lowercase())
        .filter(|genre| !genre.is_empty())
        .collect()
}

/// Picks recommendations from the top-k pool
///
/// ## Algorithm
/// 1. Keep records whose score is at least `policy.min_score`
/// 2. If `genres` is non-empty, keep records sharing at least one genre with it
/// 3. Take the first `policy.limit` in source order (no re-ranking by score)
///
/// Summaries come from the pool rows alone; a row without one yields `""`.
///
/// `genres` must already be normalized, see [`normalize_genres`].
pub fn recommend(
    catalog: &Catalog,
    cleaner: &SummaryCleaner,
    genres: &[String],
    policy: RecommendationPolicy,
) -> Vec<RecommendedMovie> {
    catalog
        .recommendations()
        .iter()
        .filter(|rec| rec.score >= policy.min_score)
        .filter(|rec| genres.is_empty() || rec.matches_any_genre(genres))
        .take(policy.limit)
        .map(|rec| RecommendedMovie {
            movie_id: rec.movie_id,
            title: rec.title.clone(),
            predicted_genres: rec.predicted_genres.clone(),
            score: rec.score,
            summary: cleaner.clean(&rec.summary),
        })
        .collect()
}
