//! In-memory movie catalog built from the three precomputed datasets.
//!
//! Loading never fails: a missing or malformed dataset is logged and treated as
//! empty so the service can still start with partial data.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config::DatasetPaths,
    models::{
        CatalogStats, GenrePredictionRecord, Movie, MovieDetail, MovieId, Recommendation,
        RecommendationRecord, SearchHit, SummaryRecord,
    },
    services::summary::SummaryCleaner,
};

/// Reads a JSON array of records from `path`
///
/// Returns an empty list when the file is missing, unreadable or not an array.
/// Individual rows that fail to decode are skipped.
pub async fn load_records<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read dataset");
            return Vec::new();
        }
    };

    let rows: Vec<Value> = match serde_json::from_slice(&bytes) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to parse dataset");
            return Vec::new();
        }
    };

    let total = rows.len();
    let records: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(path = %path.display(), row = i, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect();

    tracing::debug!(
        path = %path.display(),
        loaded = records.len(),
        skipped = total - records.len(),
        "Dataset read"
    );

    records
}

/// Merged movies plus the independent top-k pool
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    movie_index: HashMap<MovieId, usize>,
    recommendations: Vec<Recommendation>,
    recommendation_index: HashMap<MovieId, usize>,
    genres: Vec<String>,
}

impl Catalog {
    /// Loads and merges the datasets found at `paths`
    pub async fn load(paths: &DatasetPaths) -> Self {
        let summaries: Vec<SummaryRecord> = load_records(&paths.summaries).await;
        let genre_predictions: Vec<GenrePredictionRecord> =
            load_records(&paths.genre_predictions).await;
        let recommendations: Vec<RecommendationRecord> =
            load_records(&paths.recommendations).await;

        let catalog = Self::from_sources(summaries, genre_predictions, recommendations);
        let stats = catalog.stats();

        tracing::info!(
            movies = stats.movies,
            recommendations = stats.recommendations,
            genres = stats.genres,
            "Catalog loaded"
        );

        catalog
    }

    /// Merges raw dataset rows
    ///
    /// Summaries seed the movie map; genre predictions add stub movies for unseen ids
    /// and always set the genres. Recommendations are indexed on their own, last
    /// duplicate id wins.
    pub fn from_sources(
        summaries: Vec<SummaryRecord>,
        genre_predictions: Vec<GenrePredictionRecord>,
        recommendations: Vec<RecommendationRecord>,
    ) -> Self {
        let mut catalog = Self::default();

        for record in summaries {
            let Some(movie_id) = record.movie_id else {
                tracing::debug!("Summary record without movie_id skipped");
                continue;
            };
            let movie = Movie::new(
                movie_id,
                record.title.unwrap_or_default(),
                record.summary.unwrap_or_default(),
            );
            match catalog.movie_index.get(&movie_id) {
                Some(&idx) => catalog.movies[idx] = movie,
                None => catalog.push_movie(movie),
            }
        }

        let mut genre_set = BTreeSet::new();
        for record in genre_predictions {
            let genres = record.predicted_genres.unwrap_or_default();
            for genre in &genres {
                let genre = genre.trim();
                if !genre.is_empty() {
                    genre_set.insert(genre.to_string());
                }
            }

            let Some(movie_id) = record.movie_id else {
                tracing::debug!("Genre prediction without movie_id skipped");
                continue;
            };
            if !catalog.movie_index.contains_key(&movie_id) {
                catalog.push_movie(Movie::new(
                    movie_id,
                    record.title.unwrap_or_default(),
                    record.summary.unwrap_or_default(),
                ));
            }
            let idx = catalog.movie_index[&movie_id];
            catalog.movies[idx].predicted_genres = genres;
        }
        catalog.genres = genre_set.into_iter().collect();

        for record in recommendations {
            let Some(rec) = Recommendation::from_record(record) else {
                tracing::debug!("Recommendation without movie_id skipped");
                continue;
            };
            catalog
                .recommendation_index
                .insert(rec.movie_id, catalog.recommendations.len());
            catalog.recommendations.push(rec);
        }

        catalog
    }

    fn push_movie(&mut self, movie: Movie) {
        self.movie_index.insert(movie.movie_id, self.movies.len());
        self.movies.push(movie);
    }

    /// Movies in first-seen order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn movie(&self, movie_id: MovieId) -> Option<&Movie> {
        self.movie_index.get(&movie_id).map(|&idx| &self.movies[idx])
    }

    /// The top-k pool in source order, duplicates included
    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Last recommendation row seen for `movie_id`
    pub fn recommendation(&self, movie_id: MovieId) -> Option<&Recommendation> {
        self.recommendation_index
            .get(&movie_id)
            .map(|&idx| &self.recommendations[idx])
    }

    /// Distinct genres across all genre predictions, sorted
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            movies: self.movies.len(),
            recommendations: self.recommendation_index.len(),
            genres: self.genres.len(),
        }
    }

    /// Movie detail joined with its recommendation score (0.0 when unscored)
    pub fn movie_detail(&self, movie_id: MovieId, cleaner: &SummaryCleaner) -> Option<MovieDetail> {
        let movie = self.movie(movie_id)?;
        let score = self
            .recommendation(movie_id)
            .map(|rec| rec.score)
            .unwrap_or(0.0);

        Some(MovieDetail {
            movie_id: movie.movie_id,
            title: movie.title.clone(),
            summary: cleaner.clean(&movie.summary),
            predicted_genres: movie.predicted_genres.clone(),
            score,
        })
    }

    /// Case-insensitive title substring search
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .take(limit)
            .map(|movie| SearchHit {
                movie_id: movie.movie_id,
                title: movie.title.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summaries(rows: Value) -> Vec<SummaryRecord> {
        serde_json::from_value(rows).unwrap()
    }

    fn predictions(rows: Value) -> Vec<GenrePredictionRecord> {
        serde_json::from_value(rows).unwrap()
    }

    fn recs(rows: Value) -> Vec<RecommendationRecord> {
        serde_json::from_value(rows).unwrap()
    }

    fn sample_catalog() -> Catalog {
        Catalog::from_sources(
            summaries(json!([
                {"movie_id": 1, "title": "Alien", "summary": "In space no one can hear you scream"},
                {"movie_id": 2, "title": "Amelie"}
            ])),
            predictions(json!([
                {"movie_id": 1, "title": "Alien", "predicted_genres": ["Horror", " Sci-Fi "]},
                {"movie_id": 3, "title": "Heat", "summary": "Cops and robbers", "predicted_genres": ["Crime", ""]}
            ])),
            recs(json!([
                {"movie_id": 1, "title": "Alien", "predicted_genres": ["Horror"], "score": 4.0},
                {"movie_id": 9, "title": "Unlisted", "predicted_genres": [], "score": "3.5"}
            ])),
        )
    }

    #[test]
    fn test_merge_keeps_movies_from_either_source() {
        let catalog = sample_catalog();
        let ids: Vec<MovieId> = catalog.movies().iter().map(|m| m.movie_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let amelie = catalog.movie(2).unwrap();
        assert_eq!(amelie.summary, "");
        assert!(amelie.predicted_genres.is_empty());

        let heat = catalog.movie(3).unwrap();
        assert_eq!(heat.title, "Heat");
        assert_eq!(heat.summary, "Cops and robbers");
        assert_eq!(heat.predicted_genres, vec!["Crime", ""]);
    }

    #[test]
    fn test_genre_prediction_does_not_replace_summary() {
        let catalog = Catalog::from_sources(
            summaries(json!([{"movie_id": 1, "title": "Alien", "summary": "original"}])),
            predictions(json!([
                {"movie_id": 1, "title": "Other", "summary": "replacement", "predicted_genres": ["Horror"]}
            ])),
            Vec::new(),
        );
        let alien = catalog.movie(1).unwrap();
        assert_eq!(alien.title, "Alien");
        assert_eq!(alien.summary, "original");
        assert_eq!(alien.predicted_genres, vec!["Horror"]);
    }

    #[test]
    fn test_genres_are_trimmed_sorted_and_distinct() {
        let catalog = sample_catalog();
        assert_eq!(catalog.genres(), &["Crime", "Horror", "Sci-Fi"]);
    }

    #[test]
    fn test_recommendations_are_independent_of_movies() {
        let catalog = sample_catalog();
        assert!(catalog.movie(9).is_none());
        assert_eq!(catalog.recommendation(9).unwrap().score, 3.5);
        assert!(catalog.recommendation(2).is_none());
    }

    #[test]
    fn test_duplicate_recommendation_last_write_wins() {
        let catalog = Catalog::from_sources(
            Vec::new(),
            Vec::new(),
            recs(json!([
                {"movie_id": 5, "title": "First", "score": 3.0},
                {"movie_id": 5, "title": "Second", "score": 4.5}
            ])),
        );
        assert_eq!(catalog.recommendations().len(), 2);
        assert_eq!(catalog.recommendation(5).unwrap().title, "Second");
        assert_eq!(catalog.stats().recommendations, 1);
    }

    #[test]
    fn test_movie_detail_defaults_score_to_zero() {
        let catalog = sample_catalog();
        let cleaner = SummaryCleaner::with_default_pattern();

        let alien = catalog.movie_detail(1, &cleaner).unwrap();
        assert_eq!(alien.score, 4.0);
        assert_eq!(alien.summary, "In space no one can hear you scream...");

        let heat = catalog.movie_detail(3, &cleaner).unwrap();
        assert_eq!(heat.score, 0.0);

        assert!(catalog.movie_detail(42, &cleaner).is_none());
    }

    #[test]
    fn test_search_titles() {
        let catalog = sample_catalog();
        let hits = catalog.search("  aLi ", 10);
        assert_eq!(
            hits,
            vec![SearchHit {
                movie_id: 1,
                title: "Alien".to_string()
            }]
        );
        assert_eq!(catalog.search("a", 1).len(), 1);
        assert!(catalog.search("   ", 10).is_empty());
    }

    #[tokio::test]
    async fn test_load_records_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let rows: Vec<SummaryRecord> = load_records(&dir.path().join("nope.json")).await;
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_load_records_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        let rows: Vec<SummaryRecord> = load_records(&path).await;
        assert!(rows.is_empty());

        std::fs::write(&path, r#"{"movie_id": 1}"#).unwrap();
        let rows: Vec<SummaryRecord> = load_records(&path).await;
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_load_records_skips_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summaries.json");
        std::fs::write(
            &path,
            r#"[{"movie_id": 1, "title": "Alien"}, {"movie_id": "x"}, {"movie_id": 2}]"#,
        )
        .unwrap();
        let rows: Vec<SummaryRecord> = load_records(&path).await;
        assert_eq!(rows.len(), 2);
    }
}
