//! Movie catalog and recommendation web service.
//!
//! Three precomputed datasets (summaries, predicted genres, scored top-k
//! recommendations) are merged in memory at startup and served over HTTP,
//! alongside a small file-backed login flow.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod views;
