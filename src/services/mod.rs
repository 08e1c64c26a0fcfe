pub mod auth;
pub mod catalog;
pub mod recommendations;
pub mod summary;

pub use auth::AuthService;
pub use catalog::Catalog;
pub use recommendations::RecommendationPolicy;
pub use summary::SummaryCleaner;
