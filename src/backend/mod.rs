//! Recommendation backend: HTTP client and wire types

pub mod api;
pub mod types;

pub use api::BackendClient;
pub use types::{Book, ChatRequest, ChatResponse, Genre, RecommendRequest, RecommendResponse};
