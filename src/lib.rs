//! Bookify: book recommendations, an assistant to chat with, and a reading
//! list, backed by a remote recommendation service.
//!
//! This crate holds the state and request flows. The desktop shell in
//! `main.rs` renders them with iced.

pub mod backend;
pub mod config;
pub mod error;
pub mod state;

pub use backend::{BackendClient, Book, Genre};
pub use config::Settings;
pub use error::ApiError;
