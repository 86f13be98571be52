//! Application state, independent of rendering
//!
//! Each controller owns its own slice and is only mutated through its
//! methods. Network work is handed out as call values for the caller to run;
//! completions come back through `finish`.

pub mod chat;
pub mod library;
pub mod navigation;
pub mod recommend;
pub mod request;

pub use chat::{ChatCall, ChatController, ChatDone, ChatTurn, Role, TurnId, APOLOGY};
pub use library::SavedCollection;
pub use navigation::{Navigation, View};
pub use recommend::{
    RecommendCall, RecommendDone, RecommendOutcome, RecommendationController, SearchCriteria,
    FETCH_FAILED,
};
pub use request::RequestState;
