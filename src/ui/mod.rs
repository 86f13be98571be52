//! Widgets and styling for the desktop shell

pub mod book_card;
pub mod search_bar;
pub mod theme;
