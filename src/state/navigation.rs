//! Which page of the app is showing

/// Top-level pages reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Library,
    Chat,
}

impl View {
    pub const ALL: [View; 3] = [View::Home, View::Library, View::Chat];

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Library => "Library",
            View::Chat => "Chat",
        }
    }
}

/// Active view. Every view is reachable from every other.
#[derive(Debug, Default)]
pub struct Navigation {
    active: View,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> View {
        self.active
    }

    pub fn set_view(&mut self, view: View) {
        if self.active != view {
            tracing::debug!("view {:?} -> {:?}", self.active, view);
        }
        self.active = view;
    }
}
