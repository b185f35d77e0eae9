//! Core type definitions for the application

/// Which part of the search view has keyboard focus
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    SearchInput,
    Results,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::SearchInput => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::SearchInput,
        }
    }
}

/// Logical views of the application, addressed by path.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Route {
    /// `/`
    #[default]
    Search,
    /// `/album/{id}`; the id is kept as given
    Album(String),
}

impl Route {
    /// Parse a path. Anything that is not an album path maps to the search view.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed.strip_prefix("/album/") {
            Some(id) if !id.is_empty() && !id.contains('/') => Route::Album(id.to_string()),
            _ => Route::Search,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Search => "/".to_string(),
            Route::Album(id) => format!("/album/{id}"),
        }
    }
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub show_help_popup: bool,
}
