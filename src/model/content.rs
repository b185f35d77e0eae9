//! Content view state: catalog items and the per-view request state machine

use super::types::Route;

pub const NO_ALBUMS_MESSAGE: &str = "No results found.";
pub const NO_TRACKS_MESSAGE: &str = "No tracks found for album.";

/// An album from search results
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumSummary {
    pub id: i64,
    pub title: String,
    pub artwork_url: String,
}

impl AlbumSummary {
    /// Route of the detail view for this album
    pub fn route(&self) -> Route {
        Route::Album(self.id.to_string())
    }
}

/// A track from an album lookup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: i64,
    pub title: String,
    pub artist_name: String,
    pub track_number: u32,
    pub preview_url: String,
}

/// Identifies one issued request. Only the most recently issued ticket of a
/// view may write its outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket(pub u64);

/// What a view should render for its request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestPhase<'a> {
    Idle,
    Pending,
    Errored(&'a str),
    Populated(usize),
}

/// State of the single fetch a view owns.
#[derive(Clone, Debug)]
pub struct RequestState<T> {
    pub is_pending: bool,
    pub error_message: Option<String>,
    pub results: Vec<T>,
    in_flight: Option<RequestTicket>,
    resolved: bool,
    empty_message: &'static str,
}

impl<T> RequestState<T> {
    pub fn new(empty_message: &'static str) -> Self {
        Self {
            is_pending: false,
            error_message: None,
            results: Vec::new(),
            in_flight: None,
            resolved: false,
            empty_message,
        }
    }

    /// Idle/Resolved/Errored -> Pending. Results of the previous request are
    /// dropped. A request already in flight is not cancelled, its ticket just
    /// stops being current.
    pub fn begin(&mut self, ticket: RequestTicket) {
        self.error_message = None;
        self.results.clear();
        self.is_pending = true;
        self.in_flight = Some(ticket);
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.in_flight == Some(ticket)
    }

    /// Pending -> Resolved or Errored. Returns false, leaving the state
    /// untouched, when `ticket` has been superseded.
    pub fn finish<E: ToString>(&mut self, ticket: RequestTicket, outcome: Result<Vec<T>, E>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = None;
        self.is_pending = false;
        self.resolved = true;

        match outcome {
            Ok(results) => {
                if results.is_empty() {
                    self.error_message = Some(self.empty_message.to_string());
                }
                self.results = results;
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                self.results.clear();
            }
        }
        true
    }

    /// Hide the notification. Does not touch the request.
    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    pub fn phase(&self) -> RequestPhase<'_> {
        if self.is_pending {
            RequestPhase::Pending
        } else if let Some(message) = &self.error_message {
            RequestPhase::Errored(message.as_str())
        } else if !self.resolved {
            RequestPhase::Idle
        } else {
            RequestPhase::Populated(self.results.len())
        }
    }
}

/// Search page: the album search request plus list selection
#[derive(Clone, Debug)]
pub struct SearchPage {
    pub request: RequestState<AlbumSummary>,
    pub selected_index: usize,
}

impl Default for SearchPage {
    fn default() -> Self {
        Self {
            request: RequestState::new(NO_ALBUMS_MESSAGE),
            selected_index: 0,
        }
    }
}

impl SearchPage {
    pub fn selected_album(&self) -> Option<&AlbumSummary> {
        if self.request.is_pending {
            return None;
        }
        self.request.results.get(self.selected_index)
    }
}

/// Album detail page for one album id
#[derive(Clone, Debug)]
pub struct AlbumPage {
    pub album_id: String,
    pub request: RequestState<Track>,
    pub selected_index: usize,
}

impl AlbumPage {
    pub fn new(album_id: String) -> Self {
        Self {
            album_id,
            request: RequestState::new(NO_TRACKS_MESSAGE),
            selected_index: 0,
        }
    }

    pub fn selected_track(&self) -> Option<&Track> {
        if self.request.is_pending {
            return None;
        }
        self.request.results.get(self.selected_index)
    }
}

/// State for the main content area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub route: Route,
    pub search: SearchPage,
    pub album: Option<AlbumPage>,
}

impl ContentState {
    /// Error text of the view currently on screen
    pub fn active_error(&self) -> Option<&str> {
        match &self.route {
            Route::Search => self.search.request.error_message.as_deref(),
            Route::Album(_) => self
                .album
                .as_ref()
                .and_then(|page| page.request.error_message.as_deref()),
        }
    }

    pub fn is_loading(&self) -> bool {
        match &self.route {
            Route::Search => self.search.request.is_pending,
            Route::Album(_) => self.album.as_ref().is_some_and(|page| page.request.is_pending),
        }
    }
}
