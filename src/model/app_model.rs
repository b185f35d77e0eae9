//! Main application model with state management

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

use super::catalog_client::CatalogClient;
use super::content::{AlbumPage, AlbumSummary, ContentState, RequestTicket, Track};
use super::playback::{PreviewCommand, PreviewState};
use super::types::{ActiveSection, Route, UiState};
use crate::error::ApiResult;

/// Main application model containing all state
pub struct AppModel {
    pub catalog: Option<CatalogClient>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    preview: Arc<Mutex<PreviewState>>,
    pub should_quit: Arc<Mutex<bool>>,
    next_ticket: AtomicU64,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            catalog: None,
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            preview: Arc::new(Mutex::new(PreviewState::default())),
            should_quit: Arc::new(Mutex::new(false)),
            next_ticket: AtomicU64::new(1),
        }
    }

    pub fn set_catalog_client(&mut self, client: CatalogClient) {
        self.catalog = Some(client);
    }

    pub async fn get_catalog_client(&self) -> Option<CatalogClient> {
        self.catalog.clone()
    }

    fn issue_ticket(&self) -> RequestTicket {
        RequestTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed))
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn cycle_section(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn update_search_query(&self, query: String) {
        let mut state = self.ui_state.lock().await;
        state.search_query = query;
    }

    pub async fn append_to_search(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.search_query.push(c);
    }

    pub async fn backspace_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_query.pop();
    }

    pub async fn show_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Requests
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn current_route(&self) -> Route {
        self.content_state.lock().await.route.clone()
    }

    /// Search view: Idle/Resolved/Errored -> Pending
    pub async fn begin_search(&self) -> RequestTicket {
        let ticket = self.issue_ticket();
        let mut state = self.content_state.lock().await;
        state.search.request.begin(ticket);
        state.search.selected_index = 0;
        ticket
    }

    /// Returns false when a newer search superseded this one.
    pub async fn finish_search(&self, ticket: RequestTicket, outcome: ApiResult<Vec<AlbumSummary>>) -> bool {
        let mut state = self.content_state.lock().await;
        let applied = state.search.request.finish(ticket, outcome);
        if applied {
            state.search.selected_index = 0;
        }
        applied
    }

    /// Show the detail view for `album_id`. Returns a ticket when the view
    /// has to fetch, which is every time it is entered with a new id.
    pub async fn enter_album(&self, album_id: &str) -> Option<RequestTicket> {
        let mut state = self.content_state.lock().await;
        if state.route == Route::Album(album_id.to_string()) {
            return None;
        }

        let ticket = self.issue_ticket();
        let mut page = AlbumPage::new(album_id.to_string());
        page.request.begin(ticket);
        state.album = Some(page);
        state.route = Route::Album(album_id.to_string());
        Some(ticket)
    }

    /// Returns false when the album view was left or re-entered meanwhile.
    pub async fn finish_album(&self, ticket: RequestTicket, outcome: ApiResult<Vec<Track>>) -> bool {
        let mut state = self.content_state.lock().await;
        match state.album.as_mut() {
            Some(page) => page.request.finish(ticket, outcome),
            None => false,
        }
    }

    /// Leave the detail view. Its request state goes with it.
    pub async fn navigate_back(&self) -> bool {
        let mut state = self.content_state.lock().await;
        if state.route == Route::Search {
            return false;
        }
        state.route = Route::Search;
        state.album = None;
        true
    }

    pub async fn has_error(&self) -> bool {
        self.content_state.lock().await.active_error().is_some()
    }

    /// Clear the active view's notification without re-issuing anything
    pub async fn dismiss_error(&self) {
        let mut state = self.content_state.lock().await;
        let state = &mut *state;
        match state.route {
            Route::Search => state.search.request.dismiss_error(),
            Route::Album(_) => {
                if let Some(page) = state.album.as_mut() {
                    page.request.dismiss_error();
                }
            }
        }
    }

    // ========================================================================
    // List selection
    // ========================================================================

    pub async fn content_move_up(&self) {
        let mut state = self.content_state.lock().await;
        let state = &mut *state;
        let idx = match state.route {
            Route::Search => &mut state.search.selected_index,
            Route::Album(_) => match state.album.as_mut() {
                Some(page) => &mut page.selected_index,
                None => return,
            },
        };
        if *idx > 0 {
            *idx -= 1;
        }
    }

    pub async fn content_move_down(&self) {
        let mut state = self.content_state.lock().await;
        let state = &mut *state;
        let (idx, len) = match state.route {
            Route::Search => (&mut state.search.selected_index, state.search.request.results.len()),
            Route::Album(_) => match state.album.as_mut() {
                Some(page) => (&mut page.selected_index, page.request.results.len()),
                None => return,
            },
        };
        if *idx < len.saturating_sub(1) {
            *idx += 1;
        }
    }

    pub async fn get_selected_album(&self) -> Option<AlbumSummary> {
        let state = self.content_state.lock().await;
        state.search.selected_album().cloned()
    }

    pub async fn get_selected_track(&self) -> Option<Track> {
        let state = self.content_state.lock().await;
        state.album.as_ref().and_then(|page| page.selected_track().cloned())
    }

    // ========================================================================
    // Preview playback
    // ========================================================================

    pub async fn get_preview_state(&self) -> PreviewState {
        self.preview.lock().await.clone()
    }

    pub async fn toggle_preview(&self, url: &str) -> PreviewCommand {
        self.preview.lock().await.toggle(url)
    }

    pub async fn preview_finished(&self, url: &str) -> bool {
        self.preview.lock().await.finished(url)
    }

    pub async fn stop_preview(&self) -> Option<PreviewCommand> {
        self.preview.lock().await.stop()
    }

    pub async fn is_preview_current(&self, url: &str) -> bool {
        self.preview.lock().await.is_playing(url)
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::model::content::RequestPhase;

    fn track(id: i64, number: u32) -> Track {
        Track {
            id,
            title: format!("Song {id}"),
            artist_name: "Artist".to_string(),
            track_number: number,
            preview_url: format!("https://domain.com/{id}.m4a"),
        }
    }

    #[tokio::test]
    async fn entering_album_begins_request() {
        let model = AppModel::new();
        let ticket = model.enter_album("123456").await.unwrap();

        let state = model.get_content_state().await;
        assert_eq!(state.route, Route::Album("123456".to_string()));
        assert!(state.is_loading());

        assert!(model.finish_album(ticket, Ok(vec![track(1, 1)])).await);
        assert!(!model.get_content_state().await.is_loading());
    }

    #[tokio::test]
    async fn entering_same_album_twice_does_not_refetch() {
        let model = AppModel::new();
        assert!(model.enter_album("1").await.is_some());
        assert!(model.enter_album("1").await.is_none());
        assert!(model.enter_album("2").await.is_some());
    }

    #[tokio::test]
    async fn leaving_album_discards_late_response() {
        let model = AppModel::new();
        let ticket = model.enter_album("1").await.unwrap();
        assert!(model.navigate_back().await);

        assert!(!model.finish_album(ticket, Ok(vec![track(1, 1)])).await);
        let state = model.get_content_state().await;
        assert!(state.album.is_none());
        assert_eq!(state.route, Route::Search);
    }

    #[tokio::test]
    async fn response_for_previous_album_is_dropped() {
        let model = AppModel::new();
        let first = model.enter_album("1").await.unwrap();
        model.navigate_back().await;
        let second = model.enter_album("2").await.unwrap();

        assert!(!model.finish_album(first, Err(ApiError::Network("late".into()))).await);
        assert!(model.finish_album(second, Ok(vec![track(5, 1)])).await);

        let state = model.get_content_state().await;
        let page = state.album.unwrap();
        assert_eq!(page.album_id, "2");
        assert_eq!(page.request.phase(), RequestPhase::Populated(1));
    }

    #[tokio::test]
    async fn dismiss_targets_active_view() {
        let model = AppModel::new();
        let search = model.begin_search().await;
        model.finish_search(search, Err(ApiError::Network("search failed".into()))).await;

        let album = model.enter_album("9").await.unwrap();
        model.finish_album(album, Ok(vec![])).await;
        assert_eq!(
            model.get_content_state().await.active_error(),
            Some("No tracks found for album.")
        );

        model.dismiss_error().await;
        assert!(!model.has_error().await);

        model.navigate_back().await;
        assert_eq!(model.get_content_state().await.active_error(), Some("search failed"));
    }

    #[tokio::test]
    async fn new_search_resets_results_and_selection() {
        let model = AppModel::new();
        let first = model.begin_search().await;
        let albums = (1..=3)
            .map(|id| AlbumSummary {
                id,
                title: format!("Album {id}"),
                artwork_url: String::new(),
            })
            .collect();
        assert!(model.finish_search(first, Ok(albums)).await);
        model.content_move_down().await;
        model.content_move_down().await;
        assert_eq!(model.get_selected_album().await.map(|a| a.id), Some(3));

        model.begin_search().await;
        let state = model.get_content_state().await;
        assert!(state.search.request.results.is_empty());
        assert_eq!(state.search.selected_index, 0);
        assert_eq!(model.get_selected_album().await, None);

        model.content_move_down().await;
        assert_eq!(model.get_content_state().await.search.selected_index, 0);
    }

    #[tokio::test]
    async fn selection_is_clamped() {
        let model = AppModel::new();
        let ticket = model.enter_album("1").await.unwrap();
        model.finish_album(ticket, Ok(vec![track(1, 1), track(2, 2)])).await;

        model.content_move_up().await;
        model.content_move_down().await;
        model.content_move_down().await;
        model.content_move_down().await;
        assert_eq!(model.get_selected_track().await.unwrap().id, 2);

        model.content_move_up().await;
        assert_eq!(model.get_selected_track().await.unwrap().id, 1);
    }
}
