//! Navigation-related controller methods (search, album detail, back)

use crate::model::{ActiveSection, Route};
use super::AppController;

impl AppController {
    /// Search view: one album search for `term`.
    pub async fn perform_search(&self, term: &str) {
        let (ticket, catalog) = {
            let model = self.model.lock().await;
            let Some(catalog) = model.get_catalog_client().await else {
                tracing::warn!("No catalog client configured");
                return;
            };
            (model.begin_search().await, catalog)
        };
        tracing::debug!(term, ticket = ticket.0, "Performing search");

        let outcome = catalog.search_albums(term).await;
        let found = outcome.as_ref().map(|albums| albums.len()).unwrap_or(0);

        let model = self.model.lock().await;
        if !model.finish_search(ticket, outcome).await {
            tracing::debug!(term, ticket = ticket.0, "Discarding superseded search response");
            return;
        }
        if found > 0 {
            model.set_active_section(ActiveSection::Results).await;
        }
    }

    /// Enter the album detail view and load its tracks.
    pub async fn open_album(&self, album_id: &str) {
        let (ticket, catalog) = {
            let model = self.model.lock().await;
            let Some(catalog) = model.get_catalog_client().await else {
                tracing::warn!("No catalog client configured");
                return;
            };
            match model.enter_album(album_id).await {
                Some(ticket) => (ticket, catalog),
                None => return,
            }
        };
        tracing::debug!(album_id, ticket = ticket.0, "Opening album");

        let outcome = catalog.lookup_tracks(album_id).await;

        let model = self.model.lock().await;
        if !model.finish_album(ticket, outcome).await {
            tracing::debug!(album_id, ticket = ticket.0, "Discarding superseded track lookup");
        }
    }

    /// Go to `route`, loading whatever the target view needs.
    pub async fn navigate_to(&self, route: Route) {
        match route {
            Route::Search => self.navigate_back().await,
            Route::Album(album_id) => self.open_album(&album_id).await,
        }
    }

    /// Leave the detail view. Any preview it was playing stops with it.
    pub async fn navigate_back(&self) {
        self.stop_preview().await;
        let model = self.model.lock().await;
        if model.navigate_back().await {
            tracing::debug!("Returned to search view");
        }
    }
}
