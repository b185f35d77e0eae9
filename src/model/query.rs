//! Request URLs for the iTunes Search and Lookup endpoints

use crate::config::DEFAULT_BASE_URL;

const ALBUM_SEARCH_LIMIT: u32 = 25;
const TRACK_LOOKUP_LIMIT: u32 = 50;

/// Formats search terms and album ids into catalog request URLs.
#[derive(Clone, Debug)]
pub struct QueryBuilder {
    base_url: String,
}

impl QueryBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Percent-encodes `term` the way `encodeURIComponent` does, so
    /// "two words" becomes `two%20words`.
    pub fn album_search_url(&self, term: &str) -> String {
        format!(
            "{}/search?limit={}&term={}&entity=album&attribute=allArtistTerm",
            self.base_url,
            ALBUM_SEARCH_LIMIT,
            urlencoding::encode(term)
        )
    }

    /// The id comes straight from the navigation route and is not validated.
    /// A bad id surfaces as an API error or an empty listing.
    pub fn track_lookup_url(&self, album_id: &str) -> String {
        format!(
            "{}/lookup?id={}&limit={}&entity=song",
            self.base_url, album_id, TRACK_LOOKUP_LIMIT
        )
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
