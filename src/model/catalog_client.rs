//! iTunes catalog client: album search, track lookup and preview download

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::{log_api_request, log_api_result};
use super::content::{AlbumSummary, Track};
use super::query::QueryBuilder;

/// One HTTP GET. The seam between the client and the network.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &str) -> ApiResult<Vec<u8>>;
}

/// `HttpFetch` over a shared reqwest client
pub struct ReqwestFetch {
    client: reqwest::Client,
}

impl ReqwestFetch {
    pub fn new(user_agent: &str) -> ApiResult<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetch {
    async fn get(&self, url: &str) -> ApiResult<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Catalog API client. Each call issues exactly one request.
#[derive(Clone)]
pub struct CatalogClient {
    fetch: Arc<dyn HttpFetch>,
    queries: QueryBuilder,
}

impl CatalogClient {
    pub fn new(fetch: Arc<dyn HttpFetch>, queries: QueryBuilder) -> Self {
        Self { fetch, queries }
    }

    pub fn from_config(api: &ApiConfig) -> ApiResult<Self> {
        let fetch = ReqwestFetch::new(&api.user_agent)?;
        Ok(Self::new(Arc::new(fetch), QueryBuilder::new(api.base_url.clone())))
    }

    pub async fn search_albums(&self, term: &str) -> ApiResult<Vec<AlbumSummary>> {
        let url = self.queries.album_search_url(term);
        log_api_request!("search_albums", url = %url, term);

        let result = match self.fetch.get(&url).await {
            Ok(bytes) => parse_album_search(&bytes),
            Err(e) => Err(e),
        };
        log_api_result!("search_albums", result);
        result
    }

    pub async fn lookup_tracks(&self, album_id: &str) -> ApiResult<Vec<Track>> {
        let url = self.queries.track_lookup_url(album_id);
        log_api_request!("lookup_tracks", url = %url, album_id);

        let result = match self.fetch.get(&url).await {
            Ok(bytes) => parse_track_lookup(&bytes),
            Err(e) => Err(e),
        };
        log_api_result!("lookup_tracks", result);
        result
    }

    /// Raw bytes of a preview clip
    pub async fn fetch_preview(&self, url: &str) -> ApiResult<Vec<u8>> {
        log_api_request!("fetch_preview", url);
        let result = self.fetch.get(url).await;
        if let Err(e) = &result {
            tracing::error!(url, error = %e, "Preview download failed");
        }
        result
    }
}

#[derive(Debug, Deserialize)]
struct CatalogResponse<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAlbum {
    collection_id: i64,
    collection_name: String,
    #[serde(rename = "artworkUrl100", default)]
    artwork_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrack {
    track_id: i64,
    track_name: String,
    #[serde(default)]
    artist_name: String,
    #[serde(default)]
    track_number: u32,
    #[serde(default)]
    preview_url: String,
}

pub fn parse_album_search(bytes: &[u8]) -> ApiResult<Vec<AlbumSummary>> {
    let response: CatalogResponse<RawAlbum> = serde_json::from_slice(bytes)?;
    Ok(response
        .results
        .into_iter()
        .map(|raw| AlbumSummary {
            id: raw.collection_id,
            title: raw.collection_name,
            artwork_url: raw.artwork_url,
        })
        .collect())
}

/// The first lookup result is always the collection record itself, so it is
/// dropped before the rest are read as tracks. Tracks come back ordered by
/// track number.
pub fn parse_track_lookup(bytes: &[u8]) -> ApiResult<Vec<Track>> {
    let response: CatalogResponse<serde_json::Value> = serde_json::from_slice(bytes)?;

    let mut tracks = response
        .results
        .into_iter()
        .skip(1)
        .map(|value| {
            let raw: RawTrack = serde_json::from_value(value)?;
            Ok(Track {
                id: raw.track_id,
                title: raw.track_name,
                artist_name: raw.artist_name,
                track_number: raw.track_number,
                preview_url: raw.preview_url,
            })
        })
        .collect::<ApiResult<Vec<_>>>()?;

    tracks.sort_by_key(|track| track.track_number);
    Ok(tracks)
}

#[cfg(test)]
pub(crate) mod testing {
    //! A recording `HttpFetch` with canned responses

    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::Semaphore;

    use super::HttpFetch;
    use crate::error::{ApiError, ApiResult};

    pub const ALBUM_RESULTS: &str = r#"{"resultCount":3,"results":[
        {"collectionId":100,"collectionName":"Album A","artworkUrl100":"http://domain.com/albumA.jpg"},
        {"collectionId":200,"collectionName":"Album B","artworkUrl100":"http://domain.com/albumB.jpg"},
        {"collectionId":300,"collectionName":"Album C","artworkUrl100":"http://domain.com/albumC.jpg"}
    ]}"#;

    pub const TRACK_RESULTS: &str = r#"{"resultCount":4,"results":[
        {"wrapperType":"collection","collectionId":123456},
        {"trackId":303,"artistName":"Artist C","trackName":"Song C","trackNumber":3,"previewUrl":"https://domain.com/previewC.m4a"},
        {"trackId":101,"artistName":"Artist A","trackName":"Song A","trackNumber":1,"previewUrl":"https://domain.com/previewA.m4a"},
        {"trackId":202,"artistName":"Artist B","trackName":"Song B","trackNumber":2,"previewUrl":"https://domain.com/previewB.m4a"}
    ]}"#;

    pub const EMPTY_RESULTS: &str = r#"{"resultCount":0,"results":[]}"#;

    pub struct FakeFetch {
        response: Mutex<ApiResult<Vec<u8>>>,
        requests: Mutex<Vec<String>>,
        gate: Option<Semaphore>,
    }

    impl FakeFetch {
        pub fn responding(body: &str) -> Self {
            Self {
                response: Mutex::new(Ok(body.as_bytes().to_vec())),
                requests: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        pub fn rejecting(message: &str) -> Self {
            Self {
                response: Mutex::new(Err(ApiError::Network(message.to_string()))),
                requests: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        /// Requests stay pending until `release` is called.
        pub fn gated(mut self) -> Self {
            self.gate = Some(Semaphore::new(0));
            self
        }

        pub fn release(&self, count: usize) {
            if let Some(gate) = &self.gate {
                gate.add_permits(count);
            }
        }

        pub fn respond_with(&self, body: &str) {
            *self.response.lock().unwrap() = Ok(body.as_bytes().to_vec());
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpFetch for FakeFetch {
        async fn get(&self, url: &str) -> ApiResult<Vec<u8>> {
            self.requests.lock().unwrap().push(url.to_string());
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
            self.response.lock().unwrap().clone()
        }
    }
}
