//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Routes, focus and UI state
//! - `query`: Request URLs for the catalog endpoints
//! - `content`: Catalog items and the per-view request state machine
//! - `playback`: Preview playback toggle state
//! - `catalog_client`: iTunes catalog client and its HTTP seam
//! - `app_model`: Main application model with state management methods

mod types;
mod query;
mod content;
mod playback;
mod catalog_client;
mod app_model;

pub use types::{ActiveSection, Route, UiState};

pub use query::QueryBuilder;

pub use content::{
    AlbumPage, AlbumSummary, ContentState, RequestPhase, RequestTicket, SearchPage, Track,
};

pub use playback::{PreviewCommand, PreviewState};

pub use catalog_client::CatalogClient;

#[cfg(test)]
pub(crate) use catalog_client::testing;

pub use app_model::AppModel;
