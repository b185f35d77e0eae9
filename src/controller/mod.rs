//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and drives requests between the model and the catalog client.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `navigation`: Search submission, album detail and back navigation
//! - `preview`: Preview playback toggling and audio events

mod input;
mod navigation;
mod preview;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::audio::AudioBackend;
use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) audio: AudioBackend,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, audio: AudioBackend) -> Self {
        Self { model, audio }
    }
}
