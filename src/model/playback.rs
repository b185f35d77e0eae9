//! Preview playback toggle state

/// What the audio backend has to do after a toggle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewCommand {
    /// Stop the current preview; nothing plays afterwards.
    Stop,
    /// Start `url`, stopping whatever was playing first.
    Play(String),
}

/// Which preview, if any, is currently playing
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviewState {
    pub now_playing: Option<String>,
}

impl PreviewState {
    /// Toggling the playing URL stops it; any other URL replaces it.
    pub fn toggle(&mut self, url: &str) -> PreviewCommand {
        if self.now_playing.as_deref() == Some(url) {
            self.now_playing = None;
            PreviewCommand::Stop
        } else {
            self.now_playing = Some(url.to_string());
            PreviewCommand::Play(url.to_string())
        }
    }

    /// Playback of `url` reached its end. A late notification for a preview
    /// that was already replaced is ignored.
    pub fn finished(&mut self, url: &str) -> bool {
        if self.now_playing.as_deref() == Some(url) {
            self.now_playing = None;
            true
        } else {
            false
        }
    }

    pub fn stop(&mut self) -> Option<PreviewCommand> {
        self.now_playing.take().map(|_| PreviewCommand::Stop)
    }

    pub fn is_playing(&self, url: &str) -> bool {
        self.now_playing.as_deref() == Some(url)
    }
}
