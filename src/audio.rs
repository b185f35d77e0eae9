//! Preview audio output
//!
//! Output runs on its own OS thread since the rodio stream can't move between
//! threads. The controller feeds it commands; the thread reports back when a
//! preview ends on its own.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

#[cfg(feature = "audio")]
const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(100);

#[derive(Debug)]
pub enum AudioCommand {
    Play { url: String, data: Vec<u8> },
    Stop,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewEvent {
    /// Playback reached the end of the clip
    Finished { url: String },
    /// The clip could not be decoded or played
    Failed { url: String, message: String },
}

/// Handle to the output thread. Cheap to clone.
#[derive(Clone)]
pub struct AudioBackend {
    commands: Sender<AudioCommand>,
}

impl AudioBackend {
    /// Start the output thread. With `enabled` false, or without the `audio`
    /// feature, previews are acknowledged and reported finished straight away.
    pub fn spawn(enabled: bool, volume: f32) -> anyhow::Result<(Self, UnboundedReceiver<PreviewEvent>)> {
        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, event_rx) = unbounded_channel();

        thread::Builder::new()
            .name("preview-audio".to_string())
            .spawn(move || {
                if enabled {
                    run_output(command_rx, event_tx, volume);
                } else {
                    run_silent(command_rx, event_tx);
                }
            })?;

        Ok((Self { commands: command_tx }, event_rx))
    }

    #[cfg(test)]
    pub fn from_sender(commands: Sender<AudioCommand>) -> Self {
        Self { commands }
    }

    pub fn play(&self, url: String, data: Vec<u8>) {
        tracing::debug!(url = %url, bytes = data.len(), "Starting preview");
        self.send(AudioCommand::Play { url, data });
    }

    pub fn stop(&self) {
        self.send(AudioCommand::Stop);
    }

    pub fn shutdown(&self) {
        self.send(AudioCommand::Shutdown);
    }

    fn send(&self, command: AudioCommand) {
        if self.commands.send(command).is_err() {
            tracing::warn!("Preview audio thread is gone");
        }
    }
}

#[cfg(feature = "audio")]
fn run_output(commands: Receiver<AudioCommand>, events: UnboundedSender<PreviewEvent>, volume: f32) {
    use rodio::{OutputStream, Sink};
    use std::sync::mpsc::RecvTimeoutError;

    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "No audio output device, previews disabled");
            return run_silent(commands, events);
        }
    };
    tracing::info!(volume, "Preview audio output ready");

    let mut current: Option<(String, Sink)> = None;

    loop {
        match commands.recv_timeout(POLL_INTERVAL) {
            Ok(AudioCommand::Play { url, data }) => {
                if let Some((_, sink)) = current.take() {
                    sink.stop();
                }
                match start_sink(&handle, data, volume) {
                    Ok(sink) => current = Some((url, sink)),
                    Err(e) => {
                        tracing::error!(url = %url, error = %e, "Failed to play preview");
                        let _ = events.send(PreviewEvent::Failed { url, message: e.to_string() });
                    }
                }
            }
            Ok(AudioCommand::Stop) => {
                if let Some((url, sink)) = current.take() {
                    tracing::debug!(url = %url, "Preview stopped");
                    sink.stop();
                }
            }
            Ok(AudioCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        if current.as_ref().is_some_and(|(_, sink)| sink.empty()) {
            if let Some((url, _)) = current.take() {
                tracing::debug!(url = %url, "Preview finished");
                let _ = events.send(PreviewEvent::Finished { url });
            }
        }
    }

    tracing::debug!("Preview audio thread exiting");
}

#[cfg(feature = "audio")]
fn start_sink(handle: &rodio::OutputStreamHandle, data: Vec<u8>, volume: f32) -> anyhow::Result<rodio::Sink> {
    let sink = rodio::Sink::try_new(handle)?;
    sink.set_volume(volume);
    let source = rodio::Decoder::new(std::io::Cursor::new(data))?;
    sink.append(source);
    Ok(sink)
}

#[cfg(not(feature = "audio"))]
fn run_output(commands: Receiver<AudioCommand>, events: UnboundedSender<PreviewEvent>, _volume: f32) {
    tracing::warn!("Built without the `audio` feature, previews will not be heard");
    run_silent(commands, events);
}

fn run_silent(commands: Receiver<AudioCommand>, events: UnboundedSender<PreviewEvent>) {
    loop {
        match commands.recv() {
            Ok(AudioCommand::Play { url, .. }) => {
                let _ = events.send(PreviewEvent::Finished { url });
            }
            Ok(AudioCommand::Stop) => {}
            Ok(AudioCommand::Shutdown) | Err(_) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn silent_output_reports_previews_finished() {
        let (backend, mut events) = AudioBackend::spawn(false, 1.0).unwrap();
        backend.play("https://domain.com/a.m4a".to_string(), vec![0; 4]);

        let event = events.recv().await.unwrap();
        assert_eq!(event, PreviewEvent::Finished { url: "https://domain.com/a.m4a".to_string() });

        backend.shutdown();
        assert!(events.recv().await.is_none());
    }
}
