//! Preview playback controller methods

use tokio::sync::mpsc::UnboundedReceiver;

use crate::audio::PreviewEvent;
use crate::model::PreviewCommand;
use super::AppController;

impl AppController {
    /// Toggle the preview of the selected track in the album view.
    pub async fn toggle_selected_preview(&self) {
        let track = {
            let model = self.model.lock().await;
            model.get_selected_track().await
        };
        let Some(track) = track else {
            return;
        };
        if track.preview_url.is_empty() {
            tracing::debug!(track_id = track.id, "Track has no preview");
            return;
        }
        self.toggle_preview(&track.preview_url).await;
    }

    pub async fn toggle_preview(&self, url: &str) {
        let (command, catalog) = {
            let model = self.model.lock().await;
            (model.toggle_preview(url).await, model.get_catalog_client().await)
        };

        // Whatever was playing stops now, even if the new clip is still downloading.
        self.audio.stop();

        let PreviewCommand::Play(url) = command else {
            tracing::debug!(url, "Preview toggled off");
            return;
        };
        let Some(catalog) = catalog else {
            return;
        };

        match catalog.fetch_preview(&url).await {
            Ok(data) => {
                let model = self.model.lock().await;
                if model.is_preview_current(&url).await {
                    self.audio.play(url, data);
                } else {
                    tracing::debug!(url = %url, "Preview toggled away during download");
                }
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Could not load preview");
                let model = self.model.lock().await;
                model.preview_finished(&url).await;
            }
        }
    }

    pub async fn stop_preview(&self) {
        let model = self.model.lock().await;
        if model.stop_preview().await.is_some() {
            self.audio.stop();
        }
    }

    /// Clear the playing marker whenever the output thread reports a clip
    /// has ended or failed.
    pub fn start_preview_event_listener(&self, mut events: UnboundedReceiver<PreviewEvent>) {
        let model = self.model.clone();
        tracing::info!("Starting preview event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let model = model.lock().await;
                if model.should_quit().await {
                    break;
                }
                match event {
                    PreviewEvent::Finished { url } => {
                        if model.preview_finished(&url).await {
                            tracing::debug!(url = %url, "Preview ended");
                        }
                    }
                    PreviewEvent::Failed { url, message } => {
                        tracing::warn!(url = %url, message = %message, "Preview playback failed");
                        model.preview_finished(&url).await;
                    }
                }
            }
            tracing::debug!("Preview event listener stopped");
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::mpsc::unbounded_channel;

    use crate::audio::{AudioCommand, PreviewEvent};
    use crate::controller::test_support::controller_with;
    use crate::model::testing::{FakeFetch, TRACK_RESULTS};

    const A: &str = "https://domain.com/previewA.m4a";
    const B: &str = "https://domain.com/previewB.m4a";

    fn commands(rx: &std::sync::mpsc::Receiver<AudioCommand>) -> Vec<String> {
        rx.try_iter()
            .map(|command| match command {
                AudioCommand::Play { url, .. } => format!("play {url}"),
                AudioCommand::Stop => "stop".to_string(),
                AudioCommand::Shutdown => "shutdown".to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn toggling_starts_switches_and_stops() {
        let fetch = Arc::new(FakeFetch::responding("clip"));
        let (controller, audio) = controller_with(fetch.clone());

        controller.toggle_preview(A).await;
        assert_eq!(commands(&audio), vec!["stop".to_string(), format!("play {A}")]);

        controller.toggle_preview(B).await;
        assert_eq!(commands(&audio), vec!["stop".to_string(), format!("play {B}")]);
        assert!(controller.model.lock().await.is_preview_current(B).await);

        controller.toggle_preview(B).await;
        assert_eq!(commands(&audio), vec!["stop".to_string()]);
        assert_eq!(controller.model.lock().await.get_preview_state().await.now_playing, None);

        assert_eq!(fetch.requests(), vec![A.to_string(), B.to_string()]);
    }

    #[tokio::test]
    async fn failed_download_clears_marker() {
        let fetch = Arc::new(FakeFetch::rejecting("offline"));
        let (controller, audio) = controller_with(fetch);

        controller.toggle_preview(A).await;
        assert_eq!(commands(&audio), vec!["stop".to_string()]);
        assert_eq!(controller.model.lock().await.get_preview_state().await.now_playing, None);
    }

    #[tokio::test]
    async fn selected_track_preview_is_toggled() {
        let fetch = Arc::new(FakeFetch::responding(TRACK_RESULTS));
        let (controller, audio) = controller_with(fetch);

        controller.open_album("123456").await;
        controller.model.lock().await.content_move_down().await;
        controller.toggle_selected_preview().await;

        assert_eq!(
            commands(&audio),
            vec!["stop".to_string(), "play https://domain.com/previewB.m4a".to_string()]
        );
    }

    #[tokio::test]
    async fn leaving_album_stops_preview() {
        let fetch = Arc::new(FakeFetch::responding("clip"));
        let (controller, audio) = controller_with(fetch);

        controller.toggle_preview(A).await;
        commands(&audio);
        controller.navigate_back().await;

        assert_eq!(commands(&audio), vec!["stop".to_string()]);
        assert_eq!(controller.model.lock().await.get_preview_state().await.now_playing, None);
    }

    #[tokio::test]
    async fn natural_end_clears_marker() {
        let fetch = Arc::new(FakeFetch::responding("clip"));
        let (controller, _audio) = controller_with(fetch);
        let (events_tx, events_rx) = unbounded_channel();
        controller.start_preview_event_listener(events_rx);

        controller.toggle_preview(A).await;
        events_tx.send(PreviewEvent::Finished { url: A.to_string() }).unwrap();

        for _ in 0..100 {
            if controller.model.lock().await.get_preview_state().await.now_playing.is_none() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("preview marker was never cleared");
    }
}
