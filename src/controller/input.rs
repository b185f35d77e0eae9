//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, Route};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.dismiss_error().await;
            }
            return Ok(());
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;
        let route = model.current_route().await;

        match route {
            Route::Search if ui_state.active_section == ActiveSection::SearchInput => match key.code {
                KeyCode::Enter => {
                    let query = ui_state.search_query.clone();
                    drop(model);
                    if !query.is_empty() {
                        let controller = self.clone();
                        tokio::spawn(async move {
                            controller.perform_search(&query).await;
                        });
                    }
                }
                KeyCode::Esc => model.update_search_query(String::new()).await,
                KeyCode::Backspace => model.backspace_search().await,
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Down => model.cycle_section().await,
                KeyCode::Char(c) => model.append_to_search(c).await,
                _ => {}
            },
            Route::Search => match key.code {
                KeyCode::Up => model.content_move_up().await,
                KeyCode::Down => model.content_move_down().await,
                KeyCode::Enter => {
                    let selected = model.get_selected_album().await;
                    drop(model);
                    if let Some(album) = selected {
                        let controller = self.clone();
                        tokio::spawn(async move {
                            controller.navigate_to(album.route()).await;
                        });
                    }
                }
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('/') => model.cycle_section().await,
                KeyCode::Char('?') => model.show_help_popup().await,
                KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true).await,
                _ => {}
            },
            Route::Album(_) => match key.code {
                KeyCode::Up => model.content_move_up().await,
                KeyCode::Down => model.content_move_down().await,
                KeyCode::Enter | KeyCode::Char(' ') => {
                    drop(model);
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.toggle_selected_preview().await;
                    });
                }
                KeyCode::Esc | KeyCode::Backspace => {
                    drop(model);
                    self.navigate_back().await;
                }
                KeyCode::Char('?') => model.show_help_popup().await,
                KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true).await,
                _ => {}
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::controller::test_support::controller_with;
    use crate::controller::AppController;
    use crate::model::testing::{FakeFetch, ALBUM_RESULTS};
    use crate::model::{ActiveSection, Route};

    async fn press(controller: &AppController, code: KeyCode) {
        controller
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .await
            .unwrap();
    }

    async fn type_text(controller: &AppController, text: &str) {
        for c in text.chars() {
            press(controller, KeyCode::Char(c)).await;
        }
    }

    async fn wait_for_requests(fetch: &FakeFetch, count: usize) {
        while fetch.requests().len() < count {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn typing_edits_query() {
        let fetch = Arc::new(FakeFetch::responding(ALBUM_RESULTS));
        let (controller, _audio) = controller_with(fetch.clone());

        type_text(&controller, "two wordz").await;
        press(&controller, KeyCode::Backspace).await;
        press(&controller, KeyCode::Char('s')).await;

        let ui_state = controller.model.lock().await.get_ui_state().await;
        assert_eq!(ui_state.search_query, "two words");
        assert!(fetch.requests().is_empty());
    }

    #[tokio::test]
    async fn enter_submits_once_and_empty_query_is_ignored() {
        let fetch = Arc::new(FakeFetch::responding(ALBUM_RESULTS));
        let (controller, _audio) = controller_with(fetch.clone());

        press(&controller, KeyCode::Enter).await;
        tokio::task::yield_now().await;
        assert!(fetch.requests().is_empty());

        type_text(&controller, "two words").await;
        press(&controller, KeyCode::Enter).await;
        wait_for_requests(&fetch, 1).await;

        let requests = fetch.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].contains("term=two%20words"));
    }

    #[tokio::test]
    async fn error_blocks_keys_until_dismissed() {
        let fetch = Arc::new(FakeFetch::rejecting("Could not fetch albums"));
        let (controller, _audio) = controller_with(fetch.clone());

        controller.perform_search("TEST").await;
        press(&controller, KeyCode::Char('x')).await;
        assert_eq!(controller.model.lock().await.get_ui_state().await.search_query, "");

        press(&controller, KeyCode::Esc).await;
        assert!(!controller.model.lock().await.has_error().await);
        assert_eq!(fetch.requests().len(), 1);
    }

    #[tokio::test]
    async fn enter_on_album_opens_detail_view() {
        let fetch = Arc::new(FakeFetch::responding(ALBUM_RESULTS));
        let (controller, _audio) = controller_with(fetch.clone());

        controller.perform_search("TEST").await;
        assert_eq!(
            controller.model.lock().await.get_ui_state().await.active_section,
            ActiveSection::Results
        );

        press(&controller, KeyCode::Down).await;
        press(&controller, KeyCode::Enter).await;
        wait_for_requests(&fetch, 2).await;

        assert!(fetch.requests()[1].contains("id=200"));
        assert_eq!(
            controller.model.lock().await.current_route().await,
            Route::Album("200".to_string())
        );
    }

    #[tokio::test]
    async fn keys_during_pending_search_do_not_open_previous_album() {
        let fetch = Arc::new(FakeFetch::responding(ALBUM_RESULTS).gated());
        let (controller, _audio) = controller_with(fetch.clone());

        fetch.release(1);
        controller.perform_search("first").await;

        let second = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.perform_search("second").await })
        };
        wait_for_requests(&fetch, 2).await;
        assert!(controller.model.lock().await.get_content_state().await.is_loading());

        press(&controller, KeyCode::Down).await;
        press(&controller, KeyCode::Enter).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        {
            let model = controller.model.lock().await;
            let state = model.get_content_state().await;
            assert_eq!(state.route, Route::Search);
            assert!(state.search.request.results.is_empty());
            assert_eq!(state.search.selected_index, 0);
        }
        assert_eq!(fetch.requests().len(), 2);

        fetch.release(1);
        second.await.unwrap();
        assert_eq!(controller.model.lock().await.get_content_state().await.search.request.results.len(), 3);
    }

    #[tokio::test]
    async fn ctrl_c_quits_from_search_input() {
        let fetch = Arc::new(FakeFetch::responding(ALBUM_RESULTS));
        let (controller, _audio) = controller_with(fetch);

        controller
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .await
            .unwrap();
        assert!(controller.model.lock().await.should_quit().await);
    }
}
