//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (styles, truncation, scrollable lists)
//! - `layout`: Header (search input or album bar) and footer
//! - `content`: Main content area rendering
//! - `overlays`: Modal overlays (error, help)

mod utils;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, PreviewState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, content_state: &ContentState, preview_state: &PreviewState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar or album header
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        layout::render_header(frame, chunks[0], ui_state, content_state);
        content::render_main_content(frame, chunks[1], ui_state, content_state, preview_state);
        layout::render_footer(frame, chunks[2]);

        // Error notification overlay (if the current view has one)
        if let Some(message) = content_state.active_error() {
            overlays::render_error_notification(frame, message);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
