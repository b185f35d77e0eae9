//! Main content area rendering (album results, album track list)

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{ListItem, Paragraph},
    Frame,
};

use crate::model::{
    ActiveSection, AlbumPage, AlbumSummary, ContentState, PreviewState, RequestPhase, Route,
    SearchPage, Track, UiState,
};
use super::utils::{calculate_num_width, content_block, render_scrollable_list, row_style, truncate_string};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    preview_state: &PreviewState,
) {
    match &content_state.route {
        Route::Search => {
            let is_focused = ui_state.active_section == ActiveSection::Results;
            render_search_page(frame, area, &content_state.search, is_focused);
        }
        Route::Album(_) => match &content_state.album {
            Some(page) => render_album_page(frame, area, page, preview_state),
            None => render_loading(frame, area, " Tracks ", true),
        },
    }
}

fn render_loading(frame: &mut Frame, area: Rect, title: &str, is_focused: bool) {
    let loading = Paragraph::new("Loading...")
        .style(Style::default().fg(Color::Yellow))
        .block(content_block(title, is_focused));
    frame.render_widget(loading, area);
}

fn render_search_page(frame: &mut Frame, area: Rect, page: &SearchPage, is_focused: bool) {
    const TITLE: &str = " Albums ";

    match page.request.phase() {
        RequestPhase::Pending => render_loading(frame, area, TITLE, is_focused),
        RequestPhase::Idle => {
            let hint = Paragraph::new("Type an artist name and press Enter to find albums\n\nTab: Switch between search and results\n↑/↓: Select album\nEnter: Show tracks")
                .style(Style::default().fg(Color::DarkGray))
                .block(content_block(TITLE, is_focused));
            frame.render_widget(hint, area);
        }
        RequestPhase::Errored(_) | RequestPhase::Populated(_) => {
            let content_width = area.width.saturating_sub(4) as usize;
            let items = album_items(&page.request.results, page.selected_index, is_focused, content_width);
            render_scrollable_list(frame, area, items, page.selected_index, content_block(TITLE, is_focused));
        }
    }
}

fn album_items(albums: &[AlbumSummary], selected_index: usize, is_focused: bool, content_width: usize) -> Vec<ListItem<'static>> {
    let num_width = calculate_num_width(albums.len());
    // " {num}   {title}   {artwork}"
    let remaining = content_width.saturating_sub(1 + num_width + 3 + 3);
    let title_width = (remaining * 40) / 100;

    albums
        .iter()
        .enumerate()
        .map(|(i, album)| {
            let style = row_style(i == selected_index, is_focused);
            let line = Line::from(vec![
                Span::styled(format!(" {:>width$}   ", i + 1, width = num_width), style),
                Span::styled(truncate_string(&album.title, title_width), style),
                Span::styled("   ", style),
                Span::styled(album.artwork_url.clone(), Style::default().fg(Color::DarkGray)),
            ]);
            ListItem::new(line)
        })
        .collect()
}

fn render_album_page(frame: &mut Frame, area: Rect, page: &AlbumPage, preview_state: &PreviewState) {
    const TITLE: &str = " Tracks ";

    match page.request.phase() {
        RequestPhase::Pending | RequestPhase::Idle => render_loading(frame, area, TITLE, true),
        RequestPhase::Errored(_) | RequestPhase::Populated(_) => {
            let content_width = area.width.saturating_sub(4) as usize;
            let items = track_items(&page.request.results, page.selected_index, preview_state, content_width);
            render_scrollable_list(frame, area, items, page.selected_index, content_block(TITLE, true));
        }
    }
}

fn track_items(tracks: &[Track], selected_index: usize, preview_state: &PreviewState, content_width: usize) -> Vec<ListItem<'static>> {
    let num_width = calculate_num_width(tracks.len());
    // "{marker} Track {num}   {title} ({artist})"
    let title_width = content_width.saturating_sub(2 + 6 + num_width + 3);

    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_playing = !track.preview_url.is_empty() && preview_state.is_playing(&track.preview_url);
            let style = if is_playing {
                Style::default().fg(Color::Cyan)
            } else {
                row_style(i == selected_index, true)
            };
            let marker = if is_playing { "▶" } else { " " };
            let label = format!("{} ({})", track.title, track.artist_name);

            let line = Line::from(vec![
                Span::styled(format!("{} Track {:<width$}   ", marker, track.track_number, width = num_width), style),
                Span::styled(truncate_string(&label, title_width), style),
            ]);
            ListItem::new(line)
        })
        .collect()
}
