//! Layout rendering (header bar, footer)

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, ContentState, Route, UiState};
use super::utils::border_style;

pub fn render_header(frame: &mut Frame, area: Rect, ui_state: &UiState, content_state: &ContentState) {
    match &content_state.route {
        Route::Search => render_search_input(frame, area, ui_state),
        Route::Album(album_id) => {
            let header = Paragraph::new("Esc: Back to search | Enter: Play / stop preview")
                .style(Style::default().fg(Color::Cyan))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" Album {} ", album_id))
                        .padding(Padding::horizontal(1)),
                );
            frame.render_widget(header, area);
        }
    }
}

fn render_search_input(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let is_focused = ui_state.active_section == ActiveSection::SearchInput;

    let (search_text, text_style) = if ui_state.search_query.is_empty() {
        ("Who do you want to hear?", Style::default().fg(Color::DarkGray))
    } else if is_focused {
        (ui_state.search_query.as_str(), Style::default().fg(Color::Green))
    } else {
        (ui_state.search_query.as_str(), Style::default().fg(Color::White))
    };

    let search = Paragraph::new(search_text).style(text_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Play Some Music! ")
            .padding(Padding::horizontal(1))
            .border_style(border_style(is_focused)),
    );
    frame.render_widget(search, area);
}

pub fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new("Music Search via iTunes | ? Help | Ctrl+Q Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
