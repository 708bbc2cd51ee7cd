//! Launcher view rendering.

use crate::app::App;
use crate::colors;
use quicklaunch_core::registry::Registry;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

const PLACEHOLDER: &str = "Type to search...";

/// Render the input line, the filtered list and the key hints.
pub fn render(f: &mut Frame, app: &mut App, registry: &Registry) {
    let bg_block = Block::default().style(Style::default().bg(colors::BG));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_input(f, app, chunks[0]);
    render_list(f, app, registry, chunks[1]);
    render_hints(f, chunks[2]);
}

// Input text length is bounded by the terminal width
#[allow(clippy::cast_possible_truncation)]
fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" quicklaunch ")
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(colors::OUTLINE));

    let text = if app.input.is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(colors::OUTLINE))
    } else {
        Span::styled(app.input.as_str(), Style::default().fg(colors::ON_SURFACE))
    };

    f.render_widget(Paragraph::new(text).block(block), area);

    let cursor_x = area.x + 1 + Line::raw(app.input.as_str()).width() as u16;
    f.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
}

fn render_list(f: &mut Frame, app: &mut App, registry: &Registry, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} / {} ", app.items.len(), registry.len()))
        .border_style(Style::default().fg(colors::OUTLINE));
    app.list_area = block.inner(area);

    let items: Vec<ListItem> = app
        .items
        .iter()
        .filter_map(|id| registry.get(*id))
        .map(|candidate| {
            let mut spans = vec![Span::styled(
                candidate.title.as_str(),
                Style::default().fg(colors::ON_SURFACE),
            )];
            if !candidate.description.is_empty() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    candidate.description.as_str(),
                    Style::default().fg(colors::SUBTEXT),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(colors::SURFACE_HIGH)
            .fg(colors::PRIMARY)
            .add_modifier(Modifier::BOLD),
    );

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_hints(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled("↑↓", Style::default().fg(colors::PRIMARY)),
        Span::styled(" move  ", Style::default().fg(colors::OUTLINE)),
        Span::styled("enter", Style::default().fg(colors::PRIMARY)),
        Span::styled(" run  ", Style::default().fg(colors::OUTLINE)),
        Span::styled("esc", Style::default().fg(colors::PRIMARY)),
        Span::styled(" close", Style::default().fg(colors::OUTLINE)),
    ]);
    f.render_widget(Paragraph::new(hints), area);
}
