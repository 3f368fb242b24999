// KPI grid rendering.
// Committed filter summary, perspective tabs, and the ordered KPI cards.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Focus};
use crate::kpi::{Band, KpiCard};
use crate::state::DashboardView;

use super::skeleton::grid_cells;

fn band_color(band: Band) -> Color {
    match band {
        Band::Green => Color::Green,
        Band::Yellow => Color::Yellow,
        Band::Red => Color::Red,
    }
}

/// Draw the grid for the committed filters.
pub fn draw_grid(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Committed filters
            Constraint::Length(2), // Perspective tabs
            Constraint::Min(1),    // Cards
        ])
        .split(area);

    draw_summary(frame, app, chunks[0]);
    draw_view_tabs(frame, app, chunks[1]);

    let state = app.session.state();
    let cards = app.grid.cards(&state.card_order);
    let grid_focused = app.focus == Focus::Grid;
    for (index, (card, cell)) in cards
        .iter()
        .zip(grid_cells(chunks[2], cards.len()))
        .enumerate()
    {
        let selected = grid_focused && index == app.grid.selected;
        draw_card(frame, card, selected, cell);
    }
}

fn draw_summary(frame: &mut Frame, app: &App, area: Rect) {
    let filters = &app.session.state().filters;
    let mut spans = vec![
        Span::styled(" Aktiv: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} · {}", filters.user_group, filters.level.label()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if !filters.format.is_empty() {
        spans.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(filters.format.clone()));
    }
    let range = match (filters.start_date, filters.end_date) {
        (Some(start), Some(end)) => Some(format!("{} – {}", start, end)),
        (Some(start), None) => Some(format!("ab {}", start)),
        (None, Some(end)) => Some(format!("bis {}", end)),
        (None, None) => None,
    };
    if let Some(range) = range {
        spans.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(range));
    }
    if !filters.event_count.is_empty() {
        spans.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(format!("{} Veranstaltungen", filters.event_count)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_view_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = DashboardView::ALL
        .iter()
        .map(|view| {
            let style = if *view == app.grid.view {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(view.title(), style))
        })
        .collect();

    let selected_index = DashboardView::ALL
        .iter()
        .position(|view| *view == app.grid.view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(selected_index)
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs, area);
}

fn draw_card(frame: &mut Frame, card: &KpiCard, selected: bool, area: Rect) {
    let color = band_color(card.band);
    let (border_type, border_style) = if selected {
        (
            BorderType::Thick,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (BorderType::Plain, Style::default().fg(Color::DarkGray))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .title(format!(" {} ", card.title));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            card.value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(text, area);
}
