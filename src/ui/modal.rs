// Modal UI components.
// Level warning, red KPI report, onboarding prompt, and tour dialogs.

use ratatui::{prelude::*, widgets::*};

use crate::kpi::red_kpis;
use crate::state::TourState;
use crate::state::tour::TOUR_STEPS;

/// Centered rectangle of at most `width` x `height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn modal_block(title: String, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn key_hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::styled(label, Style::default().fg(Color::DarkGray)),
    ]
}

fn instructions(hints: Vec<[Span<'static>; 2]>) -> Line<'static> {
    Line::from(hints.into_iter().flatten().collect::<Vec<_>>()).alignment(Alignment::Center)
}

/// Draw the warning shown when an unspecified level was replaced.
pub fn draw_level_warning(frame: &mut Frame, dont_show_again: bool) {
    let modal_area = centered(frame.area(), 64, 10);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let checkbox = if dont_show_again { "[x]" } else { "[ ]" };
    let lines = vec![
        Line::from(""),
        Line::from(" Es wurde kein Level ausgewählt."),
        Line::from(" Das Dashboard verwendet stattdessen das Level „Gering“."),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!(" {} ", checkbox),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("Nicht mehr anzeigen"),
        ]),
        Line::from(""),
        instructions(vec![
            key_hint("Space", " = Umschalten  "),
            key_hint("Enter/Esc", " = Schließen"),
        ]),
    ];

    let widget = Paragraph::new(lines).block(modal_block(" Hinweis ".to_string(), Color::Yellow));
    frame.render_widget(widget, modal_area);
}

/// Draw the red KPI report with the tooltip of the selected entry.
pub fn draw_red_kpi_report(frame: &mut Frame, selected: usize) {
    let kpis = red_kpis();
    let modal_area = centered(frame.area(), 80, 24);
    frame.render_widget(Clear, modal_area);

    let block = modal_block(" Kritische Kennzahlen ".to_string(), Color::Red);
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(kpis.len() as u16 + 2), // KPI list
            Constraint::Min(1),                        // Tooltip
            Constraint::Length(1),                     // Instructions
        ])
        .split(inner);

    let items: Vec<ListItem> = kpis
        .iter()
        .map(|kpi| {
            ListItem::new(Line::from(vec![
                Span::styled(kpi.title, Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(
                    kpi.value,
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(selected.min(kpis.len().saturating_sub(1))));

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Im roten Bereich "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list_widget, chunks[0], &mut list_state);

    if let Some(kpi) = kpis.get(selected) {
        let tooltip = Paragraph::new(kpi.tooltip)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: false });
        frame.render_widget(tooltip, chunks[1]);
    }

    frame.render_widget(
        instructions(vec![
            key_hint("↑↓", " = Kennzahl  "),
            key_hint("Enter/Esc", " = Schließen"),
        ]),
        chunks[2],
    );
}

/// Draw the onboarding prompt shown after the first load.
pub fn draw_onboarding_modal(frame: &mut Frame) {
    let modal_area = centered(frame.area(), 60, 9);
    frame.render_widget(Clear, modal_area);

    let lines = vec![
        Line::from(""),
        Line::from(" Willkommen im KPI-Dashboard!"),
        Line::from(" Eine kurze Tour zeigt die wichtigsten Funktionen."),
        Line::from(""),
        Line::from(""),
        instructions(vec![
            key_hint("Enter", " = Tour starten  "),
            key_hint("Esc", " = Später  "),
            key_hint("n", " = Nicht mehr zeigen"),
        ]),
    ];

    let widget =
        Paragraph::new(lines).block(modal_block(" Willkommen ".to_string(), Color::Cyan));
    frame.render_widget(widget, modal_area);
}

/// Draw the current page of the onboarding tour.
pub fn draw_onboarding_tour(frame: &mut Frame, tour: &TourState) {
    let modal_area = centered(frame.area(), 64, 10);
    frame.render_widget(Clear, modal_area);

    let step = tour.current();
    let title = format!(
        " Tour {}/{} · {} ",
        tour.index() + 1,
        TOUR_STEPS.len(),
        step.title
    );
    let block = modal_block(title, Color::Cyan);
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let body = Paragraph::new(step.body).wrap(Wrap { trim: true });
    frame.render_widget(body, chunks[0]);

    let next_label = if tour.is_last() {
        " = Fertig  "
    } else {
        " = Weiter  "
    };
    frame.render_widget(
        instructions(vec![
            key_hint("←", " = Zurück  "),
            key_hint("→/Enter", next_label),
            key_hint("Esc", " = Überspringen"),
        ]),
        chunks[1],
    );
}
