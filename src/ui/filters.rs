// Filter bar rendering.
// One bordered cell per filter field plus a line for favorite state and errors.

use ratatui::{prelude::*, widgets::*};

use crate::state::{FilterField, FilterForm};

/// Draw the filter bar with the draft values.
pub fn draw_filter_bar(frame: &mut Frame, form: &FilterForm, has_focus: bool, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, FilterField::ALL.len() as u32); 6])
        .split(rows[0]);

    for (field, cell) in FilterField::ALL.iter().zip(cells.iter()) {
        let focused = has_focus && form.focused == *field;
        draw_field(frame, *field, form.value(*field), focused, *cell);
    }

    let favorite = if form.favorite_active {
        Span::styled(" ★ Favorit aktiv", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ☆ Kein Favorit", Style::default().fg(Color::DarkGray))
    };
    let mut info = vec![favorite];
    if let Some(error) = &form.error {
        info.push(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(info)), rows[1]);
}

fn draw_field(frame: &mut Frame, field: FilterField, value: &str, focused: bool, area: Rect) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", field.label()));

    let line = if field.is_text() {
        let shown = if value.is_empty() && !focused {
            Span::styled("JJJJ-MM-TT", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(value.to_string())
        };
        let mut spans = vec![shown];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    } else if focused {
        Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::Yellow)),
            Span::styled(value.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" ▶", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(value.to_string())
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
