// Header bar with the app title and settings shortcuts.

use ratatui::{prelude::*, widgets::*};

/// Draw the header at the top of the screen.
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let settings = Line::from(vec![
        Span::styled("Einstellungen: ", Style::default().fg(Color::DarkGray)),
        Span::styled("^T", Style::default().fg(Color::Yellow)),
        Span::styled(" Tour  ", Style::default().fg(Color::DarkGray)),
        Span::styled("^L", Style::default().fg(Color::Yellow)),
        Span::styled(" Abmelden ", Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Right);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" kpidash ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let widget = Paragraph::new(vec![Line::from(""), settings]).block(block);
    frame.render_widget(widget, area);
}
