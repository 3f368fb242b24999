// Login screen rendering.
// Centered credential form shown while the session gate is closed.

use ratatui::{prelude::*, widgets::*};

use crate::state::{LoginField, LoginForm};

use super::modal::centered;

/// Draw the login form.
pub fn draw_login(frame: &mut Frame, form: &LoginForm) {
    let area = centered(frame.area(), 50, 11);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Anmeldung ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let field = |label: &'static str, value: String, focused: bool| {
        let label_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![Span::styled(label, label_style), Span::raw(value)];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    };

    let mut lines = vec![
        Line::from(""),
        field(
            " Benutzer: ",
            form.username.clone(),
            form.focused == LoginField::Username,
        ),
        Line::from(""),
        field(
            " Passwort: ",
            form.masked_password(),
            form.focused == LoginField::Password,
        ),
        Line::from(""),
    ];

    match &form.error {
        Some(error) => lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("")),
    }

    lines.push(Line::from(""));
    lines.push(
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::styled(" = Anmelden  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::styled(" = Feld  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" = Beenden", Style::default().fg(Color::DarkGray)),
        ])
        .alignment(Alignment::Center),
    );

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
