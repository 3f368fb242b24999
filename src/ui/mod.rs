// UI module for rendering the TUI.
// Picks login, skeleton, or dashboard layout and stacks visible modals on top.

mod filters;
mod grid;
mod header;
mod login;
mod modal;
mod skeleton;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Focus};
use crate::state::{ModalKind, Screen};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let screen = app.session.screen();
    if screen == Screen::Login {
        login::draw_login(frame, &app.login);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with settings hints
            Constraint::Length(4), // Filter bar
            Constraint::Min(1),    // KPI grid
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    header::draw_header(frame, chunks[0]);

    match screen {
        Screen::Loading { skeleton_cards } => {
            skeleton::draw_filter_bar(frame, chunks[1]);
            skeleton::draw_grid(frame, chunks[2], skeleton_cards);
        }
        Screen::Dashboard { show_grid } => {
            let filters_focused = app.focus == Focus::Filters || !show_grid;
            filters::draw_filter_bar(frame, &app.filters, filters_focused, chunks[1]);
            if show_grid {
                grid::draw_grid(frame, app, chunks[2]);
            } else {
                draw_empty(frame, chunks[2], "Filter wählen und mit Enter starten");
            }
        }
        Screen::Login => {}
    }

    draw_status_bar(frame, app, chunks[3]);

    // Modals last, bottom to top
    for kind in app.session.visible_modals() {
        match kind {
            ModalKind::LevelWarning => modal::draw_level_warning(
                frame,
                app.session.state().dont_show_level_warning_again,
            ),
            ModalKind::RedKpiReport => modal::draw_red_kpi_report(frame, app.red_kpi_selected),
            ModalKind::OnboardingModal => modal::draw_onboarding_modal(frame),
            ModalKind::OnboardingTour => modal::draw_onboarding_tour(frame, &app.tour),
        }
    }
}

/// Render an empty state message.
fn draw_empty(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default().borders(Borders::ALL).title(" Kennzahlen ");
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(text, area);
}

/// Draw the status bar with keybinding hints for the focused area.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hint = |key: &'static str, label: &'static str| {
        [
            Span::raw(key),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
        ]
    };

    let pairs = if app.session.state().modals.any_visible() {
        vec![hint(" Enter ", "Bestätigen"), hint("  Esc ", "Schließen")]
    } else if matches!(app.session.screen(), Screen::Loading { .. }) {
        vec![hint(" ", "Dashboard wird geladen...")]
    } else if app.focus == Focus::Grid {
        vec![
            hint(" ←→ ", "Karte"),
            hint("  < > ", "Verschieben"),
            hint("  Tab ", "Perspektive"),
            hint("  Esc ", "Filter"),
        ]
    } else {
        vec![
            hint(" ↑↓ ", "Feld"),
            hint("  ←→ ", "Wert"),
            hint("  f ", "Favorit"),
            hint("  Enter ", "Start"),
            hint("  Tab ", "Kacheln"),
        ]
    };

    let mut spans: Vec<Span> = pairs.into_iter().flatten().collect();
    spans.push(Span::raw("  ^Q "));
    spans.push(Span::styled("Beenden", Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::config::Settings;
    use crate::prefs::{MemoryFlagStore, SKIP_ONBOARDING_KEY};
    use crate::state::{FilterCommit, Level, SENIOR_EXECUTIVE};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn logged_in_app() -> App {
        let mut app = App::new(
            &Settings::default(),
            Box::new(MemoryFlagStore::with_flag(SKIP_ONBOARDING_KEY)),
        );
        app.session.login_success();
        app
    }

    #[test]
    fn test_login_screen() {
        let app = App::new(&Settings::default(), Box::new(MemoryFlagStore::new()));
        let text = render(&app);
        assert!(text.contains("Anmeldung"));
        assert!(!text.contains("Nutzergruppe"));
    }

    #[test]
    fn test_loading_screen_shows_skeleton() {
        let app = logged_in_app();
        let text = render(&app);
        assert!(text.contains("Dashboard wird geladen"));
        assert!(!text.contains("Nutzergruppe"));
    }

    #[test]
    fn test_dashboard_before_first_commit() {
        let mut app = logged_in_app();
        app.tick(Duration::from_millis(1500));
        let text = render(&app);
        assert!(text.contains("Nutzergruppe"));
        assert!(text.contains("mit Enter starten"));
    }

    #[test]
    fn test_grid_after_commit() {
        let mut app = logged_in_app();
        app.tick(Duration::from_millis(1500));
        app.session.commit_filters(FilterCommit {
            user_group: "Techniker".to_string(),
            level: Level::Hoch,
            ..FilterCommit::default()
        });

        let text = render(&app);
        assert!(text.contains("Teilnehmer"));
        assert!(text.contains("Techniker · Hoch"));
    }

    #[test]
    fn test_red_kpi_report_lists_three_entries() {
        let mut app = logged_in_app();
        app.tick(Duration::from_millis(1500));
        app.session.commit_filters(FilterCommit {
            user_group: SENIOR_EXECUTIVE.to_string(),
            level: Level::Hoch,
            ..FilterCommit::default()
        });
        app.tick(Duration::from_millis(100));

        let text = render(&app);
        assert!(text.contains("Kritische Kennzahlen"));
        assert!(text.contains("Stornierungsquote"));
        assert!(text.contains("Technikkompatibilität (Location)"));
        assert!(text.contains("Technikkompatibilität (Format)"));
    }

    #[test]
    fn test_level_warning_checkbox() {
        let mut app = logged_in_app();
        app.tick(Duration::from_millis(1500));
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(render(&app).contains("[ ] Nicht mehr anzeigen"));

        app.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        assert!(render(&app).contains("[x] Nicht mehr anzeigen"));
    }
}
