// App state and main event loop.
// Routes keyboard input to the login form, modals, filter bar, or grid and
// advances deferred session work on every tick.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::{DashError, Result};
use crate::kpi::red_kpis;
use crate::prefs::{FlagStore, SKIP_ONBOARDING_KEY};
use crate::state::{
    FilterForm, GridState, LoginForm, ModalKind, Screen, SessionController, Timing, TourState,
};
use crate::ui;

/// Which dashboard area receives keys when no modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Filters,
    Grid,
}

/// Main application state.
pub struct App {
    pub session: SessionController,
    pub login: LoginForm,
    pub filters: FilterForm,
    pub grid: GridState,
    pub focus: Focus,
    pub tour: TourState,
    /// Entry of the red KPI report whose tooltip is expanded.
    pub red_kpi_selected: usize,
    /// Persisted flags (onboarding opt-out).
    pub flags: Box<dyn FlagStore>,
    /// Whether the app should exit.
    pub should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn new(settings: &Settings, flags: Box<dyn FlagStore>) -> Self {
        Self {
            session: SessionController::new(Timing::from(settings)),
            login: LoginForm::new(),
            filters: FilterForm::new(),
            grid: GridState::default(),
            focus: Focus::default(),
            tour: TourState::default(),
            red_kpi_selected: 0,
            flags,
            should_quit: false,
            tick_rate: settings.tick_rate(),
        }
    }

    /// Main event loop.
    ///
    /// Terminal input is read on a blocking thread and forwarded over a
    /// channel; ticks advance the session timers by the real elapsed time.
    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let reader = tokio::task::spawn_blocking(move || read_input(tx));

        let mut ticker = tokio::time::interval(self.tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            tokio::select! {
                event = rx.recv() => match event {
                    Some(Event::Key(key)) => self.handle_key(key),
                    Some(_) => {}
                    None => break,
                },
                _ = ticker.tick() => {
                    let now = Instant::now();
                    self.tick(now.duration_since(last_tick));
                    last_tick = now;
                }
            }
        }

        // Closing the channel stops the reader.
        drop(rx);
        reader
            .await
            .map_err(|e| DashError::Other(format!("input reader failed: {e}")))??;
        Ok(())
    }

    /// Advance deferred session work.
    pub fn tick(&mut self, elapsed: Duration) {
        let fired = self.session.advance(elapsed, self.flags.as_ref());
        if fired > 0 {
            debug!(fired, "deferred actions ran");
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.session.screen() == Screen::Login {
            self.handle_login_key(key);
            return;
        }

        // Settings shortcuts work everywhere behind the gate.
        if ctrl {
            match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('l') => self.logout(),
                KeyCode::Char('t') => {
                    self.tour.restart();
                    self.session.open_onboarding_tour();
                }
                _ => {}
            }
            return;
        }

        if let Some(modal) = self.session.state().modals.topmost() {
            self.handle_modal_key(modal, key);
            return;
        }

        if let Screen::Dashboard { show_grid } = self.session.screen() {
            match self.focus {
                Focus::Grid if show_grid => self.handle_grid_key(key),
                _ => self.handle_filter_key(key, show_grid),
            }
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_focus()
            }
            KeyCode::Backspace => self.login.backspace(),
            KeyCode::Enter => {
                if self.login.submit() {
                    self.session.login_success();
                }
            }
            KeyCode::Char(c) => self.login.input_char(c),
            _ => {}
        }
    }

    fn logout(&mut self) {
        self.session.logout();
        self.focus = Focus::Filters;
        self.grid = GridState::default();
        self.red_kpi_selected = 0;
    }

    fn handle_modal_key(&mut self, modal: ModalKind, key: KeyEvent) {
        match modal {
            ModalKind::LevelWarning => match key.code {
                KeyCode::Enter | KeyCode::Esc => self.session.close_level_warning(),
                KeyCode::Char(' ') => {
                    let flag = !self.session.state().dont_show_level_warning_again;
                    self.session.set_dont_show_level_warning_again(flag);
                }
                _ => {}
            },
            ModalKind::RedKpiReport => match key.code {
                KeyCode::Enter | KeyCode::Esc => {
                    self.red_kpi_selected = 0;
                    self.session.close_red_kpi_report();
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.red_kpi_selected = self.red_kpi_selected.saturating_sub(1)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.red_kpi_selected + 1 < red_kpis().len() {
                        self.red_kpi_selected += 1;
                    }
                }
                _ => {}
            },
            ModalKind::OnboardingModal => match key.code {
                KeyCode::Enter => {
                    self.tour.restart();
                    self.session.start_onboarding_tour();
                }
                KeyCode::Esc => self.session.close_onboarding_modal(),
                KeyCode::Char('n') => {
                    if let Err(e) = self.flags.set(SKIP_ONBOARDING_KEY) {
                        warn!(error = %e, "failed to persist onboarding opt-out");
                    }
                    self.session.close_onboarding_modal();
                }
                _ => {}
            },
            ModalKind::OnboardingTour => match key.code {
                KeyCode::Enter | KeyCode::Right => {
                    if self.tour.next() {
                        self.session.complete_onboarding_tour();
                    }
                }
                KeyCode::Left => self.tour.prev(),
                KeyCode::Esc => {
                    self.tour.restart();
                    self.session.complete_onboarding_tour();
                }
                _ => {}
            },
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent, show_grid: bool) {
        match key.code {
            KeyCode::Up => self.filters.focus_prev(),
            KeyCode::Down => self.filters.focus_next(),
            KeyCode::Left => self.filters.cycle_option(false),
            KeyCode::Right => self.filters.cycle_option(true),
            KeyCode::Backspace => self.filters.backspace(),
            KeyCode::Tab if show_grid => self.focus = Focus::Grid,
            KeyCode::Enter => self.commit_filters(),
            KeyCode::Char('f') if !self.filters.focused.is_text() => {
                self.filters.toggle_favorite()
            }
            KeyCode::Char(c) => self.filters.input_char(c),
            _ => {}
        }
    }

    fn commit_filters(&mut self) {
        match self.filters.build_commit() {
            Ok(commit) => {
                self.filters.error = None;
                self.grid.selected = 0;
                // A commit hides the red KPI report; the next one starts at the top.
                self.red_kpi_selected = 0;
                self.session.commit_filters(commit);
            }
            Err(e) => {
                info!(error = %e, "filter commit rejected");
                self.filters.error = Some(e.to_string());
            }
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.focus = Focus::Filters,
            KeyCode::Tab => self.grid.next_view(),
            KeyCode::BackTab => self.grid.prev_view(),
            KeyCode::Left | KeyCode::Char('h') => self.grid.select_prev(),
            KeyCode::Right | KeyCode::Char('l') => self.grid.select_next(),
            KeyCode::Char('<') | KeyCode::Char('>') => {
                let forward = key.code == KeyCode::Char('>');
                let card_order = &self.session.state().card_order;
                if let Some(order) = self.grid.move_selected(card_order, forward) {
                    self.session.set_card_order(self.grid.view, order);
                }
            }
            _ => {}
        }
    }
}

/// Forward terminal events until the receiving side goes away.
fn read_input(tx: UnboundedSender<Event>) -> io::Result<()> {
    while !tx.is_closed() {
        if event::poll(Duration::from_millis(100))? && tx.send(event::read()?).is_err() {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryFlagStore;
    use crate::state::{DashboardView, Level, SENIOR_EXECUTIVE};

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn new_app(flags: MemoryFlagStore) -> App {
        App::new(&Settings::default(), Box::new(flags))
    }

    /// Logged in, loaded, onboarding skipped.
    fn dashboard_app() -> App {
        let mut app = new_app(MemoryFlagStore::with_flag(SKIP_ONBOARDING_KEY));
        type_text(&mut app, "anna");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pw");
        press(&mut app, KeyCode::Enter);
        app.tick(Duration::from_millis(1500));
        app
    }

    #[test]
    fn test_login_flow() {
        let mut app = new_app(MemoryFlagStore::new());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.screen(), Screen::Login);
        assert!(app.login.error.is_some());

        type_text(&mut app, "anna");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pw");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.session.screen(), Screen::Loading { .. }));

        app.tick(Duration::from_millis(1500));
        assert_eq!(app.session.screen(), Screen::Dashboard { show_grid: false });
        assert_eq!(
            app.session.state().modals.topmost(),
            Some(ModalKind::OnboardingModal)
        );
    }

    #[test]
    fn test_onboarding_opt_out_is_persisted() {
        let mut app = new_app(MemoryFlagStore::new());
        type_text(&mut app, "anna");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pw");
        press(&mut app, KeyCode::Enter);
        app.tick(Duration::from_millis(1500));

        press(&mut app, KeyCode::Char('n'));
        assert!(app.flags.contains(SKIP_ONBOARDING_KEY));
        assert!(!app.session.state().modals.onboarding_modal);

        ctrl(&mut app, 'l');
        type_text(&mut app, "anna");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pw");
        press(&mut app, KeyCode::Enter);
        app.tick(Duration::from_millis(1500));
        assert!(!app.session.state().modals.onboarding_modal);
    }

    #[test]
    fn test_tour_walkthrough() {
        let mut app = new_app(MemoryFlagStore::new());
        type_text(&mut app, "anna");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pw");
        press(&mut app, KeyCode::Enter);
        app.tick(Duration::from_millis(1500));

        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.session.state().modals.topmost(),
            Some(ModalKind::OnboardingTour)
        );

        for _ in 0..crate::state::tour::TOUR_STEPS.len() {
            press(&mut app, KeyCode::Right);
        }
        assert!(app.session.state().modals.topmost().is_none());

        ctrl(&mut app, 't');
        assert!(app.session.state().modals.onboarding_tour);
    }

    #[test]
    fn test_commit_with_unspecified_level_shows_warning() {
        let mut app = dashboard_app();
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session.screen(), Screen::Dashboard { show_grid: true });
        assert_eq!(app.session.state().filters.level, Level::Gering);
        assert_eq!(
            app.session.state().modals.topmost(),
            Some(ModalKind::LevelWarning)
        );

        // Opt out, close, and commit again.
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.state().filters.level, Level::KeineAngabe);
        assert!(!app.session.state().modals.level_warning);
    }

    #[test]
    fn test_senior_executive_commit_opens_report() {
        let mut app = dashboard_app();
        // Last user group in the list
        press(&mut app, KeyCode::Left);
        assert_eq!(app.filters.user_group(), SENIOR_EXECUTIVE);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        app.tick(Duration::from_millis(100));
        assert_eq!(
            app.session.state().modals.topmost(),
            Some(ModalKind::RedKpiReport)
        );

        press(&mut app, KeyCode::Down);
        assert_eq!(app.red_kpi_selected, 1);
        press(&mut app, KeyCode::Esc);
        assert!(!app.session.state().modals.red_kpi_report);
        assert_eq!(app.red_kpi_selected, 0);
    }

    #[test]
    fn test_reopened_report_starts_at_first_entry() {
        let mut app = dashboard_app();
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        app.tick(Duration::from_millis(100));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.red_kpi_selected, 2);

        // Change the format behind the report. Keys go to the report while it
        // is open, so commit the changed filters through the form directly.
        app.filters.focused = crate::state::FilterField::Format;
        app.filters.cycle_option(true);
        app.commit_filters();
        assert!(!app.session.state().modals.red_kpi_report);

        app.tick(Duration::from_millis(100));
        assert_eq!(
            app.session.state().modals.topmost(),
            Some(ModalKind::RedKpiReport)
        );
        assert_eq!(app.red_kpi_selected, 0);
    }

    #[test]
    fn test_invalid_dates_block_commit() {
        let mut app = dashboard_app();
        for _ in 0..3 {
            press(&mut app, KeyCode::Down);
        }
        type_text(&mut app, "2024-99-99");
        press(&mut app, KeyCode::Enter);

        assert!(app.filters.error.is_some());
        assert!(!app.session.state().has_started);
    }

    #[test]
    fn test_grid_reorder_and_favorite() {
        let mut app = dashboard_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Grid);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.grid.view, DashboardView::Auftraggeber);
        press(&mut app, KeyCode::Char('>'));
        let order = app
            .session
            .state()
            .card_order
            .order(DashboardView::Auftraggeber)
            .map(|ids| ids.to_vec());
        assert_eq!(
            order.as_deref().map(|ids| ids[0].as_str()),
            Some("kosten_pro_teilnehmer")
        );

        // With a favorite active the order survives the next commit.
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Enter);
        assert!(
            app.session
                .state()
                .card_order
                .order(DashboardView::Auftraggeber)
                .is_some()
        );

        // Without it the orders are cleared.
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Enter);
        assert!(app.session.state().card_order.is_empty());
    }

    #[test]
    fn test_logout_returns_to_login() {
        let mut app = dashboard_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);

        ctrl(&mut app, 'l');
        assert_eq!(app.session.screen(), Screen::Login);
        assert_eq!(app.focus, Focus::Filters);
        assert!(!app.session.state().has_started);
    }

    #[test]
    fn test_quit_shortcuts() {
        let mut app = new_app(MemoryFlagStore::new());
        ctrl(&mut app, 'c');
        assert!(app.should_quit);

        let mut app = dashboard_app();
        ctrl(&mut app, 'q');
        assert!(app.should_quit);
    }
}
