// Session controller.
// Owns all session state and applies named transitions followed by reaction rules.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::Settings;
use crate::prefs::{FlagStore, SKIP_ONBOARDING_KEY};

use super::card_order::{CardOrderStore, DashboardView};
use super::filters::{FilterCommit, FilterSelection, Level};
use super::modals::{ModalFlags, ModalKind};
use super::timers::{TimerId, TimerQueue};

/// Number of placeholder cards shown while loading.
pub const SKELETON_CARD_COUNT: usize = 12;

/// Top-level screen derived from the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Loading { skeleton_cards: usize },
    Dashboard { show_grid: bool },
}

/// Work scheduled on the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    FinishLoading,
    /// Open the red KPI report for the commit with this sequence number.
    ShowRedKpiReport { commit: u64 },
}

/// Delays for the deferred actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub loading_delay: Duration,
    pub red_kpi_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            loading_delay: Duration::from_millis(1500),
            red_kpi_delay: Duration::from_millis(100),
        }
    }
}

impl From<&Settings> for Timing {
    fn from(settings: &Settings) -> Self {
        Self {
            loading_delay: settings.loading_delay(),
            red_kpi_delay: settings.red_kpi_delay(),
        }
    }
}

/// Everything the dashboard knows about the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
    pub is_loading: bool,
    /// Whether a filter set was committed since login.
    pub has_started: bool,
    pub filters: FilterSelection,
    pub dont_show_level_warning_again: bool,
    pub modals: ModalFlags,
    /// Red KPI report already opened for the current filter set.
    pub has_shown_red_kpi: bool,
    pub card_order: CardOrderStore,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            authenticated: false,
            is_loading: true,
            has_started: false,
            filters: FilterSelection::default(),
            dont_show_level_warning_again: false,
            modals: ModalFlags::default(),
            has_shown_red_kpi: false,
            card_order: CardOrderStore::new(),
        }
    }
}

/// The parts of the state that reaction rules watch.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Observed {
    authenticated: bool,
    filters: FilterSelection,
}

/// Derived-state rules, evaluated in this order after every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reaction {
    /// Any committed filter field changed: forget the red KPI report.
    ResetRedKpiOnFilterChange,
    /// Gate opened: arm the loading timer.
    ArmLoadingOnLogin,
    /// Gate closed: drop pending deferred work.
    DisarmOnLogout,
}

const REACTIONS: [Reaction; 3] = [
    Reaction::ResetRedKpiOnFilterChange,
    Reaction::ArmLoadingOnLogin,
    Reaction::DisarmOnLogout,
];

impl Reaction {
    fn triggered(self, before: &Observed, after: &Observed) -> bool {
        match self {
            Reaction::ResetRedKpiOnFilterChange => before.filters != after.filters,
            Reaction::ArmLoadingOnLogin => !before.authenticated && after.authenticated,
            Reaction::DisarmOnLogout => before.authenticated && !after.authenticated,
        }
    }
}

/// Single owner of the session state.
///
/// Views read the state through `state()` and change it only through the
/// transition methods below. Every transition is a no-op when its target state
/// already holds.
#[derive(Debug)]
pub struct SessionController {
    state: SessionState,
    timing: Timing,
    timers: TimerQueue<DeferredAction>,
    loading_timer: Option<TimerId>,
    red_kpi_timer: Option<TimerId>,
    commit_seq: u64,
}

impl SessionController {
    pub fn new(timing: Timing) -> Self {
        Self {
            state: SessionState::default(),
            timing,
            timers: TimerQueue::new(),
            loading_timer: None,
            red_kpi_timer: None,
            commit_seq: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Sequence number of the latest commit (0 before the first one).
    #[cfg(test)]
    pub fn commit_seq(&self) -> u64 {
        self.commit_seq
    }

    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn screen(&self) -> Screen {
        if !self.state.authenticated {
            Screen::Login
        } else if self.state.is_loading {
            Screen::Loading {
                skeleton_cards: SKELETON_CARD_COUNT,
            }
        } else {
            Screen::Dashboard {
                show_grid: self.state.has_started,
            }
        }
    }

    /// Modals to draw, bottom to top. Nothing is shown behind the login gate.
    pub fn visible_modals(&self) -> Vec<ModalKind> {
        if self.state.authenticated {
            self.state.modals.visible()
        } else {
            Vec::new()
        }
    }

    // Session gate

    pub fn login_success(&mut self) {
        if self.state.authenticated {
            return;
        }
        info!("login succeeded");
        self.transition(|this| this.state.authenticated = true);
    }

    pub fn logout(&mut self) {
        info!(has_started = self.state.has_started, "logout");
        self.transition(|this| {
            this.state.authenticated = false;
            this.state.has_started = false;
            this.state.is_loading = true;
        });
    }

    // Filter coordinator

    /// Commit a filter set from the filter bar.
    pub fn commit_filters(&mut self, commit: FilterCommit) {
        let senior_executive = commit.is_senior_executive();
        let seq = self.commit_seq + 1;

        self.transition(|this| {
            this.commit_seq = seq;
            if let Some(id) = this.red_kpi_timer.take() {
                this.timers.cancel(id);
                debug!(commit = seq, "invalidated pending red KPI report");
            }

            if commit.reset_card_order {
                this.state.card_order.reset();
            }

            let FilterCommit {
                user_group,
                level,
                format,
                start_date,
                end_date,
                event_count,
                ..
            } = commit;

            let filters = &mut this.state.filters;
            filters.user_group = user_group;
            filters.format = format;
            filters.start_date = start_date;
            filters.end_date = end_date;
            filters.event_count = event_count;

            if level.is_unspecified() && !this.state.dont_show_level_warning_again {
                filters.level = Level::FALLBACK;
                this.state.modals.level_warning = true;
            } else {
                filters.level = level;
            }

            this.state.has_started = true;
        });

        info!(
            commit = seq,
            user_group = %self.state.filters.user_group,
            risk_level = self.state.filters.level.label(),
            "filters committed"
        );

        // Scheduled after the reactions so the reset above is already applied.
        if senior_executive {
            let id = self.timers.schedule(
                self.timing.red_kpi_delay,
                DeferredAction::ShowRedKpiReport { commit: seq },
            );
            self.red_kpi_timer = Some(id);
        }
    }

    // Modal transitions

    pub fn close_level_warning(&mut self) {
        self.transition(|this| this.state.modals.level_warning = false);
    }

    /// Suppress (or re-enable) the level warning for future commits.
    pub fn set_dont_show_level_warning_again(&mut self, flag: bool) {
        debug!(flag, "level warning suppression changed");
        self.transition(|this| this.state.dont_show_level_warning_again = flag);
    }

    pub fn close_red_kpi_report(&mut self) {
        self.transition(|this| this.state.modals.red_kpi_report = false);
    }

    pub fn start_onboarding_tour(&mut self) {
        self.transition(|this| {
            this.state.modals.onboarding_modal = false;
            this.state.modals.onboarding_tour = true;
        });
    }

    pub fn close_onboarding_modal(&mut self) {
        self.transition(|this| this.state.modals.onboarding_modal = false);
    }

    pub fn complete_onboarding_tour(&mut self) {
        self.transition(|this| this.state.modals.onboarding_tour = false);
    }

    /// Manual tour entry from the settings menu.
    pub fn open_onboarding_tour(&mut self) {
        self.transition(|this| this.state.modals.onboarding_tour = true);
    }

    // Card order

    pub fn set_card_order(&mut self, view: DashboardView, order: Vec<String>) {
        debug!(view = view.key(), cards = order.len(), "card order changed");
        self.transition(|this| this.state.card_order.set_order(view, order));
    }

    // Deferred work

    /// Advance the clock and run every action that became due.
    /// Returns the number of actions that ran.
    pub fn advance(&mut self, elapsed: Duration, flags: &dyn FlagStore) -> usize {
        self.timers.advance(elapsed);

        let mut fired = 0;
        while let Some(action) = self.timers.pop_due() {
            self.fire(action, flags);
            fired += 1;
        }
        fired
    }

    fn fire(&mut self, action: DeferredAction, flags: &dyn FlagStore) {
        match action {
            DeferredAction::FinishLoading => {
                self.loading_timer = None;
                if !self.state.authenticated {
                    return;
                }
                let skip_onboarding = flags.contains(SKIP_ONBOARDING_KEY);
                debug!(skip_onboarding, "loading finished");
                self.transition(|this| {
                    this.state.is_loading = false;
                    if !skip_onboarding {
                        this.state.modals.onboarding_modal = true;
                    }
                });
            }
            DeferredAction::ShowRedKpiReport { commit } => {
                self.red_kpi_timer = None;
                if commit != self.commit_seq || !self.state.authenticated {
                    debug!(commit, latest = self.commit_seq, "stale red KPI report skipped");
                    return;
                }
                info!(commit, "showing red KPI report");
                self.transition(|this| {
                    this.state.modals.red_kpi_report = true;
                    this.state.has_shown_red_kpi = true;
                });
            }
        }
    }

    // Reaction rules

    fn observe(&self) -> Observed {
        Observed {
            authenticated: self.state.authenticated,
            filters: self.state.filters.clone(),
        }
    }

    fn transition<F>(&mut self, mutate: F)
    where
        F: FnOnce(&mut Self),
    {
        let before = self.observe();
        mutate(self);
        let after = self.observe();

        for reaction in REACTIONS {
            if reaction.triggered(&before, &after) {
                debug!(?reaction, "reaction triggered");
                self.apply(reaction);
            }
        }
    }

    fn apply(&mut self, reaction: Reaction) {
        match reaction {
            Reaction::ResetRedKpiOnFilterChange => {
                self.state.has_shown_red_kpi = false;
                self.state.modals.red_kpi_report = false;
            }
            Reaction::ArmLoadingOnLogin => {
                if let Some(id) = self.loading_timer.take() {
                    self.timers.cancel(id);
                }
                let id = self
                    .timers
                    .schedule(self.timing.loading_delay, DeferredAction::FinishLoading);
                self.loading_timer = Some(id);
            }
            Reaction::DisarmOnLogout => {
                if let Some(id) = self.loading_timer.take() {
                    self.timers.cancel(id);
                }
                if let Some(id) = self.red_kpi_timer.take() {
                    self.timers.cancel(id);
                }
            }
        }
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(Timing::default())
    }
}
