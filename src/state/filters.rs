// Committed filter values.
// Defines the risk level enum, the committed selection, and the commit request.

use chrono::NaiveDate;

use crate::error::{DashError, Result};

/// User group that triggers the red KPI report after a commit.
pub const SENIOR_EXECUTIVE: &str = "Leitender Angestellter";

/// Selectable user groups, in filter bar order.
pub const USER_GROUPS: [&str; 4] = ["Veranstalter", "Auftraggeber", "Techniker", SENIOR_EXECUTIVE];

/// Selectable event formats.
pub const FORMATS: [&str; 3] = ["Präsenz", "Online", "Hybrid"];

/// Selectable event count buckets.
pub const EVENT_COUNTS: [&str; 4] = ["Alle", "1-10", "11-50", "51+"];

/// Date format accepted by the filter bar.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Risk level of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    /// No level chosen. Committing it raises the level warning.
    #[default]
    KeineAngabe,
    Gering,
    Mittel,
    Hoch,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::KeineAngabe, Level::Gering, Level::Mittel, Level::Hoch];

    /// Level committed instead of an unspecified one.
    pub const FALLBACK: Level = Level::Gering;

    pub fn label(&self) -> &'static str {
        match self {
            Level::KeineAngabe => "Keine Angabe",
            Level::Gering => "Gering",
            Level::Mittel => "Mittel",
            Level::Hoch => "Hoch",
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Level::KeineAngabe)
    }
}

/// The last committed filter set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub user_group: String,
    pub level: Level,
    pub format: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub event_count: String,
}

/// A request to commit filters, as emitted by the filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCommit {
    pub user_group: String,
    pub level: Level,
    pub format: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub event_count: String,
    /// Clear all card orders (no favorite is active).
    pub reset_card_order: bool,
}

impl FilterCommit {
    pub fn is_senior_executive(&self) -> bool {
        self.user_group == SENIOR_EXECUTIVE
    }
}

/// Parse an optional date field. Blank input means "no bound".
pub fn parse_date(input: &str) -> Result<Option<NaiveDate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| DashError::InvalidDate(trimmed.to_string()))
}

/// Parse both range bounds and check their order.
pub fn parse_date_range(start: &str, end: &str) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(DashError::InvalidDateRange {
                start: s.format(DATE_FORMAT).to_string(),
                end: e.format(DATE_FORMAT).to_string(),
            });
        }
    }
    Ok((start, end))
}
