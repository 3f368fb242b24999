// Filter bar state.
// In-progress filter edits, kept apart from the committed selection.

use super::filters::{EVENT_COUNTS, FORMATS, FilterCommit, Level, USER_GROUPS, parse_date_range};
use crate::error::Result;

/// A field of the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    UserGroup,
    Level,
    Format,
    StartDate,
    EndDate,
    EventCount,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::UserGroup,
        FilterField::Level,
        FilterField::Format,
        FilterField::StartDate,
        FilterField::EndDate,
        FilterField::EventCount,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::UserGroup => "Nutzergruppe",
            FilterField::Level => "Level",
            FilterField::Format => "Format",
            FilterField::StartDate => "Von",
            FilterField::EndDate => "Bis",
            FilterField::EventCount => "Anzahl",
        }
    }

    /// Text fields take typed characters; the others cycle through options.
    pub fn is_text(&self) -> bool {
        matches!(self, FilterField::StartDate | FilterField::EndDate)
    }

    fn index(&self) -> usize {
        FilterField::ALL
            .iter()
            .position(|field| field == self)
            .unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        FilterField::ALL[(self.index() + 1) % FilterField::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let len = FilterField::ALL.len();
        FilterField::ALL[(self.index() + len - 1) % len]
    }
}

/// Step an option index forward or backward with wrap-around.
fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

/// Draft values of the filter bar.
#[derive(Debug, Clone, Default)]
pub struct FilterForm {
    pub focused: FilterField,
    user_group: usize,
    level: usize,
    format: usize,
    event_count: usize,
    pub start_date: String,
    pub end_date: String,
    /// A favorite is active: card orders survive the next commit.
    pub favorite_active: bool,
    /// Validation error from the last commit attempt.
    pub error: Option<String>,
}

impl FilterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_group(&self) -> &'static str {
        USER_GROUPS[self.user_group]
    }

    pub fn level(&self) -> Level {
        Level::ALL[self.level]
    }

    pub fn format(&self) -> &'static str {
        FORMATS[self.format]
    }

    pub fn event_count(&self) -> &'static str {
        EVENT_COUNTS[self.event_count]
    }

    /// Display value of a field.
    pub fn value(&self, field: FilterField) -> &str {
        match field {
            FilterField::UserGroup => self.user_group(),
            FilterField::Level => self.level().label(),
            FilterField::Format => self.format(),
            FilterField::StartDate => &self.start_date,
            FilterField::EndDate => &self.end_date,
            FilterField::EventCount => self.event_count(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Cycle the focused option field.
    pub fn cycle_option(&mut self, forward: bool) {
        match self.focused {
            FilterField::UserGroup => {
                self.user_group = cycle(self.user_group, USER_GROUPS.len(), forward)
            }
            FilterField::Level => self.level = cycle(self.level, Level::ALL.len(), forward),
            FilterField::Format => self.format = cycle(self.format, FORMATS.len(), forward),
            FilterField::EventCount => {
                self.event_count = cycle(self.event_count, EVENT_COUNTS.len(), forward)
            }
            FilterField::StartDate | FilterField::EndDate => {}
        }
    }

    /// Type into the focused date field. Only digits and dashes are accepted.
    pub fn input_char(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '-') {
            return;
        }
        if let Some(text) = self.focused_text_mut() {
            if text.len() < 10 {
                text.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            FilterField::StartDate => Some(&mut self.start_date),
            FilterField::EndDate => Some(&mut self.end_date),
            _ => None,
        }
    }

    pub fn toggle_favorite(&mut self) {
        self.favorite_active = !self.favorite_active;
    }

    /// Validate the draft and build a commit request.
    pub fn build_commit(&self) -> Result<FilterCommit> {
        let (start_date, end_date) = parse_date_range(&self.start_date, &self.end_date)?;
        Ok(FilterCommit {
            user_group: self.user_group().to_string(),
            level: self.level(),
            format: self.format().to_string(),
            start_date,
            end_date,
            event_count: self.event_count().to_string(),
            reset_card_order: !self.favorite_active,
        })
    }
}
