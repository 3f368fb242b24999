// Onboarding tour state.
// Step cursor over the fixed list of tour pages.

/// A page of the onboarding tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourStep {
    pub title: &'static str,
    pub body: &'static str,
}

pub const TOUR_STEPS: [TourStep; 4] = [
    TourStep {
        title: "Filter wählen",
        body: "Wähle Nutzergruppe, Level, Format, Zeitraum und Anzahl der Veranstaltungen. \
               Mit ↑↓ wechselst du das Feld, mit ←→ den Wert.",
    },
    TourStep {
        title: "Dashboard starten",
        body: "Enter übernimmt die Filter und zeigt die Kennzahlen. \
               Ohne aktiven Favoriten (f) wird die Kartenreihenfolge zurückgesetzt.",
    },
    TourStep {
        title: "Perspektiven",
        body: "Tab wechselt in die Kacheln. Dort schaltet Tab zwischen Veranstalter, \
               Auftraggeber und Techniker um, < und > verschieben die gewählte Karte.",
    },
    TourStep {
        title: "Einstellungen",
        body: "Ctrl+T startet diese Tour erneut, Ctrl+L meldet dich ab.",
    },
];

/// Cursor into `TOUR_STEPS`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TourState {
    step: usize,
}

impl TourState {
    pub fn current(&self) -> &'static TourStep {
        &TOUR_STEPS[self.step]
    }

    pub fn index(&self) -> usize {
        self.step
    }

    pub fn is_last(&self) -> bool {
        self.step + 1 == TOUR_STEPS.len()
    }

    /// Advance one page. Returns true when the tour is finished.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            self.step = 0;
            true
        } else {
            self.step += 1;
            false
        }
    }

    pub fn prev(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        self.step = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walks_to_completion() {
        let mut tour = TourState::default();
        for _ in 0..TOUR_STEPS.len() - 1 {
            assert!(!tour.next());
        }
        assert!(tour.is_last());
        assert!(tour.next());
        assert_eq!(tour.index(), 0);
    }

    #[test]
    fn test_prev_stops_at_start() {
        let mut tour = TourState::default();
        tour.prev();
        assert_eq!(tour.index(), 0);
        tour.next();
        tour.prev();
        assert_eq!(tour.current().title, TOUR_STEPS[0].title);
    }
}
