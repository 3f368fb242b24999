// KPI grid state.
// Active perspective, card selection, and reordering of the visible cards.

use crate::kpi::{KpiCard, cards_for};

use super::card_order::{CardOrderStore, DashboardView};

/// Selection state of the KPI grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridState {
    pub view: DashboardView,
    pub selected: usize,
}

impl GridState {
    /// Cards of the active view in display order.
    pub fn cards(&self, order: &CardOrderStore) -> Vec<&'static KpiCard> {
        order.arrange(self.view, cards_for(self.view), |card| card.id)
    }

    pub fn next_view(&mut self) {
        self.view = self.view.next();
        self.selected = 0;
    }

    pub fn prev_view(&mut self) {
        self.view = self.view.prev();
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        let len = cards_for(self.view).len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Swap the selected card with its neighbour.
    ///
    /// Returns the new id order for the active view, or `None` at the edge.
    /// The selection follows the moved card.
    pub fn move_selected(&mut self, order: &CardOrderStore, forward: bool) -> Option<Vec<String>> {
        let mut ids: Vec<String> = self
            .cards(order)
            .iter()
            .map(|card| card.id.to_string())
            .collect();

        let target = if forward {
            self.selected.checked_add(1).filter(|&t| t < ids.len())?
        } else {
            self.selected.checked_sub(1)?
        };
        if self.selected >= ids.len() {
            return None;
        }

        ids.swap(self.selected, target);
        self.selected = target;
        Some(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_matches_catalogue() {
        let grid = GridState::default();
        let store = CardOrderStore::new();

        let ids: Vec<&str> = grid.cards(&store).iter().map(|card| card.id).collect();
        let expected: Vec<&str> = cards_for(DashboardView::Organizer)
            .iter()
            .map(|card| card.id)
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_move_selected_forward() {
        let mut grid = GridState::default();
        let mut store = CardOrderStore::new();

        let order = grid.move_selected(&store, true).unwrap();
        assert_eq!(order[0], "stornierungsquote");
        assert_eq!(order[1], "teilnehmer");
        assert_eq!(grid.selected, 1);

        store.set_order(grid.view, order);
        let ids: Vec<&str> = grid.cards(&store).iter().map(|card| card.id).collect();
        assert_eq!(ids[1], "teilnehmer");
    }

    #[test]
    fn test_move_at_edges() {
        let mut grid = GridState::default();
        let store = CardOrderStore::new();
        assert_eq!(grid.move_selected(&store, false), None);

        grid.selected = cards_for(grid.view).len() - 1;
        assert_eq!(grid.move_selected(&store, true), None);
    }

    #[test]
    fn test_view_switch_resets_selection() {
        let mut grid = GridState::default();
        grid.select_next();
        grid.next_view();
        assert_eq!(grid.view, DashboardView::Auftraggeber);
        assert_eq!(grid.selected, 0);

        grid.prev_view();
        grid.prev_view();
        assert_eq!(grid.view, DashboardView::Techniker);
    }
}
