// Card order state.
// Holds per-perspective KPI card ordering for the current session.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::DashError;

/// Dashboard perspective. Each one has its own card set and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DashboardView {
    #[default]
    Organizer,
    Auftraggeber,
    Techniker,
}

impl DashboardView {
    pub const ALL: [DashboardView; 3] = [
        DashboardView::Organizer,
        DashboardView::Auftraggeber,
        DashboardView::Techniker,
    ];

    /// Stable key for the view.
    pub fn key(&self) -> &'static str {
        match self {
            DashboardView::Organizer => "organizer",
            DashboardView::Auftraggeber => "auftraggeber",
            DashboardView::Techniker => "techniker",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardView::Organizer => "Veranstalter",
            DashboardView::Auftraggeber => "Auftraggeber",
            DashboardView::Techniker => "Techniker",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            DashboardView::Organizer => DashboardView::Auftraggeber,
            DashboardView::Auftraggeber => DashboardView::Techniker,
            DashboardView::Techniker => DashboardView::Organizer,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            DashboardView::Organizer => DashboardView::Techniker,
            DashboardView::Auftraggeber => DashboardView::Organizer,
            DashboardView::Techniker => DashboardView::Auftraggeber,
        }
    }
}

impl FromStr for DashboardView {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DashboardView::ALL
            .into_iter()
            .find(|view| view.key() == s)
            .ok_or_else(|| DashError::UnknownView(s.to_string()))
    }
}

/// Ordered card ids per view. Views without an entry use the default order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardOrderStore {
    orders: BTreeMap<DashboardView, Vec<String>>,
}

impl CardOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the order of one view, leaving the others untouched.
    pub fn set_order(&mut self, view: DashboardView, order: Vec<String>) {
        self.orders.insert(view, order);
    }

    /// Clear the order of every view.
    pub fn reset(&mut self) {
        self.orders.clear();
    }

    pub fn order(&self, view: DashboardView) -> Option<&[String]> {
        self.orders.get(&view).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Arrange `items` for a view: stored ids first, in stored order, then any
    /// remaining items in their default order. Unknown stored ids are skipped.
    pub fn arrange<'a, T, F>(&self, view: DashboardView, items: &'a [T], id: F) -> Vec<&'a T>
    where
        F: Fn(&T) -> &str,
    {
        let Some(order) = self.order(view) else {
            return items.iter().collect();
        };

        let mut arranged: Vec<&T> = order
            .iter()
            .filter_map(|wanted| items.iter().find(|item| id(*item) == wanted))
            .collect();

        for item in items {
            if !order.iter().any(|wanted| wanted == id(item)) {
                arranged.push(item);
            }
        }
        arranged
    }
}
