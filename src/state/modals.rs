// Modal visibility state.
// Independent flags per modal and the pure decision of what is shown.

/// A modal dialog on top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    LevelWarning,
    RedKpiReport,
    OnboardingModal,
    OnboardingTour,
}

/// Visibility flags. None of them hides another; several may be set at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModalFlags {
    pub level_warning: bool,
    pub red_kpi_report: bool,
    pub onboarding_modal: bool,
    pub onboarding_tour: bool,
}

impl ModalFlags {
    /// Visible modals, bottom to top.
    pub fn visible(&self) -> Vec<ModalKind> {
        [
            (self.level_warning, ModalKind::LevelWarning),
            (self.red_kpi_report, ModalKind::RedKpiReport),
            (self.onboarding_modal, ModalKind::OnboardingModal),
            (self.onboarding_tour, ModalKind::OnboardingTour),
        ]
        .into_iter()
        .filter_map(|(shown, kind)| shown.then_some(kind))
        .collect()
    }

    /// The modal that receives input.
    pub fn topmost(&self) -> Option<ModalKind> {
        self.visible().last().copied()
    }

    pub fn any_visible(&self) -> bool {
        self.topmost().is_some()
    }
}
