// State management module.
// Session controller plus the view-local state of forms, grid, and tour.

#![allow(dead_code)]

pub mod card_order;
pub mod filter_form;
pub mod filters;
pub mod grid;
pub mod login;
pub mod modals;
pub mod session;
pub mod timers;
pub mod tour;

#[allow(unused_imports)]
pub use card_order::{CardOrderStore, DashboardView};
pub use filter_form::{FilterField, FilterForm};
#[allow(unused_imports)]
pub use filters::{FilterCommit, FilterSelection, Level, SENIOR_EXECUTIVE};
pub use grid::GridState;
pub use login::{LoginField, LoginForm};
#[allow(unused_imports)]
pub use modals::{ModalFlags, ModalKind};
#[allow(unused_imports)]
pub use session::{SKELETON_CARD_COUNT, Screen, SessionController, SessionState, Timing};
pub use tour::TourState;
