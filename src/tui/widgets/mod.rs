//! Sections of the dashboard panel.

pub mod bar;
mod panel;
mod party;
mod rates;
mod system;

pub use panel::Panel;
pub use party::{Member, member_for, model_bar_width, render_party};
pub use rates::{Pace, hourly_bar_width, render_rates};
pub use system::{gauge_width, render_system};
