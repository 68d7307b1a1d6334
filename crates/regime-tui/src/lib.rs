//! Interactive terminal dashboard and logging setup.

mod dashboard;
mod logging;

pub use dashboard::{Dashboard, DashboardState, RunStatus};
pub use logging::setup_logging;
