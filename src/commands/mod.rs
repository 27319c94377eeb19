mod check;
mod context;
mod model;
mod rules;

pub use check::run_check;
pub use context::{LOG_ENV, init_logging};
pub use model::run_model;
pub use rules::{format_rules, run_rules};
