//! Command execution functions.

mod installations;
mod run;

pub use installations::manage_installations;
pub use run::run_step;
