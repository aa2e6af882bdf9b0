//! Command implementations.

mod detect;
mod info;
mod run;
mod validate;

pub use detect::run_detect;
pub use info::run_info;
pub use run::run_session;
pub use validate::run_validate;
