mod args;
mod fetch;
mod params;
mod resolved_command;

pub use args::{Args, Command, parse_args};
pub use fetch::{FetchOutcome, run_fetch};
pub use params::FetchParams;
pub use resolved_command::resolve_command;
