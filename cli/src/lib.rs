pub mod commands;
pub mod context;
pub mod error;
pub mod logging;
pub mod repl;
pub mod view;

pub use context::CliContext;
pub use error::CommandError;
pub use repl::readline;
