mod handler;
mod run;
mod usage;

pub use handler::{capability_name, HandlerSet, HandlerSetBuilder, ResolvedOperation};
pub use run::Dispatcher;
pub use usage::{operands, subcommand_scope, FlagOutcome, FlagScope, HELP_FLAG, PROGRAM};
