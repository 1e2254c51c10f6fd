//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `polctl_core::api` instead of reaching into internal modules.

pub use crate::config::{load_default, ApiConfig, AppConfig, LoggingConfig};
pub use crate::dispatch::{
    operands, subcommand_scope, Dispatcher, FlagOutcome, FlagScope, HandlerSet,
    HandlerSetBuilder, ResolvedOperation, HELP_FLAG, PROGRAM,
};
pub use crate::error::{DispatchError, ResolveError};
