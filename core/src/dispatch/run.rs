use crate::dispatch::handler::{HandlerSet, ResolvedOperation};
use crate::dispatch::usage::{HELP_FLAG, PROGRAM};
use crate::error::{DispatchError, ResolveError};

/// Top-level entry point: resolves leading tokens to an operation, invokes
/// it with the remaining arguments, and falls back to help.
///
/// Resolution is greedy: the two-token candidate is tried before the
/// one-token candidate, and the first match wins. A two-token miss is not
/// fatal — only the final, outermost miss surfaces as an error. The engine
/// itself never terminates the process; the embedding binary decides what an
/// [`DispatchError::UnknownCommand`] costs.
pub struct Dispatcher {
    handlers: HandlerSet,
    usage: Option<Box<dyn Fn() + Send + Sync>>,
}

impl Dispatcher {
    pub fn new(handlers: HandlerSet) -> Self {
        Self {
            handlers,
            usage: None,
        }
    }

    /// Replace the built-in top-level usage renderer.
    pub fn with_usage<F>(mut self, usage: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.usage = Some(Box::new(usage));
        self
    }

    pub async fn run(&self, args: &[String]) -> Result<(), DispatchError> {
        if args.len() > 1 {
            match self.handlers.resolve(&args[..2]).await {
                Ok(op) => return self.invoke(op, args[2..].to_vec()).await,
                Err(ResolveError::Initialization(cause)) => {
                    return Err(DispatchError::Initialization(cause));
                }
                Err(_) => {}
            }
        }
        if let Some(first) = args.first() {
            match self.handlers.resolve(&args[..1]).await {
                Ok(op) => return self.invoke(op, args[1..].to_vec()).await,
                Err(ResolveError::NotFound) if first.eq_ignore_ascii_case("help") => {
                    return self.help(&args[1..]).await;
                }
                Err(err) => return Err(DispatchError::from_resolve(err, first)),
            }
        }
        self.help(&[]).await
    }

    /// Mirrors [`run`](Self::run)'s resolution, but invokes the operation
    /// with the single help-request flag instead of real arguments, or prints
    /// the top-level usage when no command was named.
    pub async fn help(&self, args: &[String]) -> Result<(), DispatchError> {
        if args.len() > 1 {
            match self.handlers.resolve(&args[..2]).await {
                Ok(op) => {
                    let _ = op.invoke(vec![HELP_FLAG.to_string()]).await;
                    return Ok(());
                }
                Err(ResolveError::Initialization(cause)) => {
                    return Err(DispatchError::Initialization(cause));
                }
                Err(_) => {}
            }
        }
        if let Some(first) = args.first() {
            match self.handlers.resolve(&args[..1]).await {
                Ok(op) => {
                    let _ = op.invoke(vec![HELP_FLAG.to_string()]).await;
                    return Ok(());
                }
                Err(err) => return Err(DispatchError::from_resolve(err, first)),
            }
        }
        match &self.usage {
            Some(usage) => usage(),
            None => self.default_usage(),
        }
        Ok(())
    }

    async fn invoke(&self, op: ResolvedOperation, args: Vec<String>) -> Result<(), DispatchError> {
        op.invoke(args).await.map_err(DispatchError::Operation)
    }

    fn default_usage(&self) {
        println!("Usage: {PROGRAM} [OPTIONS] COMMAND [ARG...]");
        println!("\nCommands:");
        for name in self.handlers.command_names() {
            println!("  {name}");
        }
        println!("\nRun '{PROGRAM} COMMAND --help' for more information on a command.");
    }
}
