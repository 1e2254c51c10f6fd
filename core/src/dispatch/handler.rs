use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::ResolveError;

/// Namespace marker prepended to every normalized command name so operation
/// keys stay apart from anything else a handler set might index in the future.
const CAPABILITY_PREFIX: &str = "op:";

pub type OperationFuture = BoxFuture<'static, anyhow::Result<()>>;

type OperationFn = dyn Fn(Vec<String>) -> OperationFuture + Send + Sync;
type InitializerFn = dyn Fn() -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync;

/// An operation bound to one capability of a [`HandlerSet`].
///
/// Transient: produced per resolution attempt, discarded after invocation.
#[derive(Clone)]
pub struct ResolvedOperation {
    op: Arc<OperationFn>,
}

impl std::fmt::Debug for ResolvedOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedOperation").finish_non_exhaustive()
    }
}

impl ResolvedOperation {
    pub async fn invoke(&self, args: Vec<String>) -> anyhow::Result<()> {
        (self.op)(args).await
    }
}

/// The pluggable set of named operations a [`Dispatcher`] dispatches into,
/// with an optional initializer that runs before any operation executes.
///
/// Operations are stored in an explicit map keyed by normalized capability
/// name, built once by [`HandlerSetBuilder`] and immutable afterwards.
///
/// [`Dispatcher`]: crate::dispatch::Dispatcher
pub struct HandlerSet {
    operations: HashMap<String, Arc<OperationFn>>,
    names: Vec<String>,
    initializer: Option<Arc<InitializerFn>>,
}

impl HandlerSet {
    pub fn builder() -> HandlerSetBuilder {
        HandlerSetBuilder::default()
    }

    /// Registered command names in registration order, for usage listings.
    pub fn command_names(&self) -> &[String] {
        &self.names
    }

    /// Map command-name tokens to a bound operation.
    ///
    /// Tokens are normalized per-token (resolution is case-insensitive) and
    /// concatenated; boundaries are preserved, never re-split or merged. An
    /// empty token fails before any lookup. When the capability exists, the
    /// initializer (if any) runs first — on every resolution, uncached, so
    /// handler state can be refreshed before each command. An initializer
    /// error is reported as such, never as "not found".
    pub async fn resolve(&self, tokens: &[String]) -> Result<ResolvedOperation, ResolveError> {
        let name = capability_name(tokens)?;
        let Some(op) = self.operations.get(&name) else {
            return Err(ResolveError::NotFound);
        };
        if let Some(init) = &self.initializer {
            init().await.map_err(ResolveError::Initialization)?;
        }
        tracing::debug!(capability = %name, "resolved command");
        Ok(ResolvedOperation { op: op.clone() })
    }
}

#[derive(Default)]
pub struct HandlerSetBuilder {
    operations: HashMap<String, Arc<OperationFn>>,
    names: Vec<String>,
    initializer: Option<Arc<InitializerFn>>,
}

impl HandlerSetBuilder {
    /// Register an operation under a whitespace-separated name such as
    /// `"policy list"`. The name runs through the same normalization as
    /// resolution, so the two cannot diverge.
    ///
    /// Panics if any name component is empty; registration names are part of
    /// the program, not input.
    pub fn operation<F, Fut>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let tokens: Vec<String> = name.split_whitespace().map(str::to_string).collect();
        let key = capability_name(&tokens)
            .unwrap_or_else(|_| panic!("invalid operation name: {name:?}"));
        self.operations
            .insert(key, Arc::new(move |args| Box::pin(f(args))));
        self.names.push(tokens.join(" ").to_lowercase());
        self
    }

    /// Attach the optional one-time setup step. It is awaited on every
    /// successful resolution, so it must be idempotent and cheap.
    pub fn initializer<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.initializer = Some(Arc::new(move || Box::pin(f())));
        self
    }

    pub fn build(self) -> HandlerSet {
        HandlerSet {
            operations: self.operations,
            names: self.names,
            initializer: self.initializer,
        }
    }
}

/// Normalize command-name tokens into a capability key: each token
/// title-cased, concatenated in order, prefixed with the namespace marker.
pub fn capability_name<S: AsRef<str>>(tokens: &[S]) -> Result<String, ResolveError> {
    let mut name = String::from(CAPABILITY_PREFIX);
    if tokens.is_empty() {
        return Err(ResolveError::EmptyToken);
    }
    for token in tokens {
        let token = token.as_ref();
        if token.is_empty() {
            return Err(ResolveError::EmptyToken);
        }
        name.push_str(&title_case(token));
    }
    Ok(name)
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
