use std::sync::Arc;

use anyhow::Result;

use polctl_core::api::{AppConfig, HandlerSet};

use crate::api::{HttpPolicyClient, PolicyApi};
use crate::commands::policy;

/// Build the full handler set for the configured controller.
pub fn build_handlers(cfg: &AppConfig) -> Result<HandlerSet> {
    let api: Arc<dyn PolicyApi> = Arc::new(HttpPolicyClient::new(&cfg.api)?);
    Ok(command_set(api))
}

/// Wire the command handlers and the initializer around any [`PolicyApi`].
/// Split out from [`build_handlers`] so tests can inject a fake controller.
pub fn command_set(api: Arc<dyn PolicyApi>) -> HandlerSet {
    let list_api = api.clone();
    let create_api = api.clone();
    let delete_api = api.clone();
    let init_api = api.clone();

    HandlerSet::builder()
        .operation("policy", policy::root)
        .operation("policy list", move |args| {
            policy::list(list_api.clone(), args)
        })
        .operation("policy create", move |args| {
            policy::create(create_api.clone(), args)
        })
        .operation("policy delete", move |args| {
            policy::delete(delete_api.clone(), args)
        })
        .initializer(move || {
            let api = init_api.clone();
            async move { api.initialize().await }
        })
        .build()
}
