//! Built-in adapters shipped with the platform.

pub mod twitter;
pub mod webhook;

pub use twitter::TwitterAdapter;
pub use webhook::WebhookAdapter;

use crate::Adapter;
use std::sync::Arc;

/// Returns every built-in adapter.
pub fn builtin_adapters() -> Vec<Arc<dyn Adapter>> {
    vec![
        Arc::new(TwitterAdapter::new()),
        Arc::new(WebhookAdapter::new()),
    ]
}
