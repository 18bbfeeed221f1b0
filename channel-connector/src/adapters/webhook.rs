//! Webhook adapter: POSTs published content as JSON to a configured URL.

use crate::{Adapter, Manifest, OptionField, OptionKind};

pub struct WebhookAdapter {
    manifest: Manifest,
}

impl WebhookAdapter {
    pub fn new() -> Self {
        Self {
            manifest: Manifest::new(
                "webhook",
                "Webhook",
                "Sends published content as JSON to an HTTP endpoint",
                "1.0.0",
            ),
        }
    }
}

impl Default for WebhookAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Adapter for WebhookAdapter {
    fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    fn options(&self) -> Vec<OptionField> {
        vec![
            OptionField::new("url", "Endpoint URL", OptionKind::Url).required(),
            OptionField::new("secret", "Signing secret", OptionKind::Secret)
                .with_help("Used to sign the request body (HMAC-SHA256)"),
            OptionField::new("timeout_seconds", "Timeout (seconds)", OptionKind::Integer),
        ]
    }
}
