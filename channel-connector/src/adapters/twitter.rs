//! Twitter adapter: posts a status update per published item.

use crate::{Adapter, Manifest, OptionField, OptionKind};

pub struct TwitterAdapter {
    manifest: Manifest,
}

impl TwitterAdapter {
    pub fn new() -> Self {
        Self {
            manifest: Manifest::new(
                "twitter",
                "Twitter",
                "Posts a status update for every published item",
                "1.0.0",
            ),
        }
    }
}

impl Default for TwitterAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Adapter for TwitterAdapter {
    fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    // OAuth 1.0a app + user credentials
    fn options(&self) -> Vec<OptionField> {
        vec![
            OptionField::new("consumer_key", "Consumer key", OptionKind::Secret).required(),
            OptionField::new("consumer_secret", "Consumer secret", OptionKind::Secret).required(),
            OptionField::new("access_token", "Access token", OptionKind::Secret).required(),
            OptionField::new("access_token_secret", "Access token secret", OptionKind::Secret)
                .required(),
        ]
    }
}
