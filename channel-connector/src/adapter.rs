use crate::types::{Manifest, OptionField};

/// Connector adapter interface.
///
/// An adapter is a read-only description of a connector implementation:
/// who it is (its [`Manifest`]) and what it needs to be configured (its
/// option schema). Adapters are stateless - the per-channel settings live in
/// [`Config`](crate::Config) records owned by a
/// [`ConfigManager`](crate::ConfigManager).
///
/// # Example
/// ```
/// use channel_connector::{Adapter, Manifest, OptionField, OptionKind};
///
/// struct RssAdapter {
///     manifest: Manifest,
/// }
///
/// impl Adapter for RssAdapter {
///     fn manifest(&self) -> &Manifest {
///         &self.manifest
///     }
///
///     fn options(&self) -> Vec<OptionField> {
///         vec![OptionField::new("feed_url", "Feed URL", OptionKind::Url).required()]
///     }
/// }
///
/// let adapter = RssAdapter {
///     manifest: Manifest::new("rss", "RSS feed", "Publishes to an RSS feed", "1.0.0"),
/// };
/// assert_eq!(adapter.manifest().name(), "rss");
/// ```
pub trait Adapter: Send + Sync {
    /// Returns the adapter's descriptive metadata.
    ///
    /// `manifest().name()` is the unique identifier used for registry
    /// lookups, URLs and the `adapter` field of stored configs.
    fn manifest(&self) -> &Manifest;

    /// Returns the configuration schema for this adapter.
    ///
    /// Each field becomes one `options[KEY]` input on the config forms.
    fn options(&self) -> Vec<OptionField>;
}
