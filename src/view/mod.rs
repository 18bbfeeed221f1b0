//! Page rendering.
//!
//! Each page is a serializable view model implementing [`Page`]. It is
//! rendered as HTML, or as the model's JSON (tagged with the template name)
//! when the client prefers `application/json`.

mod html;
pub mod translations;

use crate::flash::{FlashBag, FlashMessage};
use crate::form::{ConfigForm, FormKind};
use crate::pagination::Pagination;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use channel_connector::{Adapter, Config, Manifest};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A renderable view model.
pub trait Page: Serialize {
    /// Template identifier, e.g. `config/index`.
    fn template(&self) -> &'static str;

    fn title(&self) -> String;

    /// HTML of the page body (inside the layout).
    fn body_html(&self) -> String;

    fn flashes(&self) -> &[FlashMessage];

    fn set_flashes(&mut self, flashes: Vec<FlashMessage>);
}

/// Display data of a config, without its options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSummary {
    pub name: String,
    pub adapter: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Config> for ConfigSummary {
    fn from(config: &Config) -> Self {
        Self {
            name: config.name.clone(),
            adapter: config.adapter.clone(),
            created_at: config.created_at,
            updated_at: config.updated_at,
        }
    }
}

/// A config row of the list page with its resolved adapter.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigRow {
    pub config: ConfigSummary,
    /// `None` when the adapter is no longer registered.
    pub adapter: Option<Manifest>,
}

/// `config/index`
#[derive(Debug, Serialize)]
pub struct IndexPage {
    /// Every registered adapter, one "new" link each.
    pub adapters: Vec<Manifest>,
    pub pager: Pagination<ConfigRow>,
    pub flashes: Vec<FlashMessage>,
}

/// `config/new`, `config/edit` and `config/delete` share one model.
#[derive(Debug, Serialize)]
pub struct FormPage {
    /// `None` on the delete page when the adapter is gone.
    pub adapter: Option<Manifest>,
    pub data: ConfigSummary,
    pub form: ConfigForm,
    pub flashes: Vec<FlashMessage>,
}

impl FormPage {
    pub fn new(adapter: Option<&dyn Adapter>, data: &Config, form: ConfigForm) -> Self {
        Self {
            adapter: adapter.map(|a| a.manifest().clone()),
            data: ConfigSummary::from(data),
            form,
            flashes: Vec::new(),
        }
    }
}

impl Page for IndexPage {
    fn template(&self) -> &'static str {
        "config/index"
    }

    fn title(&self) -> String {
        translations::translate("config.index.title").to_string()
    }

    fn body_html(&self) -> String {
        html::index_body(self)
    }

    fn flashes(&self) -> &[FlashMessage] {
        &self.flashes
    }

    fn set_flashes(&mut self, flashes: Vec<FlashMessage>) {
        self.flashes = flashes;
    }
}

impl Page for FormPage {
    fn template(&self) -> &'static str {
        match self.form.kind {
            FormKind::New => "config/new",
            FormKind::Edit => "config/edit",
            FormKind::Delete => "config/delete",
        }
    }

    fn title(&self) -> String {
        let key = match self.form.kind {
            FormKind::New => "config.new.title",
            FormKind::Edit => "config.edit.title",
            FormKind::Delete => "config.delete.title",
        };
        let adapter = self
            .adapter
            .as_ref()
            .map(|m| m.label().to_string())
            .unwrap_or_else(|| self.data.adapter.clone());
        format!("{}: {}", translations::translate(key), adapter)
    }

    fn body_html(&self) -> String {
        html::form_body(self)
    }

    fn flashes(&self) -> &[FlashMessage] {
        &self.flashes
    }

    fn set_flashes(&mut self, flashes: Vec<FlashMessage>) {
        self.flashes = flashes;
    }
}

#[derive(Serialize)]
struct Rendered<'a, P: Serialize> {
    template: &'static str,
    #[serde(flatten)]
    context: &'a P,
}

/// Whether the client asked for the JSON rendition.
pub fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| accept.contains("application/json"))
        .unwrap_or(false)
}

/// Renders `page` with the given status.
///
/// Pending flash messages are moved from the request cookie into the page.
/// Any flash cookie on the request is cleared, including a malformed one.
pub fn render<P: Page>(
    headers: &HeaderMap,
    status: StatusCode,
    mut page: P,
) -> Response {
    let consumed = FlashBag::is_present(headers);
    let flash = FlashBag::from_headers(headers);
    page.set_flashes(flash.into_messages());

    let mut response = if wants_json(headers) {
        (
            status,
            Json(Rendered {
                template: page.template(),
                context: &page,
            }),
        )
            .into_response()
    } else {
        let body = html::layout(&page.title(), page.flashes(), &page.body_html());
        (status, Html(body)).into_response()
    };

    if consumed {
        response
            .headers_mut()
            .append(header::SET_COOKIE, FlashBag::clear_cookie());
    }
    response
}
