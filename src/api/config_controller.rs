//! Channel connector config pages.
//!
//! Four actions:
//! - `GET /channel/config`: paginated list of configs
//! - `GET|POST /channel/config/new/:adapter`: create a config for an adapter
//! - `GET|PUT /channel/config/:id/edit`: update a config
//! - `GET|DELETE /channel/config/:id/delete`: remove a config
//!
//! PUT and DELETE may also arrive as POST with a `_method` form field.
//! Every successful or cancelled submission redirects to the list page.

use crate::flash::FlashBag;
use crate::form::{Action, ActionGroup, ConfigForm, FormData, FormKind, FormMethod, NAME_FIELD};
use crate::pagination::{parse_page, Paginator};
use crate::routes::{
    delete_url, edit_url, new_url, DELETE_ROUTE, EDIT_ROUTE, INDEX_PATH, NEW_ROUTE,
};
use crate::view::{render, ConfigRow, ConfigSummary, FormPage, IndexPage};
use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use channel_connector::{Adapter, Config, ConfigExists, ConfigManager, Registry};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

#[cfg(test)]
mod tests;

const DUPLICATE_NAME_ERROR: &str = "A config with this name already exists.";

/// Shared application state for the config pages
#[derive(Clone)]
pub struct ConfigAppState {
    pub manager: Arc<dyn ConfigManager>,
    pub registry: Arc<Registry>,
    /// `None` when pagination is not configured; the list page then fails.
    pub paginator: Option<Paginator>,
    /// Whether success notifications are recorded.
    pub flash_enabled: bool,
}

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Create config router
pub fn create_config_router(state: ConfigAppState) -> Router {
    Router::new()
        .route(INDEX_PATH, get(index))
        .route(NEW_ROUTE, get(new_config).post(new_config))
        .route(EDIT_ROUTE, get(edit_config).post(edit_config).put(edit_config))
        .route(
            DELETE_ROUTE,
            get(delete_config).post(delete_config).delete(delete_config),
        )
        .with_state(Arc::new(state))
}

/// GET /channel/config - List configs with their resolved adapters
async fn index(
    State(state): State<Arc<ConfigAppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(paginator) = &state.paginator else {
        return Err(AppError::ServiceUnavailable(
            "Paginator service not found".to_string(),
        ));
    };

    // Read by hand so repeated or undecodable keys fall back to page 1
    let params = FormData::parse(query.unwrap_or_default().as_bytes()).unwrap_or_default();
    let page = parse_page(params.get("page"));
    let configs = state.manager.find_all()?;

    debug!(page = page, total = configs.len(), "Listing channel configs");

    let pager = paginator.paginate(configs, page).map(|config| ConfigRow {
        adapter: state
            .registry
            .get_adapter(&config.adapter)
            .ok()
            .map(|a| a.manifest().clone()),
        config: ConfigSummary::from(&config),
    });

    let adapters = state
        .registry
        .get_adapters()
        .iter()
        .map(|a| a.manifest().clone())
        .collect();

    Ok(render(
        &headers,
        StatusCode::OK,
        IndexPage {
            adapters,
            pager,
            flashes: Vec::new(),
        },
    ))
}

/// GET|POST /channel/config/new/:adapter - Create a config for an adapter
async fn new_config(
    State(state): State<Arc<ConfigAppState>>,
    Path(adapter_name): Path<String>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let adapter = state
        .registry
        .get_adapter(&adapter_name)
        .map_err(|e| AppError::NotFound(e.to_string()))?;

    let mut data = Config::new(adapter.manifest().name());
    let mut form = create_new_form(&data, adapter.as_ref());
    let mut status = StatusCode::OK;

    let submission = FormData::parse(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    if form.method.matches(&submission.effective_method(&method)) {
        form.submit(&submission, &mut data);

        if form.clicked() == Some(Action::Cancel) {
            return Ok(redirect_to_index(None));
        }

        // Creating must not overwrite an existing config of the same name
        if form.is_valid() && state.manager.find(&data.name)?.is_some() {
            form.add_error(NAME_FIELD, DUPLICATE_NAME_ERROR);
        }

        if form.is_valid() && form.clicked() == Some(Action::Create) {
            // A concurrent create may have taken the name since the check above
            match state.manager.create(&data) {
                Ok(()) => {
                    info!(config = %data.name, adapter = %data.adapter, "Channel config created");

                    let flash = flash_message(&state, format!("The config {} is saved", data.name));
                    return Ok(redirect_to_index(flash));
                }
                Err(e) if e.downcast_ref::<ConfigExists>().is_some() => {
                    debug!(config = %data.name, "Config name taken concurrently");
                    form.add_error(NAME_FIELD, DUPLICATE_NAME_ERROR);
                }
                Err(e) => return Err(e.into()),
            }
        }

        status = StatusCode::UNPROCESSABLE_ENTITY;
    }

    Ok(render(
        &headers,
        status,
        FormPage::new(Some(adapter.as_ref()), &data, form),
    ))
}

/// GET|PUT /channel/config/:id/edit - Update a config
///
/// The config's adapter must still be registered.
async fn edit_config(
    State(state): State<Arc<ConfigAppState>>,
    Path(id): Path<String>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let Some(mut data) = state.manager.find(&id)? else {
        return Err(AppError::NotFound(format!("Config '{}' not found", id)));
    };

    let adapter = state
        .registry
        .get_adapter(&data.adapter)
        .map_err(|e| AppError::NotFound(e.to_string()))?;

    let mut form = create_edit_form(&data, adapter.as_ref());
    let mut status = StatusCode::OK;

    let submission = FormData::parse(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    if form.method.matches(&submission.effective_method(&method)) {
        form.submit(&submission, &mut data);

        if form.clicked() == Some(Action::Cancel) {
            return Ok(redirect_to_index(None));
        }

        if form.is_valid() && form.clicked() == Some(Action::Save) {
            data.touch();
            state.manager.persist(&data)?;

            info!(config = %data.name, adapter = %data.adapter, "Channel config updated");

            let flash = flash_message(
                &state,
                format!("The changes to the config {} are saved", data.name),
            );
            return Ok(redirect_to_index(flash));
        }

        status = StatusCode::UNPROCESSABLE_ENTITY;
    }

    Ok(render(
        &headers,
        status,
        FormPage::new(Some(adapter.as_ref()), &data, form),
    ))
}

/// GET|DELETE /channel/config/:id/delete - Remove a config
///
/// A config can always be deleted, even when its adapter is no longer
/// registered. A config that is already gone redirects to the list.
async fn delete_config(
    State(state): State<Arc<ConfigAppState>>,
    Path(id): Path<String>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let Some(mut data) = state.manager.find(&id)? else {
        debug!(config = %id, "Config already removed");
        return Ok(redirect_to_index(None));
    };

    let mut form = create_delete_form(&data);
    let mut status = StatusCode::OK;

    let submission = FormData::parse(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    if form.method.matches(&submission.effective_method(&method)) {
        form.submit(&submission, &mut data);

        if form.clicked() == Some(Action::Cancel) {
            return Ok(redirect_to_index(None));
        }

        if form.is_valid() && form.clicked() == Some(Action::Delete) {
            state.manager.remove(&data)?;

            info!(config = %data.name, adapter = %data.adapter, "Channel config removed");

            let flash = flash_message(&state, format!("The config {} is removed", data.name));
            return Ok(redirect_to_index(flash));
        }

        status = StatusCode::UNPROCESSABLE_ENTITY;
    }

    let adapter = if state.registry.has_adapter(&data.adapter) {
        state.registry.get_adapter(&data.adapter).ok()
    } else {
        None
    };

    Ok(render(
        &headers,
        status,
        FormPage::new(adapter.as_deref(), &data, form),
    ))
}

fn create_new_form(data: &Config, adapter: &dyn Adapter) -> ConfigForm {
    let mut form = ConfigForm::new(
        FormKind::New,
        data,
        Some(adapter),
        new_url(adapter.manifest().name()),
        FormMethod::Post,
    );
    form.add_actions(ActionGroup::new(&[Action::Create, Action::Cancel]));
    form
}

fn create_edit_form(data: &Config, adapter: &dyn Adapter) -> ConfigForm {
    let mut form = ConfigForm::new(
        FormKind::Edit,
        data,
        Some(adapter),
        edit_url(&data.name),
        FormMethod::Put,
    );
    form.add_actions(ActionGroup::new(&[Action::Save, Action::Cancel]));
    form
}

fn create_delete_form(data: &Config) -> ConfigForm {
    let mut form = ConfigForm::new(
        FormKind::Delete,
        data,
        None,
        delete_url(&data.name),
        FormMethod::Delete,
    );
    form.add_actions(ActionGroup::new(&[Action::Delete, Action::Cancel]));
    form
}

/// Flash bag with one success message, or `None` when flash is disabled.
fn flash_message(state: &ConfigAppState, message: String) -> Option<FlashBag> {
    if !state.flash_enabled {
        return None;
    }
    let mut bag = FlashBag::new();
    bag.success(message);
    Some(bag)
}

/// 303 to the list page, carrying pending flash messages in a cookie.
fn redirect_to_index(flash: Option<FlashBag>) -> Response {
    let mut response = Redirect::to(INDEX_PATH).into_response();
    if let Some(cookie) = flash.and_then(|bag| bag.to_cookie()) {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}

/// Application error types
#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    ServiceUnavailable(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ServiceUnavailable(msg) => {
                error!(error = %msg, "Required service missing");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        error!(error = %e, "Config manager failure");
        AppError::InternalServerError(format!("{:#}", e))
    }
}
