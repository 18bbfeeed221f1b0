//! Unit tests for the config controller helpers

use super::*;
use channel_connector::adapters::WebhookAdapter;
use channel_connector::MemoryConfigManager;

fn make_state(flash_enabled: bool) -> ConfigAppState {
    ConfigAppState {
        manager: Arc::new(MemoryConfigManager::new()),
        registry: Arc::new(Registry::with_builtin_adapters(&[]).unwrap()),
        paginator: Some(Paginator::new(10)),
        flash_enabled,
    }
}

fn sample_config() -> Config {
    let mut config = Config::new("webhook");
    config.name = "newsletter".to_string();
    config
}

#[test]
fn test_new_form_options() {
    let adapter = WebhookAdapter::new();
    let form = create_new_form(&Config::new("webhook"), &adapter);

    assert_eq!(form.kind, FormKind::New);
    assert_eq!(form.action, "/channel/config/new/webhook");
    assert_eq!(form.method, FormMethod::Post);
    assert_eq!(form.actions, ActionGroup::new(&[Action::Create, Action::Cancel]));
}

#[test]
fn test_edit_form_options() {
    let adapter = WebhookAdapter::new();
    let form = create_edit_form(&sample_config(), &adapter);

    assert_eq!(form.kind, FormKind::Edit);
    assert_eq!(form.action, "/channel/config/newsletter/edit");
    assert_eq!(form.method, FormMethod::Put);
    assert_eq!(form.actions, ActionGroup::new(&[Action::Save, Action::Cancel]));
}

#[test]
fn test_delete_form_options() {
    let form = create_delete_form(&sample_config());

    assert_eq!(form.kind, FormKind::Delete);
    assert_eq!(form.action, "/channel/config/newsletter/delete");
    assert_eq!(form.method, FormMethod::Delete);
    assert_eq!(form.actions, ActionGroup::new(&[Action::Delete, Action::Cancel]));
    assert!(form.fields.is_empty());
}

#[test]
fn test_flash_message_respects_config() {
    let enabled = make_state(true);
    let bag = flash_message(&enabled, "saved".to_string()).expect("flash expected");
    assert_eq!(bag.messages()[0].message, "saved");

    let disabled = make_state(false);
    assert!(flash_message(&disabled, "saved".to_string()).is_none());
}

#[test]
fn test_redirect_to_index() {
    let response = redirect_to_index(None);
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/channel/config"
    );
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[test]
fn test_redirect_to_index_with_flash() {
    let mut bag = FlashBag::new();
    bag.success("The config newsletter is removed");

    let response = redirect_to_index(Some(bag));
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("flash cookie expected")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("channel_flash="));
}

#[test]
fn test_app_error_status_codes() {
    assert_eq!(
        AppError::NotFound("x".to_string()).into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        AppError::BadRequest("x".to_string()).into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::ServiceUnavailable("Paginator service not found".to_string())
            .into_response()
            .status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_anyhow_error_becomes_internal() {
    let err: AppError = anyhow::anyhow!("disk full").into();
    assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_error_response_serialization() {
    let json = serde_json::to_string(&ErrorResponse {
        error: "Config 'x' not found".to_string(),
    })
    .unwrap();
    assert_eq!(json, r#"{"error":"Config 'x' not found"}"#);
}
