//! Config forms.
//!
//! A [`ConfigForm`] binds a [`Config`] (and, for new/edit, its adapter's
//! option schema) to a list of input fields, a submission target and an
//! action button group. Submitted data is bound back onto the config and
//! validated field by field.

pub mod actions;

pub use actions::{Action, ActionButton, ActionGroup, ACTIONS_FIELD, CHANNEL_ACTIONS};

use axum::http::Method;
use channel_connector::{Adapter, Config, OptionField, OptionKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// Hidden field used by HTML forms to tunnel PUT/DELETE through POST.
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

/// Name input of the new/edit forms.
pub const NAME_FIELD: &str = "name";

const NAME_MAX_LEN: usize = 64;

/// Names that would collide with the `/channel/config/new/:adapter` route.
const RESERVED_NAMES: &[&str] = &["new"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    New,
    Edit,
    Delete,
}

impl FormKind {
    pub fn form_name(&self) -> &'static str {
        match self {
            FormKind::New => "channel_config_new",
            FormKind::Edit => "channel_config_edit",
            FormKind::Delete => "channel_config_delete",
        }
    }
}

/// HTTP method a form submits with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormMethod {
    Post,
    Put,
    Delete,
}

impl FormMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormMethod::Post => "POST",
            FormMethod::Put => "PUT",
            FormMethod::Delete => "DELETE",
        }
    }

    pub fn matches(&self, method: &Method) -> bool {
        method.as_str() == self.as_str()
    }
}

/// Decoded `application/x-www-form-urlencoded` request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(body: &[u8]) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)?;
        Ok(Self { pairs })
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The request method after applying a `_method` override on POST.
    ///
    /// Overrides on other methods, and unparsable overrides, are ignored.
    pub fn effective_method(&self, method: &Method) -> Method {
        if method != Method::POST {
            return method.clone();
        }
        self.get(METHOD_OVERRIDE_FIELD)
            .and_then(|m| Method::from_bytes(m.trim().to_ascii_uppercase().as_bytes()).ok())
            .unwrap_or(Method::POST)
    }
}

/// One rendered input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    /// Input name in submitted data (`name` or `options[KEY]`).
    pub name: String,
    pub label: String,
    pub kind: OptionKind,
    pub required: bool,
    pub read_only: bool,
    /// Current value. Always empty for secrets, see `has_value`.
    pub value: String,
    /// Whether a secret field already holds a value.
    pub has_value: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    pub errors: Vec<String>,
    /// Schema of the adapter option; `None` for the name field.
    #[serde(skip)]
    option: Option<OptionField>,
}

impl FormField {
    fn name_field(value: &str, read_only: bool) -> Self {
        Self {
            name: NAME_FIELD.to_string(),
            label: "Name".to_string(),
            kind: OptionKind::Text,
            required: true,
            read_only,
            value: value.to_string(),
            has_value: !value.is_empty(),
            help: None,
            errors: Vec::new(),
            option: None,
        }
    }

    fn option_field(option: OptionField, current: Option<&str>) -> Self {
        let current = current.unwrap_or("");
        let secret = option.kind == OptionKind::Secret;
        Self {
            name: option_input_name(&option.key),
            label: option.label.clone(),
            kind: option.kind,
            required: option.required,
            read_only: false,
            value: if secret { String::new() } else { current.to_string() },
            has_value: !current.is_empty(),
            help: option.help.clone(),
            errors: Vec::new(),
            option: Some(option),
        }
    }
}

/// Input name of an adapter option.
pub fn option_input_name(key: &str) -> String {
    format!("options[{}]", key)
}

/// One of the three config forms.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigForm {
    pub kind: FormKind,
    /// Form name (`channel_config_new`, ...).
    pub name: &'static str,
    /// Submission URL.
    pub action: String,
    pub method: FormMethod,
    pub fields: Vec<FormField>,
    pub actions: ActionGroup,
    /// Errors not tied to a single field.
    pub errors: Vec<String>,
    pub submitted: bool,
    #[serde(skip)]
    clicked: Option<Action>,
}

impl ConfigForm {
    /// Builds a form for `data`.
    ///
    /// New and edit forms get a name field plus one field per adapter
    /// option; the edit form's name is read-only. Delete forms carry no
    /// fields and ignore `adapter`.
    pub fn new(
        kind: FormKind,
        data: &Config,
        adapter: Option<&dyn Adapter>,
        action: impl Into<String>,
        method: FormMethod,
    ) -> Self {
        let mut fields = Vec::new();

        if kind != FormKind::Delete {
            fields.push(FormField::name_field(&data.name, kind == FormKind::Edit));
            if let Some(adapter) = adapter {
                for option in adapter.options() {
                    let current = data.option(&option.key);
                    fields.push(FormField::option_field(option, current));
                }
            }
        }

        Self {
            kind,
            name: kind.form_name(),
            action: action.into(),
            method,
            fields,
            actions: ActionGroup::default(),
            errors: Vec::new(),
            submitted: false,
            clicked: None,
        }
    }

    /// Attaches the submit button group.
    pub fn add_actions(&mut self, actions: ActionGroup) {
        self.actions = actions;
    }

    /// Binds submitted data onto `config` and validates it.
    ///
    /// The name is bound only when its field is editable. Options are
    /// rebuilt from the adapter schema, so unknown keys are dropped. A blank
    /// secret keeps the value already stored on `config`.
    pub fn submit(&mut self, data: &FormData, config: &mut Config) {
        self.submitted = true;
        self.clicked = self.actions.clicked(data.get(ACTIONS_FIELD));

        if self.kind == FormKind::Delete {
            return;
        }

        let mut options = BTreeMap::new();

        for field in &mut self.fields {
            let submitted = data.get(&field.name).unwrap_or("").trim().to_string();

            let Some(option) = &field.option else {
                if !field.read_only {
                    if let Err(e) = validate_name(&submitted) {
                        field.errors.push(e);
                    }
                    config.name = submitted.clone();
                    field.value = submitted;
                    field.has_value = !field.value.is_empty();
                }
                continue;
            };

            let secret = option.kind == OptionKind::Secret;
            let value = if secret && submitted.is_empty() {
                config.option(&option.key).unwrap_or("").to_string()
            } else {
                submitted
            };

            if let Err(e) = option.validate(&value) {
                field.errors.push(e);
            }

            field.has_value = !value.is_empty();
            if !secret {
                field.value = value.clone();
            }
            if !value.is_empty() {
                options.insert(option.key.clone(), value);
            }
        }

        config.options = options;
    }

    /// Button the submission was made with, if any.
    pub fn clicked(&self) -> Option<Action> {
        self.clicked
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Submitted and free of errors.
    pub fn is_valid(&self) -> bool {
        self.submitted && self.errors.is_empty() && self.fields.iter().all(|f| f.errors.is_empty())
    }

    /// Adds an error to the field with input name `field`, or to the form
    /// itself when there is no such field.
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.fields.iter_mut().find(|f| f.name == field) {
            Some(f) => f.errors.push(message),
            None => self.errors.push(message),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The hidden `_method` value HTML needs, for PUT/DELETE forms.
    pub fn method_override(&self) -> Option<&'static str> {
        match self.method {
            FormMethod::Post => None,
            other => Some(other.as_str()),
        }
    }
}

/// Config names are URL path segments: 1-64 of `[A-Za-z0-9_-]`.
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("This value should not be blank.".to_string());
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(format!(
            "This value is too long. It should have {} characters or less.",
            NAME_MAX_LEN
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("Use only letters, digits, dashes and underscores.".to_string());
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(format!("The name \"{}\" is reserved.", name));
    }
    Ok(())
}
