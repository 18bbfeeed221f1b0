//! Submit button group shared by the config forms.
//!
//! Every form gets one `actions` field rendered as a row of submit buttons
//! named `actions`. The value of the clicked button tells the controller
//! what the user asked for.

use serde::{Serialize, Serializer};

/// Name of the button group field in submitted form data.
pub const ACTIONS_FIELD: &str = "actions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Save,
    Delete,
    Cancel,
}

/// Declarative options of one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionButton {
    pub action: Action,
    /// Translation key of the button text.
    pub label: &'static str,
    /// Visual style override. `None` renders the primary style.
    pub button_class: Option<&'static str>,
}

/// All buttons a channel form may use.
pub const CHANNEL_ACTIONS: &[ActionButton] = &[
    ActionButton {
        action: Action::Create,
        label: "form.actions.create",
        button_class: None,
    },
    ActionButton {
        action: Action::Save,
        label: "form.actions.save",
        button_class: None,
    },
    ActionButton {
        action: Action::Delete,
        label: "form.actions.delete",
        button_class: None,
    },
    ActionButton {
        action: Action::Cancel,
        label: "form.actions.cancel",
        button_class: Some("default"),
    },
];

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Save => "save",
            Action::Delete => "delete",
            Action::Cancel => "cancel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "create" => Some(Action::Create),
            "save" => Some(Action::Save),
            "delete" => Some(Action::Delete),
            "cancel" => Some(Action::Cancel),
            _ => None,
        }
    }

    /// Button options from [`CHANNEL_ACTIONS`].
    pub fn button(&self) -> ActionButton {
        CHANNEL_ACTIONS
            .iter()
            .copied()
            .find(|b| b.action == *self)
            .unwrap_or(ActionButton {
                action: *self,
                label: "form.actions.submit",
                button_class: None,
            })
    }
}

impl ActionButton {
    pub fn class(&self) -> &'static str {
        self.button_class.unwrap_or("primary")
    }
}

/// The buttons attached to one form, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionGroup {
    actions: Vec<Action>,
}

impl ActionGroup {
    pub fn new(actions: &[Action]) -> Self {
        Self {
            actions: actions.to_vec(),
        }
    }

    pub fn buttons(&self) -> Vec<ActionButton> {
        self.actions.iter().map(Action::button).collect()
    }

    /// First button of the group, assumed when a submission names none.
    pub fn primary(&self) -> Option<Action> {
        self.actions.first().copied()
    }

    /// Resolves the submitted button value.
    ///
    /// Missing value means the primary action (e.g. the form was submitted
    /// with the enter key). A value that is not a button of this group means
    /// no button was clicked.
    pub fn clicked(&self, submitted: Option<&str>) -> Option<Action> {
        match submitted {
            None => self.primary(),
            Some(name) => Action::from_name(name).filter(|a| self.actions.contains(a)),
        }
    }
}

impl Serialize for ActionGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.buttons())
    }
}
