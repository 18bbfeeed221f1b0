//! English message catalog for labels rendered by the templates.

/// Resolves a translation key. Unknown keys are returned unchanged.
pub fn translate(key: &str) -> &str {
    match key {
        "form.actions.create" => "Create",
        "form.actions.save" => "Save",
        "form.actions.delete" => "Delete",
        "form.actions.cancel" => "Cancel",
        "config.index.title" => "Channel connectors",
        "config.index.empty" => "No connectors configured yet.",
        "config.index.new" => "Add",
        "config.index.name" => "Name",
        "config.index.adapter" => "Adapter",
        "config.index.updated" => "Last modified",
        "config.index.previous" => "Previous",
        "config.index.next" => "Next",
        "config.index.edit" => "Edit",
        "config.index.delete" => "Delete",
        "config.adapter.missing" => "unavailable",
        "config.new.title" => "New connector",
        "config.edit.title" => "Edit connector",
        "config.delete.title" => "Delete connector",
        "config.delete.confirm" => "Are you sure you want to delete this connector?",
        "form.secret.keep" => "Leave blank to keep the current value",
        other => other,
    }
}
