use super::translations::translate;
use super::{FormPage, IndexPage};
use crate::flash::{FlashKind, FlashMessage};
use crate::form::{
    Action, ConfigForm, FormField, FormKind, ACTIONS_FIELD, METHOD_OVERRIDE_FIELD,
};
use crate::routes::{delete_url, edit_url, index_url, new_url};
use channel_connector::OptionKind;
use std::fmt::Write;

/// Escapes text for HTML element content and double-quoted attributes.
pub(super) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub(super) fn layout(title: &str, flashes: &[FlashMessage], body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<div class=\"container\">\n<h1>{}</h1>\n",
        escape(title),
        escape(title)
    );
    for flash in flashes {
        let _ = writeln!(
            html,
            "<div class=\"alert alert-{}\">{}</div>",
            flash_class(flash.kind),
            escape(&flash.message)
        );
    }
    html.push_str(body);
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn flash_class(kind: FlashKind) -> &'static str {
    match kind {
        FlashKind::Success => "success",
        FlashKind::Info => "info",
        FlashKind::Warning => "warning",
        FlashKind::Danger => "danger",
    }
}

pub(super) fn index_body(page: &IndexPage) -> String {
    let mut html = String::new();

    html.push_str("<div class=\"btn-group\">\n");
    for adapter in &page.adapters {
        let _ = writeln!(
            html,
            "<a class=\"btn btn-default\" href=\"{}\">{} {}</a>",
            escape(&new_url(adapter.name())),
            translate("config.index.new"),
            escape(adapter.label())
        );
    }
    html.push_str("</div>\n");

    if page.pager.items.is_empty() {
        let _ = writeln!(html, "<p>{}</p>", translate("config.index.empty"));
    } else {
        let _ = writeln!(
            html,
            "<table class=\"table\">\n<thead><tr><th>{}</th><th>{}</th><th>{}</th><th></th></tr></thead>\n<tbody>",
            translate("config.index.name"),
            translate("config.index.adapter"),
            translate("config.index.updated")
        );
        for row in &page.pager.items {
            let adapter = match &row.adapter {
                Some(manifest) => escape(manifest.label()),
                None => format!(
                    "{} <span class=\"label label-warning\">{}</span>",
                    escape(&row.config.adapter),
                    translate("config.adapter.missing")
                ),
            };
            // Editing needs a registered adapter; deleting never does
            let edit = if row.adapter.is_some() {
                format!(
                    "<a href=\"{}\">{}</a> ",
                    escape(&edit_url(&row.config.name)),
                    translate("config.index.edit")
                )
            } else {
                String::new()
            };
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}<a href=\"{}\">{}</a></td></tr>",
                escape(&row.config.name),
                adapter,
                row.config.updated_at.format("%Y-%m-%d %H:%M"),
                edit,
                escape(&delete_url(&row.config.name)),
                translate("config.index.delete")
            );
        }
        html.push_str("</tbody>\n</table>\n");
    }

    if page.pager.page_count > 1 {
        html.push_str("<ul class=\"pager\">\n");
        if page.pager.has_previous() {
            let _ = writeln!(
                html,
                "<li><a href=\"{}\">{}</a></li>",
                escape(&index_url(page.pager.current_page - 1)),
                translate("config.index.previous")
            );
        }
        let _ = writeln!(
            html,
            "<li>{} / {}</li>",
            page.pager.current_page, page.pager.page_count
        );
        if page.pager.has_next() {
            let _ = writeln!(
                html,
                "<li><a href=\"{}\">{}</a></li>",
                escape(&index_url(page.pager.current_page + 1)),
                translate("config.index.next")
            );
        }
        html.push_str("</ul>\n");
    }

    html
}

pub(super) fn form_body(page: &FormPage) -> String {
    let mut html = String::new();

    if let Some(adapter) = &page.adapter {
        let _ = writeln!(html, "<p class=\"lead\">{}</p>", escape(adapter.description()));
    }
    if page.form.kind == FormKind::Delete {
        let _ = writeln!(
            html,
            "<p>{} <strong>{}</strong></p>",
            translate("config.delete.confirm"),
            escape(&page.data.name)
        );
    }

    html.push_str(&form_html(&page.form));
    html
}

fn form_html(form: &ConfigForm) -> String {
    let mut html = String::new();

    // Browsers only submit GET/POST; PUT and DELETE ride on `_method`
    let _ = writeln!(
        html,
        "<form name=\"{}\" method=\"post\" action=\"{}\">",
        form.name,
        escape(&form.action)
    );
    if let Some(method) = form.method_override() {
        let _ = writeln!(
            html,
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
            METHOD_OVERRIDE_FIELD, method
        );
    }

    for error in &form.errors {
        let _ = writeln!(html, "<div class=\"alert alert-danger\">{}</div>", escape(error));
    }

    for field in &form.fields {
        html.push_str(&field_html(field));
    }

    html.push_str("<div class=\"form-group\">\n");
    for button in form.actions.buttons() {
        // Cancel must not be blocked by client-side `required` checks
        let novalidate = if button.action == Action::Cancel {
            " formnovalidate"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<button type=\"submit\" name=\"{}\" value=\"{}\" class=\"btn btn-{}\"{}>{}</button>",
            ACTIONS_FIELD,
            button.action.name(),
            button.class(),
            novalidate,
            translate(button.label)
        );
    }
    html.push_str("</div>\n</form>\n");

    html
}

fn field_html(field: &FormField) -> String {
    let mut html = String::new();
    let id = field
        .name
        .replace(|c: char| !c.is_ascii_alphanumeric(), "_");
    let input_type = match field.kind {
        OptionKind::Text => "text",
        OptionKind::Secret => "password",
        OptionKind::Url => "url",
        OptionKind::Integer => "number",
    };

    let group_class = if field.errors.is_empty() {
        "form-group"
    } else {
        "form-group has-error"
    };
    let _ = writeln!(html, "<div class=\"{}\">", group_class);
    let _ = writeln!(
        html,
        "<label for=\"{}\">{}</label>",
        id,
        escape(&field.label)
    );

    let mut attrs = String::new();
    let secret_kept = field.kind == OptionKind::Secret && field.has_value;
    if field.required && !secret_kept {
        attrs.push_str(" required");
    }
    if field.read_only {
        attrs.push_str(" readonly");
    }
    if secret_kept {
        let _ = write!(attrs, " placeholder=\"{}\"", translate("form.secret.keep"));
    }
    let _ = writeln!(
        html,
        "<input type=\"{}\" id=\"{}\" name=\"{}\" value=\"{}\" class=\"form-control\"{}>",
        input_type,
        id,
        escape(&field.name),
        escape(&field.value),
        attrs
    );

    if let Some(help) = &field.help {
        let _ = writeln!(html, "<span class=\"help-block\">{}</span>", escape(help));
    }
    for error in &field.errors {
        let _ = writeln!(html, "<span class=\"help-block\">{}</span>", escape(error));
    }
    html.push_str("</div>\n");

    html
}
