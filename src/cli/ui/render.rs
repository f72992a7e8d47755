//! Pure frame builders for the wizard and the preview step.

use crate::cli::confirm::Choice;
use crate::cli::forms::{Field, FieldInput, WizardSession};
use crate::cli::ui::style::UiStyle;
use crate::profile::ProfileDraft;

const WIZARD_TITLE: &str = "Otori · new honeypot profile";
const PREVIEW_TITLE: &str = "Review profile";
const ACTIVE_MARKER: &str = "➜ ";
const IDLE_MARKER: &str = "  ";

pub fn render_wizard(session: &WizardSession) -> String {
    render_wizard_with(session, &UiStyle::current())
}

pub fn render_wizard_with(session: &WizardSession, style: &UiStyle) -> String {
    let mut lines = vec![
        style.title(WIZARD_TITLE),
        style.muted(&format!(
            "Step {}/{}",
            (session.current_index() + 1).min(session.fields().len()),
            session.fields().len()
        )),
        String::new(),
    ];

    for (index, field) in session.fields().iter().enumerate() {
        if index == session.current_index() {
            render_active_field(field, style, &mut lines);
        } else {
            lines.push(format!("{IDLE_MARKER}{}", summary_line(field, style)));
        }
    }

    lines.push(String::new());
    if let Some(error) = session.last_error() {
        lines.push(style.error(&format!("✗ {error}")));
    }
    if let Some(field) = session.current_field() {
        lines.push(style.muted(key_hint(field)));
    }
    lines.join("\n")
}

pub fn render_preview(draft: &ProfileDraft, selection: Choice) -> String {
    render_preview_with(draft, selection, &UiStyle::current())
}

pub fn render_preview_with(draft: &ProfileDraft, selection: Choice, style: &UiStyle) -> String {
    let mut lines = vec![style.title(PREVIEW_TITLE), String::new()];
    for (label, value) in preview_rows(draft) {
        lines.push(format!("  {:<14}{}", format!("{label}:"), value));
    }
    lines.push(String::new());

    let accept = button("Accept", selection == Choice::Accept);
    let decline = button("Decline", selection == Choice::Decline);
    lines.push(format!(
        "  {}   {}",
        style.button(&accept, selection == Choice::Accept),
        style.button(&decline, selection == Choice::Decline)
    ));
    lines.push(String::new());
    lines.push(style.muted("←/→ choose · Enter confirm · Esc cancel"));
    lines.join("\n")
}

/// Label/value pairs shown for a draft, shared with `show`.
pub fn preview_rows(draft: &ProfileDraft) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Type", or_dash(&draft.profile_type)),
        ("Server name", or_dash(&draft.server_name)),
        ("Profile name", or_dash(&draft.profile_name)),
        ("Company", or_dash(&draft.company)),
        ("Users", format_users(&draft.users)),
    ];
    if !draft.created_at.is_empty() {
        rows.push(("Created", draft.created_at.clone()));
    }
    rows
}

pub fn format_users(users: &[String]) -> String {
    if users.is_empty() {
        "(none)".to_string()
    } else {
        users.join(", ")
    }
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn button(label: &str, focused: bool) -> String {
    if focused {
        format!("[ {label} ]")
    } else {
        format!("  {label}  ")
    }
}

fn field_label(field: &Field, style: &UiStyle) -> String {
    if field.required {
        format!("{} {}", field.label, style.required("*"))
    } else {
        field.label.to_string()
    }
}

fn summary_line(field: &Field, style: &UiStyle) -> String {
    let value = match &field.input {
        FieldInput::List { entries, .. } if entries.is_empty() => style.muted("(none)"),
        FieldInput::List { entries, .. } => entries.join(", "),
        _ if field.value().is_empty() => style.muted(field.placeholder),
        _ => field.value().to_string(),
    };
    format!("{}: {}", field_label(field, style), value)
}

fn render_active_field(field: &Field, style: &UiStyle, lines: &mut Vec<String>) {
    lines.push(format!(
        "{}{}",
        style.active(ACTIVE_MARKER),
        style.active(&field_label(field, style))
    ));
    match &field.input {
        FieldInput::Select {
            options, selected, ..
        } => {
            for (index, option) in options.iter().enumerate() {
                if index == *selected {
                    lines.push(format!("    {}", style.selected(&format!("● {option}"))));
                } else {
                    lines.push(format!("    ○ {option}"));
                }
            }
        }
        FieldInput::Text { value } => lines.push(input_line(value, field.placeholder, style)),
        FieldInput::List { pending, entries } => {
            for entry in entries {
                lines.push(format!("    {}", style.selected(&format!("✓ {entry}"))));
            }
            lines.push(input_line(pending, field.placeholder, style));
        }
    }
}

fn input_line(value: &str, placeholder: &str, style: &UiStyle) -> String {
    if value.is_empty() {
        format!("    > {}", style.muted(placeholder))
    } else {
        format!("    > {value}")
    }
}

fn key_hint(field: &Field) -> &'static str {
    match field.input {
        FieldInput::Select { .. } => "↑/↓ choose · Enter next · Esc cancel",
        FieldInput::Text { .. } => "Enter next · ↑/↓ move between fields · Esc cancel",
        FieldInput::List { .. } => "Enter add entry · Backspace drop last · Ctrl+D finish list · Esc cancel",
    }
}
