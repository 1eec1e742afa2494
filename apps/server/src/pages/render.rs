//! HTML rendering helpers.
//!
//! The pages here are plain markup assembled in code; there is no template
//! engine. Everything user-controlled passes through [`escape`].

use axum::response::Html;

use crate::forms::FieldErrors;

/// Escapes a value for interpolation into HTML text or attributes.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps a body in the shared document shell.
pub fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Staffbook</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    ))
}

/// Renders a field's error messages as a list, or nothing.
pub fn error_list(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|message| format!("<li>{}</li>", escape(message)))
        .collect();
    format!("<ul class=\"errorlist\">{items}</ul>\n")
}

/// Renders one labeled input with any errors it collected.
///
/// Password inputs never echo their submitted value back.
pub fn field_row(
    label: &str,
    name: &str,
    input_type: &str,
    value: &str,
    errors: &FieldErrors,
) -> String {
    let value = if input_type == "password" { "" } else { value };
    format!(
        "{errors}<p><label for=\"id_{name}\">{label}</label>\n\
         <input type=\"{input_type}\" name=\"{name}\" id=\"id_{name}\" value=\"{value}\"></p>\n",
        errors = error_list(errors.get(name)),
        label = escape(label),
        value = escape(value),
    )
}
