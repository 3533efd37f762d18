use std::fmt::Write;

use super::Directive;

/// Declaration that precedes every rendered document
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Escape a text node. Quotes are legal in element content and stay as
/// written, so spoken prompts like "couldn't" render verbatim.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape an attribute value, quotes included
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Serialize directives into a complete markup document.
///
/// Output is a pure function of the input: rendering the same slice twice
/// yields byte-identical documents.
pub fn render(directives: &[Directive]) -> String {
    let mut out = String::with_capacity(128 + directives.len() * 64);
    out.push_str(XML_DECLARATION);
    out.push_str("<Response>");

    for directive in directives {
        // Writing into a String cannot fail
        let _ = match directive {
            Directive::Say { text } => write!(out, "<Say>{}</Say>", escape_text(text)),
            Directive::Play { url } => write!(out, r#"<Play url="{}"/>"#, escape_xml(url)),
            Directive::Gather {
                num_digits,
                action,
                method,
            } => write!(
                out,
                r#"<Gather numDigits="{}" action="{}" method="{}"/>"#,
                num_digits,
                escape_xml(action),
                escape_xml(method)
            ),
            Directive::Record {
                max_length,
                finish_on_key,
                play_beep,
            } => write!(
                out,
                r#"<Record maxLength="{}" finishOnKey="{}" playBeep="{}"/>"#,
                max_length,
                escape_xml(finish_on_key),
                play_beep
            ),
        };
    }

    out.push_str("</Response>");
    out
}
