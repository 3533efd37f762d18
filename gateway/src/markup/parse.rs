use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::Directive;

static DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*<\?xml[^?]*\?>"#).expect("valid declaration regex"));
static SAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<Say>([^<]*)</Say>").expect("valid Say regex"));
static EMPTY_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^<(Play|Gather|Record)((?:\s+[A-Za-z]+="[^"]*")*)\s*/>"#)
        .expect("valid element regex")
});
static ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([A-Za-z]+)="([^"]*)""#).expect("valid attribute regex"));

/// Errors raised when a document does not follow the gateway grammar
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    #[error("Document has no <Response> root element")]
    MissingRoot,

    #[error("Unexpected content at offset {offset}: {snippet}")]
    UnexpectedContent { offset: usize, snippet: String },

    #[error("<{tag}> is missing attribute '{attribute}'")]
    MissingAttribute {
        tag: &'static str,
        attribute: &'static str,
    },

    #[error("Attribute '{attribute}' has invalid value '{value}'")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn attributes(raw: &str) -> HashMap<&str, String> {
    ATTRIBUTE
        .captures_iter(raw)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let value = caps.get(2)?.as_str();
            Some((name, unescape_xml(value)))
        })
        .collect()
}

fn required(
    attrs: &HashMap<&str, String>,
    tag: &'static str,
    attribute: &'static str,
) -> Result<String, MarkupError> {
    attrs
        .get(attribute)
        .cloned()
        .ok_or(MarkupError::MissingAttribute { tag, attribute })
}

fn required_u32(
    attrs: &HashMap<&str, String>,
    tag: &'static str,
    attribute: &'static str,
) -> Result<u32, MarkupError> {
    let value = required(attrs, tag, attribute)?;
    value
        .parse()
        .map_err(|_| MarkupError::InvalidAttribute { attribute, value })
}

fn element(tag: &str, raw_attrs: &str) -> Result<Directive, MarkupError> {
    let attrs = attributes(raw_attrs);
    match tag {
        "Play" => Ok(Directive::Play {
            url: required(&attrs, "Play", "url")?,
        }),
        "Gather" => Ok(Directive::Gather {
            num_digits: required_u32(&attrs, "Gather", "numDigits")?,
            action: required(&attrs, "Gather", "action")?,
            method: required(&attrs, "Gather", "method")?,
        }),
        _ => {
            let play_beep = match attrs.get("playBeep").map(String::as_str) {
                None | Some("true") => true,
                Some("false") => false,
                Some(other) => {
                    return Err(MarkupError::InvalidAttribute {
                        attribute: "playBeep",
                        value: other.to_string(),
                    });
                }
            };
            Ok(Directive::Record {
                max_length: required_u32(&attrs, "Record", "maxLength")?,
                finish_on_key: required(&attrs, "Record", "finishOnKey")?,
                play_beep,
            })
        }
    }
}

/// Parse a markup document back into its ordered directive list.
///
/// Accepts exactly the grammar [`render`](super::render) produces, with
/// optional whitespace between elements.
pub fn parse(document: &str) -> Result<Vec<Directive>, MarkupError> {
    let body = match DECLARATION.find(document) {
        Some(m) => &document[m.end()..],
        None => document,
    };
    let body = body.trim();

    let inner = body
        .strip_prefix("<Response>")
        .and_then(|rest| rest.strip_suffix("</Response>"))
        .ok_or(MarkupError::MissingRoot)?;

    let mut directives = Vec::new();
    let mut offset = 0;

    while offset < inner.len() {
        let rest = &inner[offset..];
        let trimmed = rest.trim_start();
        offset += rest.len() - trimmed.len();
        if trimmed.is_empty() {
            break;
        }

        if let Some(caps) = SAY.captures(trimmed) {
            directives.push(Directive::Say {
                text: unescape_xml(&caps[1]),
            });
            offset += caps[0].len();
        } else if let Some(caps) = EMPTY_ELEMENT.captures(trimmed) {
            directives.push(element(&caps[1], &caps[2])?);
            offset += caps[0].len();
        } else {
            return Err(MarkupError::UnexpectedContent {
                offset,
                snippet: trimmed.chars().take(32).collect(),
            });
        }
    }

    Ok(directives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::render;

    #[test]
    fn test_parse_rendered_document_round_trip() {
        let directives = vec![
            Directive::say("Welcome to the <emergency> line & more"),
            Directive::gather(1, "/handle_menu"),
            Directive::play("https://x.org/static/a.mp3?x=1&y=2"),
            Directive::record(30, "#"),
        ];
        let parsed = parse(&render(&directives)).unwrap();
        assert_eq!(parsed, directives);
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_single_quoted_declaration() {
        let doc = "<?xml version='1.0' encoding='UTF-8'?>\n<Response>\n  <Say>Hi</Say>\n  <Record maxLength=\"30\" finishOnKey=\"#\" playBeep=\"true\" />\n</Response>\n";
        let parsed = parse(doc).unwrap();
        assert_eq!(
            parsed,
            vec![Directive::say("Hi"), Directive::record(30, "#")]
        );
    }

    #[test]
    fn test_parse_missing_root() {
        assert_eq!(parse("<Say>Hi</Say>"), Err(MarkupError::MissingRoot));
    }

    #[test]
    fn test_parse_unknown_element() {
        let err = parse("<Response><Dial>123</Dial></Response>").unwrap_err();
        assert!(matches!(err, MarkupError::UnexpectedContent { offset: 0, .. }));
    }

    #[test]
    fn test_parse_missing_attribute() {
        let err = parse(r#"<Response><Gather numDigits="1" method="POST"/></Response>"#)
            .unwrap_err();
        assert_eq!(
            err,
            MarkupError::MissingAttribute {
                tag: "Gather",
                attribute: "action"
            }
        );
    }

    #[test]
    fn test_parse_invalid_number() {
        let err = parse(r##"<Response><Record maxLength="ten" finishOnKey="#"/></Response>"##)
            .unwrap_err();
        assert_eq!(
            err,
            MarkupError::InvalidAttribute {
                attribute: "maxLength",
                value: "ten".to_string()
            }
        );
    }

    #[test]
    fn test_unescape_order() {
        // "&amp;lt;" is a literal "&lt;", not "<"
        assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
    }
}
