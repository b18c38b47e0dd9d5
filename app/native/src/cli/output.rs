//! CLI output formatting.

use colored::Colorize;

/// Prints `value` as pretty JSON with syntax highlighting.
pub fn print_highlighted_json(value: &serde_json::Value) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    println!("{}", highlight_json(&json));
}

/// Colors a pretty-printed JSON document.
///
/// Keys are cyan, strings green, numbers yellow, booleans and null magenta.
#[must_use]
pub fn highlight_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    let mut chars = json.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                let mut literal = String::from('"');
                let mut escaped = false;
                for next in chars.by_ref() {
                    literal.push(next);
                    match next {
                        _ if escaped => escaped = false,
                        '\\' => escaped = true,
                        '"' => break,
                        _ => {}
                    }
                }

                let rest: String = chars.clone().skip_while(|c| c.is_whitespace()).take(1).collect();
                if rest == ":" {
                    out.push_str(&literal.cyan().to_string());
                } else {
                    out.push_str(&literal.green().to_string());
                }
            }
            '{' | '}' | '[' | ']' => out.push_str(&ch.to_string().white().bold().to_string()),
            ':' | ',' => out.push_str(&ch.to_string().white().to_string()),
            _ if ch.is_whitespace() => out.push(ch),
            _ => {
                let mut scalar = String::from(ch);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || matches!(next, ',' | '}' | ']') {
                        break;
                    }
                    scalar.push(next);
                    chars.next();
                }

                let colored = match scalar.as_str() {
                    "true" | "false" | "null" => scalar.magenta(),
                    _ => scalar.yellow(),
                };
                out.push_str(&colored.to_string());
            }
        }
    }

    out
}

/// Truncates to `max_chars` characters, ending with an ellipsis when shortened.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }

    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Formats a boolean as a colored check mark or an empty cell.
#[must_use]
pub fn format_marker(value: bool) -> String {
    if value { "●".green().bold().to_string() } else { String::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(json: &str) -> String {
        colored::control::set_override(false);
        highlight_json(json)
    }

    #[test]
    fn test_highlight_without_color_is_identity() {
        let value = serde_json::json!({
            "prayer": "dhuhr",
            "label": "midday \"period\"",
            "active": true,
            "offset": -60,
            "window": null,
            "periods": [1, 2.5]
        });
        let json = serde_json::to_string_pretty(&value).unwrap();
        assert_eq!(plain(&json), json);
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("night period", 20), "night period");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("afternoon period", 8), "afterno…");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("الفجر والشروق", 6), "الفجر…");
    }

    #[test]
    fn test_format_marker() {
        assert!(format_marker(true).contains('●'));
        assert!(format_marker(false).is_empty());
    }
}
