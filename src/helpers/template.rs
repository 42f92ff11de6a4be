use anyhow::{anyhow, Result};
use std::collections::HashMap;
use regex::Regex;

/// Render a page template
/// template: "<script src=\"...?client-id={{clientId}}\">"
/// ctx: { "clientId" => "value" }
/// Values are HTML-escaped; a placeholder without a value is an error.
pub fn render_template(template: &str, ctx: &HashMap<&str, String>) -> Result<String> {
    let re = Regex::new(r"\{\{\s*([a-zA-Z0-9_]+)\s*\}\}")?;

    let mut missing = Vec::new();
    let result = re.replace_all(template, |caps: &regex::Captures| {
        let key = &caps[1];
        match ctx.get(key) {
            Some(val) => escape_html(val),
            None => {
                missing.push(key.to_string());
                String::new()
            }
        }
    });

    if !missing.is_empty() {
        return Err(anyhow!("template contains unresolved placeholders: {}", missing.join(", ")));
    }

    Ok(result.into_owned())
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template_basic() {
        let mut ctx = HashMap::new();
        ctx.insert("clientId", "abc123".to_string());

        let rendered = render_template("id={{clientId}} / {{ clientId }}", &ctx).unwrap();
        assert_eq!(rendered, "id=abc123 / abc123");
    }

    #[test]
    fn test_render_template_escapes_values() {
        let mut ctx = HashMap::new();
        ctx.insert("clientToken", "\"><script>".to_string());

        let rendered = render_template("data-client-token=\"{{clientToken}}\"", &ctx).unwrap();
        assert_eq!(rendered, "data-client-token=\"&quot;&gt;&lt;script&gt;\"");
    }

    #[test]
    fn test_render_template_missing_field() {
        let ctx = HashMap::new();
        let result = render_template("{{merchantId}}", &ctx);
        assert!(result.is_err());
    }
}
