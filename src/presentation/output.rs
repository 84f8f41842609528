//! Output Rendering
//!
//! Text and JSON rendering for listings, configuration warnings and errors.
//! Publish progress is rendered by the event sinks.

use crate::application::ListedFunction;
use crate::config::ConfigWarning;
use crate::infrastructure::IconSet;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Aligned `name  url` table; unpublished functions are marked as such
pub fn render_listing(listed: &[ListedFunction]) -> String {
    if listed.is_empty() {
        return "No functions found.\n".to_string();
    }

    let width = listed.iter().map(|f| f.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for function in listed {
        let url = function.url.as_deref().unwrap_or("(not published)");
        out.push_str(&format!("{:<width$}  {}\n", function.name, url, width = width));
    }
    out
}

pub fn listing_json(source: &str, listed: &[ListedFunction]) -> serde_json::Value {
    serde_json::json!({
        "event": "list",
        "command": "list",
        "source": source,
        "functions": listed
            .iter()
            .map(|f| serde_json::json!({ "name": f.name, "url": f.url }))
            .collect::<Vec<_>>(),
    })
}

pub fn render_config_warning(warning: &ConfigWarning, icons: IconSet) -> String {
    format!("{} {}", icons.warning, warning)
}

/// Error as printed before exiting; `{:#}` keeps the anyhow context chain
pub fn render_error(err: &anyhow::Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
        })
        .to_string(),
        OutputFormat::Text => format!("Error: {:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn listing_aligns_names() {
        let listed = vec![
            ListedFunction {
                name: "orders".to_string(),
                url: Some("https://abc.execute-api.eu-west-1.amazonaws.com/default/orders".to_string()),
            },
            ListedFunction {
                name: "ping".to_string(),
                url: None,
            },
        ];

        insta::assert_snapshot!(render_listing(&listed), @r"
        orders  https://abc.execute-api.eu-west-1.amazonaws.com/default/orders
        ping    (not published)
        ");
    }

    #[test]
    fn empty_listing() {
        assert_eq!(render_listing(&[]), "No functions found.\n");
    }

    #[test]
    fn listing_json_shape() {
        let listed = vec![ListedFunction {
            name: "ping".to_string(),
            url: None,
        }];
        let json = listing_json("remote", &listed);
        assert_eq!(json["source"], "remote");
        assert_eq!(json["functions"][0]["name"], "ping");
        assert!(json["functions"][0]["url"].is_null());
    }

    #[test]
    fn config_warning_line() {
        let warning = ConfigWarning {
            key: "regoin".to_string(),
            file: PathBuf::from("gantry.toml"),
            line: Some(1),
            suggestion: Some("region".to_string()),
        };
        assert_eq!(
            render_config_warning(&warning, IconSet::ASCII),
            "[WARN] unknown key 'regoin' in gantry.toml:1 (did you mean 'region'?)"
        );
    }

    #[test]
    fn json_error_is_single_line() {
        let err = anyhow::anyhow!("boom").context("loading project");
        let rendered = render_error(&err, OutputFormat::Json);
        assert!(!rendered.contains('\n'));
        assert!(rendered.contains("loading project: boom"));
    }
}
