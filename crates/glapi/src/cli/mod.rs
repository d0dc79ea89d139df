pub mod issues;
pub mod merge_requests;

use crate::prelude::{println, *};
use chrono::{DateTime, FixedOffset, NaiveDate};
use colored::Colorize;
use glapi::api::Gitlab;
use glapi::config::GitlabConfig;
use glapi::transport::HttpTransport;
use glapi_core::options::{OptionValue, Params};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

/// Build a client from the environment plus CLI overrides
pub fn connect(global: &crate::Global) -> Result<Gitlab<HttpTransport>> {
    let config = GitlabConfig::with_overrides(global.base_url.clone(), global.token.clone())?;

    if global.verbose {
        println!("Using GitLab API at {}", config.base_url);
    }

    Ok(Gitlab::from_config(&config)?)
}

/// Spinner shown while a request is in flight
pub fn spinner(msg: impl Into<String>) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .map_err(|e| eyre!("Invalid spinner template: {}", e))?,
    );
    spinner.set_message(msg.into());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(spinner)
}

/// Insert `value` under `key` when present
pub fn set_opt<V: Into<OptionValue>>(params: &mut Params, key: &str, value: Option<V>) {
    if let Some(value) = value {
        params.insert(key.to_string(), value.into());
    }
}

/// Parse `2018-01-01`, `2018-01-01T10:00:00` or a full RFC 3339 timestamp.
///
/// Dates and timestamps without an offset are taken as UTC.
pub fn parse_timestamp(input: &str) -> std::result::Result<DateTime<FixedOffset>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc().fixed_offset());
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().fixed_offset());
        }
    }
    Err(format!(
        "invalid timestamp '{}', expected YYYY-MM-DD or RFC 3339",
        input
    ))
}

/// Print a payload as pretty JSON, or a short confirmation when empty
pub fn print_value(value: &Value) -> Result<()> {
    if value.is_null() {
        println!("{}", "Done.".green());
        return Ok(());
    }
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Print an issue or merge request listing as a table
pub fn print_listing(value: &Value, noun: &str) -> Result<()> {
    let Some(items) = value.as_array() else {
        return print_value(value);
    };

    println!(
        "\nFound {} {}(s):\n",
        items.len().to_string().bold(),
        noun
    );

    if items.is_empty() {
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "IID".bold().cyan(),
        "Title".bold().cyan(),
        "State".bold().cyan(),
        "Author".bold().cyan(),
        "Updated".bold().cyan()
    ]);

    for item in items {
        let field = |key: &str| item.get(key).map(display_field).unwrap_or_default();
        let author = item
            .pointer("/author/username")
            .map(display_field)
            .unwrap_or_default();

        table.add_row(prettytable::row![
            field("iid").bright_yellow(),
            field("title").bright_white(),
            format_state(&field("state")),
            author.bright_magenta(),
            field("updated_at")
        ]);
    }

    table.printstd();
    Ok(())
}

fn display_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Format issue / merge request state with appropriate color
fn format_state(state: &str) -> String {
    match state {
        "opened" => state.bright_green().to_string(),
        "merged" => state.bright_magenta().to_string(),
        "closed" => state.bright_red().to_string(),
        "locked" => state.bright_yellow().to_string(),
        _ => state.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(
            parse_timestamp("2018-01-01").unwrap().to_rfc3339(),
            "2018-01-01T00:00:00+00:00"
        );
        assert_eq!(
            parse_timestamp("2018-01-01T10:30:00").unwrap().to_rfc3339(),
            "2018-01-01T10:30:00+00:00"
        );
        assert_eq!(
            parse_timestamp("2018-01-01T10:30:00+02:00")
                .unwrap()
                .to_rfc3339(),
            "2018-01-01T10:30:00+02:00"
        );
        assert!(parse_timestamp("last tuesday").is_err());
    }

    #[test]
    fn test_set_opt_skips_none() {
        let mut params = Params::new();
        set_opt(&mut params, "state", Some("opened"));
        set_opt::<String>(&mut params, "labels", None);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("state"), Some(&OptionValue::from("opened")));
    }

    #[test]
    fn test_display_field() {
        assert_eq!(display_field(&Value::from("x")), "x");
        assert_eq!(display_field(&Value::from(3)), "3");
        assert_eq!(display_field(&Value::Null), "");
    }
}
