//! Result printing: summary lines, JSON, YAML and tables, with JMESPath filtering

use crate::cli::OutputFormat;
use crate::error::{Result as CliResult, SnipCtlError};
use comfy_table::Table;
use jpx_core::Runtime;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use snipctl_core::Report;
use snipctl_core::report::Field;
use std::sync::OnceLock;

/// Global JMESPath runtime with extended functions
static JMESPATH_RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn get_jmespath_runtime() -> &'static Runtime {
    JMESPATH_RUNTIME.get_or_init(|| Runtime::builder().with_all_extensions().build())
}

/// Quote bare backtick literals so `` `foo` `` compiles as `` `"foo"` ``.
///
/// Literals that are already valid JSON (numbers, booleans, null, quoted
/// strings, arrays, objects) are left alone.
fn normalize_backtick_literals(query: &str) -> String {
    static BACKTICK_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(re) = BACKTICK_RE
        .get_or_init(|| Regex::new(r"`([^`\\]*(?:\\.[^`\\]*)*)`").ok())
        .as_ref()
    else {
        return query.to_string();
    };

    re.replace_all(query, |caps: &regex::Captures| {
        let content = &caps[1];
        let trimmed = content.trim();

        if serde_json::from_str::<Value>(trimmed).is_ok() {
            format!("`{}`", content)
        } else {
            let escaped = trimmed.replace('\\', "\\\\").replace('"', "\\\"");
            format!("`\"{}\"`", escaped)
        }
    })
    .into_owned()
}

fn apply_query(value: Value, query: Option<&str>) -> CliResult<Value> {
    let Some(query) = query else {
        return Ok(value);
    };
    let expr = get_jmespath_runtime()
        .compile(&normalize_backtick_literals(query))
        .map_err(|e| SnipCtlError::InvalidInput {
            message: format!("Invalid JMESPath expression '{}': {}", query, e),
        })?;
    expr.search(&value).map_err(|e| SnipCtlError::OutputError {
        message: format!("JMESPath query failed: {}", e),
    })
}

/// Print any serializable value; `Auto` falls back to JSON
pub fn print_output<T: Serialize>(
    data: T,
    format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let json_value = apply_query(serde_json::to_value(data)?, query)?;

    match format {
        OutputFormat::Json | OutputFormat::Auto => {
            println!("{}", serde_json::to_string_pretty(&json_value)?);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&json_value).map_err(|e| SnipCtlError::OutputError {
                message: format!("YAML error: {}", e),
            })?;
            println!("{}", yaml);
        }
        OutputFormat::Table => print_as_table(&json_value),
    }

    Ok(())
}

/// Print a recipe result
///
/// Without a query, `Auto` prints the result's report lines and `Table`
/// prints them as a two-column table. Everything else goes through the
/// serialized value.
pub fn print_result<T: Serialize + Report>(
    result: &T,
    format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    match (format, query) {
        (OutputFormat::Auto, None) => {
            for line in result.report_lines() {
                println!("{}", line);
            }
            Ok(())
        }
        (OutputFormat::Table, None) => {
            println!("{}", report_table(&result.report()));
            Ok(())
        }
        _ => print_output(result, format, query),
    }
}

/// Like [`print_result`], but auto output opens with `headline` and skips
/// report fields whose value the headline already shows
pub fn print_result_headed<T: Serialize + Report>(
    result: &T,
    headline: &str,
    format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    if format == OutputFormat::Auto && query.is_none() {
        for line in headed_lines(headline, result.report()) {
            println!("{}", line);
        }
        return Ok(());
    }
    print_result(result, format, query)
}

fn headed_lines(headline: &str, fields: Vec<Field>) -> Vec<String> {
    std::iter::once(headline.to_string())
        .chain(
            fields
                .into_iter()
                .filter(|(_, value)| !headline.contains(value.as_str()))
                .map(|(label, value)| format!("{}: {}", label, value)),
        )
        .collect()
}

fn report_table(fields: &[Field]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    for (label, value) in fields {
        table.add_row(vec![label.to_string(), value.clone()]);
    }
    table
}

fn print_as_table(value: &Value) {
    match value {
        Value::Array(arr) if !arr.is_empty() => {
            let mut table = Table::new();

            if let Value::Object(first) = &arr[0] {
                let headers: Vec<String> = first.keys().cloned().collect();
                table.set_header(&headers);

                for item in arr {
                    if let Value::Object(obj) = item {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| format_value(obj.get(h).unwrap_or(&Value::Null)))
                            .collect();
                        table.add_row(row);
                    }
                }
            } else {
                table.set_header(vec!["Value"]);
                for item in arr {
                    table.add_row(vec![format_value(item)]);
                }
            }

            println!("{}", table);
        }
        Value::Object(obj) => {
            let mut table = Table::new();
            table.set_header(vec!["Key", "Value"]);

            for (key, val) in obj {
                table.add_row(vec![key.clone(), format_value(val)]);
            }

            println!("{}", table);
        }
        _ => {
            println!("{}", format_value(value));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
