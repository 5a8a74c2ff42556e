//! Output rendering: json, table, raw.

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => render_array_table(&items),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render(&headers, &rows))
        }
        scalar => Ok(table::render(&["value"], &[vec![value_to_cell(&scalar)]])),
    }
}

fn render_array_table(items: &[Value]) -> anyhow::Result<String> {
    if items.is_empty() {
        return Ok(String::from("(no rows)"));
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return Ok(table::render(&["value"], &rows));
    }

    let mut headers = Vec::<String>::new();
    for item in items {
        if let Some(map) = item.as_object() {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|key| {
                    item.get(key)
                        .map_or_else(|| "-".to_string(), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    Ok(table::render(&header_refs, &rows))
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_cell)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_format_is_pretty() {
        let rendered = render(&json!({"a": 1}), OutputFormat::Json).unwrap();
        assert!(rendered.contains("\n"));
        assert!(rendered.contains("\"a\": 1"));
    }

    #[test]
    fn raw_format_is_compact() {
        let rendered = render(&json!({"a": 1, "b": "x"}), OutputFormat::Raw).unwrap();
        assert_eq!(rendered, "{\"a\":1,\"b\":\"x\"}");
    }

    #[test]
    fn table_format_renders_object_rows() {
        let rendered = render(
            &json!([{"name": "one", "n": 1}, {"name": "two", "n": 2}]),
            OutputFormat::Table,
        )
        .unwrap();
        assert!(rendered.contains("name"));
        assert!(rendered.contains("two"));
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let rendered = render(&json!([]), OutputFormat::Table).unwrap();
        assert_eq!(rendered, "(no rows)");
    }

    #[test]
    fn null_cells_render_as_dash() {
        assert_eq!(value_to_cell(&Value::Null), "-");
        assert_eq!(value_to_cell(&json!(["a", "b"])), "a, b");
    }
}
