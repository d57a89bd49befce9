use std::io::{self, Write};
use std::sync::Arc;

use directus_client::models::Item;
use directus_client::{Configuration, DirectusClient};

use crate::colors::ColorHelper;
use crate::config::InspectorConfig;
use crate::error::{InspectorError, Result};

/// Outcome of one inspection
#[derive(Debug, Clone, PartialEq)]
pub enum Inspection {
    /// The collection returned at least one item; only the first is kept
    Found(Item),
    /// `data` was missing or an empty array
    Empty,
    Failed(InspectorError),
}

impl Inspection {
    pub fn is_failure(&self) -> bool {
        matches!(self, Inspection::Failed(_))
    }
}

/// Fetches the first record of a collection to show what its fields look like
#[derive(Debug)]
pub struct StructureInspector {
    client: DirectusClient,
    collection: String,
}

impl StructureInspector {
    /// Build the HTTP client and Directus client described by `config`
    ///
    /// The bearer token is always attached, empty or not.
    pub fn new(config: &InspectorConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let configuration = Configuration {
            base_path: config.base_url.clone(),
            user_agent: Some(config.user_agent.clone()),
            client: http_client,
            bearer_access_token: Some(config.credential.token().to_string()),
        };

        Ok(Self::with_client(
            DirectusClient::new(Arc::new(configuration)),
            config.collection.clone(),
        ))
    }

    pub fn with_client<S: Into<String>>(client: DirectusClient, collection: S) -> Self {
        Self {
            client,
            collection: collection.into(),
        }
    }

    /// First item of the collection, requested with `limit=1`
    pub async fn fetch_first(&self) -> Result<Option<Item>> {
        let item = self.client.first_item(&self.collection).await?;
        Ok(item)
    }

    /// Run the request and classify the result; never returns an error
    pub async fn inspect(&self) -> Inspection {
        match self.fetch_first().await {
            Ok(Some(item)) => {
                tracing::debug!(fields = item.len(), collection = %self.collection, "item found");
                Inspection::Found(item)
            }
            Ok(None) => {
                tracing::debug!(collection = %self.collection, "collection is empty");
                Inspection::Empty
            }
            Err(err) => {
                tracing::debug!(collection = %self.collection, error = %err, "inspection failed");
                Inspection::Failed(err)
            }
        }
    }
}

/// Pretty-print an item with two-space indentation
pub fn render_item(item: &Item) -> Result<String> {
    Ok(serde_json::to_string_pretty(item)?)
}

/// Field names of an item in the order the server sent them
pub fn item_keys(item: &Item) -> Vec<&str> {
    item.keys().map(String::as_str).collect()
}

/// Write the console report for an inspection
///
/// ```text
/// criminal_db item keys: ["id", "name"]
/// Sample item:
/// {
///   "id": 1,
///   "name": "x"
/// }
/// ```
pub fn write_report<W: Write>(
    out: &mut W,
    collection: &str,
    inspection: &Inspection,
    colors: &ColorHelper,
) -> io::Result<()> {
    match inspection {
        Inspection::Found(item) => match render_item(item) {
            Ok(sample) => {
                let heading = format!("{} item keys:", collection);
                writeln!(out, "{} {:?}", colors.heading(&heading), item_keys(item))?;
                writeln!(out, "{}", colors.bold("Sample item:"))?;
                writeln!(out, "{}", sample)
            }
            Err(err) => write_error(out, &err, colors),
        },
        Inspection::Empty => {
            let message = format!("{} is empty or no data found.", collection);
            writeln!(out, "{}", colors.warning(&message))
        }
        Inspection::Failed(err) => write_error(out, err, colors),
    }
}

fn write_error<W: Write>(out: &mut W, err: &InspectorError, colors: &ColorHelper) -> io::Result<()> {
    writeln!(out, "{} {}", colors.error_label("Error:"), err)
}

/// Inspect the configured collection once and print the report to `out`
///
/// Every request, status and decoding failure ends up as an `Error:` line.
/// Only failures to write to `out` are returned as errors.
pub async fn run<W: Write>(
    config: &InspectorConfig,
    out: &mut W,
    colors: &ColorHelper,
) -> io::Result<Inspection> {
    tracing::debug!(endpoint = %config.endpoint(), "inspecting collection");

    let inspection = match StructureInspector::new(config) {
        Ok(inspector) => inspector.inspect().await,
        Err(err) => Inspection::Failed(err),
    };

    write_report(out, &config.collection, &inspection, colors)?;
    out.flush()?;
    Ok(inspection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> Item {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    fn report(collection: &str, inspection: &Inspection) -> String {
        let mut out = Vec::new();
        write_report(&mut out, collection, inspection, &ColorHelper::plain()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_found_report_lists_keys_then_sample() {
        let inspection = Inspection::Found(item(json!({"id": 1, "name": "x"})));
        assert_eq!(
            report("criminal_db", &inspection),
            "criminal_db item keys: [\"id\", \"name\"]\nSample item:\n{\n  \"id\": 1,\n  \"name\": \"x\"\n}\n"
        );
    }

    #[test]
    fn test_nested_values_are_indented_by_two_spaces() {
        let rendered = render_item(&item(json!({"tags": ["a"], "meta": {"k": null}}))).unwrap();
        assert_eq!(
            rendered,
            "{\n  \"tags\": [\n    \"a\"\n  ],\n  \"meta\": {\n    \"k\": null\n  }\n}"
        );
    }

    #[test]
    fn test_non_ascii_text_is_printed_unescaped() {
        let rendered = render_item(&item(json!({"name": "é"}))).unwrap();
        assert_eq!(rendered, "{\n  \"name\": \"é\"\n}");
    }

    #[test]
    fn test_keys_follow_server_order() {
        let record = item(json!({"z": 0, "a": 1, "m": 2}));
        assert_eq!(item_keys(&record), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(
            report("criminal_db", &Inspection::Empty),
            "criminal_db is empty or no data found.\n"
        );
    }

    #[test]
    fn test_failure_report() {
        let inspection = Inspection::Failed(InspectorError::inspection_failed("boom"));
        assert!(inspection.is_failure());
        assert_eq!(report("criminal_db", &inspection), "Error: boom\n");
    }
}
