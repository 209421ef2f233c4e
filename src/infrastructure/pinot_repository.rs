// Pinot broker repository implementation

use crate::application::query_repository::{QueryError, QueryRepository};
use crate::domain::table::Table;
use crate::infrastructure::config::PinotSettings;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Executes SQL against a Pinot broker's `/query/sql` endpoint. The reqwest
/// client pools connections; each fetch is one POST round-trip.
#[derive(Debug, Clone)]
pub struct PinotRepository {
    client: reqwest::Client,
    query_url: String,
}

#[derive(Debug, Serialize)]
struct BrokerRequest<'a> {
    sql: &'a str,
}

#[derive(Debug, Deserialize)]
struct BrokerResponse {
    #[serde(rename = "resultTable")]
    result_table: Option<ResultTable>,
    #[serde(default)]
    exceptions: Vec<BrokerException>,
}

#[derive(Debug, Deserialize)]
struct ResultTable {
    #[serde(rename = "dataSchema")]
    data_schema: DataSchema,
    rows: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct DataSchema {
    #[serde(rename = "columnNames")]
    column_names: Vec<String>,
    #[serde(rename = "columnDataTypes")]
    column_data_types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BrokerException {
    #[serde(rename = "errorCode")]
    error_code: i64,
    message: Option<String>,
}

impl PinotRepository {
    pub fn new(settings: &PinotSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            query_url: settings.broker_url(),
        }
    }

    fn table_from_response(response: BrokerResponse) -> Result<Table, QueryError> {
        if let Some(exception) = response.exceptions.first() {
            return Err(QueryError::Engine(format!(
                "broker exception {}: {}",
                exception.error_code,
                exception.message.as_deref().unwrap_or("no message")
            )));
        }

        // The broker omits resultTable entirely for some degenerate queries.
        let Some(result_table) = response.result_table else {
            return Ok(Table::empty());
        };

        // Every row must match the declared schema arity before the table
        // reaches the renderer.
        let expected = result_table.data_schema.column_names.len();
        if let Some(row) = result_table.rows.iter().find(|r| r.len() != expected) {
            return Err(QueryError::Decode(format!(
                "row has {} cells but the schema declares {} columns",
                row.len(),
                expected
            )));
        }

        Ok(Table::new(
            result_table.data_schema.column_names,
            result_table.data_schema.column_data_types,
            result_table.rows,
        ))
    }
}

#[async_trait]
impl QueryRepository for PinotRepository {
    async fn fetch_table(&self, sql: &str) -> Result<Table, QueryError> {
        tracing::debug!("Executing broker query: {}", sql);

        let response = self
            .client
            .post(&self.query_url)
            .json(&BrokerRequest { sql })
            .send()
            .await
            .map_err(|e| QueryError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::Engine(format!(
                "broker returned status {}: {}",
                status, body
            )));
        }

        let data = response
            .json::<BrokerResponse>()
            .await
            .map_err(|e| QueryError::Decode(e.to_string()))?;

        Self::table_from_response(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_result_table() {
        let body = json!({
            "resultTable": {
                "dataSchema": {
                    "columnNames": ["category", "total_inventory"],
                    "columnDataTypes": ["STRING", "LONG"]
                },
                "rows": [["shoes", 120], ["shirts", 80]]
            },
            "exceptions": [],
            "numDocsScanned": 200
        });

        let response: BrokerResponse = serde_json::from_value(body).unwrap();
        let table = PinotRepository::table_from_response(response).unwrap();

        assert_eq!(table.columns, vec!["category", "total_inventory"]);
        assert_eq!(table.column_types, vec!["STRING", "LONG"]);
        assert_eq!(table.rows, vec![
            vec![json!("shoes"), json!(120)],
            vec![json!("shirts"), json!(80)],
        ]);
    }

    #[test]
    fn test_decode_zero_rows_keeps_schema() {
        let body = json!({
            "resultTable": {
                "dataSchema": {
                    "columnNames": ["pageid", "userid", "viewtime"],
                    "columnDataTypes": ["STRING", "STRING", "LONG"]
                },
                "rows": []
            }
        });

        let response: BrokerResponse = serde_json::from_value(body).unwrap();
        let table = PinotRepository::table_from_response(response).unwrap();

        assert_eq!(table.columns, vec!["pageid", "userid", "viewtime"]);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_ragged_rows_are_a_decode_error() {
        let body = json!({
            "resultTable": {
                "dataSchema": {
                    "columnNames": ["category", "total_inventory"],
                    "columnDataTypes": ["STRING", "LONG"]
                },
                "rows": [["shoes", 120], ["shirts"]]
            }
        });

        let response: BrokerResponse = serde_json::from_value(body).unwrap();
        let err = PinotRepository::table_from_response(response).unwrap_err();

        assert!(matches!(err, QueryError::Decode(_)));
    }

    #[test]
    fn test_broker_exception_becomes_engine_error() {
        let body = json!({
            "exceptions": [
                {"errorCode": 410, "message": "BrokerResourceMissingError"}
            ]
        });

        let response: BrokerResponse = serde_json::from_value(body).unwrap();
        let err = PinotRepository::table_from_response(response).unwrap_err();

        assert!(matches!(err, QueryError::Engine(_)));
        assert!(err.to_string().contains("410"));
    }

    #[test]
    fn test_missing_result_table_is_empty() {
        let response: BrokerResponse = serde_json::from_value(json!({})).unwrap();
        let table = PinotRepository::table_from_response(response).unwrap();

        assert!(table.columns.is_empty());
        assert_eq!(table.row_count(), 0);
    }
}
