// Dashboard service - Use case for building one chart per tick

use crate::application::query_repository::{QueryError, QueryRepository};
use crate::domain::chart::{render, Chart, RenderError};
use crate::domain::visualization::Visualization;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TickError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn QueryRepository>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn QueryRepository>) -> Self {
        Self { repository }
    }

    /// Resolve the catalog entry for the selection, fetch its result
    /// (cache-aware, the wrapper decides), and render one chart under the
    /// given display key.
    pub async fn build_chart(
        &self,
        selection: Visualization,
        display_key: &str,
    ) -> Result<Chart, TickError> {
        let query = selection.query();
        let spec = selection.chart_spec();

        tracing::debug!("Fetching data for {}", selection.name());
        let table = self.repository.fetch_table(query).await?;
        tracing::debug!(
            "Got {} rows for {}, rendering {:?}",
            table.row_count(),
            selection.name(),
            spec.kind
        );

        Ok(render(&table, &spec, display_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::ChartKind;
    use crate::domain::table::Table;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedRepository {
        table: Table,
    }

    #[async_trait]
    impl QueryRepository for FixedRepository {
        async fn fetch_table(&self, _sql: &str) -> Result<Table, QueryError> {
            Ok(self.table.clone())
        }
    }

    struct FailingRepository;

    #[async_trait]
    impl QueryRepository for FailingRepository {
        async fn fetch_table(&self, _sql: &str) -> Result<Table, QueryError> {
            Err(QueryError::Connection("broker unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_build_chart_binds_catalog_spec() {
        let service = DashboardService::new(Arc::new(FixedRepository {
            table: Table::new(
                vec!["category".to_string(), "total_inventory".to_string()],
                vec!["STRING".to_string(), "LONG".to_string()],
                vec![vec![json!("shoes"), json!(12)]],
            ),
        }));

        let chart = service
            .build_chart(Visualization::InventoryByCategory, "plot7")
            .await
            .unwrap();

        assert_eq!(chart.key, "plot7");
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.title, "Inventory by Category");
        assert_eq!(chart.traces.len(), 1);
    }

    #[tokio::test]
    async fn test_build_chart_propagates_fetch_failure() {
        let service = DashboardService::new(Arc::new(FailingRepository));

        let err = service
            .build_chart(Visualization::PriceByBrand, "plot0")
            .await
            .unwrap_err();

        assert!(matches!(err, TickError::Query(QueryError::Connection(_))));
    }

    #[tokio::test]
    async fn test_build_chart_surfaces_schema_mismatch() {
        // A result whose columns do not match the catalog binding is a
        // configuration error, not a crash.
        let service = DashboardService::new(Arc::new(FixedRepository {
            table: Table::new(
                vec!["wrong".to_string()],
                vec!["STRING".to_string()],
                vec![vec![json!("x")]],
            ),
        }));

        let err = service
            .build_chart(Visualization::InventoryByCategory, "plot0")
            .await
            .unwrap_err();

        assert!(matches!(err, TickError::Render(_)));
    }
}
