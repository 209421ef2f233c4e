// Visualization selectors and the static query catalog

use super::chart::{AxisBinding, ChartKind, ChartSpec, ColorBinding, BLUES, PASTEL, PRISM, SET1};
use serde::{Deserialize, Serialize};

/// The five fixed chart views. The set is closed: the UI surface only ever
/// submits one of these names, so an out-of-range selector is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visualization {
    #[serde(rename = "Inventory by Category")]
    InventoryByCategory,
    #[serde(rename = "Price by Brand")]
    PriceByBrand,
    #[serde(rename = "Discount Distribution")]
    DiscountDistribution,
    #[serde(rename = "Production Cost by Material")]
    ProductionCostByMaterial,
    #[serde(rename = "Most Recent Page Views")]
    MostRecentPageViews,
}

impl Visualization {
    pub const ALL: [Visualization; 5] = [
        Visualization::InventoryByCategory,
        Visualization::PriceByBrand,
        Visualization::DiscountDistribution,
        Visualization::ProductionCostByMaterial,
        Visualization::MostRecentPageViews,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Visualization::InventoryByCategory => "Inventory by Category",
            Visualization::PriceByBrand => "Price by Brand",
            Visualization::DiscountDistribution => "Discount Distribution",
            Visualization::ProductionCostByMaterial => "Production Cost by Material",
            Visualization::MostRecentPageViews => "Most Recent Page Views",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// The literal SQL for this view. Static, parameterless, and used
    /// verbatim as the memoization key.
    pub fn query(&self) -> &'static str {
        match self {
            Visualization::InventoryByCategory => {
                "SELECT category, SUM(inventory_count) AS total_inventory\n\
                 FROM topic3new\n\
                 GROUP BY category\n\
                 ORDER BY total_inventory DESC;"
            }
            Visualization::PriceByBrand => {
                "SELECT brand, AVG(price) AS avg_price\n\
                 FROM topic3new\n\
                 GROUP BY brand\n\
                 ORDER BY avg_price DESC;"
            }
            Visualization::DiscountDistribution => {
                "SELECT discount, COUNT(*) AS discount_count\n\
                 FROM topic3new\n\
                 GROUP BY discount\n\
                 ORDER BY discount DESC;"
            }
            Visualization::ProductionCostByMaterial => {
                "SELECT material, AVG(production_cost) AS avg_cost\n\
                 FROM topic3new\n\
                 GROUP BY material\n\
                 ORDER BY avg_cost DESC;"
            }
            Visualization::MostRecentPageViews => {
                "SELECT pageid, userid, viewtime\n\
                 FROM topic1\n\
                 ORDER BY viewtime DESC\n\
                 LIMIT 10;"
            }
        }
    }

    /// The static visual mapping for this view.
    pub fn chart_spec(&self) -> ChartSpec {
        match self {
            Visualization::InventoryByCategory => ChartSpec {
                kind: ChartKind::Bar,
                title: "Inventory by Category",
                x: AxisBinding::column("category"),
                y: AxisBinding::column("total_inventory"),
                color: ColorBinding::Column("category"),
                size: None,
                markers: false,
                palette: SET1,
            },
            Visualization::PriceByBrand => ChartSpec {
                kind: ChartKind::Line,
                title: "Average Price by Brand",
                x: AxisBinding::column("brand"),
                y: AxisBinding::column("avg_price"),
                color: ColorBinding::Fixed("orange"),
                size: None,
                markers: true,
                palette: SET1,
            },
            Visualization::DiscountDistribution => ChartSpec {
                kind: ChartKind::Scatter,
                title: "Discount Distribution",
                x: AxisBinding::column("discount"),
                y: AxisBinding::column("discount_count"),
                color: ColorBinding::Column("discount"),
                size: Some("discount_count"),
                markers: false,
                palette: PASTEL,
            },
            Visualization::ProductionCostByMaterial => ChartSpec {
                kind: ChartKind::HorizontalBar,
                title: "Production Cost by Material",
                x: AxisBinding::column("avg_cost"),
                y: AxisBinding::column("material"),
                color: ColorBinding::Column("material"),
                size: None,
                markers: false,
                palette: BLUES,
            },
            Visualization::MostRecentPageViews => ChartSpec {
                kind: ChartKind::Scatter,
                title: "Most Recent Page Views",
                x: AxisBinding::labeled("viewtime", "View Time"),
                y: AxisBinding::labeled("pageid", "Page ID"),
                color: ColorBinding::Column("userid"),
                size: None,
                markers: false,
                palette: PRISM,
            },
        }
    }
}
