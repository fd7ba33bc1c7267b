//! Pure aggregation over a product list.

use std::collections::BTreeMap;

use serde::Serialize;

use stockshare_entity::product::Product;

/// Per-category totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub items: usize,
    pub stock: i64,
    pub value: f64,
}

/// Dashboard figures derived from one merchant's products.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: usize,
    pub total_stock: i64,
    pub total_value: f64,
    /// Products at or below their reorder point, in input order.
    pub low_stock: Vec<Product>,
    pub categories: BTreeMap<String, CategoryTotals>,
}

/// Summarize a product list.
pub fn summarize(products: &[Product]) -> DashboardSummary {
    let mut summary = DashboardSummary {
        total_products: products.len(),
        ..Default::default()
    };

    for product in products {
        let value = product.stock_value();
        summary.total_stock += i64::from(product.stock);
        summary.total_value += value;

        if product.is_low_stock() {
            summary.low_stock.push(product.clone());
        }

        let totals = summary
            .categories
            .entry(product.category.clone())
            .or_default();
        totals.items += 1;
        totals.stock += i64::from(product.stock);
        totals.value += value;
    }

    summary
}
