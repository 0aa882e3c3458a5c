//! Built-in demo dataset, used when the server has no sample file.

use crate::model::row::{CellValue, Dataset, Row};

const CATEGORIES: [(&str, [&str; 5]); 5] = [
    ("Electronics", ["Laptop", "Tablet", "Phone", "Monitor", "Keyboard"]),
    ("Furniture", ["Chair", "Desk", "Sofa", "Table", "Shelf"]),
    ("Clothing", ["Shirt", "Pants", "Jacket", "Shoes", "Hat"]),
    ("Food", ["Fruits", "Vegetables", "Dairy", "Meat", "Snacks"]),
    ("Books", ["Fiction", "Non-fiction", "Technical", "Comics", "Magazines"]),
];
const QUARTERS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];
const REGIONS: [&str; 5] = ["North", "South", "East", "West", "Central"];

/// One record per category, product, quarter and region (500 in total) with
/// random whole-number measures. `random` must return values in `[0, 1)`;
/// the browser passes `Math.random`.
pub fn generate_sample_rows(mut random: impl FnMut() -> f64) -> Dataset {
    let mut measure = |span: f64, offset: f64| CellValue::Number((random() * span).floor() + offset);

    let mut rows = Dataset::with_capacity(CATEGORIES.len() * 5 * QUARTERS.len() * REGIONS.len());
    for (category, products) in CATEGORIES {
        for product in products {
            for quarter in QUARTERS {
                for region in REGIONS {
                    let mut row = Row::new();
                    row.insert("Category".into(), category.into());
                    row.insert("Product".into(), product.into());
                    row.insert("Quarter".into(), quarter.into());
                    row.insert("Region".into(), region.into());
                    row.insert("Sales".into(), measure(50000.0, 10000.0));
                    row.insert("Units".into(), measure(500.0, 50.0));
                    row.insert("Cost".into(), measure(30000.0, 5000.0));
                    row.insert("Profit".into(), measure(20000.0, 1000.0));
                    rows.push(row);
                }
            }
        }
    }
    rows
}
