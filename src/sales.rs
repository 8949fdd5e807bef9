use std::{fmt, fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::warn;
use serde::{de::DeserializeOwned, Deserialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sale {
    #[serde(rename = "Product")]
    pub product: Option<String>,
    #[serde(rename = "Quantity")]
    pub quantity: Option<f64>,
}

/// Loads a JSON array of records, e.g. a price catalogue or a sales record.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file =
        File::open(path).with_context(|| format!("File '{}' not found", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("File '{}' is not valid JSON", path.display()))
}

#[derive(Debug, Default, PartialEq)]
pub struct SalesSummary {
    pub by_category: IndexMap<String, f64>,
    pub total: f64,
}

impl SalesSummary {
    pub fn compute(products: &[Product], sales: &[Sale]) -> SalesSummary {
        let mut summary = SalesSummary::default();
        for sale in sales {
            let (name, quantity) = match (&sale.product, sale.quantity) {
                (Some(name), Some(quantity)) => (name, quantity),
                _ => {
                    warn!("incomplete sale record: {:?}", sale);
                    continue;
                }
            };
            let mut matching = products
                .iter()
                .filter(|product| product.title.as_deref() == Some(name.as_str()));

            let priced_category = matching.clone().find_map(|product| {
                match (&product.category, product.price) {
                    (Some(category), Some(price)) => Some((category, price)),
                    _ => {
                        warn!("incomplete product record: {:?}", product);
                        None
                    }
                }
            });
            if let Some((category, price)) = priced_category {
                *summary.by_category.entry(category.clone()).or_insert(0.) += price * quantity;
            }
            let price = matching.find_map(|product| {
                if product.price.is_none() {
                    warn!("incomplete product record: {:?}", product);
                }
                product.price
            });
            if let Some(price) = price {
                summary.total += price * quantity;
            }
        }
        summary
    }
}

impl fmt::Display for SalesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-------------------")?;
        writeln!(f, "SALES BY CATEGORY")?;
        writeln!(f, "-------------------")?;
        for (category, amount) in &self.by_category {
            writeln!(f, "{}\t{:.2}", category, amount)?;
        }
        writeln!(f, "-------------------")?;
        writeln!(f, "TOTAL SALES")?;
        writeln!(f, "-------------------")?;
        writeln!(f, "{:.2}", self.total)
    }
}
