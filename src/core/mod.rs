pub mod aggregator;
pub mod cart;
pub mod catalog;
pub mod lookup;
pub mod scanner;
pub mod session;

pub use crate::domain::model::{
    CartEvent, DecodeResult, MacroRatio, NutritionReport, NutritionTotals, Product, ScanOutcome,
    Target, DAILY_TARGET,
};
pub use crate::domain::ports::{BarcodeDecoder, CatalogSource, Storage};
pub use crate::utils::error::Result;
