use crate::core::{CatalogSource, Product};
use crate::utils::error::{NutriError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_non_negative_f64};
use std::collections::HashSet;

/// 唯讀商品表，保留原始順序
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self> {
        for (row, product) in products.iter().enumerate() {
            validate_product(row, product)?;
        }

        let mut seen = HashSet::new();
        for product in &products {
            if let Some(code) = &product.barcode {
                if !seen.insert(code.as_str()) {
                    // 查詢時只會回傳第一筆
                    tracing::warn!(
                        "⚠️ Duplicate barcode {} ({}), only the first entry is reachable by barcode",
                        code,
                        product.name
                    );
                }
            }
        }

        Ok(Self { products })
    }

    pub fn load_from<S: CatalogSource + ?Sized>(source: &S) -> Result<Self> {
        tracing::info!("📦 Loading catalog from {}", source.describe());
        let catalog = Self::new(source.load()?)?;
        tracing::info!("📦 Loaded {} products", catalog.len());
        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn validate_product(row: usize, product: &Product) -> Result<()> {
    let field = |name: &str| format!("catalog[{}].{}", row, name);

    validate_non_empty_string(&field("name"), &product.name).map_err(to_catalog_error)?;
    validate_non_negative_f64(&field("energy_kcal"), product.energy_kcal)
        .map_err(to_catalog_error)?;
    validate_non_negative_f64(&field("sodium_mg"), product.sodium_mg).map_err(to_catalog_error)?;
    validate_non_negative_f64(&field("carbohydrate_g"), product.carbohydrate_g)
        .map_err(to_catalog_error)?;
    validate_non_negative_f64(&field("protein_g"), product.protein_g).map_err(to_catalog_error)?;
    validate_non_negative_f64(&field("sugar_g"), product.sugar_g).map_err(to_catalog_error)?;
    if let Some(fat) = product.fat_g {
        validate_non_negative_f64(&field("fat_g"), fat).map_err(to_catalog_error)?;
    }
    Ok(())
}

fn to_catalog_error(err: NutriError) -> NutriError {
    NutriError::CatalogError {
        message: err.to_string(),
    }
}
