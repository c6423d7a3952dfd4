use crate::core::{CatalogSource, Product};
use crate::utils::error::{NutriError, Result};
use std::path::PathBuf;

/// 內建的示範商品表（常見便利商店商品）
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

// (name, barcode, category, kcal, sodium mg, carbohydrate g, protein g, sugar g)
const BUILTIN_PRODUCTS: [(&str, &str, &str, f64, f64, f64, f64, f64); 8] = [
    ("불닭볶음면", "8801043014817", "면류", 530.0, 1280.0, 85.0, 12.0, 7.0),
    ("참치마요 삼각김밥", "8801056030018", "즉석식품", 250.0, 480.0, 40.0, 6.0, 3.0),
    ("반숙란(2구)", "8801056030025", "가공식품", 120.0, 300.0, 2.0, 12.0, 1.0),
    ("자이언트 떡볶이", "8801056030032", "즉석식품", 680.0, 1800.0, 140.0, 14.0, 35.0),
    ("바나나우유", "8801056030049", "음료", 210.0, 110.0, 27.0, 7.0, 27.0),
    ("제로콜라", "8801056030056", "음료", 0.0, 10.0, 0.0, 0.0, 0.0),
    ("핫바(매운맛)", "8801056030063", "가공식품", 180.0, 650.0, 12.0, 9.0, 5.0),
    ("모짜렐라 치즈", "8801056030070", "유가공", 180.0, 220.0, 0.0, 15.0, 0.0),
];

impl CatalogSource for BuiltinCatalog {
    fn load(&self) -> Result<Vec<Product>> {
        Ok(BUILTIN_PRODUCTS
            .iter()
            .map(
                |&(name, barcode, category, kcal, sodium, carb, protein, sugar)| Product {
                    name: name.to_string(),
                    barcode: Some(barcode.to_string()),
                    category: category.to_string(),
                    energy_kcal: kcal,
                    sodium_mg: sodium,
                    carbohydrate_g: carb,
                    protein_g: protein,
                    sugar_g: sugar,
                    fat_g: None,
                },
            )
            .collect())
    }

    fn describe(&self) -> String {
        "built-in demo catalog".to_string()
    }
}

/// CSV 商品表：name,barcode,category,energy_kcal,sodium_mg,carbohydrate_g,protein_g,sugar_g[,fat_g]
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse<R: std::io::Read>(reader: R) -> Result<Vec<Product>> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut products = Vec::new();
        for record in csv_reader.deserialize::<Product>() {
            let mut product = record?;
            // 空白條碼視為沒有條碼
            if product.barcode.as_deref().is_some_and(|code| code.is_empty()) {
                product.barcode = None;
            }
            products.push(product);
        }

        if products.is_empty() {
            return Err(NutriError::CatalogError {
                message: "catalog contains no products".to_string(),
            });
        }

        Ok(products)
    }
}

impl CatalogSource for CsvCatalog {
    fn load(&self) -> Result<Vec<Product>> {
        let file = std::fs::File::open(&self.path)?;
        Self::parse(file)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
