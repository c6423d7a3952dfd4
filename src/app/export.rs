use crate::core::session::Session;
use crate::core::{NutritionReport, Product, Storage};
use crate::utils::error::{NutriError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const REPORT_FILENAME: &str = "combo_report.json";
pub const CART_FILENAME: &str = "combo_cart.csv";

#[derive(Debug, Serialize)]
pub struct ComboExport {
    pub exported_at: DateTime<Utc>,
    pub items: Vec<Product>,
    pub report: NutritionReport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportPaths {
    pub report: String,
    pub cart: String,
}

/// 匯出目前的組合（JSON 報告 + CSV 清單），不會再讀回來
pub fn export_combo<S: Storage + ?Sized>(storage: &S, session: &Session) -> Result<ExportPaths> {
    let items = session.cart().items();
    if items.is_empty() {
        return Err(NutriError::CommandError {
            message: "The cart is empty, nothing to export".to_string(),
        });
    }

    let export = ComboExport {
        exported_at: Utc::now(),
        report: session.report(),
        items,
    };

    let json_data = serde_json::to_string_pretty(&export)?;
    let report = storage.write_file(REPORT_FILENAME, json_data.as_bytes())?;

    let cart = storage.write_file(CART_FILENAME, &cart_csv(&export.items)?)?;

    tracing::info!("💾 Exported combo with {} items to {}", export.items.len(), report);
    Ok(ExportPaths { report, cart })
}

fn cart_csv(items: &[Product]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for item in items {
        writer.serialize(item)?;
    }
    writer
        .into_inner()
        .map_err(|e| NutriError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::BuiltinCatalog;
    use crate::core::catalog::Catalog;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl Storage for MockStorage {
        fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(format!("mock://{}", path))
        }
    }

    #[test]
    fn test_export_writes_report_and_cart() {
        let catalog = Catalog::load_from(&BuiltinCatalog).unwrap();
        let mut session = Session::default();
        session.search("", &catalog);
        session.add_listed(0).unwrap();
        session.add_listed(4).unwrap();

        let storage = MockStorage::default();
        let paths = export_combo(&storage, &session).unwrap();
        assert_eq!(paths.report, "mock://combo_report.json");
        assert_eq!(paths.cart, "mock://combo_cart.csv");

        let files = storage.files.borrow();
        let report: serde_json::Value =
            serde_json::from_slice(files.get(REPORT_FILENAME).unwrap()).unwrap();
        assert_eq!(report["report"]["totals"]["energy_kcal"], 740.0);
        assert_eq!(report["report"]["sodium_alert"], false);
        assert_eq!(report["items"].as_array().unwrap().len(), 2);
        assert!(report["exported_at"].is_string());

        let csv_text = String::from_utf8(files.get(CART_FILENAME).unwrap().clone()).unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "name,barcode,category,energy_kcal,sodium_mg,carbohydrate_g,protein_g,sugar_g,fat_g"
        );
        assert!(lines.next().unwrap().starts_with("불닭볶음면,8801043014817,"));
        assert!(lines.next().unwrap().starts_with("바나나우유,"));
    }

    #[test]
    fn test_export_empty_cart_is_rejected() {
        let storage = MockStorage::default();
        let result = export_combo(&storage, &Session::default());
        assert!(matches!(result, Err(NutriError::CommandError { .. })));
        assert!(storage.files.borrow().is_empty());
    }
}
