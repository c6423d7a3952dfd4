use crate::domain::model::{DecodeResult, Product};
use crate::utils::error::Result;
use std::path::Path;

/// 商品資料來源，啟動時一次載入
pub trait CatalogSource {
    fn load(&self) -> Result<Vec<Product>>;
    fn describe(&self) -> String;
}

/// 條碼辨識服務；處理過程本身失敗時回傳 Err
pub trait BarcodeDecoder {
    fn decode(&self, image: &Path) -> Result<DecodeResult>;
}

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}
