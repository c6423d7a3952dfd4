use serde::{Deserialize, Serialize};

/// 商品資料，載入後不再變動
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub barcode: Option<String>,
    pub category: String,
    pub energy_kcal: f64,
    pub sodium_mg: f64,
    pub carbohydrate_g: f64,
    pub protein_g: f64,
    pub sugar_g: f64,
    /// 內建資料沒有脂肪欄位；缺少時在加總時視為 0
    #[serde(default)]
    pub fat_g: Option<f64>,
}

/// 每日建議攝取量
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub kcal: f64,
    pub sodium_mg: f64,
    pub sugar_g: f64,
    pub protein_g: f64,
}

/// 成人每日參考值
pub const DAILY_TARGET: Target = Target {
    kcal: 2000.0,
    sodium_mg: 2000.0,
    sugar_g: 50.0,
    protein_g: 55.0,
};

impl Default for Target {
    fn default() -> Self {
        DAILY_TARGET
    }
}

/// 購物車內容的營養加總，每次讀取時重新計算
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub energy_kcal: f64,
    pub sodium_mg: f64,
    pub sugar_g: f64,
    pub protein_g: f64,
    pub carbohydrate_g: f64,
    pub fat_g: f64,
}

/// 圓餅圖用的碳水／蛋白質／脂肪，未經正規化
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroRatio {
    pub carbohydrate_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionReport {
    pub totals: NutritionTotals,
    pub target: Target,
    /// 可能為負數，代表熱量超標
    pub energy_remaining_kcal: f64,
    pub sodium_pct: f64,
    pub sodium_alert: bool,
    /// 僅在未超標時提供，不截斷到 1.0
    pub sodium_progress: Option<f64>,
    pub sugar_pct: f64,
    pub protein_pct: f64,
    pub macros: MacroRatio,
}

impl NutritionReport {
    /// 顯示用，四捨五入到小數點後一位
    pub fn sodium_pct_display(&self) -> f64 {
        round_one_decimal(self.sodium_pct)
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 購物車的暫時通知，讀取一次後即消失
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    Added { name: String },
    Removed { index: usize, name: String },
    Cleared { count: usize },
}

/// 條碼辨識服務的回傳結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeResult {
    Decoded(String),
    NoMatch,
    Unavailable,
}

/// 掃描流程的最終結果，全部都不是致命錯誤
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Found { barcode: String, product: Product },
    NotInCatalog { barcode: String },
    NoBarcode,
    DecoderUnavailable,
    DecodeError(String),
}

impl ScanOutcome {
    pub fn message(&self) -> String {
        match self {
            ScanOutcome::Found { barcode, product } => {
                format!("barcode {} recognized: {}", barcode, product.name)
            }
            ScanOutcome::NotInCatalog { barcode } => {
                format!("barcode {} recognized, but the product is not in the catalog", barcode)
            }
            ScanOutcome::NoBarcode => "no barcode found".to_string(),
            ScanOutcome::DecoderUnavailable => "decoder not installed".to_string(),
            ScanOutcome::DecodeError(message) => format!("barcode processing error: {}", message),
        }
    }

    pub fn product(&self) -> Option<&Product> {
        match self {
            ScanOutcome::Found { product, .. } => Some(product),
            _ => None,
        }
    }
}
