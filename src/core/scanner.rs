use crate::core::catalog::Catalog;
use crate::core::lookup::find_by_barcode;
use crate::core::{BarcodeDecoder, DecodeResult, ScanOutcome};
use std::path::Path;

/// 執行條碼辨識並對照商品表；辨識失敗只會降級成提示訊息
pub fn scan_image<D: BarcodeDecoder + ?Sized>(
    decoder: &D,
    image: &Path,
    catalog: &Catalog,
) -> ScanOutcome {
    tracing::debug!("Decoding barcode from {}", image.display());

    let decoded = match decoder.decode(image) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("❌ Barcode decoding failed: {}", e);
            return ScanOutcome::DecodeError(e.to_string());
        }
    };

    match decoded {
        DecodeResult::Decoded(barcode) => resolve_barcode(&barcode, catalog),
        DecodeResult::NoMatch => {
            tracing::info!("No barcode found in {}", image.display());
            ScanOutcome::NoBarcode
        }
        DecodeResult::Unavailable => {
            tracing::warn!("⚠️ Barcode decoder is not installed");
            ScanOutcome::DecoderUnavailable
        }
    }
}

/// 已知條碼直接對照商品表
pub fn resolve_barcode(barcode: &str, catalog: &Catalog) -> ScanOutcome {
    match find_by_barcode(barcode, catalog) {
        Some(product) => {
            tracing::info!("✅ Barcode {} matched '{}'", barcode, product.name);
            ScanOutcome::Found {
                barcode: barcode.to_string(),
                product: product.clone(),
            }
        }
        None => {
            tracing::info!("Barcode {} is not in the catalog", barcode);
            ScanOutcome::NotInCatalog {
                barcode: barcode.to_string(),
            }
        }
    }
}
