use crate::core::aggregator;
use crate::core::cart::Cart;
use crate::core::catalog::Catalog;
use crate::core::lookup;
use crate::core::scanner;
use crate::core::{BarcodeDecoder, CartEvent, NutritionReport, Product, ScanOutcome, Target};
use crate::utils::error::{NutriError, Result};
use std::path::Path;

/// 一位使用者的工作階段：購物車、最近一次搜尋結果與掃描結果
#[derive(Debug, Clone)]
pub struct Session {
    cart: Cart,
    target: Target,
    listing: Vec<Product>,
    last_scan: Option<Product>,
}

impl Session {
    pub fn new(target: Target) -> Self {
        Self {
            cart: Cart::new(),
            target,
            listing: Vec::new(),
            last_scan: None,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn last_scan(&self) -> Option<&Product> {
        self.last_scan.as_ref()
    }

    /// 搜尋並記住結果，之後可用列號加入購物車
    pub fn search(&mut self, query: &str, catalog: &Catalog) -> &[Product] {
        self.listing = lookup::search(query, catalog).into_iter().cloned().collect();
        &self.listing
    }

    /// 列號從 0 開始
    pub fn add_listed(&mut self, row: usize) -> Result<&Product> {
        let product = self.listing.get(row).ok_or_else(|| NutriError::CommandError {
            message: format!(
                "There is no product #{} in the last listing ({} rows)",
                row + 1,
                self.listing.len()
            ),
        })?;
        self.cart.add(product);
        Ok(product)
    }

    pub fn add(&mut self, product: &Product) {
        self.cart.add(product);
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Product> {
        self.cart.remove_at(index)
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        self.last_scan = None;
    }

    pub fn lookup_barcode(&mut self, code: &str, catalog: &Catalog) -> ScanOutcome {
        self.remember(scanner::resolve_barcode(code, catalog))
    }

    pub fn scan<D: BarcodeDecoder + ?Sized>(
        &mut self,
        decoder: &D,
        image: &Path,
        catalog: &Catalog,
    ) -> ScanOutcome {
        self.remember(scanner::scan_image(decoder, image, catalog))
    }

    /// 把最近掃描到的商品加入購物車
    pub fn add_scanned(&mut self) -> Result<&Product> {
        let product = self.last_scan.as_ref().ok_or_else(|| NutriError::CommandError {
            message: "No scanned product yet. Use 'scan <image>' or 'barcode <code>' first"
                .to_string(),
        })?;
        self.cart.add(product);
        Ok(product)
    }

    pub fn report(&self) -> NutritionReport {
        aggregator::report(&self.cart, &self.target)
    }

    pub fn take_events(&mut self) -> Vec<CartEvent> {
        self.cart.take_events()
    }

    fn remember(&mut self, outcome: ScanOutcome) -> ScanOutcome {
        // 只有找到商品時才更新，失敗不改變狀態
        if let Some(product) = outcome.product() {
            self.last_scan = Some(product.clone());
        }
        outcome
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Target::default())
    }
}
