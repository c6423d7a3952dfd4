use crate::core::{CartEvent, Product};
use crate::utils::error::{NutriError, Result};

/// 單一使用者 session 的購物車，依加入順序排列，允許重複
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: Vec<Product>,
    events: Vec<CartEvent>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, product: &Product) {
        self.entries.push(product.clone());
        tracing::debug!("🛒 Added '{}' (cart size {})", product.name, self.entries.len());
        self.events.push(CartEvent::Added {
            name: product.name.clone(),
        });
    }

    /// 索引超出範圍時回傳錯誤，購物車保持不變
    pub fn remove_at(&mut self, index: usize) -> Result<Product> {
        if index >= self.entries.len() {
            tracing::warn!(
                "Refusing to remove cart index {} (cart size {})",
                index,
                self.entries.len()
            );
            return Err(NutriError::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            });
        }

        let removed = self.entries.remove(index);
        tracing::debug!("🗑️ Removed '{}' from position {}", removed.name, index);
        self.events.push(CartEvent::Removed {
            index,
            name: removed.name.clone(),
        });
        Ok(removed)
    }

    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.events.push(CartEvent::Cleared { count });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 回傳複本，呼叫端修改不會影響購物車
    pub fn items(&self) -> Vec<Product> {
        self.entries.clone()
    }

    pub(crate) fn entries(&self) -> &[Product] {
        &self.entries
    }

    pub fn take_events(&mut self) -> Vec<CartEvent> {
        std::mem::take(&mut self.events)
    }
}
