// Adapters layer: concrete implementations for external systems (catalog files, barcode decoder, storage).

pub mod catalog;
pub mod decoder;
pub mod storage;
