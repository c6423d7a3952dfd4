use crate::core::catalog::Catalog;
use crate::core::Product;

/// 依名稱搜尋（區分大小寫的子字串比對）；空字串回傳整個商品表
pub fn search<'a>(query: &str, catalog: &'a Catalog) -> Vec<&'a Product> {
    if query.is_empty() {
        return catalog.products().iter().collect();
    }

    let results: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|product| product.name.contains(query))
        .collect();

    tracing::debug!("Search '{}' matched {} products", query, results.len());
    results
}

/// 條碼完全相同的第一筆商品
pub fn find_by_barcode<'a>(code: &str, catalog: &'a Catalog) -> Option<&'a Product> {
    catalog
        .products()
        .iter()
        .find(|product| product.barcode.as_deref() == Some(code))
}
