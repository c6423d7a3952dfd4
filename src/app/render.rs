//! Text rendering for the terminal shell.
//!
//! Everything here is a pure function from engine values to strings, so the
//! shell can be tested without a terminal.

use crate::core::{CartEvent, MacroRatio, NutritionReport, Product, ScanOutcome};

const GAUGE_WIDTH: usize = 20;

/// 整數時不顯示小數點
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// 進度條；超過 1.0 時畫滿
pub fn gauge(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * GAUGE_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(GAUGE_WIDTH - filled)
    )
}

pub fn product_listing(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products match your search.\n".to_string();
    }

    let mut out = String::from("Products\n");
    for (row, product) in products.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {} ({} kcal) [{}]\n",
            row + 1,
            product.name,
            format_amount(product.energy_kcal),
            product.category
        ));
        out.push_str(&format!(
            "    sodium: {}mg | protein: {}g\n",
            format_amount(product.sodium_mg),
            format_amount(product.protein_g)
        ));
    }
    out
}

pub fn cart_listing(items: &[Product]) -> String {
    if items.is_empty() {
        return "Your cart is empty. Add some products!\n".to_string();
    }

    let mut out = format!("Cart ({} items)\n", items.len());
    for (index, item) in items.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", index + 1, item.name));
    }
    out
}

pub fn cart_event(event: &CartEvent) -> String {
    match event {
        CartEvent::Added { name } => format!("🛒 '{}' added!\n", name),
        CartEvent::Removed { name, .. } => format!("🗑️ '{}' removed\n", name),
        CartEvent::Cleared { count } => format!("Cart cleared ({} items removed)\n", count),
    }
}

pub fn scan_outcome(outcome: &ScanOutcome) -> String {
    match outcome {
        ScanOutcome::Found { .. } => format!(
            "✅ {}\n   Type 'take' to add it to your cart.\n",
            outcome.message()
        ),
        ScanOutcome::NotInCatalog { .. } => format!("❌ {}\n", outcome.message()),
        ScanOutcome::NoBarcode => format!(
            "⚠️ {}. Try a sharper photo.\n",
            outcome.message()
        ),
        ScanOutcome::DecoderUnavailable => format!(
            "❌ {}. Install zbar (e.g. 'brew install zbar' or 'apt-get install zbar-tools').\n",
            outcome.message()
        ),
        ScanOutcome::DecodeError(_) => format!("❌ {}\n", outcome.message()),
    }
}

pub fn nutrition_report(report: &NutritionReport, item_count: usize) -> String {
    if item_count == 0 {
        return "Your cart is empty. Add some products!\n".to_string();
    }

    let totals = &report.totals;
    let target = &report.target;
    let mut out = format!("📊 Nutrition report ({} items)\n", item_count);

    out.push_str(&format!(
        "Total energy: {} kcal ({} kcal left)\n",
        format_amount(totals.energy_kcal),
        format_amount(report.energy_remaining_kcal)
    ));

    out.push_str(&format!(
        "Sodium: {}mg ({:.1}%)\n",
        format_amount(totals.sodium_mg),
        report.sodium_pct_display()
    ));
    match report.sodium_progress {
        Some(progress) => out.push_str(&format!("  {}\n", gauge(progress))),
        None => {
            out.push_str("🚨 Sodium overload! No more salty food today!\n");
            out.push_str("💡 Tip: banana milk or coconut water helps flush sodium out.\n");
        }
    }

    out.push_str(&format!(
        "Sugar: {}g ({:.1}% of {}g)\n",
        format_amount(totals.sugar_g),
        report.sugar_pct,
        format_amount(target.sugar_g)
    ));
    out.push_str(&format!(
        "Protein: {}g ({:.1}% of {}g)\n",
        format_amount(totals.protein_g),
        report.protein_pct,
        format_amount(target.protein_g)
    ));

    out.push_str(&macro_chart(&report.macros));
    out
}

/// 碳水／蛋白質／脂肪比例，比例換算在這裡做
pub fn macro_chart(macros: &MacroRatio) -> String {
    let rows = [
        ("Carbohydrate", macros.carbohydrate_g),
        ("Protein", macros.protein_g),
        ("Fat (est.)", macros.fat_g),
    ];
    let total: f64 = rows.iter().map(|(_, grams)| grams).sum();

    let mut out = String::from("Macro ratio\n");
    if total <= 0.0 {
        out.push_str("  no macronutrient data\n");
        return out;
    }

    for (label, grams) in rows {
        let share = grams / total;
        out.push_str(&format!(
            "  {:<13} {:>6}g {:>5.1}% {}\n",
            label,
            format_amount(grams),
            share * 100.0,
            gauge(share)
        ));
    }
    out
}

pub fn help() -> &'static str {
    "Commands
  search [query]   list products whose name contains the query (all when empty)
  add <n>          add product #n of the last listing to the cart
  barcode <code>   look up a product by barcode
  scan <image>     decode a barcode from a photo
  take             add the last scanned product to the cart
  cart             show the cart
  remove <n>       remove cart item #n
  report           show the nutrition report
  export           save the current combo report
  clear            empty the cart
  help             show this help
  quit             leave
"
}
