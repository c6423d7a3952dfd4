use crate::core::cart::Cart;
use crate::core::{MacroRatio, NutritionReport, NutritionTotals, Product, Target};

/// 一次走訪加總所有營養成分，不做增量維護
pub fn aggregate(cart: &Cart) -> NutritionTotals {
    sum_products(cart.entries())
}

pub fn sum_products(products: &[Product]) -> NutritionTotals {
    products
        .iter()
        .fold(NutritionTotals::default(), |mut totals, product| {
            totals.energy_kcal += product.energy_kcal;
            totals.sodium_mg += product.sodium_mg;
            totals.sugar_g += product.sugar_g;
            totals.protein_g += product.protein_g;
            totals.carbohydrate_g += product.carbohydrate_g;
            totals.fat_g += product.fat_g.unwrap_or(0.0);
            totals
        })
}

/// 與每日目標比較；sodium_pct 保留未四捨五入的值供判斷
pub fn evaluate(totals: &NutritionTotals, target: &Target) -> NutritionReport {
    let sodium_pct = totals.sodium_mg / target.sodium_mg * 100.0;
    let sodium_alert = sodium_pct > 100.0;

    if sodium_alert {
        tracing::info!(
            "🚨 Sodium {}mg exceeds the daily target of {}mg",
            totals.sodium_mg,
            target.sodium_mg
        );
    }

    NutritionReport {
        totals: *totals,
        target: *target,
        energy_remaining_kcal: target.kcal - totals.energy_kcal,
        sodium_pct,
        sodium_alert,
        sodium_progress: (!sodium_alert).then(|| sodium_pct / 100.0),
        sugar_pct: totals.sugar_g / target.sugar_g * 100.0,
        protein_pct: totals.protein_g / target.protein_g * 100.0,
        macros: MacroRatio {
            carbohydrate_g: totals.carbohydrate_g,
            protein_g: totals.protein_g,
            fat_g: totals.fat_g,
        },
    }
}

pub fn report(cart: &Cart, target: &Target) -> NutritionReport {
    evaluate(&aggregate(cart), target)
}
