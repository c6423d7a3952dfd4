use combo_nutrition::core::{BarcodeDecoder, DecodeResult};
use combo_nutrition::{
    BuiltinCatalog, Catalog, CsvCatalog, LocalStorage, NoDecoder, Result, Session, Shell,
};
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

struct FixedDecoder(DecodeResult);

impl BarcodeDecoder for FixedDecoder {
    fn decode(&self, _image: &Path) -> Result<DecodeResult> {
        Ok(self.0.clone())
    }
}

fn run_shell(decoder: Box<dyn BarcodeDecoder>, output_dir: &Path, script: &str) -> (String, Session) {
    run_shell_bytes(decoder, output_dir, script.as_bytes())
}

fn run_shell_bytes(
    decoder: Box<dyn BarcodeDecoder>,
    output_dir: &Path,
    script: &[u8],
) -> (String, Session) {
    let catalog = Catalog::load_from(&BuiltinCatalog).unwrap();
    let storage = LocalStorage::new(output_dir.to_str().unwrap().to_string());
    let mut shell = Shell::new(catalog, decoder, storage, Session::default());

    let mut output = Vec::new();
    shell.run(Cursor::new(script), &mut output).unwrap();

    (String::from_utf8(output).unwrap(), shell.session().clone())
}

#[test]
fn test_end_to_end_search_add_report() {
    let temp_dir = TempDir::new().unwrap();
    let script = "search 닭\nadd 1\nsearch 우유\nadd 1\nreport\nquit\n";

    let (output, session) = run_shell(Box::new(NoDecoder), temp_dir.path(), script);

    assert!(output.contains("불닭볶음면 (530 kcal)"));
    assert!(output.contains("🛒 '불닭볶음면' added!"));
    assert!(output.contains("🛒 '바나나우유' added!"));
    assert!(output.contains("Total energy: 740 kcal (1260 kcal left)"));
    assert!(output.contains("Sodium: 1390mg (69.5%)"));
    assert!(!output.contains("Sodium overload"));
    assert!(output.trim_end().ends_with("Bye!"));
    assert_eq!(session.cart().len(), 2);
}

#[test]
fn test_sodium_alert_after_third_item() {
    let temp_dir = TempDir::new().unwrap();
    // 불닭볶음면 + 바나나우유 + 핫바(650mg) + 반숙란(300mg) = 2340mg
    let script = "search\nadd 1\nadd 5\nadd 7\nadd 3\nreport\n";

    let (output, session) = run_shell(Box::new(NoDecoder), temp_dir.path(), script);

    assert!(output.contains("Sodium: 2340mg (117.0%)"));
    assert!(output.contains("Sodium overload"));
    assert!(session.report().sodium_alert);
}

#[test]
fn test_remove_rerenders_cart_and_report() {
    let temp_dir = TempDir::new().unwrap();
    let script = "search\nadd 1\nadd 2\nadd 1\nremove 1\nremove 9\nreport\n";

    let (output, session) = run_shell(Box::new(NoDecoder), temp_dir.path(), script);

    assert!(output.contains("🗑️ '불닭볶음면' removed"));
    assert!(output.contains("Cart (2 items)"));
    assert!(output.contains("There is no cart item #9"));

    let names: Vec<String> = session.cart().items().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["참치마요 삼각김밥", "불닭볶음면"]);
    assert!(output.contains("Total energy: 780 kcal (1220 kcal left)"));
}

#[test]
fn test_remove_redraws_nutrition_report() {
    let temp_dir = TempDir::new().unwrap();
    let (output, session) = run_shell(
        Box::new(NoDecoder),
        temp_dir.path(),
        "search\nadd 1\nadd 2\nremove 1\n",
    );

    // 刪除後不需再輸入 report 就會顯示新的加總
    assert!(output.contains("Cart (1 items)"));
    assert!(output.contains("Total energy: 250 kcal (1750 kcal left)"));
    assert!(output.contains("Sodium: 480mg (24.0%)"));
    assert_eq!(session.cart().len(), 1);
}

#[test]
fn test_remove_last_item_shows_empty_cart_once() {
    let temp_dir = TempDir::new().unwrap();
    let (output, _) = run_shell(Box::new(NoDecoder), temp_dir.path(), "search\nadd 1\nremove 1\n");

    assert_eq!(output.matches("Your cart is empty").count(), 1);
    assert!(!output.contains("Nutrition report"));
}

/// 非 UTF-8 的輸入行（例如 CP949 編碼的「닭」）不應中止 session
#[test]
fn test_invalid_utf8_line_keeps_session_alive() {
    let temp_dir = TempDir::new().unwrap();
    let script: &[u8] = b"search \xB4\xDF\nsearch\nadd 1\n";

    let (output, session) = run_shell_bytes(Box::new(NoDecoder), temp_dir.path(), script);

    assert!(output.contains("No products match your search."));
    assert!(output.contains("🛒 '불닭볶음면' added!"));
    assert!(output.trim_end().ends_with("Bye!"));
    assert_eq!(session.cart().len(), 1);
}

#[test]
fn test_scan_and_take() {
    let temp_dir = TempDir::new().unwrap();
    let decoder = FixedDecoder(DecodeResult::Decoded("8801056030070".to_string()));
    let script = "scan photo.jpg\ntake\ncart\n";

    let (output, session) = run_shell(Box::new(decoder), temp_dir.path(), script);

    assert!(output.contains("barcode 8801056030070 recognized: 모짜렐라 치즈"));
    assert!(output.contains("🛒 '모짜렐라 치즈' added!"));
    assert_eq!(session.cart().items()[0].name, "모짜렐라 치즈");
}

#[test]
fn test_scan_failures_are_not_fatal() {
    let temp_dir = TempDir::new().unwrap();

    let (no_match, session) = run_shell(
        Box::new(FixedDecoder(DecodeResult::NoMatch)),
        temp_dir.path(),
        "scan photo.jpg\ntake\nsearch 콜라\nadd 1\n",
    );
    assert!(no_match.contains("no barcode found"));
    assert!(no_match.contains("No scanned product yet"));
    assert_eq!(session.cart().len(), 1);

    let (unavailable, _) = run_shell(Box::new(NoDecoder), temp_dir.path(), "scan photo.jpg\n");
    assert!(unavailable.contains("decoder not installed"));

    let (unknown, session) = run_shell(
        Box::new(FixedDecoder(DecodeResult::Decoded("4006381333931".to_string()))),
        temp_dir.path(),
        "scan photo.jpg\n",
    );
    assert!(unknown.contains("not in the catalog"));
    assert!(session.cart().is_empty());
}

#[test]
fn test_manual_barcode_lookup() {
    let temp_dir = TempDir::new().unwrap();
    let (output, session) = run_shell(
        Box::new(NoDecoder),
        temp_dir.path(),
        "barcode 8801056030025\ntake\nbarcode 0000\n",
    );

    assert!(output.contains("반숙란(2구)"));
    assert!(output.contains("barcode 0000 recognized, but the product is not in the catalog"));
    assert_eq!(session.cart().len(), 1);
}

#[test]
fn test_export_writes_files() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("combos");

    let (output, _) = run_shell(
        Box::new(NoDecoder),
        &output_dir,
        "export\nsearch 떡볶이\nadd 1\nexport\n",
    );

    assert!(output.contains("nothing to export"));
    assert!(output.contains("💾 Combo saved!"));

    let report_path = output_dir.join("combo_report.json");
    let report: serde_json::Value =
        serde_json::from_slice(&std::fs::read(report_path).unwrap()).unwrap();
    assert_eq!(report["report"]["totals"]["sodium_mg"], 1800.0);
    assert_eq!(report["report"]["sodium_alert"], false);

    let cart_csv = std::fs::read_to_string(output_dir.join("combo_cart.csv")).unwrap();
    assert!(cart_csv.contains("자이언트 떡볶이"));
}

#[test]
fn test_unknown_commands_keep_session_alive() {
    let temp_dir = TempDir::new().unwrap();
    let (output, session) = run_shell(
        Box::new(NoDecoder),
        temp_dir.path(),
        "dance\nadd 1\nsearch\nadd 1\nclear\ncart\n",
    );

    assert!(output.contains("Unknown command 'dance'"));
    assert!(output.contains("There is no product #1 in the last listing"));
    assert!(output.contains("Cart cleared (1 items removed)"));
    assert!(output.contains("Your cart is empty"));
    assert!(session.cart().is_empty());
}

#[test]
fn test_csv_catalog_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("products.csv");
    std::fs::write(
        &catalog_path,
        "name,barcode,category,energy_kcal,sodium_mg,carbohydrate_g,protein_g,sugar_g,fat_g\n\
         Chicken Salad,9000000000011,salad,320,900,12,28,4,16\n\
         Chicken Wrap,9000000000028,instant,450,1200,48,22,6,\n\
         Water,,drink,0,0,0,0,0,\n",
    )
    .unwrap();

    let catalog = Catalog::load_from(&CsvCatalog::new(&catalog_path)).unwrap();
    let mut session = Session::default();

    let names: Vec<String> = session
        .search("Chicken", &catalog)
        .iter()
        .map(|p| p.name.clone())
        .collect();
    assert_eq!(names, vec!["Chicken Salad", "Chicken Wrap"]);

    session.add_listed(0).unwrap();
    session.add_listed(1).unwrap();

    let report = session.report();
    assert_eq!(report.macros.fat_g, 16.0);
    assert_eq!(report.totals.sodium_mg, 2100.0);
    assert!(report.sodium_alert);
    assert_eq!(report.sodium_progress, None);
}
