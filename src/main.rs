use clap::Parser;
use combo_nutrition::core::BarcodeDecoder;
use combo_nutrition::utils::error::ErrorSeverity;
use combo_nutrition::utils::logger;
use combo_nutrition::{
    BuiltinCatalog, Catalog, CliConfig, CsvCatalog, LocalStorage, NoDecoder, NutriError, Session,
    Settings, Shell, ZbarDecoder,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting combo-nutrition");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli) {
        tracing::error!(
            "❌ combo-nutrition failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn run(cli: &CliConfig) -> Result<(), NutriError> {
    let settings = Settings::resolve(cli)?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let catalog = match &settings.catalog_path {
        Some(path) => Catalog::load_from(&CsvCatalog::new(path))?,
        None => Catalog::load_from(&BuiltinCatalog)?,
    };

    let decoder: Box<dyn BarcodeDecoder> = if settings.decoder_enabled {
        tracing::info!("📷 Barcode decoder: {}", settings.decoder_command);
        match &settings.decoder_args {
            Some(args) => Box::new(ZbarDecoder::with_args(
                settings.decoder_command.clone(),
                args.clone(),
            )),
            None => Box::new(ZbarDecoder::new(settings.decoder_command.clone())),
        }
    } else {
        tracing::info!("📷 Barcode decoding disabled");
        Box::new(NoDecoder)
    };

    let storage = LocalStorage::new(settings.output_path.clone());
    let session = Session::new(settings.target);

    let mut shell = Shell::new(catalog, decoder, storage, session);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shell.run(stdin.lock(), stdout.lock())
}
