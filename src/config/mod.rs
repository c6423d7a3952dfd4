pub mod toml_config;

use crate::adapters::decoder::DEFAULT_DECODER_COMMAND;
use crate::core::Target;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::Deserialize;
use serde::Serialize;
use toml_config::TomlConfig;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "combo-nutrition")]
#[command(about = "Convenience store combo nutrition calculator")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Product catalog CSV (defaults to the built-in demo catalog)
    #[arg(long)]
    pub catalog: Option<String>,

    /// Barcode decoder executable
    #[arg(long)]
    pub decoder_command: Option<String>,

    /// Disable barcode decoding from images
    #[arg(long)]
    pub no_decoder: bool,

    /// Directory for exported combo reports
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

/// 合併 TOML 與命令列後的最終設定
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub catalog_path: Option<String>,
    pub target: Target,
    pub decoder_enabled: bool,
    pub decoder_command: String,
    pub decoder_args: Option<Vec<String>>,
    pub output_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_toml(&TomlConfig::default())
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        Self {
            catalog_path: config.catalog_path().map(str::to_string),
            target: config.target(),
            decoder_enabled: config.decoder_enabled(),
            decoder_command: config
                .decoder_command()
                .unwrap_or(DEFAULT_DECODER_COMMAND)
                .to_string(),
            decoder_args: config.decoder_args().map(<[String]>::to_vec),
            output_path: config
                .output_path()
                .unwrap_or(DEFAULT_OUTPUT_PATH)
                .to_string(),
        }
    }

    /// 命令列參數優先於設定檔
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let toml = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                config
            }
            None => TomlConfig::default(),
        };

        let mut settings = Self::from_toml(&toml);

        if let Some(catalog) = &cli.catalog {
            settings.catalog_path = Some(catalog.clone());
        }
        if let Some(command) = &cli.decoder_command {
            settings.decoder_command = command.clone();
        }
        if cli.no_decoder {
            settings.decoder_enabled = false;
        }
        if let Some(output_path) = &cli.output_path {
            settings.output_path = output_path.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.catalog_path {
            validate_path("catalog", path)?;
            validate_file_extensions("catalog", std::slice::from_ref(path), &["csv"])?;
        }
        if self.decoder_enabled {
            validate_non_empty_string("decoder_command", &self.decoder_command)?;
        }
        validate_path("output_path", &self.output_path)
    }
}
