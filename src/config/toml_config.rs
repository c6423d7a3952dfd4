use crate::core::Target;
use crate::utils::error::{NutriError, Result};
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, validate_positive_f64,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: Option<CatalogConfig>,
    pub targets: Option<TargetsConfig>,
    pub decoder: Option<DecoderConfig>,
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<String>,
}

/// 未指定的項目沿用每日參考值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetsConfig {
    pub kcal: Option<f64>,
    pub sodium_mg: Option<f64>,
    pub sugar_g: Option<f64>,
    pub protein_g: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderConfig {
    pub enabled: Option<bool>,
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NutriError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| NutriError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_PATH})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::{Captures, Regex};
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
        });

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 取得每日目標
    pub fn target(&self) -> Target {
        let defaults = Target::default();
        match &self.targets {
            Some(t) => Target {
                kcal: t.kcal.unwrap_or(defaults.kcal),
                sodium_mg: t.sodium_mg.unwrap_or(defaults.sodium_mg),
                sugar_g: t.sugar_g.unwrap_or(defaults.sugar_g),
                protein_g: t.protein_g.unwrap_or(defaults.protein_g),
            },
            None => defaults,
        }
    }

    pub fn catalog_path(&self) -> Option<&str> {
        self.catalog.as_ref().and_then(|c| c.path.as_deref())
    }

    pub fn decoder_enabled(&self) -> bool {
        self.decoder
            .as_ref()
            .and_then(|d| d.enabled)
            .unwrap_or(true)
    }

    pub fn decoder_command(&self) -> Option<&str> {
        self.decoder.as_ref().and_then(|d| d.command.as_deref())
    }

    pub fn decoder_args(&self) -> Option<&[String]> {
        self.decoder.as_ref().and_then(|d| d.args.as_deref())
    }

    pub fn output_path(&self) -> Option<&str> {
        self.export.as_ref().and_then(|e| e.output_path.as_deref())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = self.catalog_path() {
            validate_path("catalog.path", path)?;
            validate_file_extensions("catalog.path", &[path.to_string()], &["csv"])?;
        }

        let target = self.target();
        validate_positive_f64("targets.kcal", target.kcal)?;
        validate_positive_f64("targets.sodium_mg", target.sodium_mg)?;
        validate_positive_f64("targets.sugar_g", target.sugar_g)?;
        validate_positive_f64("targets.protein_g", target.protein_g)?;

        if let Some(command) = self.decoder_command() {
            validate_non_empty_string("decoder.command", command)?;
        }

        if let Some(path) = self.output_path() {
            validate_path("export.output_path", path)?;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
