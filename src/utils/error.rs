use thiserror::Error;

#[derive(Error, Debug)]
pub enum NutriError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Cart index {index} out of range (cart has {len} items)")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Barcode decoder error: {message}")]
    DecoderError { message: String },

    #[error("Command error: {message}")]
    CommandError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Contract,
    Decoder,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl NutriError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NutriError::IoError(_) => ErrorCategory::Io,
            NutriError::CsvError(_)
            | NutriError::SerializationError(_)
            | NutriError::CatalogError { .. } => ErrorCategory::Data,
            NutriError::ConfigValidationError { .. }
            | NutriError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            NutriError::IndexOutOfBounds { .. } => ErrorCategory::Contract,
            NutriError::DecoderError { .. } => ErrorCategory::Decoder,
            NutriError::CommandError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 使用者輸入錯誤，提示後繼續
            NutriError::CommandError { .. } => ErrorSeverity::Low,
            NutriError::DecoderError { .. } => ErrorSeverity::Medium,
            NutriError::IndexOutOfBounds { .. }
            | NutriError::CsvError(_)
            | NutriError::SerializationError(_)
            | NutriError::CatalogError { .. }
            | NutriError::ConfigValidationError { .. }
            | NutriError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            NutriError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            NutriError::IoError(e) => format!("Could not read or write a file: {}", e),
            NutriError::CsvError(e) => format!("The product catalog could not be parsed: {}", e),
            NutriError::SerializationError(e) => format!("Could not serialize the report: {}", e),
            NutriError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            NutriError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' has an invalid value '{}': {}", field, value, reason),
            NutriError::CatalogError { message } => format!("Product catalog problem: {}", message),
            NutriError::IndexOutOfBounds { index, len } => format!(
                "There is no cart item #{} (the cart holds {} items)",
                index + 1,
                len
            ),
            NutriError::DecoderError { message } => {
                format!("Barcode processing failed: {}", message)
            }
            NutriError::CommandError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the path exists and is writable",
            ErrorCategory::Data => {
                "Check the catalog CSV header: name,barcode,category,energy_kcal,sodium_mg,carbohydrate_g,protein_g,sugar_g[,fat_g]"
            }
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
            ErrorCategory::Contract => "Run 'cart' to see the current item numbers",
            ErrorCategory::Decoder => "Try a sharper photo or type the barcode with 'barcode <code>'",
            ErrorCategory::Input => "Type 'help' to list the available commands",
        }
    }
}

pub type Result<T> = std::result::Result<T, NutriError>;
