use crate::utils::error::{NutriError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(NutriError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(NutriError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 目標值必須是有限且大於零的數字，否則百分比計算無意義
pub fn validate_positive_f64(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(NutriError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number greater than 0".to_string(),
        });
    }
    Ok(())
}

/// 營養成分可以是 0，但不能是負數
pub fn validate_non_negative_f64(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(NutriError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite, non-negative number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        if let Some(extension) = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            if !allowed_set.contains(extension.to_ascii_lowercase().as_str()) {
                return Err(NutriError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(NutriError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NutriError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("export.output_path", "./output").is_ok());
        assert!(validate_path("export.output_path", "").is_err());
        assert!(validate_path("export.output_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_f64() {
        assert!(validate_positive_f64("targets.kcal", 2000.0).is_ok());
        assert!(validate_positive_f64("targets.kcal", 0.0).is_err());
        assert!(validate_positive_f64("targets.kcal", -5.0).is_err());
        assert!(validate_positive_f64("targets.kcal", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_non_negative_f64() {
        assert!(validate_non_negative_f64("sodium_mg", 0.0).is_ok());
        assert!(validate_non_negative_f64("sodium_mg", -0.5).is_err());
        assert!(validate_non_negative_f64("sodium_mg", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["products.csv".to_string(), "PRODUCTS.CSV".to_string()];
        assert!(validate_file_extensions("catalog.path", &files, &["csv"]).is_ok());

        let invalid_files = vec!["products.xlsx".to_string()];
        assert!(validate_file_extensions("catalog.path", &invalid_files, &["csv"]).is_err());

        let no_extension = vec!["products".to_string()];
        assert!(validate_file_extensions("catalog.path", &no_extension, &["csv"]).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("decoder.command", "zbarimg").is_ok());
        assert!(validate_non_empty_string("decoder.command", "   ").is_err());
    }
}
