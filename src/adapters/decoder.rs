use crate::core::{BarcodeDecoder, DecodeResult};
use crate::utils::error::{NutriError, Result};
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

pub const DEFAULT_DECODER_COMMAND: &str = "zbarimg";

/// zbarimg 找不到任何條碼時的結束碼
const ZBAR_NO_SYMBOLS_EXIT_CODE: i32 = 4;

/// 呼叫外部 zbarimg 進行條碼辨識
#[derive(Debug, Clone)]
pub struct ZbarDecoder {
    command: String,
    args: Vec<String>,
}

impl ZbarDecoder {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: vec!["--raw".to_string(), "-q".to_string()],
        }
    }

    pub fn with_args(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl Default for ZbarDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_DECODER_COMMAND)
    }
}

impl BarcodeDecoder for ZbarDecoder {
    fn decode(&self, image: &Path) -> Result<DecodeResult> {
        if !image.is_file() {
            return Err(NutriError::DecoderError {
                message: format!("image {} does not exist", image.display()),
            });
        }

        let output = match Command::new(&self.command).args(&self.args).arg(image).output() {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Decoder command '{}' not found", self.command);
                return Ok(DecodeResult::Unavailable);
            }
            Err(e) => {
                return Err(NutriError::DecoderError {
                    message: format!("failed to run {}: {}", self.command, e),
                })
            }
        };

        if output.status.code() == Some(ZBAR_NO_SYMBOLS_EXIT_CODE) {
            return Ok(DecodeResult::NoMatch);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NutriError::DecoderError {
                message: format!("{} exited with {}: {}", self.command, output.status, stderr.trim()),
            });
        }

        // 有多個條碼時只取第一個
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(|code| DecodeResult::Decoded(code.to_string()))
            .unwrap_or(DecodeResult::NoMatch))
    }
}

/// 停用條碼辨識時使用
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecoder;

impl BarcodeDecoder for NoDecoder {
    fn decode(&self, _image: &Path) -> Result<DecodeResult> {
        Ok(DecodeResult::Unavailable)
    }
}
