use crate::app::export::export_combo;
use crate::app::render;
use crate::core::catalog::Catalog;
use crate::core::session::Session;
use crate::core::{BarcodeDecoder, CartEvent, Storage};
use crate::utils::error::{NutriError, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    /// 0 起算的列號
    Add(usize),
    Barcode(String),
    Scan(PathBuf),
    Take,
    Cart,
    /// 0 起算的購物車位置
    Remove(usize),
    Report,
    Export,
    Clear,
    Help,
    Quit,
}

impl Command {
    /// 空白行回傳 None
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim_start()),
            None => (line, ""),
        };

        let command = match name.to_lowercase().as_str() {
            "search" | "s" => Command::Search(rest.to_string()),
            "add" | "a" => Command::Add(parse_position(rest)?),
            "barcode" | "b" => Command::Barcode(required(name, rest, "<code>")?.to_string()),
            "scan" => Command::Scan(PathBuf::from(required(name, rest, "<image>")?)),
            "take" => Command::Take,
            "cart" | "c" => Command::Cart,
            "remove" | "rm" => Command::Remove(parse_position(rest)?),
            "report" | "r" => Command::Report,
            "export" | "save" => Command::Export,
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(NutriError::CommandError {
                    message: format!("Unknown command '{}'", other),
                })
            }
        };

        Ok(Some(command))
    }
}

fn required<'a>(name: &str, rest: &'a str, usage: &str) -> Result<&'a str> {
    if rest.is_empty() {
        return Err(NutriError::CommandError {
            message: format!("Usage: {} {}", name, usage),
        });
    }
    Ok(rest)
}

/// 使用者輸入的編號從 1 開始
fn parse_position(rest: &str) -> Result<usize> {
    match rest.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(NutriError::CommandError {
            message: format!("Expected an item number (1, 2, ...), got '{}'", rest),
        }),
    }
}

pub struct Shell<S: Storage> {
    catalog: Catalog,
    decoder: Box<dyn BarcodeDecoder>,
    storage: S,
    session: Session,
}

impl<S: Storage> Shell<S> {
    pub fn new(
        catalog: Catalog,
        decoder: Box<dyn BarcodeDecoder>,
        storage: S,
        session: Session,
    ) -> Self {
        Self {
            catalog,
            decoder,
            storage,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 讀取指令直到 quit 或輸入結束；只有輸出失敗會中止
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        writeln!(output, "🏪 Convenience store nutritionist")?;
        writeln!(
            output,
            "{} products loaded. Type 'help' for commands.",
            self.catalog.len()
        )?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            // 非 UTF-8 的輸入（例如 CP949 終端機）以替代字元處理，不中止 session
            let line = String::from_utf8_lossy(&buf);
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    write_error(&mut output, &e)?;
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }

            match self.execute(command) {
                Ok(text) => output.write_all(text.as_bytes())?,
                Err(e) => write_error(&mut output, &e)?,
            }
            output.flush()?;
        }

        tracing::info!(
            "Session finished with {} items in the cart",
            self.session.cart().len()
        );
        writeln!(output, "Bye!")?;
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> Result<String> {
        tracing::debug!("Executing {:?}", command);

        let mut out = match command {
            Command::Search(query) => {
                let results = self.session.search(&query, &self.catalog);
                render::product_listing(results)
            }
            Command::Add(row) => {
                self.session.add_listed(row)?;
                String::new()
            }
            Command::Barcode(code) => {
                let outcome = self.session.lookup_barcode(&code, &self.catalog);
                render::scan_outcome(&outcome)
            }
            Command::Scan(image) => {
                let outcome = self
                    .session
                    .scan(self.decoder.as_ref(), &image, &self.catalog);
                render::scan_outcome(&outcome)
            }
            Command::Take => {
                self.session.add_scanned()?;
                String::new()
            }
            Command::Cart => render::cart_listing(&self.session.cart().items()),
            Command::Remove(index) => {
                self.session.remove_at(index)?;
                String::new()
            }
            Command::Report => {
                render::nutrition_report(&self.session.report(), self.session.cart().len())
            }
            Command::Export => {
                let paths = export_combo(&self.storage, &self.session)?;
                format!(
                    "💾 Combo saved!\n   report: {}\n   cart:   {}\n",
                    paths.report, paths.cart
                )
            }
            Command::Clear => {
                self.session.clear();
                String::new()
            }
            Command::Help => render::help().to_string(),
            Command::Quit => String::new(),
        };

        // 通知只顯示一次；刪除後立即重畫購物車與營養分析
        let mut rerender = false;
        for event in self.session.take_events() {
            out.push_str(&render::cart_event(&event));
            if matches!(event, CartEvent::Removed { .. }) {
                rerender = true;
            }
        }
        if rerender {
            let cart = self.session.cart();
            out.push_str(&render::cart_listing(&cart.items()));
            if !cart.is_empty() {
                out.push_str(&render::nutrition_report(&self.session.report(), cart.len()));
            }
        }

        Ok(out)
    }
}

fn write_error<W: Write>(output: &mut W, error: &NutriError) -> Result<()> {
    tracing::debug!(
        "Command failed: {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    writeln!(output, "❌ {}", error.user_friendly_message())?;
    writeln!(output, "💡 {}", error.recovery_suggestion())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(
            Command::parse("search").unwrap(),
            Some(Command::Search(String::new()))
        );
        assert_eq!(
            Command::parse("search 자이언트 떡볶이").unwrap(),
            Some(Command::Search("자이언트 떡볶이".to_string()))
        );
        assert_eq!(Command::parse("add 1").unwrap(), Some(Command::Add(0)));
        assert_eq!(Command::parse("rm 3").unwrap(), Some(Command::Remove(2)));
        assert_eq!(
            Command::parse("scan photos/barcode.jpg").unwrap(),
            Some(Command::Scan(PathBuf::from("photos/barcode.jpg")))
        );
        assert_eq!(Command::parse("QUIT").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("add").is_err());
        assert!(Command::parse("add 0").is_err());
        assert!(Command::parse("remove two").is_err());
        assert!(Command::parse("barcode").is_err());
        assert!(Command::parse("dance").is_err());
    }
}
