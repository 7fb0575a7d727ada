use std::path::PathBuf;

use chrono::Local;
use thiserror::Error;

use crate::billing::Invoice;
use crate::cli::Opts;
use crate::config::Config;
use crate::error::{ConfigError, InputError, RenderError};
use crate::input;
use crate::layout;
use crate::pdf;

/// Loads the config, resolves the line items and writes the PDF.
/// Returns the path of the file it created.
pub fn run(opts: &Opts) -> Result<PathBuf, RunError> {
    let config = load_config(opts)?;
    let items = input::line_items(opts, &config)?;

    let date = opts.date.unwrap_or_else(|| Local::now().date_naive());
    let invoice = Invoice::new(
        date,
        &config.invoice.number_prefix,
        config.invoice.currency,
        items,
    );

    let page = layout::compose(&config, &invoice)?;
    let path = match &opts.output {
        Some(path) => path.clone(),
        None => default_filename(&config.invoice.filename_prefix, &invoice),
    };
    pdf::write(&page, &path)?;
    Ok(path)
}

fn load_config(opts: &Opts) -> Result<Config, ConfigError> {
    match &opts.op_item {
        Some(reference) => {
            Config::from_op_item(reference, opts.op_account.as_deref())
        }
        None => Config::from_path(&opts.config),
    }
}

fn default_filename(prefix: &str, invoice: &Invoice) -> PathBuf {
    PathBuf::from(format!("{}_{}.pdf", prefix, invoice.date.format("%Y%m%d")))
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::billing::Currency;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::fs;
    use std::path::Path;

    const CONFIG_TOML: &str = r#"
[sender]
name = "Byron Digby"
address_1 = "123 Maple Ave"
address_2 = "Springfield, IL 62704"
email = "byron@example.com"
phone = "(555) 010-4477"

[client]
name = "Acme Corp"
company = "Acme Holdings LLC"
address_1 = "500 Industrial Way"
address_2 = "Metropolis, NY 10101"

[bank]
account = "000123456789"
ach_routing = "110000012"
wire_routing = "021000021"

[invoice]
number_prefix = "BYRON-"
default_rate = 150
default_description = "Software Development Services"
filename_prefix = "byron_invoice"
"#;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("mkinvoice-run-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), CONFIG_TOML).unwrap();
        dir
    }

    fn opts(dir: &Path) -> Opts {
        Opts {
            hours: None,
            rate: None,
            description: None,
            date: Some(NaiveDate::from_ymd_opt(2025, 12, 2).unwrap()),
            csv: None,
            output: Some(dir.join("out.pdf")),
            config: dir.join("config.toml"),
            op_item: None,
            op_account: None,
        }
    }

    #[test]
    fn default_filename_stamps_the_date() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 2).unwrap();
        let invoice = Invoice::new(date, "BYRON-", Currency::Usd, vec![]);

        assert_eq!(
            default_filename("byron_invoice", &invoice),
            PathBuf::from("byron_invoice_20251202.pdf")
        );
    }

    #[test]
    fn creates_an_invoice_from_flags() {
        let dir = scratch("flags");
        let mut opts = opts(&dir);
        opts.hours = Some(dec!(200));

        let path = run(&opts).unwrap();

        assert_eq!(path, dir.join("out.pdf"));
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn renders_csv_items_end_to_end() {
        let dir = scratch("csv");
        fs::write(
            dir.join("items.csv"),
            "hours,description,rate\n\
             100,Development,150\n\
             50,Maintenance,150\n",
        )
        .unwrap();
        let mut opts = opts(&dir);
        opts.csv = Some(dir.join("items.csv"));

        let path = run(&opts).unwrap();

        let doc = lopdf::Document::load(&path).unwrap();
        let text = doc.extract_text(&[1]).unwrap();
        assert!(text.contains("Maintenance"));
        assert!(text.contains("$22,500.00"));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn a_bad_config_writes_no_file() {
        let dir = scratch("bad-config");
        fs::write(dir.join("config.toml"), "[sender]\nname = \"Byron\"\n")
            .unwrap();
        let mut opts = opts(&dir);
        opts.hours = Some(dec!(10));

        let error = run(&opts).unwrap_err();

        assert!(matches!(error, RunError::Config { .. }));
        assert!(!dir.join("out.pdf").exists());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn more_rows_than_the_page_holds_is_an_error() {
        let dir = scratch("overflow");
        let mut csv = String::from("hours,description,rate\n");
        for _ in 0..16 {
            csv.push_str("1,Development,150\n");
        }
        fs::write(dir.join("items.csv"), &csv).unwrap();
        let mut opts = opts(&dir);
        opts.csv = Some(dir.join("items.csv"));

        let error = run(&opts).unwrap_err();

        assert_eq!(
            error.to_string(),
            "16 line items do not fit on one page (at most 15)"
        );
        assert!(!dir.join("out.pdf").exists());
        fs::remove_dir_all(&dir).ok();
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("{source}")]
    Input {
        #[from]
        source: InputError,
    },

    #[error("{source}")]
    Render {
        #[from]
        source: RenderError,
    },
}
