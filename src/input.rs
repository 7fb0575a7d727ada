use std::io::Read;
use std::path::Path;

use csv::Trim;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::billing::{Currency, LineItem, Money};
use crate::cli::Opts;
use crate::config::Config;
use crate::error::InputError;

// Numeric fields come in as strings so the parse stays exact and the
// error can point at the offending line.
#[derive(Deserialize, Debug)]
struct Row {
    hours: String,
    description: String,
    rate: String,
}

/// Resolves the line items for one invoice: every CSV row becomes an
/// item, or `--hours` becomes a single item with the config filling in
/// whatever `--rate` and `--description` left out.
pub fn line_items(
    opts: &Opts,
    config: &Config,
) -> Result<Vec<LineItem>, InputError> {
    let currency = config.invoice.currency;
    match (&opts.csv, opts.hours) {
        (Some(path), _) => from_csv(path, currency),
        (None, Some(hours)) => {
            let rate = opts.rate.unwrap_or(config.invoice.default_rate);
            let description = opts
                .description
                .clone()
                .unwrap_or_else(|| config.invoice.default_description.clone());
            Ok(vec![LineItem::new(
                hours,
                description,
                Money::new(currency, rate),
            )])
        }
        (None, None) => Err(InputError::NoItems),
    }
}

fn from_csv(
    path: &Path,
    currency: Currency,
) -> Result<Vec<LineItem>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .map_err(|source| InputError::CsvOpen {
            path: path.to_path_buf(),
            source,
        })?;
    parse_rows(&mut reader, currency)
}

fn parse_rows<R: Read>(
    reader: &mut csv::Reader<R>,
    currency: Currency,
) -> Result<Vec<LineItem>, InputError> {
    let headers = reader.headers()?.clone();
    let mut items = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let row: Row = record.deserialize(Some(&headers))?;
        let hours = parse_number(line, "hours", &row.hours)?;
        let rate = parse_number(line, "rate", &row.rate)?;
        items.push(LineItem::new(
            hours,
            row.description,
            Money::new(currency, rate),
        ));
    }
    Ok(items)
}

fn parse_number(
    line: u64,
    field: &'static str,
    value: &str,
) -> Result<Decimal, InputError> {
    value.parse().map_err(|_| InputError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}
