use chrono::NaiveDate;
use clap::{Parser, ValueHint};
use rust_decimal::Decimal;
use std::path::PathBuf;

/* Argument structure
 *
 * mkinvoice --hours 180 [--rate 150] [--description "..."]
 * mkinvoice --csv items.csv
 * common: [--date 2025-12-02] [-o out.pdf] [-c config.toml]
 *         [--op-item op://vault/item/config [--op-account team]]
 */

#[derive(Parser)]
pub struct Opts {
    /// Hours worked, billed as a single line item
    #[clap(long, conflicts_with = "csv")]
    pub hours: Option<Decimal>,

    /// Hourly rate, defaults to the configured rate
    #[clap(long)]
    pub rate: Option<Decimal>,

    /// Line item description, defaults to the configured one
    #[clap(long)]
    pub description: Option<String>,

    /// Invoice date as YYYY-MM-DD, defaults to today
    #[clap(long)]
    pub date: Option<NaiveDate>,

    /// CSV file with hours, description and rate columns
    #[clap(long, value_hint=ValueHint::FilePath)]
    pub csv: Option<PathBuf>,

    /// Where to write the PDF, defaults to <prefix>_<YYYYMMDD>.pdf
    #[clap(short, long, value_hint=ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[clap(short, long, default_value="config.toml",
        value_hint=ValueHint::FilePath)]
    pub config: PathBuf,

    /// 1Password secret reference holding the config document
    #[clap(long, conflicts_with = "config")]
    pub op_item: Option<String>,

    /// 1Password account to read the secret from
    #[clap(long, requires = "op_item")]
    pub op_account: Option<String>,
}
