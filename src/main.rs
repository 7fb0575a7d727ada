/*
 * Single page invoice PDF from a TOML config
 *
 * 0.1 Requirements:
 * Load sender, client and bank details from config.toml
 * - or read the same document out of a 1Password item
 * Bill line items
 * - one item from --hours with optional --rate and --description
 * - or several from a CSV file
 * Total with exact decimal arithmetic
 * Render the fixed single page layout to <prefix>_<YYYYMMDD>.pdf
 */

mod billing;
mod cli;
mod config;
mod error;
mod fonts;
mod input;
mod layout;
mod pdf;
mod run;

use std::process;

use clap::Parser;

use crate::cli::Opts;

fn main() {
    let opts = Opts::parse();

    match run::run(&opts) {
        Ok(path) => println!("Invoice created: {}", path.display()),
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    }
}
