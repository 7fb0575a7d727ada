use std::fs;
use std::path::Path;
use std::process::Command;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::billing::Currency;
use crate::error::ConfigError;

/// Everything static about an invoice: who sends it, who pays it, where
/// the money goes, and the defaults the command line can fall back on.
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct Config {
    pub sender: Sender,
    pub client: Client,
    pub bank: Bank,
    pub invoice: InvoiceDefaults,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct Sender {
    pub name: String,
    pub address_1: String,
    pub address_2: String,
    pub email: String,
    pub phone: String,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct Client {
    pub name: String,
    pub company: String,
    pub address_1: String,
    pub address_2: String,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct Bank {
    pub account: String,
    pub ach_routing: String,
    pub wire_routing: String,
    pub name: Option<String>,
    pub account_holder: Option<String>,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct InvoiceDefaults {
    pub number_prefix: String,
    pub default_rate: Decimal,
    pub default_description: String,
    pub filename_prefix: String,
    #[serde(default)]
    pub currency: Currency,
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_toml(&text, &path.display().to_string())
    }

    /// Reads the config through the 1Password CLI, so the TOML document can
    /// live in a vault item instead of on disk. `reference` is a secret
    /// reference like `op://vault/item/config`.
    pub fn from_op_item(
        reference: &str,
        account: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut cmd = Command::new("op");
        cmd.args(["read", reference]);
        if let Some(account) = account {
            cmd.args(["--account", account]);
        }
        let output = cmd
            .output()
            .map_err(|source| ConfigError::OpUnavailable { source })?;
        if !output.status.success() {
            return Err(ConfigError::OpRead {
                reference: reference.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr)
                    .trim()
                    .to_string(),
            });
        }
        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        Self::from_toml(&text, reference)
    }

    fn from_toml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Whose name goes on the payable-to line.
    pub fn payee(&self) -> &str {
        self.bank.account_holder.as_deref().unwrap_or(&self.sender.name)
    }
}

#[cfg(test)]
impl Config {
    pub fn sample() -> Self {
        Self {
            sender: Sender {
                name: "Byron Digby".to_string(),
                address_1: "123 Maple Ave".to_string(),
                address_2: "Springfield, IL 62704".to_string(),
                email: "byron@example.com".to_string(),
                phone: "(555) 010-4477".to_string(),
            },
            client: Client {
                name: "Acme Corp".to_string(),
                company: "Acme Holdings LLC".to_string(),
                address_1: "500 Industrial Way".to_string(),
                address_2: "Metropolis, NY 10101".to_string(),
            },
            bank: Bank {
                account: "000123456789".to_string(),
                ach_routing: "110000012".to_string(),
                wire_routing: "021000021".to_string(),
                name: None,
                account_holder: None,
            },
            invoice: InvoiceDefaults {
                number_prefix: "BYRON-".to_string(),
                default_rate: Decimal::from(150),
                default_description: "Software Development Services"
                    .to_string(),
                filename_prefix: "byron_invoice".to_string(),
                currency: Currency::Usd,
            },
        }
    }
}
