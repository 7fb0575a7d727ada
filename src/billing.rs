use std::fmt;
use std::ops::{Add, Mul};

use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(
    Display, Serialize, Deserialize, Debug, PartialEq, Clone, Copy, Default,
)]
pub enum Currency {
    #[default]
    #[strum(serialize = "$")]
    #[serde(rename = "USD")]
    Usd,
    #[strum(serialize = "C$")]
    #[serde(rename = "CAD")]
    Cad,
    #[strum(serialize = "€")]
    #[serde(rename = "EUR")]
    Eur,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
pub struct Money(Currency, Decimal);

impl Money {
    pub fn new(currency: Currency, amount: Decimal) -> Self {
        Self(currency, amount)
    }

    pub fn zero(currency: Currency) -> Self {
        Self(currency, Decimal::ZERO)
    }

    pub fn currency(&self) -> Currency {
        self.0
    }

    pub fn amount(&self) -> Decimal {
        self.1
    }
}

impl Add<Money> for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0, self.1 + other.1)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, other: Decimal) -> Self {
        Self(
            self.0,
            (self.1 * other).round_dp_with_strategy(
                2,
                RoundingStrategy::MidpointNearestEven,
            ),
        )
    }
}

impl fmt::Display for Money {
    /// Symbol, thousands-grouped whole part, exactly two fraction digits,
    /// e.g. `$30,000.00`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rounded = self.1.round_dp_with_strategy(
            2,
            RoundingStrategy::MidpointNearestEven,
        );
        // trunc leaves scale 0, so the mantissa is the whole unit count;
        // rescaling the fraction to 2 makes its mantissa the cents.
        let units = rounded.trunc().mantissa();
        let mut fraction = rounded.fract();
        fraction.rescale(2);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(
            f,
            "{}{}{}.{:02}",
            self.0,
            sign,
            units.abs().to_formatted_string(&Locale::en),
            fraction.mantissa().abs()
        )
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct LineItem {
    pub hours: Decimal,
    pub description: String,
    pub rate: Money,
}

impl LineItem {
    pub fn new(hours: Decimal, description: String, rate: Money) -> Self {
        Self {
            hours,
            description,
            rate,
        }
    }

    /// Rounded to cents at the multiply, so a rendered row always matches
    /// what it contributes to the total.
    pub fn amount(&self) -> Money {
        self.rate * self.hours
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Invoice {
    pub date: NaiveDate,
    pub number: String,
    pub currency: Currency,
    pub items: Vec<LineItem>,
}

impl Invoice {
    pub fn new(
        date: NaiveDate,
        number_prefix: &str,
        currency: Currency,
        items: Vec<LineItem>,
    ) -> Self {
        let number = format!("{}{}", number_prefix, date.format("%Y-%m-%d"));
        Self {
            date,
            number,
            currency,
            items,
        }
    }

    pub fn total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(self.currency), |acc, item| acc + item.amount())
    }

    /// Long form shown on the invoice, e.g. `December 2, 2025`.
    pub fn long_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}
