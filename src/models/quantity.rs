use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const DEFAULT_QUANTITY: &str = "1 pcs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Unit {
    #[default]
    #[serde(rename = "pcs")]
    Pieces,
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "L")]
    Liters,
    #[serde(rename = "ml")]
    Milliliters,
}

impl Unit {
    pub const ALL: [Unit; 5] = [
        Unit::Pieces,
        Unit::Kilograms,
        Unit::Grams,
        Unit::Liters,
        Unit::Milliliters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Pieces => "pcs",
            Unit::Kilograms => "kg",
            Unit::Grams => "g",
            Unit::Liters => "L",
            Unit::Milliliters => "ml",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The "amount unit" pair stored as an item's quantity text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    pub amount: String,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(amount: impl Into<String>, unit: Unit) -> Self {
        Self {
            amount: amount.into(),
            unit,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::new("1", Unit::Pieces)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantityParseError {
    #[error("quantity is empty")]
    Empty,
    #[error("amount `{0}` is not a number")]
    InvalidAmount(String),
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),
}

impl FromStr for Quantity {
    type Err = QuantityParseError;

    /// Accepts `"2 kg"`, `"2kg"` or a bare amount (pieces).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(QuantityParseError::Empty);
        }

        let split = trimmed
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
            .unwrap_or(trimmed.len());
        let (amount, rest) = trimmed.split_at(split);
        let amount = amount.trim();
        if amount.is_empty() || amount.replace(',', ".").parse::<f64>().is_err() {
            return Err(QuantityParseError::InvalidAmount(amount.to_string()));
        }

        let rest = rest.trim();
        let unit = if rest.is_empty() {
            Unit::Pieces
        } else {
            Unit::parse(rest).ok_or_else(|| QuantityParseError::UnknownUnit(rest.to_string()))?
        };

        Ok(Self::new(amount, unit))
    }
}
