use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Why a raw line could not be turned into a [`super::Transaction`]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Empty or whitespace-only line; counted but never echoed
    #[error("blank")]
    Blank,

    /// Wrong number of whitespace-separated fields
    #[error("malformed")]
    Malformed,

    #[error("bad date")]
    BadDate,

    #[error("unknown size/carrier")]
    UnknownSizeOrCarrier,
}

/// Result of pricing one transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    pub base_price: Decimal,
    /// Discount after the monthly cap was applied
    pub discount: Decimal,
    pub final_price: Decimal,
}

/// Annotated result for one non-blank input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Accepted { line: String, pricing: Pricing },
    Rejected { line: String, reason: Rejection },
}

impl LineOutcome {
    pub fn line(&self) -> &str {
        match self {
            LineOutcome::Accepted { line, .. } | LineOutcome::Rejected { line, .. } => line,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, LineOutcome::Accepted { .. })
    }
}

/// Output format: `LINE PRICE DISCOUNT` (dash for no discount) or `LINE Ignored`
impl fmt::Display for LineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineOutcome::Accepted { line, pricing } => {
                write!(f, "{} {:.2} ", line, pricing.final_price)?;
                if pricing.discount > Decimal::ZERO {
                    write!(f, "{:.2}", pricing.discount)
                } else {
                    f.write_str("-")
                }
            }
            LineOutcome::Rejected { line, .. } => write!(f, "{} Ignored", line),
        }
    }
}
