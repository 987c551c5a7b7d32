use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Package size of a shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PackageSize {
    S,
    M,
    L,
}

impl PackageSize {
    pub const ALL: [PackageSize; 3] = [PackageSize::S, PackageSize::M, PackageSize::L];

    pub fn code(self) -> &'static str {
        match self {
            PackageSize::S => "S",
            PackageSize::M => "M",
            PackageSize::L => "L",
        }
    }
}

impl FromStr for PackageSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(PackageSize::S),
            "M" => Ok(PackageSize::M),
            "L" => Ok(PackageSize::L),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PackageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Shipping carrier, identified in the log by a two-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Carrier {
    /// "LP"
    LaPoste,
    /// "MR"
    MondialRelay,
}

impl Carrier {
    pub const ALL: [Carrier; 2] = [Carrier::LaPoste, Carrier::MondialRelay];

    pub fn code(self) -> &'static str {
        match self {
            Carrier::LaPoste => "LP",
            Carrier::MondialRelay => "MR",
        }
    }
}

impl FromStr for Carrier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LP" => Ok(Carrier::LaPoste),
            "MR" => Ok(Carrier::MondialRelay),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A validated shipment line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub size: PackageSize,
    pub carrier: Carrier,
}

impl Transaction {
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from(self.date)
    }
}

/// Calendar month under which the stateful discount rules accumulate
///
/// Renders as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
