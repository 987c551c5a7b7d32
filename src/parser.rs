use chrono::NaiveDate;

use crate::models::{Carrier, PackageSize, Rejection, Transaction};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse one raw log line of the form `DATE SIZE CARRIER`
///
/// Fields are separated by any run of whitespace. Checks run in order:
/// field count, then date, then size and carrier.
pub fn parse_line(line: &str) -> Result<Transaction, Rejection> {
    let mut fields = line.split_whitespace();

    let fields = (fields.next(), fields.next(), fields.next(), fields.next());
    let (date, size, carrier) = match fields {
        (None, ..) => return Err(Rejection::Blank),
        (Some(date), Some(size), Some(carrier), None) => (date, size, carrier),
        _ => return Err(Rejection::Malformed),
    };

    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| Rejection::BadDate)?;

    match (size.parse::<PackageSize>(), carrier.parse::<Carrier>()) {
        (Ok(size), Ok(carrier)) => Ok(Transaction {
            date,
            size,
            carrier,
        }),
        _ => Err(Rejection::UnknownSizeOrCarrier),
    }
}
