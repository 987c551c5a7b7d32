use std::fmt;
use std::io::Write;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Carrier, GlobalStatistics, MonthKey, PackageSize};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Plain-text run summary
pub fn render_summary(stats: &GlobalStatistics) -> String {
    Summary(stats).to_string()
}

struct Summary<'a>(&'a GlobalStatistics);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;
        let tallies = &stats.tallies;
        let timing = &stats.timing;

        writeln!(f, "Processing Summary")?;
        writeln!(f, "  Start time:          {}", timing.started_at.format(TIME_FORMAT))?;
        writeln!(f, "  End time:            {}", timing.finished_at.format(TIME_FORMAT))?;
        writeln!(f, "  Duration:            {:.2?}", timing.elapsed)?;
        writeln!(f, "  Lines processed:     {}", tallies.lines_seen)?;
        writeln!(f, "  Valid transactions:  {}", tallies.valid)?;
        writeln!(f, "  Ignored lines:       {}", tallies.rejected)?;
        writeln!(f, "  Total discount:      {:.2}", tallies.total_discount)?;
        if stats.chunks_stopped_early > 0 {
            writeln!(
                f,
                "  Incomplete chunks:   {} of {}",
                stats.chunks_stopped_early, stats.chunks_merged
            )?;
        }

        writeln!(f, "Provider statistics:")?;
        for carrier in Carrier::ALL {
            writeln!(f, "  {}: {} shipments", carrier, tallies.carrier_count(carrier))?;
        }

        writeln!(f, "Package size statistics:")?;
        for size in PackageSize::ALL {
            writeln!(f, "  {}: {} shipments", size, tallies.size_count(size))?;
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct MonthRow {
    month: MonthKey,
    lp_large_shipments: u64,
    discount_used: String,
}

/// Per-month state as CSV: `month,lp_large_shipments,discount_used`
pub fn write_monthly_report<W: Write>(stats: &GlobalStatistics, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (month, state) in &stats.months {
        csv_writer.serialize(MonthRow {
            month: *month,
            lp_large_shipments: state.lp_large_count,
            discount_used: format_money(state.discount_used),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}
