pub mod chunk;
pub mod outcome;
pub mod stats;
pub mod transaction;

pub use chunk::Chunk;
pub use outcome::{LineOutcome, Pricing, Rejection};
pub use stats::{GlobalStatistics, MonthlyState, PartialResult, RunTiming, Tallies};
pub use transaction::{Carrier, MonthKey, PackageSize, Transaction};
