pub mod aggregator;
pub mod api;
pub mod contest;
pub mod duration;
pub mod sources;

pub use aggregator::{merge_contests, AggregateError, ContestAggregator};
pub use contest::{Contest, Platform};
pub use sources::{ContestSource, SourceConfig, SourceError};
