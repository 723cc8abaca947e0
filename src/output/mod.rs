//! Durable outputs: the results CSV and per-pair probe logs.

pub mod probe_log;
pub mod results;

pub use probe_log::{sanitize, ProbeLog};
pub use results::{ResultsCsv, RESULTS_FILE_NAME};
