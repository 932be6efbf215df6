mod catalog;
mod error;
mod log_rotator;
mod sink;
mod writer;

pub use catalog::{Catalog, LOG_LINES};
pub use error::RandlogError;
pub use log_rotator::LogRotator;
pub use sink::{LineSink, RotatingSink};
pub use writer::{IntervalRange, RandomLogWriter, WriterStats, WRITER_THREAD_NAME};
