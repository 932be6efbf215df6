use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::log_rotator::LogRotator;

/// Destination for generated log lines.
///
/// Implementations own their error handling, callers never see a failure.
pub trait LineSink: Send + Sync {
	fn write_line(&self, line: &str);
}

/// Serializes lines into a [`LogRotator`], one record per line, flushed after
/// every write.
pub struct RotatingSink {
	rotator: Mutex<LogRotator>,
}

impl RotatingSink {
	pub fn open<P: AsRef<Path>>(path: P, max_bytes: u64, backup_count: usize) -> io::Result<Self> {
		Ok(Self::new(LogRotator::new(path, max_bytes, backup_count)?))
	}

	pub fn new(rotator: LogRotator) -> Self {
		RotatingSink {
			rotator: Mutex::new(rotator),
		}
	}

	pub fn rotator(&self) -> MutexGuard<'_, LogRotator> {
		match self.rotator.lock() {
			Ok(guard) => guard,
			Err(poisoned) => poisoned.into_inner(),
		}
	}
}

impl LineSink for RotatingSink {
	fn write_line(&self, line: &str) {
		let mut record = Vec::with_capacity(line.len() + 1);
		record.extend_from_slice(line.as_bytes());
		record.push(b'\n');

		let mut rotator = self.rotator();
		if let Err(err) = append(&mut rotator, &record) {
			log::error!("failed to write to {}: {}", rotator.base_path().display(), err);
		}
	}
}

fn append(rotator: &mut LogRotator, record: &[u8]) -> io::Result<()> {
	rotator.write_record(record)?;
	rotator.flush()
}
