use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::catalog::Catalog;
use crate::error::RandlogError;
use crate::sink::LineSink;

pub const WRITER_THREAD_NAME: &str = "random-log-writer";

/// Closed range the writer draws its pause between two lines from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalRange {
	min: Duration,
	max: Duration,
}

impl IntervalRange {
	pub fn new(min: Duration, max: Duration) -> Result<Self, RandlogError> {
		if min > max {
			return Err(RandlogError::new(&format!(
				"interval minimum {:?} is larger than maximum {:?}",
				min, max
			)));
		}
		Ok(IntervalRange { min, max })
	}

	pub fn from_millis(min_ms: u64, max_ms: u64) -> Result<Self, RandlogError> {
		Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
	}

	pub fn min(&self) -> Duration {
		self.min
	}

	pub fn max(&self) -> Duration {
		self.max
	}

	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
		if self.min == self.max {
			return self.min;
		}
		rng.random_range(self.min..=self.max)
	}
}

impl Default for IntervalRange {
	fn default() -> Self {
		IntervalRange {
			min: Duration::from_secs(1),
			max: Duration::from_secs(3),
		}
	}
}

#[derive(Debug, Clone)]
struct LastWrite {
	line: String,
	at: DateTime<Utc>,
}

/// Counters the writer thread updates and the host reads.
#[derive(Debug)]
pub struct WriterStats {
	lines_written: AtomicU64,
	last_write: Mutex<Option<LastWrite>>,
	started_at: DateTime<Utc>,
}

impl WriterStats {
	pub fn new() -> Self {
		WriterStats {
			lines_written: AtomicU64::new(0),
			last_write: Mutex::new(None),
			started_at: Utc::now(),
		}
	}

	fn record(&self, line: &str) {
		self.lines_written.fetch_add(1, Ordering::Relaxed);
		let mut last = match self.last_write.lock() {
			Ok(guard) => guard,
			Err(poisoned) => poisoned.into_inner(),
		};
		*last = Some(LastWrite {
			line: line.to_string(),
			at: Utc::now(),
		});
	}

	fn last(&self) -> Option<LastWrite> {
		match self.last_write.lock() {
			Ok(guard) => guard.clone(),
			Err(poisoned) => poisoned.into_inner().clone(),
		}
	}

	pub fn lines_written(&self) -> u64 {
		self.lines_written.load(Ordering::Relaxed)
	}

	pub fn last_line(&self) -> Option<String> {
		self.last().map(|l| l.line)
	}

	pub fn last_write_at(&self) -> Option<DateTime<Utc>> {
		self.last().map(|l| l.at)
	}

	pub fn started_at(&self) -> DateTime<Utc> {
		self.started_at
	}
}

impl Default for WriterStats {
	fn default() -> Self {
		Self::new()
	}
}

/// Picks a random catalog line, hands it to the sink, pauses, forever.
pub struct RandomLogWriter<S: LineSink, R: Rng> {
	catalog: Arc<Catalog>,
	sink: Arc<S>,
	interval: IntervalRange,
	rng: R,
	stats: Arc<WriterStats>,
}

impl<S: LineSink, R: Rng> RandomLogWriter<S, R> {
	pub fn new(catalog: Arc<Catalog>, sink: Arc<S>, interval: IntervalRange, rng: R) -> Self {
		RandomLogWriter {
			catalog,
			sink,
			interval,
			rng,
			stats: Arc::new(WriterStats::new()),
		}
	}

	pub fn stats(&self) -> Arc<WriterStats> {
		self.stats.clone()
	}

	pub fn interval(&self) -> IntervalRange {
		self.interval
	}

	/// One iteration without the pause. Returns the written line and how long
	/// the loop should sleep before the next one.
	pub fn step(&mut self) -> (String, Duration) {
		let line = self.catalog.choose(&mut self.rng);
		self.sink.write_line(line);
		self.stats.record(line);
		let pause = self.interval.sample(&mut self.rng);
		(line.to_string(), pause)
	}

	/// Never returns.
	pub fn run(mut self) {
		log::info!(
			"random log writer started with {} lines, pause {:?}..={:?}",
			self.catalog.len(),
			self.interval.min(),
			self.interval.max()
		);
		loop {
			let (_, pause) = self.step();
			thread::sleep(pause);
		}
	}
}

impl<S, R> RandomLogWriter<S, R>
where
	S: LineSink + 'static,
	R: Rng + Send + 'static,
{
	/// Runs the loop on a detached background thread.
	pub fn spawn(self) -> io::Result<JoinHandle<()>> {
		thread::Builder::new()
			.name(WRITER_THREAD_NAME.to_string())
			.spawn(move || self.run())
	}
}
