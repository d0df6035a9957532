use tracing::{ debug, error, };

use crate::config::StreamConfig;
use crate::stream::SEEK_EOF;
use crate::{ Stream, StreamPosition, StreamState, WriteStream, };

/// Capacity a `MemoryWriteStream` starts out with unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Growable in-memory write stream. The buffer doubles in size whenever a write or a seek would reach its capacity, so
/// the capacity is always the initial capacity times a power of two.
///
/// `data.len()` is the capacity. Only `[0, size)` is meaningful; bytes that were skipped over by seeking past the end
/// have unspecified contents.
#[derive(Debug)]
pub struct MemoryWriteStream {
	data: Vec<u8>,
	position: usize,
	size: usize,
	state: StreamState,
}

impl Default for MemoryWriteStream {
	fn default() -> Self {
		MemoryWriteStream::with_capacity(DEFAULT_CAPACITY)
	}
}

impl MemoryWriteStream {
	pub fn new() -> Self {
		MemoryWriteStream::default()
	}

	/// Creates a stream with `capacity` bytes preallocated. A zero capacity would never grow by doubling, so it is
	/// bumped up to one byte.
	pub fn with_capacity(capacity: usize) -> Self {
		MemoryWriteStream {
			data: vec![0; capacity.max(1)],
			position: 0,
			size: 0,
			state: StreamState::new(true),
		}
	}

	pub fn from_config(config: &StreamConfig) -> Self {
		MemoryWriteStream::with_capacity(config.initial_capacity)
	}

	/// The bytes written so far.
	pub fn memory(&self) -> &[u8] {
		&self.data[..self.size]
	}

	/// High-water mark of the stream, the furthest any write or seek has reached.
	pub fn size(&self) -> usize {
		self.size
	}

	pub fn capacity(&self) -> usize {
		self.data.len()
	}

	/// Consumes the stream, returning the written bytes.
	pub fn into_vec(mut self) -> Vec<u8> {
		self.data.truncate(self.size);
		self.data
	}

	/// Doubles the capacity until `required` fits below it. Contents are preserved. On failure the error flag is set and
	/// the stream is left as it was.
	fn grow(&mut self, required: usize) -> bool {
		let mut capacity = self.data.len();
		while required >= capacity {
			let Some(doubled) = capacity.checked_mul(2) else {
				error!("Could not grow memory stream to fit {} bytes", required);
				self.state.set_error();
				return false;
			};

			capacity = doubled;
		}

		if let Err(reserve_error) = self.data.try_reserve_exact(capacity - self.data.len()) {
			error!("Could not allocate {} bytes for memory stream: {}", capacity, reserve_error);
			self.state.set_error();
			return false;
		}

		debug!("Growing memory stream from {} to {} bytes", self.data.len(), capacity);
		self.data.resize(capacity, 0);

		return true;
	}
}

impl Stream for MemoryWriteStream {
	fn state(&self) -> &StreamState {
		&self.state
	}

	fn vseek(&mut self, position: StreamPosition) {
		if position == SEEK_EOF {
			self.position = self.size;
			return;
		}

		let Ok(position) = usize::try_from(position) else {
			error!("Cannot seek memory stream to {}", position);
			self.state.set_error();
			return;
		};

		let size = self.size.max(position);
		if size >= self.data.len() && !self.grow(size) {
			return;
		}

		self.position = position;
		self.size = size;
	}

	fn vtell(&mut self) -> StreamPosition {
		self.position as StreamPosition
	}
}

impl WriteStream for MemoryWriteStream {
	fn vwrite(&mut self, buffer: &[u8]) {
		let Some(end) = self.position.checked_add(buffer.len()) else {
			error!("Write of {} bytes overflows memory stream", buffer.len());
			self.state.set_error();
			return;
		};

		if end >= self.data.len() && !self.grow(end) {
			return;
		}

		self.data[self.position..end].copy_from_slice(buffer);
		self.position = end;
		self.size = self.size.max(self.position);
	}
}

impl std::io::Write for MemoryWriteStream {
	fn write(&mut self, buffer: &[u8]) -> std::io::Result<usize> {
		WriteStream::write(self, buffer);
		if self.bad() {
			Err(std::io::Error::new(std::io::ErrorKind::OutOfMemory, "memory stream is bad"))
		} else {
			Ok(buffer.len())
		}
	}

	fn flush(&mut self) -> std::io::Result<()> {
		Ok(())
	}
}
