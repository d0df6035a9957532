use std::borrow::Cow;

use crate::memory::MemoryWriteStream;
use crate::stream::SEEK_EOF;
use crate::{ ReadStream, Stream, StreamPosition, StreamState, };

/// Read stream over a fixed region of memory. The region is either borrowed, in which case the borrow checker keeps
/// the owner alive (and unwritten) for as long as the stream exists, or owned by the stream itself.
#[derive(Debug)]
pub struct MemoryReadStream<'a> {
	memory: Cow<'a, [u8]>,
	position: usize,
	state: StreamState,
}

impl<'a> MemoryReadStream<'a> {
	pub fn new(memory: &'a [u8]) -> Self {
		MemoryReadStream {
			memory: Cow::Borrowed(memory),
			position: 0,
			state: StreamState::new(true),
		}
	}

	/// View of everything written to `stream` so far. Later writes are not visible, and cannot happen while the view is
	/// alive anyway.
	pub fn from_write_stream(stream: &'a MemoryWriteStream) -> Self {
		MemoryReadStream::new(stream.memory())
	}

	pub fn len(&self) -> usize {
		self.memory.len()
	}

	pub fn is_empty(&self) -> bool {
		self.memory.is_empty()
	}
}

impl MemoryReadStream<'static> {
	pub fn from_vec(memory: Vec<u8>) -> Self {
		MemoryReadStream {
			memory: Cow::Owned(memory),
			position: 0,
			state: StreamState::new(true),
		}
	}

	pub fn from_string(string: String) -> Self {
		MemoryReadStream::from_vec(string.into_bytes())
	}
}

impl<'a> From<&'a [u8]> for MemoryReadStream<'a> {
	fn from(memory: &'a [u8]) -> Self {
		MemoryReadStream::new(memory)
	}
}

impl<'a> From<&'a MemoryWriteStream> for MemoryReadStream<'a> {
	fn from(stream: &'a MemoryWriteStream) -> Self {
		MemoryReadStream::from_write_stream(stream)
	}
}

impl From<String> for MemoryReadStream<'static> {
	fn from(string: String) -> Self {
		MemoryReadStream::from_string(string)
	}
}

impl From<Vec<u8>> for MemoryReadStream<'static> {
	fn from(memory: Vec<u8>) -> Self {
		MemoryReadStream::from_vec(memory)
	}
}

impl Stream for MemoryReadStream<'_> {
	fn state(&self) -> &StreamState {
		&self.state
	}

	/// Positions past the end clamp to the end.
	fn vseek(&mut self, position: StreamPosition) {
		self.position = if position == SEEK_EOF {
			self.memory.len()
		} else {
			usize::try_from(position).map_or(self.memory.len(), |position| position.min(self.memory.len()))
		};

		self.state.clear_eof();
	}

	fn vtell(&mut self) -> StreamPosition {
		self.position as StreamPosition
	}
}

impl ReadStream for MemoryReadStream<'_> {
	fn vread(&mut self, buffer: &mut [u8]) -> usize {
		let length = buffer.len().min(self.memory.len() - self.position);
		if length > 0 {
			buffer[..length].copy_from_slice(&self.memory[self.position..self.position + length]);
			self.position += length;
		}

		if length < buffer.len() {
			self.state.set_eof();
		}

		return length;
	}
}

impl std::io::Read for MemoryReadStream<'_> {
	fn read(&mut self, buffer: &mut [u8]) -> std::io::Result<usize> {
		Ok(ReadStream::read(self, buffer))
	}
}
