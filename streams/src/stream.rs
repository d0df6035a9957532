use crate::{ StreamError, StreamPosition, StreamState, };

/// Seeking to this position moves the stream to the end of its data instead of to a literal offset.
pub const SEEK_EOF: StreamPosition = StreamPosition::MAX;

/// Things common to all streams. Implementations provide the state accessors along with `vseek`/`vtell`, and get the
/// flag queries and the seekability check for free.
pub trait Stream {
	fn state(&self) -> &StreamState;

	/// Medium specific seek. Only ever called by `seek` once the stream is known to be seekable.
	fn vseek(&mut self, position: StreamPosition);

	/// Medium specific position query.
	fn vtell(&mut self) -> StreamPosition;

	/// Move the stream to `position`. Fails without touching the stream if it is not seekable.
	fn seek(&mut self, position: StreamPosition) -> Result<(), StreamError> {
		if !self.seekable() {
			return Err(StreamError::NotSeekable);
		}

		self.vseek(position);
		Ok(())
	}

	fn tell(&mut self) -> StreamPosition {
		self.vtell()
	}

	/// Whether an I/O error has been recorded. Never cleared once set.
	fn bad(&self) -> bool {
		self.state().error()
	}

	fn seekable(&self) -> bool {
		self.state().seekable()
	}

	fn closed(&self) -> bool {
		self.state().closed()
	}
}
