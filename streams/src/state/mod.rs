/// Flags shared by every stream. `error` and `closed` can only ever be set, `eof` is the one flag a seek is allowed to
/// clear. `seekable` is decided once, when the stream is constructed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StreamState {
	error: bool,
	eof: bool,
	seekable: bool,
	closed: bool,
}

impl StreamState {
	pub fn new(seekable: bool) -> Self {
		StreamState {
			seekable,
			..StreamState::default()
		}
	}

	/// State of a stream whose medium could not be opened. Read streams additionally report end of data.
	pub fn unopened(eof: bool) -> Self {
		StreamState {
			error: true,
			eof,
			seekable: false,
			closed: true,
		}
	}

	pub fn error(&self) -> bool {
		self.error
	}

	pub fn eof(&self) -> bool {
		self.eof
	}

	pub fn seekable(&self) -> bool {
		self.seekable
	}

	pub fn closed(&self) -> bool {
		self.closed
	}

	pub fn set_error(&mut self) {
		self.error = true;
	}

	pub fn set_eof(&mut self) {
		self.eof = true;
	}

	pub fn clear_eof(&mut self) {
		self.eof = false;
	}

	pub fn set_closed(&mut self) {
		self.closed = true;
	}
}
