use crate::{ Stream, StreamError, };

pub type StreamPosition = u64;

const LINE_FEED: u8 = b'\n';
const CARRIAGE_RETURN: u8 = b'\r';

/// Stream that bytes can be read out of. Implementations only provide `vread`, everything else is built on top of it.
pub trait ReadStream: Stream {
	/// Read up to `buffer.len()` bytes from the medium. Short reads must set the EOF and/or error flags.
	fn vread(&mut self, buffer: &mut [u8]) -> usize;

	/// Read up to `buffer.len()` bytes, returning how many were actually read. Fewer bytes are only returned at the end
	/// of the data or after an error, both of which are reported through `eof()`. A bad stream reads nothing.
	fn read(&mut self, buffer: &mut [u8]) -> usize {
		if self.bad() {
			return 0;
		}

		self.vread(buffer)
	}

	/// Reads one byte.
	fn read_u8(&mut self) -> Option<u8> {
		let mut buffer = [0];
		if self.read(&mut buffer) == 1 {
			Some(buffer[0])
		} else {
			None
		}
	}

	/// Reads bytes up to and including the next line feed, and returns them without the line ending. Carriage returns
	/// are dropped wherever they appear, so both `\n` and `\r\n` files split the same way. Returns `None` only if the
	/// stream had no data left at all.
	fn read_line(&mut self) -> Option<Vec<u8>> {
		let mut byte = self.read_u8()?;
		let mut line = Vec::new();
		loop {
			if byte == LINE_FEED {
				break;
			} else if byte != CARRIAGE_RETURN {
				line.push(byte);
			}

			match self.read_u8() {
				Some(next) => byte = next,
				None => break,
			}
		}

		Some(line)
	}

	/// `read_line` for text.
	fn read_line_string(&mut self) -> Result<Option<String>, StreamError> {
		match self.read_line() {
			Some(line) => Ok(Some(String::from_utf8(line)?)),
			None => Ok(None),
		}
	}

	/// Whether the end of the data has been reached. An error also counts as the end of the data.
	fn eof(&self) -> bool {
		self.state().eof() || self.bad()
	}

	fn check_not_eof(&self) -> Result<(), StreamError> {
		if self.state().eof() {
			Err(StreamError::UnexpectedEof)
		} else {
			Ok(())
		}
	}
}
