use crate::Stream;

/// Stream that bytes can be written into. Implementations only provide `vwrite`.
pub trait WriteStream: Stream {
	/// Write all of `buffer` to the medium, setting the error flag if it cannot take every byte.
	fn vwrite(&mut self, buffer: &[u8]);

	/// Writes every byte in `buffer`. A bad stream silently drops the write.
	fn write(&mut self, buffer: &[u8]) {
		if self.bad() {
			return;
		}

		self.vwrite(buffer);
	}

	/// Writes one byte.
	fn write_u8(&mut self, byte: u8) {
		self.write(&[byte]);
	}

	fn write_str(&mut self, text: &str) {
		self.write(text.as_bytes());
	}

	/// Writes `text` followed by a line feed. No carriage return is ever emitted.
	fn write_line(&mut self, text: &str) {
		self.write_str(text);
		self.write_u8(b'\n');
	}
}
