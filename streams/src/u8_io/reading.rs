use crate::{ ReadStream, StreamError, };
use super::VLQ_GROUPS;

/// Largest block `read_vector` allocates before the bytes for it have been read.
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Fills `buffer` completely, failing if the stream runs out first.
fn read_exact<S: ReadStream + ?Sized>(stream: &mut S, buffer: &mut [u8]) -> Result<(), StreamError> {
	if stream.read(buffer) == buffer.len() {
		Ok(())
	} else {
		Err(StreamError::UnexpectedEof)
	}
}

fn read_array<S: ReadStream + ?Sized, const BYTES: usize>(stream: &mut S) -> Result<[u8; BYTES], StreamError> {
	let mut buffer = [0; BYTES];
	read_exact(stream, &mut buffer)?;
	Ok(buffer)
}

/// Binary primitives on top of any read stream. Every read either consumes the whole primitive or fails with
/// `StreamError::UnexpectedEof`.
pub trait U8ReadStream {
	/// Reads two bytes in little-endian format.
	fn read_u16(&mut self) -> Result<u16, StreamError>;

	/// Reads four bytes in little-endian format.
	fn read_u32(&mut self) -> Result<u32, StreamError>;

	/// Reads eight bytes in little-endian format.
	fn read_u64(&mut self) -> Result<u64, StreamError>;

	/// Reads a variable length quantity integer. The 16th bit in a 2 byte pair represents if the number has another two
	/// bytes. 1 if there are, 0 if there aren't. Integers within the range of `0..2**60` are supported.
	fn read_vlq(&mut self) -> Result<u64, StreamError>;

	/// Reads exactly `length` bytes.
	fn read_vector(&mut self, length: usize) -> Result<Vec<u8>, StreamError>;

	/// Strings are length encoded, with a variable length integer representing the length in bytes.
	fn read_string(&mut self) -> Result<String, StreamError>;

	/// Like `read_string`, but the length is tested before the contents are read. If the length is out of bounds the
	/// contents are left in the stream.
	fn read_string_safe(&mut self, minimum_length: u64, maximum_length: u64) -> Result<String, StreamError>;
}

impl<T: ReadStream + ?Sized> U8ReadStream for T {
	fn read_u16(&mut self) -> Result<u16, StreamError> {
		Ok(u16::from_le_bytes(read_array(self)?))
	}

	fn read_u32(&mut self) -> Result<u32, StreamError> {
		Ok(u32::from_le_bytes(read_array(self)?))
	}

	fn read_u64(&mut self) -> Result<u64, StreamError> {
		Ok(u64::from_le_bytes(read_array(self)?))
	}

	fn read_vlq(&mut self) -> Result<u64, StreamError> {
		let mut number = 0;
		let mut groups = 0;
		loop {
			let bytes = self.read_u16()?;
			number |= (bytes as u64 & 0x7FFF) << (groups * 15);
			groups += 1;

			if bytes & 0x8000 == 0 || groups >= VLQ_GROUPS {
				break;
			}
		}

		return Ok(number);
	}

	fn read_vector(&mut self, length: usize) -> Result<Vec<u8>, StreamError> {
		// lengths usually come from the stream itself, so only allocate what has actually been read
		let mut buffer = Vec::new();
		while buffer.len() < length {
			let start = buffer.len();
			buffer.resize(start + (length - start).min(READ_CHUNK_SIZE), 0);
			read_exact(self, &mut buffer[start..])?;
		}

		return Ok(buffer);
	}

	fn read_string(&mut self) -> Result<String, StreamError> {
		let length = self.read_vlq()?;
		let length = usize::try_from(length).map_err(|_| StreamError::StringTooLong(length))?;
		Ok(String::from_utf8(self.read_vector(length)?)?)
	}

	fn read_string_safe(&mut self, minimum_length: u64, maximum_length: u64) -> Result<String, StreamError> {
		let length = self.read_vlq()?;

		if length < minimum_length {
			return Err(StreamError::StringTooShort(length));
		} else if length > maximum_length {
			return Err(StreamError::StringTooLong(length));
		}

		let length = usize::try_from(length).map_err(|_| StreamError::StringTooLong(length))?;
		Ok(String::from_utf8(self.read_vector(length)?)?)
	}
}
