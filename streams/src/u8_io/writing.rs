use crate::WriteStream;
use super::VLQ_GROUPS;

/// Binary primitives on top of any write stream. Failures end up in the stream's error flag, like every other write.
pub trait U8WriteStream {
	/// Writes two bytes in little-endian format.
	fn write_u16(&mut self, number: u16);

	/// Writes four bytes in little-endian format.
	fn write_u32(&mut self, number: u32);

	/// Writes eight bytes in little-endian format.
	fn write_u64(&mut self, number: u64);

	/// Writes a variable length quantity integer. The 16th bit in a 2 byte pair represents if the number has another two
	/// bytes. 1 if there are, 0 if there aren't. Integers within the range of `0..2**60` are supported, higher bits are
	/// dropped.
	fn write_vlq(&mut self, number: u64);

	/// Strings are length encoded, with a variable length integer representing the length in bytes.
	fn write_string(&mut self, string: &str);
}

impl<T: WriteStream + ?Sized> U8WriteStream for T {
	fn write_u16(&mut self, number: u16) {
		self.write(&number.to_le_bytes());
	}

	fn write_u32(&mut self, number: u32) {
		self.write(&number.to_le_bytes());
	}

	fn write_u64(&mut self, number: u64) {
		self.write(&number.to_le_bytes());
	}

	fn write_vlq(&mut self, number: u64) {
		let mut shift = number;
		for group in 1..=VLQ_GROUPS {
			let number = if shift >> 15 != 0 && group < VLQ_GROUPS {
				(shift as u16 & 0x7FFF) | 0x8000
			} else {
				shift as u16 & 0x7FFF
			};

			self.write_u16(number);

			shift >>= 15;

			if number & 0x8000 == 0 {
				break;
			}
		}
	}

	fn write_string(&mut self, string: &str) {
		self.write_vlq(string.len() as u64);
		self.write_str(string);
	}
}
