use std::fs::File;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use std::path::Path;

use tracing::{ debug, error, trace, warn, };

use crate::stream::SEEK_EOF;
use crate::{ ReadStream, Stream, StreamPosition, StreamState, WriteStream, };

/// A file is seekable if we can both ask for its position and rewind it. Pipes and some devices fail at least one of
/// the two.
fn probe_seekable(file: &mut File) -> bool {
	let seekable = file.stream_position().is_ok() && file.seek(SeekFrom::Start(0)).is_ok();
	trace!("Probed file seekability: {}", seekable);
	return seekable;
}

fn seek_target(position: StreamPosition) -> SeekFrom {
	if position == SEEK_EOF {
		SeekFrom::End(0)
	} else {
		SeekFrom::Start(position)
	}
}

/// Reads bytes out of a file. A file that could not be opened still produces a stream, just one that is closed, bad
/// and at its end.
#[derive(Debug)]
pub struct FileReadStream {
	file: Option<File>,
	/// Used when the OS cannot tell us where we are.
	position: StreamPosition,
	state: StreamState,
}

impl FileReadStream {
	pub fn new<P: AsRef<Path>>(file_name: P) -> Self {
		let file_name = file_name.as_ref();
		match OpenOptions::new().read(true).open(file_name) {
			Ok(file) => FileReadStream::from_file(file),
			Err(open_error) => {
				warn!("Could not open file read stream {}: {}", file_name.display(), open_error);
				FileReadStream {
					file: None,
					position: 0,
					state: StreamState::unopened(true),
				}
			},
		}
	}

	/// Wraps an already open file. Seekable files are rewound to their start.
	pub fn from_file(mut file: File) -> Self {
		let seekable = probe_seekable(&mut file);
		FileReadStream {
			file: Some(file),
			position: 0,
			state: StreamState::new(seekable),
		}
	}

	/// Releases the file handle. Closing an already closed stream does nothing.
	pub fn close(&mut self) {
		if self.file.take().is_some() {
			debug!("Closed file read stream");
		}

		self.state.set_closed();
	}
}

impl Drop for FileReadStream {
	fn drop(&mut self) {
		if !self.closed() {
			self.close();
		}
	}
}

impl Stream for FileReadStream {
	fn state(&self) -> &StreamState {
		&self.state
	}

	fn vseek(&mut self, position: StreamPosition) {
		let Some(file) = self.file.as_mut() else {
			self.state.set_error();
			return;
		};

		match file.seek(seek_target(position)) {
			Ok(new_position) => {
				self.position = new_position;
				self.state.clear_eof();
			},
			Err(seek_error) => {
				error!("Could not seek file read stream to {}: {}", position, seek_error);
				self.state.set_error();
			},
		}
	}

	fn vtell(&mut self) -> StreamPosition {
		self.file
			.as_mut()
			.and_then(|file| file.stream_position().ok())
			.unwrap_or(self.position)
	}
}

impl ReadStream for FileReadStream {
	fn vread(&mut self, buffer: &mut [u8]) -> usize {
		let Some(file) = self.file.as_mut() else {
			self.state.set_error();
			return 0;
		};

		let mut total = 0;
		while total < buffer.len() {
			match file.read(&mut buffer[total..]) {
				Ok(0) => {
					self.state.set_eof();
					break;
				},
				Ok(read) => total += read,
				Err(read_error) if read_error.kind() == ErrorKind::Interrupted => continue,
				Err(read_error) => {
					error!("Could not read from file: {}", read_error);
					self.state.set_error();
					break;
				},
			}
		}

		self.position += total as StreamPosition;
		return total;
	}
}

/// std::io::Read implementation so we can pass the read stream to things expecting a std reader
impl Read for FileReadStream {
	fn read(&mut self, buffer: &mut [u8]) -> std::io::Result<usize> {
		let length = ReadStream::read(self, buffer);
		if length == 0 && self.bad() {
			Err(std::io::Error::new(ErrorKind::Other, "file read stream is bad"))
		} else {
			Ok(length)
		}
	}
}

/// Writes bytes into a file, truncating it first. A file that could not be opened still produces a stream, just one
/// that is closed and bad.
#[derive(Debug)]
pub struct FileWriteStream {
	file: Option<File>,
	position: StreamPosition,
	state: StreamState,
}

impl FileWriteStream {
	pub fn new<P: AsRef<Path>>(file_name: P) -> Self {
		let file_name = file_name.as_ref();
		match OpenOptions::new().write(true).create(true).truncate(true).open(file_name) {
			Ok(file) => FileWriteStream::from_file(file),
			Err(open_error) => {
				warn!("Could not open file write stream {}: {}", file_name.display(), open_error);
				FileWriteStream {
					file: None,
					position: 0,
					state: StreamState::unopened(false),
				}
			},
		}
	}

	/// Wraps an already open file. Seekable files are rewound to their start.
	pub fn from_file(mut file: File) -> Self {
		let seekable = probe_seekable(&mut file);
		FileWriteStream {
			file: Some(file),
			position: 0,
			state: StreamState::new(seekable),
		}
	}

	/// Releases the file handle. Closing an already closed stream does nothing.
	pub fn close(&mut self) {
		if self.file.take().is_some() {
			debug!("Closed file write stream");
		}

		self.state.set_closed();
	}
}

impl Drop for FileWriteStream {
	fn drop(&mut self) {
		if !self.closed() {
			self.close();
		}
	}
}

impl Stream for FileWriteStream {
	fn state(&self) -> &StreamState {
		&self.state
	}

	fn vseek(&mut self, position: StreamPosition) {
		let Some(file) = self.file.as_mut() else {
			self.state.set_error();
			return;
		};

		match file.seek(seek_target(position)) {
			Ok(new_position) => self.position = new_position,
			Err(seek_error) => {
				error!("Could not seek file write stream to {}: {}", position, seek_error);
				self.state.set_error();
			},
		}
	}

	fn vtell(&mut self) -> StreamPosition {
		self.file
			.as_mut()
			.and_then(|file| file.stream_position().ok())
			.unwrap_or(self.position)
	}
}

impl WriteStream for FileWriteStream {
	fn vwrite(&mut self, buffer: &[u8]) {
		let Some(file) = self.file.as_mut() else {
			self.state.set_error();
			return;
		};

		let mut total = 0;
		while total < buffer.len() {
			match file.write(&buffer[total..]) {
				Ok(0) => {
					error!("File accepted none of the remaining {} bytes", buffer.len() - total);
					self.state.set_error();
					break;
				},
				Ok(written) => total += written,
				Err(write_error) if write_error.kind() == ErrorKind::Interrupted => continue,
				Err(write_error) => {
					error!("Could not write to file: {}", write_error);
					self.state.set_error();
					break;
				},
			}
		}

		self.position += total as StreamPosition;
	}
}

/// std::io::Write implementation so we can pass the write stream to things expecting a std writer
impl Write for FileWriteStream {
	fn write(&mut self, buffer: &[u8]) -> std::io::Result<usize> {
		WriteStream::write(self, buffer);
		if self.bad() {
			Err(std::io::Error::new(ErrorKind::Other, "file write stream is bad"))
		} else {
			Ok(buffer.len())
		}
	}

	fn flush(&mut self) -> std::io::Result<()> {
		match self.file.as_mut() {
			Some(file) => file.flush(),
			None => Ok(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::fs::File;

	use tempfile::tempdir;

	use super::{ FileReadStream, FileWriteStream, };
	use crate::stream::SEEK_EOF;
	use crate::{ ReadStream, Stream, StreamError, WriteStream, };

	#[test]
	fn write_then_read() {
		let directory = tempdir().expect("Could not create temporary directory");
		let path = directory.path().join("lines.txt");

		let mut output = FileWriteStream::new(&path);
		assert!(!output.bad());
		assert!(output.seekable());
		output.write_line("first");
		output.write_str("second");
		assert_eq!(output.tell(), 12);
		output.close();
		assert!(output.closed());

		let mut input = FileReadStream::new(&path);
		assert!(input.seekable());
		assert_eq!(input.read_line(), Some(b"first".to_vec()));
		assert_eq!(input.read_line(), Some(b"second".to_vec()));
		assert!(input.eof());
		assert!(!input.bad());
		assert_eq!(input.read_line(), None);
	}

	#[test]
	fn seek_clears_eof() {
		let directory = tempdir().expect("Could not create temporary directory");
		let path = directory.path().join("data.bin");
		std::fs::write(&path, b"0123456789").expect("Could not write test file");

		let mut input = FileReadStream::new(&path);
		let mut buffer = [0; 16];
		assert_eq!(input.read(&mut buffer), 10);
		assert!(input.eof());

		input.seek(4).expect("Could not seek");
		assert!(!input.eof());
		assert_eq!(input.tell(), 4);
		assert_eq!(input.read_u8(), Some(b'4'));

		input.seek(SEEK_EOF).expect("Could not seek");
		assert_eq!(input.tell(), 10);
	}

	#[test]
	fn seek_overwrites_in_place() {
		let directory = tempdir().expect("Could not create temporary directory");
		let path = directory.path().join("patched.bin");

		let mut output = FileWriteStream::new(&path);
		output.write_str("hello world");
		output.seek(0).expect("Could not seek");
		output.write_str("J");
		output.seek(SEEK_EOF).expect("Could not seek");
		output.write_u8(b'!');
		drop(output);

		assert_eq!(std::fs::read(&path).expect("Could not read test file"), b"Jello world!");
	}

	#[test]
	fn missing_file_is_unusable() {
		let directory = tempdir().expect("Could not create temporary directory");
		let mut input = FileReadStream::new(directory.path().join("missing.txt"));
		assert!(input.bad());
		assert!(input.eof());
		assert!(input.closed());
		assert!(!input.seekable());

		let mut buffer = [0; 4];
		assert_eq!(input.read(&mut buffer), 0);
		assert_eq!(input.read_line(), None);
		assert!(matches!(input.seek(0), Err(StreamError::NotSeekable)));
	}

	#[test]
	fn missing_directory_makes_writes_no_ops() {
		let directory = tempdir().expect("Could not create temporary directory");
		let mut output = FileWriteStream::new(directory.path().join("nowhere").join("out.txt"));
		assert!(output.bad());
		assert!(output.closed());

		output.write_line("ignored");
		output.write(&[1, 2, 3]);
		assert_eq!(output.tell(), 0);
		assert!(output.bad());
	}

	#[test]
	fn reading_after_close_fails() {
		let directory = tempdir().expect("Could not create temporary directory");
		let path = directory.path().join("closed.txt");
		std::fs::write(&path, b"data").expect("Could not write test file");

		let mut input = FileReadStream::new(&path);
		input.close();
		input.close();
		assert!(input.closed());
		assert_eq!(input.read_u8(), None);
		assert!(input.bad());
		assert!(input.eof());
	}

	#[test]
	fn from_file_rewinds() {
		let directory = tempdir().expect("Could not create temporary directory");
		let path = directory.path().join("rewind.txt");
		std::fs::write(&path, b"abc").expect("Could not write test file");

		let mut file = File::open(&path).expect("Could not open test file");
		std::io::Read::read_exact(&mut file, &mut [0; 2]).expect("Could not read test file");

		let mut input = FileReadStream::from_file(file);
		assert_eq!(input.tell(), 0);
		assert_eq!(input.read_u8(), Some(b'a'));
	}

	#[cfg(unix)]
	#[test]
	fn pipe_is_not_seekable() {
		use std::os::fd::OwnedFd;
		use std::process::{ Command, Stdio, };

		let mut child = Command::new("sh")
			.arg("-c")
			.arg("printf 'one\\r\\ntwo'")
			.stdout(Stdio::piped())
			.spawn()
			.expect("Could not spawn shell");
		let stdout = child.stdout.take().expect("Could not take child stdout");

		let mut input = FileReadStream::from_file(File::from(OwnedFd::from(stdout)));
		assert!(!input.seekable());
		assert_eq!(input.read_line(), Some(b"one".to_vec()));
		assert_eq!(input.tell(), 5);

		assert!(matches!(input.seek(0), Err(StreamError::NotSeekable)));
		assert_eq!(input.tell(), 5);

		assert_eq!(input.read_line(), Some(b"two".to_vec()));
		assert!(input.eof());
		assert!(matches!(input.seek(0), Err(StreamError::NotSeekable)));
		assert!(input.eof());
		assert_eq!(input.read_line(), None);

		child.wait().expect("Could not wait for shell");
	}

	#[test]
	fn std_round_trip() {
		let directory = tempdir().expect("Could not create temporary directory");
		let path = directory.path().join("std.txt");

		let mut output = FileWriteStream::new(&path);
		std::io::Write::write_all(&mut output, "written through std".as_bytes()).expect("Could not write");
		std::io::Write::flush(&mut output).expect("Could not flush");
		drop(output);

		let mut input = FileReadStream::new(&path);
		let mut text = String::new();
		std::io::Read::read_to_string(&mut input, &mut text).expect("Could not read");
		assert_eq!(text, "written through std");
		assert!(input.eof());
	}

	#[test]
	fn std_adapters_report_bad_streams() {
		let directory = tempdir().expect("Could not create temporary directory");

		let mut output = FileWriteStream::new(directory.path().join("nowhere").join("out.txt"));
		assert!(std::io::Write::write(&mut output, b"data").is_err());
		assert!(std::io::Write::flush(&mut output).is_ok());

		let mut input = FileReadStream::new(directory.path().join("missing.txt"));
		let mut buffer = [0; 4];
		assert!(std::io::Read::read(&mut input, &mut buffer).is_err());
	}
}
