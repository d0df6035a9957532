use std::string::FromUtf8Error;

use thiserror::Error;

/// Failures that are returned to the caller instead of being recorded in a stream's flags. I/O conditions (short reads,
/// failed opens, allocation failures) never show up here, they are reported through `bad()` and `eof()`.
#[derive(Debug, Error)]
pub enum StreamError {
	#[error("stream is not seekable")]
	NotSeekable,
	#[error("unexpected end of stream")]
	UnexpectedEof,
	#[error("string of length {0} is shorter than allowed")]
	StringTooShort(u64),
	#[error("string of length {0} is longer than allowed")]
	StringTooLong(u64),
	#[error("could not decode utf8: {0}")]
	FromUtf8(#[from] FromUtf8Error),
}
