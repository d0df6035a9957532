pub mod config;
pub mod error;
pub mod file_stream;
pub mod memory;
pub mod read_stream;
pub mod state;
pub mod stream;
pub mod u8_io;
pub mod write_stream;

pub use config::StreamConfig;
pub use error::StreamError;
pub use file_stream::FileReadStream;
pub use file_stream::FileWriteStream;
pub use memory::MemoryReadStream;
pub use memory::MemoryWriteStream;
pub use read_stream::ReadStream;
pub use read_stream::StreamPosition;
pub use state::StreamState;
pub use stream::SEEK_EOF;
pub use stream::Stream;
pub use write_stream::WriteStream;
