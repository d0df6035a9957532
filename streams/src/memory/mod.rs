pub mod read;
pub mod write;

pub use read::MemoryReadStream;
pub use write::DEFAULT_CAPACITY;
pub use write::MemoryWriteStream;
