pub mod reading;
pub mod writing;

pub use reading::U8ReadStream;
pub use writing::U8WriteStream;

/// Number of 15 bit groups a variable length quantity is allowed to span.
const VLQ_GROUPS: u32 = 4;
