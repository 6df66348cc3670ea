mod read_op;
pub mod schema;
pub mod view;

pub use read_op::SlotReadable;
pub use schema::SlotSchema;
pub use view::{RecordBuf, RecordBufMut};

#[cfg(test)]
mod tests;
