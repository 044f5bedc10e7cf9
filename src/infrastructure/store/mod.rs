// Store access layer
// One connection and one transaction per call, classified errors out

pub mod gateway;
pub mod id_allocator;

pub use gateway::{ExecReport, StoreGateway};
pub use id_allocator::IdAllocator;
