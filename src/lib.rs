pub mod allocator;
pub mod inventory;
pub mod render;
pub mod summary;
pub mod types;
pub mod units;
