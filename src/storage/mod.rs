pub mod memory;

pub use memory::AdStore;
