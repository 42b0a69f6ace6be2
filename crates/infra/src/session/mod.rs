//! Implementations of the core session ports

pub mod file;
pub mod memory;
pub mod navigator;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
pub use navigator::WatchNavigator;
