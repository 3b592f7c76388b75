//! Document store backends and atomic file primitives.

mod atomic_file;
mod dir_store;
mod memory_store;

pub use atomic_file::{AtomicFile, AtomicFileError, FileFormat};
pub use dir_store::DirDocumentStore;
pub use memory_store::MemoryDocumentStore;
