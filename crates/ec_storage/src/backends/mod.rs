pub mod memory;
pub mod weaviate;

pub use memory::MemoryStorage;
pub use weaviate::WeaviateStorage;
