pub mod cache;

pub use cache::CachedProductStore;
