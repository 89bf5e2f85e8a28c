//! Module store: the local index behind the module tier

pub mod manifest;
pub mod store;
pub mod sync;

pub use manifest::{ingest_dir, ModuleManifest};
pub use store::{ModuleRecord, ModuleStore};
pub use sync::ModuleSync;
