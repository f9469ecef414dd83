// Ground truth: the verified-entries store and its on-disk document.
// Nothing here calls the LLM; entries only arrive through explicit approval.

pub mod handlers;
pub mod persist;
pub mod store;

pub use persist::{JsonEntryFile, PersistError};
pub use store::GroundTruthStore;
