pub mod entry;

pub use entry::VerifiedEntry;
