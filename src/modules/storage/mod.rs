//! Storage module for file management
//!
//! Turns the URLs stored on file records into paths clients can fetch.

mod public_storage;

pub use public_storage::{PublicPath, PublicStorage};
