//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for the file store's public paths and for localised
//! strings.

pub mod storage;
pub mod translation;
