mod authorship;
mod file;

pub use authorship::Authorship;
pub use file::{File, FileRow, SearchCandidate};
