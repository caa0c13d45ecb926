mod field_handler;

pub use field_handler::*;
