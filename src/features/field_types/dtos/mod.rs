mod field_dto;

pub use field_dto::{FieldOptionsQuery, ResolveFieldQuery};
