// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod dataset;
pub mod email;
pub mod entity;

pub use dataset::{DatasetRow, EmailRow, EmailTable};
pub use email::ParsedEmail;
pub use entity::{EntityType, RecognizerResult};
