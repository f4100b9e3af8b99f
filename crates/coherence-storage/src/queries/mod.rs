//! SQL for context records.

pub mod record_crud;
pub mod vector_codec;
