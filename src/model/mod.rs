//! Data models for the Hex Space application.

mod annotation;

pub use annotation::{AnnotationRecord, parse_tags};
