//! Annotation persistence.
//!
//! The store is a single JSON file that is loaded in full at startup and
//! rewritten in full on every change.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hexspace::color::Color;
//! use hexspace::format::AnnotationStore;
//! use hexspace::model::AnnotationRecord;
//!
//! let (mut store, _warning) = AnnotationStore::open("colors.json");
//! let sky = AnnotationRecord::new("Sky", vec!["blue".into(), "sky".into()]);
//! store.set(Color::new(0x12, 0x34, 0x56), sky)?;
//! # Ok::<(), hexspace::format::StoreError>(())
//! ```

mod error;
mod store;

pub use error::StoreError;
pub use store::{AnnotationStore, Records, load_records, save_records, to_json_pretty};
