//! Dataplex catalog: entry types
//!
//! An entry type declares which aspects every entry of that type must carry.
//! Required aspects cannot be changed after creation, so the builder insists
//! on at least one.

pub mod handler;
pub mod model;
pub mod params;

pub use handler::{CatalogHandler, create_entry_type_and_wait};
pub use model::{AspectInfo, EntryType};
pub use params::{CreateEntryTypeParams, CreateEntryTypeRequest, GENERIC_ASPECT_TYPE};
