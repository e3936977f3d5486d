//! Profile domain module.
//!
//! # Module Structure
//!
//! - `field`: editable field keys and their wire/view names
//! - `model`: `RawProfile`, `ProfileRecord` and the write payload
//! - `store`: `ProfileStore` trait

mod field;
mod model;
mod store;

pub use field::ProfileField;
pub use model::{DraftProfile, ProfilePayload, ProfileRecord, RawProfile};
pub use store::ProfileStore;
