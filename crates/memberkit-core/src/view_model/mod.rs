//! Profile view model module.
//!
//! - `mode`: `EditMode` (viewing / editing)
//! - `manager`: `ViewModelManager`, the reconciliation state machine
//! - `view`: `ProfileView` snapshot for rendering

mod manager;
mod mode;
mod view;


pub use manager::{
    LoadApplied, LoadTicket, SaveRequest, SaveTicket, TokenApplied, TokenRequest,
    ViewModelManager,
};
pub use mode::EditMode;
pub use view::ProfileView;
