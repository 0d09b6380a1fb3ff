//! Data models for the Slack directory service.
//!
//! Member fields keep the upstream snake_case names; service-side types use camelCase.

mod member;
mod view;

pub use member::*;
pub use view::*;
