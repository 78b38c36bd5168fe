//! Domain models for the dharitri system.

mod alert;
mod cattle;
mod event;
mod fields;

pub use alert::*;
pub use cattle::*;
pub use event::*;
pub use fields::*;
