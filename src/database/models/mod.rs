//! Record models and their query methods.

pub mod birthday;
pub mod message;

pub use birthday::*;
pub use message::*;
