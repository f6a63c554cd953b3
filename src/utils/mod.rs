//! Small shared helpers: input validation and structured logging.

pub mod logging;
pub mod validation;
