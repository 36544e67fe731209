//! REST wire model, ISO-8601 durations, and the domain ⇄ wire converters.

pub mod convert;
pub mod duration;
pub mod rest;

pub use convert::ConversionError;
pub use duration::DurationError;
pub use rest::RestJobBase;
