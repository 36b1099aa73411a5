//! Generic wire events and their line-delimited JSON framing
//!
//! Every message on a satellite connection travels as a [`WireEvent`]: a
//! discriminator string plus an untyped `data` map. The typed view of those
//! events lives in [`crate::messages`].

pub mod config;
pub mod event;
pub mod framing;

pub use config::FramingConfig;
pub use event::WireEvent;
pub use framing::{EventReader, EventWriter};
