//! Satellite control messages for the Babble voice assistant
//!
//! A satellite is a remote capture/playback device driven by a server. The two
//! sides exchange generic [`WireEvent`]s (a `type` string plus a `data` map);
//! this crate maps those events to and from strongly-typed messages.

pub mod messages;
pub mod wire;

pub use messages::{
    Eventable, MicMuted, MuteAction, MuteMic, RunSatellite, SatelliteMessage, SetVolume,
    StreamingStarted, StreamingStopped, VolumeAdjusted, VolumeRequest,
};
pub use wire::{EventReader, EventWriter, FramingConfig, WireEvent};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SatelliteError {
    #[error("Type mismatch: expected '{expected}', found '{found}'")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("Invalid payload for '{event_type}': {reason}")]
    InvalidPayload { event_type: String, reason: String },

    #[error("Invalid volume: {0}")]
    InvalidVolume(String),

    #[error("Wire event has an empty type")]
    EmptyEventType,

    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    /// `size` is the full line length, line ending excluded
    #[error("Frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for SatelliteError {
    fn from(e: std::io::Error) -> Self {
        SatelliteError::IOError(e.to_string())
    }
}

impl SatelliteError {
    /// Check if this error is recoverable
    ///
    /// A recoverable error concerns a single event; the stream it came from
    /// can keep being read.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Bad events from the peer, skip and carry on
            SatelliteError::TypeMismatch { .. } => true,
            SatelliteError::InvalidPayload { .. } => true,
            SatelliteError::InvalidVolume(_) => true,
            SatelliteError::EmptyEventType => true,
            SatelliteError::MalformedFrame(_) => true,
            // The reader skips the rest of the line
            SatelliteError::FrameTooLarge { .. } => true,
            SatelliteError::IOError(_) => false,
            SatelliteError::ConfigError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            SatelliteError::TypeMismatch { .. } => {
                "Received an unexpected message from the satellite.".to_string()
            }
            SatelliteError::InvalidPayload { .. } => {
                "Received a malformed message from the satellite.".to_string()
            }
            SatelliteError::InvalidVolume(_) => {
                "Volume must be a percentage, optionally prefixed with + or -.".to_string()
            }
            SatelliteError::EmptyEventType => {
                "Received a message without a type.".to_string()
            }
            SatelliteError::MalformedFrame(_) => {
                "Satellite connection sent unreadable data.".to_string()
            }
            SatelliteError::FrameTooLarge { .. } => {
                "Satellite connection sent an oversized message.".to_string()
            }
            SatelliteError::IOError(_) => {
                "Satellite connection error. Please check the device.".to_string()
            }
            SatelliteError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SatelliteError>;
