//! Typed satellite control messages
//!
//! Each message kind implements [`Eventable`] to map itself to and from a
//! [`WireEvent`]. Incoming events should be classified through
//! [`SatelliteMessage::from_wire_event`] rather than decoded blind.

pub mod dispatch;
pub mod types;

pub use dispatch::SatelliteMessage;
pub use types::{
    MicMuted, MuteAction, MuteMic, RunSatellite, SetVolume, StreamingStarted, StreamingStopped,
    VolumeAdjusted, VolumeRequest,
};

use crate::wire::WireEvent;
use crate::{Result, SatelliteError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Conversion between a typed message and its generic wire event
///
/// Implementors only name their discriminator; the payload mapping comes from
/// their serde representation. Absent optional fields are skipped on output and
/// read back as absent, so a missing key is never a decode error.
///
/// Implementors must serialize to a JSON object, i.e. a struct with named
/// fields (`struct RunSatellite {}` rather than `struct RunSatellite;`). Any
/// other shape has no place in `data` and is encoded as an event without a
/// payload, with a warning.
pub trait Eventable: Serialize + DeserializeOwned {
    /// Discriminator carried in the wire event's `type`
    const EVENT_TYPE: &'static str;

    /// Whether `event_type` names this message kind
    fn is_type(event_type: &str) -> bool {
        event_type == Self::EVENT_TYPE
    }

    fn to_wire_event(&self) -> WireEvent {
        match serde_json::to_value(self) {
            Ok(Value::Object(data)) => WireEvent::with_data(Self::EVENT_TYPE, data),
            Ok(other) => {
                warn!(
                    "{} serialized to a non-object payload: {}",
                    Self::EVENT_TYPE,
                    other
                );
                WireEvent::new(Self::EVENT_TYPE)
            }
            Err(e) => {
                warn!("Failed to serialize {}: {}", Self::EVENT_TYPE, e);
                WireEvent::new(Self::EVENT_TYPE)
            }
        }
    }

    /// Decode from `event`, which must carry this kind's discriminator
    fn from_wire_event(event: &WireEvent) -> Result<Self> {
        if !Self::is_type(event.event_type()) {
            return Err(SatelliteError::TypeMismatch {
                expected: Self::EVENT_TYPE,
                found: event.event_type().to_string(),
            });
        }

        serde_json::from_value(Value::Object(event.data().clone())).map_err(|e| {
            SatelliteError::InvalidPayload {
                event_type: Self::EVENT_TYPE.to_string(),
                reason: e.to_string(),
            }
        })
    }
}
