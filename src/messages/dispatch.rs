//! Closed set of satellite messages with discriminator dispatch

use super::types::{
    MicMuted, MuteMic, RunSatellite, SetVolume, StreamingStarted, StreamingStopped,
    VolumeAdjusted, MIC_MUTED_TYPE, MUTE_MIC_TYPE, RUN_SATELLITE_TYPE, SET_VOLUME_TYPE,
    STREAMING_STARTED_TYPE, STREAMING_STOPPED_TYPE, VOLUME_ADJUSTED_TYPE,
};
use super::Eventable;
use crate::wire::WireEvent;
use crate::Result;
use tracing::debug;

/// Any satellite control message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatelliteMessage {
    RunSatellite(RunSatellite),
    StreamingStarted(StreamingStarted),
    StreamingStopped(StreamingStopped),
    SetVolume(SetVolume),
    VolumeAdjusted(VolumeAdjusted),
    MuteMic(MuteMic),
    MicMuted(MicMuted),
}

impl SatelliteMessage {
    /// Every discriminator owned by this catalog
    pub const EVENT_TYPES: [&'static str; 7] = [
        RUN_SATELLITE_TYPE,
        STREAMING_STARTED_TYPE,
        STREAMING_STOPPED_TYPE,
        SET_VOLUME_TYPE,
        VOLUME_ADJUSTED_TYPE,
        MUTE_MIC_TYPE,
        MIC_MUTED_TYPE,
    ];

    pub fn is_satellite_type(event_type: &str) -> bool {
        Self::EVENT_TYPES.iter().any(|t| *t == event_type)
    }

    /// Classify and decode `event`
    ///
    /// Returns `Ok(None)` for discriminators that belong to the rest of the
    /// protocol (audio, transcripts, ...). Errors only on a malformed payload.
    pub fn from_wire_event(event: &WireEvent) -> Result<Option<Self>> {
        let message = match event.event_type() {
            RUN_SATELLITE_TYPE => Self::RunSatellite(RunSatellite::from_wire_event(event)?),
            STREAMING_STARTED_TYPE => {
                Self::StreamingStarted(StreamingStarted::from_wire_event(event)?)
            }
            STREAMING_STOPPED_TYPE => {
                Self::StreamingStopped(StreamingStopped::from_wire_event(event)?)
            }
            SET_VOLUME_TYPE => Self::SetVolume(SetVolume::from_wire_event(event)?),
            VOLUME_ADJUSTED_TYPE => Self::VolumeAdjusted(VolumeAdjusted::from_wire_event(event)?),
            MUTE_MIC_TYPE => Self::MuteMic(MuteMic::from_wire_event(event)?),
            MIC_MUTED_TYPE => Self::MicMuted(MicMuted::from_wire_event(event)?),
            _ => return Ok(None),
        };

        debug!("Decoded satellite message: {:?}", message);
        Ok(Some(message))
    }

    pub fn to_wire_event(&self) -> WireEvent {
        match self {
            Self::RunSatellite(m) => m.to_wire_event(),
            Self::StreamingStarted(m) => m.to_wire_event(),
            Self::StreamingStopped(m) => m.to_wire_event(),
            Self::SetVolume(m) => m.to_wire_event(),
            Self::VolumeAdjusted(m) => m.to_wire_event(),
            Self::MuteMic(m) => m.to_wire_event(),
            Self::MicMuted(m) => m.to_wire_event(),
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RunSatellite(_) => RUN_SATELLITE_TYPE,
            Self::StreamingStarted(_) => STREAMING_STARTED_TYPE,
            Self::StreamingStopped(_) => STREAMING_STOPPED_TYPE,
            Self::SetVolume(_) => SET_VOLUME_TYPE,
            Self::VolumeAdjusted(_) => VOLUME_ADJUSTED_TYPE,
            Self::MuteMic(_) => MUTE_MIC_TYPE,
            Self::MicMuted(_) => MIC_MUTED_TYPE,
        }
    }

    /// Whether this message is sent by the server to the satellite
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Self::RunSatellite(_) | Self::SetVolume(_) | Self::MuteMic(_)
        )
    }

    /// Discriminator of the message the satellite answers with, if any
    pub fn response_type(&self) -> Option<&'static str> {
        match self {
            Self::SetVolume(_) => Some(VOLUME_ADJUSTED_TYPE),
            Self::MuteMic(_) => Some(MIC_MUTED_TYPE),
            _ => None,
        }
    }
}

impl std::fmt::Display for SatelliteMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event_type())
    }
}

impl From<RunSatellite> for SatelliteMessage {
    fn from(m: RunSatellite) -> Self {
        Self::RunSatellite(m)
    }
}

impl From<StreamingStarted> for SatelliteMessage {
    fn from(m: StreamingStarted) -> Self {
        Self::StreamingStarted(m)
    }
}

impl From<StreamingStopped> for SatelliteMessage {
    fn from(m: StreamingStopped) -> Self {
        Self::StreamingStopped(m)
    }
}

impl From<SetVolume> for SatelliteMessage {
    fn from(m: SetVolume) -> Self {
        Self::SetVolume(m)
    }
}

impl From<VolumeAdjusted> for SatelliteMessage {
    fn from(m: VolumeAdjusted) -> Self {
        Self::VolumeAdjusted(m)
    }
}

impl From<MuteMic> for SatelliteMessage {
    fn from(m: MuteMic) -> Self {
        Self::MuteMic(m)
    }
}

impl From<MicMuted> for SatelliteMessage {
    fn from(m: MicMuted) -> Self {
        Self::MicMuted(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SatelliteError;
    use serde_json::json;

    fn event(value: serde_json::Value) -> WireEvent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_event_types_are_unique() {
        for (i, a) in SatelliteMessage::EVENT_TYPES.iter().enumerate() {
            for b in &SatelliteMessage::EVENT_TYPES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_event_type_matches_wire_event() {
        let messages: Vec<SatelliteMessage> = vec![
            RunSatellite::default().into(),
            StreamingStarted::default().into(),
            StreamingStopped::default().into(),
            SetVolume::set(10).into(),
            VolumeAdjusted::new(10).into(),
            MuteMic::toggle().into(),
            MicMuted::new(true).into(),
        ];

        for message in messages {
            assert_eq!(message.to_wire_event().event_type(), message.event_type());
            assert_eq!(message.to_string(), message.event_type());
        }
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        let result = SatelliteMessage::from_wire_event(&WireEvent::new("audio-chunk"));

        assert_eq!(result, Ok(None));
        assert!(!SatelliteMessage::is_satellite_type("audio-chunk"));
    }

    #[test]
    fn test_malformed_payload_surfaces() {
        let err = SatelliteMessage::from_wire_event(&event(
            json!({"type": "mute-mic", "data": {"mute": "yes"}}),
        ))
        .unwrap_err();

        assert!(matches!(
            err,
            SatelliteError::InvalidPayload { ref event_type, .. } if event_type == "mute-mic"
        ));
    }

    #[test]
    fn test_request_and_response_pairs() {
        let set_volume = SatelliteMessage::from(SetVolume::query());
        let mute = SatelliteMessage::from(MuteMic::toggle());
        let started = SatelliteMessage::from(StreamingStarted::default());

        assert!(set_volume.is_request());
        assert_eq!(set_volume.response_type(), Some("volume-adjusted"));
        assert_eq!(mute.response_type(), Some("mic-muted"));
        assert!(SatelliteMessage::from(RunSatellite::default()).is_request());
        assert!(!started.is_request());
        assert_eq!(started.response_type(), None);
        assert!(!SatelliteMessage::from(MicMuted::new(false)).is_request());
    }
}
