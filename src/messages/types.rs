use super::Eventable;
use crate::{Result, SatelliteError};
use serde::{Deserialize, Serialize};

pub const RUN_SATELLITE_TYPE: &str = "run-satellite";
pub const STREAMING_STARTED_TYPE: &str = "streaming-started";
pub const STREAMING_STOPPED_TYPE: &str = "streaming-stopped";
pub const SET_VOLUME_TYPE: &str = "set-volume";
pub const VOLUME_ADJUSTED_TYPE: &str = "volume-adjusted";
pub const MUTE_MIC_TYPE: &str = "mute-mic";
pub const MIC_MUTED_TYPE: &str = "mic-muted";

/// Tell the satellite to start running
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSatellite {}

impl Eventable for RunSatellite {
    const EVENT_TYPE: &'static str = RUN_SATELLITE_TYPE;
}

/// Satellite has started streaming audio to the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingStarted {}

impl Eventable for StreamingStarted {
    const EVENT_TYPE: &'static str = STREAMING_STARTED_TYPE;
}

/// Satellite has stopped streaming audio to the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingStopped {}

impl Eventable for StreamingStopped {
    const EVENT_TYPE: &'static str = STREAMING_STOPPED_TYPE;
}

/// How a [`SetVolume`] request should be carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeRequest {
    /// Report the current volume without changing it
    Query,
    /// Change the volume by this many percentage points
    Adjust(i32),
    /// Set the volume to an absolute percentage (0-100)
    Set(u8),
}

impl VolumeRequest {
    /// Resulting volume when applied to `current`, clamped to 0-100
    pub fn apply(self, current: u8) -> u8 {
        match self {
            VolumeRequest::Query => current.min(100),
            VolumeRequest::Adjust(delta) => {
                i32::from(current).saturating_add(delta).clamp(0, 100) as u8
            }
            VolumeRequest::Set(level) => level.min(100),
        }
    }
}

impl std::fmt::Display for VolumeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolumeRequest::Query => write!(f, "Query"),
            VolumeRequest::Adjust(delta) => write!(f, "Adjust({delta:+})"),
            VolumeRequest::Set(level) => write!(f, "Set({level}%)"),
        }
    }
}

/// Request to increase, decrease or set the absolute volume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetVolume {
    /// Volume in percent. A leading `+` or `-` adjusts, anything else sets the
    /// absolute value, and no value asks for the current volume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
}

impl SetVolume {
    /// Ask for the current volume
    pub fn query() -> Self {
        Self::default()
    }

    /// Set an absolute volume, clamped to 100
    pub fn set(level: u8) -> Self {
        Self {
            volume: Some(level.min(100).to_string()),
        }
    }

    /// Adjust relative to the current volume
    pub fn adjust(delta: i32) -> Self {
        Self {
            volume: Some(format!("{delta:+}")),
        }
    }

    /// Interpret the raw `volume` field
    pub fn request(&self) -> Result<VolumeRequest> {
        let Some(raw) = self.volume.as_deref() else {
            return Ok(VolumeRequest::Query);
        };

        let value = strip_percent(raw);
        if let Some(magnitude) = value.strip_prefix('+') {
            parse_magnitude(magnitude, raw).map(VolumeRequest::Adjust)
        } else if let Some(magnitude) = value.strip_prefix('-') {
            parse_magnitude(magnitude, raw).map(|n| VolumeRequest::Adjust(-n))
        } else {
            parse_percent(value, raw).map(VolumeRequest::Set)
        }
    }
}

impl Eventable for SetVolume {
    const EVENT_TYPE: &'static str = SET_VOLUME_TYPE;
}

/// Response to a [`SetVolume`] request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeAdjusted {
    /// Absolute volume in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
}

impl VolumeAdjusted {
    pub fn new(level: u8) -> Self {
        Self {
            volume: Some(level.min(100).to_string()),
        }
    }

    /// Parsed volume, `None` when the satellite did not report one
    pub fn level(&self) -> Result<Option<u8>> {
        self.volume
            .as_deref()
            .map(|raw| parse_percent(strip_percent(raw), raw))
            .transpose()
    }
}

impl Eventable for VolumeAdjusted {
    const EVENT_TYPE: &'static str = VOLUME_ADJUSTED_TYPE;
}

fn strip_percent(raw: &str) -> &str {
    let value = raw.trim();
    value.strip_suffix('%').unwrap_or(value).trim_end()
}

fn parse_percent(digits: &str, raw: &str) -> Result<u8> {
    parse_magnitude(digits, raw)?
        .try_into()
        .ok()
        .filter(|n: &u8| *n <= 100)
        .ok_or_else(|| SatelliteError::InvalidVolume(raw.to_string()))
}

/// Unsigned decimal; relative adjustments are not bounded to 100, `apply` clamps
fn parse_magnitude(digits: &str, raw: &str) -> Result<i32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SatelliteError::InvalidVolume(raw.to_string()));
    }
    digits
        .parse::<i32>()
        .map_err(|_| SatelliteError::InvalidVolume(raw.to_string()))
}

/// How a [`MuteMic`] request should be carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteAction {
    /// Flip the current mute state
    Toggle,
    /// Force the mute state
    Set(bool),
}

impl MuteAction {
    /// Resulting mute state given the `current` one
    pub fn apply(self, current: bool) -> bool {
        match self {
            MuteAction::Toggle => !current,
            MuteAction::Set(mute) => mute,
        }
    }
}

impl std::fmt::Display for MuteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MuteAction::Toggle => write!(f, "Toggle"),
            MuteAction::Set(true) => write!(f, "Mute"),
            MuteAction::Set(false) => write!(f, "Unmute"),
        }
    }
}

/// Request to mute or unmute the microphone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuteMic {
    /// Mute state to apply; no value toggles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mute: Option<bool>,
}

impl MuteMic {
    pub fn toggle() -> Self {
        Self::default()
    }

    pub fn set(mute: bool) -> Self {
        Self { mute: Some(mute) }
    }

    pub fn action(&self) -> MuteAction {
        match self.mute {
            Some(mute) => MuteAction::Set(mute),
            None => MuteAction::Toggle,
        }
    }
}

impl Eventable for MuteMic {
    const EVENT_TYPE: &'static str = MUTE_MIC_TYPE;
}

/// Response to a [`MuteMic`] request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicMuted {
    /// Current microphone mute state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mute: Option<bool>,
}

impl MicMuted {
    pub fn new(mute: bool) -> Self {
        Self { mute: Some(mute) }
    }
}

impl Eventable for MicMuted {
    const EVENT_TYPE: &'static str = MIC_MUTED_TYPE;
}
