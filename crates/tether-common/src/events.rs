//! Well-known event names shared by the page and the native host.
//!
//! The protocol does not restrict event names to this set; these are the
//! capabilities every host is expected to understand.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Open the device photo library.
pub const EVENT_CAMERA_ROLL: &str = "cameraRoll";
/// Open the device camera.
pub const EVENT_CAMERA: &str = "camera";
/// Push notification registration and delivery.
pub const EVENT_PUSH_NOTIFICATIONS: &str = "pushNotifications";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownEvent {
    #[serde(rename = "cameraRoll")]
    CameraRoll,
    #[serde(rename = "camera")]
    Camera,
    #[serde(rename = "pushNotifications")]
    PushNotifications,
}

impl KnownEvent {
    pub const ALL: [KnownEvent; 3] = [
        KnownEvent::CameraRoll,
        KnownEvent::Camera,
        KnownEvent::PushNotifications,
    ];

    /// Wire name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownEvent::CameraRoll => EVENT_CAMERA_ROLL,
            KnownEvent::Camera => EVENT_CAMERA,
            KnownEvent::PushNotifications => EVENT_PUSH_NOTIFICATIONS,
        }
    }
}

impl fmt::Display for KnownEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnownEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnownEvent::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("unknown event: {s}"))
    }
}
