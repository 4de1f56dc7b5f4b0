pub mod errors;
pub mod events;

pub use errors::{BridgeError, ConfigError, TetherError};
pub use events::{KnownEvent, EVENT_CAMERA, EVENT_CAMERA_ROLL, EVENT_PUSH_NOTIFICATIONS};

pub type Result<T> = std::result::Result<T, TetherError>;
