pub mod browser;
pub mod config;
pub mod directory;
pub mod filter;
pub mod intake;
pub mod media;
pub mod overlay;
pub mod selection;

pub use browser::{PlayError, UserBrowser};
pub use config::{BrowserConfig, ConfigError};
pub use directory::Directory;
pub use intake::{IntakeForm, IntakeSink, IntakeSinkError, LoggingIntakeSink};
pub use media::{MediaError, MediaProbe};
pub use overlay::{MediaLoadState, VideoOverlay, VideoRequest, VIDEO_LOAD_ERROR_MESSAGE};
pub use selection::Selection;
