//! Client side of the explorer
//!
//! Talks to the proxy, keeps one user's view state and projects it for display.

pub mod forecast;
pub mod geolocation;
pub mod proxy;
pub mod render;
pub mod session;
pub mod state;
pub mod units;

pub use geolocation::{AcquiredLocation, GeolocationError, LocationProvider, StaticLocation};
pub use proxy::ProxyClient;
pub use render::{WeatherCardView, render_text, share_message};
pub use session::ExplorerSession;
pub use state::{Event, SlotId, Tab, ViewState};
pub use units::TemperatureUnit;
