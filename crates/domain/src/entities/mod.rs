//! Domain entities

pub mod stop;
pub mod trip;
pub mod user_preference;

pub use stop::{Coordinates, Stop, StopRef};
pub use trip::{Leg, ServiceAlert, StopCall, Trip};
pub use user_preference::UserPreference;
