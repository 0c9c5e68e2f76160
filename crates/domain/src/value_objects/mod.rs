//! Value objects - Immutable domain primitives

pub mod chat_user;
pub mod commute_target;
pub mod reminder_time;
pub mod stop_id;
pub mod timezone;

pub use chat_user::{ChatId, ChatIdentity, ChatUserId};
pub use commute_target::CommuteTarget;
pub use reminder_time::ReminderTime;
pub use stop_id::StopId;
pub use timezone::Timezone;
