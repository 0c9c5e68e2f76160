//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod chat_transport;
mod preference_store;
mod selection_store;
mod transit_port;

#[cfg(test)]
pub use chat_transport::MockChatTransport;
pub use chat_transport::{ChatTransport, IncomingUpdate, OutgoingMessage, ReplyOption};
#[cfg(test)]
pub use preference_store::MockPreferenceStore;
pub use preference_store::PreferenceStore;
#[cfg(test)]
pub use selection_store::MockSelectionStore;
pub use selection_store::{PendingSelection, SelectionPayload, SelectionStore};
#[cfg(test)]
pub use transit_port::MockTransitPort;
pub use transit_port::TransitPort;
