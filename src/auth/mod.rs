pub mod events;
pub mod jwt;
pub mod session;
pub mod store;

pub use events::SessionEvent;
pub use session::Session;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoredSession};
