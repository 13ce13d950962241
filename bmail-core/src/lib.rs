//! BMail Core
//!
//! Mailbox engine shared by the API server and the command line client:
//! the email store, thread grouping, folder views, counts and the
//! star/read/move mutations.
//!
//! # Architecture
//!
//! - **Wire types**: request/response shapes live in the `shared-types` crate
//! - **Store**: `EmailStore` is the flat source of truth; threads and counts
//!   are derived from it on every read
//! - **Backends**: `EmailBackend` is implemented in-process
//!   (`InMemoryBackend`) and over HTTP (`HttpBackend`)
//! - **Session**: `MailSession` holds view state and writes through a
//!   `MutationEngine`
//!
//! # Example
//!
//! ```rust,ignore
//! use bmail_core::{InMemoryBackend, MailSession, SystemClock};
//!
//! let clock = Arc::new(SystemClock);
//! let backend = InMemoryBackend::seeded(clock.as_ref(), settings.clone());
//! let mut session = MailSession::new(Arc::new(backend), owner, settings, clock);
//! session.load().await;
//! let threads = session.visible_threads();
//! ```

pub mod backend;
pub mod error;
pub mod filter;
pub mod model;
pub mod mutation;
pub mod seed;
pub mod session;
pub mod store;
pub mod threads;
pub mod time;
pub mod transform;
pub mod view;

#[cfg(test)]
mod testing;

pub use backend::{EmailBackend, HttpBackend, InMemoryBackend};
pub use error::{MailError, Result};
pub use model::{Email, Sender, Thread};
pub use mutation::{BatchOutcome, MutationEngine, StarOutcome, ViewContext, ViewSignal};
pub use session::{LoadSource, MailSession};
pub use store::EmailStore;
pub use threads::group_threads;
pub use time::{Clock, FixedClock, SystemClock};

// Re-export the wire vocabulary for convenience
pub use shared_types::{AccountOwner, Folder, FolderSelector, MailSettings};
