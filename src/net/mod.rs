//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig (host, PORT)
//!     → listener.rs (bind once, fatal on failure)
//!     → ServerHandle → HTTP server
//!
//! Listener ready
//!     → interfaces.rs (enumerate, pick first external IPv4)
//!     → readiness report
//! ```

pub mod interfaces;
pub mod listener;

pub use interfaces::{select_lan_address, AddressFamily, NetworkInterfaceRecord};
pub use listener::{ListenerBindError, ServerHandle};
