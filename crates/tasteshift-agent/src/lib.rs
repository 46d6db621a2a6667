//! The tasteshift agent: one themed ordering session over a host menu page.
//!
//! Wires the pieces together. [`session::Session`] owns the reconciler, the
//! voice guide and the playback arbiter; [`enforcement::run_enforcement`]
//! keeps the page customized; [`harness`] turns terminal lines into host
//! events for the headless binary.

pub mod config;
pub mod enforcement;
pub mod error;
pub mod harness;
pub mod overlay;
pub mod panel;
pub mod session;

pub use config::{load_config, Config, ConfigError};
pub use enforcement::{run_enforcement, EnforcementStats};
pub use error::AgentError;
pub use session::{HostEvent, Reaction, Session, VoiceParts};
