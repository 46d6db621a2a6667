//! Voice-guided ordering.
//!
//! [`OrderingMachine`] sequences the spoken prompts: protein when the page
//! is first engaged, then each following section as the previous one is
//! chosen, with a one-off fallback when the user skips protein.
//! [`VoiceGuide`] pairs it with prompt texts and voices and produces
//! [`PromptRequest`]s for the playback arbiter.

mod guide;
mod machine;

pub use guide::{PromptRequest, VoiceGuide};
pub use machine::{OrderingMachine, Phase};
