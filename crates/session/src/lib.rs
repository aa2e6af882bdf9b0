//! # Session
//!
//! Session-level orchestration: turns a [`SessionBlueprint`] and its input
//! files into one [`SyncedSession`].
//!
//! Responsibilities:
//! - Resolve the trigger time (pre-selected or detected from audio)
//! - Rebase the trigger onto the recording's device epoch via the video
//!   stream and align the EEG stream against it
//! - Parse and align the simulator log pair against its reference event
//! - Tag every failure with the pipeline stage it occurred in
//!
//! [`SessionBlueprint`]: contracts::SessionBlueprint
//! [`SyncedSession`]: contracts::SyncedSession

mod source;
mod synchronizer;

pub use source::JsonRecordingSource;
pub use synchronizer::SessionSynchronizer;
