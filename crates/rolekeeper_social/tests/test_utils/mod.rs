//! Test utilities for engine tests.
//!
//! This module provides in-memory fakes of the platform collaborators.

pub mod fake_platform;

#[allow(unused_imports)]
pub use fake_platform::{
    FakePlatform, RecordingProgress, RecordingResponder, admin, member, moderation_channel,
};
