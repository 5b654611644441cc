//! Marker types distinguishing [`DateTimeOf`] moments of an entity.
//!
//! [`DateTimeOf`]: crate::DateTimeOf

/// Moment an entity was created at.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Moment an entity was last modified at.
#[derive(Clone, Copy, Debug)]
pub struct Modification;

/// Moment derived counters of an entity were last recomputed at.
#[derive(Clone, Copy, Debug)]
pub struct Refresh;
