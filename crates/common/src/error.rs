use thiserror::Error;

/// Canonical Lakebed error taxonomy used across crates.
///
/// Classification guidance:
/// - [`LkbError::InvalidConfig`]: count/budget contract violations — a caller
///   bug, never retried
/// - [`LkbError::InvalidFragment`]: fragment metadata that cannot be planned,
///   fatal to the current scan plan
/// - [`LkbError::KeyResolution`]: failures surfaced from a bucket-hash oracle,
///   propagated unchanged
/// - [`LkbError::Io`]: raw filesystem IO failures from std APIs
///
/// Every error here is deterministic for the same inputs; the partition layer
/// performs no IO on its hot paths and has no transient failure mode.
#[derive(Debug, Error)]
pub enum LkbError {
    /// Invalid or inconsistent configuration.
    ///
    /// Examples:
    /// - zero bucket or writer-slot count
    /// - non-positive split byte budget
    /// - negative per-fragment open cost
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fragment metadata rejected by scan planning.
    ///
    /// A negative length means the upstream catalog handed us corrupt
    /// metadata; the whole scan plan is abandoned.
    #[error("invalid fragment: {0}")]
    InvalidFragment(String),

    /// Bucket-hash oracle failure (e.g. a malformed record key).
    ///
    /// Key validity is outside this layer's authority, so the oracle's
    /// message is carried through without local recovery.
    #[error("key resolution failed: {0}")]
    KeyResolution(String),

    /// Transparent std IO failures (configuration loading only).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Standard Lakebed result alias.
pub type Result<T> = std::result::Result<T, LkbError>;
