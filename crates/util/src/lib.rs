//! Core type aliases, traits, and constants for boardroom.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the boardroom workspace.
#![allow(dead_code)]

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Evaluator output and propagated node values. Higher is better.
pub type Score = f64;
/// Planning period index (quarter/month/year, caller-defined unit).
pub type Period = usize;
/// Player position in the fixed state ordering (0 = primary by convention).
pub type PlayerIdx = usize;

// ============================================================================
// TRAITS
// ============================================================================
/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

// ============================================================================
// SEARCH PARAMETERS
// ============================================================================
/// Number of players in a default scenario (one primary, two rivals).
pub const DEFAULT_PLAYERS: usize = 3;
/// Planning horizon in full periods.
pub const DEFAULT_HORIZON_PERIODS: Period = 4;
/// Candidate moves considered per node.
pub const DEFAULT_BRANCHING_LIMIT: usize = 4;
/// Hard ceiling on horizon regardless of request.
pub const MAX_HORIZON_PERIODS: Period = 8;
/// Display label for one period (advisory, echoed to the UI).
pub const TIME_PERIOD_UNIT: &str = "quarter";

/// Cap on materialized tree size. The builder clamps the horizon so the
/// worst-case node count `branching ^ (periods × rotation)` stays under this.
pub const NODE_BUDGET: usize = 1500;

// ============================================================================
// CAPABILITY CALLS
// Move generation, transition, and evaluation may be remote and slow.
// ============================================================================
/// Time box for a single capability call, including retries' individual tries.
pub const CAPABILITY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
/// Additional attempts after the first failed capability call.
pub const CAPABILITY_RETRIES: u32 = 2;
/// Initial backoff before the first retry; doubles per attempt.
pub const RETRY_BACKOFF: std::time::Duration = std::time::Duration::from_millis(250);
/// Whole-request deadline for a build-and-score search.
pub const SEARCH_DEADLINE: std::time::Duration = std::time::Duration::from_secs(120);

// ============================================================================
// SESSIONS
// ============================================================================
/// Idle lifetime of a stored session before a sweep removes it.
pub const SESSION_TTL: std::time::Duration = std::time::Duration::from_secs(1800);
/// Interval between session expiry sweeps.
pub const SESSION_SWEEP: std::time::Duration = std::time::Duration::from_secs(60);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.unwrap();
        println!();
        log::warn!("violent interrupt received, exiting immediately");
        std::process::exit(0);
    });
}
