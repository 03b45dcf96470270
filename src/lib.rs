#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod numeric;
pub mod hash;
pub mod rng;
pub mod seed;
pub mod types;
pub mod params;
pub mod cache;
pub mod instance;

// Re-exports: stable minimal API surface for external callers
pub use crate::cache::{advance_node, Cache};
pub use crate::error::{Error, Result};
pub use crate::hash::{pseudohash, pseudohash_at, pseudohash_from};
pub use crate::instance::{Instance, MAX_RESAMPLE};
pub use crate::numeric::{fract, round13};
pub use crate::params::InstParams;
pub use crate::rng::LuaRandom;
pub use crate::seed::Seed;
pub use crate::types::{pick_weighted, Item, ItemSet, WeightedItem};
