//! Deterministic marker placement.
//!
//! The data API does not return tract centroids, so markers are spread
//! around the region centre by an offset derived from the GEOID. The hash
//! is the first eight bytes of SHA-256 read big-endian, which is stable
//! across runs, platforms, and toolchains.

use sha2::{Digest as _, Sha256};

const LAT_MODULUS: u64 = 1_000;
const LON_MODULUS: u64 = 1_400;
const SPREAD: f64 = 1_200.0;

/// Stable 64-bit hash of a GEOID.
#[must_use]
pub fn stable_hash(geoid: &str) -> u64 {
    let digest = Sha256::digest(geoid.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// `(lat, lon)` offsets in degrees for a GEOID.
///
/// Latitude offsets fall in `[-500, 499] / 1200`, longitude offsets in
/// `[-700, 699] / 1200`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn jitter_offsets(geoid: &str) -> (f64, f64) {
    let h = stable_hash(geoid);
    let lat = ((h % LAT_MODULUS) as f64 - (LAT_MODULUS / 2) as f64) / SPREAD;
    let lon = ((h % LON_MODULUS) as f64 - (LON_MODULUS / 2) as f64) / SPREAD;
    (lat, lon)
}
