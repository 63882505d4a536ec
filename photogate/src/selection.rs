//! Photo selection from a page of search results
//!
//! A seed maps to a fixed page and an offset within that page, so the same
//! seed picks the same photo for as long as the upstream result set is
//! stable. Without a seed an index is drawn at random.

use rand::Rng;
use serde::Serialize;

/// Results requested per search page
pub const PER_PAGE: u64 = 30;

/// Width/height ratio below which a request is treated as portrait
pub const PORTRAIT_RATIO: f64 = 0.75;

/// Orientation filter passed to the search call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    /// Derive the orientation from the requested box.
    ///
    /// Only a request carrying both dimensions can be portrait.
    pub fn for_dimensions(width: Option<u32>, height: Option<u32>) -> Self {
        match (width, height) {
            (Some(w), Some(h)) if (w as f64) / (h as f64) < PORTRAIT_RATIO => {
                Orientation::Portrait
            }
            _ => Orientation::Landscape,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
        }
    }
}

/// Search page holding the given seed (1-based)
pub fn page_for_seed(seed: u64) -> u64 {
    seed / PER_PAGE + 1
}

/// Position of the seed within its page, in `0..PER_PAGE`.
///
/// Equal to `PER_PAGE - (page * PER_PAGE - seed)`, rearranged so the
/// subtraction cannot overflow for seeds near `u64::MAX`.
pub fn local_index(seed: u64) -> u64 {
    let page = page_for_seed(seed);
    seed - (page - 1) * PER_PAGE
}

/// Index picked for a seed from a page holding `len` results.
///
/// Offsets past the end of a short page land on the last result.
pub fn seeded_index(seed: u64, len: usize) -> usize {
    debug_assert!(len > 0);
    let last = len.saturating_sub(1);
    let local = local_index(seed) as usize;
    if local > last {
        last
    } else {
        local
    }
}

/// Index picked without a seed from a page holding `len` results.
///
/// Draws from `1..=len - 1`; the first result is never chosen. A page with a
/// single result has nothing past index 0, so that result is returned.
pub fn random_index<R: Rng>(len: usize, rng: &mut R) -> usize {
    debug_assert!(len > 0);
    let last = len.saturating_sub(1);
    let drawn = (rng.random::<f64>() * last as f64).floor() as usize + 1;
    drawn.min(last)
}

/// Pick the result index for an optional seed
pub fn select_index<R: Rng>(seed: Option<u64>, len: usize, rng: &mut R) -> usize {
    match seed {
        Some(seed) => seeded_index(seed, len),
        None => random_index(len, rng),
    }
}
