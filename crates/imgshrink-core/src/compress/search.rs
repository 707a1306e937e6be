//! Bounded bisection over encoder quality.
//!
//! # Algorithm
//!
//! Quality starts at 0.5. Each iteration encodes once and estimates the
//! byte size from the data URL length. Too large moves quality down by
//! `0.5^(iteration+1)`, too small moves it up by the same step, inside the
//! band stops. The step halves every time, and canvas quality has a
//! granularity of 0.01, so 7 iterations (2^7 = 128 > 100) reach every
//! distinguishable quality.
//!
//! If the 7th encode is still out of band, the answer is whichever of the
//! current, last too-small and last too-large candidates has the estimate
//! closest to the target.

use log::debug;

use super::CompressError;
use crate::decode::RasterSurface;
use crate::encode::{canvas_to_data_url, EncodeError, ImageType};

/// Bytes per data URL character. Base64 packs 3 bytes into 4 characters;
/// the header is small enough to ignore.
pub const SIZE_PER_CHAR: f64 = 0.75;

/// Encode budget per search.
pub const MAX_ITERATIONS: u32 = 7;

pub const INITIAL_QUALITY: f64 = 0.5;

/// Estimate the binary size behind a data URL without decoding it.
pub fn estimate_size(data_url: &str) -> f64 {
    data_url.len() as f64 * SIZE_PER_CHAR
}

/// Tolerance band in bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBand {
    pub min: f64,
    pub target: f64,
    pub max: f64,
}

impl SizeBand {
    /// Band for a target of `size_kb` KB at the given accuracy.
    pub fn new(size_kb: f64, accuracy: f64) -> Self {
        let target = size_kb * 1024.0;
        Self {
            min: target * accuracy,
            target,
            max: target * (2.0 - accuracy),
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, size: f64) -> bool {
        size >= self.min && size <= self.max
    }
}

/// Something that can re-encode the same image at a given quality and
/// return the data URL.
pub trait QualityEncoder {
    fn encode(&mut self, quality: f64) -> Result<String, EncodeError>;
}

impl<F> QualityEncoder for F
where
    F: FnMut(f64) -> Result<String, EncodeError>,
{
    fn encode(&mut self, quality: f64) -> Result<String, EncodeError> {
        self(quality)
    }
}

/// Encodes a fixed canvas, counting calls.
#[derive(Debug)]
pub struct CanvasEncoder<'a> {
    canvas: &'a RasterSurface,
    image_type: ImageType,
    calls: u32,
}

impl<'a> CanvasEncoder<'a> {
    pub fn new(canvas: &'a RasterSurface, image_type: ImageType) -> Self {
        Self {
            canvas,
            image_type,
            calls: 0,
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl QualityEncoder for CanvasEncoder<'_> {
    fn encode(&mut self, quality: f64) -> Result<String, EncodeError> {
        self.calls += 1;
        canvas_to_data_url(self.canvas, quality, self.image_type)
    }
}

/// One encoded probe.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub data_url: String,
    pub quality: f64,
    pub estimated_size: f64,
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub candidate: Candidate,
    /// Number of encodes performed (1-7).
    pub iterations: u32,
    /// Whether the chosen candidate's estimate is inside the band.
    pub in_band: bool,
}

#[derive(Debug)]
struct SearchState {
    quality: f64,
    iteration: u32,
    /// Last candidate estimated below the band.
    low_candidate: Option<Candidate>,
    /// Last candidate estimated above the band.
    high_candidate: Option<Candidate>,
}

impl SearchState {
    fn new() -> Self {
        Self {
            quality: INITIAL_QUALITY,
            iteration: 0,
            low_candidate: None,
            high_candidate: None,
        }
    }

    fn step(&self) -> f64 {
        0.5f64.powi(self.iteration as i32 + 1)
    }

    /// Pick the candidate closest to `target`, preferring `current` on ties.
    fn closest(&mut self, current: Candidate, target: f64) -> Candidate {
        let distance = |c: &Candidate| (c.estimated_size - target).abs();
        [self.low_candidate.take(), self.high_candidate.take()]
            .into_iter()
            .flatten()
            .fold(current, |best, c| {
                if distance(&c) < distance(&best) {
                    c
                } else {
                    best
                }
            })
    }
}

/// Search for a quality whose estimated size falls inside `band`.
///
/// Performs at most [`MAX_ITERATIONS`] encodes. An out-of-band outcome
/// always means the budget was exhausted.
///
/// # Errors
///
/// Encoder failures are propagated. `CompressError::NoCandidate` is a guard
/// that the loop structure never reaches.
pub fn search_quality<E>(encoder: &mut E, band: &SizeBand) -> Result<SearchOutcome, CompressError>
where
    E: QualityEncoder + ?Sized,
{
    let mut state = SearchState::new();
    let mut chosen = None;

    while state.iteration < MAX_ITERATIONS {
        state.iteration += 1;

        let data_url = encoder.encode(state.quality)?;
        let candidate = Candidate {
            estimated_size: estimate_size(&data_url),
            quality: state.quality,
            data_url,
        };
        debug!(
            "search iteration {}: quality {:.4} -> ~{:.0} bytes (band {:.0}..={:.0})",
            state.iteration, candidate.quality, candidate.estimated_size, band.min, band.max
        );

        if band.contains(candidate.estimated_size) {
            chosen = Some(candidate);
            break;
        }

        if state.iteration == MAX_ITERATIONS {
            chosen = Some(state.closest(candidate, band.target));
            break;
        }

        let step = state.step();
        if candidate.estimated_size > band.max {
            state.high_candidate = Some(candidate);
            state.quality -= step;
        } else {
            state.low_candidate = Some(candidate);
            state.quality += step;
        }
    }

    let candidate = chosen.ok_or(CompressError::NoCandidate)?;
    Ok(SearchOutcome {
        in_band: band.contains(candidate.estimated_size),
        iterations: state.iteration,
        candidate,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: leaving the band implies the budget was used up, and the
        /// budget is never exceeded.
        #[test]
        fn prop_band_violation_implies_full_budget(
            slope in 1_000.0f64..2_000_000.0,
            offset in 0.0f64..50_000.0,
            size_kb in 1.0f64..1_000.0,
            accuracy in 0.8f64..=0.99,
        ) {
            let band = SizeBand::new(size_kb, accuracy);
            let mut calls = 0u32;
            let mut encoder = |q: f64| -> Result<String, EncodeError> {
                calls += 1;
                Ok("x".repeat(((q * slope + offset) / SIZE_PER_CHAR) as usize))
            };

            let outcome = search_quality(&mut encoder, &band).unwrap();

            prop_assert!(calls <= MAX_ITERATIONS);
            prop_assert_eq!(calls, outcome.iterations);
            if !outcome.in_band {
                prop_assert_eq!(outcome.iterations, MAX_ITERATIONS);
            }
        }

        /// Property: quality stays strictly inside (0, 1).
        #[test]
        fn prop_quality_stays_in_unit_range(sizes in prop::collection::vec(0.0f64..500_000.0, 7)) {
            let band = SizeBand::new(100.0, 0.95);
            let mut index = 0;
            let mut encoder = |q: f64| -> Result<String, EncodeError> {
                assert!(q > 0.0 && q < 1.0, "quality {} out of range", q);
                let size = sizes[index % sizes.len()];
                index += 1;
                Ok("x".repeat((size / SIZE_PER_CHAR) as usize))
            };

            prop_assert!(search_quality(&mut encoder, &band).is_ok());
        }
    }
}
