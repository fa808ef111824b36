//! Per-edge ignition probability
//!
//! A burning source cell attempts to ignite each flammable, unburned neighbour
//! once per hour. The chance of success for that edge is
//!
//! ```text
//! wind_factor = max(0, u·di + v·dj) / (|(u, v)| + ε)
//! prob        = base × (1 + wind_factor) × (1 + slope[neighbour])
//! ```
//!
//! where `(u, v)` is the SOURCE cell's wind vector and `(di, dj)` the
//! unnormalised row/column offset toward the neighbour. Downwind neighbours get
//! up to double the base chance (more along diagonals), upwind and crosswind
//! neighbours get no wind bonus. A fully sloped neighbour doubles it again.
//!
//! # Unclamped probabilities
//!
//! `prob` is deliberately left unclamped and may exceed 1 (at most
//! `4 × base` for a straight offset with full slope). Draws are uniform in
//! `[0, 1)`, so any edge with `prob >= 1` ignites on every draw. See
//! [`CLAMP_PROBABILITY`].

use nalgebra::Vector2;

/// Small constant added to wind speed so calm cells do not divide by zero
pub const WIND_EPSILON: f32 = 1e-6;

/// Default base ignition probability per edge per hour
pub const DEFAULT_IGNITION_PROB_BASE: f32 = 0.3;

/// Whether [`ignition_probability`] caps its result at 1.0
///
/// Draws lie in `[0, 1)`, so capping only changes the reported value, never
/// which edges ignite.
pub const CLAMP_PROBABILITY: bool = false;

/// Wind alignment toward a neighbour, normalised by wind speed
///
/// Zero for calm air or when the neighbour lies upwind or exactly crosswind.
#[inline]
pub fn wind_factor(wind: Vector2<f32>, di: i32, dj: i32) -> f32 {
    let offset = Vector2::new(di as f32, dj as f32);
    let alignment = wind.dot(&offset);
    alignment.max(0.0) / (wind.x.hypot(wind.y) + WIND_EPSILON)
}

/// Probability that one source cell ignites one candidate neighbour
///
/// # Arguments
///
/// * `base` - Base ignition probability (caller-configured, in (0, 1])
/// * `wind_factor` - Result of [`wind_factor`] for this edge
/// * `slope` - Normalised slope of the neighbour cell
#[inline]
pub fn ignition_probability(base: f32, wind_factor: f32, slope: f32) -> f32 {
    let prob = base * (1.0 + wind_factor) * (1.0 + slope);
    if CLAMP_PROBABILITY {
        prob.min(1.0)
    } else {
        prob
    }
}
