//! Synthetic velocity projection for the detail view.
//!
//! This is demo data, not a forecast. The "past" series is a pseudo-random
//! walk seeded from the trend name and current velocity, ending at the
//! current velocity; the "future" series is a least-squares line through it.
//! The same inputs always produce the same output.

use rand::{Rng as _, SeedableRng as _, rngs::StdRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

const MIN_VELOCITY: f64 = 0.0;
const MAX_VELOCITY: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
  /// Days relative to today: negative in the past, `0` today, positive ahead.
  pub day:      i64,
  pub velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
  /// Always `true`; lets API consumers label the chart as illustrative.
  pub synthetic: bool,
  pub past:      Vec<ProjectionPoint>,
  pub future:    Vec<ProjectionPoint>,
}

fn rng_for(name: &str, velocity: f64) -> StdRng {
  let mut hasher = Sha256::new();
  hasher.update(name.as_bytes());
  hasher.update(velocity.to_le_bytes());
  StdRng::from_seed(hasher.finalize().into())
}

fn clamp(v: f64) -> f64 { v.clamp(MIN_VELOCITY, MAX_VELOCITY) }

/// Build `past_days` points ending today and `future_days` extrapolated
/// points after it.
pub fn synthetic(
  name: &str,
  current_velocity: f64,
  past_days: usize,
  future_days: usize,
) -> Projection {
  let mut rng = rng_for(name, current_velocity);

  // Walk backwards from today so the series ends exactly at the current value.
  let mut values = Vec::with_capacity(past_days);
  let mut v = clamp(current_velocity);
  for _ in 0..past_days {
    values.push(v);
    v = clamp(v - rng.gen_range(-0.3..0.5));
  }
  values.reverse();

  let past: Vec<ProjectionPoint> = values
    .into_iter()
    .enumerate()
    .map(|(i, velocity)| ProjectionPoint { day: i as i64 - (past_days as i64 - 1), velocity })
    .collect();

  let (slope, intercept) = fit_line(&past).unwrap_or((0.0, clamp(current_velocity)));
  let future = (1..=future_days as i64)
    .map(|day| ProjectionPoint { day, velocity: clamp(intercept + slope * day as f64) })
    .collect();

  Projection { synthetic: true, past, future }
}

/// Ordinary least squares over `(day, velocity)`; `None` with fewer than two
/// points.
fn fit_line(points: &[ProjectionPoint]) -> Option<(f64, f64)> {
  if points.len() < 2 {
    return None;
  }
  let n = points.len() as f64;
  let mean_x = points.iter().map(|p| p.day as f64).sum::<f64>() / n;
  let mean_y = points.iter().map(|p| p.velocity).sum::<f64>() / n;
  let (num, den) = points.iter().fold((0.0, 0.0), |(num, den), p| {
    let dx = p.day as f64 - mean_x;
    (num + dx * (p.velocity - mean_y), den + dx * dx)
  });
  let slope = num / den;
  Some((slope, mean_y - slope * mean_x))
}
