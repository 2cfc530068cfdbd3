//! Read-only aggregate views over a set of trends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::trend::{TrendRecord, TrendStatus};

/// Per-category statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
  pub category:      String,
  pub count:         usize,
  pub rising_count:  usize,
  pub mean_velocity: f64,
  pub max_velocity:  f64,
  /// `rising_count / count * 100`, rounded to one decimal.
  pub rising_pct:    f64,
}

/// Dashboard headline metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
  pub total:         usize,
  /// `None` when there are no trends.
  pub mean_velocity: Option<f64>,
  pub rising_count:  usize,
  /// Name of the highest-velocity trend; the first one wins ties.
  pub top_trend:     Option<String>,
}

#[derive(Default)]
struct Group {
  count:  usize,
  rising: usize,
  sum:    f64,
  max:    f64,
}

/// Group `trends` by category, ordered by category name. Only categories
/// present in `trends` appear, so no group is ever empty.
pub fn aggregate_by_category(trends: &[TrendRecord]) -> Vec<CategorySummary> {
  let mut groups: BTreeMap<&str, Group> = BTreeMap::new();
  for trend in trends {
    let group = groups.entry(trend.category.as_str()).or_insert_with(|| Group {
      max: f64::NEG_INFINITY,
      ..Group::default()
    });
    group.count += 1;
    group.sum += trend.velocity;
    group.max = group.max.max(trend.velocity);
    if trend.status == TrendStatus::Rising {
      group.rising += 1;
    }
  }

  groups
    .into_iter()
    .map(|(category, g)| CategorySummary {
      category:      category.to_owned(),
      count:         g.count,
      rising_count:  g.rising,
      mean_velocity: g.sum / g.count as f64,
      max_velocity:  g.max,
      rising_pct:    round1(g.rising as f64 / g.count as f64 * 100.0),
    })
    .collect()
}

pub fn overview(trends: &[TrendRecord]) -> Overview {
  let total = trends.len();
  let mean_velocity =
    (total > 0).then(|| trends.iter().map(|t| t.velocity).sum::<f64>() / total as f64);
  let rising_count = trends
    .iter()
    .filter(|t| t.status == TrendStatus::Rising)
    .count();
  let top_trend = trends
    .iter()
    .reduce(|best, t| if t.velocity > best.velocity { t } else { best })
    .map(|t| t.name.clone());

  Overview { total, mean_velocity, rising_count, top_trend }
}

fn round1(value: f64) -> f64 { (value * 10.0).round() / 10.0 }
