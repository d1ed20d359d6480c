//! Dataset + configuration → [`DrawPlan`]. Pure; no drawing happens here.

use crate::encoding::{self, LEGEND_ORDER, LEGEND_TITLE};
use crate::models::{ChartConfig, Dataset, Record, X_MIN};
use std::collections::{HashMap, HashSet};

use super::types::{DrawPlan, Legend, LegendEntry, PointGroup};

/// Spacing between x ticks.
pub const TICK_STEP: f64 = 0.5;
/// First x tick.
pub const FIRST_TICK: f64 = 1.0;

/// Distinct tracks, reversed first-appearance order.
///
/// The categorical axis stacks its first entry at the bottom, so reversing puts the
/// first track of the file at the top of the chart.
pub fn category_order<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut order: Vec<String> = Vec::new();
    for r in records {
        if seen.insert(r.track.as_str()) {
            order.push(r.track.clone());
        }
    }
    order.reverse();
    order
}

/// Ticks every 0.5 from 1.0 up to and including `x_max`, rounded to one decimal.
///
/// The 0.01 slack keeps an aligned `x_max` inclusive despite float drift; an
/// unaligned `x_max` gets no tick of its own.
pub fn x_ticks(x_max: f64) -> Vec<f64> {
    if !x_max.is_finite() {
        return Vec::new();
    }
    let stop = x_max + 0.01;
    let mut ticks = Vec::new();
    let mut k = 0u32;
    loop {
        let t = FIRST_TICK + TICK_STEP * f64::from(k);
        if t >= stop {
            break;
        }
        ticks.push((t * 10.0).round() / 10.0);
        k += 1;
    }
    ticks
}

/// Legend entries: fixed order, filtered by presence in the data.
///
/// Outcomes outside the fixed table are still plotted but get no entry.
pub fn legend_entries(dataset: &Dataset) -> Vec<LegendEntry> {
    let mut listed: HashSet<&str> = HashSet::new();
    let mut unlisted: Vec<&str> = Vec::new();
    for r in dataset.iter() {
        let outcome = r.outcome.as_str();
        if encoding::is_known(outcome) {
            listed.insert(outcome);
        } else if !unlisted.contains(&outcome) {
            unlisted.push(outcome);
        }
    }
    if !unlisted.is_empty() {
        log::info!("outcomes drawn without a legend entry: {unlisted:?}");
    }
    LEGEND_ORDER
        .iter()
        .filter(|label| listed.contains(*label))
        .map(|label| LegendEntry {
            label: label.to_string(),
            rule: encoding::resolve(label),
        })
        .collect()
}

/// Build the draw plan for one render.
///
/// The configuration is clamped first, so out-of-range values never reach the painter.
pub fn plan(dataset: &Dataset, config: &ChartConfig) -> DrawPlan {
    let config = config.clamped();
    let x_range = (X_MIN, config.x_max);

    let categories = category_order(dataset.iter());
    let rows: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let mut groups: Vec<PointGroup> = Vec::new();
    let mut slot: HashMap<(usize, &str), usize> = HashMap::new();
    let mut clipped_points = 0usize;

    for r in dataset.iter() {
        let Some(&row) = rows.get(r.track.as_str()) else {
            continue;
        };
        let idx = *slot.entry((row, r.outcome.as_str())).or_insert_with(|| {
            groups.push(PointGroup {
                category: r.track.clone(),
                row,
                outcome: r.outcome.clone(),
                rule: encoding::resolve(&r.outcome),
                grades: Vec::new(),
            });
            groups.len() - 1
        });
        if let Some(g) = r.grade {
            if g >= x_range.0 && g <= x_range.1 {
                groups[idx].grades.push(g);
            } else {
                clipped_points += 1;
            }
        }
    }

    // Category order first (outcomes keep their first appearance within a row),
    // then priority. Both sorts are stable.
    groups.sort_by_key(|g| g.row);
    groups.retain(|g| !g.grades.is_empty());
    groups.sort_by_key(|g| g.rule.draw_priority);

    if clipped_points > 0 {
        log::warn!(
            "{clipped_points} point(s) outside the x range {:.1}..={:.1} are not drawn",
            x_range.0,
            x_range.1
        );
    }

    let plan = DrawPlan {
        title: config.title.clone(),
        width_in: config.width,
        height_in: config.height,
        categories,
        x_range,
        ticks: x_ticks(config.x_max),
        groups,
        legend: Legend {
            title: LEGEND_TITLE,
            position: config.legend_position,
            entries: legend_entries(dataset),
        },
        line_width_pt: config.line_width,
        marker_size: config.marker_size,
        clipped_points,
    };
    log::debug!(
        "plan: {} categories, {} groups, {} points, {} legend entries at {}",
        plan.categories.len(),
        plan.groups.len(),
        plan.point_count(),
        plan.legend.entries.len(),
        plan.legend.position.as_str()
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_for_unaligned_max_stop_below_it() {
        assert_eq!(x_ticks(4.3), vec![1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0]);
    }

    #[test]
    fn ticks_cover_full_range() {
        let t = x_ticks(9.0);
        assert_eq!(t.len(), 17);
        assert_eq!(t.first(), Some(&1.0));
        assert_eq!(t.last(), Some(&9.0));
    }

    #[test]
    fn ticks_empty_for_nan() {
        assert!(x_ticks(f64::NAN).is_empty());
    }
}
