use admit_dotplot::viz::{self, x_ticks};
use admit_dotplot::{ChartConfig, Dataset, LegendPosition, Record};

fn ds(rows: &[(&str, f64, &str)]) -> Dataset {
    rows.iter().map(|(t, g, o)| Record::new(*t, *g, *o)).collect()
}

fn labels(plan: &admit_dotplot::DrawPlan) -> Vec<&str> {
    plan.legend.entries.iter().map(|e| e.label.as_str()).collect()
}

#[test]
fn categories_are_reversed_first_appearance() {
    let d = ds(&[("A", 2.0, "합"), ("B", 2.0, "합"), ("A", 3.0, "불"), ("C", 1.5, "합")]);
    let plan = viz::plan(&d, &ChartConfig::default());
    assert_eq!(plan.categories, vec!["C", "B", "A"]);
    assert_eq!(plan.category_row("A"), Some(2));
    assert_eq!(plan.gridline_count(), 3);
}

#[test]
fn legend_follows_fixed_order_filtered_by_presence() {
    let d = ds(&[("A", 2.0, "불"), ("A", 2.5, "합")]);
    let plan = viz::plan(&d, &ChartConfig::default());
    assert_eq!(labels(&plan), vec!["합", "불"]);
    assert_eq!(plan.legend.title, "결과");
}

#[test]
fn ticks_for_default_and_aligned_max() {
    assert_eq!(x_ticks(4.5), vec![1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5]);
    assert_eq!(x_ticks(4.0), vec![1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0]);
    let plan = viz::plan(&Dataset::default(), &ChartConfig::default());
    assert_eq!(plan.ticks.len(), 8);
    assert_eq!(plan.x_range, (0.9, 4.5));
}

#[test]
fn pass_paints_after_fail_at_same_point() {
    let d = ds(&[("A", 2.0, "합"), ("A", 2.0, "불"), ("B", 3.0, "추합"), ("B", 3.0, "불")]);
    let plan = viz::plan(&d, &ChartConfig::default());
    let order: Vec<&str> = plan.groups.iter().map(|g| g.outcome.as_str()).collect();
    assert_eq!(order, vec!["불", "불", "추합", "합"]);
    let priorities: Vec<u8> = plan.groups.iter().map(|g| g.rule.draw_priority).collect();
    assert!(priorities.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn empty_dataset_gives_empty_frame() {
    let plan = viz::plan(&Dataset::default(), &ChartConfig::default());
    assert!(plan.categories.is_empty());
    assert_eq!(plan.gridline_count(), 0);
    assert_eq!(plan.point_count(), 0);
    assert!(plan.legend.entries.is_empty());
}

#[test]
fn unknown_outcome_is_plotted_but_not_in_legend() {
    let d = ds(&[("A", 2.0, "보류"), ("A", 3.0, "합")]);
    let plan = viz::plan(&d, &ChartConfig::default());
    assert_eq!(plan.point_count(), 2);
    let unknown = plan.groups.iter().find(|g| g.outcome == "보류").unwrap();
    assert_eq!(unknown.rule.color_name, "gray");
    assert_eq!(labels(&plan), vec!["합"]);
    // Lowest priority paints first.
    assert_eq!(plan.groups[0].outcome, "보류");
}

#[test]
fn grades_outside_range_are_clipped() {
    let d = ds(&[("A", 0.5, "합"), ("A", 2.0, "합"), ("A", 7.0, "불")]);
    let plan = viz::plan(&d, &ChartConfig::default());
    assert_eq!(plan.point_count(), 1);
    assert_eq!(plan.clipped_points, 2);
    // The fail group has no visible point, so it is dropped; the legend still lists it.
    assert_eq!(plan.groups.len(), 1);
    assert_eq!(labels(&plan), vec!["합", "불"]);
}

#[test]
fn configuration_is_clamped_and_carried() {
    let cfg = ChartConfig {
        title: "2025 수시".into(),
        x_max: 12.0,
        legend_position: LegendPosition::LowerRight,
        ..ChartConfig::default()
    };
    let plan = viz::plan(&ds(&[("A", 8.5, "합")]), &cfg);
    assert_eq!(plan.x_range.1, 9.0);
    assert_eq!(plan.ticks.last(), Some(&9.0));
    assert_eq!(plan.legend.position, LegendPosition::LowerRight);
    assert_eq!(plan.title, "2025 수시");
    assert_eq!(plan.point_count(), 1);
}

#[test]
fn grade_just_past_axis_max_is_left_out_whole() {
    let d = ds(&[("A", 4.52, "합"), ("A", 4.5, "합")]);
    let plan = viz::plan(&d, &ChartConfig::default());
    assert_eq!(plan.groups[0].grades, vec![4.5]);
    assert_eq!(plan.clipped_points, 1);
}

#[test]
fn unknown_outcomes_do_not_disturb_legend_order() {
    let d = ds(&[("A", 2.0, "보류"), ("A", 2.5, "불"), ("B", 3.0, "추합"), ("B", 1.5, "합")]);
    let plan = viz::plan(&d, &ChartConfig::default());
    assert_eq!(labels(&plan), vec!["합", "추합", "불"]);
}
