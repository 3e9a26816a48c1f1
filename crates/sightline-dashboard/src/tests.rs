//! Property-based tests for the layout engine with proptest.

use crate::*;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_panel(max_width: u32) -> impl Strategy<Value = Panel> {
    (0u8..7, 0..=max_width, 0u32..=12).prop_map(|(kind, w, h)| -> Panel {
        match kind {
            0 | 1 => TimeSeriesPanel::new(format!("ts-{w}x{h}")).with_size(w, h).into(),
            2 | 3 => StatPanel::new(format!("stat-{w}x{h}")).with_size(w, h).into(),
            4 | 5 => TablePanel::new(format!("table-{w}x{h}")).with_size(w, h).into(),
            _ => Panel::Unknown(serde_json::json!({"type": "heatmap", "title": format!("hm-{w}x{h}")})),
        }
    })
}

fn arb_row(max_width: u32) -> impl Strategy<Value = Row> {
    (
        prop::bool::weighted(0.2),
        prop::collection::vec(arb_panel(max_width), 0..10),
    )
        .prop_map(|(collapsed, panels)| {
            let mut row = Row::new("row").collapsed(collapsed);
            row.panels = panels;
            row
        })
}

fn arb_dashboard(max_width: u32) -> impl Strategy<Value = Dashboard> {
    prop::collection::vec(arb_row(max_width), 0..6).prop_map(|rows| {
        let mut dashboard = Dashboard::new("generated");
        dashboard.rows = rows;
        dashboard
    })
}

fn laid_out(dashboard: &Dashboard) -> Dashboard {
    let mut copy = dashboard.clone();
    let result = compute_layout(&mut copy);
    assert!(result.is_ok());
    copy
}

/// Positions of the known panels of every expanded row, grouped by row.
fn expanded_positions(dashboard: &Dashboard) -> Vec<Vec<GridPos>> {
    dashboard
        .rows
        .iter()
        .filter(|row| !row.collapsed)
        .map(|row| row.panels.iter().filter_map(Panel::grid_pos).copied().collect())
        .collect()
}

// =============================================================================
// Property-based tests with proptest
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_panels_stay_within_columns(dashboard in arb_dashboard(COLUMNS)) {
        let out = laid_out(&dashboard);
        for pos in expanded_positions(&out).into_iter().flatten() {
            prop_assert!(pos.w > 0 && pos.h > 0);
            prop_assert!(pos.right() <= COLUMNS);
        }
    }

    #[test]
    fn prop_no_violations_within_budget(dashboard in arb_dashboard(COLUMNS)) {
        let out = laid_out(&dashboard);
        prop_assert_eq!(validate_layout(&out), Vec::new());
    }

    #[test]
    fn prop_rows_strictly_descend(dashboard in arb_dashboard(COLUMNS)) {
        let out = laid_out(&dashboard);
        let rows: Vec<_> = expanded_positions(&out)
            .into_iter()
            .filter(|row| !row.is_empty())
            .collect();
        for pair in rows.windows(2) {
            let prev_max = pair[0].iter().map(|p| p.y).max().unwrap_or(0);
            let next_min = pair[1].iter().map(|p| p.y).min().unwrap_or(u32::MAX);
            prop_assert!(next_min > prev_max);
        }
    }

    #[test]
    fn prop_same_line_is_left_to_right(dashboard in arb_dashboard(COLUMNS)) {
        let out = laid_out(&dashboard);
        for row in expanded_positions(&out) {
            for pair in row.windows(2) {
                if pair[0].y == pair[1].y {
                    prop_assert!(pair[1].x > pair[0].x);
                } else {
                    prop_assert!(pair[1].y > pair[0].y);
                    prop_assert_eq!(pair[1].x, 0);
                }
            }
        }
    }

    #[test]
    fn prop_unsized_dimensions_take_defaults(dashboard in arb_dashboard(COLUMNS)) {
        let out = laid_out(&dashboard);
        for (before, after) in expanded_positions(&dashboard)
            .into_iter()
            .flatten()
            .zip(expanded_positions(&out).into_iter().flatten())
        {
            let expected_w = if before.w == 0 { DEFAULT_PANEL_WIDTH } else { before.w };
            let expected_h = if before.h == 0 { DEFAULT_PANEL_HEIGHT } else { before.h };
            prop_assert_eq!(after.w, expected_w);
            prop_assert_eq!(after.h, expected_h);
        }
    }

    #[test]
    fn prop_layout_is_deterministic(dashboard in arb_dashboard(COLUMNS + 8)) {
        prop_assert_eq!(laid_out(&dashboard), laid_out(&dashboard));
    }

    #[test]
    fn prop_layout_is_idempotent(dashboard in arb_dashboard(COLUMNS + 8)) {
        let once = laid_out(&dashboard);
        let twice = laid_out(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_collapsed_rows_untouched(dashboard in arb_dashboard(COLUMNS + 8)) {
        let out = laid_out(&dashboard);
        for (before, after) in dashboard.rows.iter().zip(&out.rows) {
            if before.collapsed {
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn prop_report_counts_panels(dashboard in arb_dashboard(COLUMNS)) {
        let mut out = dashboard.clone();
        let report = compute_layout(&mut out);
        prop_assert!(report.is_ok());
        let report = report.unwrap_or_default();

        let expanded: Vec<&Row> = dashboard.rows.iter().filter(|r| !r.collapsed).collect();
        let unknown = expanded
            .iter()
            .flat_map(|r| r.panels.iter())
            .filter(|p| p.kind().is_none())
            .count();
        let known = expanded.iter().map(|r| r.panels.len()).sum::<usize>() - unknown;

        prop_assert_eq!(report.panels_placed, known);
        prop_assert_eq!(report.panels_skipped, unknown);
        prop_assert_eq!(report.rows_collapsed, dashboard.rows.len() - expanded.len());
    }

    #[test]
    fn prop_clamp_keeps_overwide_panels_in_bounds(dashboard in arb_dashboard(COLUMNS * 2)) {
        let mut out = dashboard.clone();
        let engine = LayoutEngine::new(LayoutConfig::new().with_overflow(OverflowPolicy::Clamp));
        prop_assert!(engine.apply(&mut out).is_ok());
        prop_assert_eq!(validate_layout(&out), Vec::new());
    }

    #[test]
    fn prop_reject_is_all_or_nothing(dashboard in arb_dashboard(COLUMNS * 2)) {
        let mut out = dashboard.clone();
        let engine = LayoutEngine::new(LayoutConfig::new().with_overflow(OverflowPolicy::Reject));
        match engine.apply(&mut out) {
            Ok(_) => prop_assert_eq!(out, laid_out(&dashboard)),
            Err(DashboardError::PanelTooWide { width, .. }) => {
                prop_assert!(width > COLUMNS);
                prop_assert_eq!(out, dashboard);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
