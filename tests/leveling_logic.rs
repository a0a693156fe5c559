use dreampilot::progression::leveling::{
    LEVEL_TIERS, calculate_level, level_tier, progress_to_next_level, xp_for_level,
    xp_for_next_level,
};

#[test]
fn level_thresholds_match_requirement_curve() {
    assert_eq!(calculate_level(0), 1);
    assert_eq!(calculate_level(99), 1);
    assert_eq!(calculate_level(100), 2);
    assert_eq!(calculate_level(249), 2);
    assert_eq!(calculate_level(250), 3); // 100 + 150 cumulative
}

#[test]
fn requirement_grows_by_fixed_step() {
    assert_eq!(xp_for_next_level(1), 100);
    assert_eq!(xp_for_next_level(2), 150);
    assert_eq!(xp_for_next_level(10), 550);
}

#[test]
fn cumulative_xp_is_sum_of_prior_requirements() {
    assert_eq!(xp_for_level(1), 0);
    assert_eq!(xp_for_level(2), 100);
    assert_eq!(xp_for_level(3), 250);
    assert_eq!(xp_for_level(4), 450);
}

#[test]
fn level_boundaries_bracket_sampled_totals() {
    for xp in [0, 1, 99, 100, 101, 249, 250, 1_000, 5_000, 123_456] {
        let level = calculate_level(xp);
        assert!(xp_for_level(level) <= xp, "lower bound failed for xp {xp}");
        assert!(xp < xp_for_level(level + 1), "upper bound failed for xp {xp}");
    }
}

#[test]
fn calculate_level_is_monotonic() {
    let mut previous = calculate_level(0);
    for xp in (0..5_000).step_by(7) {
        let level = calculate_level(xp);
        assert!(level >= previous);
        previous = level;
    }
}

#[test]
fn progress_stays_within_the_current_band() {
    for xp in [0, 50, 99, 100, 175, 249, 250, 10_000] {
        let progress = progress_to_next_level(xp);
        assert!(progress.current >= 0);
        assert!(progress.current < progress.required);
        assert!(
            (0.0..=100.0).contains(&progress.percentage),
            "percentage out of range for xp {xp}"
        );
    }
}

#[test]
fn tier_table_covers_all_levels_without_gaps() {
    assert_eq!(LEVEL_TIERS[0].min_level, 1);
    for pair in LEVEL_TIERS.windows(2) {
        assert_eq!(pair[1].min_level, pair[0].max_level + 1);
    }
    assert_eq!(LEVEL_TIERS[LEVEL_TIERS.len() - 1].max_level, i32::MAX);
    for level in 1..=200 {
        let matches = LEVEL_TIERS
            .iter()
            .filter(|t| level >= t.min_level && level <= t.max_level)
            .count();
        assert_eq!(matches, 1, "level {level} should map to exactly one tier");
    }
}

#[test]
fn tier_lookup_scans_first_match_and_falls_back_to_last() {
    assert_eq!(level_tier(1).name, LEVEL_TIERS[0].name);
    assert_eq!(level_tier(7).name, "Dream Recaller");
    assert_eq!(
        level_tier(i32::MAX).name,
        LEVEL_TIERS[LEVEL_TIERS.len() - 1].name
    );
}
