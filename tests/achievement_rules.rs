use dreampilot::progression::achievements::{
    ACHIEVEMENTS, DreamStats, get_achievement, newly_satisfied,
};

#[test]
fn table_ids_are_unique() {
    for (i, a) in ACHIEVEMENTS.iter().enumerate() {
        for b in &ACHIEVEMENTS[i + 1..] {
            assert_ne!(a.id, b.id, "duplicate achievement id {}", a.id);
        }
    }
}

#[test]
fn lookup_by_id() {
    assert_eq!(get_achievement("first_dream").map(|d| d.name), Some("First Flight"));
    assert!(get_achievement("nonexistent").is_none());
}

#[test]
fn zero_stats_unlock_nothing() {
    let stats = DreamStats::default();
    assert!(newly_satisfied([], &stats).is_empty());
}

#[test]
fn threshold_is_inclusive_at_the_boundary() {
    let below = DreamStats {
        total_dreams: 9,
        ..Default::default()
    };
    let at = DreamStats {
        total_dreams: 10,
        ..Default::default()
    };
    let ids = |stats: &DreamStats| -> Vec<&str> {
        newly_satisfied([], stats).iter().map(|d| d.id).collect()
    };
    assert!(!ids(&below).contains(&"dreams_10"));
    assert!(ids(&at).contains(&"dreams_10"));
}

#[test]
fn already_unlocked_ids_are_filtered_out() {
    let stats = DreamStats {
        total_dreams: 12,
        ..Default::default()
    };
    let fresh = newly_satisfied([], &stats);
    assert!(fresh.iter().any(|d| d.id == "first_dream"));
    assert!(fresh.iter().any(|d| d.id == "dreams_10"));

    let after = newly_satisfied(["first_dream", "dreams_10"], &stats);
    assert!(after.iter().all(|d| d.id != "first_dream" && d.id != "dreams_10"));
}

#[test]
fn each_requirement_type_reads_its_own_counter() {
    let stats = DreamStats {
        total_dreams: 0,
        lucid_dreams: 5,
        current_streak: 3,
        completed_lessons: 1,
    };
    let ids: Vec<&str> = newly_satisfied([], &stats).iter().map(|d| d.id).collect();
    assert!(ids.contains(&"first_lucid"));
    assert!(ids.contains(&"lucid_5"));
    assert!(ids.contains(&"streak_3"));
    assert!(ids.contains(&"first_lesson"));
    assert!(!ids.contains(&"first_dream"));
    assert!(!ids.contains(&"streak_7"));
}
