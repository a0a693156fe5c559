use chrono::Utc;
use dreampilot::database::models::DreamRecord;
use dreampilot::progression::patterns::{dream_patterns, frequencies, top_n};

fn dream_with(tags: &[&str], emotions: &[&str], lucid: bool) -> DreamRecord {
    DreamRecord {
        dream_id: 0,
        user_id: 1,
        title: String::new(),
        body: String::new(),
        is_lucid: lucid,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        emotions: emotions.iter().map(|e| e.to_string()).collect(),
        created_at: Utc::now(),
    }
}

#[test]
fn frequencies_count_repeats() {
    let counts = frequencies(["falling", "water", "falling", "flying", "falling"]);
    assert_eq!(counts.get("falling"), Some(&3));
    assert_eq!(counts.get("water"), Some(&1));
    assert_eq!(counts.get("teeth"), None);
}

#[test]
fn top_n_orders_by_count_then_name() {
    let counts = frequencies(["b", "a", "b", "a", "c"]);
    let top = top_n(counts, 2);
    // a and b tie on 2; the alphabetical tiebreak makes the output stable.
    assert_eq!(top, vec![("a".to_string(), 2), ("b".to_string(), 2)]);
}

#[test]
fn top_n_truncates_to_the_requested_size() {
    let counts = frequencies(["a", "b", "c", "d"]);
    assert_eq!(top_n(counts, 2).len(), 2);
}

#[test]
fn patterns_aggregate_across_the_journal() {
    let journal = vec![
        dream_with(&["flying", "ocean"], &["joy"], true),
        dream_with(&["flying"], &["fear", "joy"], false),
        dream_with(&["teeth"], &["fear"], false),
        dream_with(&["flying", "ocean"], &[], true),
    ];
    let patterns = dream_patterns(&journal, 2);
    assert_eq!(patterns.top_tags[0], ("flying".to_string(), 3));
    assert_eq!(patterns.top_tags[1], ("ocean".to_string(), 2));
    assert_eq!(patterns.top_emotions[0], ("fear".to_string(), 2));
    assert_eq!(patterns.lucid_ratio, 0.5);
}

#[test]
fn empty_journal_yields_empty_patterns() {
    let patterns = dream_patterns(&[], 5);
    assert!(patterns.top_tags.is_empty());
    assert!(patterns.top_emotions.is_empty());
    assert_eq!(patterns.lucid_ratio, 0.0);
}
