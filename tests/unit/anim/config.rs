use super::*;
use crate::env::capability::classify_tier;

#[test]
fn core_count_scenarios() {
    assert_eq!(config_for_tier(classify_tier(Some(2))).blob_count, 2);
    assert_eq!(config_for_tier(classify_tier(Some(4))).blob_count, 3);
    assert_eq!(config_for_tier(classify_tier(Some(8))).blob_count, 4);
}

#[test]
fn quality_labels_follow_tier() {
    for tier in [
        PerformanceTier::Low,
        PerformanceTier::Medium,
        PerformanceTier::High,
    ] {
        let cfg = config_for_tier(tier);
        assert_eq!(cfg.quality.as_str(), tier.as_str());
        assert!((2..=4).contains(&cfg.blob_count));
    }
}

#[test]
fn low_tier_runs_at_thirty_fps() {
    let low = config_for_tier(PerformanceTier::Low);
    assert!((low.target_fps() - 30.0).abs() < 1e-9);
    let high = config_for_tier(PerformanceTier::High);
    assert!((high.target_fps() - 60.0).abs() < 1e-9);
}

#[test]
fn mapping_is_pure() {
    assert_eq!(
        config_for_tier(PerformanceTier::Medium),
        config_for_tier(PerformanceTier::Medium)
    );
    assert!(Quality::Low.blur_px() < Quality::High.blur_px());
}
