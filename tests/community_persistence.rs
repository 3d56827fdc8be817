//! Integration tests for community store persistence across restarts.

use chrono::Utc;
use perfume_catalog::community::{
    CommunityRepository, CommunityStore, EnhancedPerfumeReview, LongevityRating, Occasion,
    PerfumeReview, ReviewRating, Season, SillageRating,
};
use pretty_assertions::assert_eq;
use std::path::Path;

fn open_store(path: &Path) -> CommunityStore {
    CommunityStore::open(CommunityRepository::new(path)).unwrap()
}

fn legacy_review(id: i64, perfume_id: i64, rating: ReviewRating) -> PerfumeReview {
    PerfumeReview {
        id,
        perfume_id,
        user_name: format!("user-{}", id),
        rating,
        comment: Some("A solid everyday pick".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn enhanced_review(id: i64, perfume_id: i64) -> EnhancedPerfumeReview {
    EnhancedPerfumeReview {
        id,
        perfume_id,
        user_name: format!("user-{}", id),
        user_email: Some(format!("user-{}@example.com", id)),
        overall_rating: 5,
        longevity_rating: LongevityRating::Excellent,
        sillage_rating: SillageRating::Heavy,
        value_rating: 4,
        title: "Signature scent material".to_string(),
        comment: "Lasts the whole day and gets compliments.".to_string(),
        pros: vec!["Long-lasting".to_string(), "Great projection".to_string()],
        cons: vec!["Pricey".to_string()],
        occasions: vec![Occasion::DateNight, Occasion::Formal],
        seasons: vec![Season::Fall, Season::Winter],
        would_repurchase: true,
        is_verified_purchase: true,
        helpful_count: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("community.json");

    {
        let mut store = open_store(&path);
        store.add_review(legacy_review(1, 7, ReviewRating::Like)).unwrap();
        store.add_enhanced_review(enhanced_review(2, 7)).unwrap();
        store.mark_helpful(2, "alice").unwrap();
        store.report_review(1).unwrap();
    }

    let reopened = open_store(&path);
    let reviews = reopened.get_reviews(7);
    assert_eq!(reviews.len(), 2);
    // Newest first, and each review keeps its shape through the round-trip.
    assert_eq!(reviews[0].id(), 2);
    assert!(reviews[0].as_enhanced().is_some());
    assert!(reviews[1].as_enhanced().is_none());

    let stats = reopened.get_enhanced_review_stats(7).unwrap();
    assert_eq!(stats.total_reviews, 1);
    assert_eq!(stats.total_likes, 1);

    assert_eq!(reopened.get_enhanced_reviews(7)[0].helpful_count, 1);
    assert!(reopened.is_review_helpful(2, "alice"));
    assert!(reopened.is_review_reported(1));
}

#[test]
fn reset_yields_an_empty_store_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("community.json");

    {
        let mut store = open_store(&path);
        store.add_review(legacy_review(1, 7, ReviewRating::Dislike)).unwrap();
        store.reset_community_data().unwrap();
    }

    assert!(!path.exists());
    let reopened = open_store(&path);
    assert!(reopened.get_reviews(7).is_empty());
    assert!(reopened.get_review_stats(7).is_none());
    assert_eq!(reopened.reviewed_perfume_count(), 0);
}

#[test]
fn clear_all_data_leaves_the_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("community.json");

    let mut store = open_store(&path);
    store.add_review(legacy_review(1, 7, ReviewRating::Like)).unwrap();
    store.clear_all_data();

    assert!(store.get_reviews(7).is_empty());
    assert!(path.exists());

    let reopened = open_store(&path);
    assert_eq!(reopened.get_reviews(7).len(), 1);
}
