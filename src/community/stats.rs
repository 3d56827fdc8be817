// src/community/stats.rs
//! Aggregate recomputation over the enhanced reviews of one perfume.

use crate::community::types::{
    EnhancedPerfumeReview, EnhancedPerfumeReviewStats, Occasion, OccasionCount, RatingDistribution,
    ReviewStats, Season, SeasonCount,
};
use std::collections::HashMap;

const POPULAR_LIMIT: usize = 5;

/// Recomputes enhanced stats from scratch over `reviews`. The legacy
/// counters (likes/dislikes/comments) are carried over from `current`
/// untouched, whichever shape it has; they are maintained incrementally by
/// the legacy path.
pub fn calculate_enhanced_stats(
    reviews: &[&EnhancedPerfumeReview],
    current: Option<&ReviewStats>,
    perfume_id: i64,
) -> EnhancedPerfumeReviewStats {
    let mut stats = EnhancedPerfumeReviewStats::zeroed(perfume_id);
    if let Some(current) = current {
        stats.total_likes = current.total_likes();
        stats.total_dislikes = current.total_dislikes();
        stats.total_comments = current.total_comments();
    }

    if reviews.is_empty() {
        return stats;
    }

    let mut distribution = RatingDistribution::default();
    let mut total_rating = 0u64;
    let mut total_longevity = 0u64;
    let mut total_sillage = 0u64;
    let mut total_value = 0u64;
    let mut would_repurchase = 0u64;
    let mut verified = 0u64;
    let mut helpful_votes = 0u64;
    let mut occasion_counts: HashMap<Occasion, u64> = HashMap::new();
    let mut season_counts: HashMap<Season, u64> = HashMap::new();

    for review in reviews {
        distribution.record(review.overall_rating);
        total_rating += u64::from(review.overall_rating);
        total_longevity += u64::from(review.longevity_rating.score());
        total_sillage += u64::from(review.sillage_rating.score());
        total_value += u64::from(review.value_rating);

        if review.would_repurchase {
            would_repurchase += 1;
        }
        if review.is_verified_purchase {
            verified += 1;
        }
        helpful_votes += review.helpful_count;

        for occasion in &review.occasions {
            *occasion_counts.entry(*occasion).or_default() += 1;
        }
        for season in &review.seasons {
            *season_counts.entry(*season).or_default() += 1;
        }
    }

    let count = reviews.len() as u64;
    stats.total_reviews = count;
    stats.average_rating = total_rating as f64 / count as f64;
    stats.rating_distribution = distribution;
    stats.average_longevity = total_longevity as f64 / count as f64;
    stats.average_sillage = total_sillage as f64 / count as f64;
    stats.average_value = total_value as f64 / count as f64;
    stats.repurchase_rate = percentage(would_repurchase, count);
    stats.verified_purchase_rate = percentage(verified, count);
    stats.total_helpful_votes = helpful_votes;
    stats.popular_occasions = top_occasions(occasion_counts);
    stats.popular_seasons = top_seasons(season_counts);
    stats
}

fn percentage(part: u64, whole: u64) -> u64 {
    ((part as f64 / whole as f64) * 100.0).round() as u64
}

fn top_occasions(counts: HashMap<Occasion, u64>) -> Vec<OccasionCount> {
    let mut entries: Vec<OccasionCount> = counts
        .into_iter()
        .map(|(occasion, count)| OccasionCount { occasion, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(POPULAR_LIMIT);
    entries
}

fn top_seasons(counts: HashMap<Season, u64>) -> Vec<SeasonCount> {
    let mut entries: Vec<SeasonCount> = counts
        .into_iter()
        .map(|(season, count)| SeasonCount { season, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(POPULAR_LIMIT);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::types::{LongevityRating, SillageRating};
    use assert_approx_eq::assert_approx_eq;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn review(
        id: i64,
        overall: u8,
        longevity: LongevityRating,
        repurchase: bool,
        occasions: Vec<Occasion>,
    ) -> EnhancedPerfumeReview {
        EnhancedPerfumeReview {
            id,
            perfume_id: 1,
            user_name: format!("user-{}", id),
            user_email: None,
            overall_rating: overall,
            longevity_rating: longevity,
            sillage_rating: SillageRating::Moderate,
            value_rating: 3,
            title: "Review".to_string(),
            comment: "Nice".to_string(),
            pros: vec![],
            cons: vec![],
            occasions,
            seasons: vec![Season::Winter],
            would_repurchase: repurchase,
            is_verified_purchase: id % 2 == 0,
            helpful_count: 2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_input_keeps_legacy_counters() {
        let mut inner = EnhancedPerfumeReviewStats::zeroed(1);
        inner.total_likes = 7;
        inner.total_comments = 3;
        let current = ReviewStats::Enhanced(inner);

        let stats = calculate_enhanced_stats(&[], Some(&current), 1);
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.total_likes, 7);
        assert_eq!(stats.total_comments, 3);
    }

    #[test]
    fn legacy_shaped_counters_are_carried_over() {
        let current = ReviewStats::Legacy(crate::community::types::PerfumeReviewStats {
            perfume_id: 1,
            total_likes: 2,
            total_dislikes: 1,
            total_comments: 2,
            average_rating: 10.0 / 3.0,
        });

        let reviews = vec![review(1, 4, LongevityRating::Good, true, vec![Occasion::Daily])];
        let refs: Vec<&EnhancedPerfumeReview> = reviews.iter().collect();

        let stats = calculate_enhanced_stats(&refs, Some(&current), 1);
        assert_eq!(stats.total_likes, 2);
        assert_eq!(stats.total_dislikes, 1);
        assert_eq!(stats.total_reviews, 1);
    }

    #[test]
    fn distribution_and_averages() {
        let reviews = vec![
            review(1, 5, LongevityRating::Excellent, true, vec![Occasion::Daily]),
            review(2, 4, LongevityRating::Good, true, vec![Occasion::Daily, Occasion::Work]),
            review(3, 3, LongevityRating::Average, false, vec![Occasion::Work]),
            review(4, 5, LongevityRating::Excellent, true, vec![Occasion::Party]),
        ];
        let refs: Vec<&EnhancedPerfumeReview> = reviews.iter().collect();

        let stats = calculate_enhanced_stats(&refs, None, 1);

        assert_eq!(stats.total_reviews, 4);
        assert_eq!(stats.rating_distribution.total(), 4);
        assert_eq!(stats.rating_distribution.five, 2);
        assert_eq!(stats.rating_distribution.four, 1);
        assert_eq!(stats.rating_distribution.three, 1);
        assert_approx_eq!(stats.average_rating, 4.25);
        assert_approx_eq!(stats.average_longevity, (5 + 4 + 3 + 5) as f64 / 4.0);
        assert_approx_eq!(stats.average_sillage, 3.0);
        assert_eq!(stats.repurchase_rate, 75);
        assert_eq!(stats.verified_purchase_rate, 50);
        assert_eq!(stats.total_helpful_votes, 8);
    }

    #[test]
    fn popular_occasions_sorted_by_count() {
        let reviews = vec![
            review(1, 5, LongevityRating::Good, true, vec![Occasion::Daily, Occasion::Work]),
            review(2, 4, LongevityRating::Good, true, vec![Occasion::Work]),
            review(3, 4, LongevityRating::Good, true, vec![Occasion::Work, Occasion::Party]),
        ];
        let refs: Vec<&EnhancedPerfumeReview> = reviews.iter().collect();

        let stats = calculate_enhanced_stats(&refs, None, 1);
        assert_eq!(stats.popular_occasions[0].occasion, Occasion::Work);
        assert_eq!(stats.popular_occasions[0].count, 3);
        assert_eq!(stats.popular_occasions.len(), 3);
    }
}
