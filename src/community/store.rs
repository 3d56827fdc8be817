// src/community/store.rs
//! Locally-persisted accumulation of perfume reviews with derived statistics.
//!
//! Every mutation completes in memory first, then the whole state is written
//! through the repository. Persistence failures surface in the returned
//! `Result` instead of being swallowed.

use crate::community::repository::CommunityRepository;
use crate::community::stats::calculate_enhanced_stats;
use crate::community::types::{
    CommunityState, EnhancedPerfumeReview, EnhancedPerfumeReviewStats, EnhancedReviewPatch,
    LongevityRating, PerfumeReview, PerfumeReviewStats, PerfumeReviewStatsPatch, ReviewFilters,
    ReviewRating, ReviewSortOption, ReviewStats, SillageRating, StoredReview,
};
use crate::error::{CatalogError, Result};
use chrono::Utc;
use log::info;

pub struct CommunityStore {
    state: CommunityState,
    repository: CommunityRepository,
}

impl CommunityStore {
    /// Opens the store, restoring any previously persisted state.
    pub fn open(repository: CommunityRepository) -> Result<Self> {
        let state = repository.load()?;
        Ok(Self { state, repository })
    }

    fn persist(&self) -> Result<()> {
        self.repository.save(&self.state)
    }

    /// Adds a legacy like/dislike review: prepends it to the perfume's list
    /// and updates that perfume's counters in the same state transition.
    pub fn add_review(&mut self, review: PerfumeReview) -> Result<()> {
        let perfume_id = review.perfume_id;
        let rating = review.rating;
        let has_comment = review
            .comment
            .as_deref()
            .map_or(false, |comment| !comment.is_empty());

        self.state
            .reviews
            .entry(perfume_id)
            .or_default()
            .insert(0, StoredReview::Legacy(review));

        let stats = self
            .state
            .review_stats
            .entry(perfume_id)
            .or_insert_with(|| ReviewStats::Legacy(PerfumeReviewStats::zeroed(perfume_id)));

        match stats {
            ReviewStats::Legacy(s) => {
                bump_legacy_counters(
                    &mut s.total_likes,
                    &mut s.total_dislikes,
                    &mut s.total_comments,
                    &mut s.average_rating,
                    rating,
                    has_comment,
                );
            }
            ReviewStats::Enhanced(s) => {
                bump_legacy_counters(
                    &mut s.total_likes,
                    &mut s.total_dislikes,
                    &mut s.total_comments,
                    &mut s.average_rating,
                    rating,
                    has_comment,
                );
            }
        }

        self.persist()
    }

    /// Adds a full-form review: prepends it, tracks it under its author, and
    /// recomputes the perfume's enhanced stats from all its enhanced reviews.
    pub fn add_enhanced_review(&mut self, review: EnhancedPerfumeReview) -> Result<()> {
        let perfume_id = review.perfume_id;
        let review_id = review.id;
        let user_key = review
            .user_email
            .clone()
            .unwrap_or_else(|| review.user_name.clone());

        let user_entry = self.state.user_reviews.entry(user_key).or_default();
        user_entry.retain(|r| r.id != review_id);
        user_entry.insert(0, review.clone());

        self.state
            .reviews
            .entry(perfume_id)
            .or_default()
            .insert(0, StoredReview::Enhanced(review));

        self.recompute_enhanced_stats(perfume_id);
        self.persist()
    }

    /// Patches an enhanced review in place and bumps its `updated_at`.
    /// Legacy reviews are immutable.
    pub fn update_review(&mut self, review_id: i64, patch: &EnhancedReviewPatch) -> Result<()> {
        let mut found = false;
        for reviews in self.state.reviews.values_mut() {
            if let Some(StoredReview::Enhanced(review)) =
                reviews.iter_mut().find(|r| r.id() == review_id)
            {
                apply_review_patch(review, patch);
                review.updated_at = Utc::now();
                found = true;
                break;
            }
        }

        if !found {
            return Err(CatalogError::NotFound(format!(
                "No enhanced review with id {}",
                review_id
            )));
        }
        self.persist()
    }

    pub fn delete_review(&mut self, review_id: i64, perfume_id: i64) -> Result<()> {
        if let Some(reviews) = self.state.reviews.get_mut(&perfume_id) {
            reviews.retain(|r| r.id() != review_id);
        }
        self.persist()
    }

    /// Merges the provided fields into the perfume's stats record, creating a
    /// zeroed one when absent. Fields left `None` keep their current value.
    pub fn update_review_stats(
        &mut self,
        perfume_id: i64,
        patch: &PerfumeReviewStatsPatch,
    ) -> Result<()> {
        let stats = self
            .state
            .review_stats
            .entry(perfume_id)
            .or_insert_with(|| ReviewStats::Legacy(PerfumeReviewStats::zeroed(perfume_id)));

        match stats {
            ReviewStats::Legacy(s) => {
                merge_stats_patch(
                    &mut s.total_likes,
                    &mut s.total_dislikes,
                    &mut s.total_comments,
                    &mut s.average_rating,
                    patch,
                );
            }
            ReviewStats::Enhanced(s) => {
                merge_stats_patch(
                    &mut s.total_likes,
                    &mut s.total_dislikes,
                    &mut s.total_comments,
                    &mut s.average_rating,
                    patch,
                );
            }
        }

        self.persist()
    }

    /// Records a helpful vote. The voter set is idempotent per user; the
    /// review's counter moves only on a first-time vote.
    pub fn mark_helpful(&mut self, review_id: i64, user_id: &str) -> Result<()> {
        let first_vote = self
            .state
            .helpful_votes
            .entry(review_id)
            .or_default()
            .insert(user_id.to_string());

        if first_vote {
            for reviews in self.state.reviews.values_mut() {
                if let Some(StoredReview::Enhanced(review)) =
                    reviews.iter_mut().find(|r| r.id() == review_id)
                {
                    review.helpful_count += 1;
                    break;
                }
            }
        }

        self.persist()
    }

    pub fn report_review(&mut self, review_id: i64) -> Result<()> {
        self.state.reported_reviews.insert(review_id);
        self.persist()
    }

    pub fn update_filters(&mut self, perfume_id: i64, filters: ReviewFilters) -> Result<()> {
        self.state.current_filters.insert(perfume_id, filters);
        self.persist()
    }

    pub fn update_sort(&mut self, perfume_id: i64, sort: ReviewSortOption) -> Result<()> {
        self.state.current_sort.insert(perfume_id, sort);
        self.persist()
    }

    /// All reviews for a perfume, newest first.
    pub fn get_reviews(&self, perfume_id: i64) -> &[StoredReview] {
        self.state
            .reviews
            .get(&perfume_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get_enhanced_reviews(&self, perfume_id: i64) -> Vec<&EnhancedPerfumeReview> {
        self.get_reviews(perfume_id)
            .iter()
            .filter_map(StoredReview::as_enhanced)
            .collect()
    }

    pub fn get_review_stats(&self, perfume_id: i64) -> Option<&ReviewStats> {
        self.state.review_stats.get(&perfume_id)
    }

    pub fn get_enhanced_review_stats(
        &self,
        perfume_id: i64,
    ) -> Option<&EnhancedPerfumeReviewStats> {
        self.get_review_stats(perfume_id)
            .and_then(ReviewStats::as_enhanced)
    }

    /// Applies the perfume's stored filters and sort to its review list.
    /// Legacy reviews pass every enhanced-only filter axis.
    pub fn get_filtered_reviews(&self, perfume_id: i64) -> Vec<StoredReview> {
        let mut reviews: Vec<StoredReview> = self
            .get_reviews(perfume_id)
            .iter()
            .filter(|review| {
                self.state
                    .current_filters
                    .get(&perfume_id)
                    .map_or(true, |filters| review_matches(review, filters))
            })
            .cloned()
            .collect();

        if let Some(sort) = self.state.current_sort.get(&perfume_id) {
            sort_reviews(&mut reviews, *sort);
        }

        reviews
    }

    pub fn get_user_review(
        &self,
        perfume_id: i64,
        user_id: &str,
    ) -> Option<&EnhancedPerfumeReview> {
        self.state
            .user_reviews
            .get(user_id)
            .and_then(|reviews| reviews.iter().find(|r| r.perfume_id == perfume_id))
    }

    pub fn is_review_helpful(&self, review_id: i64, user_id: &str) -> bool {
        self.state
            .helpful_votes
            .get(&review_id)
            .map_or(false, |voters| voters.contains(user_id))
    }

    pub fn is_review_reported(&self, review_id: i64) -> bool {
        self.state.reported_reviews.contains(&review_id)
    }

    /// Number of perfumes with at least one review on record.
    pub fn reviewed_perfume_count(&self) -> usize {
        self.state
            .reviews
            .values()
            .filter(|reviews| !reviews.is_empty())
            .count()
    }

    /// Empties all in-memory maps. The persisted document is left as-is.
    pub fn clear_all_data(&mut self) {
        self.state = CommunityState::default();
        info!("Cleared in-memory community data");
    }

    /// Empties the in-memory maps and removes the persisted document.
    pub fn reset_community_data(&mut self) -> Result<()> {
        self.repository.remove()?;
        self.clear_all_data();
        Ok(())
    }

    /// Upgrades every legacy review to the enhanced shape (like maps to a 5,
    /// dislike to a 2, performance axes defaulted) and recomputes stats.
    pub fn migrate_legacy_reviews(&mut self) -> Result<()> {
        let mut migrated_perfumes = Vec::new();

        for (perfume_id, reviews) in self.state.reviews.iter_mut() {
            let mut changed = false;
            for review in reviews.iter_mut() {
                if let StoredReview::Legacy(legacy) = review {
                    *review = StoredReview::Enhanced(upgrade_legacy_review(legacy));
                    changed = true;
                }
            }
            if changed {
                migrated_perfumes.push(*perfume_id);
            }
        }

        for perfume_id in &migrated_perfumes {
            self.recompute_enhanced_stats(*perfume_id);
        }

        if !migrated_perfumes.is_empty() {
            info!(
                "Migrated legacy reviews for {} perfume(s)",
                migrated_perfumes.len()
            );
        }
        self.persist()
    }

    fn recompute_enhanced_stats(&mut self, perfume_id: i64) {
        let enhanced: Vec<&EnhancedPerfumeReview> = self
            .state
            .reviews
            .get(&perfume_id)
            .map(|reviews| {
                reviews
                    .iter()
                    .filter_map(StoredReview::as_enhanced)
                    .collect()
            })
            .unwrap_or_default();
        let current = self.state.review_stats.get(&perfume_id);

        let stats = calculate_enhanced_stats(&enhanced, current, perfume_id);
        self.state
            .review_stats
            .insert(perfume_id, ReviewStats::Enhanced(stats));
    }
}

fn bump_legacy_counters(
    total_likes: &mut u64,
    total_dislikes: &mut u64,
    total_comments: &mut u64,
    average_rating: &mut f64,
    rating: ReviewRating,
    has_comment: bool,
) {
    match rating {
        ReviewRating::Like => *total_likes += 1,
        ReviewRating::Dislike => *total_dislikes += 1,
    }
    if has_comment {
        *total_comments += 1;
    }

    let total_ratings = *total_likes + *total_dislikes;
    *average_rating = if total_ratings > 0 {
        (*total_likes as f64 / total_ratings as f64) * 5.0
    } else {
        0.0
    };
}

fn merge_stats_patch(
    total_likes: &mut u64,
    total_dislikes: &mut u64,
    total_comments: &mut u64,
    average_rating: &mut f64,
    patch: &PerfumeReviewStatsPatch,
) {
    if let Some(likes) = patch.total_likes {
        *total_likes = likes;
    }
    if let Some(dislikes) = patch.total_dislikes {
        *total_dislikes = dislikes;
    }
    if let Some(comments) = patch.total_comments {
        *total_comments = comments;
    }
    if let Some(average) = patch.average_rating {
        *average_rating = average;
    }
}

fn apply_review_patch(review: &mut EnhancedPerfumeReview, patch: &EnhancedReviewPatch) {
    if let Some(rating) = patch.overall_rating {
        review.overall_rating = rating;
    }
    if let Some(longevity) = patch.longevity_rating {
        review.longevity_rating = longevity;
    }
    if let Some(sillage) = patch.sillage_rating {
        review.sillage_rating = sillage;
    }
    if let Some(value) = patch.value_rating {
        review.value_rating = value;
    }
    if let Some(title) = &patch.title {
        review.title = title.clone();
    }
    if let Some(comment) = &patch.comment {
        review.comment = comment.clone();
    }
    if let Some(pros) = &patch.pros {
        review.pros = pros.clone();
    }
    if let Some(cons) = &patch.cons {
        review.cons = cons.clone();
    }
    if let Some(occasions) = &patch.occasions {
        review.occasions = occasions.clone();
    }
    if let Some(seasons) = &patch.seasons {
        review.seasons = seasons.clone();
    }
    if let Some(repurchase) = patch.would_repurchase {
        review.would_repurchase = repurchase;
    }
}

fn review_matches(review: &StoredReview, filters: &ReviewFilters) -> bool {
    let enhanced = match review.as_enhanced() {
        Some(enhanced) => enhanced,
        // Legacy reviews pass through unfiltered.
        None => return true,
    };

    if let Some(rating) = filters.rating {
        if enhanced.overall_rating != rating {
            return false;
        }
    }
    if let Some(longevity) = filters.longevity {
        if enhanced.longevity_rating != longevity {
            return false;
        }
    }
    if let Some(sillage) = filters.sillage {
        if enhanced.sillage_rating != sillage {
            return false;
        }
    }
    if let Some(occasion) = filters.occasion {
        if !enhanced.occasions.contains(&occasion) {
            return false;
        }
    }
    if let Some(season) = filters.season {
        if !enhanced.seasons.contains(&season) {
            return false;
        }
    }
    if let Some(repurchase) = filters.would_repurchase {
        if enhanced.would_repurchase != repurchase {
            return false;
        }
    }
    if let Some(verified) = filters.verified_purchase {
        if enhanced.is_verified_purchase != verified {
            return false;
        }
    }
    if filters.has_pros_cons && enhanced.pros.is_empty() && enhanced.cons.is_empty() {
        return false;
    }
    true
}

fn sort_reviews(reviews: &mut [StoredReview], sort: ReviewSortOption) {
    match sort {
        ReviewSortOption::MostRecent => {
            reviews.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        }
        ReviewSortOption::MostHelpful => {
            reviews.sort_by(|a, b| b.helpful_count().cmp(&a.helpful_count()));
        }
        ReviewSortOption::HighestRating => {
            reviews.sort_by(|a, b| b.overall_rating().cmp(&a.overall_rating()));
        }
        ReviewSortOption::LowestRating => {
            reviews.sort_by(|a, b| a.overall_rating().cmp(&b.overall_rating()));
        }
        ReviewSortOption::MostProsCons => {
            reviews.sort_by(|a, b| b.pros_cons_count().cmp(&a.pros_cons_count()));
        }
        ReviewSortOption::VerifiedPurchases => {
            reviews.sort_by(|a, b| b.is_verified_purchase().cmp(&a.is_verified_purchase()));
        }
    }
}

fn upgrade_legacy_review(legacy: &PerfumeReview) -> EnhancedPerfumeReview {
    let title = match legacy.comment.as_deref() {
        Some(comment) if !comment.is_empty() => {
            let mut title: String = comment.chars().take(50).collect();
            title.push_str("...");
            title
        }
        _ => "User Review".to_string(),
    };

    EnhancedPerfumeReview {
        id: legacy.id,
        perfume_id: legacy.perfume_id,
        user_name: legacy.user_name.clone(),
        user_email: None,
        overall_rating: match legacy.rating {
            ReviewRating::Like => 5,
            ReviewRating::Dislike => 2,
        },
        longevity_rating: LongevityRating::Average,
        sillage_rating: SillageRating::Moderate,
        value_rating: 3,
        title,
        comment: legacy.comment.clone().unwrap_or_default(),
        pros: Vec::new(),
        cons: Vec::new(),
        occasions: Vec::new(),
        seasons: Vec::new(),
        would_repurchase: legacy.rating == ReviewRating::Like,
        is_verified_purchase: false,
        helpful_count: 0,
        created_at: legacy.created_at,
        updated_at: legacy.updated_at,
    }
}
