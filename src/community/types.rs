// src/community/types.rs
//! Review record types, rating scales, and the persisted store state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Legacy thumbs-style rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewRating {
    Like,
    Dislike,
}

/// Legacy review: a simple like/dislike with an optional comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfumeReview {
    pub id: i64,
    pub perfume_id: i64,
    pub user_name: String,
    pub rating: ReviewRating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived per-perfume counters for legacy reviews.
///
/// Invariant: `average_rating = 5 * total_likes / (total_likes + total_dislikes)`
/// when the denominator is nonzero, else 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfumeReviewStats {
    pub perfume_id: i64,
    pub total_likes: u64,
    pub total_dislikes: u64,
    pub total_comments: u64,
    pub average_rating: f64,
}

impl PerfumeReviewStats {
    pub fn zeroed(perfume_id: i64) -> Self {
        Self {
            perfume_id,
            total_likes: 0,
            total_dislikes: 0,
            total_comments: 0,
            average_rating: 0.0,
        }
    }
}

/// Partial update for [`PerfumeReviewStats`]; only the provided fields are
/// overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerfumeReviewStatsPatch {
    pub total_likes: Option<u64>,
    pub total_dislikes: Option<u64>,
    pub total_comments: Option<u64>,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LongevityRating {
    VeryPoor,
    Poor,
    Average,
    Good,
    Excellent,
}

impl LongevityRating {
    /// Position on the 1-5 scale used for averaging.
    pub fn score(self) -> u8 {
        match self {
            LongevityRating::VeryPoor => 1,
            LongevityRating::Poor => 2,
            LongevityRating::Average => 3,
            LongevityRating::Good => 4,
            LongevityRating::Excellent => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SillageRating {
    VeryLight,
    Light,
    Moderate,
    Heavy,
    VeryHeavy,
}

impl SillageRating {
    pub fn score(self) -> u8 {
        match self {
            SillageRating::VeryLight => 1,
            SillageRating::Light => 2,
            SillageRating::Moderate => 3,
            SillageRating::Heavy => 4,
            SillageRating::VeryHeavy => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occasion {
    Daily,
    Work,
    Casual,
    DateNight,
    Formal,
    Party,
    Wedding,
    Sport,
    Travel,
    SpecialOccasion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    AllSeason,
}

/// Full-form review with multi-axis ratings and usage context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedPerfumeReview {
    pub id: i64,
    pub perfume_id: i64,
    pub user_name: String,
    pub user_email: Option<String>,

    /// Overall rating on the 1-5 scale.
    pub overall_rating: u8,
    pub longevity_rating: LongevityRating,
    pub sillage_rating: SillageRating,
    /// Price/value relationship on the 1-5 scale.
    pub value_rating: u8,

    pub title: String,
    pub comment: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,

    pub occasions: Vec<Occasion>,
    pub seasons: Vec<Season>,
    pub would_repurchase: bool,

    pub is_verified_purchase: bool,
    pub helpful_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field-wise patch for an [`EnhancedPerfumeReview`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancedReviewPatch {
    pub overall_rating: Option<u8>,
    pub longevity_rating: Option<LongevityRating>,
    pub sillage_rating: Option<SillageRating>,
    pub value_rating: Option<u8>,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub pros: Option<Vec<String>>,
    pub cons: Option<Vec<String>>,
    pub occasions: Option<Vec<Occasion>>,
    pub seasons: Option<Vec<Season>>,
    pub would_repurchase: Option<bool>,
}

/// Count of reviews at each overall rating level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDistribution {
    #[serde(rename = "1")]
    pub one: u64,
    #[serde(rename = "2")]
    pub two: u64,
    #[serde(rename = "3")]
    pub three: u64,
    #[serde(rename = "4")]
    pub four: u64,
    #[serde(rename = "5")]
    pub five: u64,
}

impl RatingDistribution {
    pub fn record(&mut self, rating: u8) {
        match rating {
            1 => self.one += 1,
            2 => self.two += 1,
            3 => self.three += 1,
            4 => self.four += 1,
            5 => self.five += 1,
            _ => {}
        }
    }

    pub fn total(&self) -> u64 {
        self.one + self.two + self.three + self.four + self.five
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccasionCount {
    pub occasion: Occasion,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonCount {
    pub season: Season,
    pub count: u64,
}

/// Aggregates over the enhanced reviews of one perfume. The legacy counters
/// are carried alongside so thumb reviews keep contributing after an upgrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedPerfumeReviewStats {
    pub perfume_id: i64,

    pub total_reviews: u64,
    pub average_rating: f64,
    pub rating_distribution: RatingDistribution,

    /// 1-5 scale averages.
    pub average_longevity: f64,
    pub average_sillage: f64,
    pub average_value: f64,

    /// Top occasions/seasons by mention count, at most five of each.
    pub popular_occasions: Vec<OccasionCount>,
    pub popular_seasons: Vec<SeasonCount>,
    /// Whole percentage of reviewers who would repurchase.
    pub repurchase_rate: u64,

    pub total_helpful_votes: u64,
    /// Whole percentage of reviews from verified purchases.
    pub verified_purchase_rate: u64,

    pub total_likes: u64,
    pub total_dislikes: u64,
    pub total_comments: u64,
}

impl EnhancedPerfumeReviewStats {
    pub fn zeroed(perfume_id: i64) -> Self {
        Self {
            perfume_id,
            total_reviews: 0,
            average_rating: 0.0,
            rating_distribution: RatingDistribution::default(),
            average_longevity: 0.0,
            average_sillage: 0.0,
            average_value: 0.0,
            popular_occasions: Vec::new(),
            popular_seasons: Vec::new(),
            repurchase_rate: 0,
            total_helpful_votes: 0,
            verified_purchase_rate: 0,
            total_likes: 0,
            total_dislikes: 0,
            total_comments: 0,
        }
    }
}

/// Either review shape, stored in one list per perfume.
///
/// Untagged: enhanced reviews carry fields legacy ones never have, so
/// deserialization tries the enhanced shape first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredReview {
    Enhanced(EnhancedPerfumeReview),
    Legacy(PerfumeReview),
}

impl StoredReview {
    pub fn id(&self) -> i64 {
        match self {
            StoredReview::Enhanced(r) => r.id,
            StoredReview::Legacy(r) => r.id,
        }
    }

    pub fn perfume_id(&self) -> i64 {
        match self {
            StoredReview::Enhanced(r) => r.perfume_id,
            StoredReview::Legacy(r) => r.perfume_id,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            StoredReview::Enhanced(r) => r.created_at,
            StoredReview::Legacy(r) => r.created_at,
        }
    }

    /// Enhanced-only sort keys fall back to zero/false for legacy reviews.
    pub fn overall_rating(&self) -> u8 {
        match self {
            StoredReview::Enhanced(r) => r.overall_rating,
            StoredReview::Legacy(_) => 0,
        }
    }

    pub fn helpful_count(&self) -> u64 {
        match self {
            StoredReview::Enhanced(r) => r.helpful_count,
            StoredReview::Legacy(_) => 0,
        }
    }

    pub fn pros_cons_count(&self) -> usize {
        match self {
            StoredReview::Enhanced(r) => r.pros.len() + r.cons.len(),
            StoredReview::Legacy(_) => 0,
        }
    }

    pub fn is_verified_purchase(&self) -> bool {
        match self {
            StoredReview::Enhanced(r) => r.is_verified_purchase,
            StoredReview::Legacy(_) => false,
        }
    }

    pub fn as_enhanced(&self) -> Option<&EnhancedPerfumeReview> {
        match self {
            StoredReview::Enhanced(r) => Some(r),
            StoredReview::Legacy(_) => None,
        }
    }
}

/// Either stats shape, stored in one map per perfume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewStats {
    Enhanced(EnhancedPerfumeReviewStats),
    Legacy(PerfumeReviewStats),
}

impl ReviewStats {
    pub fn total_likes(&self) -> u64 {
        match self {
            ReviewStats::Enhanced(s) => s.total_likes,
            ReviewStats::Legacy(s) => s.total_likes,
        }
    }

    pub fn total_dislikes(&self) -> u64 {
        match self {
            ReviewStats::Enhanced(s) => s.total_dislikes,
            ReviewStats::Legacy(s) => s.total_dislikes,
        }
    }

    pub fn total_comments(&self) -> u64 {
        match self {
            ReviewStats::Enhanced(s) => s.total_comments,
            ReviewStats::Legacy(s) => s.total_comments,
        }
    }

    pub fn average_rating(&self) -> f64 {
        match self {
            ReviewStats::Enhanced(s) => s.average_rating,
            ReviewStats::Legacy(s) => s.average_rating,
        }
    }

    pub fn as_enhanced(&self) -> Option<&EnhancedPerfumeReviewStats> {
        match self {
            ReviewStats::Enhanced(s) => Some(s),
            ReviewStats::Legacy(_) => None,
        }
    }
}

/// Review list filters; `None` on an axis means "all".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewFilters {
    pub rating: Option<u8>,
    pub longevity: Option<LongevityRating>,
    pub sillage: Option<SillageRating>,
    pub occasion: Option<Occasion>,
    pub season: Option<Season>,
    pub would_repurchase: Option<bool>,
    pub verified_purchase: Option<bool>,
    #[serde(default)]
    pub has_pros_cons: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewSortOption {
    MostRecent,
    MostHelpful,
    HighestRating,
    LowestRating,
    MostProsCons,
    VerifiedPurchases,
}

/// The complete persisted store state: one JSON document under the store's
/// storage path, reloaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityState {
    /// Per-perfume reviews, newest first.
    #[serde(default)]
    pub reviews: HashMap<i64, Vec<StoredReview>>,
    #[serde(default)]
    pub review_stats: HashMap<i64, ReviewStats>,
    /// Enhanced reviews grouped by user (email when present, else name).
    #[serde(default)]
    pub user_reviews: HashMap<String, Vec<EnhancedPerfumeReview>>,
    /// Helpful voters per review id.
    #[serde(default)]
    pub helpful_votes: HashMap<i64, HashSet<String>>,
    #[serde(default)]
    pub reported_reviews: HashSet<i64>,
    #[serde(default)]
    pub current_filters: HashMap<i64, ReviewFilters>,
    #[serde(default)]
    pub current_sort: HashMap<i64, ReviewSortOption>,
}
