// src/quiz/types.rs
//! Request/response types for the quiz recommendation API.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-axis answers gathered by the onboarding quiz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPreferences {
    // Occasion preferences
    pub daily_wear: bool,
    pub special_events: bool,
    pub night_out: bool,
    pub work: bool,
    pub dates: bool,

    // Seasonal preferences
    pub spring: bool,
    pub summer: bool,
    pub fall: bool,
    pub winter: bool,
    pub year_round: bool,

    // Scent preferences
    pub light_fresh: bool,
    pub warm_spicy: bool,
    pub sweet_gourmand: bool,
    pub woody_earthy: bool,
    pub floral_romantic: bool,
    pub citrus_energizing: bool,

    // Performance preferences
    pub longevity: String,
    pub sillage: String,
    pub projection: String,

    // Style preferences
    pub classic: bool,
    pub modern: bool,
    pub unique: bool,
    pub safe_bet: bool,

    pub price_range: String,
}

impl QuizPreferences {
    pub fn has_scent_preference(&self) -> bool {
        self.light_fresh
            || self.warm_spicy
            || self.sweet_gourmand
            || self.woody_earthy
            || self.floral_romantic
            || self.citrus_energizing
    }

    pub fn has_occasion(&self) -> bool {
        self.daily_wear || self.special_events || self.night_out || self.work || self.dates
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedRecommendationRequest {
    pub quiz_preferences: QuizPreferences,
    pub current_situation: String,
    pub season: String,
    pub time_of_day: String,
    pub desired_impression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityAnalysis {
    pub scent_personality: String,
    pub key_traits: Vec<String>,
    pub style_description: String,
    pub recommendation_style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AromaTagRef {
    pub id: i64,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfumeNote {
    pub id: i64,
    pub perfume_id: i64,
    #[serde(rename = "type")]
    pub note_type: String,
    pub note_name: String,
    pub intensity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedPerfume {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub description: String,
    #[serde(rename = "type")]
    pub perfume_type: String,
    pub category: String,
    pub longevity: String,
    pub sillage: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub aroma_tags: Vec<AromaTagRef>,
    #[serde(default)]
    pub notes: Vec<PerfumeNote>,
}

/// One scored recommendation with its per-factor breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfumeScore {
    pub perfume_id: i64,
    pub perfume: RecommendedPerfume,
    pub overall_score: f64,
    pub profile_match: f64,
    pub season_match: f64,
    pub occasion_match: f64,
    pub performance_match: f64,
    pub uniqueness_bonus: f64,
    pub match_reasons: Vec<String>,
    pub best_for: Vec<String>,
    pub wear_timing: Vec<String>,
    pub longevity: String,
    pub projection: String,
    pub confidence: f64,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationLogic {
    pub algorithm: String,
    pub factors_considered: Vec<String>,
    pub weighting: HashMap<String, f64>,
    pub process_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedRecommendationResponse {
    pub results: Vec<PerfumeScore>,
    pub personality_analysis: PersonalityAnalysis,
    pub recommendation_logic: RecommendationLogic,
    pub tips: Vec<String>,
    #[serde(default)]
    pub alternatives: Vec<serde_json::Value>,
}

/// A filled-in quiz submission, persisted server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalityQuiz {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<String>,
    pub preferences: QuizPreferences,
}

/// Raw answers from the simplified quiz flow, before conversion to the API
/// request shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleQuizAnswers {
    pub gender: Option<String>,
    #[serde(default)]
    pub scent_personalities: Vec<String>,
    #[serde(default)]
    pub occasions: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<String>,
    pub longevity: Option<String>,
    pub impression: Option<String>,
}
