// src/quiz/validation.rs
//! Validation of quiz answers and conversion to the API request shape.

use crate::quiz::types::{
    AdvancedRecommendationRequest, QuizPreferences, SimpleQuizAnswers,
};

/// Checks the simplified quiz flow's answers. Returns one human-readable
/// message per problem; empty means valid.
pub fn validate_simple_quiz(answers: &SimpleQuizAnswers) -> Vec<String> {
    let mut errors = Vec::new();

    if answers.gender.is_none() {
        errors.push("Please select your gender preference".to_string());
    }

    if answers.scent_personalities.len() < 2 {
        errors.push("Please select at least 2 scent personalities".to_string());
    }
    if answers.scent_personalities.len() > 3 {
        errors.push("Please select no more than 3 scent personalities".to_string());
    }

    if answers.occasions.len() < 2 {
        errors.push("Please select at least 2 occasions".to_string());
    }

    if answers.seasons.is_empty() {
        errors.push("Please select at least 1 season preference".to_string());
    }
    if answers.seasons.len() > 2 {
        errors.push("Please select no more than 2 seasons".to_string());
    }

    if answers.longevity.is_none() {
        errors.push("Please select longevity preference".to_string());
    }

    if answers.impression.is_none() {
        errors.push("Please select desired impression".to_string());
    }

    errors
}

/// Checks the full-form preferences: at least one scent preference and one
/// occasion must be chosen.
pub fn validate_quiz_preferences(preferences: &QuizPreferences) -> Vec<String> {
    let mut errors = Vec::new();

    if !preferences.has_scent_preference() {
        errors.push("Please select at least one scent preference".to_string());
    }
    if !preferences.has_occasion() {
        errors.push("Please select at least one occasion".to_string());
    }

    errors
}

/// Maps raw simplified-quiz answers onto the recommendation request,
/// defaulting the axes the short flow never asks about.
pub fn simple_answers_to_request(
    answers: &SimpleQuizAnswers,
    max_results: Option<usize>,
) -> AdvancedRecommendationRequest {
    let has = |list: &[String], value: &str| list.iter().any(|item| item == value);

    let preferences = QuizPreferences {
        daily_wear: has(&answers.occasions, "daily_wear"),
        special_events: has(&answers.occasions, "special_events"),
        night_out: has(&answers.occasions, "night_out"),
        work: has(&answers.occasions, "work_office"),
        dates: has(&answers.occasions, "date_night"),

        spring: has(&answers.seasons, "spring_summer"),
        summer: has(&answers.seasons, "spring_summer"),
        fall: has(&answers.seasons, "fall_winter"),
        winter: has(&answers.seasons, "fall_winter"),
        year_round: has(&answers.seasons, "year_round"),

        light_fresh: has(&answers.scent_personalities, "light_fresh"),
        warm_spicy: has(&answers.scent_personalities, "warm_spicy"),
        sweet_gourmand: has(&answers.scent_personalities, "sweet_gourmand"),
        woody_earthy: has(&answers.scent_personalities, "woody_earthy"),
        floral_romantic: has(&answers.scent_personalities, "floral_romantic"),
        citrus_energizing: has(&answers.scent_personalities, "citrus_energizing"),

        longevity: answers
            .longevity
            .clone()
            .unwrap_or_else(|| "medium".to_string()),
        // The short flow never asks about these axes.
        sillage: "moderate".to_string(),
        projection: "moderate".to_string(),

        classic: false,
        modern: true,
        unique: false,
        safe_bet: false,

        price_range: "mid".to_string(),
    };

    let known_impressions = [
        "confident",
        "elegant",
        "playful",
        "mysterious",
        "professional",
        "romantic",
    ];
    let desired_impression = answers
        .impression
        .as_deref()
        .filter(|impression| known_impressions.contains(impression))
        .unwrap_or("confident")
        .to_string();

    AdvancedRecommendationRequest {
        quiz_preferences: preferences,
        current_situation: answers
            .occasions
            .first()
            .cloned()
            .unwrap_or_else(|| "casual".to_string()),
        season: "spring".to_string(),
        time_of_day: "evening".to_string(),
        desired_impression,
        max_results: max_results.or(Some(6)),
        exclude_ids: Some(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete_answers() -> SimpleQuizAnswers {
        SimpleQuizAnswers {
            gender: Some("unisex".to_string()),
            scent_personalities: vec!["light_fresh".to_string(), "woody_earthy".to_string()],
            occasions: vec!["daily_wear".to_string(), "work_office".to_string()],
            seasons: vec!["spring_summer".to_string()],
            longevity: Some("long".to_string()),
            impression: Some("elegant".to_string()),
        }
    }

    #[test]
    fn complete_answers_are_valid() {
        assert!(validate_simple_quiz(&complete_answers()).is_empty());
    }

    #[test]
    fn each_missing_answer_is_reported() {
        let errors = validate_simple_quiz(&SimpleQuizAnswers::default());
        assert_eq!(errors.len(), 6);
        assert!(errors.iter().any(|e| e.contains("gender")));
        assert!(errors.iter().any(|e| e.contains("scent personalities")));
        assert!(errors.iter().any(|e| e.contains("occasions")));
        assert!(errors.iter().any(|e| e.contains("season")));
        assert!(errors.iter().any(|e| e.contains("longevity")));
        assert!(errors.iter().any(|e| e.contains("impression")));
    }

    #[test]
    fn over_limit_selections_are_reported() {
        let mut answers = complete_answers();
        answers.scent_personalities = vec![
            "light_fresh".to_string(),
            "warm_spicy".to_string(),
            "woody_earthy".to_string(),
            "sweet_gourmand".to_string(),
        ];
        answers.seasons = vec![
            "spring_summer".to_string(),
            "fall_winter".to_string(),
            "year_round".to_string(),
        ];

        let errors = validate_simple_quiz(&answers);
        assert!(errors
            .iter()
            .any(|e| e.contains("no more than 3 scent personalities")));
        assert!(errors.iter().any(|e| e.contains("no more than 2 seasons")));
    }

    #[test]
    fn conversion_maps_each_axis() {
        let request = simple_answers_to_request(&complete_answers(), None);
        let prefs = &request.quiz_preferences;

        assert!(prefs.daily_wear);
        assert!(prefs.work);
        assert!(!prefs.night_out);
        assert!(prefs.spring && prefs.summer);
        assert!(!prefs.fall && !prefs.winter);
        assert!(prefs.light_fresh && prefs.woody_earthy);
        assert_eq!(prefs.longevity, "long");
        assert_eq!(prefs.sillage, "moderate");
        assert_eq!(request.current_situation, "daily_wear");
        assert_eq!(request.desired_impression, "elegant");
        assert_eq!(request.max_results, Some(6));
    }

    #[test]
    fn unknown_impression_defaults_to_confident() {
        let mut answers = complete_answers();
        answers.impression = Some("dazzling".to_string());

        let request = simple_answers_to_request(&answers, Some(3));
        assert_eq!(request.desired_impression, "confident");
        assert_eq!(request.max_results, Some(3));
    }

    #[test]
    fn full_form_preferences_require_scent_and_occasion() {
        let errors = validate_quiz_preferences(&QuizPreferences::default());
        assert_eq!(errors.len(), 2);

        let preferences = QuizPreferences {
            light_fresh: true,
            work: true,
            ..Default::default()
        };
        assert!(validate_quiz_preferences(&preferences).is_empty());
    }
}
