// src/quiz/client.rs
//! HTTP client for the quiz recommendation API.

use crate::error::{CatalogError, Result};
use crate::quiz::types::{
    AdvancedRecommendationRequest, AdvancedRecommendationResponse, PersonalityQuiz,
    SimpleQuizAnswers,
};
use crate::quiz::validation::{simple_answers_to_request, validate_simple_quiz};
use log::{debug, error};
use serde::Deserialize;
use std::time::Duration;

/// Default deadline for recommendation requests; scoring can take a while
/// server-side.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
}

pub struct QuizClient {
    client: reqwest::Client,
    api_base_url: String,
    timeout: Duration,
    /// Configured cap on returned recommendations; `None` lets the request
    /// default apply.
    max_results: Option<usize>,
}

impl QuizClient {
    pub fn new(
        client: reqwest::Client,
        api_base_url: &str,
        timeout: Duration,
        max_results: Option<usize>,
    ) -> Self {
        Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            timeout,
            max_results,
        }
    }

    /// Validates the simplified quiz answers and builds the recommendation
    /// request from them, applying the configured result cap.
    pub fn build_recommendation_request(
        &self,
        answers: &SimpleQuizAnswers,
    ) -> Result<AdvancedRecommendationRequest> {
        let problems = validate_simple_quiz(answers);
        if !problems.is_empty() {
            return Err(CatalogError::InvalidInput(problems.join("; ")));
        }
        Ok(simple_answers_to_request(answers, self.max_results))
    }

    /// End-to-end simplified flow: validate, convert, request.
    pub async fn recommendations_for_answers(
        &self,
        answers: &SimpleQuizAnswers,
    ) -> Result<AdvancedRecommendationResponse> {
        let request = self.build_recommendation_request(answers)?;
        self.get_recommendations(&request).await
    }

    /// Gets personalized recommendations for the given quiz answers.
    pub async fn get_recommendations(
        &self,
        request: &AdvancedRecommendationRequest,
    ) -> Result<AdvancedRecommendationResponse> {
        let url = format!("{}/quiz/recommendations", self.api_base_url);
        debug!("Requesting recommendations from {}", url);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Recommendation request to {} failed: {}", url, e);
                CatalogError::from(e)
            })?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Persists a completed quiz server-side.
    pub async fn save_quiz_response(&self, quiz: &PersonalityQuiz) -> Result<PersonalityQuiz> {
        let url = format!("{}/quiz/save", self.api_base_url);
        let response = self.client.post(&url).json(quiz).send().await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(response.json().await?)
    }

    pub async fn get_quiz_stats(&self) -> Result<serde_json::Value> {
        let url = format!("{}/quiz/stats", self.api_base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(response.json().await?)
    }

    pub async fn get_personality_types(&self) -> Result<Vec<serde_json::Value>> {
        let url = format!("{}/quiz/personality-types", self.api_base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Extracts the server's error message when it sent one, otherwise
    /// reports the status code.
    async fn api_error(response: reqwest::Response) -> CatalogError {
        let status = response.status();
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("HTTP {}", status));
        CatalogError::RecommendationApiError(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client(max_results: Option<usize>) -> QuizClient {
        QuizClient::new(
            reqwest::Client::new(),
            "http://localhost:8080/api",
            DEFAULT_REQUEST_TIMEOUT,
            max_results,
        )
    }

    fn answers() -> SimpleQuizAnswers {
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
    fn configured_result_cap_flows_into_the_request() {
        let request = client(Some(3)).build_recommendation_request(&answers()).unwrap();
        assert_eq!(request.max_results, Some(3));

        let request = client(None).build_recommendation_request(&answers()).unwrap();
        assert_eq!(request.max_results, Some(6));
    }

    #[test]
    fn invalid_answers_are_rejected_before_any_request() {
        let err = client(None)
            .build_recommendation_request(&SimpleQuizAnswers::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInput(_)));
    }
}
