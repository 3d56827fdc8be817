// src/quiz/mod.rs
//! Onboarding quiz support: recommendation API client, answer validation,
//! and conversion of raw answers to the request shape.

pub mod client;
pub mod types;
pub mod validation;

pub use client::QuizClient;
pub use types::*;
pub use validation::{simple_answers_to_request, validate_quiz_preferences, validate_simple_quiz};
