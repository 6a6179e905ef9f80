//! Advisory content checks for FAQ and review copy.
//!
//! Validators never fail: they return human-readable warnings for the content
//! author and leave generation untouched.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;
use visionsite_core::{Faq, Review};

pub const MIN_QUESTION_LEN: usize = 10;
pub const MIN_ANSWER_LEN: usize = 20;
pub const MAX_ANSWER_LEN: usize = 1200;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentWarning {
    #[error("FAQ list is empty")]
    EmptyFaqList,

    #[error("FAQ {index}: question too short ({len} characters, minimum 10)")]
    QuestionTooShort { index: usize, len: usize },

    #[error("FAQ {index}: question should end with '?'")]
    MissingQuestionMark { index: usize },

    #[error("FAQ {index}: answer too short ({len} characters, minimum 20)")]
    AnswerTooShort { index: usize, len: usize },

    #[error("FAQ {index}: answer too long ({len} characters, maximum 1200)")]
    AnswerTooLong { index: usize, len: usize },

    #[error("FAQ {index}: duplicate question '{question}'")]
    DuplicateQuestion { index: usize, question: String },

    #[error("review {index}: rating {rating} outside 1-5")]
    RatingOutOfRange { index: usize, rating: u8 },

    #[error("review {index}: body is empty")]
    EmptyReviewBody { index: usize },

    #[error("review {index}: date '{date}' is not YYYY-MM-DD")]
    InvalidReviewDate { index: usize, date: String },

    #[error("review {index}: review may contain sensitive information matching pattern {pattern}")]
    SensitiveInformation { index: usize, pattern: &'static str },
}

lazy_static! {
    static ref SENSITIVE_PATTERNS: Vec<(&'static str, Regex)> = vec![
        ("ssn", Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap()),
        (
            "date_of_birth",
            Regex::new(r"(?i)\b(dob|d\.o\.b\.|date of birth|born on)\b").unwrap()
        ),
        (
            "medical_record_number",
            Regex::new(r"(?i)\b(mrn|medical record(\s+(number|no\.?|#))?)\b").unwrap()
        ),
        (
            "phone_number",
            Regex::new(r"\(?\b\d{3}\)?[-.\s]?\d{3}[-.\s]\d{4}\b").unwrap()
        ),
        (
            "email",
            Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap()
        ),
    ];
}

/// FAQ copy checks, reported per 1-based FAQ position.
pub struct FaqValidator;

impl FaqValidator {
    pub fn check(faqs: &[Faq]) -> Vec<ContentWarning> {
        if faqs.is_empty() {
            return vec![ContentWarning::EmptyFaqList];
        }

        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for (i, faq) in faqs.iter().enumerate() {
            let index = i + 1;
            let question = faq.question.trim();
            let answer = faq.answer.trim();

            let len = question.chars().count();
            if len < MIN_QUESTION_LEN {
                warnings.push(ContentWarning::QuestionTooShort { index, len });
            }
            if !question.ends_with('?') {
                warnings.push(ContentWarning::MissingQuestionMark { index });
            }

            let len = answer.chars().count();
            if len < MIN_ANSWER_LEN {
                warnings.push(ContentWarning::AnswerTooShort { index, len });
            } else if len > MAX_ANSWER_LEN {
                warnings.push(ContentWarning::AnswerTooLong { index, len });
            }

            if !seen.insert(question.to_lowercase()) {
                warnings.push(ContentWarning::DuplicateQuestion {
                    index,
                    question: question.to_string(),
                });
            }
        }

        warnings
    }

    pub fn validate(faqs: &[Faq]) -> Vec<String> {
        Self::check(faqs).iter().map(ToString::to_string).collect()
    }
}

/// Review checks, including a scan for text that looks like protected
/// health information.
pub struct ReviewValidator;

impl ReviewValidator {
    pub fn check(reviews: &[Review]) -> Vec<ContentWarning> {
        let mut warnings = Vec::new();

        for (i, review) in reviews.iter().enumerate() {
            let index = i + 1;

            if !(1..=5).contains(&review.rating) {
                warnings.push(ContentWarning::RatingOutOfRange {
                    index,
                    rating: review.rating,
                });
            }
            if review.body.trim().is_empty() {
                warnings.push(ContentWarning::EmptyReviewBody { index });
            }
            if !is_iso_date(&review.date) {
                warnings.push(ContentWarning::InvalidReviewDate {
                    index,
                    date: review.date.clone(),
                });
            }

            for (pattern, regex) in SENSITIVE_PATTERNS.iter() {
                if regex.is_match(&review.body) {
                    warnings.push(ContentWarning::SensitiveInformation {
                        index,
                        pattern: *pattern,
                    });
                }
            }
        }

        warnings
    }

    pub fn validate(reviews: &[Review]) -> Vec<String> {
        Self::check(reviews).iter().map(ToString::to_string).collect()
    }
}

fn is_iso_date(date: &str) -> bool {
    date.len() == 10 && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}
