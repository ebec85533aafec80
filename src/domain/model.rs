use crate::utils::error::{ItineraryError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range};
use chrono::Month;
use serde::{Deserialize, Serialize};

pub const MIN_DAYS: u8 = 1;
pub const MAX_DAYS: u8 = 7;
pub const DEFAULT_LOCATION: &str = "Ho Chi Minh";
pub const DEFAULT_DAYS: u8 = 2;

/// 模型呼叫失敗時一律回傳的訊息
pub const FAILURE_SENTINEL: &str = "⚠️ Unable to generate itinerary. Please try again.";

pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// One form submission. Only constructible with a non-empty location and a
/// day count inside `MIN_DAYS..=MAX_DAYS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    location: String,
    days: u8,
    month: Month,
}

impl TripRequest {
    pub fn new(location: impl Into<String>, days: u8, month: Month) -> Result<Self> {
        let location = location.into();
        validate_non_empty_string("location", &location)
            .map_err(|_| ItineraryError::validation("Please enter a location"))?;
        validate_range("days", days, MIN_DAYS, MAX_DAYS)?;

        Ok(Self {
            location: location.trim().to_string(),
            days,
            month,
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn days(&self) -> u8 {
        self.days
    }

    pub fn month(&self) -> Month {
        self.month
    }
}

/// Accepts full English month names and three-letter abbreviations, any case.
pub fn parse_month(value: &str) -> Result<Month> {
    value
        .trim()
        .parse::<Month>()
        .map_err(|_| ItineraryError::InvalidConfigValueError {
            field: "month".to_string(),
            value: value.to_string(),
            reason: format!(
                "Expected one of: {}",
                MONTHS.iter().map(|m| m.name()).collect::<Vec<_>>().join(", ")
            ),
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationOutcome {
    Itinerary(String),
    Failed { message: String, cause: String },
}

impl GenerationOutcome {
    pub fn failed(cause: impl Into<String>) -> Self {
        Self::Failed {
            message: FAILURE_SENTINEL.to_string(),
            cause: cause.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Itinerary(_))
    }

    /// 要顯示給使用者的文字
    pub fn display_text(&self) -> &str {
        match self {
            Self::Itinerary(text) => text,
            Self::Failed { message, .. } => message,
        }
    }
}
