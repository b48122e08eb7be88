use serde::{Deserialize, Serialize};

use crate::constants::{MAX_RESPONSES_PER_DAY, MAX_RESPONSES_PER_HOUR};
use crate::error::{AppError, Result};

/// Rate limit record tracking response submissions per account
///
/// Response submission is open to anyone who knows the account ID and form
/// title, so it is the one mutation that needs throttling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRateLimit {
    /// Submissions in the current hour window
    pub responses_this_hour: u32,
    /// Submissions in the current day window
    pub responses_today: u32,
    /// Unix timestamp of the last submission
    pub last_response_at: Option<i64>,
    /// Unix timestamp when the hourly counter resets
    pub hour_reset_at: i64,
    /// Unix timestamp when the daily counter resets
    pub day_reset_at: i64,
}

impl ResponseRateLimit {
    /// Create a new rate limit record with initial reset times
    pub fn new(now: i64) -> Self {
        Self {
            responses_this_hour: 0,
            responses_today: 0,
            last_response_at: None,
            hour_reset_at: now + 3600,
            day_reset_at: now + 86400,
        }
    }

    /// Check if rate limits allow a new submission, and update counters if so.
    /// Returns Ok(()) if allowed, Err(RateLimitExceeded) if not.
    pub fn check_and_increment(&mut self, now: i64) -> Result<()> {
        // Reset counters if time windows have expired
        if now >= self.hour_reset_at {
            self.responses_this_hour = 0;
            self.hour_reset_at = now + 3600;
        }

        if now >= self.day_reset_at {
            self.responses_today = 0;
            self.day_reset_at = now + 86400;
        }

        // Check limits before incrementing
        if self.responses_this_hour >= MAX_RESPONSES_PER_HOUR {
            tracing::warn!(
                "Hourly response limit would be exceeded: {}/{}",
                self.responses_this_hour,
                MAX_RESPONSES_PER_HOUR
            );
            return Err(AppError::RateLimitExceeded);
        }

        if self.responses_today >= MAX_RESPONSES_PER_DAY {
            tracing::warn!(
                "Daily response limit would be exceeded: {}/{}",
                self.responses_today,
                MAX_RESPONSES_PER_DAY
            );
            return Err(AppError::RateLimitExceeded);
        }

        // Increment counters
        self.responses_this_hour += 1;
        self.responses_today += 1;
        self.last_response_at = Some(now);

        Ok(())
    }
}
