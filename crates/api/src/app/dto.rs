//! Request/response bodies that have no domain counterpart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use barbermatch_auth::Role;
use barbermatch_booking::parse_appointment_date;
use barbermatch_core::DomainResult;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeImageRequest {
    pub image: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceShapeQuery {
    pub face_shape: String,
}

/// `?startDate&endDate`; the range applies only when both are given.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRangeQuery {
    pub fn range(&self) -> DomainResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        match (self.start_date.as_deref(), self.end_date.as_deref()) {
            (Some(start), Some(end)) => Ok(Some((parse_appointment_date(start)?, parse_appointment_date(end)?))),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReminderResponse {
    pub delivered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub users: u64,
    pub appointments: u64,
    pub barbershops: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_needs_both_bounds() {
        let only_start = DateRangeQuery {
            start_date: Some("2025-09-01".into()),
            end_date: None,
        };
        assert_eq!(only_start.range().unwrap(), None);

        let both = DateRangeQuery {
            start_date: Some("2025-09-01".into()),
            end_date: Some("2025-09-30T23:59:59Z".into()),
        };
        let (start, end) = both.range().unwrap().unwrap();
        assert!(start < end);

        let broken = DateRangeQuery {
            start_date: Some("yesterday".into()),
            end_date: Some("2025-09-30".into()),
        };
        assert!(broken.range().is_err());
    }
}
