//! Appointment record, status and date handling.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use barbermatch_auth::AccountView;
use barbermatch_core::{AccountId, AppointmentId, BarberId, BarbershopId, DomainError, DomainResult, Entity};

use crate::{Barber, Barbershop};

/// Booking status.
///
/// Transitions are unrestricted: any status may follow any other.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(DomainError::validation(format!(
                "status must be one of: pending, confirmed, cancelled (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub customer_id: AccountId,
    pub barber_id: BarberId,
    pub barbershop_id: BarbershopId,
}

impl Appointment {
    /// Inclusive on both ends.
    pub fn falls_within(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start <= self.date && self.date <= end
    }

    /// Field-level overwrite: only fields present in `patch` change.
    pub fn apply(&mut self, patch: AppointmentPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(customer_id) = patch.customer_id {
            self.customer_id = customer_id;
        }
        if let Some(barber_id) = patch.barber_id {
            self.barber_id = barber_id;
        }
        if let Some(barbershop_id) = patch.barbershop_id {
            self.barbershop_id = barbershop_id;
        }
    }
}

impl Entity for Appointment {
    type Id = AppointmentId;

    fn id(&self) -> AppointmentId {
        self.id
    }
}

/// Already-validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentPatch {
    pub date: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub customer_id: Option<AccountId>,
    pub barber_id: Option<BarberId>,
    pub barbershop_id: Option<BarbershopId>,
}

impl AppointmentPatch {
    pub fn status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Appointment with customer, barber and barbershop attached.
///
/// References are not checked at booking time, so any of them may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetails {
    pub id: AppointmentId,
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub user: Option<AccountView>,
    pub barber: Option<Barber>,
    pub barbershop: Option<Barbershop>,
}

/// Parse a booking date.
///
/// Accepts RFC 3339 timestamps (`2025-09-10T10:00:00.000Z`), offset-less
/// date-times (read as UTC) and bare dates (midnight UTC). Anything that is
/// not a real calendar date-time is a validation error.
pub fn parse_appointment_date(raw: &str) -> DomainResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(DomainError::validation("Invalid date format"))
}

/// Serialize as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_appointment_date(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Duration, TimeZone, Timelike};
    use proptest::prelude::*;

    use super::*;

    fn at(date: DateTime<Utc>) -> Appointment {
        Appointment {
            id: AppointmentId::new(),
            date,
            status: AppointmentStatus::Pending,
            customer_id: AccountId::new(),
            barber_id: BarberId::new(),
            barbershop_id: BarbershopId::new(),
        }
    }

    #[test]
    fn parses_javascript_style_timestamp() {
        let dt = parse_appointment_date("2025-09-10T10:00:00.000Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 9, 10, 10, 0, 0).unwrap());
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        let dt = parse_appointment_date("2025-09-10T12:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        let dt = parse_appointment_date("2025-09-10").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2025, 9, 10, 0));
    }

    #[test]
    fn rejects_non_dates() {
        for raw in ["not-a-date", "", "2025-02-30T10:00:00Z", "2025-13-01", "10:00"] {
            assert!(
                matches!(parse_appointment_date(raw), Err(DomainError::Validation(_))),
                "{raw}"
            );
        }
    }

    #[test]
    fn serialized_date_roundtrips_exactly() {
        let raw = "2025-09-10T10:00:00.000Z";
        let appointment = Appointment {
            id: AppointmentId::new(),
            date: parse_appointment_date(raw).unwrap(),
            status: AppointmentStatus::Pending,
            customer_id: AccountId::new(),
            barber_id: BarberId::new(),
            barbershop_id: BarbershopId::new(),
        };
        let json = serde_json::to_value(&appointment).unwrap();
        assert_eq!(json["date"], raw);
        assert_eq!(json["status"], "pending");

        let back: Appointment = serde_json::from_value(json).unwrap();
        assert_eq!(back, appointment);
    }

    #[test]
    fn patch_overwrites_only_supplied_fields() {
        let mut appointment = Appointment {
            id: AppointmentId::new(),
            date: Utc.with_ymd_and_hms(2025, 9, 10, 10, 0, 0).unwrap(),
            status: AppointmentStatus::Pending,
            customer_id: AccountId::new(),
            barber_id: BarberId::new(),
            barbershop_id: BarbershopId::new(),
        };
        let before = appointment.clone();
        appointment.apply(AppointmentPatch::status(AppointmentStatus::Confirmed));
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
        assert_eq!(appointment.date, before.date);
        assert_eq!(appointment.barber_id, before.barber_id);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let start = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 9, 30, 0, 0, 0).unwrap();
        assert!(at(start).falls_within(start, end));
        assert!(at(end).falls_within(start, end));
        assert!(!at(end + Duration::milliseconds(1)).falls_within(start, end));
        assert!(!at(start - Duration::milliseconds(1)).falls_within(start, end));
    }

    proptest! {
        #[test]
        fn falls_within_matches_ordering(date in 0i64..1_000_000, a in 0i64..1_000_000, b in 0i64..1_000_000) {
            let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
            let date = base + Duration::seconds(date);
            let (start, end) = (base + Duration::seconds(a), base + Duration::seconds(b));
            prop_assert_eq!(at(date).falls_within(start, end), start <= date && date <= end);
            if start > end {
                prop_assert!(!at(date).falls_within(start, end));
            }
        }
    }
}
