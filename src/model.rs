//! Survey records as delivered by the backend, plus the fixed label and
//! attribute tables every aggregator shares.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::{DraftError, UnknownLevel};

/// Ordered satisfaction labels, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SatisfactionLevel {
    #[serde(rename = "Highly Satisfied")]
    HighlySatisfied,
    #[serde(rename = "Satisfied")]
    Satisfied,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Dissatisfied")]
    Dissatisfied,
    #[serde(rename = "Highly Dissatisfied")]
    HighlyDissatisfied,
}

impl SatisfactionLevel {
    pub const ALL: [SatisfactionLevel; 5] = [
        SatisfactionLevel::HighlySatisfied,
        SatisfactionLevel::Satisfied,
        SatisfactionLevel::Neutral,
        SatisfactionLevel::Dissatisfied,
        SatisfactionLevel::HighlyDissatisfied,
    ];

    /// Position in [`SatisfactionLevel::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            SatisfactionLevel::HighlySatisfied => "Highly Satisfied",
            SatisfactionLevel::Satisfied => "Satisfied",
            SatisfactionLevel::Neutral => "Neutral",
            SatisfactionLevel::Dissatisfied => "Dissatisfied",
            SatisfactionLevel::HighlyDissatisfied => "Highly Dissatisfied",
        }
    }

    /// Numeric score: 5 for `Highly Satisfied` down to 1 for `Highly Dissatisfied`.
    pub fn score(self) -> u8 {
        5 - self as u8
    }

    /// `Highly Satisfied` or `Satisfied`.
    pub fn is_satisfied(self) -> bool {
        matches!(
            self,
            SatisfactionLevel::HighlySatisfied | SatisfactionLevel::Satisfied
        )
    }
}

impl fmt::Display for SatisfactionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SatisfactionLevel {
    type Err = UnknownLevel;

    /// Only the exact canonical labels are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SatisfactionLevel::ALL
            .into_iter()
            .find(|level| level.label() == s)
            .ok_or_else(|| UnknownLevel(s.to_string()))
    }
}

/// The six rated service dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    FoodQuality,
    ServiceSpeed,
    StaffFriendliness,
    Cleanliness,
    ValueForMoney,
    Ambiance,
}

impl Attribute {
    /// Field name on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Attribute::FoodQuality => "foodQuality",
            Attribute::ServiceSpeed => "serviceSpeed",
            Attribute::StaffFriendliness => "staffFriendliness",
            Attribute::Cleanliness => "cleanliness",
            Attribute::ValueForMoney => "valueForMoney",
            Attribute::Ambiance => "ambiance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Attribute::FoodQuality => "Food Quality",
            Attribute::ServiceSpeed => "Service Speed",
            Attribute::StaffFriendliness => "Staff Friendliness",
            Attribute::Cleanliness => "Cleanliness",
            Attribute::ValueForMoney => "Value for Money",
            Attribute::Ambiance => "Ambiance",
        }
    }

    pub fn accessor(self) -> AttributeAccessor {
        ATTRIBUTES[self as usize].1
    }
}

/// Reads the raw label stored for one attribute.
pub type AttributeAccessor = fn(&SurveyResponse) -> Option<&str>;

fn food_quality(r: &SurveyResponse) -> Option<&str> {
    r.food_quality.as_deref()
}

fn service_speed(r: &SurveyResponse) -> Option<&str> {
    r.service_speed.as_deref()
}

fn staff_friendliness(r: &SurveyResponse) -> Option<&str> {
    r.staff_friendliness.as_deref()
}

fn cleanliness(r: &SurveyResponse) -> Option<&str> {
    r.cleanliness.as_deref()
}

fn value_for_money(r: &SurveyResponse) -> Option<&str> {
    r.value_for_money.as_deref()
}

fn ambiance(r: &SurveyResponse) -> Option<&str> {
    r.ambiance.as_deref()
}

/// Attributes in display order, each paired with its field accessor.
/// Indexed by `Attribute as usize`.
pub static ATTRIBUTES: [(Attribute, AttributeAccessor); 6] = [
    (Attribute::FoodQuality, food_quality),
    (Attribute::ServiceSpeed, service_speed),
    (Attribute::StaffFriendliness, staff_friendliness),
    (Attribute::Cleanliness, cleanliness),
    (Attribute::ValueForMoney, value_for_money),
    (Attribute::Ambiance, ambiance),
];

/// One submitted survey, as returned by `GET /api/survey/responses`.
///
/// Attribute values are kept as raw strings: anything outside the five
/// canonical labels is carried through untouched and scores 0.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "de_date")]
    pub visit_date: Option<NaiveDate>,
    #[serde(default, alias = "created_at", deserialize_with = "de_timestamp")]
    pub created_at: Option<NaiveDateTime>,

    #[serde(default)]
    pub food_quality: Option<String>,
    #[serde(default)]
    pub service_speed: Option<String>,
    #[serde(default)]
    pub staff_friendliness: Option<String>,
    #[serde(default)]
    pub cleanliness: Option<String>,
    #[serde(default)]
    pub value_for_money: Option<String>,
    #[serde(default)]
    pub ambiance: Option<String>,

    #[serde(default)]
    pub overall_rating: Option<f64>,
    #[serde(default)]
    pub comments: Option<String>,
}

impl SurveyResponse {
    /// Raw value stored for `attribute`.
    pub fn raw(&self, attribute: Attribute) -> Option<&str> {
        (attribute.accessor())(self)
    }

    /// Parsed level for `attribute`; `None` when absent or not a canonical label.
    pub fn level(&self, attribute: Attribute) -> Option<SatisfactionLevel> {
        self.raw(attribute).and_then(|raw| raw.parse().ok())
    }

    /// Levels for all six attributes in display order.
    pub fn levels(&self) -> [Option<SatisfactionLevel>; 6] {
        ATTRIBUTES.map(|(attribute, _)| self.level(attribute))
    }
}

/// A customer record from `GET /api/survey/customers`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub customer_name: String,
    pub location: String,
    #[serde(default, deserialize_with = "de_date")]
    pub visit_date: Option<NaiveDate>,
}

/// Payload for `POST /api/survey`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDraft {
    pub customer_name: String,
    pub location: String,
    pub food_quality: String,
    pub service_speed: String,
    pub staff_friendliness: String,
    pub cleanliness: String,
    pub value_for_money: String,
    pub ambiance: String,
    pub overall_rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl SurveyDraft {
    /// Applies the same constraints the backend enforces on submission.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.customer_name.trim().is_empty() {
            return Err(DraftError::MissingField("customerName"));
        }
        if self.location.trim().is_empty() {
            return Err(DraftError::MissingField("location"));
        }

        let fields = [
            ("foodQuality", &self.food_quality),
            ("serviceSpeed", &self.service_speed),
            ("staffFriendliness", &self.staff_friendliness),
            ("cleanliness", &self.cleanliness),
            ("valueForMoney", &self.value_for_money),
            ("ambiance", &self.ambiance),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(DraftError::MissingField(field));
            }
            if value.parse::<SatisfactionLevel>().is_err() {
                return Err(DraftError::InvalidLevel {
                    field,
                    value: value.clone(),
                });
            }
        }

        if !(1.0..=5.0).contains(&self.overall_rating) {
            return Err(DraftError::RatingOutOfRange(self.overall_rating));
        }

        Ok(())
    }
}

/// Parses the timestamp shapes the backend emits: RFC 3339, a naive ISO-8601
/// date-time (seconds and fractions optional, as `LocalDateTime` prints them
/// only when non-zero), or a bare date.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn de_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => {
            let parsed = parse_timestamp(s);
            if parsed.is_none() {
                warn!(value = s, "Unrecognized timestamp treated as missing");
            }
            Ok(parsed)
        }
    }
}

fn de_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_timestamp(deserializer)?.map(|dt| dt.date()))
}
