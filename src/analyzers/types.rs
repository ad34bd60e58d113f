//! Result records produced by the aggregators.

use serde::Serialize;

use crate::model::{Attribute, SatisfactionLevel};

/// Count and rounded share of one satisfaction level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelShare {
    pub level: SatisfactionLevel,
    pub count: usize,
    pub percentage: u32,
}

/// Average 5-point rating of one attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeRating {
    pub attribute: Attribute,
    pub label: &'static str,
    pub rating: f64,
    pub responses: usize,
}

/// Distribution of labels recorded for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeBreakdown {
    pub attribute: Attribute,
    pub label: &'static str,
    /// Responses carrying one of the five canonical labels for this attribute.
    pub valid_responses: usize,
    pub distribution: Vec<LevelShare>,
}

impl AttributeBreakdown {
    pub fn percentage(&self, level: SatisfactionLevel) -> u32 {
        self.distribution[level.index()].percentage
    }
}

/// An attribute rating on the 0–100 radar axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    pub attribute: Attribute,
    pub label: &'static str,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeAnalysis {
    pub ratings: Vec<AttributeRating>,
    pub breakdown: Vec<AttributeBreakdown>,
    pub radar: Vec<RadarPoint>,
}

/// Performance of one branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationStats {
    pub location: String,
    pub response_count: usize,
    /// Responses in the group that carry an overall rating.
    pub rated_count: usize,
    pub average_rating: f64,
    pub satisfaction_percentage: u32,
}

/// Overall satisfaction buckets across the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallSummary {
    pub total_responses: usize,
    pub distribution: Vec<LevelShare>,
    pub satisfaction_rate: f64,
    /// Unrounded; callers format it for display.
    pub average_overall_rating: f64,
}

impl OverallSummary {
    pub fn share(&self, level: SatisfactionLevel) -> &LevelShare {
        &self.distribution[level.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Comments grouped by sentiment, each in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedbackBuckets {
    pub positive: Vec<String>,
    pub neutral: Vec<String>,
    pub negative: Vec<String>,
}

impl FeedbackBuckets {
    pub fn bucket(&self, sentiment: Sentiment) -> &[String] {
        match sentiment {
            Sentiment::Positive => &self.positive,
            Sentiment::Neutral => &self.neutral,
            Sentiment::Negative => &self.negative,
        }
    }

    /// The first `n` comments of a bucket.
    pub fn top(&self, sentiment: Sentiment, n: usize) -> &[String] {
        let bucket = self.bucket(sentiment);
        &bucket[..n.min(bucket.len())]
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.neutral.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every aggregate the dashboard shows for one filtered collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub total_responses: usize,
    /// Configured, not derived from the data.
    pub response_rate: f64,
    pub attributes: AttributeAnalysis,
    pub locations: Vec<LocationStats>,
    pub most_popular_location: String,
    pub overall: OverallSummary,
    pub feedback: FeedbackBuckets,
}
