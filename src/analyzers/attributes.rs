//! Per-attribute ratings, label distributions and radar scores.

use crate::analyzers::score::score;
use crate::analyzers::types::{
    AttributeAnalysis, AttributeBreakdown, AttributeRating, LevelShare, RadarPoint,
};
use crate::analyzers::utility::{mean, round_to, whole_pct};
use crate::model::{ATTRIBUTES, SatisfactionLevel, SurveyResponse};
use tracing::warn;

/// Multiplier from the 5-point rating scale to the 100-point radar axis.
pub const RADAR_SCALE: f64 = 20.0;

/// Running totals for all six attributes.
#[derive(Debug, Default)]
pub struct AttributeAccumulator {
    responses: usize,
    score_totals: [u32; 6],
    level_counts: [[usize; 5]; 6],
}

impl AttributeAccumulator {
    pub fn push(&mut self, response: &SurveyResponse) {
        self.responses += 1;

        for (i, (attribute, _)) in ATTRIBUTES.iter().enumerate() {
            let raw = response.raw(*attribute);
            let level = response.level(*attribute);
            if level.is_none() && raw.is_some_and(|raw| !raw.is_empty()) {
                warn!(
                    id = response.id,
                    attribute = attribute.key(),
                    value = raw.unwrap_or_default(),
                    "Unrecognized satisfaction label scored as 0"
                );
            }

            self.score_totals[i] += u32::from(score(level));
            if let Some(level) = level {
                self.level_counts[i][level.index()] += 1;
            }
        }
    }

    /// Ratings divide by every response seen, scored or not; distributions
    /// divide only by responses carrying a canonical label.
    pub fn finish(self) -> AttributeAnalysis {
        let mut ratings = Vec::with_capacity(ATTRIBUTES.len());
        let mut breakdown = Vec::with_capacity(ATTRIBUTES.len());
        let mut radar = Vec::with_capacity(ATTRIBUTES.len());

        for (i, (attribute, _)) in ATTRIBUTES.iter().enumerate() {
            let rating = round_to(
                mean(f64::from(self.score_totals[i]), self.responses),
                1,
            );

            let counts = self.level_counts[i];
            let valid: usize = counts.iter().sum();
            let distribution = SatisfactionLevel::ALL
                .iter()
                .map(|level| LevelShare {
                    level: *level,
                    count: counts[level.index()],
                    percentage: whole_pct(counts[level.index()], valid),
                })
                .collect();

            ratings.push(AttributeRating {
                attribute: *attribute,
                label: attribute.label(),
                rating,
                responses: self.responses,
            });
            breakdown.push(AttributeBreakdown {
                attribute: *attribute,
                label: attribute.label(),
                valid_responses: valid,
                distribution,
            });
            radar.push(RadarPoint {
                attribute: *attribute,
                label: attribute.label(),
                score: round_to(rating * RADAR_SCALE, 1),
            });
        }

        AttributeAnalysis {
            ratings,
            breakdown,
            radar,
        }
    }
}

/// Computes attribute ratings, distributions and radar scores in one pass.
pub fn analyze_attributes<'a, I>(responses: I) -> AttributeAnalysis
where
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let mut acc = AttributeAccumulator::default();
    for response in responses {
        acc.push(response);
    }
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Attribute;

    fn rated(food: Option<&str>, ambiance: Option<&str>) -> SurveyResponse {
        SurveyResponse {
            food_quality: food.map(str::to_string),
            ambiance: ambiance.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_collection_is_all_zero() {
        let responses: Vec<SurveyResponse> = Vec::new();
        let analysis = analyze_attributes(&responses);

        assert_eq!(analysis.ratings.len(), 6);
        for rating in &analysis.ratings {
            assert_eq!(rating.rating, 0.0);
            assert_eq!(rating.responses, 0);
        }
        for breakdown in &analysis.breakdown {
            assert_eq!(breakdown.valid_responses, 0);
            assert!(breakdown.distribution.iter().all(|s| s.percentage == 0));
        }
        for point in &analysis.radar {
            assert_eq!(point.score, 0.0);
        }
    }

    #[test]
    fn test_missing_values_count_in_rating_denominator() {
        let responses = vec![
            rated(Some("Highly Satisfied"), None),
            rated(None, None),
        ];
        let analysis = analyze_attributes(&responses);

        let food = &analysis.ratings[Attribute::FoodQuality as usize];
        assert_eq!(food.rating, 2.5);
        assert_eq!(food.responses, 2);
        assert_eq!(analysis.radar[Attribute::FoodQuality as usize].score, 50.0);
    }

    #[test]
    fn test_distribution_ignores_unrecognized_labels() {
        let responses = vec![
            rated(Some("Satisfied"), None),
            rated(Some("Neutral"), None),
            rated(Some("Neutral"), None),
            rated(Some("Wonderful"), None),
            rated(None, None),
        ];
        let analysis = analyze_attributes(&responses);

        let food = &analysis.breakdown[Attribute::FoodQuality as usize];
        assert_eq!(food.valid_responses, 3);
        assert_eq!(food.percentage(SatisfactionLevel::Satisfied), 33);
        assert_eq!(food.percentage(SatisfactionLevel::Neutral), 67);
        assert_eq!(food.percentage(SatisfactionLevel::HighlySatisfied), 0);

        // 4 + 3 + 3 + 0 + 0 over all five responses
        assert_eq!(analysis.ratings[Attribute::FoodQuality as usize].rating, 2.0);

        let ambiance = &analysis.breakdown[Attribute::Ambiance as usize];
        assert_eq!(ambiance.valid_responses, 0);
        assert!(ambiance.distribution.iter().all(|s| s.percentage == 0));
    }

    #[test]
    fn test_rating_rounds_to_one_decimal() {
        let responses = vec![
            rated(Some("Highly Satisfied"), None),
            rated(Some("Satisfied"), None),
            rated(Some("Satisfied"), None),
        ];
        let analysis = analyze_attributes(&responses);

        // 13 / 3 = 4.333...
        assert_eq!(analysis.ratings[0].rating, 4.3);
        assert_eq!(analysis.radar[0].score, 86.0);
    }

    #[test]
    fn test_bounds_hold() {
        let responses = vec![
            rated(Some("Highly Satisfied"), Some("Highly Dissatisfied")),
            rated(Some("Highly Satisfied"), Some("Dissatisfied")),
        ];
        let analysis = analyze_attributes(&responses);

        for (rating, point) in analysis.ratings.iter().zip(&analysis.radar) {
            assert!((0.0..=5.0).contains(&rating.rating));
            assert!((0.0..=100.0).contains(&point.score));
        }
        for breakdown in &analysis.breakdown {
            assert!(breakdown.distribution.iter().all(|s| s.percentage <= 100));
        }
    }
}
