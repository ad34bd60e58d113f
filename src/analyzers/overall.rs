//! Classifies each response into one overall satisfaction bucket and
//! summarizes the buckets across the collection.

use crate::analyzers::types::{LevelShare, OverallSummary};
use crate::analyzers::utility::{mean, pct, round_to, whole_pct};
use crate::model::{SatisfactionLevel, SurveyResponse};

/// Number of attributes rated `Satisfied` or `Highly Satisfied` (0–6).
pub fn satisfied_count(response: &SurveyResponse) -> usize {
    response
        .levels()
        .into_iter()
        .flatten()
        .filter(|level| level.is_satisfied())
        .count()
}

/// Maps a satisfied-attribute count to its bucket.
///
/// | Satisfied attributes | Bucket              |
/// |----------------------|---------------------|
/// | >= 4                 | Highly Satisfied    |
/// | 3                    | Satisfied           |
/// | 2                    | Neutral             |
/// | 1                    | Dissatisfied        |
/// | 0                    | Highly Dissatisfied |
pub fn bucket_for(satisfied: usize) -> SatisfactionLevel {
    match satisfied {
        n if n >= 4 => SatisfactionLevel::HighlySatisfied,
        n if n >= 3 => SatisfactionLevel::Satisfied,
        n if n >= 2 => SatisfactionLevel::Neutral,
        n if n >= 1 => SatisfactionLevel::Dissatisfied,
        _ => SatisfactionLevel::HighlyDissatisfied,
    }
}

pub fn classify(response: &SurveyResponse) -> SatisfactionLevel {
    bucket_for(satisfied_count(response))
}

#[derive(Debug, Default)]
pub struct OverallAccumulator {
    total: usize,
    buckets: [usize; 5],
    rating_total: f64,
}

impl OverallAccumulator {
    pub fn push(&mut self, response: &SurveyResponse) {
        self.total += 1;
        self.buckets[classify(response).index()] += 1;
        self.rating_total += response.overall_rating.unwrap_or(0.0);
    }

    /// The average overall rating divides by the whole collection, so
    /// unrated responses pull it toward zero. It is left unrounded.
    pub fn finish(self) -> OverallSummary {
        let distribution = SatisfactionLevel::ALL
            .iter()
            .map(|level| LevelShare {
                level: *level,
                count: self.buckets[level.index()],
                percentage: whole_pct(self.buckets[level.index()], self.total),
            })
            .collect();

        let satisfied = self.buckets[SatisfactionLevel::HighlySatisfied.index()]
            + self.buckets[SatisfactionLevel::Satisfied.index()];

        OverallSummary {
            total_responses: self.total,
            distribution,
            satisfaction_rate: round_to(pct(satisfied, self.total), 1),
            average_overall_rating: mean(self.rating_total, self.total),
        }
    }
}

pub fn summarize_overall<'a, I>(responses: I) -> OverallSummary
where
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let mut acc = OverallAccumulator::default();
    for response in responses {
        acc.push(response);
    }
    acc.finish()
}
