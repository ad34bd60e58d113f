//! Per-branch response counts, ratings and satisfaction.

use std::collections::HashMap;

use crate::analyzers::types::LocationStats;
use crate::analyzers::utility::{mean, round_to, whole_pct};
use crate::model::SurveyResponse;

/// Group key for responses with no location.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Returned by [`most_popular_location`] when there are no groups.
pub const NO_LOCATION: &str = "N/A";

/// Overall ratings at or above this count as satisfied.
pub const SATISFIED_RATING: f64 = 4.0;

#[derive(Debug)]
struct Group {
    location: String,
    responses: usize,
    rated: usize,
    rating_total: f64,
    satisfied: usize,
}

/// Groups responses by their raw location, keeping first-seen order.
#[derive(Debug, Default)]
pub struct LocationAccumulator {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl LocationAccumulator {
    pub fn push(&mut self, response: &SurveyResponse) {
        let key = response
            .location
            .as_deref()
            .filter(|location| !location.is_empty())
            .unwrap_or(UNKNOWN_LOCATION);

        let slot = match self.index.get(key) {
            Some(slot) => *slot,
            None => {
                self.groups.push(Group {
                    location: key.to_string(),
                    responses: 0,
                    rated: 0,
                    rating_total: 0.0,
                    satisfied: 0,
                });
                self.index.insert(key.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };

        let group = &mut self.groups[slot];
        group.responses += 1;

        if let Some(rating) = response.overall_rating {
            group.rated += 1;
            group.rating_total += rating;
            if rating >= SATISFIED_RATING {
                group.satisfied += 1;
            }
        }
    }

    /// Average rating and satisfaction only consider rated responses.
    pub fn finish(self) -> Vec<LocationStats> {
        self.groups
            .into_iter()
            .map(|group| LocationStats {
                average_rating: round_to(mean(group.rating_total, group.rated), 2),
                satisfaction_percentage: whole_pct(group.satisfied, group.rated),
                location: group.location,
                response_count: group.responses,
                rated_count: group.rated,
            })
            .collect()
    }
}

pub fn analyze_locations<'a, I>(responses: I) -> Vec<LocationStats>
where
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let mut acc = LocationAccumulator::default();
    for response in responses {
        acc.push(response);
    }
    acc.finish()
}

/// Location with the most responses; ties go to the group seen first.
pub fn most_popular_location(stats: &[LocationStats]) -> &str {
    let mut best: Option<&LocationStats> = None;
    for candidate in stats {
        if best.is_none_or(|b| candidate.response_count > b.response_count) {
            best = Some(candidate);
        }
    }
    best.map_or(NO_LOCATION, |b| b.location.as_str())
}
