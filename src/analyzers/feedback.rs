//! Sorting free-text comments into sentiment buckets by overall rating.

use crate::analyzers::types::{FeedbackBuckets, Sentiment};
use crate::model::SurveyResponse;

/// Rating assumed for a commented response that carries none.
pub const DEFAULT_FEEDBACK_RATING: f64 = 3.0;

/// `>= 4` is positive, `<= 2` negative, anything between neutral.
pub fn sentiment(rating: Option<f64>) -> Sentiment {
    match rating.unwrap_or(DEFAULT_FEEDBACK_RATING) {
        r if r >= 4.0 => Sentiment::Positive,
        r if r <= 2.0 => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

#[derive(Debug, Default)]
pub struct FeedbackAccumulator {
    buckets: FeedbackBuckets,
}

impl FeedbackAccumulator {
    /// Responses with no comment, or an empty one, are skipped.
    pub fn push(&mut self, response: &SurveyResponse) {
        let Some(comment) = response.comments.as_deref().filter(|c| !c.is_empty()) else {
            return;
        };

        let bucket = match sentiment(response.overall_rating) {
            Sentiment::Positive => &mut self.buckets.positive,
            Sentiment::Neutral => &mut self.buckets.neutral,
            Sentiment::Negative => &mut self.buckets.negative,
        };
        bucket.push(comment.to_string());
    }

    pub fn finish(self) -> FeedbackBuckets {
        self.buckets
    }
}

pub fn bucket_feedback<'a, I>(responses: I) -> FeedbackBuckets
where
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let mut acc = FeedbackAccumulator::default();
    for response in responses {
        acc.push(response);
    }
    acc.finish()
}
