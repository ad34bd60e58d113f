use chrono::NaiveDate;
use tracing::debug;

use crate::analyzers::attributes::AttributeAccumulator;
use crate::analyzers::feedback::FeedbackAccumulator;
use crate::analyzers::filter::ResponseFilter;
use crate::analyzers::locations::{LocationAccumulator, most_popular_location};
use crate::analyzers::overall::OverallAccumulator;
use crate::analyzers::types::DashboardReport;
use crate::model::SurveyResponse;

/// Builds every dashboard aggregate from a single pass over `responses`.
///
/// `response_rate` is reported as given; it is configuration, not something
/// the responses can tell us.
pub fn analyze<'a, I>(responses: I, response_rate: f64) -> DashboardReport
where
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let mut attributes = AttributeAccumulator::default();
    let mut locations = LocationAccumulator::default();
    let mut overall = OverallAccumulator::default();
    let mut feedback = FeedbackAccumulator::default();
    let mut total_responses = 0usize;

    for response in responses {
        total_responses += 1;
        attributes.push(response);
        locations.push(response);
        overall.push(response);
        feedback.push(response);
    }

    let locations = locations.finish();
    let most_popular_location = most_popular_location(&locations).to_string();

    let report = DashboardReport {
        total_responses,
        response_rate,
        attributes: attributes.finish(),
        locations,
        most_popular_location,
        overall: overall.finish(),
        feedback: feedback.finish(),
    };

    debug!(
        total_responses,
        locations = report.locations.len(),
        comments = report.feedback.len(),
        satisfaction_rate = report.overall.satisfaction_rate,
        "Aggregation pass complete"
    );

    report
}

/// Filters `responses` and aggregates what remains.
pub fn analyze_filtered(
    responses: &[SurveyResponse],
    filter: &ResponseFilter,
    today: NaiveDate,
    response_rate: f64,
) -> DashboardReport {
    let filtered = filter.apply(responses, today);
    debug!(
        fetched = responses.len(),
        kept = filtered.len(),
        "Responses filtered"
    );
    analyze(filtered, response_rate)
}
