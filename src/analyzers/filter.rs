//! Narrowing a response collection by branch, submission window and free text.

use chrono::{Duration, NaiveDate};
use std::str::FromStr;

use crate::error::UnknownPeriod;
use crate::model::SurveyResponse;

/// Branch selector. `"all"` keeps every response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LocationFilter {
    #[default]
    All,
    Named(String),
}

impl LocationFilter {
    pub fn parse(selector: &str) -> Self {
        if selector.eq_ignore_ascii_case("all") {
            LocationFilter::All
        } else {
            LocationFilter::Named(selector.to_lowercase())
        }
    }

    /// Case-insensitive match. A response without a location never matches a named branch.
    pub fn matches(&self, response: &SurveyResponse) -> bool {
        match self {
            LocationFilter::All => true,
            LocationFilter::Named(name) => response
                .location
                .as_deref()
                .is_some_and(|location| location.to_lowercase() == *name),
        }
    }
}

/// Submission window, measured back from the current day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    AllTime,
    LastDays(u32),
}

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Period::AllTime),
            "last30" => Ok(Period::LastDays(30)),
            "last90" => Ok(Period::LastDays(90)),
            "last180" => Ok(Period::LastDays(180)),
            _ => Err(UnknownPeriod(s.to_string())),
        }
    }
}

impl Period {
    /// Earliest submission date inside the window.
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::AllTime => None,
            Period::LastDays(days) => Some(today - Duration::days(i64::from(*days))),
        }
    }

    /// The cutoff day itself is inside the window. Responses with no
    /// submission time fall outside every bounded window.
    pub fn matches(&self, response: &SurveyResponse, today: NaiveDate) -> bool {
        match self.cutoff(today) {
            None => true,
            Some(cutoff) => response
                .created_at
                .is_some_and(|created| created.date() >= cutoff),
        }
    }
}

/// Combined location, period and search filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseFilter {
    pub location: LocationFilter,
    pub period: Period,
    pub search: Option<String>,
}

impl ResponseFilter {
    pub fn new(location: &str, period: Period) -> Self {
        Self {
            location: LocationFilter::parse(location),
            period,
            search: None,
        }
    }

    /// Adds a case-insensitive search over customer name, location and comments.
    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim().to_lowercase();
        self.search = if term.is_empty() { None } else { Some(term) };
        self
    }

    pub fn matches(&self, response: &SurveyResponse, today: NaiveDate) -> bool {
        self.location.matches(response)
            && self.period.matches(response, today)
            && self.matches_search(response)
    }

    fn matches_search(&self, response: &SurveyResponse) -> bool {
        let Some(term) = &self.search else {
            return true;
        };

        [
            response.customer_name.as_deref(),
            response.location.as_deref(),
            response.comments.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(term.as_str()))
    }

    /// Keeps matching responses in their original order.
    pub fn apply<'a, I>(&self, responses: I, today: NaiveDate) -> Vec<&'a SurveyResponse>
    where
        I: IntoIterator<Item = &'a SurveyResponse>,
    {
        responses
            .into_iter()
            .filter(|response| self.matches(response, today))
            .collect()
    }
}

/// Location-only filter: `"all"` returns every response, anything else keeps
/// responses whose location matches case-insensitively.
pub fn filter_by_location<'a, I>(responses: I, location: &str) -> Vec<&'a SurveyResponse>
where
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let filter = LocationFilter::parse(location);
    responses
        .into_iter()
        .filter(|response| filter.matches(response))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(location: Option<&str>, created: Option<&str>) -> SurveyResponse {
        SurveyResponse {
            location: location.map(str::to_string),
            created_at: created.map(|s| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
            }),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_all_is_identity() {
        let responses = vec![at(Some("Downtown"), None), at(None, None), at(Some(""), None)];
        let filtered = filter_by_location(&responses, "all");
        assert_eq!(filtered.len(), responses.len());
        for (kept, original) in filtered.iter().zip(&responses) {
            assert!(std::ptr::eq(*kept, original));
        }
    }

    #[test]
    fn test_location_is_case_insensitive() {
        let responses = vec![
            at(Some("Downtown"), None),
            at(Some("UPTOWN"), None),
            at(Some("downtown"), None),
        ];
        let filtered = filter_by_location(&responses, "DownTown");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_missing_location_is_excluded() {
        let responses = vec![at(None, None), at(Some(""), None), at(Some("Uptown"), None)];
        let filtered = filter_by_location(&responses, "uptown");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].location.as_deref(), Some("Uptown"));
    }

    #[test]
    fn test_location_filter_is_idempotent() {
        let responses = vec![
            at(Some("Downtown"), None),
            at(Some("Uptown"), None),
            at(Some("downtown"), None),
        ];
        let once = filter_by_location(&responses, "downtown");
        let twice = filter_by_location(once.iter().copied(), "downtown");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_period_parsing() {
        assert_eq!("all".parse::<Period>(), Ok(Period::AllTime));
        assert_eq!("last30".parse::<Period>(), Ok(Period::LastDays(30)));
        assert_eq!("last90".parse::<Period>(), Ok(Period::LastDays(90)));
        assert_eq!("last180".parse::<Period>(), Ok(Period::LastDays(180)));
        assert!("last7".parse::<Period>().is_err());
    }

    #[test]
    fn test_period_includes_boundary_day() {
        let period = Period::LastDays(30);
        assert_eq!(
            period.cutoff(today()),
            NaiveDate::from_ymd_opt(2024, 5, 31)
        );

        assert!(period.matches(&at(None, Some("2024-05-31 00:00")), today()));
        assert!(period.matches(&at(None, Some("2024-06-30 23:59")), today()));
        assert!(!period.matches(&at(None, Some("2024-05-30 23:59")), today()));
        assert!(!period.matches(&at(None, None), today()));
        assert!(Period::AllTime.matches(&at(None, None), today()));
    }

    #[test]
    fn test_search_matches_name_location_and_comments() {
        let mut by_name = at(Some("Downtown"), None);
        by_name.customer_name = Some("Alex Morgan".into());
        let mut by_comment = at(Some("Uptown"), None);
        by_comment.comments = Some("The soup was cold".into());
        let other = at(Some("Suburban"), None);
        let responses = vec![by_name, by_comment, other];

        let filter = ResponseFilter::default().with_search("MORGAN");
        assert_eq!(filter.apply(&responses, today()).len(), 1);

        let filter = ResponseFilter::default().with_search("soup");
        assert_eq!(filter.apply(&responses, today()).len(), 1);

        let filter = ResponseFilter::default().with_search("town");
        assert_eq!(filter.apply(&responses, today()).len(), 2);

        let filter = ResponseFilter::default().with_search("   ");
        assert_eq!(filter.apply(&responses, today()).len(), 3);
    }

    #[test]
    fn test_combined_filter() {
        let responses = vec![
            at(Some("Downtown"), Some("2024-06-20 12:00")),
            at(Some("Downtown"), Some("2024-01-01 12:00")),
            at(Some("Uptown"), Some("2024-06-20 12:00")),
        ];
        let filter = ResponseFilter::new("downtown", Period::LastDays(30));
        let kept = filter.apply(&responses, today());
        assert_eq!(kept.len(), 1);
        assert!(std::ptr::eq(kept[0], &responses[0]));
    }
}
