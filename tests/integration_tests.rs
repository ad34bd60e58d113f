use chrono::NaiveDate;
use survey_insights::analyzers::types::Sentiment;
use survey_insights::analyzers::{Period, ResponseFilter, analyze, analyze_filtered};
use survey_insights::infra::survey::FileSource;
use survey_insights::model::{Attribute, SatisfactionLevel, SurveyResponse};
use survey_insights::output::{ExportFormat, export_responses};
use survey_insights::services::ResponseSource;

fn fixture() -> Vec<SurveyResponse> {
    serde_json::from_str(include_str!("fixtures/responses.json")).expect("fixture should parse")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

#[test]
fn test_full_dashboard() {
    let responses = fixture();
    let report = analyze(&responses, 94.1);

    assert_eq!(report.total_responses, 6);
    assert_eq!(report.response_rate, 94.1);
    assert_eq!(report.most_popular_location, "Downtown");

    let locations: Vec<(&str, usize, f64, u32)> = report
        .locations
        .iter()
        .map(|l| {
            (
                l.location.as_str(),
                l.response_count,
                l.average_rating,
                l.satisfaction_percentage,
            )
        })
        .collect();
    assert_eq!(
        locations,
        vec![
            ("Downtown", 3, 4.5, 100),
            ("Uptown", 2, 2.5, 0),
            ("Unknown", 1, 1.0, 0),
        ]
    );
    let counted: usize = report.locations.iter().map(|l| l.response_count).sum();
    assert_eq!(counted, report.total_responses);

    let overall = &report.overall;
    assert_eq!(overall.satisfaction_rate, 50.0);
    assert_eq!(overall.average_overall_rating, 2.5);
    let shares: Vec<(usize, u32)> = overall
        .distribution
        .iter()
        .map(|s| (s.count, s.percentage))
        .collect();
    assert_eq!(shares, vec![(2, 33), (1, 17), (0, 0), (2, 33), (1, 17)]);
}

#[test]
fn test_attribute_ratings_count_unscored_values() {
    let responses = fixture();
    let report = analyze(&responses, 94.1);
    let attrs = &report.attributes;

    let food = &attrs.ratings[Attribute::FoodQuality as usize];
    assert_eq!(food.rating, 3.0);
    assert_eq!(food.responses, 6);
    assert_eq!(attrs.radar[Attribute::FoodQuality as usize].score, 60.0);

    let food_breakdown = &attrs.breakdown[Attribute::FoodQuality as usize];
    assert_eq!(food_breakdown.valid_responses, 5);
    assert_eq!(food_breakdown.percentage(SatisfactionLevel::Satisfied), 40);
    assert_eq!(food_breakdown.percentage(SatisfactionLevel::HighlyDissatisfied), 0);

    assert_eq!(attrs.ratings[Attribute::Ambiance as usize].rating, 2.5);
    assert_eq!(attrs.radar[Attribute::Ambiance as usize].score, 50.0);
}

#[test]
fn test_feedback_buckets() {
    let responses = fixture();
    let feedback = analyze(&responses, 94.1).feedback;

    assert_eq!(
        feedback.bucket(Sentiment::Positive),
        ["Fantastic food".to_string(), "Quick lunch".to_string()]
    );
    assert_eq!(feedback.bucket(Sentiment::Neutral), ["Nice staff".to_string()]);
    assert_eq!(feedback.bucket(Sentiment::Negative), ["Slow service".to_string()]);
    assert_eq!(feedback.len(), 4);
}

#[test]
fn test_last_30_days() {
    let responses = fixture();
    let filter = ResponseFilter::new("all", "last30".parse::<Period>().unwrap());
    let report = analyze_filtered(&responses, &filter, today(), 94.1);

    assert_eq!(report.total_responses, 3);
    assert_eq!(report.locations.len(), 2);
    assert_eq!(report.locations[0].location, "Downtown");
    assert_eq!(report.locations[0].response_count, 2);
    assert_eq!(report.locations[0].rated_count, 1);
    assert_eq!(report.locations[0].average_rating, 5.0);
    assert_eq!(report.locations[1].average_rating, 2.0);
}

#[test]
fn test_location_and_period_combined() {
    let responses = fixture();

    let downtown = ResponseFilter::new("downtown", Period::LastDays(90));
    assert_eq!(downtown.apply(&responses, today()).len(), 3);

    let uptown = ResponseFilter::new("Uptown", Period::LastDays(180));
    let report = analyze_filtered(&responses, &uptown, today(), 94.1);
    assert_eq!(report.total_responses, 2);
    assert_eq!(report.most_popular_location, "Uptown");

    let nowhere = ResponseFilter::new("Airport", Period::AllTime);
    let report = analyze_filtered(&responses, &nowhere, today(), 94.1);
    assert_eq!(report.total_responses, 0);
    assert_eq!(report.most_popular_location, "N/A");
    assert!(report.feedback.is_empty());
}

#[test]
fn test_search_then_export() {
    let responses = fixture();
    let filter = ResponseFilter::new("all", Period::AllTime).with_search("SERVICE");
    let matched = filter.apply(&responses, today());
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].customer_name.as_deref(), Some("Carla Diaz"));

    let mut buf = Vec::new();
    let rows = export_responses(&mut buf, matched, ExportFormat::Tsv).unwrap();
    assert_eq!(rows, 1);

    let text = String::from_utf8(buf).unwrap();
    let row = text.lines().nth(1).unwrap();
    assert!(row.starts_with("Carla Diaz\tUptown\t2024-06-24\tDissatisfied\t"));
    assert!(row.ends_with("\t2\tSlow service\t2024-06-25"));
}

#[tokio::test]
async fn test_file_source_reads_fixture() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/responses.json");
    let source = FileSource::new(path);

    let responses = source.fetch_responses().await.unwrap();
    assert_eq!(responses, fixture());

    let customers = source.fetch_customers().await.unwrap();
    let ids: Vec<i64> = customers.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![101, 102, 103, 104, 106]);
    assert_eq!(customers[4].location, "");
}
