//! Property-based tests for the host-facing projections
//!
//! Both projections must agree with each other and with the relevance filter
//! for any warning set and lead time.

use application::{AlertProjection, SummaryProjection};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use domain::{LeadTime, Warning, WarningCategory, WarningSet, WarningSeverity};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_750_932_000, 0).unwrap()
}

fn warning_strategy() -> impl Strategy<Value = Warning> {
    (1i64..=7, 1i64..=4, -100_000i64..100_000, 0i64..200_000).prop_map(
        |(category, severity, from, length)| {
            let valid_from = now() + TimeDelta::seconds(from);
            Warning::new(
                WarningCategory::from_code(category).unwrap(),
                WarningSeverity::from_code(severity).unwrap(),
                valid_from,
                valid_from + TimeDelta::seconds(length),
            )
        },
    )
}

fn set_strategy() -> impl Strategy<Value = WarningSet> {
    prop::collection::vec(warning_strategy(), 0..12).prop_map(WarningSet::new)
}

proptest! {
    #[test]
    fn projections_agree(set in set_strategy(), lead_minutes in 0i64..3000) {
        let lead = LeadTime::from_minutes(lead_minutes).unwrap();
        let alert = AlertProjection::from_warnings(&set, now(), lead);
        let summary = SummaryProjection::from_warnings(&set, now(), lead);

        prop_assert_eq!(summary.count, set.relevant(now(), lead).len());
        prop_assert_eq!(alert.is_on, summary.has_warnings());
        prop_assert_eq!(alert.event_type, summary.top_category);
        prop_assert_eq!(alert.event_level, summary.top_severity);
    }

    #[test]
    fn top_severity_is_maximum_of_relevant(set in set_strategy(), lead_minutes in 0i64..3000) {
        let lead = LeadTime::from_minutes(lead_minutes).unwrap();
        let summary = SummaryProjection::from_warnings(&set, now(), lead);
        let max = set.relevant(now(), lead).iter().map(|w| w.severity).max();

        prop_assert_eq!(summary.top_severity, max);
    }

    #[test]
    fn longer_lead_time_never_hides_warnings(
        set in set_strategy(),
        short in 0i64..1500,
        extra in 0i64..1500,
    ) {
        let short_lead = LeadTime::from_minutes(short).unwrap();
        let long_lead = LeadTime::from_minutes(short + extra).unwrap();

        let short_count = SummaryProjection::from_warnings(&set, now(), short_lead).count;
        let long_count = SummaryProjection::from_warnings(&set, now(), long_lead).count;
        prop_assert!(long_count >= short_count);
    }

    #[test]
    fn state_text_matches_count(set in set_strategy()) {
        let summary = SummaryProjection::from_warnings(&set, now(), LeadTime::zero());
        let state = summary.state();
        if summary.count == 0 {
            prop_assert_eq!(state, "No Warnings");
        } else {
            prop_assert_eq!(state, format!("Warnings: {}", summary.count));
        }
    }
}
