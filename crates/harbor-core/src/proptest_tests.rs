//! Property-based tests for the closed enumerations and request records.

use proptest::prelude::*;
use proptest::sample::select;

use crate::{EntityType, MetadataKey, ProjectReq, ScheduleType};

const SCHEDULE_TYPES: [ScheduleType; 7] = [
    ScheduleType::Hourly,
    ScheduleType::Daily,
    ScheduleType::Weekly,
    ScheduleType::Custom,
    ScheduleType::Manual,
    ScheduleType::None,
    ScheduleType::Schedule,
];

/// Strategy for generating Harbor project names.
fn project_name_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9._-]{1,254}"
}

/// Randomizes the ASCII case of a string.
fn recase(value: &str, mask: &[bool]) -> String {
    value
        .chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| {
            if *upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn metadata_key_parses_its_wire_name(key in select(MetadataKey::ALL.to_vec())) {
        prop_assert_eq!(key.as_str().parse::<MetadataKey>().unwrap(), key);
        prop_assert_eq!(key.to_string(), key.as_str());
    }

    #[test]
    fn unknown_metadata_keys_are_rejected(raw in "[a-z_]{1,24}") {
        prop_assume!(MetadataKey::ALL.iter().all(|key| key.as_str() != raw));
        prop_assert!(raw.parse::<MetadataKey>().is_err());
    }

    #[test]
    fn schedule_type_parses_in_any_case(
        kind in select(SCHEDULE_TYPES.to_vec()),
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let raw = recase(kind.as_str(), &mask);
        prop_assert_eq!(raw.parse::<ScheduleType>().unwrap(), kind);
    }

    #[test]
    fn entity_type_accepts_short_and_long_names(
        kind in select(vec![EntityType::User, EntityType::Group]),
    ) {
        let long = match kind {
            EntityType::User => "user",
            EntityType::Group => "group",
        };
        prop_assert_eq!(kind.as_str().parse::<EntityType>().unwrap(), kind);
        prop_assert_eq!(long.parse::<EntityType>().unwrap(), kind);
    }

    #[test]
    fn project_request_keeps_name_and_limit(
        name in project_name_strategy(),
        public in any::<bool>(),
        limit in -1i64..=i64::from(u32::MAX),
    ) {
        let req = ProjectReq::new(&name).public(public).storage_limit(limit);
        let json = serde_json::to_value(&req).unwrap();

        prop_assert_eq!(json["project_name"].as_str(), Some(name.as_str()));
        prop_assert_eq!(json["storage_limit"].as_i64(), Some(limit));
        prop_assert_eq!(json["public"].as_bool(), Some(public));
    }
}
