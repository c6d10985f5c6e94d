use court_lists::constants::*;
use court_lists::pipeline::registry;
use court_lists::pipeline::validation::IssueKind;
use court_lists::PipelineError;
use serde_json::{json, Value};

fn fixture(source: &str) -> Value {
    serde_json::from_str(source).unwrap()
}

#[test]
fn every_fixture_is_valid_for_its_list_type() {
    let registry = registry::global().unwrap();
    let cases = [
        (CIVIL_AND_FAMILY_DAILY_CAUSE_LIST, include_str!("resources/civil_and_family_daily_cause_list.json")),
        (LEEDS_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST, include_str!("resources/civil_and_family_daily_cause_list.json")),
        (COURT_OF_APPEAL_CIVIL_DAILY_CAUSE_LIST, include_str!("resources/court_of_appeal_civil_daily_cause_list.json")),
        (CST_WEEKLY_HEARING_LIST, include_str!("resources/cst_weekly_hearing_list.json")),
        (PHT_WEEKLY_HEARING_LIST, include_str!("resources/pht_weekly_hearing_list.json")),
        (SJP_PUBLIC_LIST, include_str!("resources/sjp_public_list.json")),
        (SJP_PRESS_LIST, include_str!("resources/sjp_press_list.json")),
    ];
    for (list_type, source) in cases {
        let result = registry.require(list_type).unwrap().validate(&fixture(source));
        assert!(result.is_valid(), "{} rejected: {:?}", list_type, result.errors());
    }
}

#[test]
fn missing_case_urn_is_reported_at_its_path() {
    let registry = registry::global().unwrap();
    let raw = fixture(include_str!("resources/sjp_public_list_missing_urn.json"));
    let result = registry.require(SJP_PUBLIC_LIST).unwrap().validate(&raw);

    assert!(!result.is_valid());
    assert_eq!(result.errors().len(), 1);
    let issue = &result.errors()[0];
    assert!(issue.path.ends_with("/caseUrn"), "path was {}", issue.path);
    assert_eq!(issue.kind, IssueKind::MissingField);
}

#[test]
fn wrong_field_type_is_a_type_mismatch() {
    let registry = registry::global().unwrap();
    let raw = json!([{
        "venue": "Court A", "judge": "J. Smith", "time": 10,
        "caseNumber": "CN1", "hearingType": "Trial"
    }]);
    let result = registry.require(CIVIL_AND_FAMILY_DAILY_CAUSE_LIST).unwrap().validate(&raw);
    assert!(!result.is_valid());
    assert_eq!(result.errors()[0].path, "/0/time");
    assert_eq!(result.errors()[0].kind, IssueKind::TypeMismatch);
}

#[test]
fn unknown_party_role_is_a_disallowed_value() {
    let registry = registry::global().unwrap();
    let mut raw = fixture(include_str!("resources/sjp_press_list.json"));
    raw["courtLists"][0]["courtHouse"]["courtRoom"][0]["session"][0]["sittings"][0]["hearing"][0]["party"][0]["partyRole"] =
        json!("WITNESS");
    let result = registry.require(SJP_PRESS_LIST).unwrap().validate(&raw);
    assert!(result.errors().iter().any(|i| i.kind == IssueKind::DisallowedValue));
}

#[test]
fn same_document_validates_differently_per_list_type() {
    let registry = registry::global().unwrap();
    let raw = fixture(include_str!("resources/civil_and_family_daily_cause_list.json"));
    assert!(registry.require(CIVIL_AND_FAMILY_DAILY_CAUSE_LIST).unwrap().validate(&raw).is_valid());
    assert!(!registry.require(SJP_PUBLIC_LIST).unwrap().validate(&raw).is_valid());
}

#[test]
fn validated_token_carries_failures() {
    let registry = registry::global().unwrap();
    let bundle = registry.require(SJP_PUBLIC_LIST).unwrap();
    let raw = fixture(include_str!("resources/sjp_public_list_missing_urn.json"));
    match bundle.validated(&raw) {
        Err(PipelineError::ValidationFailed { list_type, schema_version, issues }) => {
            assert_eq!(list_type, SJP_PUBLIC_LIST);
            assert_eq!(schema_version, "1.0");
            assert_eq!(issues.len(), 1);
        }
        other => panic!("expected validation failure, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn every_supported_list_type_is_registered() {
    let registry = registry::global().unwrap();
    let supported = get_supported_list_types();
    assert_eq!(registry.len(), supported.len());
    for id in supported {
        assert!(registry.resolve(id).is_some(), "{} not registered", id);
    }
    assert!(registry.resolve("UNKNOWN_LIST").is_none());
}
