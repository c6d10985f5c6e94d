use serde::Serialize;

use super::values::{DateValue, TimeValue, TimestampValue};

/// The converted, locale-neutral form of one publication.
///
/// Each variant carries only the fields its schema defines. Optional fields are
/// always present as `Option`, so downstream code never has to probe for keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "document", rename_all = "snake_case")]
pub enum CanonicalDocument {
    DailyCauseList(DailyCauseList),
    CourtOfAppealCivil(CourtOfAppealCivilList),
    TribunalWeekly(TribunalWeeklyList),
    SjpPublic(SjpPublicList),
    SjpPress(SjpPressList),
}

impl CanonicalDocument {
    pub fn shape(&self) -> &'static str {
        match self {
            CanonicalDocument::DailyCauseList(_) => "daily_cause_list",
            CanonicalDocument::CourtOfAppealCivil(_) => "court_of_appeal_civil",
            CanonicalDocument::TribunalWeekly(_) => "tribunal_weekly",
            CanonicalDocument::SjpPublic(_) => "sjp_public",
            CanonicalDocument::SjpPress(_) => "sjp_press",
        }
    }

    /// Number of case/hearing entries, across all sections.
    pub fn entry_count(&self) -> usize {
        match self {
            CanonicalDocument::DailyCauseList(list) => list.hearings.len(),
            CanonicalDocument::CourtOfAppealCivil(list) => {
                list.daily_hearings.len() + list.future_judgments.len()
            }
            CanonicalDocument::TribunalWeekly(list) => list.hearings.len(),
            CanonicalDocument::SjpPublic(list) => list.cases.len(),
            CanonicalDocument::SjpPress(list) => list.cases.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CauseListHearing {
    pub venue: String,
    pub judge: String,
    pub time: TimeValue,
    pub case_number: String,
    pub case_details: String,
    pub hearing_type: String,
    pub additional_information: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCauseList {
    pub hearings: Vec<CauseListHearing>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FutureJudgment {
    pub date: DateValue,
    pub hearing: CauseListHearing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourtOfAppealCivilList {
    pub daily_hearings: Vec<CauseListHearing>,
    pub future_judgments: Vec<FutureJudgment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TribunalHearing {
    pub date: DateValue,
    pub case_name: String,
    pub hearing_length: String,
    pub hearing_type: String,
    pub venue: String,
    pub additional_information: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TribunalWeeklyList {
    pub hearings: Vec<TribunalHearing>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SjpPublicCase {
    pub case_urn: String,
    pub defendant: String,
    /// Outward code only; the full postcode is never carried for the public list
    pub postcode: String,
    pub offences: Vec<String>,
    pub prosecutor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SjpPublicList {
    pub publication_date: Option<TimestampValue>,
    pub cases: Vec<SjpPublicCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SjpOffence {
    pub title: String,
    pub wording: String,
    pub reporting_restriction: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SjpPressCase {
    pub case_urn: String,
    pub defendant: String,
    pub date_of_birth: Option<DateValue>,
    pub age: Option<u32>,
    pub address: String,
    pub offences: Vec<SjpOffence>,
    pub prosecutor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SjpPressList {
    pub publication_date: Option<TimestampValue>,
    pub cases: Vec<SjpPressCase>,
}
