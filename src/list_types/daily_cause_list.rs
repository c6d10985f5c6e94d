use serde::Deserialize;
use serde_json::Value;

use super::{read_raw, wrong_shape};
use crate::constants::{
    BIRMINGHAM_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST,
    BRISTOL_AND_CARDIFF_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST, CIVIL_AND_FAMILY_DAILY_CAUSE_LIST,
    LEEDS_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST, MANCHESTER_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST,
    NOT_APPLICABLE,
};
use crate::error::Result;
use crate::pipeline::defaults::FieldDefaults;
use crate::pipeline::document::{CanonicalDocument, CauseListHearing, DailyCauseList};
use crate::pipeline::locale::Locale;
use crate::pipeline::pdf::{PdfColumn, PdfLayout};
use crate::pipeline::registry::{ListTypeDescriptor, ListTypeHandler, RegistryBuilder};
use crate::pipeline::summary::{CaseSummary, DigestField, Sensitivity, SummaryPolicy};
use crate::pipeline::values::TimeValue;
use crate::pipeline::view::{ViewModel, ViewRow, ViewSection};

pub const SCHEMA_NAME: &str = "daily_cause_list";
pub const SCHEMA_VERSION: &str = "1.0";
const SCHEMA: &str = include_str!("../../schemas/daily_cause_list.v1.json");

const LIST_TYPES: &[(&str, &str)] = &[
    (CIVIL_AND_FAMILY_DAILY_CAUSE_LIST, "Civil and Family Daily Cause List"),
    (
        BIRMINGHAM_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST,
        "Birmingham Administrative Court Daily Cause List",
    ),
    (
        LEEDS_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST,
        "Leeds Administrative Court Daily Cause List",
    ),
    (
        BRISTOL_AND_CARDIFF_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST,
        "Bristol and Cardiff Administrative Court Daily Cause List",
    ),
    (
        MANCHESTER_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST,
        "Manchester Administrative Court Daily Cause List",
    ),
];

pub const FIELD_DEFAULTS: FieldDefaults = FieldDefaults::new(&[
    ("caseDetails", NOT_APPLICABLE),
    ("additionalInformation", NOT_APPLICABLE),
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CauseListField {
    Time,
    CaseNumber,
    CaseDetails,
    HearingType,
}

impl DigestField for CauseListField {
    fn label(self) -> &'static str {
        match self {
            CauseListField::Time => "Time",
            CauseListField::CaseNumber => "Case number",
            CauseListField::CaseDetails => "Case details",
            CauseListField::HearingType => "Hearing type",
        }
    }
}

pub const SUMMARY_POLICY: SummaryPolicy<CauseListField> = SummaryPolicy {
    sensitivity: Sensitivity::Public,
    fields: &[
        CauseListField::Time,
        CauseListField::CaseNumber,
        CauseListField::CaseDetails,
        CauseListField::HearingType,
    ],
};

pub(super) const HEARING_COLUMNS: &[PdfColumn] = &[
    PdfColumn::new("venue", "Venue", "Lleoliad", 1.2),
    PdfColumn::new("judge", "Judge", "Barnwr", 1.2),
    PdfColumn::new("time", "Time", "Amser", 0.6),
    PdfColumn::new("case_number", "Case number", "Rhif yr achos", 1.0),
    PdfColumn::new("case_details", "Case details", "Manylion yr achos", 1.6),
    PdfColumn::new("hearing_type", "Hearing type", "Math o wrandawiad", 1.0),
    PdfColumn::new("additional_information", "Additional information", "Gwybodaeth ychwanegol", 1.4),
];

/// One hearing as published. `caseName` is still accepted in place of `caseDetails`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawCauseListHearing {
    venue: String,
    judge: String,
    time: String,
    case_number: String,
    case_details: Option<String>,
    case_name: Option<String>,
    hearing_type: String,
    additional_information: Option<String>,
}

impl RawCauseListHearing {
    pub(super) fn into_hearing(self, defaults: &FieldDefaults) -> CauseListHearing {
        CauseListHearing {
            venue: self.venue.trim().to_string(),
            judge: self.judge.trim().to_string(),
            time: TimeValue::parse(&self.time),
            case_number: self.case_number.trim().to_string(),
            case_details: defaults.first_of(
                "caseDetails",
                [self.case_details.as_deref(), self.case_name.as_deref()],
            ),
            hearing_type: self.hearing_type.trim().to_string(),
            additional_information: defaults
                .text("additionalInformation", self.additional_information.as_deref()),
        }
    }
}

pub(super) fn hearing_row(hearing: &CauseListHearing, locale: Locale) -> ViewRow {
    ViewRow::default()
        .cell("venue", hearing.venue.as_str())
        .cell("judge", hearing.judge.as_str())
        .cell("time", hearing.time.display(locale))
        .cell("case_number", hearing.case_number.as_str())
        .cell("case_details", hearing.case_details.as_str())
        .cell("hearing_type", hearing.hearing_type.as_str())
        .cell("additional_information", hearing.additional_information.as_str())
}

pub(super) fn digest_value(hearing: &CauseListHearing, field: CauseListField) -> String {
    match field {
        CauseListField::Time => hearing.time.display(Locale::En),
        CauseListField::CaseNumber => hearing.case_number.clone(),
        CauseListField::CaseDetails => hearing.case_details.clone(),
        CauseListField::HearingType => hearing.hearing_type.clone(),
    }
}

pub struct DailyCauseListHandler;

impl ListTypeHandler for DailyCauseListHandler {
    fn convert(&self, list_type: &str, raw: &Value) -> Result<CanonicalDocument> {
        let hearings: Vec<RawCauseListHearing> = read_raw(list_type, raw)?;
        Ok(CanonicalDocument::DailyCauseList(DailyCauseList {
            hearings: hearings
                .into_iter()
                .map(|h| h.into_hearing(&FIELD_DEFAULTS))
                .collect(),
        }))
    }

    fn render(
        &self,
        list_type: &str,
        document: &CanonicalDocument,
        locale: Locale,
    ) -> Result<ViewModel> {
        let CanonicalDocument::DailyCauseList(list) = document else {
            return Err(wrong_shape(list_type, "daily_cause_list", document));
        };
        let mut section = ViewSection::new("hearings");
        section.rows = list.hearings.iter().map(|h| hearing_row(h, locale)).collect();

        let mut view = ViewModel::new(list_type, locale);
        view.sections.push(section);
        Ok(view)
    }

    fn summarize(&self, list_type: &str, document: &CanonicalDocument) -> Result<Vec<CaseSummary>> {
        let CanonicalDocument::DailyCauseList(list) = document else {
            return Err(wrong_shape(list_type, "daily_cause_list", document));
        };
        Ok(SUMMARY_POLICY.summarize(list.hearings.iter(), |hearing, field| digest_value(hearing, field)))
    }

    fn pdf_layout(&self) -> PdfLayout {
        PdfLayout {
            columns: HEARING_COLUMNS,
            section_headings: &[],
        }
    }

    fn sensitivity(&self) -> Sensitivity {
        SUMMARY_POLICY.sensitivity
    }
}

/// Civil and family, plus the regional administrative court lists, share this shape.
pub fn register(builder: &mut RegistryBuilder) -> Result<()> {
    for &(id, name) in LIST_TYPES {
        builder.register(
            ListTypeDescriptor {
                id,
                name,
                schema_name: SCHEMA_NAME,
                schema_version: SCHEMA_VERSION,
            },
            SCHEMA,
            Box::new(DailyCauseListHandler),
        )?;
    }
    Ok(())
}
