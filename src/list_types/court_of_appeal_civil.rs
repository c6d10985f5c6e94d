use serde::Deserialize;
use serde_json::Value;

use super::daily_cause_list::{hearing_row, RawCauseListHearing, HEARING_COLUMNS};
use super::{read_raw, wrong_shape};
use crate::constants::{COURT_OF_APPEAL_CIVIL_DAILY_CAUSE_LIST, NOT_APPLICABLE};
use crate::error::Result;
use crate::pipeline::defaults::FieldDefaults;
use crate::pipeline::document::{
    CanonicalDocument, CauseListHearing, CourtOfAppealCivilList, FutureJudgment,
};
use crate::pipeline::locale::Locale;
use crate::pipeline::pdf::{PdfColumn, PdfLayout, PdfSectionHeading};
use crate::pipeline::registry::{ListTypeDescriptor, ListTypeHandler, RegistryBuilder};
use crate::pipeline::summary::{CaseSummary, DigestField, Sensitivity, SummaryPolicy};
use crate::pipeline::values::DateValue;
use crate::pipeline::view::{ViewCell, ViewModel, ViewSection};

pub const SCHEMA_NAME: &str = "court_of_appeal_civil_daily_cause_list";
pub const SCHEMA_VERSION: &str = "1.0";
const SCHEMA: &str = include_str!("../../schemas/court_of_appeal_civil_daily_cause_list.v1.json");

pub const DAILY_HEARINGS: &str = "daily_hearings";
pub const FUTURE_JUDGMENTS: &str = "future_judgments";

pub const FIELD_DEFAULTS: FieldDefaults = FieldDefaults::new(&[
    ("caseDetails", NOT_APPLICABLE),
    ("additionalInformation", NOT_APPLICABLE),
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppealField {
    Listing,
    Time,
    CaseNumber,
    CaseDetails,
}

impl DigestField for AppealField {
    fn label(self) -> &'static str {
        match self {
            AppealField::Listing => "Listing",
            AppealField::Time => "Time",
            AppealField::CaseNumber => "Case number",
            AppealField::CaseDetails => "Case details",
        }
    }
}

pub const SUMMARY_POLICY: SummaryPolicy<AppealField> = SummaryPolicy {
    sensitivity: Sensitivity::Public,
    fields: &[
        AppealField::Listing,
        AppealField::Time,
        AppealField::CaseNumber,
        AppealField::CaseDetails,
    ],
};

// Hearing columns with the judgment date in front
const COLUMNS: &[PdfColumn] = &[
    PdfColumn::new("date", "Date", "Dyddiad", 0.9),
    HEARING_COLUMNS[0],
    HEARING_COLUMNS[1],
    HEARING_COLUMNS[2],
    HEARING_COLUMNS[3],
    HEARING_COLUMNS[4],
    HEARING_COLUMNS[5],
    HEARING_COLUMNS[6],
];

const SECTION_HEADINGS: &[PdfSectionHeading] = &[
    PdfSectionHeading {
        key: DAILY_HEARINGS,
        heading: "Daily hearings",
        heading_cy: "Gwrandawiadau dyddiol",
    },
    PdfSectionHeading {
        key: FUTURE_JUDGMENTS,
        heading: "Future judgments",
        heading_cy: "Dyfarniadau i ddod",
    },
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAppealList {
    daily_hearings: Vec<RawCauseListHearing>,
    #[serde(default)]
    future_judgments: Vec<RawFutureJudgment>,
}

#[derive(Debug, Deserialize)]
struct RawFutureJudgment {
    date: String,
    #[serde(flatten)]
    hearing: RawCauseListHearing,
}

/// Digest entries walk daily hearings first, then future judgments.
enum AppealEntry<'a> {
    Daily(&'a CauseListHearing),
    Future(&'a FutureJudgment),
}

impl AppealEntry<'_> {
    fn hearing(&self) -> &CauseListHearing {
        match self {
            AppealEntry::Daily(hearing) => hearing,
            AppealEntry::Future(judgment) => &judgment.hearing,
        }
    }

    fn value(&self, field: AppealField) -> String {
        let hearing = self.hearing();
        match field {
            AppealField::Listing => match self {
                AppealEntry::Daily(_) => "Daily hearing".to_string(),
                AppealEntry::Future(judgment) => {
                    format!("Future judgment, {}", judgment.date.display(Locale::En))
                }
            },
            AppealField::Time => hearing.time.display(Locale::En),
            AppealField::CaseNumber => hearing.case_number.clone(),
            AppealField::CaseDetails => hearing.case_details.clone(),
        }
    }
}

pub struct CourtOfAppealCivilHandler;

impl ListTypeHandler for CourtOfAppealCivilHandler {
    fn convert(&self, list_type: &str, raw: &Value) -> Result<CanonicalDocument> {
        let list: RawAppealList = read_raw(list_type, raw)?;
        Ok(CanonicalDocument::CourtOfAppealCivil(CourtOfAppealCivilList {
            daily_hearings: list
                .daily_hearings
                .into_iter()
                .map(|h| h.into_hearing(&FIELD_DEFAULTS))
                .collect(),
            future_judgments: list
                .future_judgments
                .into_iter()
                .map(|j| FutureJudgment {
                    date: DateValue::parse(&j.date),
                    hearing: j.hearing.into_hearing(&FIELD_DEFAULTS),
                })
                .collect(),
        }))
    }

    fn render(
        &self,
        list_type: &str,
        document: &CanonicalDocument,
        locale: Locale,
    ) -> Result<ViewModel> {
        let CanonicalDocument::CourtOfAppealCivil(list) = document else {
            return Err(wrong_shape(list_type, "court_of_appeal_civil", document));
        };

        let mut daily = ViewSection::new(DAILY_HEARINGS);
        daily.rows = list
            .daily_hearings
            .iter()
            .map(|h| hearing_row(h, locale))
            .collect();

        let mut future = ViewSection::new(FUTURE_JUDGMENTS);
        future.rows = list
            .future_judgments
            .iter()
            .map(|j| {
                let mut row = hearing_row(&j.hearing, locale);
                row.cells.insert(
                    0,
                    ViewCell {
                        key: "date",
                        value: j.date.display(locale),
                    },
                );
                row
            })
            .collect();

        let mut view = ViewModel::new(list_type, locale);
        view.sections = vec![daily, future];
        Ok(view)
    }

    fn summarize(&self, list_type: &str, document: &CanonicalDocument) -> Result<Vec<CaseSummary>> {
        let CanonicalDocument::CourtOfAppealCivil(list) = document else {
            return Err(wrong_shape(list_type, "court_of_appeal_civil", document));
        };
        let entries = list
            .daily_hearings
            .iter()
            .map(AppealEntry::Daily)
            .chain(list.future_judgments.iter().map(AppealEntry::Future));
        Ok(SUMMARY_POLICY.summarize(entries, |entry, field| entry.value(field)))
    }

    fn pdf_layout(&self) -> PdfLayout {
        PdfLayout {
            columns: COLUMNS,
            section_headings: SECTION_HEADINGS,
        }
    }

    fn sensitivity(&self) -> Sensitivity {
        SUMMARY_POLICY.sensitivity
    }
}

pub fn register(builder: &mut RegistryBuilder) -> Result<()> {
    builder.register(
        ListTypeDescriptor {
            id: COURT_OF_APPEAL_CIVIL_DAILY_CAUSE_LIST,
            name: "Court of Appeal (Civil Division) Daily Cause List",
            schema_name: SCHEMA_NAME,
            schema_version: SCHEMA_VERSION,
        },
        SCHEMA,
        Box::new(CourtOfAppealCivilHandler),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "dailyHearings": [{
                "venue": "RCJ Court 71", "judge": "Lord Justice Jones", "time": "10:30",
                "caseNumber": "CA-2024-000123", "caseDetails": "Smith v Jones", "hearingType": "Appeal"
            }],
            "futureJudgments": [{
                "date": "17/06/2024", "venue": "RCJ Court 72", "judge": "Lady Justice Brown",
                "time": "9.45", "caseNumber": "CA-2024-000456", "hearingType": "Hand down",
                "additionalInformation": "Remote"
            }]
        })
    }

    fn document() -> CanonicalDocument {
        CourtOfAppealCivilHandler
            .convert(COURT_OF_APPEAL_CIVIL_DAILY_CAUSE_LIST, &sample())
            .unwrap()
    }

    #[test]
    fn converts_both_sections() {
        let CanonicalDocument::CourtOfAppealCivil(list) = document() else {
            panic!("wrong shape");
        };
        assert_eq!(list.daily_hearings.len(), 1);
        assert_eq!(list.future_judgments.len(), 1);
        assert_eq!(list.future_judgments[0].hearing.case_details, "N/A");
        assert_eq!(list.future_judgments[0].hearing.additional_information, "Remote");
    }

    #[test]
    fn missing_future_judgments_is_an_empty_section() {
        let raw = json!({"dailyHearings": []});
        let document = CourtOfAppealCivilHandler
            .convert(COURT_OF_APPEAL_CIVIL_DAILY_CAUSE_LIST, &raw)
            .unwrap();
        let view = CourtOfAppealCivilHandler.render("X", &document, Locale::En).unwrap();
        assert_eq!(view.sections.len(), 2);
        assert_eq!(view.entry_count(), 0);
    }

    #[test]
    fn future_judgment_rows_lead_with_date() {
        let view = CourtOfAppealCivilHandler.render("X", &document(), Locale::Cy).unwrap();
        let future = view.section(FUTURE_JUDGMENTS).unwrap();
        assert_eq!(future.rows[0].cells[0].key, "date");
        assert_eq!(future.rows[0].value("date"), Some("17 Mehefin 2024"));
        assert_eq!(future.rows[0].value("time"), Some("9:45yb"));
    }

    #[test]
    fn summaries_follow_document_order() {
        let summaries = CourtOfAppealCivilHandler.summarize("X", &document()).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].value("Listing"), Some("Daily hearing"));
        assert_eq!(summaries[1].value("Listing"), Some("Future judgment, 17 June 2024"));
        assert_eq!(summaries[1].value("Case number"), Some("CA-2024-000456"));
    }
}
