use serde_json::Value;

use super::sjp::{RawHearing, RawSjpList};
use super::{read_raw, wrong_shape};
use crate::constants::{NOT_APPLICABLE, SJP_PRESS_LIST};
use crate::error::Result;
use crate::pipeline::defaults::FieldDefaults;
use crate::pipeline::document::{CanonicalDocument, SjpOffence, SjpPressCase, SjpPressList};
use crate::pipeline::locale::Locale;
use crate::pipeline::pdf::{PdfColumn, PdfLayout};
use crate::pipeline::registry::{ListTypeDescriptor, ListTypeHandler, RegistryBuilder};
use crate::pipeline::summary::{CaseSummary, DigestField, Sensitivity, SummaryPolicy};
use crate::pipeline::values::DateValue;
use crate::pipeline::view::{ViewModel, ViewRow, ViewSection};

pub const SCHEMA_NAME: &str = "sjp_press_list";
pub const SCHEMA_VERSION: &str = "1.0";
const SCHEMA: &str = include_str!("../../schemas/sjp_press_list.v1.json");

pub const FIELD_DEFAULTS: FieldDefaults = FieldDefaults::new(&[
    ("defendant", NOT_APPLICABLE),
    ("address", NOT_APPLICABLE),
    ("offenceWording", NOT_APPLICABLE),
    ("prosecutor", NOT_APPLICABLE),
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SjpPressField {
    CaseReference,
    Defendant,
    Offence,
}

impl DigestField for SjpPressField {
    fn label(self) -> &'static str {
        match self {
            SjpPressField::CaseReference => "Case reference",
            SjpPressField::Defendant => "Defendant",
            SjpPressField::Offence => "Offence",
        }
    }
}

/// Press lists carry dates of birth and home addresses.
pub const SUMMARY_POLICY: SummaryPolicy<SjpPressField> = SummaryPolicy {
    sensitivity: Sensitivity::SpecialCategory,
    fields: &[
        SjpPressField::CaseReference,
        SjpPressField::Defendant,
        SjpPressField::Offence,
    ],
};

const COLUMNS: &[PdfColumn] = &[
    PdfColumn::new("defendant", "Name", "Enw", 1.1),
    PdfColumn::new("date_of_birth", "Date of birth", "Dyddiad geni", 0.8),
    PdfColumn::new("age", "Age", "Oed", 0.4),
    PdfColumn::new("address", "Address", "Cyfeiriad", 1.5),
    PdfColumn::new("case_reference", "Case reference", "Cyfeirnod yr achos", 1.0),
    PdfColumn::new("offences", "Offence", "Trosedd", 2.0),
    PdfColumn::new("reporting_restriction", "Reporting restriction", "Cyfyngiad adrodd", 1.0),
    PdfColumn::new("prosecutor", "Prosecutor", "Erlynydd", 1.0),
];

fn into_case(hearing: RawHearing) -> SjpPressCase {
    let accused = hearing.accused();
    let individual = accused.and_then(|p| p.individual());
    let defendant = accused.and_then(|p| p.name());
    let address = accused.and_then(|p| p.address()).and_then(|a| a.full());
    let prosecutor = hearing.prosecutor().and_then(|p| p.name());

    SjpPressCase {
        case_urn: hearing.case_urn(),
        defendant: FIELD_DEFAULTS.text("defendant", defendant.as_deref()),
        date_of_birth: individual
            .and_then(|i| i.date_of_birth.as_deref())
            .filter(|dob| !dob.trim().is_empty())
            .map(DateValue::parse),
        age: individual.and_then(|i| i.age),
        address: FIELD_DEFAULTS.text("address", address.as_deref()),
        offences: hearing
            .offence
            .iter()
            .map(|o| SjpOffence {
                title: o.offence_title.trim().to_string(),
                wording: FIELD_DEFAULTS.text("offenceWording", o.offence_wording.as_deref()),
                reporting_restriction: o.reporting_restriction,
            })
            .collect(),
        prosecutor: FIELD_DEFAULTS.text("prosecutor", prosecutor.as_deref()),
    }
}

fn offence_text(case: &SjpPressCase) -> String {
    case.offences
        .iter()
        .map(|o| format!("{} - {}", o.title, o.wording))
        .collect::<Vec<_>>()
        .join("; ")
}

fn reporting_restriction_text(case: &SjpPressCase, locale: Locale) -> &'static str {
    let restricted = case.offences.iter().any(|o| o.reporting_restriction);
    match (locale, restricted) {
        (Locale::En, true) => "Yes",
        (Locale::En, false) => "No",
        (Locale::Cy, true) => "Oes",
        (Locale::Cy, false) => "Nac oes",
    }
}

fn digest_value(case: &SjpPressCase, field: SjpPressField) -> String {
    match field {
        SjpPressField::CaseReference => case.case_urn.clone(),
        SjpPressField::Defendant => case.defendant.clone(),
        SjpPressField::Offence => offence_text(case),
    }
}

pub struct SjpPressHandler;

impl ListTypeHandler for SjpPressHandler {
    fn convert(&self, list_type: &str, raw: &Value) -> Result<CanonicalDocument> {
        let list: RawSjpList = read_raw(list_type, raw)?;
        let publication_date = Some(list.publication_date());
        Ok(CanonicalDocument::SjpPress(SjpPressList {
            publication_date,
            cases: list.into_hearings().map(into_case).collect(),
        }))
    }

    fn render(
        &self,
        list_type: &str,
        document: &CanonicalDocument,
        locale: Locale,
    ) -> Result<ViewModel> {
        let CanonicalDocument::SjpPress(list) = document else {
            return Err(wrong_shape(list_type, "sjp_press", document));
        };
        let mut section = ViewSection::new("cases");
        section.rows = list
            .cases
            .iter()
            .map(|case| {
                let date_of_birth = case
                    .date_of_birth
                    .as_ref()
                    .map(|d| d.display(locale))
                    .unwrap_or_else(|| NOT_APPLICABLE.to_string());
                let age = case
                    .age
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| NOT_APPLICABLE.to_string());
                ViewRow::default()
                    .cell("defendant", case.defendant.as_str())
                    .cell("date_of_birth", date_of_birth)
                    .cell("age", age)
                    .cell("address", case.address.as_str())
                    .cell("case_reference", case.case_urn.as_str())
                    .cell("offences", offence_text(case))
                    .cell("reporting_restriction", reporting_restriction_text(case, locale))
                    .cell("prosecutor", case.prosecutor.as_str())
            })
            .collect();

        let mut view = ViewModel::new(list_type, locale);
        view.publication_date = list.publication_date.as_ref().map(|d| d.display(locale));
        view.sections.push(section);
        Ok(view)
    }

    fn summarize(&self, list_type: &str, document: &CanonicalDocument) -> Result<Vec<CaseSummary>> {
        let CanonicalDocument::SjpPress(list) = document else {
            return Err(wrong_shape(list_type, "sjp_press", document));
        };
        Ok(SUMMARY_POLICY.summarize(list.cases.iter(), |case, field| digest_value(case, field)))
    }

    fn pdf_layout(&self) -> PdfLayout {
        PdfLayout {
            columns: COLUMNS,
            section_headings: &[],
        }
    }

    fn sensitivity(&self) -> Sensitivity {
        SUMMARY_POLICY.sensitivity
    }
}

pub fn register(builder: &mut RegistryBuilder) -> Result<()> {
    builder.register(
        ListTypeDescriptor {
            id: SJP_PRESS_LIST,
            name: "Single Justice Procedure Press List",
            schema_name: SCHEMA_NAME,
            schema_version: SCHEMA_VERSION,
        },
        SCHEMA,
        Box::new(SjpPressHandler),
    )
}
