use serde_json::Value;

use super::sjp::{RawHearing, RawSjpList};
use super::{read_raw, wrong_shape};
use crate::constants::{NOT_APPLICABLE, SJP_PUBLIC_LIST};
use crate::error::Result;
use crate::pipeline::defaults::FieldDefaults;
use crate::pipeline::document::{CanonicalDocument, SjpPublicCase, SjpPublicList};
use crate::pipeline::locale::Locale;
use crate::pipeline::pdf::{PdfColumn, PdfLayout};
use crate::pipeline::registry::{ListTypeDescriptor, ListTypeHandler, RegistryBuilder};
use crate::pipeline::summary::{CaseSummary, DigestField, Sensitivity, SummaryPolicy};
use crate::pipeline::view::{ViewModel, ViewRow, ViewSection};

pub const SCHEMA_NAME: &str = "sjp_public_list";
pub const SCHEMA_VERSION: &str = "1.0";
const SCHEMA: &str = include_str!("../../schemas/sjp_public_list.v1.json");

pub const FIELD_DEFAULTS: FieldDefaults = FieldDefaults::new(&[
    ("defendant", NOT_APPLICABLE),
    ("postcode", NOT_APPLICABLE),
    ("prosecutor", NOT_APPLICABLE),
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SjpPublicField {
    CaseReference,
    Defendant,
    Postcode,
    Offence,
    Prosecutor,
}

impl DigestField for SjpPublicField {
    fn label(self) -> &'static str {
        match self {
            SjpPublicField::CaseReference => "Case reference",
            SjpPublicField::Defendant => "Defendant",
            SjpPublicField::Postcode => "Postcode",
            SjpPublicField::Offence => "Offence",
            SjpPublicField::Prosecutor => "Prosecutor",
        }
    }
}

pub const SUMMARY_POLICY: SummaryPolicy<SjpPublicField> = SummaryPolicy {
    sensitivity: Sensitivity::Public,
    fields: &[
        SjpPublicField::CaseReference,
        SjpPublicField::Defendant,
        SjpPublicField::Postcode,
        SjpPublicField::Offence,
        SjpPublicField::Prosecutor,
    ],
};

const COLUMNS: &[PdfColumn] = &[
    PdfColumn::new("defendant", "Name", "Enw", 1.3),
    PdfColumn::new("postcode", "Postcode", "Cod post", 0.7),
    PdfColumn::new("offence", "Offence", "Trosedd", 2.0),
    PdfColumn::new("prosecutor", "Prosecutor", "Erlynydd", 1.2),
    PdfColumn::new("case_reference", "Case reference", "Cyfeirnod yr achos", 1.0),
];

fn into_case(hearing: RawHearing) -> SjpPublicCase {
    let accused = hearing.accused();
    let defendant = accused.and_then(|p| p.name());
    let postcode = accused
        .and_then(|p| p.address())
        .and_then(|a| a.outward_postcode());
    let prosecutor = hearing.prosecutor().and_then(|p| p.name());

    SjpPublicCase {
        case_urn: hearing.case_urn(),
        defendant: FIELD_DEFAULTS.text("defendant", defendant.as_deref()),
        postcode: FIELD_DEFAULTS.text("postcode", postcode.as_deref()),
        offences: hearing.offence_titles(),
        prosecutor: FIELD_DEFAULTS.text("prosecutor", prosecutor.as_deref()),
    }
}

fn offence_text(case: &SjpPublicCase) -> String {
    case.offences.join("; ")
}

fn digest_value(case: &SjpPublicCase, field: SjpPublicField) -> String {
    match field {
        SjpPublicField::CaseReference => case.case_urn.clone(),
        SjpPublicField::Defendant => case.defendant.clone(),
        SjpPublicField::Postcode => case.postcode.clone(),
        SjpPublicField::Offence => offence_text(case),
        SjpPublicField::Prosecutor => case.prosecutor.clone(),
    }
}

pub struct SjpPublicHandler;

impl ListTypeHandler for SjpPublicHandler {
    fn convert(&self, list_type: &str, raw: &Value) -> Result<CanonicalDocument> {
        let list: RawSjpList = read_raw(list_type, raw)?;
        let publication_date = Some(list.publication_date());
        Ok(CanonicalDocument::SjpPublic(SjpPublicList {
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
        let CanonicalDocument::SjpPublic(list) = document else {
            return Err(wrong_shape(list_type, "sjp_public", document));
        };
        let mut section = ViewSection::new("cases");
        section.rows = list
            .cases
            .iter()
            .map(|case| {
                ViewRow::default()
                    .cell("defendant", case.defendant.as_str())
                    .cell("postcode", case.postcode.as_str())
                    .cell("offence", offence_text(case))
                    .cell("prosecutor", case.prosecutor.as_str())
                    .cell("case_reference", case.case_urn.as_str())
            })
            .collect();

        let mut view = ViewModel::new(list_type, locale);
        view.publication_date = list.publication_date.as_ref().map(|d| d.display(locale));
        view.sections.push(section);
        Ok(view)
    }

    fn summarize(&self, list_type: &str, document: &CanonicalDocument) -> Result<Vec<CaseSummary>> {
        let CanonicalDocument::SjpPublic(list) = document else {
            return Err(wrong_shape(list_type, "sjp_public", document));
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
            id: SJP_PUBLIC_LIST,
            name: "Single Justice Procedure Public List",
            schema_name: SCHEMA_NAME,
            schema_version: SCHEMA_VERSION,
        },
        SCHEMA,
        Box::new(SjpPublicHandler),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "document": {"publicationDate": "2024-06-03T09:00:00+01:00"},
            "courtLists": [{"courtHouse": {"courtRoom": [{"session": [{"sittings": [{"hearing": [
                {
                    "case": [{"caseUrn": "TVL123"}],
                    "party": [
                        {"partyRole": "ACCUSED", "individualDetails": {
                            "individualForenames": "Jane", "individualSurname": "Doe",
                            "dateOfBirth": "01/01/1990",
                            "address": {"line": ["1 High Street"], "town": "Cardiff", "postCode": "CF10 1AB"}
                        }},
                        {"partyRole": "PROSECUTOR", "organisationDetails": {"organisationName": "TV Licensing"}}
                    ],
                    "offence": [
                        {"offenceTitle": "Use a TV without a licence", "offenceWording": "On 1 May..."},
                        {"offenceTitle": "Second offence"}
                    ]
                },
                {
                    "case": [{"caseUrn": "DVLA456"}],
                    "party": [{"partyRole": "ACCUSED", "organisationDetails": {"organisationName": "Acme Haulage Ltd"}}],
                    "offence": [{"offenceTitle": "Keep an unlicensed vehicle"}]
                }
            ]}]}]}]}}]
        })
    }

    fn cases() -> Vec<SjpPublicCase> {
        match SjpPublicHandler.convert(SJP_PUBLIC_LIST, &sample()).unwrap() {
            CanonicalDocument::SjpPublic(list) => list.cases,
            other => panic!("unexpected shape {}", other.shape()),
        }
    }

    #[test]
    fn public_cases_carry_outward_postcode_only() {
        let cases = cases();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].defendant, "Jane Doe");
        assert_eq!(cases[0].postcode, "CF10");
        assert_eq!(cases[0].prosecutor, "TV Licensing");
        assert_eq!(cases[0].offences, vec!["Use a TV without a licence", "Second offence"]);
    }

    #[test]
    fn missing_parties_default() {
        let second = &cases()[1];
        assert_eq!(second.defendant, "Acme Haulage Ltd");
        assert_eq!(second.postcode, "N/A");
        assert_eq!(second.prosecutor, "N/A");
    }

    #[test]
    fn publication_date_is_rendered_per_locale() {
        let document = SjpPublicHandler.convert(SJP_PUBLIC_LIST, &sample()).unwrap();
        let en = SjpPublicHandler.render(SJP_PUBLIC_LIST, &document, Locale::En).unwrap();
        let cy = SjpPublicHandler.render(SJP_PUBLIC_LIST, &document, Locale::Cy).unwrap();
        assert_eq!(en.publication_date.as_deref(), Some("3 June 2024 at 9am"));
        assert_eq!(cy.publication_date.as_deref(), Some("3 Mehefin 2024 am 9yb"));
        assert_eq!(en.sections[0].rows[0].value("offence"), Some("Use a TV without a licence; Second offence"));
    }

    #[test]
    fn digest_has_no_full_address() {
        let document = SjpPublicHandler.convert(SJP_PUBLIC_LIST, &sample()).unwrap();
        let summaries = SjpPublicHandler.summarize(SJP_PUBLIC_LIST, &document).unwrap();
        let line = summaries[0].digest_line();
        assert!(line.contains("Postcode - CF10"));
        assert!(!line.contains("High Street"));
        assert!(!line.contains("1990"));
    }
}
