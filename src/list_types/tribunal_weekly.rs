use serde::Deserialize;
use serde_json::Value;

use super::{read_raw, wrong_shape};
use crate::constants::{CST_WEEKLY_HEARING_LIST, NOT_APPLICABLE, PHT_WEEKLY_HEARING_LIST};
use crate::error::Result;
use crate::pipeline::defaults::FieldDefaults;
use crate::pipeline::document::{CanonicalDocument, TribunalHearing, TribunalWeeklyList};
use crate::pipeline::locale::Locale;
use crate::pipeline::pdf::{PdfColumn, PdfLayout};
use crate::pipeline::registry::{ListTypeDescriptor, ListTypeHandler, RegistryBuilder};
use crate::pipeline::summary::{CaseSummary, DigestField, Sensitivity, SummaryPolicy};
use crate::pipeline::values::DateValue;
use crate::pipeline::view::{ViewModel, ViewRow, ViewSection};

pub const SCHEMA_NAME: &str = "tribunal_weekly_hearing_list";
pub const SCHEMA_VERSION: &str = "1.0";
const SCHEMA: &str = include_str!("../../schemas/tribunal_weekly_hearing_list.v1.json");

pub const FIELD_DEFAULTS: FieldDefaults = FieldDefaults::new(&[
    ("hearingLength", NOT_APPLICABLE),
    ("venue", NOT_APPLICABLE),
    ("additionalInformation", NOT_APPLICABLE),
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TribunalField {
    Date,
    CaseName,
    HearingType,
}

impl DigestField for TribunalField {
    fn label(self) -> &'static str {
        match self {
            TribunalField::Date => "Date",
            TribunalField::CaseName => "Case name",
            TribunalField::HearingType => "Hearing type",
        }
    }
}

const DIGEST_FIELDS: &[TribunalField] = &[
    TribunalField::Date,
    TribunalField::CaseName,
    TribunalField::HearingType,
];

const COLUMNS: &[PdfColumn] = &[
    PdfColumn::new("date", "Date", "Dyddiad", 1.4),
    PdfColumn::new("case_name", "Case name", "Enw'r achos", 1.6),
    PdfColumn::new("hearing_length", "Hearing length", "Hyd y gwrandawiad", 0.9),
    PdfColumn::new("hearing_type", "Hearing type", "Math o wrandawiad", 1.0),
    PdfColumn::new("venue", "Venue", "Lleoliad", 1.2),
    PdfColumn::new("additional_information", "Additional information", "Gwybodaeth ychwanegol", 1.4),
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTribunalHearing {
    date: String,
    case_name: String,
    hearing_length: Option<String>,
    // Older publications
    duration: Option<String>,
    hearing_type: String,
    venue: Option<String>,
    additional_information: Option<String>,
}

impl RawTribunalHearing {
    fn into_hearing(self) -> TribunalHearing {
        TribunalHearing {
            date: DateValue::parse(&self.date),
            case_name: self.case_name.trim().to_string(),
            hearing_length: FIELD_DEFAULTS.first_of(
                "hearingLength",
                [self.hearing_length.as_deref(), self.duration.as_deref()],
            ),
            hearing_type: self.hearing_type.trim().to_string(),
            venue: FIELD_DEFAULTS.text("venue", self.venue.as_deref()),
            additional_information: FIELD_DEFAULTS
                .text("additionalInformation", self.additional_information.as_deref()),
        }
    }
}

fn digest_value(hearing: &TribunalHearing, field: TribunalField) -> String {
    match field {
        TribunalField::Date => hearing.date.display(Locale::En),
        TribunalField::CaseName => hearing.case_name.clone(),
        TribunalField::HearingType => hearing.hearing_type.clone(),
    }
}

/// Weekly tribunal lists differ only in whether they carry special category data.
pub struct TribunalWeeklyHandler {
    policy: SummaryPolicy<TribunalField>,
}

impl TribunalWeeklyHandler {
    pub fn new(sensitivity: Sensitivity) -> Self {
        Self {
            policy: SummaryPolicy {
                sensitivity,
                fields: DIGEST_FIELDS,
            },
        }
    }
}

impl ListTypeHandler for TribunalWeeklyHandler {
    fn convert(&self, list_type: &str, raw: &Value) -> Result<CanonicalDocument> {
        let hearings: Vec<RawTribunalHearing> = read_raw(list_type, raw)?;
        Ok(CanonicalDocument::TribunalWeekly(TribunalWeeklyList {
            hearings: hearings.into_iter().map(RawTribunalHearing::into_hearing).collect(),
        }))
    }

    fn render(
        &self,
        list_type: &str,
        document: &CanonicalDocument,
        locale: Locale,
    ) -> Result<ViewModel> {
        let CanonicalDocument::TribunalWeekly(list) = document else {
            return Err(wrong_shape(list_type, "tribunal_weekly", document));
        };
        let mut section = ViewSection::new("hearings");
        section.rows = list
            .hearings
            .iter()
            .map(|h| {
                ViewRow::default()
                    .cell("date", h.date.display_long(locale))
                    .cell("case_name", h.case_name.as_str())
                    .cell("hearing_length", h.hearing_length.as_str())
                    .cell("hearing_type", h.hearing_type.as_str())
                    .cell("venue", h.venue.as_str())
                    .cell("additional_information", h.additional_information.as_str())
            })
            .collect();

        let mut view = ViewModel::new(list_type, locale);
        view.sections.push(section);
        Ok(view)
    }

    fn summarize(&self, list_type: &str, document: &CanonicalDocument) -> Result<Vec<CaseSummary>> {
        let CanonicalDocument::TribunalWeekly(list) = document else {
            return Err(wrong_shape(list_type, "tribunal_weekly", document));
        };
        Ok(self
            .policy
            .summarize(list.hearings.iter(), |hearing, field| digest_value(hearing, field)))
    }

    fn pdf_layout(&self) -> PdfLayout {
        PdfLayout {
            columns: COLUMNS,
            section_headings: &[],
        }
    }

    fn sensitivity(&self) -> Sensitivity {
        self.policy.sensitivity
    }
}

pub fn register(builder: &mut RegistryBuilder) -> Result<()> {
    let list_types = [
        (
            CST_WEEKLY_HEARING_LIST,
            "Care Standards Tribunal Weekly Hearing List",
            Sensitivity::SpecialCategory,
        ),
        (
            PHT_WEEKLY_HEARING_LIST,
            "Primary Health Tribunal Weekly Hearing List",
            Sensitivity::Public,
        ),
    ];
    for (id, name, sensitivity) in list_types {
        builder.register(
            ListTypeDescriptor {
                id,
                name,
                schema_name: SCHEMA_NAME,
                schema_version: SCHEMA_VERSION,
            },
            SCHEMA,
            Box::new(TribunalWeeklyHandler::new(sensitivity)),
        )?;
    }
    Ok(())
}
