//! Raw shape shared by the Single Justice Procedure public and press lists.
//!
//! Both lists nest hearings under court lists, court houses, court rooms,
//! sessions and sittings. Conversion only ever needs the hearings, in the
//! order they are published.

use serde::{Deserialize, Deserializer};

use crate::pipeline::values::TimestampValue;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawSjpList {
    document: RawDocumentInfo,
    #[serde(default)]
    court_lists: Vec<RawCourtList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocumentInfo {
    publication_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCourtList {
    court_house: RawCourtHouse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCourtHouse {
    #[serde(default)]
    court_room: Vec<RawCourtRoom>,
}

#[derive(Debug, Deserialize)]
struct RawCourtRoom {
    #[serde(default)]
    session: Vec<RawSession>,
}

#[derive(Debug, Deserialize)]
struct RawSession {
    #[serde(default)]
    sittings: Vec<RawSitting>,
}

#[derive(Debug, Deserialize)]
struct RawSitting {
    #[serde(default)]
    hearing: Vec<RawHearing>,
}

impl RawSjpList {
    pub(super) fn publication_date(&self) -> TimestampValue {
        TimestampValue::parse(&self.document.publication_date)
    }

    /// Every hearing, depth first in document order.
    pub(super) fn into_hearings(self) -> impl Iterator<Item = RawHearing> {
        self.court_lists
            .into_iter()
            .flat_map(|list| list.court_house.court_room)
            .flat_map(|room| room.session)
            .flat_map(|session| session.sittings)
            .flat_map(|sitting| sitting.hearing)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RawHearing {
    case: Vec<RawCase>,
    #[serde(default)]
    party: Vec<RawParty>,
    #[serde(default)]
    pub(super) offence: Vec<RawOffence>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCase {
    case_urn: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum PartyRole {
    Accused,
    Prosecutor,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawParty {
    party_role: PartyRole,
    individual_details: Option<RawIndividual>,
    organisation_details: Option<RawOrganisation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawIndividual {
    individual_forenames: Option<String>,
    individual_surname: Option<String>,
    pub(super) date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "whole_number")]
    pub(super) age: Option<u32>,
    address: Option<RawAddress>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOrganisation {
    organisation_name: Option<String>,
    organisation_address: Option<RawAddress>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawAddress {
    #[serde(default)]
    line: Vec<String>,
    town: Option<String>,
    county: Option<String>,
    post_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawOffence {
    pub(super) offence_title: String,
    pub(super) offence_wording: Option<String>,
    #[serde(default)]
    pub(super) reporting_restriction: bool,
}

impl RawHearing {
    /// Case references, comma separated when a hearing covers several cases.
    pub(super) fn case_urn(&self) -> String {
        self.case
            .iter()
            .map(|c| c.case_urn.trim())
            .filter(|urn| !urn.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(super) fn accused(&self) -> Option<&RawParty> {
        self.party_with_role(PartyRole::Accused)
    }

    pub(super) fn prosecutor(&self) -> Option<&RawParty> {
        self.party_with_role(PartyRole::Prosecutor)
    }

    fn party_with_role(&self, role: PartyRole) -> Option<&RawParty> {
        self.party.iter().find(|p| p.party_role == role)
    }

    pub(super) fn offence_titles(&self) -> Vec<String> {
        self.offence
            .iter()
            .map(|o| o.offence_title.trim().to_string())
            .filter(|title| !title.is_empty())
            .collect()
    }
}

impl RawParty {
    /// `Forenames Surname` for an individual, otherwise the organisation name.
    pub(super) fn name(&self) -> Option<String> {
        let individual = self.individual_details.as_ref().and_then(|i| {
            non_blank_join(
                [i.individual_forenames.as_deref(), i.individual_surname.as_deref()],
                " ",
            )
        });
        individual.or_else(|| {
            self.organisation_details
                .as_ref()
                .and_then(|o| o.organisation_name.as_deref())
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        })
    }

    pub(super) fn individual(&self) -> Option<&RawIndividual> {
        self.individual_details.as_ref()
    }

    pub(super) fn address(&self) -> Option<&RawAddress> {
        self.individual_details
            .as_ref()
            .and_then(|i| i.address.as_ref())
            .or_else(|| {
                self.organisation_details
                    .as_ref()
                    .and_then(|o| o.organisation_address.as_ref())
            })
    }
}

impl RawAddress {
    /// Address lines, town, county and postcode, comma separated.
    pub(super) fn full(&self) -> Option<String> {
        let parts = self
            .line
            .iter()
            .map(|l| Some(l.as_str()))
            .chain([self.town.as_deref(), self.county.as_deref(), self.post_code.as_deref()]);
        non_blank_join(parts, ", ")
    }

    pub(super) fn outward_postcode(&self) -> Option<String> {
        self.post_code.as_deref().and_then(outward_code)
    }
}

/// The outward half of a UK postcode. The inward code is always three characters.
pub(super) fn outward_code(postcode: &str) -> Option<String> {
    let trimmed = postcode.trim();
    if trimmed.is_empty() {
        return None;
    }
    let outward = match trimmed.split_whitespace().next() {
        Some(first) if first.len() < trimmed.len() => first.to_string(),
        _ => {
            let chars: Vec<char> = trimmed.chars().collect();
            if chars.len() > 3 {
                chars[..chars.len() - 3].iter().collect()
            } else {
                trimmed.to_string()
            }
        }
    };
    Some(outward.to_uppercase())
}

/// A non-negative whole number, however the publisher wrote it (`30` or `30.0`).
fn whole_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(number
        .and_then(|n| {
            n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
                    .map(|f| f as u64)
            })
        })
        .and_then(|n| u32::try_from(n).ok()))
}

fn non_blank_join<'a>(parts: impl IntoIterator<Item = Option<&'a str>>, separator: &str) -> Option<String> {
    let joined = parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator);
    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list() -> RawSjpList {
        serde_json::from_value(json!({
            "document": {"publicationDate": "2024-06-03T09:00:00Z"},
            "courtLists": [
                {"courtHouse": {"courtRoom": [{"session": [{"sittings": [
                    {"hearing": [{"case": [{"caseUrn": "URN1"}], "party": [], "offence": []}]},
                    {"hearing": [{"case": [{"caseUrn": "URN2"}, {"caseUrn": " URN3 "}], "party": [], "offence": []}]}
                ]}]}]}},
                {"courtHouse": {"courtRoom": [{"session": [{"sittings": [
                    {"hearing": [{"case": [{"caseUrn": "URN4"}], "party": [], "offence": []}]}
                ]}]}]}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn hearings_flatten_in_document_order() {
        let urns: Vec<String> = list().into_hearings().map(|h| h.case_urn()).collect();
        assert_eq!(urns, vec!["URN1", "URN2, URN3", "URN4"]);
    }

    #[test]
    fn outward_codes() {
        assert_eq!(outward_code("AA1 1AA").as_deref(), Some("AA1"));
        assert_eq!(outward_code("cf10 1ab").as_deref(), Some("CF10"));
        assert_eq!(outward_code("SW1A2AA").as_deref(), Some("SW1A"));
        assert_eq!(outward_code("  "), None);
    }

    #[test]
    fn party_names_prefer_individuals() {
        let party: RawParty = serde_json::from_value(json!({
            "partyRole": "ACCUSED",
            "individualDetails": {"individualForenames": "Jane", "individualSurname": "Doe"},
            "organisationDetails": {"organisationName": "Ignored Ltd"}
        }))
        .unwrap();
        assert_eq!(party.name().as_deref(), Some("Jane Doe"));

        let organisation: RawParty = serde_json::from_value(json!({
            "partyRole": "PROSECUTOR",
            "organisationDetails": {"organisationName": " TV Licensing "}
        }))
        .unwrap();
        assert_eq!(organisation.name().as_deref(), Some("TV Licensing"));
    }

    #[test]
    fn ages_written_as_whole_floats_are_read() {
        let read = |age: serde_json::Value| -> Option<u32> {
            let individual: RawIndividual = serde_json::from_value(json!({"age": age})).unwrap();
            individual.age
        };
        assert_eq!(read(json!(30.0)), Some(30));
        assert_eq!(read(json!(30)), Some(30));
        assert_eq!(read(json!(null)), None);
        assert_eq!(read(json!(30.5)), None);

        let missing: RawIndividual = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.age, None);
    }

    #[test]
    fn addresses_skip_blank_parts() {
        let address: RawAddress = serde_json::from_value(json!({
            "line": ["1 High Street", ""], "town": "Cardiff", "postCode": "CF10 1AB"
        }))
        .unwrap();
        assert_eq!(address.full().as_deref(), Some("1 High Street, Cardiff, CF10 1AB"));
        assert_eq!(RawAddress::default().full(), None);
    }
}
