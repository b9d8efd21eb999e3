use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Textual date format used in paths, forms and storage (`yyyy-MM-dd`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum length of a care description
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// Well-known model key under which the pre-loaded pet is exposed
pub const PET_MODEL_KEY: &str = "pet";

/// Well-known model key under which the care being edited is exposed
pub const CARE_MODEL_KEY: &str = "cares";

/// A pet owner, the target of the post-submit redirect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    /// Pets owned by this owner, ordered by name
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl Owner {
    pub fn new(first_name: &str, last_name: &str, address: &str, city: &str, telephone: &str) -> Self {
        Self {
            id: None,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            address: address.to_string(),
            city: city.to_string(),
            telephone: telephone.to_string(),
            pets: Vec::new(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

/// A pet aggregate. Care and visit records are owned by the pet and
/// addressed by their index in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Option<i64>,
    pub name: String,
    pub birth_date: NaiveDate,
    /// Species name, e.g. "cat" or "dog"
    pub type_name: String,
    pub owner_id: Option<i64>,
    #[serde(default)]
    cares: Vec<Care>,
    #[serde(default)]
    visits: Vec<Visit>,
}

impl Pet {
    pub fn new(name: &str, birth_date: NaiveDate, type_name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            birth_date,
            type_name: type_name.to_string(),
            owner_id: None,
            cares: Vec::new(),
            visits: Vec::new(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Replace the care collection with records loaded from storage
    pub fn set_cares_internal(&mut self, cares: Vec<Care>) {
        self.cares = cares;
    }

    /// Attach a care record to this pet and return its index
    pub fn add_care(&mut self, mut care: Care) -> usize {
        care.pet_id = self.id;
        self.cares.push(care);
        self.cares.len() - 1
    }

    pub fn cares(&self) -> &[Care] {
        &self.cares
    }

    pub fn cares_mut(&mut self) -> &mut [Care] {
        &mut self.cares
    }

    /// Care records that already exist in storage
    pub fn persisted_cares(&self) -> impl Iterator<Item = &Care> {
        self.cares.iter().filter(|c| !c.is_new())
    }

    /// Cares recorded on a given date
    pub fn cares_on(&self, date: NaiveDate) -> Vec<&Care> {
        self.cares.iter().filter(|c| c.date == date).collect()
    }

    pub fn set_visits_internal(&mut self, visits: Vec<Visit>) {
        self.visits = visits;
    }

    pub fn add_visit(&mut self, mut visit: Visit) -> usize {
        visit.pet_id = self.id;
        self.visits.push(visit);
        self.visits.len() - 1
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }
}

/// A record of a care event for a pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Care {
    /// Assigned by storage; never bound from client input
    pub id: Option<i64>,
    /// Back-reference to the owning pet
    pub pet_id: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
}

impl Care {
    /// An empty care record dated today
    pub fn new() -> Self {
        Self {
            id: None,
            pet_id: None,
            date: chrono::Local::now().date_naive(),
            description: String::new(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

impl Default for Care {
    fn default() -> Self {
        Self::new()
    }
}

/// A clinic visit, structurally parallel to [`Care`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub id: Option<i64>,
    pub pet_id: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
}

impl Visit {
    pub fn new(date: NaiveDate, description: &str) -> Self {
        Self {
            id: None,
            pet_id: None,
            date,
            description: description.to_string(),
        }
    }
}

/// Form fields accepted when submitting a new care record.
///
/// Has no `id` field, so an `id` sent by the client is dropped during
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareForm {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single binding or validation failure on a form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    /// Machine-readable code, e.g. "NotBlank", "Size" or "typeMismatch"
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// A rendered view: the template name plus the model handed to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewResponse<M> {
    pub view: String,
    pub model: M,
}

/// Model of the care history view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareHistoryModel {
    pub pet: Pet,
    pub cares: Care,
    pub date: NaiveDate,
}

/// Model of the create-care form view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareFormModel {
    pub pet: Pet,
    pub cares: Care,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

/// Model of the owner details view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerDetailsModel {
    pub owner: Owner,
}

/// Body returned for requests that fail outside of form validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Parse a strict `yyyy-MM-dd` date: four-digit year, two-digit month and day
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, DateFormatError> {
    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !well_formed {
        return Err(DateFormatError::InvalidFormat(input.to_string()));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| DateFormatError::OutOfRange(input.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub enum DateFormatError {
    /// Input does not have the `yyyy-MM-dd` shape
    InvalidFormat(String),
    /// Shape is right but the date does not exist (e.g. 2023-02-30)
    OutOfRange(String),
}

impl fmt::Display for DateFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFormatError::InvalidFormat(s) => write!(f, "'{}' is not a date in yyyy-MM-dd format", s),
            DateFormatError::OutOfRange(s) => write!(f, "'{}' is not a valid calendar date", s),
        }
    }
}

impl std::error::Error for DateFormatError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn persisted_pet() -> Pet {
        let mut pet = Pet::new("Leo", date(2010, 9, 7), "cat");
        pet.id = Some(5);
        pet.owner_id = Some(3);
        pet
    }

    #[test]
    fn test_parse_iso_date_accepts_strict_format() {
        assert_eq!(parse_iso_date("2024-03-15").unwrap(), date(2024, 3, 15));
        assert_eq!(parse_iso_date("2000-02-29").unwrap(), date(2000, 2, 29));
    }

    #[test]
    fn test_parse_iso_date_rejects_other_shapes() {
        for input in ["2024-3-15", "15-03-2024", "2024/03/15", "20240315", "", "2024-03-15T00:00", "abcd-ef-gh"] {
            assert!(
                matches!(parse_iso_date(input), Err(DateFormatError::InvalidFormat(_))),
                "expected {:?} to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_iso_date_rejects_impossible_dates() {
        assert_eq!(
            parse_iso_date("2023-02-30"),
            Err(DateFormatError::OutOfRange("2023-02-30".to_string()))
        );
        assert!(parse_iso_date("2023-13-01").is_err());
    }

    #[test]
    fn test_add_care_sets_back_reference_and_returns_index() {
        let mut pet = persisted_pet();
        pet.set_cares_internal(vec![Care {
            id: Some(1),
            pet_id: Some(5),
            date: date(2024, 1, 2),
            description: "nail trim".to_string(),
        }]);

        let index = pet.add_care(Care::new());

        assert_eq!(index, 1);
        assert_eq!(pet.cares().len(), 2);
        assert_eq!(pet.cares()[index].pet_id, Some(5));
        assert!(pet.cares()[index].is_new());
        assert_eq!(pet.persisted_cares().count(), 1);
    }

    #[test]
    fn test_cares_mut_edits_in_place() {
        let mut pet = persisted_pet();
        let index = pet.add_care(Care::new());
        pet.cares_mut()[index].description = "bath".to_string();
        assert_eq!(pet.cares()[index].description, "bath");
        assert_eq!(pet.persisted_cares().count(), 0);
    }

    #[test]
    fn test_cares_on_filters_by_date() {
        let mut pet = persisted_pet();
        let mut first = Care::new();
        first.date = date(2024, 5, 1);
        let mut second = Care::new();
        second.date = date(2024, 5, 2);
        pet.add_care(first);
        pet.add_care(second);

        let on_first = pet.cares_on(date(2024, 5, 1));
        assert_eq!(on_first.len(), 1);
        assert_eq!(on_first[0].date, date(2024, 5, 1));
    }

    #[test]
    fn test_care_form_ignores_client_id() {
        let json = r#"{"id": 42, "date": "2024-01-01", "description": "bath"}"#;
        let form: CareForm = serde_json::from_str(json).unwrap();
        assert_eq!(
            form,
            CareForm {
                date: Some("2024-01-01".to_string()),
                description: Some("bath".to_string()),
            }
        );
    }

    #[test]
    fn test_care_serializes_date_as_iso_string() {
        let care = Care {
            id: Some(7),
            pet_id: Some(5),
            date: date(2024, 6, 30),
            description: "grooming".to_string(),
        };
        let value = serde_json::to_value(&care).unwrap();
        assert_eq!(value["date"], "2024-06-30");
    }
}
