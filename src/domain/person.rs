//! The `Person` entity and the payloads that create or modify it.

use crate::domain::patch::Patch;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// A stored person. `id` is assigned by the service on creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[schema(example = json!({
    "id": "5f0c5a0e-8d3c-4f0b-9b7e-1b2f3c4d5e6f",
    "name": "John Doe",
    "age": 30,
    "email": "john.doe@example.com",
    "phone": "+1234567890"
}))]
pub struct Person {
    /// Unique identifier for the person.
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub phone: Option<String>,
}

/// Body of `POST /persons`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "John Doe",
    "age": 30,
    "email": "john.doe@example.com",
    "phone": "+1234567890"
}))]
pub struct NewPerson {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: i32,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl NewPerson {
    pub fn into_person(self, id: Uuid) -> Person {
        Person {
            id,
            name: self.name,
            age: self.age,
            email: self.email,
            phone: self.phone,
        }
    }
}

/// Body of `PUT /persons/{id}`.
///
/// Every field is a [`Patch`], so a field the client left out is distinguishable from one it
/// sent as `null`. Only `phone` may be cleared.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[schema(example = json!({ "age": 31 }))]
pub struct PersonUpdate {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub age: Patch<i32>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub phone: Patch<String>,
}

impl PersonUpdate {
    /// True when the client supplied no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_unset() && self.age.is_unset() && self.email.is_unset() && self.phone.is_unset()
    }

    /// Converts the request into validated column changes.
    pub fn into_changes(self) -> Result<PersonChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required(self.name, "name", &mut errors);
        let age = required(self.age, "age", &mut errors);
        let email = required(self.email, "email", &mut errors);
        let phone = match self.phone {
            Patch::Unset => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        };

        if !errors.errors().is_empty() {
            return Err(errors);
        }

        let changes = PersonChanges {
            name,
            age,
            email,
            phone,
        };
        changes.validate()?;
        Ok(changes)
    }
}

fn required<T>(patch: Patch<T>, field: &'static str, errors: &mut ValidationErrors) -> Option<T> {
    match patch {
        Patch::Unset => None,
        Patch::Value(v) => Some(v),
        Patch::Null => {
            let mut err = ValidationError::new("not_nullable");
            err.message = Some(Cow::from(format!("{} cannot be null", field)));
            errors.add(field, err);
            None
        }
    }
}

/// Validated set of column overwrites handed to storage. `None` means "leave as is";
/// for `phone`, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct PersonChanges {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: Option<i32>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
}

impl PersonChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.email.is_none() && self.phone.is_none()
    }

    /// Overwrites each supplied field on `person`.
    pub fn apply_to(&self, person: &mut Person) {
        if let Some(name) = &self.name {
            person.name = name.clone();
        }
        if let Some(age) = self.age {
            person.age = age;
        }
        if let Some(email) = &self.email {
            person.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            person.phone = phone.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn john() -> NewPerson {
        NewPerson {
            name: "John Doe".into(),
            age: 30,
            email: "john.doe@example.com".into(),
            phone: None,
        }
    }

    #[test]
    fn new_person_accepts_age_bounds() {
        for age in [0, 150] {
            let p = NewPerson { age, ..john() };
            assert!(p.validate().is_ok(), "age {} should be valid", age);
        }
    }

    #[test]
    fn new_person_rejects_empty_name_and_bad_age() {
        let p = NewPerson {
            name: String::new(),
            age: 151,
            ..john()
        };
        let errors = p.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("age"));

        assert!(NewPerson { age: -1, ..john() }.validate().is_err());
    }

    #[test]
    fn update_distinguishes_missing_from_null() {
        let update: PersonUpdate = serde_json::from_value(json!({ "phone": null })).unwrap();
        assert_eq!(update.name, Patch::Unset);
        assert_eq!(update.phone, Patch::Null);
        assert!(!update.is_empty());

        let changes = update.into_changes().unwrap();
        assert_eq!(changes.phone, Some(None));
        assert_eq!(changes.name, None);
    }

    #[test]
    fn empty_body_is_an_empty_update() {
        let update: PersonUpdate = serde_json::from_value(json!({})).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn null_required_field_is_rejected() {
        let update: PersonUpdate = serde_json::from_value(json!({ "name": null })).unwrap();
        let errors = update.into_changes().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn out_of_range_age_in_update_is_rejected() {
        let update: PersonUpdate = serde_json::from_value(json!({ "age": 200 })).unwrap();
        assert!(update.into_changes().is_err());
    }

    #[test]
    fn apply_to_only_touches_supplied_fields() {
        let mut person = john().into_person(Uuid::new_v4());
        person.phone = Some("+1234567890".into());
        let before = person.clone();

        let changes = PersonChanges {
            age: Some(31),
            ..Default::default()
        };
        changes.apply_to(&mut person);

        assert_eq!(person.age, 31);
        assert_eq!(person.name, before.name);
        assert_eq!(person.email, before.email);
        assert_eq!(person.phone, before.phone);
    }
}
