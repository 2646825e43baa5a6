//! Domain types for the person resource.

pub mod patch;
pub mod person;

pub use patch::Patch;
pub use person::{NewPerson, Person, PersonChanges, PersonUpdate};
