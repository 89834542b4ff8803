// 🦉 Animal Entity - Stable identity + display values
//
// "Name is a VALUE, the UUID is IDENTITY"
//
// The id only tells list rows apart. Two animals with the same name
// (the "+" button always adds another Owl) are still different rows.

use serde::{Serialize, Serializer};
use serde::ser::SerializeStruct;

// ============================================================================
// IDENTIFIABLE
// ============================================================================

/// Anything that can be shown as a row in a list needs a stable, unique key.
pub trait Identifiable {
    fn id(&self) -> &str;
}

// ============================================================================
// ANIMAL ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animal {
    /// Stable identity (UUID) - set once in `new`, never changes
    id: String,

    /// Display name, also the base of the image identifiers
    pub name: String,

    /// One-line description shown under the name
    pub description: String,
}

impl Animal {
    /// Create new animal with a fresh UUID
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Animal {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Full-size image identifier
    ///
    /// Example: "Owl" → "Owl"
    pub fn image_name(&self) -> String {
        self.name.clone()
    }

    /// Thumbnail image identifier
    ///
    /// Example: "Owl" → "OwlThumb"
    pub fn thumb_name(&self) -> String {
        format!("{}Thumb", self.name)
    }
}

impl Identifiable for Animal {
    fn id(&self) -> &str {
        &self.id
    }
}

// The derived image names are part of the JSON output even though they are
// never stored on the struct.
impl Serialize for Animal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Animal", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("image_name", &self.image_name())?;
        state.serialize_field("thumb_name", &self.thumb_name())?;
        state.end()
    }
}

// ============================================================================
// SEED DATA
// ============================================================================

/// The five animals every session starts with, in display order
pub const SEED_ANIMALS: [(&str, &str); 5] = [
    ("Eagle", "Flys"),
    ("Owl", "Hoots"),
    ("Parrot", "Talks"),
    ("Penguin", "Waddles"),
    ("Zebra", "Runs"),
];

/// Placeholder added by the list's "add" action
pub const PLACEHOLDER_NAME: &str = "Owl";
pub const PLACEHOLDER_DESCRIPTION: &str = "Test!";

pub fn seed_animals() -> Vec<Animal> {
    SEED_ANIMALS
        .iter()
        .map(|(name, description)| Animal::new(*name, *description))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
