//! Character relationships.
//!
//! Relationships are kept in a flat list beside the element arena and are
//! not placed in either outline forest.

use serde::{Deserialize, Serialize};

use crate::element::{ElementKind, append_text};
use crate::error::{ModelError, Result};
use crate::ids::ElementId;

/// A reference to a character by the name stored in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRef {
    pub name: String,
    /// The character element with this name, once resolved.
    pub element: Option<ElementId>,
}

impl CharacterRef {
    pub fn is_resolved(&self) -> bool {
        self.element.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub first: CharacterRef,
    pub second: CharacterRef,
    pub first_trait: String,
    pub second_trait: String,
    pub relation_type: String,
    pub remarks: String,
}

impl Relationship {
    pub const ATTRIBUTES: &'static [&'static str] = &[
        "first",
        "second",
        "first_trait",
        "second_trait",
        "relation_type",
        "remarks",
    ];

    /// The optional trait pair; `None` when neither side carries a trait.
    pub fn traits(&self) -> Option<(&str, &str)> {
        if self.first_trait.is_empty() && self.second_trait.is_empty() {
            None
        } else {
            Some((&self.first_trait, &self.second_trait))
        }
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "first" => Some(&mut self.first.name),
            "second" => Some(&mut self.second.name),
            "first_trait" => Some(&mut self.first_trait),
            "second_trait" => Some(&mut self.second_trait),
            "relation_type" => Some(&mut self.relation_type),
            "remarks" => Some(&mut self.remarks),
            _ => None,
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: String) -> Result<()> {
        let slot = self
            .attribute_mut(name)
            .ok_or_else(|| ModelError::unknown_attribute(ElementKind::Relationship, name))?;
        *slot = value;
        Ok(())
    }

    pub fn append_attribute(&mut self, name: &str, text: &str) -> Result<()> {
        let slot = self
            .attribute_mut(name)
            .ok_or_else(|| ModelError::unknown_attribute(ElementKind::Relationship, name))?;
        append_text(slot, text);
        Ok(())
    }
}
