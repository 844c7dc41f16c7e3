use serde::{Deserialize, Serialize};

use crate::element::{ElementKind, StoryElement};
use crate::ids::ElementId;
use crate::relationship::Relationship;
use crate::tree::Forest;

/// A complete story outline: the element arena, the relationship list and
/// the two forests that present the elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryOutline {
    pub elements: Vec<StoryElement>,
    pub relationships: Vec<Relationship>,
    /// Outline view: Overview root with category folders, then Trash.
    pub outline: Forest,
    /// Narrative view: plot points in story order, then Trash.
    pub narrative: Forest,
}

impl StoryOutline {
    pub fn element(&self, id: ElementId) -> Option<&StoryElement> {
        self.elements.get(id.index())
    }

    /// Elements of one kind, with their ids, in creation order.
    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = (ElementId, &StoryElement)> {
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, element)| element.kind() == kind)
            .map(|(index, element)| (ElementId::new(index), element))
    }

    pub fn count(&self, kind: ElementKind) -> usize {
        if kind == ElementKind::Relationship {
            self.relationships.len()
        } else {
            self.elements_of(kind).count()
        }
    }

    /// First character element whose name equals `name`.
    pub fn find_character(&self, name: &str) -> Option<ElementId> {
        self.elements_of(ElementKind::Character)
            .find(|(_, element)| element.name() == name)
            .map(|(id, _)| id)
    }
}
