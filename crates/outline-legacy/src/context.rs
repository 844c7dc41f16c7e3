//! Mutable state carried across one decode pass.

use outline_model::{ElementId, ElementKind, ModelError, Relationship, StoryElement, StoryOutline};

use crate::tree_builder::OutlineDraft;
use crate::version::FormatVersion;

/// Index of the most recently started entity of each kind.
///
/// Element kinds index the element arena; `relationship` indexes the
/// relationship list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CurrentEntities {
    overview: Option<usize>,
    problem: Option<usize>,
    character: Option<usize>,
    setting: Option<usize>,
    plot_point: Option<usize>,
    relationship: Option<usize>,
}

impl CurrentEntities {
    fn get(&self, kind: ElementKind) -> Option<usize> {
        match kind {
            ElementKind::Overview => self.overview,
            ElementKind::Problem => self.problem,
            ElementKind::Character => self.character,
            ElementKind::Setting => self.setting,
            ElementKind::PlotPoint => self.plot_point,
            ElementKind::Relationship => self.relationship,
        }
    }

    fn set(&mut self, kind: ElementKind, index: usize) {
        let slot = match kind {
            ElementKind::Overview => &mut self.overview,
            ElementKind::Problem => &mut self.problem,
            ElementKind::Character => &mut self.character,
            ElementKind::Setting => &mut self.setting,
            ElementKind::PlotPoint => &mut self.plot_point,
            ElementKind::Relationship => &mut self.relationship,
        };
        *slot = Some(index);
    }
}

/// The entity a continuation record writes to.
#[derive(Debug)]
pub enum Target<'a> {
    Element(&'a mut StoryElement),
    Relationship(&'a mut Relationship),
}

impl Target<'_> {
    pub fn set(&mut self, name: &str, value: String) -> Result<(), ModelError> {
        match self {
            Self::Element(element) => element.set_attribute(name, value),
            Self::Relationship(relationship) => relationship.set_attribute(name, value),
        }
    }

    pub fn append(&mut self, name: &str, text: &str) -> Result<(), ModelError> {
        match self {
            Self::Element(element) => element.append_attribute(name, text),
            Self::Relationship(relationship) => relationship.append_attribute(name, text),
        }
    }
}

/// Parse state for a single pass over one file.
///
/// Created fresh by every decode call and consumed by [`Self::finish`].
#[derive(Debug, Default)]
pub struct ParseContext {
    version: Option<FormatVersion>,
    current: CurrentEntities,
    elements: Vec<StoryElement>,
    relationships: Vec<Relationship>,
    draft: OutlineDraft,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active format version; `None` selects the newest layouts.
    pub fn version(&self) -> Option<FormatVersion> {
        self.version
    }

    pub fn set_version(&mut self, version: Option<FormatVersion>) {
        self.version = version;
    }

    /// Index of the current entity of `kind`.
    #[cfg(test)]
    pub fn current(&self, kind: ElementKind) -> Option<usize> {
        self.current.get(kind)
    }

    #[cfg(test)]
    pub fn elements(&self) -> &[StoryElement] {
        &self.elements
    }

    #[cfg(test)]
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    #[cfg(test)]
    pub fn draft(&self) -> &OutlineDraft {
        &self.draft
    }

    /// Start a new entity of `kind` and make it current.
    ///
    /// `fill` runs on the new entity before it is filed in the outline, so
    /// the outline leaf sees the start record's name.
    pub fn start<F>(&mut self, kind: ElementKind, fill: F) -> Result<(), ModelError>
    where
        F: FnOnce(&mut Target<'_>),
    {
        if kind == ElementKind::Relationship {
            let mut relationship = Relationship::default();
            fill(&mut Target::Relationship(&mut relationship));
            self.relationships.push(relationship);
            self.current.set(kind, self.relationships.len() - 1);
            return Ok(());
        }
        let Some(mut element) = StoryElement::empty(kind) else {
            return Ok(());
        };
        fill(&mut Target::Element(&mut element));
        let index = self.elements.len();
        self.draft.add_element(ElementId::new(index), &element)?;
        self.elements.push(element);
        self.current.set(kind, index);
        Ok(())
    }

    /// The current entity of `kind`, if one has been started.
    pub fn target(&mut self, kind: ElementKind) -> Option<Target<'_>> {
        let index = self.current.get(kind)?;
        if kind == ElementKind::Relationship {
            self.relationships.get_mut(index).map(Target::Relationship)
        } else {
            self.elements.get_mut(index).map(Target::Element)
        }
    }

    /// Build the two forests and hand back the finished outline.
    pub fn finish(self) -> Result<StoryOutline, ModelError> {
        self.draft.finish(self.elements, self.relationships)
    }
}
