//! Story outline data model.
//!
//! The types here describe a decoded outline independently of the file
//! format it came from: an arena of [`StoryElement`]s, a flat list of
//! [`Relationship`]s, and two [`Forest`]s (outline and narrative views)
//! whose nodes reference elements by [`ElementId`].

pub mod element;
pub mod error;
pub mod ids;
pub mod outline;
pub mod relationship;
pub mod tree;

pub use element::{
    Character, ElementKind, PERSONALITY_TRAITS, PlotPoint, Problem, Setting, StoryElement,
    StoryOverview,
};
pub use error::{ModelError, Result};
pub use ids::{ElementId, NodeId};
pub use outline::StoryOutline;
pub use relationship::{CharacterRef, Relationship};
pub use tree::{Forest, NodeKind, OutlineNode};
