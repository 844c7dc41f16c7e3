//! Builds the outline and narrative forests for a decoded outline.
//!
//! Leaf nodes are created while records stream in ([`OutlineDraft`]); the
//! roots, folder nesting and trash roots are added once the stream ends
//! ([`OutlineDraft::finish`]).

use outline_model::{
    ElementId, ElementKind, Forest, ModelError, NodeId, NodeKind, Relationship, StoryElement,
    StoryOutline,
};

pub const OVERVIEW_NAME: &str = "Story Overview";
pub const NARRATIVE_NAME: &str = "Narrative View";
pub const TRASH_NAME: &str = "Trash";

/// Category folders of the outline view, in display order.
const FOLDERS: [(ElementKind, &str); 4] = [
    (ElementKind::Problem, "Problems"),
    (ElementKind::Character, "Characters"),
    (ElementKind::Setting, "Settings"),
    (ElementKind::PlotPoint, "Plot Points"),
];

fn leaf_kind(kind: ElementKind) -> Option<NodeKind> {
    match kind {
        ElementKind::Problem => Some(NodeKind::Problem),
        ElementKind::Character => Some(NodeKind::Character),
        ElementKind::Setting => Some(NodeKind::Setting),
        ElementKind::PlotPoint => Some(NodeKind::PlotPoint),
        ElementKind::Overview | ElementKind::Relationship => None,
    }
}

/// Outline forest under construction.
#[derive(Debug)]
pub struct OutlineDraft {
    forest: Forest,
    folders: [NodeId; 4],
    overview: Option<ElementId>,
    plot_points: Vec<ElementId>,
}

impl Default for OutlineDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineDraft {
    pub fn new() -> Self {
        let mut forest = Forest::new();
        let folders = FOLDERS.map(|(_, name)| forest.add_node(name, NodeKind::Folder, None));
        Self {
            forest,
            folders,
            overview: None,
            plot_points: Vec::new(),
        }
    }

    /// Record a newly started element.
    ///
    /// Problems, characters, settings and plot points get a leaf under
    /// their folder; plot points are also remembered for the narrative
    /// view. The first overview element becomes the Overview root's
    /// element.
    pub fn add_element(&mut self, id: ElementId, element: &StoryElement) -> Result<(), ModelError> {
        let kind = element.kind();
        if kind == ElementKind::Overview {
            self.overview.get_or_insert(id);
            return Ok(());
        }
        let (Some(node_kind), Some(slot)) = (
            leaf_kind(kind),
            FOLDERS.iter().position(|&(folder, _)| folder == kind),
        ) else {
            return Ok(());
        };
        let leaf = self
            .forest
            .add_node(element.display_name(), node_kind, Some(id));
        self.forest.attach(leaf, self.folders[slot])?;
        if kind == ElementKind::PlotPoint {
            self.plot_points.push(id);
        }
        Ok(())
    }

    /// Number of leaves filed under the folder for `kind`.
    #[cfg(test)]
    pub fn folder_len(&self, kind: ElementKind) -> usize {
        FOLDERS
            .iter()
            .position(|&(folder, _)| folder == kind)
            .map_or(0, |slot| self.forest.children(self.folders[slot]).count())
    }

    /// Assemble the final outline from the element arena and relationships.
    pub fn finish(
        self,
        elements: Vec<StoryElement>,
        mut relationships: Vec<Relationship>,
    ) -> Result<StoryOutline, ModelError> {
        let Self {
            mut forest,
            folders,
            overview,
            plot_points,
        } = self;

        // Names may have changed after the leaf was created.
        let renames: Vec<(NodeId, String)> = forest
            .nodes()
            .iter()
            .filter_map(|node| {
                let element = elements.get(node.element?.index())?;
                Some((node.id, element.display_name().to_string()))
            })
            .collect();
        for (id, name) in renames {
            if let Some(node) = forest.node_mut(id) {
                node.name = name;
            }
        }

        let overview_name = overview
            .and_then(|id| elements.get(id.index()))
            .map_or(OVERVIEW_NAME, StoryElement::display_name);
        let root = forest.add_root(overview_name, NodeKind::Overview, overview);
        for folder in folders {
            forest.attach(folder, root)?;
        }
        forest.add_root(TRASH_NAME, NodeKind::Trash, None);

        let narrative = build_narrative(&elements, &plot_points)?;
        link_relationships(&elements, &mut relationships);

        Ok(StoryOutline {
            elements,
            relationships,
            outline: forest,
            narrative,
        })
    }
}

/// Narrative view: one lightweight node per plot point, in creation order.
fn build_narrative(
    elements: &[StoryElement],
    plot_points: &[ElementId],
) -> Result<Forest, ModelError> {
    let mut forest = Forest::new();
    let root = forest.add_root(NARRATIVE_NAME, NodeKind::NarrativeView, None);
    for &id in plot_points {
        let name = elements
            .get(id.index())
            .map_or(ElementKind::PlotPoint.placeholder_name(), StoryElement::display_name);
        let node = forest.add_node(name, NodeKind::PlotPoint, Some(id));
        forest.attach(node, root)?;
    }
    forest.add_root(TRASH_NAME, NodeKind::Trash, None);
    Ok(forest)
}

/// Resolve relationship character names to character element ids.
fn link_relationships(elements: &[StoryElement], relationships: &mut [Relationship]) {
    let find = |name: &str| {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        elements
            .iter()
            .position(|element| {
                element.kind() == ElementKind::Character && element.name().trim() == name
            })
            .map(ElementId::new)
    };
    for relationship in relationships {
        relationship.first.element = find(&relationship.first.name);
        relationship.second.element = find(&relationship.second.name);
    }
}
