//! Story elements decoded from an outline.
//!
//! Every element kind owns a fixed set of named text attributes. Attribute
//! names are the lowercase snake-case names used by the legacy record
//! layouts, so decoders can address fields by name without a per-kind
//! setter for every attribute.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Kind of a story element or record family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Overview,
    Problem,
    Character,
    Setting,
    PlotPoint,
    Relationship,
}

impl ElementKind {
    pub const ALL: [Self; 6] = [
        Self::Overview,
        Self::Problem,
        Self::Character,
        Self::Setting,
        Self::PlotPoint,
        Self::Relationship,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Problem => "Problem",
            Self::Character => "Character",
            Self::Setting => "Setting",
            Self::PlotPoint => "Plot Point",
            Self::Relationship => "Relationship",
        }
    }

    /// Display name used for an element of this kind that has no name.
    pub const fn placeholder_name(self) -> &'static str {
        match self {
            Self::Overview => "Story Overview",
            Self::Problem => "New Problem",
            Self::Character => "New Character",
            Self::Setting => "New Setting",
            Self::PlotPoint => "New Plot Point",
            Self::Relationship => "New Relationship",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Generates name-based attribute access for an element struct.
macro_rules! element_attributes {
    ($ty:ty, $kind:expr, { $($name:literal => $field:ident),+ $(,)? }) => {
        impl $ty {
            pub const KIND: ElementKind = $kind;

            /// Attribute names accepted by [`Self::attribute_mut`].
            pub const ATTRIBUTES: &'static [&'static str] = &[$($name),+];

            pub fn attribute(&self, name: &str) -> Option<&str> {
                match name {
                    $($name => Some(self.$field.as_str()),)+
                    _ => None,
                }
            }

            pub fn attribute_mut(&mut self, name: &str) -> Option<&mut String> {
                match name {
                    $($name => Some(&mut self.$field),)+
                    _ => None,
                }
            }
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryOverview {
    pub title: String,
    pub author: String,
    pub date_created: String,
    pub story_type: String,
    pub genre: String,
    pub viewpoint: String,
    pub literary_device: String,
    pub style: String,
    pub tense: String,
    pub tone: String,
    pub notes: String,
}

element_attributes!(StoryOverview, ElementKind::Overview, {
    "title" => title,
    "author" => author,
    "date_created" => date_created,
    "story_type" => story_type,
    "genre" => genre,
    "viewpoint" => viewpoint,
    "literary_device" => literary_device,
    "style" => style,
    "tense" => tense,
    "tone" => tone,
    "notes" => notes,
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub name: String,
    pub problem_type: String,
    pub conflict_type: String,
    pub subject: String,
    pub protagonist: String,
    pub protag_goal: String,
    pub protag_motivation: String,
    pub protag_conflict: String,
    pub antagonist: String,
    pub antag_goal: String,
    pub antag_motivation: String,
    pub antag_conflict: String,
    pub outcome: String,
    pub method: String,
    pub theme: String,
    pub resolution: String,
    pub story_structure: String,
    pub structure_description: String,
    pub climax: String,
    pub premise: String,
    pub story_question: String,
    pub review: String,
}

element_attributes!(Problem, ElementKind::Problem, {
    "name" => name,
    "problem_type" => problem_type,
    "conflict_type" => conflict_type,
    "subject" => subject,
    "protagonist" => protagonist,
    "protag_goal" => protag_goal,
    "protag_motivation" => protag_motivation,
    "protag_conflict" => protag_conflict,
    "antagonist" => antagonist,
    "antag_goal" => antag_goal,
    "antag_motivation" => antag_motivation,
    "antag_conflict" => antag_conflict,
    "outcome" => outcome,
    "method" => method,
    "theme" => theme,
    "resolution" => resolution,
    "story_structure" => story_structure,
    "structure_description" => structure_description,
    "climax" => climax,
    "premise" => premise,
    "story_question" => story_question,
    "review" => review,
});

/// The twelve personality trait attributes of a [`Character`].
pub const PERSONALITY_TRAITS: [&str; 12] = [
    "adventurousness",
    "aggression",
    "confidence",
    "conscientiousness",
    "creativity",
    "dominance",
    "enthusiasm",
    "assurance",
    "sensitivity",
    "shrewdness",
    "sociability",
    "stability",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    // Role
    pub role: String,
    pub story_role: String,
    pub archetype: String,
    pub role_notes: String,
    // Physical
    pub age: String,
    pub sex: String,
    pub eyes: String,
    pub hair: String,
    pub weight: String,
    pub height: String,
    pub build: String,
    pub complexion: String,
    pub race: String,
    pub nationality: String,
    pub health: String,
    pub physical_notes: String,
    // Psychological
    pub enneagram: String,
    pub intelligence: String,
    pub values: String,
    pub abnormality: String,
    pub focus: String,
    pub psych_notes: String,
    // Personality traits
    pub adventurousness: String,
    pub aggression: String,
    pub confidence: String,
    pub conscientiousness: String,
    pub creativity: String,
    pub dominance: String,
    pub enthusiasm: String,
    pub assurance: String,
    pub sensitivity: String,
    pub shrewdness: String,
    pub sociability: String,
    pub stability: String,
    // Social
    pub ethnic: String,
    pub education: String,
    pub religion: String,
    pub politics: String,
    pub economic: String,
    // Outer and inner life
    pub flaw: String,
    pub nickname: String,
    pub motto: String,
    pub work: String,
    pub likes: String,
    pub habits: String,
    pub abilities: String,
    pub backstory: String,
    pub growth: String,
    pub notes: String,
}

element_attributes!(Character, ElementKind::Character, {
    "name" => name,
    "role" => role,
    "story_role" => story_role,
    "archetype" => archetype,
    "role_notes" => role_notes,
    "age" => age,
    "sex" => sex,
    "eyes" => eyes,
    "hair" => hair,
    "weight" => weight,
    "height" => height,
    "build" => build,
    "complexion" => complexion,
    "race" => race,
    "nationality" => nationality,
    "health" => health,
    "physical_notes" => physical_notes,
    "enneagram" => enneagram,
    "intelligence" => intelligence,
    "values" => values,
    "abnormality" => abnormality,
    "focus" => focus,
    "psych_notes" => psych_notes,
    "adventurousness" => adventurousness,
    "aggression" => aggression,
    "confidence" => confidence,
    "conscientiousness" => conscientiousness,
    "creativity" => creativity,
    "dominance" => dominance,
    "enthusiasm" => enthusiasm,
    "assurance" => assurance,
    "sensitivity" => sensitivity,
    "shrewdness" => shrewdness,
    "sociability" => sociability,
    "stability" => stability,
    "ethnic" => ethnic,
    "education" => education,
    "religion" => religion,
    "politics" => politics,
    "economic" => economic,
    "flaw" => flaw,
    "nickname" => nickname,
    "motto" => motto,
    "work" => work,
    "likes" => likes,
    "habits" => habits,
    "abilities" => abilities,
    "backstory" => backstory,
    "growth" => growth,
    "notes" => notes,
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub name: String,
    pub locale: String,
    pub season: String,
    pub period: String,
    pub lighting: String,
    pub weather: String,
    pub temperature: String,
    pub props: String,
    pub sights: String,
    pub sounds: String,
    pub touch: String,
    pub smell_taste: String,
    pub summary: String,
    pub history: String,
    pub tone: String,
    pub notes: String,
}

element_attributes!(Setting, ElementKind::Setting, {
    "name" => name,
    "locale" => locale,
    "season" => season,
    "period" => period,
    "lighting" => lighting,
    "weather" => weather,
    "temperature" => temperature,
    "props" => props,
    "sights" => sights,
    "sounds" => sounds,
    "touch" => touch,
    "smell_taste" => smell_taste,
    "summary" => summary,
    "history" => history,
    "tone" => tone,
    "notes" => notes,
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub name: String,
    pub date: String,
    pub time: String,
    pub viewpoint: String,
    pub setting: String,
    pub protagonist: String,
    pub protag_emotion: String,
    pub protag_goal: String,
    pub antagonist: String,
    pub antag_emotion: String,
    pub antag_goal: String,
    pub opposition: String,
    pub outcome: String,
    pub emotion: String,
    pub new_goal: String,
    pub description: String,
    pub remarks: String,
}

element_attributes!(PlotPoint, ElementKind::PlotPoint, {
    "name" => name,
    "date" => date,
    "time" => time,
    "viewpoint" => viewpoint,
    "setting" => setting,
    "protagonist" => protagonist,
    "protag_emotion" => protag_emotion,
    "protag_goal" => protag_goal,
    "antagonist" => antagonist,
    "antag_emotion" => antag_emotion,
    "antag_goal" => antag_goal,
    "opposition" => opposition,
    "outcome" => outcome,
    "emotion" => emotion,
    "new_goal" => new_goal,
    "description" => description,
    "remarks" => remarks,
});

/// A decoded story element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoryElement {
    Overview(StoryOverview),
    Problem(Problem),
    Character(Character),
    Setting(Setting),
    PlotPoint(PlotPoint),
}

impl StoryElement {
    /// Create an empty element of the given kind.
    ///
    /// Returns `None` for [`ElementKind::Relationship`], which is not part
    /// of the element arena.
    pub fn empty(kind: ElementKind) -> Option<Self> {
        match kind {
            ElementKind::Overview => Some(Self::Overview(StoryOverview::default())),
            ElementKind::Problem => Some(Self::Problem(Problem::default())),
            ElementKind::Character => Some(Self::Character(Character::default())),
            ElementKind::Setting => Some(Self::Setting(Setting::default())),
            ElementKind::PlotPoint => Some(Self::PlotPoint(PlotPoint::default())),
            ElementKind::Relationship => None,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Overview(_) => ElementKind::Overview,
            Self::Problem(_) => ElementKind::Problem,
            Self::Character(_) => ElementKind::Character,
            Self::Setting(_) => ElementKind::Setting,
            Self::PlotPoint(_) => ElementKind::PlotPoint,
        }
    }

    /// The element's name (the story title for the overview).
    pub fn name(&self) -> &str {
        match self {
            Self::Overview(overview) => &overview.title,
            Self::Problem(problem) => &problem.name,
            Self::Character(character) => &character.name,
            Self::Setting(setting) => &setting.name,
            Self::PlotPoint(plot_point) => &plot_point.name,
        }
    }

    /// Name shown in outline trees, falling back to a kind placeholder.
    pub fn display_name(&self) -> &str {
        let name = self.name();
        if name.is_empty() {
            self.kind().placeholder_name()
        } else {
            name
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::Overview(overview) => overview.attribute(name),
            Self::Problem(problem) => problem.attribute(name),
            Self::Character(character) => character.attribute(name),
            Self::Setting(setting) => setting.attribute(name),
            Self::PlotPoint(plot_point) => plot_point.attribute(name),
        }
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut String> {
        match self {
            Self::Overview(overview) => overview.attribute_mut(name),
            Self::Problem(problem) => problem.attribute_mut(name),
            Self::Character(character) => character.attribute_mut(name),
            Self::Setting(setting) => setting.attribute_mut(name),
            Self::PlotPoint(plot_point) => plot_point.attribute_mut(name),
        }
    }

    /// Overwrite a named attribute.
    pub fn set_attribute(&mut self, name: &str, value: String) -> Result<()> {
        let kind = self.kind();
        let slot = self
            .attribute_mut(name)
            .ok_or_else(|| ModelError::unknown_attribute(kind, name))?;
        *slot = value;
        Ok(())
    }

    /// Append text to a named attribute, separating from existing text
    /// with a newline.
    pub fn append_attribute(&mut self, name: &str, text: &str) -> Result<()> {
        let kind = self.kind();
        let slot = self
            .attribute_mut(name)
            .ok_or_else(|| ModelError::unknown_attribute(kind, name))?;
        append_text(slot, text);
        Ok(())
    }

    /// Attribute names accepted by this element's kind.
    pub fn attribute_names(kind: ElementKind) -> &'static [&'static str] {
        match kind {
            ElementKind::Overview => StoryOverview::ATTRIBUTES,
            ElementKind::Problem => Problem::ATTRIBUTES,
            ElementKind::Character => Character::ATTRIBUTES,
            ElementKind::Setting => Setting::ATTRIBUTES,
            ElementKind::PlotPoint => PlotPoint::ATTRIBUTES,
            ElementKind::Relationship => crate::relationship::Relationship::ATTRIBUTES,
        }
    }
}

/// Append `text` to `slot`, inserting a newline when `slot` already holds
/// text. Empty `text` leaves `slot` unchanged.
pub(crate) fn append_text(slot: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !slot.is_empty() {
        slot.push('\n');
    }
    slot.push_str(text);
}
