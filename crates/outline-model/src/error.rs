use thiserror::Error;

use crate::element::ElementKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{kind} has no attribute named '{attribute}'")]
    UnknownAttribute {
        kind: ElementKind,
        attribute: String,
    },
    #[error("node {0} does not exist in this forest")]
    UnknownNode(usize),
}

impl ModelError {
    pub fn unknown_attribute(kind: ElementKind, attribute: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            kind,
            attribute: attribute.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
