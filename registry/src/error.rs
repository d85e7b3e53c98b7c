//! Validation error types.

use constclass_core::TypeId;
use thiserror::Error;

/// Result type for registry and validator operations.
pub type ConstantResult<T> = Result<T, ConstantError>;

/// Errors raised while declaring constant types or writing their attributes.
#[derive(Debug, Error)]
pub enum ConstantError {
    #[error("Can't inherit from [{first}] and [{other}] together: unrelated validator kinds")]
    IncompatibleHierarchy { first: String, other: String },

    #[error("Constant [{}] conflicts when inheriting from [{base}]", .names.join(", "))]
    AttributeCollision { names: Vec<String>, base: String },

    #[error("Can't redefine constant [{}] in [{type_name}]", .names.join(", "))]
    Redefinition { type_name: String, names: Vec<String> },

    #[error("Attribute [{}] of [{type_name}] is neither constant nor settable", .names.join(", "))]
    IndefiniteAttribute { type_name: String, names: Vec<String> },

    #[error("Can't make an instance of constant type [{type_name}]")]
    InstantiationForbidden { type_name: String },

    #[error("Can't set attribute [{attr}] of constant type [{type_name}]")]
    AssignmentForbidden { type_name: String, attr: String },

    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Unknown base type: {0}")]
    UnknownBase(String),

    #[error("Duplicate base type [{base}] in [{type_name}]")]
    DuplicateBase { type_name: String, base: String },

    #[error("Cannot linearize the bases of [{type_name}] consistently")]
    InconsistentHierarchy { type_name: String },

    #[error("Unknown type: {0}")]
    UnknownType(TypeId),

    #[error("Duplicate validator kind name: {0}")]
    DuplicateKindName(String),

    #[error("Unknown validator kind: {0}")]
    UnknownKind(String),

    #[error("Invalid attribute pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl ConstantError {
    pub fn incompatible_hierarchy(first: impl Into<String>, other: impl Into<String>) -> Self {
        Self::IncompatibleHierarchy {
            first: first.into(),
            other: other.into(),
        }
    }

    pub fn collision<I, S>(names: I, base: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AttributeCollision {
            names: names.into_iter().map(Into::into).collect(),
            base: base.into(),
        }
    }

    pub fn redefinition<I, S>(type_name: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Redefinition {
            type_name: type_name.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn indefinite<I, S>(type_name: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::IndefiniteAttribute {
            type_name: type_name.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn instantiation_forbidden(type_name: impl Into<String>) -> Self {
        Self::InstantiationForbidden {
            type_name: type_name.into(),
        }
    }

    pub fn assignment_forbidden(type_name: impl Into<String>, attr: impl Into<String>) -> Self {
        Self::AssignmentForbidden {
            type_name: type_name.into(),
            attr: attr.into(),
        }
    }

    pub fn duplicate_base(type_name: impl Into<String>, base: impl Into<String>) -> Self {
        Self::DuplicateBase {
            type_name: type_name.into(),
            base: base.into(),
        }
    }

    pub fn inconsistent_hierarchy(type_name: impl Into<String>) -> Self {
        Self::InconsistentHierarchy {
            type_name: type_name.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Attribute names carried by this error, if any.
    pub fn attribute_names(&self) -> &[String] {
        match self {
            Self::AttributeCollision { names, .. }
            | Self::Redefinition { names, .. }
            | Self::IndefiniteAttribute { names, .. } => names,
            Self::AssignmentForbidden { attr, .. } => std::slice::from_ref(attr),
            _ => &[],
        }
    }
}
