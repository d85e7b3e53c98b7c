//! Constant type definitions.

use constclass_core::{KindId, Members, TypeId, Value};
use std::convert::Infallible;

use crate::error::{ConstantError, ConstantResult};

/// A declared constant type.
///
/// Types held by a [`ConstantRegistry`](crate::ConstantRegistry) come out of
/// the construction hook; a value built by hand has not been validated. A
/// type describes values but never produces instances:
/// [`ConstantType::instantiate`] always fails.
#[derive(Debug, Clone)]
pub struct ConstantType {
    /// Unique identifier.
    pub id: TypeId,
    /// Type name.
    pub name: String,
    /// Direct bases, in declaration order.
    pub bases: Vec<TypeId>,
    /// Members declared on this type (not inherited ones).
    pub members: Members,
    /// Validator kind governing this type.
    pub kind: KindId,
    /// Attribute lookup order, starting with this type.
    pub mro: Vec<TypeId>,
}

impl ConstantType {
    /// Get an attribute declared directly on this type.
    pub fn get_member(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }

    /// Check if this type declares an attribute itself.
    pub fn has_member(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Get all names declared directly on this type.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(|s| s.as_str())
    }

    /// Stand-in initializer of every constant type: always rejects.
    pub fn instantiate(&self) -> ConstantResult<Infallible> {
        Err(ConstantError::instantiation_forbidden(&self.name))
    }
}
