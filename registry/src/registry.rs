//! The ConstantRegistry - owner of every declared constant type.

use constclass_core::{KindId, TypeId, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::convert::Infallible;

use crate::builder::{KindBuilder, TypeBuilder};
use crate::error::{ConstantError, ConstantResult};
use crate::kind::{KindDef, KindTable};
use crate::policy::{self, is_magic_attr, Classification};
use crate::types::ConstantType;
use crate::validator::TypeValidator;

/// Name of the root type every registry starts with.
pub const ROOT_TYPE: &str = "Constant";

/// Hosts constant types: runs the construction hook on every declaration and
/// the assignment hook on every attribute write.
#[derive(Debug)]
pub struct ConstantRegistry {
    /// Validator kinds.
    kinds: KindTable,
    /// Type definitions by ID.
    types: HashMap<TypeId, ConstantType>,
    /// Type ID lookup by name.
    type_names: HashMap<String, TypeId>,
    /// Next type ID to allocate.
    next_type_id: u32,
}

impl Default for ConstantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstantRegistry {
    /// Create a registry holding the `default` kind and the empty root type.
    pub fn new() -> Self {
        let mut registry = Self {
            kinds: KindTable::new(),
            types: HashMap::new(),
            type_names: HashMap::new(),
            next_type_id: 0,
        };

        let id = registry.peek_type_id();
        registry.insert_type(ConstantType {
            id,
            name: ROOT_TYPE.to_string(),
            bases: Vec::new(),
            members: Default::default(),
            kind: KindId::DEFAULT,
            mro: vec![id],
        });
        registry
    }

    /// Start declaring a validator kind.
    pub fn add_kind(&mut self, name: impl Into<String>) -> KindBuilder<'_> {
        KindBuilder::new(self, name.into())
    }

    /// Start declaring a constant type.
    pub fn define(&mut self, name: impl Into<String>) -> TypeBuilder<'_> {
        TypeBuilder::new(self, name.into())
    }

    pub(crate) fn kinds(&self) -> &KindTable {
        &self.kinds
    }

    pub(crate) fn kinds_mut(&mut self) -> &mut KindTable {
        &mut self.kinds
    }

    pub(crate) fn types(&self) -> &HashMap<TypeId, ConstantType> {
        &self.types
    }

    pub(crate) fn peek_type_id(&self) -> TypeId {
        TypeId::new(self.next_type_id)
    }

    pub(crate) fn insert_type(&mut self, ty: ConstantType) -> TypeId {
        let id = ty.id;
        self.next_type_id = self.next_type_id.max(id.raw() + 1);
        self.type_names.insert(ty.name.clone(), id);
        self.types.insert(id, ty);
        id
    }

    // ==================== Kind Lookups ====================

    pub fn get_kind(&self, id: KindId) -> Option<&KindDef> {
        self.kinds.get(id)
    }

    pub fn get_kind_by_name(&self, name: &str) -> Option<&KindDef> {
        self.kinds.get_by_name(name)
    }

    pub fn kind_count(&self) -> usize {
        self.kinds.len()
    }

    // ==================== Type Lookups ====================

    /// The root `Constant` type.
    pub fn root(&self) -> TypeId {
        TypeId::new(0)
    }

    /// Get a type definition by name.
    pub fn get_type_by_name(&self, name: &str) -> Option<&ConstantType> {
        self.type_names.get(name).and_then(|id| self.types.get(id))
    }

    /// Get a type definition by ID.
    pub fn get_type(&self, id: TypeId) -> Option<&ConstantType> {
        self.types.get(&id)
    }

    /// Get a type ID by name.
    pub fn get_type_id(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    /// Get the number of types, the root included.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    fn require(&self, id: TypeId) -> ConstantResult<&ConstantType> {
        self.types.get(&id).ok_or(ConstantError::UnknownType(id))
    }

    /// Whether `sub` is `sup` or inherits from it.
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        self.types
            .get(&sub)
            .map(|ty| ty.mro.contains(&sup))
            .unwrap_or(false)
    }

    // ==================== Attribute Access ====================

    /// Resolve an attribute through the type's lookup order.
    pub fn get_attr(&self, type_id: TypeId, name: &str) -> Option<&Value> {
        let ty = self.types.get(&type_id)?;
        ty.mro
            .iter()
            .filter_map(|id| self.types.get(id))
            .find_map(|t| t.get_member(name))
    }

    /// Every visible attribute with the value lookup resolves to.
    pub fn attrs(&self, type_id: TypeId) -> BTreeMap<&str, &Value> {
        let mut attrs = BTreeMap::new();
        let Some(ty) = self.types.get(&type_id) else {
            return attrs;
        };
        for t in ty.mro.iter().filter_map(|id| self.types.get(id)) {
            for (name, value) in &t.members {
                attrs.entry(name.as_str()).or_insert(value);
            }
        }
        attrs
    }

    /// Names of every visible attribute.
    pub fn attr_names(&self, type_id: TypeId) -> BTreeSet<&str> {
        self.attrs(type_id).into_keys().collect()
    }

    /// Visible attributes the governing policy treats as constants.
    pub fn constant_names(&self, type_id: TypeId) -> BTreeSet<&str> {
        let Some(policy) = self
            .types
            .get(&type_id)
            .and_then(|ty| self.kinds.get(ty.kind))
            .map(KindDef::policy)
        else {
            return BTreeSet::new();
        };

        self.attr_names(type_id)
            .into_iter()
            .filter(|name| !is_magic_attr(name))
            .filter(|name| policy::classify(policy, name) == Classification::Constant)
            .collect()
    }

    /// Classify a name under the policy governing `type_id`.
    pub fn classify(&self, type_id: TypeId, name: &str) -> ConstantResult<Classification> {
        let ty = self.require(type_id)?;
        let kind = self.kinds.require(ty.kind)?;
        Ok(policy::classify(kind.policy(), name))
    }

    /// Write an attribute after construction, if the governing policy allows it.
    pub fn set_attr(
        &mut self,
        type_id: TypeId,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> ConstantResult<()> {
        let name = name.into();
        let value = value.into();

        let ty = self.require(type_id)?;
        TypeValidator::new(&self.kinds, &self.types).validate_assignment(ty, &name, &value)?;

        if let Some(ty) = self.types.get_mut(&type_id) {
            ty.members.insert(name, value);
        }
        Ok(())
    }

    /// Attempt to instantiate a type. Always fails for a known type.
    pub fn instantiate(&self, type_id: TypeId) -> ConstantResult<Infallible> {
        self.require(type_id)?.instantiate()
    }
}
