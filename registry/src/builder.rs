//! Builders for declaring validator kinds and constant types.

use constclass_core::{KindId, Members, TypeId, Value};
use std::sync::Arc;
use tracing::debug;

use crate::error::{ConstantError, ConstantResult};
use crate::policy::ConstantPolicy;
use crate::registry::ConstantRegistry;
use crate::validator::{Declaration, TypeValidator};

/// Builder for a validator kind.
pub struct KindBuilder<'a> {
    registry: &'a mut ConstantRegistry,
    name: String,
    parent_name: Option<String>,
    policy: Option<Arc<dyn ConstantPolicy>>,
}

impl<'a> KindBuilder<'a> {
    pub(crate) fn new(registry: &'a mut ConstantRegistry, name: String) -> Self {
        Self {
            registry,
            name,
            parent_name: None,
            policy: None,
        }
    }

    /// Derive from another kind. Kinds derive from `default` otherwise.
    pub fn extends(mut self, parent_name: impl Into<String>) -> Self {
        self.parent_name = Some(parent_name.into());
        self
    }

    /// Override the classification predicates. Without one, the parent's apply.
    pub fn policy(mut self, policy: impl ConstantPolicy + 'static) -> Self {
        self.policy = Some(Arc::new(policy));
        self
    }

    /// Share an existing policy object.
    pub fn shared_policy(mut self, policy: Arc<dyn ConstantPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Finish building this kind.
    pub fn done(self) -> ConstantResult<KindId> {
        let parent = match &self.parent_name {
            Some(name) => self
                .registry
                .get_kind_by_name(name)
                .map(|k| k.id)
                .ok_or_else(|| ConstantError::UnknownKind(name.clone()))?,
            None => KindId::DEFAULT,
        };

        let id = self
            .registry
            .kinds_mut()
            .insert(self.name.clone(), Some(parent), self.policy)?;
        debug!(kind = %self.name, id = %id, parent = %parent, "registered validator kind");
        Ok(id)
    }
}

/// Builder for a constant type declaration.
pub struct TypeBuilder<'a> {
    registry: &'a mut ConstantRegistry,
    name: String,
    kind: Option<KindId>,
    base_names: Vec<String>,
    members: Members,
}

impl<'a> TypeBuilder<'a> {
    pub(crate) fn new(registry: &'a mut ConstantRegistry, name: String) -> Self {
        Self {
            registry,
            name,
            kind: None,
            base_names: Vec::new(),
            members: Members::new(),
        }
    }

    /// Request a validator kind. The most derived kind among this one and
    /// the bases' kinds governs the type.
    pub fn kind(mut self, kind: KindId) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Add a base type by name. Order matters for collision checks and lookup.
    pub fn extends(mut self, base_name: impl Into<String>) -> Self {
        self.base_names.push(base_name.into());
        self
    }

    /// Declare a member with its initial value. A repeated name replaces the
    /// earlier value.
    pub fn member(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.insert(name.into(), value.into());
        self
    }

    /// Validate the declaration and register the type.
    pub fn done(self) -> ConstantResult<TypeId> {
        if self.registry.get_type_id(&self.name).is_some() {
            return Err(ConstantError::DuplicateTypeName(self.name));
        }

        let mut bases = Vec::with_capacity(self.base_names.len());
        for base_name in &self.base_names {
            match self.registry.get_type_id(base_name) {
                Some(id) => bases.push(id),
                None => return Err(ConstantError::UnknownBase(base_name.clone())),
            }
        }

        let decl = Declaration {
            id: self.registry.peek_type_id(),
            name: self.name,
            kind: self.kind,
            bases,
            members: self.members,
        };
        let ty = TypeValidator::new(self.registry.kinds(), self.registry.types())
            .validate_construction(decl)?;
        Ok(self.registry.insert_type(ty))
    }
}
