//! Validator kinds: named classification policies that may extend one another.

use constclass_core::KindId;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ConstantError, ConstantResult};
use crate::policy::{ConstantPolicy, DefaultPolicy};

/// Name of the kind every registry starts with.
pub const DEFAULT_KIND: &str = "default";

/// A validator kind.
#[derive(Debug, Clone)]
pub struct KindDef {
    pub id: KindId,
    pub name: String,
    /// The kind this one was derived from, if any.
    pub parent: Option<KindId>,
    /// Predicates governing every type of this kind.
    pub policy: Arc<dyn ConstantPolicy>,
}

impl KindDef {
    pub fn policy(&self) -> &dyn ConstantPolicy {
        self.policy.as_ref()
    }
}

/// All kinds known to a registry, indexed by id.
#[derive(Debug)]
pub struct KindTable {
    kinds: Vec<KindDef>,
    names: HashMap<String, KindId>,
}

impl Default for KindTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KindTable {
    /// A table holding only the `default` kind.
    pub fn new() -> Self {
        let default = KindDef {
            id: KindId::DEFAULT,
            name: DEFAULT_KIND.to_string(),
            parent: None,
            policy: Arc::new(DefaultPolicy),
        };
        let mut names = HashMap::new();
        names.insert(default.name.clone(), default.id);
        Self {
            kinds: vec![default],
            names,
        }
    }

    /// Register a kind. Without a policy of its own it inherits the parent's.
    pub(crate) fn insert(
        &mut self,
        name: String,
        parent: Option<KindId>,
        policy: Option<Arc<dyn ConstantPolicy>>,
    ) -> ConstantResult<KindId> {
        if self.names.contains_key(&name) {
            return Err(ConstantError::DuplicateKindName(name));
        }

        let inherited = match parent {
            Some(parent) => Some(self.require(parent)?.policy.clone()),
            None => None,
        };
        let policy = policy
            .or(inherited)
            .unwrap_or_else(|| Arc::new(DefaultPolicy) as Arc<dyn ConstantPolicy>);

        let id = KindId::new(self.kinds.len() as u32);
        self.names.insert(name.clone(), id);
        self.kinds.push(KindDef {
            id,
            name,
            parent,
            policy,
        });
        Ok(id)
    }

    pub fn get(&self, id: KindId) -> Option<&KindDef> {
        self.kinds.get(id.raw() as usize)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&KindDef> {
        self.names.get(name).and_then(|id| self.get(*id))
    }

    pub(crate) fn require(&self, id: KindId) -> ConstantResult<&KindDef> {
        self.get(id)
            .ok_or_else(|| ConstantError::UnknownKind(id.to_string()))
    }

    /// Whether `ancestor` is `kind` itself or one of the kinds it extends.
    pub fn extends(&self, kind: KindId, ancestor: KindId) -> bool {
        let mut current = Some(kind);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|k| k.parent);
        }
        false
    }

    /// Whether one kind is an ancestor of the other.
    pub fn is_related(&self, a: KindId, b: KindId) -> bool {
        self.extends(a, b) || self.extends(b, a)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
