//! The type validator: construction and assignment hooks.
//!
//! Construction checks, in order:
//! - direct bases are governed by related validator kinds
//! - constant names declared by direct bases are pairwise disjoint
//! - no new member re-declares an inherited constant
//! - every non-magic member is either constant or settable
//!
//! Validation is atomic: either a complete `ConstantType` is returned or
//! nothing is produced.

use constclass_core::{KindId, Members, TypeId, Value};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::error::{ConstantError, ConstantResult};
use crate::kind::KindTable;
use crate::policy::{constant_set, ConstantPolicy};
use crate::types::ConstantType;

/// A type declaration waiting to be validated.
#[derive(Debug)]
pub struct Declaration {
    pub id: TypeId,
    pub name: String,
    /// Kind requested at the declaration site, if any.
    pub kind: Option<KindId>,
    pub bases: Vec<TypeId>,
    pub members: Members,
}

/// Validator over the kinds and types already known to a registry.
pub struct TypeValidator<'a> {
    kinds: &'a KindTable,
    types: &'a HashMap<TypeId, ConstantType>,
}

impl<'a> TypeValidator<'a> {
    pub fn new(kinds: &'a KindTable, types: &'a HashMap<TypeId, ConstantType>) -> Self {
        Self { kinds, types }
    }

    /// Validate a declaration and assemble the resulting type.
    pub fn validate_construction(&self, decl: Declaration) -> ConstantResult<ConstantType> {
        let type_name = decl.name.clone();
        self.construct(decl).map_err(|err| {
            debug!(type_name = %type_name, error = %err, "rejected declaration");
            err
        })
    }

    /// Check that `name` may be written on `ty`.
    pub fn validate_assignment(
        &self,
        ty: &ConstantType,
        name: &str,
        value: &Value,
    ) -> ConstantResult<()> {
        let policy = self.kinds.require(ty.kind)?.policy();
        if policy.is_constant_attr(name) || !policy.is_settable_attr(name) {
            debug!(type_name = %ty.name, attr = name, "rejected assignment");
            return Err(ConstantError::assignment_forbidden(&ty.name, name));
        }
        debug!(type_name = %ty.name, attr = name, %value, "accepted assignment");
        Ok(())
    }

    fn construct(&self, decl: Declaration) -> ConstantResult<ConstantType> {
        let bases = self.resolve_bases(&decl)?;

        // Validator kinds of the bases must form a chain.
        if let Some((first, rest)) = bases.split_first() {
            for other in rest {
                if !self.kinds.is_related(first.kind, other.kind) {
                    return Err(ConstantError::incompatible_hierarchy(
                        &first.name,
                        &other.name,
                    ));
                }
            }
        }
        let kind = self.resolve_kind(&decl, &bases)?;
        let policy = self.kinds.require(kind)?.policy();

        // Constants of direct bases must not collide.
        let mut inherited = BTreeSet::new();
        for base in &bases {
            let base_consts = own_constants(policy, base)?;
            let collisions: Vec<&String> = inherited.intersection(&base_consts).collect();
            if !collisions.is_empty() {
                return Err(ConstantError::collision(collisions, &base.name));
            }
            inherited.extend(base_consts);
        }

        let mro = self.linearize(&decl, &bases)?;

        // Constants declared further up count as inherited too.
        for ancestor_id in mro.iter().skip(1) {
            if decl.bases.contains(ancestor_id) {
                continue;
            }
            let ancestor = self.require(*ancestor_id)?;
            inherited.extend(own_constants(policy, ancestor)?);
        }

        let own = constant_set(policy, &decl.name, decl.members.keys().map(String::as_str))?;
        let rebinds: Vec<&String> = own.intersection(&inherited).collect();
        if !rebinds.is_empty() {
            return Err(ConstantError::redefinition(&decl.name, rebinds));
        }

        debug!(
            type_name = %decl.name,
            kind = %kind,
            constants = own.len(),
            inherited = inherited.len(),
            "accepted declaration"
        );

        Ok(ConstantType {
            id: decl.id,
            name: decl.name,
            bases: decl.bases,
            members: decl.members,
            kind,
            mro,
        })
    }

    fn require(&self, id: TypeId) -> ConstantResult<&'a ConstantType> {
        self.types.get(&id).ok_or(ConstantError::UnknownType(id))
    }

    fn resolve_bases(&self, decl: &Declaration) -> ConstantResult<Vec<&'a ConstantType>> {
        let mut bases = Vec::with_capacity(decl.bases.len());
        for (i, id) in decl.bases.iter().enumerate() {
            let base = self.require(*id)?;
            if decl.bases[..i].contains(id) {
                return Err(ConstantError::duplicate_base(&decl.name, &base.name));
            }
            bases.push(base);
        }
        Ok(bases)
    }

    /// Pick the most derived of the requested kind and the bases' kinds.
    fn resolve_kind(&self, decl: &Declaration, bases: &[&ConstantType]) -> ConstantResult<KindId> {
        // `source` names whoever contributed the current winner: the
        // declared type for a requested kind, otherwise a base.
        let (mut winner, mut source) = match decl.kind {
            Some(kind) => (self.kinds.require(kind)?.id, decl.name.as_str()),
            None => match bases.first() {
                Some(base) => (base.kind, base.name.as_str()),
                None => return Ok(KindId::DEFAULT),
            },
        };

        for base in bases {
            if base.kind == winner {
                continue;
            }
            if self.kinds.extends(base.kind, winner) {
                winner = base.kind;
                source = base.name.as_str();
            } else if !self.kinds.extends(winner, base.kind) {
                return Err(ConstantError::incompatible_hierarchy(source, &base.name));
            }
        }
        Ok(winner)
    }

    /// C3 linearization of the new type over its bases.
    fn linearize(&self, decl: &Declaration, bases: &[&ConstantType]) -> ConstantResult<Vec<TypeId>> {
        let mut sequences: Vec<Vec<TypeId>> = bases.iter().map(|b| b.mro.clone()).collect();
        sequences.push(decl.bases.clone());

        let mut mro = vec![decl.id];
        loop {
            sequences.retain(|seq| !seq.is_empty());
            if sequences.is_empty() {
                return Ok(mro);
            }

            let head = sequences
                .iter()
                .map(|seq| seq[0])
                .find(|candidate| sequences.iter().all(|seq| !seq[1..].contains(candidate)));
            let Some(head) = head else {
                return Err(ConstantError::inconsistent_hierarchy(&decl.name));
            };

            mro.push(head);
            for seq in &mut sequences {
                if seq[0] == head {
                    seq.remove(0);
                }
            }
        }
    }
}

fn own_constants(
    policy: &dyn ConstantPolicy,
    ty: &ConstantType,
) -> ConstantResult<BTreeSet<String>> {
    constant_set(policy, &ty.name, ty.member_names())
}
