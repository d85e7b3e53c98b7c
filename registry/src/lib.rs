//! constclass Registry
//!
//! Declares "constant classes": types whose class-level attributes are
//! immutable, hierarchy-checked constants. Every declaration runs through the
//! type validator, which rejects redefinitions, collisions across bases and
//! indefinite attributes; every later write runs through the assignment hook.
//! Types can never be instantiated.

mod builder;
mod error;
mod kind;
mod policy;
mod registry;
mod types;
mod validator;

pub use builder::{KindBuilder, TypeBuilder};
pub use error::{ConstantError, ConstantResult};
pub use kind::{KindDef, KindTable, DEFAULT_KIND};
pub use policy::{
    classify, constant_set, is_magic_attr, Classification, ConstantPolicy, DefaultPolicy,
    PatternPolicy, PredicatePolicy, UppercasePolicy,
};
pub use registry::{ConstantRegistry, ROOT_TYPE};
pub use types::ConstantType;
pub use validator::{Declaration, TypeValidator};
