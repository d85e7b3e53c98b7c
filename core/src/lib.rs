//! constclass Core Types
//!
//! This crate provides the foundational types shared by the validator and its host:
//! - Identity types (TypeId, KindId)
//! - Member values (the Value enum carried by constant and settable attributes)

mod id;
mod value;

pub use id::*;
pub use value::*;
