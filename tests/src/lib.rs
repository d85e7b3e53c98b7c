//! Integration test support for constclass.
//!
//! Shared kinds for the standard policies and assertions over rejected
//! declarations and writes.


pub mod prelude {
    pub use crate::assertion::{assert_rejected, Expectation, Rejection};
    pub use crate::fixtures::*;
    pub use constclass_core::{KindId, TypeId, Value};
    pub use constclass_registry::*;
}
