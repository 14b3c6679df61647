//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - Unified application error (`AppError`) and its HTTP classification
//! - Typed identifiers backed by UUIDs
//!
//! Only things whose meaning is stable across domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
