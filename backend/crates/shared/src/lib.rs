//! Shared Kernel
//!
//! Vocabulary shared by every crate in the credential service:
//! - The unified error type ([`error::app_error::AppError`]) and its HTTP classification
//! - Typed identifiers ([`id::Id`])
//!
//! Only things that mean the same in every layer belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
