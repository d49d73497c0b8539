//! Scheme-up Error
//!
//! This crate defines the closed error taxonomy shared by every scheme-up
//! component, plus the single conversion boundary that turns whatever a
//! validation or transformation callback raised into a [`FlowError`].
//!
//! Callbacks fail with a [`Raised`] value. Catch sites never inspect it
//! themselves; they hand it to [`FlowError::normalize`], which applies the
//! normalization rules in one place:
//!
//! - an already normalized [`FlowError`] passes through unchanged
//! - an error-like value tagged with a known code keeps that kind and payload
//! - any other error-like value becomes [`ErrorKind::Unknown`] carrying its message
//! - any other raised value becomes [`ErrorKind::Unknown`] carrying the value itself

mod error;
mod kind;
mod raised;

pub use error::FlowError;
pub use kind::ErrorKind;
pub use raised::Raised;
