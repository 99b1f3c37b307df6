// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type resolution and per-target type spelling for Ivan.
//!
//! The parser leaves every user type name as `Unresolved`. A [`TypeContext`]
//! built from the declarations of one compilation unit replaces those with
//! opaque or interface types, after which [`spell`] can render them.

mod context;
mod error;
mod render;

pub use context::{DeclaredType, TypeContext};
pub use error::{TypeError, TypeErrorKind};
pub use render::{default_value, spell, Target};
