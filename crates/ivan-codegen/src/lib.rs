// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Code generation for Ivan: C headers and Rust FFI modules.
//!
//! [`generate`] resolves the items against a [`ivan_types::TypeContext`],
//! plans interface wrappers from the [`GenerateConfig`] and drives the
//! [`Generator`] picked for the target language.

mod c;
mod config;
mod error;
mod generator;
mod names;
mod rust;
mod wrapper;
pub mod writer;

pub use c::{include_guard, CGenerator};
pub use config::{GenerateConfig, OnMissing, TargetLanguage, WrapperConfig};
pub use error::GenerateError;
pub use generator::{generate, generator_for, Generator};
pub use rust::RustGenerator;
pub use wrapper::{plan as plan_wrappers, WrapperFn};
pub use writer::CodeWriter;
