// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! CLI command implementations.

pub mod generate;
pub mod phase;
pub mod tools;
