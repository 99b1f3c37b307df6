// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The backend-independent driver.

use std::collections::BTreeSet;

use ivan_ast::PrimaryItem;
use ivan_types::{Target, TypeContext};
use tracing::{debug, trace};

use crate::c::CGenerator;
use crate::config::{GenerateConfig, TargetLanguage};
use crate::error::GenerateError;
use crate::names;
use crate::rust::RustGenerator;
use crate::wrapper::{self, WrapperFn};
use crate::writer::CodeWriter;

/// One target language backend.
pub trait Generator {
    fn target(&self) -> Target;

    /// Everything before the first item.
    fn generate_header(&self, w: &mut CodeWriter) -> Result<(), GenerateError>;

    /// A single resolved item.
    fn generate_code(&self, item: &PrimaryItem, w: &mut CodeWriter) -> Result<(), GenerateError>;

    fn generate_wrapper(&self, wrapper: &WrapperFn<'_>, w: &mut CodeWriter) -> Result<(), GenerateError>;

    /// Everything after the wrappers.
    fn generate_footer(&self, w: &mut CodeWriter) -> Result<(), GenerateError>;
}

/// Pick the backend for `config.target_language`.
///
/// `wrappers` is the planned wrapper set, which can affect the header.
pub fn generator_for(
    config: &GenerateConfig,
    wrappers: &[WrapperFn<'_>],
) -> Result<Box<dyn Generator>, GenerateError> {
    validate_module_name(&config.module_name)?;
    Ok(match config.target_language {
        TargetLanguage::C => Box::new(CGenerator::new(config, wrappers)?),
        TargetLanguage::Rust => Box::new(RustGenerator::new(config)?),
    })
}

/// Render `items` into one artifact.
///
/// `context` must have been built from `items`; every type is resolved
/// against it before anything is rendered.
pub fn generate(
    items: &[PrimaryItem],
    context: &TypeContext,
    config: &GenerateConfig,
) -> Result<String, GenerateError> {
    check_opaque_mappings(items, config)?;
    let items = context.resolve_all(items)?;
    names::check(&items, config.target())?;
    let wrappers = wrapper::plan(&items, config)?;
    let generator = generator_for(config, &wrappers)?;
    debug!(
        target_language = %generator.target(),
        items = items.len(),
        wrappers = wrappers.len(),
        "generating module {}",
        config.module_name
    );

    let mut w = CodeWriter::new();
    generator.generate_header(&mut w)?;
    for item in &items {
        // Types defined elsewhere get no declaration of their own
        if matches!(item, PrimaryItem::OpaqueType(o) if config.opaque_types.contains_key(&o.name)) {
            trace!(name = item.name(), "skipping external opaque type");
            continue;
        }
        trace!(name = item.name(), "rendering item");
        generator.generate_code(item, &mut w)?;
        w.blank_line();
    }
    if !wrappers.is_empty() {
        w.writeln("// wrappers");
        w.blank_line();
        for wrapper in &wrappers {
            trace!(name = %wrapper.name, "rendering wrapper");
            generator.generate_wrapper(wrapper, &mut w)?;
            w.blank_line();
        }
    }
    generator.generate_footer(&mut w)?;
    Ok(w.finish())
}

/// Module names are dotted identifiers, optionally with dashes.
fn validate_module_name(name: &str) -> Result<(), GenerateError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if valid {
        Ok(())
    } else {
        Err(GenerateError::InvalidModuleName {
            name: name.to_string(),
        })
    }
}

fn check_opaque_mappings(items: &[PrimaryItem], config: &GenerateConfig) -> Result<(), GenerateError> {
    let declared: BTreeSet<&str> = items
        .iter()
        .filter_map(|item| match item {
            PrimaryItem::OpaqueType(o) => Some(o.name.as_str()),
            _ => None,
        })
        .collect();
    match config.opaque_types.keys().find(|name| !declared.contains(name.as_str())) {
        Some(name) => Err(GenerateError::UnknownOpaqueType { name: name.clone() }),
        None => Ok(()),
    }
}
