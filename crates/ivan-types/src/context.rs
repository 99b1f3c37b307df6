// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The table of types declared by one compilation unit.

use std::collections::{BTreeMap, HashMap};

use ivan_ast::{
    FixedIntegerType, FunctionDef, InterfaceDef, InterfaceType, NativeType, OpaqueType,
    PrimaryItem, PrimitiveType, ReferenceType, Span,
};
use tracing::debug;

use crate::error::TypeError;

/// A type declared in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    Opaque { spelling: String },
    Interface,
}

#[derive(Debug, Clone)]
struct Entry {
    declared: DeclaredType,
    span: Span,
}

/// Declared opaque and interface types, keyed by name.
///
/// Built once per compilation unit and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct TypeContext {
    types: HashMap<String, Entry>,
}

impl TypeContext {
    /// Register every opaque type and interface declared in `items`.
    ///
    /// `opaque_spellings` maps opaque type names to the spelling the target
    /// should use instead of the declared name.
    pub fn build(
        items: &[PrimaryItem],
        opaque_spellings: &BTreeMap<String, String>,
    ) -> Result<Self, TypeError> {
        let mut context = TypeContext::default();
        for item in items {
            let declared = match item {
                PrimaryItem::OpaqueType(opaque) => DeclaredType::Opaque {
                    spelling: opaque_spellings
                        .get(&opaque.name)
                        .cloned()
                        .unwrap_or_else(|| opaque.name.clone()),
                },
                PrimaryItem::Interface(_) => DeclaredType::Interface,
                PrimaryItem::Function(_) => continue,
            };
            context.declare(item.name(), declared, item.span())?;
        }
        debug!(types = context.types.len(), "built type context");
        Ok(context)
    }

    fn declare(&mut self, name: &str, declared: DeclaredType, span: Span) -> Result<(), TypeError> {
        if is_builtin_name(name) {
            return Err(TypeError::shadows_builtin(name.to_string(), span));
        }
        if let Some(previous) = self.types.get(name) {
            return Err(TypeError::duplicate(name.to_string(), span, previous.span));
        }
        self.types.insert(name.to_string(), Entry { declared, span });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&DeclaredType> {
        self.types.get(name).map(|entry| &entry.declared)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Replace every unresolved name in `ty` with the type it refers to.
    pub fn resolve(&self, ty: &NativeType) -> Result<NativeType, TypeError> {
        match ty {
            NativeType::Primitive(_)
            | NativeType::FixedInteger(_)
            | NativeType::Opaque(_)
            | NativeType::Interface(_) => Ok(ty.clone()),
            NativeType::Reference(reference) => {
                let target = self.resolve(&reference.target)?;
                Ok(NativeType::Reference(ReferenceType {
                    target: Box::new(target),
                    kind: reference.kind,
                    optional: reference.optional,
                }))
            }
            NativeType::Unresolved(unresolved) => match self.get(&unresolved.name) {
                Some(DeclaredType::Opaque { spelling }) => Ok(NativeType::Opaque(OpaqueType {
                    name: unresolved.name.clone(),
                    spelling: spelling.clone(),
                })),
                Some(DeclaredType::Interface) => Ok(NativeType::Interface(InterfaceType {
                    name: unresolved.name.clone(),
                })),
                None => Err(TypeError::unresolved(unresolved.name.clone(), unresolved.usage_span)),
            },
        }
    }

    /// Resolve every type mentioned by `item`, producing a new item.
    pub fn resolve_item(&self, item: &PrimaryItem) -> Result<PrimaryItem, TypeError> {
        Ok(match item {
            PrimaryItem::Function(function) => PrimaryItem::Function(self.resolve_function(function)?),
            PrimaryItem::Interface(interface) => {
                let methods = interface
                    .methods
                    .iter()
                    .map(|method| self.resolve_function(method))
                    .collect::<Result<Vec<_>, _>>()?;
                PrimaryItem::Interface(InterfaceDef {
                    methods,
                    ..interface.clone()
                })
            }
            PrimaryItem::OpaqueType(_) => item.clone(),
        })
    }

    pub fn resolve_all(&self, items: &[PrimaryItem]) -> Result<Vec<PrimaryItem>, TypeError> {
        items.iter().map(|item| self.resolve_item(item)).collect()
    }

    fn resolve_function(&self, function: &FunctionDef) -> Result<FunctionDef, TypeError> {
        let mut resolved = function.clone();
        for arg in &mut resolved.args {
            arg.ty = self.resolve(&arg.ty)?;
        }
        resolved.return_type = self.resolve(&resolved.return_type)?;
        Ok(resolved)
    }
}

/// Names the parser always reads as builtin types.
fn is_builtin_name(name: &str) -> bool {
    if PrimitiveType::from_name(name).is_some() {
        return true;
    }
    match name.strip_prefix('i').or_else(|| name.strip_prefix('u')) {
        Some(width) => FixedIntegerType::VALID_BITS
            .iter()
            .any(|bits| bits.to_string() == width),
        None => false,
    }
}
