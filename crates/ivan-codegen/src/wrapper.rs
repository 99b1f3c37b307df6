// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Selecting the forwarding functions to generate for interfaces.

use heck::ToSnakeCase;
use ivan_ast::{FunctionDef, InterfaceDef, PrimaryItem};
use ivan_types::{default_value, spell, Target};

use crate::config::{GenerateConfig, OnMissing, WrapperConfig};
use crate::error::GenerateError;

/// Name of the receiver argument every wrapper takes first.
pub const RECEIVER: &str = "vtable";

/// One free function that calls through an interface member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperFn<'a> {
    /// `{prefix}_{method}`
    pub name: String,
    pub interface: &'a InterfaceDef,
    pub method: &'a FunctionDef,
    pub by_value: bool,
    pub on_missing: OnMissing,
}

impl WrapperFn<'_> {
    /// True if the body must check the member for null before calling it.
    pub fn checks_null(&self) -> bool {
        self.method.optional
    }

    /// True if the body aborts when the member is null.
    pub fn asserts(&self) -> bool {
        self.method.optional && self.on_missing == OnMissing::Abort
    }
}

/// Work out every wrapper requested by `config` for the (resolved) `items`.
///
/// Interfaces come in name order, methods in declaration order.
pub fn plan<'a>(items: &'a [PrimaryItem], config: &GenerateConfig) -> Result<Vec<WrapperFn<'a>>, GenerateError> {
    let mut wrappers = Vec::new();
    for (name, wrapper_config) in &config.interface_wrappers {
        let interface = items
            .iter()
            .find_map(|item| match item {
                PrimaryItem::Interface(interface) if interface.name == *name => Some(interface),
                _ => None,
            })
            .ok_or_else(|| GenerateError::UnknownWrapperInterface {
                interface: name.clone(),
            })?;
        plan_interface(interface, wrapper_config, config.target(), &mut wrappers)?;
    }
    Ok(wrappers)
}

fn plan_interface<'a>(
    interface: &'a InterfaceDef,
    config: &WrapperConfig,
    target: Target,
    wrappers: &mut Vec<WrapperFn<'a>>,
) -> Result<(), GenerateError> {
    let listed = config.allow.iter().flatten().chain(&config.deny);
    for method in listed {
        if interface.method(method).is_none() {
            return Err(GenerateError::UnknownWrapperMethod {
                interface: interface.name.clone(),
                method: method.clone(),
            });
        }
    }

    let prefix = config
        .name_prefix
        .clone()
        .unwrap_or_else(|| interface.name.to_snake_case());

    let selected = interface.methods.iter().filter(|method| {
        let allowed = config.allow.as_ref().map_or(true, |allow| allow.contains(&method.name));
        allowed && !config.deny.contains(&method.name)
    });
    for method in selected {
        if method.args.iter().any(|arg| arg.name == RECEIVER) {
            return Err(GenerateError::WrapperArgConflict {
                interface: interface.name.clone(),
                method: method.name.clone(),
                span: method.span,
            });
        }
        if method.optional
            && config.on_missing == OnMissing::ReturnDefault
            && default_value(&method.return_type, target).is_none()
        {
            return Err(GenerateError::NoDefaultValue {
                interface: interface.name.clone(),
                method: method.name.clone(),
                ty: spell(&method.return_type, target),
                target,
                span: method.span,
            });
        }
        wrappers.push(WrapperFn {
            name: format!("{}_{}", prefix, method.name),
            interface,
            method,
            by_value: config.by_value,
            on_missing: config.on_missing,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetLanguage;
    use ivan_ast::Span;
    use ivan_types::TypeContext;
    use std::collections::BTreeMap;

    const SOURCE: &str = "opaque type Example;\n\
        interface Basic {\n    fun noArgs(): i64;\n    fun oneArg(a: int);\n    opt fun maybe(): &Example;\n}\n\
        interface PyShape { fun view(obj: &Example); }\n\
        interface Clash { fun call(vtable: int); }";

    fn resolved() -> Vec<PrimaryItem> {
        let items = ivan_parser::parse_source(SOURCE).unwrap();
        let context = TypeContext::build(&items, &BTreeMap::new()).unwrap();
        context.resolve_all(&items).unwrap()
    }

    fn names(wrappers: &[WrapperFn<'_>]) -> Vec<String> {
        wrappers.iter().map(|w| w.name.clone()).collect()
    }

    #[test]
    fn wraps_every_method_by_default() {
        let items = resolved();
        let config = GenerateConfig::new("m", TargetLanguage::C).with_wrappers("Basic", WrapperConfig::default());
        let wrappers = plan(&items, &config).unwrap();
        assert_eq!(names(&wrappers), vec!["basic_noArgs", "basic_oneArg", "basic_maybe"]);
        assert!(!wrappers[0].checks_null());
        assert!(wrappers[2].asserts());
    }

    #[test]
    fn prefix_defaults_to_snake_case() {
        let items = resolved();
        let config = GenerateConfig::new("m", TargetLanguage::C).with_wrappers("PyShape", WrapperConfig::default());
        assert_eq!(names(&plan(&items, &config).unwrap()), vec!["py_shape_view"]);

        let config = GenerateConfig::new("m", TargetLanguage::C).with_wrappers(
            "PyShape",
            WrapperConfig {
                name_prefix: Some("object".to_string()),
                ..WrapperConfig::default()
            },
        );
        assert_eq!(names(&plan(&items, &config).unwrap()), vec!["object_view"]);
    }

    #[test]
    fn allow_then_deny() {
        let items = resolved();
        let config = GenerateConfig::new("m", TargetLanguage::C).with_wrappers(
            "Basic",
            WrapperConfig {
                allow: Some(vec!["maybe".to_string(), "noArgs".to_string()]),
                deny: vec!["maybe".to_string()],
                ..WrapperConfig::default()
            },
        );
        assert_eq!(names(&plan(&items, &config).unwrap()), vec!["basic_noArgs"]);
    }

    #[test]
    fn interfaces_in_name_order() {
        let items = resolved();
        let config = GenerateConfig::new("m", TargetLanguage::C)
            .with_wrappers("PyShape", WrapperConfig::default())
            .with_wrappers(
                "Basic",
                WrapperConfig {
                    allow: Some(vec!["oneArg".to_string()]),
                    ..WrapperConfig::default()
                },
            );
        assert_eq!(names(&plan(&items, &config).unwrap()), vec!["basic_oneArg", "py_shape_view"]);
    }

    #[test]
    fn unknown_interface() {
        let items = resolved();
        let config = GenerateConfig::new("m", TargetLanguage::C).with_wrappers("Example", WrapperConfig::default());
        assert_eq!(
            plan(&items, &config).unwrap_err(),
            GenerateError::UnknownWrapperInterface { interface: "Example".to_string() }
        );
    }

    #[test]
    fn unknown_method() {
        let items = resolved();
        let config = GenerateConfig::new("m", TargetLanguage::C).with_wrappers(
            "Basic",
            WrapperConfig {
                deny: vec!["missing".to_string()],
                ..WrapperConfig::default()
            },
        );
        assert_eq!(
            plan(&items, &config).unwrap_err(),
            GenerateError::UnknownWrapperMethod {
                interface: "Basic".to_string(),
                method: "missing".to_string(),
            }
        );
    }

    #[test]
    fn receiver_name_clash() {
        let items = resolved();
        let config = GenerateConfig::new("m", TargetLanguage::C).with_wrappers("Clash", WrapperConfig::default());
        let err = plan(&items, &config).unwrap_err();
        assert!(matches!(err, GenerateError::WrapperArgConflict { ref method, .. } if method == "call"));
        assert_eq!(err.span(), Some(Span::new(8, 22)));
    }

    #[test]
    fn default_value_must_exist_for_target() {
        let items = resolved();
        let wrappers = WrapperConfig {
            on_missing: OnMissing::ReturnDefault,
            ..WrapperConfig::default()
        };

        let config = GenerateConfig::new("m", TargetLanguage::C).with_wrappers("Basic", wrappers.clone());
        assert!(plan(&items, &config).is_ok());

        let config = GenerateConfig::new("m", TargetLanguage::Rust).with_wrappers("Basic", wrappers);
        let err = plan(&items, &config).unwrap_err();
        assert_eq!(
            err,
            GenerateError::NoDefaultValue {
                interface: "Basic".to_string(),
                method: "maybe".to_string(),
                ty: "&Example".to_string(),
                target: Target::Rust,
                span: Span::new(5, 12),
            }
        );
    }
}
