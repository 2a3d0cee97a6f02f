//! Setter names under the configured accessor naming policy.

use fxgen_config::AccessorsConfig;
use fxgen_hir::FieldDecl;

pub struct NameResolver<'a> {
    accessors: &'a AccessorsConfig,
}

impl<'a> NameResolver<'a> {
    pub fn new(accessors: &'a AccessorsConfig) -> Self {
        Self { accessors }
    }

    /// The field name with its configured prefix removed, or `None` when the
    /// name fits none of the prefixes.
    pub fn base_name(&self, field_name: &str) -> Option<String> {
        remove_prefix(field_name, &self.accessors.prefix)
    }

    /// The name the setter for `field` is generated under.
    pub fn setter_name(&self, field: &FieldDecl) -> Option<String> {
        let base = self.base_name(&field.name)?;
        if self.accessors.fluent {
            return Some(base);
        }
        if field.ty.is_primitive_boolean() {
            if let Some(rest) = strip_is_prefix(&base) {
                return Some(format!("set{rest}"));
            }
        }
        Some(format!("set{}", capitalize(&base)))
    }

    /// Every name a pre-existing method could use for this setter, canonical
    /// name first.
    pub fn all_setter_names(&self, field: &FieldDecl) -> Vec<String> {
        let Some(canonical) = self.setter_name(field) else {
            return Vec::new();
        };
        let mut names = vec![canonical];
        if !field.ty.is_primitive_boolean() {
            return names;
        }

        let Some(base) = self.base_name(&field.name) else {
            return names;
        };
        let mut bases = vec![base.clone()];
        if let Some(rest) = strip_is_prefix(&base) {
            bases.push(if self.accessors.fluent {
                decapitalize(rest)
            } else {
                rest.to_string()
            });
        }

        for base in bases {
            let name = if self.accessors.fluent {
                base
            } else {
                format!("set{}", capitalize(&base))
            };
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// `isActive` -> `Active`; `island` and `is` are left alone.
fn strip_is_prefix(name: &str) -> Option<&str> {
    let rest = name.strip_prefix("is")?;
    let next = rest.chars().next()?;
    (!next.is_lowercase()).then_some(rest)
}

fn remove_prefix(field_name: &str, prefixes: &[String]) -> Option<String> {
    if prefixes.is_empty() {
        return Some(field_name.to_string());
    }

    for prefix in prefixes {
        if prefix.is_empty() {
            return Some(field_name.to_string());
        }
        let Some(rest) = field_name.strip_prefix(prefix.as_str()) else {
            continue;
        };
        let Some(followup) = rest.chars().next() else {
            continue;
        };
        // `m` matches `mName` but not `main`.
        let ends_in_letter = prefix.chars().last().is_some_and(char::is_alphabetic);
        if ends_in_letter && followup.is_lowercase() {
            continue;
        }
        return Some(decapitalize(rest));
    }
    None
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}
