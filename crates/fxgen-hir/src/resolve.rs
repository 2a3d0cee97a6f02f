//! Nominal type identity against a compilation unit's imports.
//!
//! No classpath is consulted: a written name denotes a class only when the
//! unit's package, its imports or `java.lang` make that unambiguous.

use fxgen_types::Type;

use crate::{Annotation, CompilationUnit, ImportDecl, TypeDecl};

#[derive(Debug, Clone)]
pub struct TypeResolver<'a> {
    package: Option<&'a str>,
    imports: &'a [ImportDecl],
    shadowing: Vec<&'a str>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(unit: &'a CompilationUnit) -> Self {
        Self {
            package: unit.package.as_deref(),
            imports: &unit.imports,
            shadowing: Vec::new(),
        }
    }

    /// Like [`TypeResolver::new`], but nested types of `owner` (and `owner`
    /// itself) shadow imported names.
    pub fn for_owner(unit: &'a CompilationUnit, owner: &'a TypeDecl) -> Self {
        Self::for_chain(unit, &[owner])
    }

    /// Scope of the innermost type in `chain` (top-level type first): every
    /// enclosing type and every member type along the way shadows imports.
    pub fn for_chain(unit: &'a CompilationUnit, chain: &[&'a TypeDecl]) -> Self {
        let mut resolver = Self::new(unit);
        for ty in chain {
            resolver.shadowing.push(ty.name.as_str());
            resolver
                .shadowing
                .extend(ty.nested_types.iter().map(|nested| nested.name.as_str()));
        }
        resolver
    }

    /// Does `written` (a simple or qualified name) denote the class `fqcn`?
    pub fn name_matches(&self, fqcn: &str, written: &str) -> bool {
        if written.contains('.') {
            return written == fqcn;
        }

        let (package, simple) = match fqcn.rsplit_once('.') {
            Some((package, simple)) => (package, simple),
            None => ("", fqcn),
        };
        if written != simple {
            return false;
        }
        if self.shadowing.iter().any(|name| *name == written) {
            return false;
        }

        // A single-type import of the same simple name always wins.
        for import in self.imports {
            if let ImportDecl::TypeSingle { ty } = import {
                if ty.rsplit('.').next() == Some(written) {
                    return ty == fqcn;
                }
            }
        }

        if package == "java.lang" || self.package.unwrap_or("") == package {
            return true;
        }

        self.imports.iter().any(|import| {
            matches!(import, ImportDecl::TypeStar { package: star } if star == package)
        })
    }

    /// Is `annotation` an application of the annotation type `fqcn`?
    pub fn annotation_matches(&self, fqcn: &str, annotation: &Annotation) -> bool {
        self.name_matches(fqcn, &annotation.name)
    }

    pub fn has_annotation(&self, fqcn: &str, annotations: &[Annotation]) -> bool {
        annotations
            .iter()
            .any(|annotation| self.annotation_matches(fqcn, annotation))
    }

    /// Like [`TypeResolver::name_matches`] for a declared type; only plain
    /// named types can match.
    pub fn type_matches(&self, fqcn: &str, ty: &Type) -> bool {
        match ty {
            Type::Named(written) => self.name_matches(fqcn, written),
            _ => false,
        }
    }
}
