//! Detection of methods that already occupy a setter name.

use fxgen_hir::{MethodDecl, TypeDecl, TypeResolver};

/// Annotation that hides a hand-written method from conflict detection.
pub const TOLERATE_ANNOTATION: &str = "lombok.experimental.Tolerate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberExists {
    NotExists,
    /// Left behind by a generator (carries a `GeneratedBy` marker).
    ExistsByTool,
    ExistsByUser,
}

pub struct ConflictScanner<'a> {
    owner: &'a TypeDecl,
    resolver: &'a TypeResolver<'a>,
    pending: Vec<&'a MethodDecl>,
}

impl<'a> ConflictScanner<'a> {
    /// `resolver` decides which annotations on `owner`'s methods are
    /// `@Tolerate`.
    pub fn new(owner: &'a TypeDecl, resolver: &'a TypeResolver<'a>) -> Self {
        Self {
            owner,
            resolver,
            pending: Vec::new(),
        }
    }

    /// Also consider methods generated earlier in the same pass that have not
    /// been injected into `owner` yet.
    pub fn with_pending(mut self, pending: impl IntoIterator<Item = &'a MethodDecl>) -> Self {
        self.pending.extend(pending);
        self
    }

    /// Look for a method called `name` (ignoring case) that accepts
    /// `param_count` arguments.
    pub fn method_exists(&self, name: &str, param_count: usize) -> MemberExists {
        let found = self
            .owner
            .methods
            .iter()
            .chain(self.pending.iter().copied())
            .filter(|method| {
                !self
                    .resolver
                    .has_annotation(TOLERATE_ANNOTATION, &method.annotations)
            })
            .find(|method| method.name.eq_ignore_ascii_case(name) && accepts(method, param_count));

        match found {
            None => MemberExists::NotExists,
            Some(method) if method.is_generated() => MemberExists::ExistsByTool,
            Some(_) => MemberExists::ExistsByUser,
        }
    }
}

fn accepts(method: &MethodDecl, param_count: usize) -> bool {
    let declared = method.params.len();
    if method.is_varargs {
        param_count + 1 >= declared
    } else {
        param_count == declared
    }
}
