//! The `@FXSetter` handler: runs every targeted field through naming,
//! conflict detection, type unwrapping and method synthesis.
//!
//! Generation never mutates the tree. [`FieldSetterGenerator::generate`]
//! returns a [`GenerationReport`] holding the synthesized methods and the
//! diagnostics; [`GenerationReport::apply`] appends the methods to the owning
//! type in one batch.

use fxgen_config::{FlagUsage, FxConfig};
use fxgen_hir::{
    Annotation, CompilationUnit, FieldDecl, GeneratedBy, MethodDecl, TypeDecl, TypeResolver,
    Visibility,
};
use fxgen_types::{Diagnostic, Span};
use serde::{Deserialize, Serialize};

use crate::access::AccessLevel;
use crate::conflict::{ConflictScanner, MemberExists};
use crate::diagnostics::{
    FXSETTER_FLAGGED, FXSETTER_METHOD_EXISTS, FXSETTER_NOT_SUPPORTED, FXSETTER_PREFIX_MISMATCH,
    FXSETTER_UNSUPPORTED_AT_TYPE, FXSETTER_UNSUPPORTED_PLACEMENT,
};
use crate::naming::NameResolver;
use crate::synth::MethodSynthesizer;

/// Simple name of the triggering annotation.
pub const FX_SETTER_ANNOTATION: &str = "FXSetter";
pub const FX_SETTER_ANNOTATION_FQCN: &str = "lombok.experimental.FXSetter";

/// Where an `@FXSetter` annotation was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Placement {
    /// On the field with this name.
    Field(String),
    /// On the owning type itself.
    Type,
    /// Anywhere else (method, parameter, local, ...).
    Other(String),
}

/// One placement of `@FXSetter` with its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetterOccurrence {
    /// Path of the type that carries the annotation within its unit:
    /// `Outer` for a top-level type, `Outer.Inner` for a nested one.
    pub owner: String,
    pub placement: Placement,
    #[serde(default)]
    pub level: AccessLevel,
    #[serde(default)]
    pub on_method: Vec<Annotation>,
    #[serde(default)]
    pub on_param: Vec<Annotation>,
    #[serde(default)]
    pub span: Option<Span>,
}

impl SetterOccurrence {
    pub fn on_field(owner: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            placement: Placement::Field(field.into()),
            level: AccessLevel::Public,
            on_method: Vec::new(),
            on_param: Vec::new(),
            span: None,
        }
    }

    pub fn on_type(owner: impl Into<String>) -> Self {
        Self {
            placement: Placement::Type,
            ..Self::on_field(owner, String::new())
        }
    }

    pub fn with_level(mut self, level: AccessLevel) -> Self {
        self.level = level;
        self
    }
}

/// Settings shared by every field of one occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetterRequest {
    pub level: AccessLevel,
    /// Warn when a hand-written method already occupies the setter name.
    pub warn_on_conflict: bool,
    pub on_method: Vec<Annotation>,
    pub on_param: Vec<Annotation>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConflictReason {
    /// A previous run already generated this setter.
    AlreadyGenerated { name: String },
    /// A hand-written method uses the name.
    UserMethod { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum GenerationOutcome {
    Injected(MethodDecl),
    SkippedConflict(ConflictReason),
    SkippedNoName,
    SkippedExplicitNone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOutcome {
    pub field: String,
    pub outcome: GenerationOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GenerationReport {
    pub owner: String,
    pub outcomes: Vec<FieldOutcome>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            ..Self::default()
        }
    }

    /// Methods waiting to be injected, in field order.
    pub fn generated(&self) -> impl Iterator<Item = &MethodDecl> {
        injected(&self.outcomes)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Append every generated method to `owner`.
    pub fn apply(&self, owner: &mut TypeDecl) {
        for method in self.generated() {
            owner.inject_method(method.clone());
        }
    }
}

pub struct FieldSetterGenerator<'a> {
    config: &'a FxConfig,
}

impl<'a> FieldSetterGenerator<'a> {
    pub fn new(config: &'a FxConfig) -> Self {
        Self { config }
    }

    /// Plan the setters for one annotation occurrence without touching `unit`.
    pub fn generate(
        &self,
        unit: &CompilationUnit,
        occurrence: &SetterOccurrence,
    ) -> GenerationReport {
        let mut report = GenerationReport::new(&occurrence.owner);
        let chain = unit.type_chain(&occurrence.owner).unwrap_or_default();
        let resolver = TypeResolver::for_chain(unit, &chain);
        let owner = chain.last().copied();

        if occurrence.level == AccessLevel::None {
            if let Some(owner) = owner {
                for field in target_fields(owner, &occurrence.placement, &resolver) {
                    report.outcomes.push(FieldOutcome {
                        field: field.name.clone(),
                        outcome: GenerationOutcome::SkippedExplicitNone,
                    });
                }
            }
            tracing::debug!(owner = %occurrence.owner, "access level NONE, nothing to generate");
            return report;
        }

        if let Some(flag) = self.config.setter.flag_usage {
            let message = "Use of @FXSetter is flagged according to fxgen configuration.";
            let span = occurrence.span;
            report.diagnostics.push(match flag {
                FlagUsage::Warning => Diagnostic::warning(FXSETTER_FLAGGED, message, span),
                FlagUsage::Error => Diagnostic::error(FXSETTER_FLAGGED, message, span),
            });
        }

        let Some(owner) = owner else {
            report.diagnostics.push(Diagnostic::error(
                FXSETTER_UNSUPPORTED_PLACEMENT,
                format!("@FXSetter target type `{}` not found.", occurrence.owner),
                occurrence.span,
            ));
            return report;
        };

        let request = match &occurrence.placement {
            Placement::Field(name) => {
                if owner.field(name).is_none() {
                    report.diagnostics.push(Diagnostic::error(
                        FXSETTER_UNSUPPORTED_PLACEMENT,
                        format!("@FXSetter target field `{name}` not found in `{}`.", owner.name),
                        occurrence.span,
                    ));
                    return report;
                }
                SetterRequest {
                    level: occurrence.level,
                    warn_on_conflict: true,
                    on_method: occurrence.on_method.clone(),
                    on_param: occurrence.on_param.clone(),
                    span: occurrence.span,
                }
            }
            Placement::Type => {
                if !occurrence.on_method.is_empty() {
                    report.diagnostics.push(Diagnostic::error(
                        FXSETTER_UNSUPPORTED_AT_TYPE,
                        "'onMethod' is not supported for @FXSetter on a type.",
                        occurrence.span,
                    ));
                }
                if !occurrence.on_param.is_empty() {
                    report.diagnostics.push(Diagnostic::error(
                        FXSETTER_UNSUPPORTED_AT_TYPE,
                        "'onParam' is not supported for @FXSetter on a type.",
                        occurrence.span,
                    ));
                }
                SetterRequest {
                    level: occurrence.level,
                    warn_on_conflict: false,
                    on_method: Vec::new(),
                    on_param: Vec::new(),
                    span: occurrence.span,
                }
            }
            Placement::Other(kind) => {
                tracing::debug!(%kind, "@FXSetter on unsupported element");
                report.diagnostics.push(Diagnostic::error(
                    FXSETTER_UNSUPPORTED_PLACEMENT,
                    "@FXSetter is only supported on a class or a field.",
                    occurrence.span,
                ));
                return report;
            }
        };

        let fields = target_fields(owner, &occurrence.placement, &resolver);
        let fields_report = self.create_setters_for_fields(&resolver, owner, &fields, &request);
        report.outcomes.extend(fields_report.outcomes);
        report.diagnostics.extend(fields_report.diagnostics);
        report
    }

    /// Plan setters for `fields` of `owner`, resolving names with `resolver`.
    /// Each field is handled on its own; a skipped field never stops its
    /// siblings.
    pub fn create_setters_for_fields(
        &self,
        resolver: &TypeResolver<'_>,
        owner: &TypeDecl,
        fields: &[&FieldDecl],
        request: &SetterRequest,
    ) -> GenerationReport {
        let mut report = GenerationReport::new(&owner.name);
        let Some(visibility) = request.level.visibility() else {
            report.outcomes.extend(fields.iter().map(|field| FieldOutcome {
                field: field.name.clone(),
                outcome: GenerationOutcome::SkippedExplicitNone,
            }));
            return report;
        };

        let names = NameResolver::new(&self.config.accessors);
        let synthesizer = MethodSynthesizer::new(self.config, resolver.clone());
        let source = GeneratedBy {
            annotation: FX_SETTER_ANNOTATION.to_string(),
            span: request.span,
        };

        for field in fields {
            let scanner =
                ConflictScanner::new(owner, resolver).with_pending(injected(&report.outcomes));
            let outcome = self.create_setter_for_field(
                field,
                visibility,
                request,
                &names,
                &scanner,
                &synthesizer,
                &source,
                &mut report.diagnostics,
            );
            tracing::debug!(
                owner = %owner.name,
                field = %field.name,
                outcome = outcome_label(&outcome),
                "processed @FXSetter field"
            );
            report.outcomes.push(FieldOutcome {
                field: field.name.clone(),
                outcome,
            });
        }
        report
    }

    #[allow(clippy::too_many_arguments)]
    fn create_setter_for_field(
        &self,
        field: &FieldDecl,
        visibility: Visibility,
        request: &SetterRequest,
        names: &NameResolver<'_>,
        scanner: &ConflictScanner<'_>,
        synthesizer: &MethodSynthesizer<'_>,
        source: &GeneratedBy,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> GenerationOutcome {
        let Some(method_name) = names.setter_name(field) else {
            diagnostics.push(Diagnostic::warning(
                FXSETTER_PREFIX_MISMATCH,
                "Not generating setter for this field: It does not fit your @Accessors prefix list.",
                field.span,
            ));
            return GenerationOutcome::SkippedNoName;
        };

        for alt_name in names.all_setter_names(field) {
            match scanner.method_exists(&alt_name, 1) {
                MemberExists::NotExists => continue,
                MemberExists::ExistsByTool => {
                    return GenerationOutcome::SkippedConflict(ConflictReason::AlreadyGenerated {
                        name: alt_name,
                    });
                }
                MemberExists::ExistsByUser => {
                    if request.warn_on_conflict {
                        let alt_explanation = if alt_name != method_name {
                            format!(" ({alt_name})")
                        } else {
                            String::new()
                        };
                        diagnostics.push(Diagnostic::warning(
                            FXSETTER_METHOD_EXISTS,
                            format!(
                                "Not generating {method_name}(): A method with that name already exists{alt_explanation}"
                            ),
                            field.span,
                        ));
                    }
                    return GenerationOutcome::SkippedConflict(ConflictReason::UserMethod {
                        name: alt_name,
                    });
                }
            }
        }

        match synthesizer.synthesize(
            visibility,
            field,
            Some(&method_name),
            source,
            &request.on_method,
            &request.on_param,
        ) {
            Ok(method) => GenerationOutcome::Injected(method),
            Err(err) => {
                diagnostics.push(Diagnostic::error(
                    FXSETTER_NOT_SUPPORTED,
                    err.to_string(),
                    field.span,
                ));
                GenerationOutcome::SkippedNoName
            }
        }
    }

    /// Generate and inject the setters for `occurrence`.
    pub fn run(
        &self,
        unit: &mut CompilationUnit,
        occurrence: &SetterOccurrence,
    ) -> GenerationReport {
        let report = self.generate(unit, occurrence);
        if let Some(owner) = unit.type_decl_mut(&occurrence.owner) {
            report.apply(owner);
        }
        report
    }

    /// Run every occurrence in order, injecting after each one so later
    /// occurrences see earlier output.
    pub fn process_unit(
        &self,
        unit: &mut CompilationUnit,
        occurrences: &[SetterOccurrence],
    ) -> Vec<GenerationReport> {
        occurrences
            .iter()
            .map(|occurrence| self.run(unit, occurrence))
            .collect()
    }
}

fn injected(outcomes: &[FieldOutcome]) -> impl Iterator<Item = &MethodDecl> {
    outcomes.iter().filter_map(|o| match &o.outcome {
        GenerationOutcome::Injected(method) => Some(method),
        _ => None,
    })
}

/// Fields targeted by an occurrence. A type-level annotation covers every
/// instance field except synthetic (`$`-prefixed) ones and fields that carry
/// their own `@FXSetter`.
fn target_fields<'t>(
    owner: &'t TypeDecl,
    placement: &Placement,
    resolver: &TypeResolver<'_>,
) -> Vec<&'t FieldDecl> {
    match placement {
        Placement::Field(name) => owner.field(name).into_iter().collect(),
        Placement::Type => owner
            .fields
            .iter()
            .filter(|field| {
                !field.is_static
                    && !field.name.starts_with('$')
                    && !resolver.has_annotation(FX_SETTER_ANNOTATION_FQCN, &field.annotations)
            })
            .collect(),
        Placement::Other(_) => Vec::new(),
    }
}

fn outcome_label(outcome: &GenerationOutcome) -> &'static str {
    match outcome {
        GenerationOutcome::Injected(_) => "injected",
        GenerationOutcome::SkippedConflict(ConflictReason::AlreadyGenerated { .. }) => {
            "already_generated"
        }
        GenerationOutcome::SkippedConflict(ConflictReason::UserMethod { .. }) => "method_exists",
        GenerationOutcome::SkippedNoName => "no_name",
        GenerationOutcome::SkippedExplicitNone => "explicit_none",
    }
}
