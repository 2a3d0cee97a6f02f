//! Construction of the setter method declaration.

use fxgen_config::FxConfig;
use fxgen_hir::{
    javadoc, Annotation, Block, FieldDecl, GeneratedBy, MethodDecl, ParamDecl, TypeResolver,
    Visibility,
};
use fxgen_types::Type;
use thiserror::Error;

use crate::unwrap::TypeUnwrapper;

pub const DEPRECATED_ANNOTATION: &str = "java.lang.Deprecated";
pub const LOMBOK_GENERATED_ANNOTATION: &str = "lombok.Generated";
pub const JAVAX_GENERATED_ANNOTATION: &str = "javax.annotation.Generated";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("cannot generate a setter for `{field}` without a setter name")]
    MissingSetterName { field: String },
}

pub struct MethodSynthesizer<'a> {
    config: &'a FxConfig,
    resolver: TypeResolver<'a>,
    unwrapper: TypeUnwrapper<'a>,
}

impl<'a> MethodSynthesizer<'a> {
    /// `resolver` is the scope of the type that receives the setter.
    pub fn new(config: &'a FxConfig, resolver: TypeResolver<'a>) -> Self {
        Self {
            config,
            unwrapper: TypeUnwrapper::new(resolver.clone()),
            resolver,
        }
    }

    /// Build `final void <name>(<unwrapped type> <field>) {}` for `field`.
    ///
    /// The method is static when the field is, and is marked as generated by
    /// `source`.
    pub fn synthesize(
        &self,
        visibility: Visibility,
        field: &FieldDecl,
        setter_name: Option<&str>,
        source: &GeneratedBy,
        on_method: &[Annotation],
        on_param: &[Annotation],
    ) -> Result<MethodDecl, SynthesisError> {
        let Some(setter_name) = setter_name else {
            return Err(SynthesisError::MissingSetterName {
                field: field.name.clone(),
            });
        };

        let param = ParamDecl {
            name: field.name.clone(),
            ty: self.unwrapper.unwrap(&field.ty),
            is_final: self.config.setter.final_parameters,
            annotations: on_param.to_vec(),
        };

        let mut annotations = Vec::with_capacity(on_method.len() + 1);
        if field.is_deprecated(&self.resolver) {
            annotations.push(Annotation::new(DEPRECATED_ANNOTATION));
        }
        annotations.extend(on_method.iter().cloned());
        if self.config.generated.javax_generated {
            annotations.push(Annotation::with_args(JAVAX_GENERATED_ANNOTATION, "\"lombok\""));
        }
        if self.config.generated.lombok_generated {
            annotations.push(Annotation::new(LOMBOK_GENERATED_ANNOTATION));
        }

        Ok(MethodDecl {
            name: setter_name.to_string(),
            visibility,
            is_static: field.is_static,
            is_final: true,
            return_type: Type::Void,
            params: vec![param],
            is_varargs: false,
            annotations,
            body: Block::default(),
            javadoc: field
                .javadoc
                .as_deref()
                .and_then(|doc| javadoc::setter_javadoc(doc, &field.name)),
            generated_by: Some(source.clone()),
            span: source.span,
        })
    }
}
