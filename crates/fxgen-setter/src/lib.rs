//! `@FXSetter` support.
//!
//! For a field typed as a JavaFX property wrapper (`IntegerProperty`,
//! `ListProperty<T>`, ...) the generator synthesizes a setter whose parameter
//! is the unwrapped value type, so `IntegerProperty count` gets
//! `public final void setCount(int count) {}`.
//!
//! The pieces run in this order for every targeted field:
//! [`NameResolver`] picks the setter name, [`ConflictScanner`] checks for an
//! existing method, [`TypeUnwrapper`] maps the declared type and
//! [`MethodSynthesizer`] builds the declaration. [`FieldSetterGenerator`]
//! drives them and collects the result in a [`GenerationReport`].

mod access;
mod conflict;
pub mod diagnostics;
mod generator;
mod naming;
mod synth;
mod unwrap;

pub use access::AccessLevel;
pub use conflict::{ConflictScanner, MemberExists, TOLERATE_ANNOTATION};
pub use generator::{
    ConflictReason, FieldOutcome, FieldSetterGenerator, GenerationOutcome, GenerationReport,
    Placement, SetterOccurrence, SetterRequest, FX_SETTER_ANNOTATION, FX_SETTER_ANNOTATION_FQCN,
};
pub use naming::NameResolver;
pub use synth::{
    MethodSynthesizer, SynthesisError, DEPRECATED_ANNOTATION, JAVAX_GENERATED_ANNOTATION,
    LOMBOK_GENERATED_ANNOTATION,
};
pub use unwrap::{TypeUnwrapper, WrapperKind};
