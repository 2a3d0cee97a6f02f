//! Mapping from JavaFX property wrapper types to the value type their setter
//! accepts.
//!
//! Classification is nominal: a declared type is a wrapper only if its name
//! resolves to one of the catalogued `javafx.beans.property` classes. Anything
//! else passes through untouched.

use fxgen_hir::TypeResolver;
use fxgen_types::{PrimitiveType, Type, WildcardBound};

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const OBSERVABLE_LIST: &str = "javafx.collections.ObservableList";
pub const OBSERVABLE_MAP: &str = "javafx.collections.ObservableMap";
pub const OBSERVABLE_SET: &str = "javafx.collections.ObservableSet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapperKind {
    Boolean,
    Double,
    Float,
    Integer,
    List,
    Long,
    Map,
    Object,
    Set,
    String,
    Unknown,
}

impl WrapperKind {
    /// Known wrappers in the order they are tested.
    pub const CATALOG: [WrapperKind; 10] = [
        WrapperKind::Boolean,
        WrapperKind::Double,
        WrapperKind::Float,
        WrapperKind::Integer,
        WrapperKind::List,
        WrapperKind::Long,
        WrapperKind::Map,
        WrapperKind::Object,
        WrapperKind::Set,
        WrapperKind::String,
    ];

    pub fn property_class(self) -> Option<&'static str> {
        Some(match self {
            WrapperKind::Boolean => "javafx.beans.property.BooleanProperty",
            WrapperKind::Double => "javafx.beans.property.DoubleProperty",
            WrapperKind::Float => "javafx.beans.property.FloatProperty",
            WrapperKind::Integer => "javafx.beans.property.IntegerProperty",
            WrapperKind::List => "javafx.beans.property.ListProperty",
            WrapperKind::Long => "javafx.beans.property.LongProperty",
            WrapperKind::Map => "javafx.beans.property.MapProperty",
            WrapperKind::Object => "javafx.beans.property.ObjectProperty",
            WrapperKind::Set => "javafx.beans.property.SetProperty",
            WrapperKind::String => "javafx.beans.property.StringProperty",
            WrapperKind::Unknown => return None,
        })
    }

    /// The value type of a raw (non-parameterized) wrapper.
    pub fn value_type(self) -> Option<Type> {
        Some(match self {
            WrapperKind::Boolean => Type::Primitive(PrimitiveType::Boolean),
            WrapperKind::Double => Type::Primitive(PrimitiveType::Double),
            WrapperKind::Float => Type::Primitive(PrimitiveType::Float),
            WrapperKind::Integer => Type::Primitive(PrimitiveType::Int),
            WrapperKind::Long => Type::Primitive(PrimitiveType::Long),
            WrapperKind::List => Type::named(OBSERVABLE_LIST),
            WrapperKind::Map => Type::named(OBSERVABLE_MAP),
            WrapperKind::Set => Type::named(OBSERVABLE_SET),
            WrapperKind::Object => Type::named(OBJECT),
            WrapperKind::String => Type::named(STRING),
            WrapperKind::Unknown => return None,
        })
    }
}

pub struct TypeUnwrapper<'a> {
    resolver: TypeResolver<'a>,
}

impl<'a> TypeUnwrapper<'a> {
    pub fn new(resolver: TypeResolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn classify(&self, ty: &Type) -> WrapperKind {
        let kind = WrapperKind::CATALOG
            .into_iter()
            .find(|kind| {
                kind.property_class()
                    .is_some_and(|fqcn| self.resolver.type_matches(fqcn, ty))
            })
            .unwrap_or(WrapperKind::Unknown);
        tracing::trace!(ty = %ty, ?kind, "classified declared type");
        kind
    }

    /// The setter parameter type for a field declared as `ty`.
    pub fn unwrap(&self, ty: &Type) -> Type {
        match ty {
            Type::Generic { base, args } => self.unwrap_generic(base, args),
            _ => self.classify(ty).value_type().unwrap_or_else(|| ty.clone()),
        }
    }

    fn unwrap_generic(&self, base: &Type, args: &[Type]) -> Type {
        let kind = self.classify(base);
        match kind {
            WrapperKind::List | WrapperKind::Map | WrapperKind::Set => {
                let collection = kind.value_type().unwrap_or_else(|| base.clone());
                Type::generic(collection, args.to_vec())
            }
            // `ObjectProperty<T>` holds a `T`.
            WrapperKind::Object => match args {
                [arg] => argument_value_type(arg),
                _ => Type::named(OBJECT),
            },
            WrapperKind::Boolean
            | WrapperKind::Double
            | WrapperKind::Float
            | WrapperKind::Integer
            | WrapperKind::Long
            | WrapperKind::String => kind.value_type().unwrap_or_else(|| base.clone()),
            WrapperKind::Unknown => Type::generic(self.unwrap(base), args.to_vec()),
        }
    }
}

/// A type argument as a value type: `? extends T` is `T`, other wildcards
/// are `Object`.
fn argument_value_type(arg: &Type) -> Type {
    match arg {
        Type::Wildcard(Some(WildcardBound::Extends(bound))) => (**bound).clone(),
        Type::Wildcard(_) => Type::named(OBJECT),
        other => other.clone(),
    }
}
