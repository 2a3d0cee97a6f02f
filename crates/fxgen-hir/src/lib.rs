//! Editable, annotation-aware tree for Java type declarations.
//!
//! This is not a full HIR: bodies are opaque statements and types are kept as
//! written. It carries exactly what member generators need to read a field and
//! to append a synthesized method to its owning type.

use fxgen_types::{Span, Type};
use serde::{Deserialize, Serialize};

pub mod javadoc;
pub mod printer;
pub mod resolve;

pub use resolve::TypeResolver;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompilationUnit {
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub imports: Vec<ImportDecl>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl CompilationUnit {
    pub fn new(package: Option<String>) -> Self {
        Self {
            package,
            imports: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Look up a type by its path within the unit: `Outer` or `Outer.Inner`.
    pub fn type_decl(&self, path: &str) -> Option<&TypeDecl> {
        self.type_chain(path)?.pop()
    }

    /// Every type from the top-level one down to the one `path` names.
    pub fn type_chain(&self, path: &str) -> Option<Vec<&TypeDecl>> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.types.iter().find(|ty| ty.name == first)?;
        let mut chain = vec![current];
        for segment in segments {
            current = current.nested_types.iter().find(|ty| ty.name == segment)?;
            chain.push(current);
        }
        Some(chain)
    }

    pub fn type_decl_mut(&mut self, path: &str) -> Option<&mut TypeDecl> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.types.iter_mut().find(|ty| ty.name == first)?;
        for segment in segments {
            current = current
                .nested_types
                .iter_mut()
                .find(|ty| ty.name == segment)?;
        }
        Some(current)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportDecl {
    TypeSingle { ty: String },
    TypeStar { package: String },
    StaticSingle { ty: String, member: String },
    StaticStar { ty: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Package,
    Private,
}

impl Visibility {
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Visibility::Public => Some("public"),
            Visibility::Protected => Some("protected"),
            Visibility::Package => None,
            Visibility::Private => Some("private"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    /// Raw argument text between the parentheses, if any.
    #[serde(default)]
    pub args: Option<String>,
    #[serde(default)]
    pub span: Option<Span>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        let mut name = name.into();
        if let Some(stripped) = name.strip_prefix('@') {
            name = stripped.to_string();
        }
        Self {
            name,
            args: None,
            span: None,
        }
    }

    pub fn with_args(name: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            args: Some(args.into()),
            ..Self::new(name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub nested_types: Vec<TypeDecl>,
    #[serde(default)]
    pub span: Option<Span>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            nested_types: Vec::new(),
            span: None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Append `method` after every existing member.
    pub fn inject_method(&mut self, method: MethodDecl) {
        self.methods.push(method);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub ty: Type,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub javadoc: Option<String>,
    #[serde(default)]
    pub span: Option<Span>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Private,
            is_static: false,
            is_final: false,
            annotations: Vec::new(),
            javadoc: None,
            span: None,
        }
    }

    /// `@java.lang.Deprecated` on the field, or a `@deprecated` javadoc tag.
    pub fn is_deprecated(&self, resolver: &TypeResolver<'_>) -> bool {
        resolver.has_annotation("java.lang.Deprecated", &self.annotations)
            || self
                .javadoc
                .as_deref()
                .is_some_and(javadoc::has_deprecated_tag)
    }
}

/// Marker left on members synthesized by a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedBy {
    /// Name of the annotation that triggered generation, e.g. `FXSetter`.
    pub annotation: String,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default = "void_type")]
    pub return_type: Type,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default)]
    pub is_varargs: bool,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub body: Block,
    #[serde(default)]
    pub javadoc: Option<String>,
    #[serde(default)]
    pub generated_by: Option<GeneratedBy>,
    #[serde(default)]
    pub span: Option<Span>,
}

fn void_type() -> Type {
    Type::Void
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Package,
            is_static: false,
            is_final: false,
            return_type: Type::Void,
            params: Vec::new(),
            is_varargs: false,
            annotations: Vec::new(),
            body: Block::default(),
            javadoc: None,
            generated_by: None,
            span: None,
        }
    }

    pub fn with_params(mut self, params: Vec<ParamDecl>) -> Self {
        self.params = params;
        self
    }

    pub fn is_generated(&self) -> bool {
        self.generated_by.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    pub ty: Type,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            is_final: false,
            annotations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    /// A statement kept as source text, e.g. `this.x = x;`.
    Raw(String),
    Block(Block),
}
