//! Java source rendering for declarations.

use crate::{Annotation, Block, FieldDecl, MethodDecl, ParamDecl, Stmt, TypeDecl};

const INDENT: usize = 4;

pub struct JavaPrinter {
    indent_level: usize,
    output: String,
}

impl Default for JavaPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaPrinter {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            output: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn indent(&mut self) {
        self.indent_level += INDENT;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(INDENT);
    }

    fn writeln(&mut self, s: &str) {
        if !s.is_empty() {
            for _ in 0..self.indent_level {
                self.output.push(' ');
            }
            self.output.push_str(s);
        }
        self.output.push('\n');
    }

    fn javadoc(&mut self, doc: Option<&str>) {
        let Some(doc) = doc else {
            return;
        };
        self.writeln("/**");
        for line in doc.lines() {
            if line.is_empty() {
                self.writeln(" *");
            } else {
                // A literal `*/` would close the comment early.
                self.writeln(&format!(" * {}", line.replace("*/", "*&#47;")));
            }
        }
        self.writeln(" */");
    }

    fn annotations(&mut self, annotations: &[Annotation]) {
        for annotation in annotations {
            self.writeln(&annotation_text(annotation));
        }
    }

    pub fn type_decl(&mut self, ty: &TypeDecl) {
        self.annotations(&ty.annotations);
        self.writeln(&format!("class {} {{", ty.name));
        self.indent();
        for field in &ty.fields {
            self.field(field);
        }
        for method in &ty.methods {
            self.writeln("");
            self.method(method);
        }
        for nested in &ty.nested_types {
            self.writeln("");
            self.type_decl(nested);
        }
        self.dedent();
        self.writeln("}");
    }

    pub fn field(&mut self, field: &FieldDecl) {
        self.javadoc(field.javadoc.as_deref());
        self.annotations(&field.annotations);
        let mut header = modifiers(field.visibility.keyword(), field.is_static, field.is_final);
        header.push_str(&format!("{} {};", field.ty, field.name));
        self.writeln(&header);
    }

    pub fn method(&mut self, method: &MethodDecl) {
        self.javadoc(method.javadoc.as_deref());
        self.annotations(&method.annotations);

        let mut header = modifiers(method.visibility.keyword(), method.is_static, method.is_final);
        let last = method.params.len().saturating_sub(1);
        let params: Vec<String> = method
            .params
            .iter()
            .enumerate()
            .map(|(idx, param)| param_text(param, method.is_varargs && idx == last))
            .collect();
        header.push_str(&format!(
            "{} {}({})",
            method.return_type,
            method.name,
            params.join(", ")
        ));

        self.writeln(&format!("{header} {{"));
        self.block_contents(&method.body);
        self.writeln("}");
    }

    fn block_contents(&mut self, block: &Block) {
        self.indent();
        for stmt in &block.stmts {
            match stmt {
                Stmt::Raw(text) => self.writeln(text),
                Stmt::Block(inner) => {
                    self.writeln("{");
                    self.block_contents(inner);
                    self.writeln("}");
                }
            }
        }
        self.dedent();
    }
}

fn modifiers(visibility: Option<&str>, is_static: bool, is_final: bool) -> String {
    let mut out = String::new();
    if let Some(keyword) = visibility {
        out.push_str(keyword);
        out.push(' ');
    }
    if is_static {
        out.push_str("static ");
    }
    if is_final {
        out.push_str("final ");
    }
    out
}

fn annotation_text(annotation: &Annotation) -> String {
    match &annotation.args {
        Some(args) => format!("@{}({args})", annotation.name),
        None => format!("@{}", annotation.name),
    }
}

fn param_text(param: &ParamDecl, varargs: bool) -> String {
    let mut out = String::new();
    for annotation in &param.annotations {
        out.push_str(&annotation_text(annotation));
        out.push(' ');
    }
    if param.is_final {
        out.push_str("final ");
    }
    match (&param.ty, varargs) {
        (fxgen_types::Type::Array(component), true) => out.push_str(&format!("{component}...")),
        (ty, _) => out.push_str(&ty.to_string()),
    }
    out.push(' ');
    out.push_str(&param.name);
    out
}

/// Render a single method as Java source.
pub fn print_method(method: &MethodDecl) -> String {
    let mut printer = JavaPrinter::new();
    printer.method(method);
    printer.finish()
}

/// Render a type declaration with its fields and methods as Java source.
pub fn print_type(ty: &TypeDecl) -> String {
    let mut printer = JavaPrinter::new();
    printer.type_decl(ty);
    printer.finish()
}
