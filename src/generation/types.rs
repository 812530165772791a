//! Core types for the generation domain

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::generation::GenerationError;

/// Target languages a project configuration can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    TypeScript,
    Python,
}

impl Language {
    /// Get the display name for this language
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
        }
    }

    /// Get the file extension for this language
    pub fn file_extension(&self) -> &'static str {
        match self {
            Language::TypeScript => "ts",
            Language::Python => "py",
        }
    }

    /// Get all languages the configuration schema knows about
    pub fn all() -> Vec<Language> {
        vec![Language::TypeScript, Language::Python]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::TypeScript => write!(f, "typescript"),
            Language::Python => write!(f, "python"),
        }
    }
}

impl FromStr for Language {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "typescript" | "ts" => Ok(Language::TypeScript),
            "python" | "py" => Ok(Language::Python),
            _ => Err(GenerationError::UnsupportedLanguage(s.to_string())),
        }
    }
}

/// A generated source unit: an output path and its ordered declarations.
///
/// Artifacts are plain values. They are built by chaining [`Artifact::with`]
/// and only turned into text by a source renderer at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub path: PathBuf,
    pub declarations: Vec<Declaration>,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            declarations: Vec::new(),
        }
    }

    /// Append a declaration, returning the extended artifact
    pub fn with(mut self, declaration: impl Into<Declaration>) -> Self {
        self.declarations.push(declaration.into());
        self
    }

    /// Append several declarations in order
    pub fn with_all<I, D>(mut self, declarations: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Declaration>,
    {
        self.declarations
            .extend(declarations.into_iter().map(Into::into));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Find a class declared in this artifact
    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        self.declarations.iter().find_map(|d| match d {
            Declaration::Class(class) if class.name == name => Some(class),
            _ => None,
        })
    }

    /// All type aliases declared in this artifact, in order
    pub fn type_aliases(&self) -> impl Iterator<Item = &TypeAliasDecl> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::TypeAlias(alias) => Some(alias),
            _ => None,
        })
    }
}

/// One top-level declaration of a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Import(ImportDecl),
    Interface(InterfaceDecl),
    TypeAlias(TypeAliasDecl),
    Variable(VariableDecl),
    Class(ClassDecl),
}

impl Declaration {
    /// Template-facing name of this declaration kind
    pub fn kind(&self) -> &'static str {
        match self {
            Declaration::Import(_) => "import",
            Declaration::Interface(_) => "interface",
            Declaration::TypeAlias(_) => "type_alias",
            Declaration::Variable(_) => "variable",
            Declaration::Class(_) => "class",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportDecl {
    pub module: String,
    pub default_import: Option<String>,
    pub named_imports: Vec<String>,
}

impl ImportDecl {
    pub fn named(module: impl Into<String>, names: &[&str]) -> Self {
        Self {
            module: module.into(),
            default_import: None,
            named_imports: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn default_export(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            default_import: Some(name.into()),
            named_imports: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceDecl {
    pub name: String,
    pub exported: bool,
    pub type_parameters: Vec<String>,
    pub properties: Vec<PropertySignature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySignature {
    pub name: String,
    pub ty: String,
    pub optional: bool,
}

impl PropertySignature {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// A type alias whose body is an object shape.
///
/// `notes` are rendered as comment lines inside the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeAliasDecl {
    pub name: String,
    pub exported: bool,
    pub members: Vec<PropertySignature>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableDecl {
    pub exported: bool,
    pub statement: Statement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub keyword: String,
    pub name: String,
    pub ty: Option<String>,
    pub initializer: Initializer,
}

impl Statement {
    pub fn constant(name: impl Into<String>, initializer: Initializer) -> Self {
        Self {
            keyword: "const".to_string(),
            name: name.into(),
            ty: None,
            initializer,
        }
    }

    pub fn typed(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Initializer {
    Expression { expression: String },
    Object { properties: Vec<ObjectProperty> },
}

impl Initializer {
    pub fn expr(expression: impl Into<String>) -> Self {
        Self::Expression {
            expression: expression.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectProperty {
    pub name: String,
    pub value: String,
}

impl ObjectProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDecl {
    pub name: String,
    pub exported: bool,
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDecl {
    pub name: String,
    pub is_static: bool,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub ty: String,
}

macro_rules! impl_into_declaration {
    ($($decl:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$decl> for Declaration {
                fn from(decl: $decl) -> Self {
                    Declaration::$variant(decl)
                }
            }
        )*
    };
}

impl_into_declaration! {
    ImportDecl => Import,
    InterfaceDecl => Interface,
    TypeAliasDecl => TypeAlias,
    VariableDecl => Variable,
    ClassDecl => Class,
}

/// An artifact serialized to source text, ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub content: String,
}

impl RenderedFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Summary of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Files written (or, for a dry run, that would be written)
    pub written: Vec<PathBuf>,
    /// Subset of `written` that already existed before the run
    pub overwritten: Vec<PathBuf>,
    /// Services that produced a controller
    pub generated_services: Vec<String>,
    /// Services whose document declared no operations
    pub skipped_services: Vec<String>,
    /// Path-item entries skipped because they are not supported operations
    pub skipped_entries: usize,
}
