//! Deterministic identifier derivation for generated controllers
//!
//! Every name produced here is a pure function of its inputs, so the same
//! (path, method) pair yields the same identifiers on every run.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static DASH_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"-.").expect("valid regex"));

/// Identifiers derived from one (path, method) operation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivedNames {
    /// e.g. `TodosById` for `/todos/{id}`
    pub path_name: String,
    /// e.g. `putTodosById`
    pub method_operation_name: String,
    /// e.g. `PutTodosByIdResponseBody`
    pub response_type_name: String,
    /// e.g. `validatePutTodosByIdBody`
    pub validation_function_name: String,
}

impl DerivedNames {
    /// Derive every identifier for an operation.
    ///
    /// `method` is expected in lowercase (`get`, `post`, `put`, `delete`).
    ///
    /// # Examples
    /// ```
    /// use haku::generation::naming::DerivedNames;
    ///
    /// let names = DerivedNames::derive("/todos/{id}", "put");
    /// assert_eq!(names.path_name, "TodosById");
    /// assert_eq!(names.method_operation_name, "putTodosById");
    /// assert_eq!(names.response_type_name, "PutTodosByIdResponseBody");
    /// assert_eq!(names.validation_function_name, "validatePutTodosByIdBody");
    /// ```
    pub fn derive(path: &str, method: &str) -> Self {
        let path_name = path_name(path);
        let verb = capitalize(method);

        Self {
            method_operation_name: format!("{method}{path_name}"),
            response_type_name: format!("{verb}{path_name}ResponseBody"),
            validation_function_name: format!("validate{verb}{path_name}Body"),
            path_name,
        }
    }
}

/// Rewrite a URL path into dash-separated words.
///
/// `{` becomes `by-`, `}` is dropped and `/` becomes `-`.
pub fn normalize_path(path: &str) -> String {
    path.replace('{', "by-").replace('}', "").replace('/', "-")
}

/// Convert kebab-case to camelCase: every `-x` pair becomes `X`.
///
/// Pairs are matched left to right without overlapping, so `a--b` becomes
/// `a-b` and a trailing dash is kept.
pub fn camelize(s: &str) -> String {
    DASH_PAIR
        .replace_all(s, |caps: &Captures| caps[0][1..].to_uppercase())
        .into_owned()
}

/// Uppercase the first character
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Human readable name of an API path, e.g. `/todos/{id}` -> `TodosById`
pub fn path_name(path: &str) -> String {
    capitalize(&camelize(&normalize_path(path)))
}

/// Class name of the controller generated for a service
pub fn controller_class_name(service: &str) -> String {
    format!("{}Controller", capitalize(&camelize(service)))
}
