//! Tera-based serializer turning artifacts into source text

use std::error::Error as _;
use tera::{Context, Tera};

use crate::generation::{Artifact, Declaration, GenerationError, Result};

/// Renders each declaration of an artifact with the template named after its
/// kind (`import.ts`, `class.ts`, ...) and joins the fragments into one file.
pub struct TeraSourceRenderer {
    tera: Tera,
    extension: &'static str,
}

impl TeraSourceRenderer {
    /// Create a renderer from `(name, content)` template pairs.
    ///
    /// Template names are expected as `{kind}.{extension}`; a shared
    /// `macros.{extension}` may be imported by the others.
    pub fn new(extension: &'static str, templates: &[(&str, &str)]) -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.iter().copied())?;
        tracing::debug!(
            extension,
            templates = templates.len(),
            "Loaded source templates"
        );
        Ok(Self { tera, extension })
    }

    /// Serialize `artifact`.
    ///
    /// Consecutive imports are kept together; every other declaration is
    /// separated by a blank line. The output always ends with one newline.
    pub fn render(&self, artifact: &Artifact) -> Result<String> {
        let mut output = String::new();
        let mut previous: Option<&Declaration> = None;

        for declaration in &artifact.declarations {
            let fragment = self.render_declaration(artifact, declaration)?;

            if let Some(previous) = previous {
                let grouped = matches!(
                    (previous, declaration),
                    (Declaration::Import(_), Declaration::Import(_))
                );
                output.push_str(if grouped { "\n" } else { "\n\n" });
            }
            output.push_str(fragment.trim_end());
            previous = Some(declaration);
        }

        output.push('\n');
        Ok(output)
    }

    fn render_declaration(&self, artifact: &Artifact, declaration: &Declaration) -> Result<String> {
        let template = format!("{}.{}", declaration.kind(), self.extension);

        let mut context = Context::new();
        context.insert("decl", declaration);

        self.tera
            .render(&template, &context)
            .map_err(|e| GenerationError::Render {
                path: artifact.path.clone(),
                message: describe(&e),
            })
    }
}

/// Tera reports the useful part of an error in its source chain
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
