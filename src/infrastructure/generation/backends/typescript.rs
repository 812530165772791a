//! TypeScript backend

use crate::config::ProjectConfig;
use crate::generation::naming::controller_class_name;
use crate::generation::{
    Artifact, Backend, ClassDecl, GenerationError, ImportDecl, Initializer, InterfaceDecl,
    Language, MethodDecl, ObjectProperty, OperationPlan, Parameter, PlannedOperation,
    PropertySignature, Result, Statement, TypeAliasDecl, VariableDecl,
};
use crate::infrastructure::generation::TeraSourceRenderer;

const TEMPLATES: &[(&str, &str)] = &[
    (
        "macros.ts",
        include_str!("../../../../templates/typescript/macros.ts.tera"),
    ),
    (
        "import.ts",
        include_str!("../../../../templates/typescript/import.ts.tera"),
    ),
    (
        "interface.ts",
        include_str!("../../../../templates/typescript/interface.ts.tera"),
    ),
    (
        "type_alias.ts",
        include_str!("../../../../templates/typescript/type_alias.ts.tera"),
    ),
    (
        "variable.ts",
        include_str!("../../../../templates/typescript/variable.ts.tera"),
    ),
    (
        "class.ts",
        include_str!("../../../../templates/typescript/class.ts.tera"),
    ),
];

const INTERFACES_MODULE: &str = "interfaces";
const VALIDATION_MODULE: &str = "validation";

/// Emits a controller skeleton for Node.js HTTP frameworks
pub struct TypeScriptBackend {
    renderer: TeraSourceRenderer,
}

impl TypeScriptBackend {
    pub fn new() -> Result<Self> {
        let renderer = TeraSourceRenderer::new(Language::TypeScript.file_extension(), TEMPLATES)
            .map_err(|e| GenerationError::Render {
                path: "templates/typescript".into(),
                message: e.to_string(),
            })?;
        Ok(Self { renderer })
    }

    fn interfaces(config: &ProjectConfig) -> Artifact {
        let path = config
            .compilation
            .directories
            .controllers
            .join(format!("{INTERFACES_MODULE}.ts"));

        Artifact::new(path)
            .with(ImportDecl::named("http", &["IncomingHttpHeaders"]))
            .with(ImportDecl::named("querystring", &["ParsedUrlQuery"]))
            .with(InterfaceDecl {
                name: "HttpRequest".to_string(),
                exported: true,
                type_parameters: vec![],
                properties: vec![
                    PropertySignature::new("method", "string"),
                    PropertySignature::new("resource", "string"),
                    PropertySignature::new("body", "unknown"),
                    PropertySignature::new("params", "{[key: string]: string}"),
                    PropertySignature::new("headers", "IncomingHttpHeaders"),
                    PropertySignature::new("query", "ParsedUrlQuery"),
                ],
            })
            .with(InterfaceDecl {
                name: "HttpResponse".to_string(),
                exported: true,
                type_parameters: vec!["SuccessBody".to_string(), "ErrorBody".to_string()],
                properties: vec![
                    PropertySignature::new("body", "SuccessBody | ErrorBody"),
                    PropertySignature::new("headers", "any").optional(),
                    PropertySignature::new("status", "number"),
                    PropertySignature::new("contentType", "string"),
                    PropertySignature::new("contentDisposition", "'inline' | 'attachment'"),
                    PropertySignature::new("raw", "boolean"),
                ],
            })
    }

    fn validation(config: &ProjectConfig) -> Artifact {
        let path = config
            .compilation
            .directories
            .controllers
            .join(format!("{VALIDATION_MODULE}.ts"));

        Artifact::new(path)
            .with(ImportDecl::default_export("ajv", "Ajv"))
            .with(VariableDecl {
                exported: true,
                statement: Statement::constant("ajv", Initializer::expr("new Ajv()")),
            })
    }

    /// Placeholder response shape; 2xx JSON responses are only noted, not translated
    fn response_type(operation: &PlannedOperation) -> TypeAliasDecl {
        let notes = operation
            .descriptor
            .success_responses()
            .into_iter()
            .filter(|response| response.json_schema().is_some())
            .map(|response| format!("{} application/json", response.status))
            .collect();

        TypeAliasDecl {
            name: operation.names.response_type_name.clone(),
            exported: true,
            members: vec![],
            notes,
        }
    }

    fn method(operation: &PlannedOperation) -> MethodDecl {
        let names = &operation.names;
        let response = format!("HttpResponse<{}, unknown>", names.response_type_name);

        let placeholder = Initializer::Object {
            properties: vec![
                ObjectProperty::new("body", "{}"),
                ObjectProperty::new("headers", "{}"),
                ObjectProperty::new("status", "200"),
                ObjectProperty::new("contentType", "'application/json'"),
                ObjectProperty::new("contentDisposition", "'inline'"),
                ObjectProperty::new("raw", "false"),
            ],
        };

        MethodDecl {
            name: names.method_operation_name.clone(),
            is_static: true,
            parameters: vec![Parameter {
                name: "req".to_string(),
                ty: "HttpRequest".to_string(),
            }],
            return_type: Some(format!("Promise<{response}>")),
            statements: vec![
                Statement::constant(
                    "validatedBody",
                    Initializer::expr(format!("{}(req.body)", names.validation_function_name)),
                ),
                Statement::constant("res", placeholder).typed(response),
            ],
        }
    }
}

impl Backend for TypeScriptBackend {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn emit_base_artifacts(&self, config: &ProjectConfig) -> Result<Vec<Artifact>> {
        Ok(vec![Self::interfaces(config), Self::validation(config)])
    }

    fn generate_controller(
        &self,
        config: &ProjectConfig,
        plan: &OperationPlan,
    ) -> Result<Artifact> {
        let path = config
            .compilation
            .directories
            .controllers
            .join(format!("{}.controller.ts", plan.service));

        let class = ClassDecl {
            name: controller_class_name(&plan.service),
            exported: true,
            methods: plan.operations.iter().map(Self::method).collect(),
        };

        Ok(Artifact::new(path)
            .with(ImportDecl::named(
                format!("./{INTERFACES_MODULE}"),
                &["HttpRequest", "HttpResponse"],
            ))
            .with_all(plan.operations.iter().map(Self::response_type))
            .with(class))
    }

    fn render(&self, artifact: &Artifact) -> Result<String> {
        self.renderer.render(artifact)
    }
}
