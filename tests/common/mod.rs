//! Shared project fixtures for integration tests

#![allow(dead_code)]

use std::path::Path;
use tempfile::TempDir;

pub const TYPESCRIPT_CONFIG: &str = r#"version: 1.0.0
compilation:
  language: typescript
  engine:
    lib: express
  directories:
    routing: src/routing
    controllers: src/controllers
    useCases: src/use-cases
services:
  todos:
    specPath: specs/todos.yml
"#;

pub const TODOS_SPEC: &str = r##"openapi: 3.0.3
info:
  title: Todos API
  version: 1.0.0
paths:
  /todos:
    summary: Todo collection
    get:
      responses:
        "200":
          description: All todos
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: "#/components/schemas/Todo"
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/Todo"
      responses:
        "201":
          description: Created
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Todo"
        "400":
          description: Invalid todo
  /todos/{id}:
    parameters:
      - name: id
        in: path
        required: true
        schema:
          type: string
    put:
      responses:
        "200":
          description: Updated
    delete:
      responses:
        "204":
          description: Deleted
components:
  schemas:
    Todo:
      type: object
      properties:
        id:
          type: string
        title:
          type: string
"##;

pub const EMPTY_SPEC: &str = r#"openapi: 3.0.3
info:
  title: Nothing here
  version: 1.0.0
paths: {}
"#;

/// A project directory with a config file and the given spec files
pub fn project(config: &str, specs: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(dir.path(), "haku.yml", config);
    for (name, content) in specs {
        write(dir.path(), &format!("specs/{name}"), content);
    }
    dir
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture dir");
    }
    std::fs::write(path, content).expect("Failed to write fixture");
}

pub fn read(root: &Path, relative: &str) -> String {
    std::fs::read_to_string(root.join(relative)).expect("Failed to read generated file")
}
