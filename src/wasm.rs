//! WASM entry points for the browser editor.

use wasm_bindgen::prelude::*;

use crate::compile::{self, CompiledWorkflow};
use crate::error::{Diagnostic, Kind};
use crate::model::{self, Node};
use crate::validate::{self, ValidationResult};

/// Validate a workflow snapshot JSON.
/// Returns a `ValidationResult` object.
#[wasm_bindgen]
pub fn validate_workflow(json: &str) -> JsValue {
    let result = validate_workflow_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_workflow_inner(json: &str) -> ValidationResult {
    match model::parse_snapshot(json) {
        Ok(snapshot) => validate::validate_snapshot(&snapshot).into_result(),
        Err(e) => ValidationResult {
            is_valid: false,
            errors: vec![parse_error(format!("Failed to parse workflow JSON: {}", e)).to_string()],
            warnings: vec![],
        },
    }
}

/// Validate a single node JSON (configuration only).
/// Returns a JSON array of diagnostics.
#[wasm_bindgen]
pub fn validate_node(node_json: &str) -> JsValue {
    let result = validate_node_inner(node_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_node_inner(node_json: &str) -> Vec<Diagnostic> {
    match serde_json::from_str::<Node>(node_json) {
        Ok(node) => validate::validate_node(&node),
        Err(e) => vec![parse_error(format!("Failed to parse node JSON: {}", e))],
    }
}

/// Compile a published workflow snapshot JSON.
/// Returns an object with either `workflow` (success) or `errors` (failure).
#[wasm_bindgen]
pub fn compile_workflow(json: &str) -> JsValue {
    let result = compile_workflow_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn compile_workflow_inner(json: &str) -> CompileResult {
    let snapshot = match model::parse_snapshot(json) {
        Ok(s) => s,
        Err(e) => {
            let error = parse_error(format!("Failed to parse workflow JSON: {}", e));
            return CompileResult::Errors { errors: vec![error.to_string()] };
        }
    };

    match compile::compile_snapshot(&snapshot) {
        Ok(workflow) => CompileResult::Success { workflow },
        Err(e) => CompileResult::Errors { errors: vec![e.to_string()] },
    }
}

fn parse_error(message: String) -> Diagnostic {
    Diagnostic::new("P001", Kind::Parse, message)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum CompileResult {
    #[serde(rename = "success")]
    Success { workflow: CompiledWorkflow },
    #[serde(rename = "errors")]
    Errors { errors: Vec<String> },
}
