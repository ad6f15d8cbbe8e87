pub mod ast;
pub mod error;
pub mod highlight;
pub mod interaction;
pub mod layout;
pub mod measure;
pub mod scene;
pub mod session;
pub mod sql;
pub mod style;

use wasm_bindgen::prelude::*;

pub use error::Error;
pub use scene::{Scene, SceneConfig};
pub use sql::parse_ddl;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Parse DDL source into schema JSON
#[wasm_bindgen(js_name = "ddlToSchema")]
pub fn ddl_to_schema(source: &str) -> Result<String, String> {
    let schema = parse_ddl(source);
    serde_json::to_string_pretty(&schema).map_err(|e| e.to_string())
}

/// Parse and lay out DDL source, returning scene JSON
#[wasm_bindgen(js_name = "ddlToScene")]
pub fn ddl_to_scene(source: &str) -> Result<String, String> {
    let scene = Scene::build(parse_ddl(source), SceneConfig::default());
    scene.to_json().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ddl_to_schema() {
        let json = ddl_to_schema("CREATE TABLE users (id INT PRIMARY KEY);").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tables"][0]["name"], "users");
        assert_eq!(value["tables"][0]["columns"][0]["type"], "INT");
        assert_eq!(value["tables"][0]["columns"][0]["is_primary"], true);
        assert_eq!(value["tables"][0]["primary_keys"][0], "id");
    }

    #[test]
    fn test_ddl_to_scene_empty() {
        let json = ddl_to_scene("no tables here").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tables"].as_array().map(Vec::len), Some(0));
        assert_eq!(value["links"].as_array().map(Vec::len), Some(0));
    }
}
