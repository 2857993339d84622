//! Workspace file inspection.
//!
//! Workspaces exist in two incompatible serializations: newer files are a
//! JSON document with a top-level `Nodes` array, older files are XML with
//! one element per node. The shim needs exactly one fact out of either: the
//! value of the boolean input node nicknamed [`SHOW_UI_NICKNAME`], which
//! authors use to request a visible run. Everything else in the file is the
//! delegated runtime's business and is not modeled here.
//!
//! Every failure path (unreadable file, unrecognized format, malformed
//! content, node absent, unparsable value) answers `false`: a headless run.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// Nickname of the boolean input node that requests a visible run.
pub const SHOW_UI_NICKNAME: &str = "ShowDynamo";

/// Node type that backs boolean inputs, in both serializations.
const BOOL_SELECTOR_TYPE: &str = "BoolSelector";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkspaceFormat {
    /// Newer serialization: one JSON document.
    Json,
    /// Older serialization: one XML document.
    LegacyXml,
}

/// Decide the default show-UI flag for a workspace file.
///
/// Returns the value of the `"ShowDynamo"` boolean input node if the file
/// contains one, `false` otherwise. Never errors: a workspace this function
/// cannot read is simply run headless.
pub fn default_show_ui(path: &Path) -> bool {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "workspace not readable, defaulting to headless");
            return false;
        }
    };
    match sniff_format(&content) {
        Some(WorkspaceFormat::Json) => show_ui_from_json(&content).unwrap_or(false),
        Some(WorkspaceFormat::LegacyXml) => show_ui_from_legacy_xml(&content).unwrap_or(false),
        None => false,
    }
}

/// First non-whitespace byte decides the serialization.
fn sniff_format(content: &str) -> Option<WorkspaceFormat> {
    match content.trim_start().as_bytes().first()? {
        b'{' => Some(WorkspaceFormat::Json),
        b'<' => Some(WorkspaceFormat::LegacyXml),
        _ => None,
    }
}

fn show_ui_from_json(content: &str) -> Option<bool> {
    let doc: serde_json::Value = serde_json::from_str(content).ok()?;
    let nodes = doc.get("Nodes")?.as_array()?;
    for node in nodes {
        let concrete = node
            .get("ConcreteType")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        if !concrete.contains(BOOL_SELECTOR_TYPE) {
            continue;
        }
        if node.get("Name").and_then(|v| v.as_str()) != Some(SHOW_UI_NICKNAME) {
            continue;
        }
        return match node.get("InputValue") {
            Some(serde_json::Value::Bool(b)) => Some(*b),
            Some(serde_json::Value::String(s)) => parse_bool(s),
            _ => None,
        };
    }
    None
}

// The flagged element is located textually; first match wins.
fn show_ui_from_legacy_xml(content: &str) -> Option<bool> {
    static ELEMENT_RE: OnceLock<Regex> = OnceLock::new();
    let re = ELEMENT_RE.get_or_init(|| {
        Regex::new(
            r#"(?s)<CoreNodeModels\.Input\.BoolSelector\b[^>]*\bnickname="ShowDynamo"[^>]*>.*?<System\.Boolean>\s*([A-Za-z]+)\s*</System\.Boolean>"#,
        )
        .expect("legacy workspace regex is valid")
    });
    let caps = re.captures(content)?;
    parse_bool(caps.get(1)?.as_str())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn workspace_file(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    fn json_workspace(name: &str, input_value: &str) -> String {
        format!(
            r#"{{
  "Uuid": "3c9d0464-8643-5ffe-96e5-ab1769818209",
  "Name": "demo",
  "Nodes": [
    {{
      "ConcreteType": "CoreNodeModels.Input.DoubleSlider, CoreNodeModels",
      "Name": "height",
      "InputValue": 4.5
    }},
    {{
      "ConcreteType": "CoreNodeModels.Input.BoolSelector, CoreNodeModels",
      "Name": "{name}",
      "InputValue": {input_value}
    }}
  ]
}}"#
        )
    }

    #[test]
    fn json_flagged_node_true() {
        let f = workspace_file(&json_workspace(SHOW_UI_NICKNAME, "true"));
        assert!(default_show_ui(f.path()));
    }

    #[test]
    fn json_flagged_node_false() {
        let f = workspace_file(&json_workspace(SHOW_UI_NICKNAME, "false"));
        assert!(!default_show_ui(f.path()));
    }

    #[test]
    fn json_string_valued_flag() {
        let f = workspace_file(&json_workspace(SHOW_UI_NICKNAME, "\"True\""));
        assert!(default_show_ui(f.path()));
    }

    #[test]
    fn json_without_flagged_node_is_headless() {
        let f = workspace_file(&json_workspace("SomethingElse", "true"));
        assert!(!default_show_ui(f.path()));
    }

    #[test]
    fn legacy_xml_flagged_node_true() {
        let xml = r#"<Workspace Version="1.3.2" X="0" Y="0">
  <Elements>
    <CoreNodeModels.Input.BoolSelector guid="a1" nickname="ShowDynamo" isVisible="true">
      <System.Boolean>True</System.Boolean>
    </CoreNodeModels.Input.BoolSelector>
  </Elements>
</Workspace>"#;
        let f = workspace_file(xml);
        assert!(default_show_ui(f.path()));
    }

    #[test]
    fn legacy_xml_flagged_node_false() {
        let xml = r#"<Workspace Version="1.3.2">
  <Elements>
    <CoreNodeModels.Input.BoolSelector guid="a1" nickname="ShowDynamo">
      <System.Boolean>False</System.Boolean>
    </CoreNodeModels.Input.BoolSelector>
  </Elements>
</Workspace>"#;
        let f = workspace_file(xml);
        assert!(!default_show_ui(f.path()));
    }

    #[test]
    fn legacy_xml_other_nickname_is_headless() {
        let xml = r#"<Workspace>
  <CoreNodeModels.Input.BoolSelector guid="a1" nickname="RunIt">
    <System.Boolean>True</System.Boolean>
  </CoreNodeModels.Input.BoolSelector>
</Workspace>"#;
        let f = workspace_file(xml);
        assert!(!default_show_ui(f.path()));
    }

    #[test]
    fn malformed_json_is_headless() {
        let f = workspace_file("{ \"Nodes\": [ truncated");
        assert!(!default_show_ui(f.path()));
    }

    #[test]
    fn unrecognized_format_is_headless() {
        let f = workspace_file("not a workspace at all");
        assert!(!default_show_ui(f.path()));
    }

    #[test]
    fn missing_file_is_headless() {
        assert!(!default_show_ui(Path::new("/nonexistent/graph.dyn")));
    }
}
