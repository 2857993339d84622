//! Launch options handed to the delegated runtime.
//!
//! The runtime's driver contract takes an ordered mapping of string options.
//! The key set is fixed at build time; a bundle is built fresh for each
//! invocation, never mutated, and consumed exactly once by the delegation
//! call.

use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Path of the workspace file the runtime should open.
pub const KEY_WORKSPACE_PATH: &str = "workspacePath";
/// Whether the runtime shows its UI ("false" runs headless).
pub const KEY_SHOW_UI: &str = "showUI";
/// Automation mode: the runtime executes on the calling thread without its
/// idle loop.
pub const KEY_AUTOMATION_MODE: &str = "automationMode";
/// Whether the opened workspace is executed immediately. In automation mode
/// the runtime executes regardless of this key.
pub const KEY_EXECUTE_ON_OPEN: &str = "executeOnOpen";
/// Whether a UI-less model left over from a prior run is shut down first.
/// Costs a noticeable slowdown but guarantees a clean model.
pub const KEY_SHUTDOWN_PRIOR_MODEL: &str = "shutdownPriorModel";

/// Immutable, insertion-ordered option bundle for one delegated launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    entries: Vec<(&'static str, String)>,
}

impl LaunchOptions {
    /// Build the bundle for one workspace launch. `show_ui` is the already
    /// computed flag; the remaining values are fixed.
    pub fn for_workspace(workspace: &Path, show_ui: bool) -> Self {
        let entries = vec![
            (KEY_WORKSPACE_PATH, workspace.to_string_lossy().into_owned()),
            (KEY_SHOW_UI, show_ui.to_string()),
            (KEY_AUTOMATION_MODE, true.to_string()),
            (KEY_EXECUTE_ON_OPEN, true.to_string()),
            (KEY_SHUTDOWN_PRIOR_MODEL, true.to_string()),
        ];
        Self { entries }
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[(&'static str, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as a map in insertion order (derive would require a map type
// that does not preserve it).
impl Serialize for LaunchOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn bundle_has_exactly_the_fixed_keys_in_order() {
        let opts = LaunchOptions::for_workspace(&PathBuf::from("/g/graph.dyn"), false);
        let keys: Vec<&str> = opts.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                KEY_WORKSPACE_PATH,
                KEY_SHOW_UI,
                KEY_AUTOMATION_MODE,
                KEY_EXECUTE_ON_OPEN,
                KEY_SHUTDOWN_PRIOR_MODEL,
            ]
        );
    }

    #[test]
    fn fixed_values_and_workspace_path() {
        let opts = LaunchOptions::for_workspace(&PathBuf::from("/g/graph.dyn"), true);
        assert_eq!(opts.get(KEY_WORKSPACE_PATH), Some("/g/graph.dyn"));
        assert_eq!(opts.get(KEY_SHOW_UI), Some("true"));
        assert_eq!(opts.get(KEY_AUTOMATION_MODE), Some("true"));
        assert_eq!(opts.get(KEY_EXECUTE_ON_OPEN), Some("true"));
        assert_eq!(opts.get(KEY_SHUTDOWN_PRIOR_MODEL), Some("true"));
        assert_eq!(opts.len(), 5);
    }

    #[test]
    fn serializes_in_insertion_order() {
        let opts = LaunchOptions::for_workspace(&PathBuf::from("g.dyn"), false);
        let json = serde_json::to_string(&opts).unwrap();
        let ws = json.find(KEY_WORKSPACE_PATH).unwrap();
        let show = json.find(KEY_SHOW_UI).unwrap();
        let shutdown = json.find(KEY_SHUTDOWN_PRIOR_MODEL).unwrap();
        assert!(ws < show && show < shutdown);
    }
}
