//! The launch command: modifier-gated dispatch with late-bound delegation.
//!
//! One invocation is one straight-line decision sequence, fully synchronous
//! on the host's calling thread:
//!
//! 1. snapshot the modifier keys;
//! 2. alt held → reveal the workspace in the file manager and stop;
//! 3. compute the show-UI flag (ctrl forces it on, otherwise the workspace
//!    file decides);
//! 4. build the launch options;
//! 5. resolve the runtime driver by name and hand the run over, passing the
//!    host handle through untouched.
//!
//! The only failure handled here is the runtime module being absent; every
//! other error travels up to the host's own error boundary.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use dynolite_core::observability;
use dynolite_core::options::LaunchOptions;
use dynolite_core::protocol::{HostCommand, HostContext, ResultCode};
use dynolite_core::workspace;

use crate::input::{InputState, SystemInput};
use crate::runtime::{self, HostProcessResolver, ResolveError, RuntimeResolver};
use crate::ui::{HostUi, SystemUi};

const MISSING_RUNTIME_TITLE: &str = "Dynolite";
const MISSING_RUNTIME_ADVICE: &str = "Cannot find the node-graph runtime installation \
or determine which version to run.\n\nRun the runtime once to select the active version.";

/// Command handler for one registered workspace button.
///
/// The workspace path is baked in when the host registers the command; the
/// capabilities default to the system implementations and are injectable for
/// hosts with their own UI service (and for tests).
pub struct LaunchCommand {
    workspace_path: PathBuf,
    input: Arc<dyn InputState>,
    ui: Arc<dyn HostUi>,
    resolver: Arc<dyn RuntimeResolver>,
}

impl LaunchCommand {
    pub fn new(workspace_path: impl Into<PathBuf>) -> Self {
        Self::with_services(
            workspace_path,
            Arc::new(SystemInput),
            Arc::new(SystemUi),
            Arc::new(HostProcessResolver),
        )
    }

    pub fn with_services(
        workspace_path: impl Into<PathBuf>,
        input: Arc<dyn InputState>,
        ui: Arc<dyn HostUi>,
        resolver: Arc<dyn RuntimeResolver>,
    ) -> Self {
        Self {
            workspace_path: workspace_path.into(),
            input,
            ui,
            resolver,
        }
    }

    pub fn workspace_path(&self) -> &Path {
        &self.workspace_path
    }
}

impl HostCommand for LaunchCommand {
    fn execute(
        &self,
        host: &dyn HostContext,
        _message: &mut String,
    ) -> anyhow::Result<ResultCode> {
        let mods = self.input.modifiers();

        // Alt-click is a pure escape hatch: show the file, never run it.
        if mods.alt {
            self.ui
                .reveal(&self.workspace_path)
                .context("failed to open the file manager")?;
            return Ok(ResultCode::Succeeded);
        }

        // Ctrl forces the UI on without touching the file.
        let show_ui = mods.ctrl || workspace::default_show_ui(&self.workspace_path);
        let options = LaunchOptions::for_workspace(&self.workspace_path, show_ui);
        let workspace_str = self.workspace_path.to_string_lossy();

        let driver = match self
            .resolver
            .resolve(runtime::RUNTIME_MODULE, runtime::RUNTIME_DRIVER)
        {
            Ok(driver) => driver,
            Err(ResolveError::ModuleNotFound { module }) => {
                observability::audit_runtime_missing(&workspace_str, &module);
                self.ui.alert(MISSING_RUNTIME_TITLE, MISSING_RUNTIME_ADVICE);
                return Ok(ResultCode::Failed);
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(workspace = %workspace_str, show_ui, "delegating workspace execution");
        observability::audit_launch_attempted(&workspace_str, &options);
        let started = Instant::now();
        let result = driver.execute(&options, host)?;
        observability::audit_launch_completed(
            &workspace_str,
            result,
            started.elapsed().as_millis() as u64,
        );
        Ok(result)
    }
}
