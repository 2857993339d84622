//! Late-bound delegation to the node-graph runtime.
//!
//! The shim must call into a runtime that may or may not be present in the
//! host process, without ever linking against it. It codes purely against
//! the [`DelegateRuntime`] trait and obtains an implementation at invocation
//! time through a [`RuntimeResolver`]. The default resolver looks drivers up
//! by name in a process-wide registry that runtime modules populate when the
//! host loads them; the shim performs no loading of its own.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use dynolite_core::options::LaunchOptions;
use dynolite_core::protocol::{HostContext, ResultCode};
use thiserror::Error;

/// Module name the shim resolves at invocation time. Fixed at build time.
pub const RUNTIME_MODULE: &str = "dynamo_host";
/// Driver type the module is expected to export. Fixed at build time.
pub const RUNTIME_DRIVER: &str = "DynamoHostApp";

/// Execution capability exported by a loaded runtime module.
pub trait DelegateRuntime: Send + Sync {
    /// Run the workspace described by `options` against the host handle.
    /// Blocks until the run completes; the returned code goes back to the
    /// host unchanged.
    fn execute(
        &self,
        options: &LaunchOptions,
        host: &dyn HostContext,
    ) -> anyhow::Result<ResultCode>;
}

/// Errors from driver resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The runtime module is not loaded in the host process. The one
    /// expected failure: the shim recovers with an advisory and `Failed`.
    #[error("runtime module '{module}' is not loaded in the host process")]
    ModuleNotFound { module: String },

    /// The module is loaded but exports no driver under the requested name.
    /// Not recoverable here; surfaces at the host's error boundary.
    #[error("runtime module '{module}' exports no driver '{driver}'")]
    DriverMissing { module: String, driver: String },
}

/// Capability for locating a driver by module and driver name.
pub trait RuntimeResolver: Send + Sync {
    fn resolve(
        &self,
        module: &str,
        driver: &str,
    ) -> Result<Arc<dyn DelegateRuntime>, ResolveError>;
}

type DriverMap = HashMap<String, HashMap<String, Arc<dyn DelegateRuntime>>>;

fn registry() -> &'static RwLock<DriverMap> {
    static REGISTRY: OnceLock<RwLock<DriverMap>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Publish a driver under `module`/`driver`. Called by a runtime module when
/// the host loads it; re-registration replaces the previous driver.
pub fn register_driver(module: &str, driver: &str, rt: Arc<dyn DelegateRuntime>) {
    let mut reg = registry().write().unwrap_or_else(|e| e.into_inner());
    reg.entry(module.to_string())
        .or_default()
        .insert(driver.to_string(), rt);
    tracing::debug!(module, driver, "runtime driver registered");
}

/// Drop every driver published under `module` (module unload).
pub fn unregister_module(module: &str) {
    let mut reg = registry().write().unwrap_or_else(|e| e.into_inner());
    reg.remove(module);
}

/// Resolves drivers against the in-process registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostProcessResolver;

impl RuntimeResolver for HostProcessResolver {
    fn resolve(
        &self,
        module: &str,
        driver: &str,
    ) -> Result<Arc<dyn DelegateRuntime>, ResolveError> {
        let reg = registry().read().unwrap_or_else(|e| e.into_inner());
        let drivers = reg.get(module).ok_or_else(|| ResolveError::ModuleNotFound {
            module: module.to_string(),
        })?;
        drivers
            .get(driver)
            .cloned()
            .ok_or_else(|| ResolveError::DriverMissing {
                module: module.to_string(),
                driver: driver.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRuntime(ResultCode);

    impl DelegateRuntime for FixedRuntime {
        fn execute(
            &self,
            _options: &LaunchOptions,
            _host: &dyn HostContext,
        ) -> anyhow::Result<ResultCode> {
            Ok(self.0)
        }
    }

    struct NoContext;

    impl HostContext for NoContext {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    // The registry is process-wide, so each test owns a unique module name.

    #[test]
    fn registered_driver_resolves() {
        register_driver("test_mod_resolve", "Drv", Arc::new(FixedRuntime(ResultCode::Succeeded)));
        let rt = HostProcessResolver
            .resolve("test_mod_resolve", "Drv")
            .unwrap();
        let opts = LaunchOptions::for_workspace(std::path::Path::new("g.dyn"), false);
        assert_eq!(rt.execute(&opts, &NoContext).unwrap(), ResultCode::Succeeded);
    }

    #[test]
    fn unknown_module_is_module_not_found() {
        let err = match HostProcessResolver.resolve("test_mod_absent", "Drv") {
            Ok(_) => panic!("expected resolve to fail"),
            Err(e) => e,
        };
        assert!(matches!(err, ResolveError::ModuleNotFound { .. }));
    }

    #[test]
    fn known_module_unknown_driver_is_driver_missing() {
        register_driver("test_mod_partial", "Drv", Arc::new(FixedRuntime(ResultCode::Succeeded)));
        let err = match HostProcessResolver.resolve("test_mod_partial", "Other") {
            Ok(_) => panic!("expected resolve to fail"),
            Err(e) => e,
        };
        assert!(matches!(err, ResolveError::DriverMissing { .. }));
    }

    #[test]
    fn unregistered_module_stops_resolving() {
        register_driver("test_mod_unload", "Drv", Arc::new(FixedRuntime(ResultCode::Succeeded)));
        unregister_module("test_mod_unload");
        let err = match HostProcessResolver.resolve("test_mod_unload", "Drv") {
            Ok(_) => panic!("expected resolve to fail"),
            Err(e) => e,
        };
        assert!(matches!(err, ResolveError::ModuleNotFound { .. }));
    }
}
