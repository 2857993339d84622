//! Dynolite: a host-plugin command shim for CAD applications.
//!
//! One command, one job: when the host invokes it, launch the in-process
//! node-graph runtime against a workspace file baked in at registration
//! time. Modifier keys gate the dispatch: alt-click reveals the workspace
//! in the platform file manager instead of running it, ctrl-click forces the
//! runtime UI on. The runtime itself is late-bound: the shim carries no
//! compile-time dependency on it and recovers gracefully when it is absent
//! from the host process.
//!
//! Hosts embed the shim by constructing a [`LaunchCommand`] per registered
//! button and calling [`HostCommand::execute`] from their dispatch layer.

pub mod command;
pub mod input;
pub mod runtime;
pub mod ui;

pub use command::LaunchCommand;
pub use dynolite_core::options::LaunchOptions;
pub use dynolite_core::protocol::{HostCommand, HostContext, ResultCode};
pub use input::{InputState, ModifierState, SystemInput};
pub use runtime::{DelegateRuntime, ResolveError, RuntimeResolver};
pub use ui::{HostUi, SystemUi};
