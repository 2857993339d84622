//! Host-boundary types shared by the command shim and delegated runtimes.
//!
//! These types are the "currency" of the plugin ABI: the tri-state result
//! the host understands, the opaque context handle it supplies, and the
//! single-entry-point contract every command implements. They intentionally
//! carry nothing host-specific; a concrete host adapter wraps its own
//! handle in [`HostContext`] and maps [`ResultCode`] onto its native codes.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tri-state command outcome returned up through the host ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultCode {
    /// The command completed; the host shows no error feedback.
    Succeeded,
    /// The command did not complete; the host shows its failure feedback.
    Failed,
    /// The command was cancelled by the user or the delegated runtime.
    Cancelled,
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResultCode::Succeeded => "succeeded",
            ResultCode::Failed => "failed",
            ResultCode::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Opaque handle the host passes to every command invocation.
///
/// The shim never inspects it. It is forwarded unmodified to the delegated
/// runtime, which downcasts via [`HostContext::as_any`] to the concrete
/// handle type it was built against.
pub trait HostContext: Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

/// Plugin-side invocation contract: one command, one entry point.
///
/// `message` is the host ABI's conventional out-slot for feedback text.
/// An `Err` return is deliberate: it is the channel by which unexpected
/// failures reach the host's own top-level error boundary instead of being
/// flattened into [`ResultCode::Failed`].
pub trait HostCommand {
    fn execute(
        &self,
        host: &dyn HostContext,
        message: &mut String,
    ) -> anyhow::Result<ResultCode>;
}
