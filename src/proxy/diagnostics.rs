// Diagnostics collaborator
// Structured events from the forwarder, decoupled from response construction

/// One observable step of a forwarding call. Credential values are never included.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEvent {
    PreconditionRejected {
        resource: &'static str,
        status: u16,
        reason: String,
    },
    AttemptCompleted {
        resource: &'static str,
        attempt: usize,
        status: u16,
    },
    CredentialFallback {
        resource: &'static str,
        rejected_status: u16,
    },
    TransportFault {
        resource: &'static str,
        attempt: usize,
        error: String,
    },
}

pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: GatewayEvent);
}

/// Default sink: everything goes to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: GatewayEvent) {
        match event {
            GatewayEvent::PreconditionRejected {
                resource,
                status,
                reason,
            } => {
                tracing::info!(resource, status, "Rejected before upstream: {}", reason);
            }
            GatewayEvent::AttemptCompleted {
                resource,
                attempt,
                status,
            } => {
                tracing::debug!(resource, attempt, status, "Upstream attempt completed");
            }
            GatewayEvent::CredentialFallback {
                resource,
                rejected_status,
            } => {
                tracing::warn!(
                    resource,
                    rejected_status,
                    "Upstream rejected primary credential form, retrying with alternate"
                );
            }
            GatewayEvent::TransportFault {
                resource,
                attempt,
                error,
            } => {
                tracing::error!(resource, attempt, "Upstream transport failure: {}", error);
            }
        }
    }
}
