//! Host error sinks.
//!
//! A host process that mounts the service can register a
//! [`HostErrorSink`] to be told about every failed request. The sink is
//! injected at construction; a service without one is a valid
//! configuration.
//!
//! Reporting is best effort. Whatever a sink returns (or panics with) is
//! logged by the caller and never reaches the client.

use tokio::sync::mpsc;
use wafiq_types::ErrorReport;

/// Errors a sink can return when it cannot take a report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    /// The sink is at capacity and dropped the report.
    #[error("host error sink is full")]
    Full,

    /// The receiving side has gone away.
    #[error("host error sink is closed")]
    Closed,

    /// The sink refused the report.
    #[error("host error sink rejected the report: {0}")]
    Rejected(String),
}

/// Receiver of error reports on the host side.
pub trait HostErrorSink: Send + Sync {
    /// Deliver one report for the service identified by `app_id`.
    ///
    /// Called on the request path, so implementations must not block.
    fn report(&self, app_id: &str, report: &ErrorReport) -> Result<(), SinkError>;
}

impl<F> HostErrorSink for F
where
    F: Fn(&str, &ErrorReport) -> Result<(), SinkError> + Send + Sync,
{
    fn report(&self, app_id: &str, report: &ErrorReport) -> Result<(), SinkError> {
        self(app_id, report)
    }
}

/// A report as delivered by [`ChannelSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostNotification {
    /// Identifier of the service that failed.
    pub app_id: String,
    /// What failed.
    pub report: ErrorReport,
}

/// Sink that forwards reports over a bounded channel.
///
/// Never waits: a full channel drops the report with [`SinkError::Full`].
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<HostNotification>,
}

impl ChannelSink {
    /// Wrap an existing sender.
    pub const fn new(tx: mpsc::Sender<HostNotification>) -> Self {
        Self { tx }
    }

    /// Create a sink together with the receiver the host reads from.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<HostNotification>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }
}

impl HostErrorSink for ChannelSink {
    fn report(&self, app_id: &str, report: &ErrorReport) -> Result<(), SinkError> {
        let notification = HostNotification {
            app_id: app_id.to_owned(),
            report: report.clone(),
        };
        self.tx.try_send(notification).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SinkError::Full,
            mpsc::error::TrySendError::Closed(_) => SinkError::Closed,
        })
    }
}
