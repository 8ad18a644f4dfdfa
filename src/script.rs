//! Script-dispatch boundary.
//!
//! The automation layer drives the client by handing it fully pre-encoded
//! script command strings. Delivery is fire-and-forget: there is no return
//! value and no acknowledgment, only an optional reply-target handle the
//! client may message back on. The transport itself (window messaging on
//! the client's platform) lives outside this crate; [`ScriptSink`] is the
//! seam it plugs into.

/// Opaque handle identifying where the client should deliver a reply.
///
/// Callers that cannot process replies pass `None` instead; the result of
/// the dispatched script is then discarded by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyHandle(pub usize);

/// Destination for pre-encoded script command strings.
pub trait ScriptSink {
    /// Hand one command string to the client. Fire-and-forget.
    fn send(&mut self, script: &str, reply_to: Option<ReplyHandle>);
}

/// Sink that records every dispatched command, for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Commands in dispatch order.
    pub sent: Vec<String>,
}

impl ScriptSink for RecordingSink {
    fn send(&mut self, script: &str, _reply_to: Option<ReplyHandle>) {
        self.sent.push(script.to_owned());
    }
}
