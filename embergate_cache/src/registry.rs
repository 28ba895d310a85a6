use std::sync::Arc;

use embergate_api_types::DispatchPayload;

use crate::builder::Builder;
use crate::message::{build_api_message, ApiMessage};
use crate::snapshot::Snapshot;

/// The closed mapping from dispatch event to `{handler, api_message_factory}`.
/// The payload decoder itself is `DispatchPayload::decode` in the wire
/// codec; this registry owns the two remaining concerns as exhaustive
/// `match` statements over the already-decoded, closed `DispatchPayload`
/// enum rather than a runtime lookup table, since the event catalog is
/// closed and the compiler can check every arm is handled.
pub struct Registry;

impl Registry {
    /// Applies `payload` to `prev`, producing the next snapshot and the API
    /// message (if any) this dispatch yields.
    pub fn apply(prev: &Arc<Snapshot>, payload: &DispatchPayload) -> (Arc<Snapshot>, Option<ApiMessage>) {
        let mut builder = Builder::from_snapshot(prev);
        crate::handlers::apply_dispatch(&mut builder, payload);
        let curr = Arc::new(builder.finalize());

        let message = build_api_message(payload, prev, &curr);
        (curr, message)
    }
}
