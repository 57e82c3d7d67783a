//! Ends the session on the service side.

use meridian_wire::{Element, Result as WireResult};

use crate::operation::Operation;

/// Asks the service to invalidate the current ticket. Used by
/// [`crate::Client::close_session`]; the result carries no payload.
pub struct EndSession;

impl Operation for EndSession {
    type Output = ();

    fn function_name(&self) -> &'static str {
        "end_session"
    }

    fn build_payload(&self) -> WireResult<Vec<Element>> {
        Ok(Vec::new())
    }

    fn parse_value(&self, _data: Option<&Element>) -> WireResult<Self::Output> {
        Ok(())
    }
}
