//! Request and response envelopes.
//!
//! One request document carries one optional authentication block (absent
//! only for the session-open call) and one content block holding the
//! ordered function blocks, each tagged with a position-derived control
//! id. The response mirrors it: one outer status, then an ordered list of
//! result blocks whose count and order match the submitted functions when
//! the outer status is success. Correlation is strictly positional:
//! function names may repeat within one batch, so names can never pair a
//! result with its operation.

use meridian_wire::Element;

use crate::error::{ClientError, RemoteError};

/// Error codes that mean the session ticket is no longer usable.
const INVALID_TICKET_CODES: [&str; 2] = ["sessionExpired", "invalidSession"];

/// One function block of a request: a remote function name plus its
/// payload, tagged with the control id derived from its position.
pub(crate) struct FunctionCall {
    pub control_id: String,
    pub name: String,
    pub payload: Vec<Element>,
}

/// Derives the control id for the operation at `index`.
pub(crate) fn control_id(index: usize) -> String {
    format!("op-{index}")
}

/// Assembles the outer request document.
pub(crate) fn build_request(ticket: Option<&str>, calls: Vec<FunctionCall>) -> Element {
    let mut children = Vec::new();
    if let Some(ticket) = ticket {
        children.push(Element::parent(
            "authentication",
            vec![Element::text("sessionid", ticket)],
        ));
    }
    let functions = calls
        .into_iter()
        .map(|call| {
            Element::parent("function", vec![Element::parent(call.name, call.payload)])
                .with_attribute("controlid", call.control_id)
        })
        .collect();
    children.push(Element::parent("content", functions));
    Element::parent("request", children)
}

/// One per-operation result block of a response.
#[derive(Debug, Clone)]
pub struct ResultBlock {
    element: Element,
    success: bool,
    errors: Vec<RemoteError>,
    warnings: Vec<String>,
}

impl ResultBlock {
    fn from_element(element: &Element) -> Result<Self, ClientError> {
        Ok(ResultBlock {
            success: parse_status(element, "result block")?,
            errors: parse_errors(element),
            warnings: parse_warnings(element),
            element: element.clone(),
        })
    }

    /// The control id echoed by the service, if any. Correlation does not
    /// rely on it; it exists for diagnostics.
    pub fn control_id(&self) -> Option<&str> {
        self.element.attr("controlid")
    }

    /// Whether this operation's own status was success.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Remote error descriptors for a rejected operation.
    pub fn errors(&self) -> &[RemoteError] {
        &self.errors
    }

    /// Non-fatal warnings attached to the result.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The payload element for the operation's parser: the single element
    /// inside `<data>`.
    pub fn data(&self) -> Option<&Element> {
        self.element
            .child("data")
            .and_then(|data| data.children().first())
    }

    /// A top-level text field of the block, such as the operation's
    /// declared primary result key.
    pub fn field_text(&self, name: &str) -> Option<&str> {
        self.element.child_text(name)
    }
}

/// The transport-level parse of a response document.
#[derive(Debug)]
pub(crate) struct ResponseEnvelope {
    pub success: bool,
    pub errors: Vec<RemoteError>,
    pub blocks: Vec<ResultBlock>,
}

impl ResponseEnvelope {
    pub(crate) fn from_document(document: &Element) -> Result<Self, ClientError> {
        if document.name() != "response" {
            return Err(ClientError::ProtocolMismatch {
                message: format!("expected <response> root, found <{}>", document.name()),
            });
        }
        let success = parse_status(document, "response")?;
        let blocks = match document.child("results") {
            Some(results) => results
                .children()
                .iter()
                .filter(|child| child.name() == "result")
                .map(ResultBlock::from_element)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        Ok(ResponseEnvelope {
            success,
            errors: parse_errors(document),
            blocks,
        })
    }

    /// Whether an envelope-level rejection names an expired or invalid
    /// ticket.
    pub(crate) fn indicates_invalid_ticket(&self) -> bool {
        self.errors
            .iter()
            .any(|error| INVALID_TICKET_CODES.contains(&error.code.as_str()))
    }
}

/// Reads the `<status>` child of `element`. A missing or unrecognized
/// status means the response cannot be trusted at all.
fn parse_status(element: &Element, context: &str) -> Result<bool, ClientError> {
    match element.child_text("status") {
        Some("success") => Ok(true),
        Some("failure") => Ok(false),
        Some(other) => Err(ClientError::ProtocolMismatch {
            message: format!("{context} has unrecognized status {other:?}"),
        }),
        None => Err(ClientError::ProtocolMismatch {
            message: format!("{context} is missing its status"),
        }),
    }
}

fn parse_errors(element: &Element) -> Vec<RemoteError> {
    let Some(container) = element.child("errormessage") else {
        return Vec::new();
    };
    container
        .children()
        .iter()
        .filter(|child| child.name() == "error")
        .map(|error| RemoteError {
            code: error.child_text("errorno").unwrap_or_default().to_string(),
            message: error
                .child_text("description")
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}

fn parse_warnings(element: &Element) -> Vec<String> {
    let Some(container) = element.child("warnings") else {
        return Vec::new();
    };
    container
        .children()
        .iter()
        .filter(|child| child.name() == "warning")
        .filter_map(Element::text_value)
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_wire::parse_str;

    #[test]
    fn test_build_request_shape() {
        let request = build_request(
            Some("ticket-9"),
            vec![
                FunctionCall {
                    control_id: control_id(0),
                    name: "create_gltransaction".to_string(),
                    payload: vec![Element::text("journalid", "GJ")],
                },
                FunctionCall {
                    control_id: control_id(1),
                    name: "get_gltransaction".to_string(),
                    payload: vec![Element::text("key", "77")],
                },
            ],
        );

        assert_eq!(request.name(), "request");
        let auth = request.child("authentication").unwrap();
        assert_eq!(auth.child_text("sessionid"), Some("ticket-9"));

        let content = request.child("content").unwrap();
        let functions = content.children();
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].attr("controlid"), Some("op-0"));
        assert_eq!(functions[1].attr("controlid"), Some("op-1"));
        assert_eq!(functions[0].children()[0].name(), "create_gltransaction");
        assert_eq!(functions[1].children()[0].name(), "get_gltransaction");
    }

    #[test]
    fn test_session_open_request_has_no_authentication_block() {
        let request = build_request(
            None,
            vec![FunctionCall {
                control_id: "auth".to_string(),
                name: "get_session".to_string(),
                payload: vec![Element::text("userid", "u")],
            }],
        );
        assert!(request.child("authentication").is_none());
        assert!(request.child("content").is_some());
    }

    #[test]
    fn test_parse_response_with_mixed_results() {
        let document = parse_str(
            r#"<response>
                 <status>success</status>
                 <results>
                   <result controlid="op-0">
                     <status>success</status>
                     <key>101</key>
                     <data><gltransaction><journalid>GJ</journalid></gltransaction></data>
                   </result>
                   <result controlid="op-1">
                     <status>failure</status>
                     <errormessage>
                       <error><errorno>PL05000053</errorno><description>Credits do not equal debits</description></error>
                     </errormessage>
                     <warnings><warning>posting period nearly closed</warning></warnings>
                   </result>
                 </results>
               </response>"#,
        )
        .unwrap();

        let envelope = ResponseEnvelope::from_document(&document).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.blocks.len(), 2);

        let first = &envelope.blocks[0];
        assert!(first.success());
        assert_eq!(first.control_id(), Some("op-0"));
        assert_eq!(first.field_text("key"), Some("101"));
        assert_eq!(first.data().unwrap().name(), "gltransaction");

        let second = &envelope.blocks[1];
        assert!(!second.success());
        assert_eq!(second.errors()[0].code, "PL05000053");
        assert_eq!(second.warnings(), ["posting period nearly closed"]);
    }

    #[test]
    fn test_missing_outer_status_is_a_mismatch() {
        let document = parse_str("<response><results/></response>").unwrap();
        assert!(matches!(
            ResponseEnvelope::from_document(&document),
            Err(ClientError::ProtocolMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_ticket_detection() {
        let document = parse_str(
            r#"<response>
                 <status>failure</status>
                 <errormessage>
                   <error><errorno>sessionExpired</errorno><description>Session has expired</description></error>
                 </errormessage>
               </response>"#,
        )
        .unwrap();
        let envelope = ResponseEnvelope::from_document(&document).unwrap();
        assert!(!envelope.success);
        assert!(envelope.indicates_invalid_ticket());
    }
}
