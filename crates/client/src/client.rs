//! The caller-facing client: session opening and batch execution.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use meridian_wire::{Element, parse_document, render_document};

use crate::config::{ClientConfig, Credential};
use crate::envelope::{self, FunctionCall, ResponseEnvelope};
use crate::error::{ClientError, Result};
use crate::operation::{BatchOperation, ErasedResult, Operation, OperationResult};
use crate::operations::EndSession;
use crate::session::{Session, SessionData, SessionStatus};
use crate::transport::Transport;

/// Remote function that exchanges credentials for a session ticket.
const GET_SESSION_FUNCTION: &str = "get_session";

/// The demultiplexed outcome of one batch.
///
/// `overall_success` reports the envelope outcome: the batch was accepted
/// and processed. Individual operations report their own acceptance on
/// their [`OperationResult`] - a successful batch can still contain
/// per-operation rejections, so callers must check both levels before
/// trusting a value.
#[derive(Debug)]
pub struct ServiceResponse {
    pub overall_success: bool,
    /// One result per submitted operation, in submission order. Values
    /// are type-erased because one batch may mix output types; recover
    /// them with [`ErasedResult::downcast`].
    pub results: Vec<ErasedResult>,
}

impl ServiceResponse {
    /// Whether every operation in the batch was accepted.
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(OperationResult::success)
    }
}

/// A client for the accounting service, generic over its transport.
pub struct Client<T: Transport> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> Client<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Client { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Creates a session and authenticates it in one step.
    pub async fn open_session(
        &self,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> Result<Session> {
        let session = Session::new();
        self.authenticate(&session, credential, cancel).await?;
        Ok(session)
    }

    /// Drives an [`SessionStatus::Uninitiated`] session through
    /// authentication.
    ///
    /// On remote rejection the session ends up `Failed`; on cancellation
    /// or transport failure it returns to `Uninitiated` and may be
    /// retried.
    pub async fn authenticate(
        &self,
        session: &Session,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> Result<()> {
        session.begin_authentication()?;
        match self.request_session(credential, cancel).await {
            Ok(data) => {
                debug!(endpoint = %data.endpoint, "session active");
                session.activate(data);
                Ok(())
            }
            Err(err) => {
                match &err {
                    ClientError::Authentication { .. } => session.fail_authentication(),
                    _ => session.cancel_authentication(),
                }
                warn!(error = %err, "session open failed");
                Err(err)
            }
        }
    }

    async fn request_session(
        &self,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> Result<SessionData> {
        let payload = vec![
            Element::text("userid", &credential.user_id),
            Element::text("companyid", &credential.company_id),
            Element::text("password", credential.password()),
        ];
        let calls = vec![FunctionCall {
            control_id: "auth".to_string(),
            name: GET_SESSION_FUNCTION.to_string(),
            payload,
        }];
        let document = envelope::build_request(None, calls);

        let envelope = self.exchange(&self.config.endpoint, &document, cancel).await?;
        if !envelope.success {
            return Err(ClientError::Authentication {
                errors: envelope.errors,
            });
        }
        if envelope.blocks.len() != 1 {
            return Err(ClientError::ProtocolMismatch {
                message: format!(
                    "session open expects 1 result block, received {}",
                    envelope.blocks.len()
                ),
            });
        }

        let block = &envelope.blocks[0];
        if !block.success() {
            return Err(ClientError::Authentication {
                errors: block.errors().to_vec(),
            });
        }
        let data = block
            .data()
            .ok_or_else(|| meridian_wire::WireError::missing("result", "data"))?;

        let ticket = data
            .child_text("sessionid")
            .ok_or_else(|| meridian_wire::WireError::missing("session", "sessionid"))?
            .to_string();
        let endpoint = match data.child_text("endpoint") {
            Some(raw) => Url::parse(raw).map_err(|_| {
                meridian_wire::WireError::format("endpoint", raw, "absolute URL")
            })?,
            // The service may omit the endpoint, in which case batches
            // keep using the gateway.
            None => self.config.endpoint.clone(),
        };

        Ok(SessionData {
            ticket,
            endpoint,
            locale: data.child_text("locale").map(str::to_owned),
            created_at: chrono::Utc::now(),
        })
    }

    /// Executes a non-empty ordered batch of operations as one wire
    /// exchange against an `Active` session.
    ///
    /// The returned results are positionally correlated: result *i*
    /// belongs to operation *i*. One operation's remote rejection never
    /// discards the others; structural failures (transport, protocol
    /// mismatch, invalid session) abort the whole call with zero results.
    pub async fn execute(
        &self,
        session: &Session,
        operations: &[&dyn BatchOperation],
        cancel: &CancellationToken,
    ) -> Result<ServiceResponse> {
        let status = session.status();
        if status != SessionStatus::Active {
            return Err(ClientError::InvalidSession { status });
        }
        if operations.is_empty() {
            return Err(ClientError::EmptyBatch);
        }

        let calls = operations
            .iter()
            .enumerate()
            .map(|(index, operation)| {
                Ok(FunctionCall {
                    control_id: envelope::control_id(index),
                    name: operation.function_name().to_string(),
                    payload: operation.build_payload()?,
                })
            })
            .collect::<std::result::Result<Vec<_>, meridian_wire::WireError>>()?;

        // Active implies the session data is published; treat a gap as a
        // stale session rather than panicking.
        let (ticket, endpoint) = match (session.ticket(), session.endpoint()) {
            (Some(ticket), Some(endpoint)) => (ticket.to_string(), endpoint.clone()),
            _ => return Err(ClientError::InvalidSession { status }),
        };

        let document = envelope::build_request(Some(&ticket), calls);
        debug!(operation_count = operations.len(), "executing batch");

        let envelope = self.exchange(&endpoint, &document, cancel).await?;

        if !envelope.success {
            if envelope.indicates_invalid_ticket() {
                if session.mark_expired() {
                    warn!("session ticket expired");
                }
                return Err(ClientError::InvalidSession {
                    status: session.status(),
                });
            }
            warn!("batch rejected at the envelope level");
            return Err(ClientError::RequestRejected {
                errors: envelope.errors,
            });
        }

        if envelope.blocks.len() != operations.len() {
            return Err(ClientError::ProtocolMismatch {
                message: format!(
                    "submitted {} operations but received {} result blocks",
                    operations.len(),
                    envelope.blocks.len()
                ),
            });
        }

        let mut results = Vec::with_capacity(operations.len());
        for (operation, block) in operations.iter().zip(&envelope.blocks) {
            let result = operation.parse_block(block)?;
            if !result.success() {
                debug!(
                    function = operation.function_name(),
                    errors = result.errors.len(),
                    "operation rejected by the service"
                );
            }
            results.push(result);
        }

        Ok(ServiceResponse {
            overall_success: true,
            results,
        })
    }

    /// Executes a single operation and returns its fully typed result.
    pub async fn execute_one<O: Operation>(
        &self,
        session: &Session,
        operation: &O,
        cancel: &CancellationToken,
    ) -> Result<OperationResult<O::Output>> {
        let response = self
            .execute(session, &[operation as &dyn BatchOperation], cancel)
            .await?;
        let erased = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::ProtocolMismatch {
                message: "single-operation batch produced no result".to_string(),
            })?;
        erased
            .downcast::<O::Output>()
            .map_err(|_| ClientError::ProtocolMismatch {
                message: "result value has an unexpected type".to_string(),
            })
    }

    /// Ends the session on the service side, then marks the local session
    /// `Expired` regardless of the remote outcome.
    pub async fn close_session(
        &self,
        session: &Session,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let outcome = self.execute_one(session, &EndSession, cancel).await;
        session.mark_expired();
        match outcome {
            Ok(_) => {
                debug!("session closed");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// One request, one response: renders the document, honors the
    /// cancellation signal before sending and while awaiting, and parses
    /// the response envelope.
    async fn exchange(
        &self,
        endpoint: &Url,
        document: &Element,
        cancel: &CancellationToken,
    ) -> Result<ResponseEnvelope> {
        let body = render_document(document)?;

        if cancel.is_cancelled() {
            return Err(ClientError::CancelledBeforeSend);
        }

        let raw = tokio::select! {
            _ = cancel.cancelled() => return Err(ClientError::CancelledInFlight),
            sent = self.transport.send(endpoint, body) => sent?,
        };

        let document = parse_document(&raw)?;
        ResponseEnvelope::from_document(&document)
    }
}

#[cfg(feature = "http")]
impl Client<crate::transport::HttpTransport> {
    /// Builds a client with the reqwest-backed [`crate::HttpTransport`].
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = crate::transport::HttpTransport::new(&config)?;
        Ok(Client::new(config, transport))
    }
}
