//! Batch protocol test harness.
//!
//! Provides a scripted transport plus response-document builders so the
//! protocol layer can be exercised without a network.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tokio_util::sync::CancellationToken;
use url::Url;

use meridian_client::{Client, ClientConfig, Credential, Session, Transport, TransportError};
use meridian_ledger::{EntryDimensions, LedgerEntry, LedgerTransaction, journal};

enum Scripted {
    Respond(Result<Vec<u8>, TransportError>),
    /// Never resolves; lets tests cancel an in-flight request.
    Hang,
}

/// A transport that replays scripted responses and records every request
/// it was asked to send.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<MockInner>,
}

struct MockInner {
    script: Mutex<VecDeque<Scripted>>,
    sent: Mutex<Vec<(Url, Vec<u8>)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        MockTransport {
            inner: Arc::new(MockInner {
                script: Mutex::new(VecDeque::new()),
                sent: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn enqueue_response(&self, xml: impl Into<String>) {
        self.inner
            .script
            .lock()
            .unwrap()
            .push_back(Scripted::Respond(Ok(xml.into().into_bytes())));
    }

    pub fn enqueue_error(&self, error: TransportError) {
        self.inner
            .script
            .lock()
            .unwrap()
            .push_back(Scripted::Respond(Err(error)));
    }

    pub fn enqueue_hang(&self) {
        self.inner.script.lock().unwrap().push_back(Scripted::Hang);
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<(Url, Vec<u8>)> {
        self.inner.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.inner.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, endpoint: &Url, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        self.inner
            .sent
            .lock()
            .unwrap()
            .push((endpoint.clone(), body));
        let next = self.inner.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Respond(result)) => result,
            Some(Scripted::Hang) => std::future::pending().await,
            None => Err(TransportError::Connection(
                "no scripted response left".to_string(),
            )),
        }
    }
}

/// A client over a fresh mock transport, plus a handle to the transport
/// for scripting and inspection.
pub fn test_client() -> (Client<MockTransport>, MockTransport) {
    let transport = MockTransport::new();
    let client = Client::new(ClientConfig::for_testing(), transport.clone());
    (client, transport)
}

pub fn test_credential() -> Credential {
    Credential::new("finance@example.com", "acme", "hunter2")
}

/// Opens a session against a scripted authentication success.
pub async fn open_test_session(
    client: &Client<MockTransport>,
    transport: &MockTransport,
    ticket: &str,
) -> Session {
    transport.enqueue_response(auth_success(ticket, "http://api-partition-2.localhost/xml/v2"));
    client
        .open_session(&test_credential(), &CancellationToken::new())
        .await
        .expect("scripted authentication should succeed")
}

pub fn auth_success(ticket: &str, endpoint: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
  <status>success</status>
  <results>
    <result controlid="auth">
      <status>success</status>
      <data>
        <session>
          <sessionid>{ticket}</sessionid>
          <endpoint>{endpoint}</endpoint>
          <locale>en_US</locale>
        </session>
      </data>
    </result>
  </results>
</response>"#
    )
}

pub fn auth_failure(code: &str, message: &str) -> String {
    envelope_failure(code, message)
}

pub fn envelope_failure(code: &str, message: &str) -> String {
    format!(
        r#"<response>
  <status>failure</status>
  <errormessage>
    <error><errorno>{code}</errorno><description>{message}</description></error>
  </errormessage>
</response>"#
    )
}

pub fn batch_response(blocks: &[String]) -> String {
    format!(
        "<response><status>success</status><results>{}</results></response>",
        blocks.concat()
    )
}

pub fn success_block(control_id: &str, key: &str, data: Option<&str>) -> String {
    let data = data
        .map(|inner| format!("<data>{inner}</data>"))
        .unwrap_or_default();
    format!(
        "<result controlid=\"{control_id}\"><status>success</status><key>{key}</key>{data}</result>"
    )
}

pub fn failure_block(control_id: &str, code: &str, message: &str) -> String {
    format!(
        "<result controlid=\"{control_id}\"><status>failure</status><errormessage><error><errorno>{code}</errorno><description>{message}</description></error></errormessage></result>"
    )
}

pub fn transaction_data(journal_id: &str) -> String {
    format!(
        "<gltransaction><journalid>{journal_id}</journalid><description>scripted</description></gltransaction>"
    )
}

/// A balanced two-entry transaction for submission fixtures.
pub fn sample_transaction() -> LedgerTransaction {
    let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
    let (credit, debit) = LedgerEntry::balanced_pair(
        dec!(100.00),
        "4000",
        Some("August accrual"),
        date,
        EntryDimensions::default(),
        EntryDimensions::default(),
    );
    LedgerTransaction::new(journal::GENERAL, Some("August accrual"), vec![], date)
        .with_entry_pair(credit, debit)
        .unwrap()
}
