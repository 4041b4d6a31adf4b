use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use visitor_notify::client::AsyncEmailClient;
use visitor_notify::error::{DeliveryError, DeliveryResult};
use visitor_notify::models::{EmailMessage, HealthStatus, SendReceipt};

/// What the mock answers to one request.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Reply {
    /// Accept with an optional message id
    Accept(Option<String>),

    /// Fail like a non-2xx response
    Reject { status: u16, message: String },

    /// Fail like an aborted request
    Cancelled,

    /// Never answer
    Hang,

    /// Answer with the inner reply after a delay
    Delayed(Duration, Box<Reply>),
}

#[allow(dead_code)]
impl Reply {
    pub fn accept(message_id: &str) -> Self {
        Reply::Accept(Some(message_id.to_string()))
    }

    pub fn server_error() -> Self {
        Reply::Reject {
            status: 500,
            message: "Failed to send email".to_string(),
        }
    }

    pub fn after(delay: Duration, reply: Reply) -> Self {
        Reply::Delayed(delay, Box::new(reply))
    }
}

/// One request seen by the mock.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub to: String,
    pub subject: String,
    pub at: Instant,
}

/// Mock delivery endpoint with replies scripted per recipient.
///
/// Scripted replies are used in order; once a recipient's script runs out
/// its fallback reply (`Accept` unless set with [`MockEmailClient::always`])
/// is used.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockEmailClient {
    scripts: Arc<Mutex<HashMap<String, VecDeque<Reply>>>>,
    fallbacks: Arc<Mutex<HashMap<String, Reply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    health: Arc<Mutex<Option<HealthStatus>>>,
}

#[allow(dead_code)]
impl MockEmailClient {
    pub fn new() -> Self {
        Self {
            scripts: Arc::new(Mutex::new(HashMap::new())),
            fallbacks: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            health: Arc::new(Mutex::new(None)),
        }
    }

    /// Queue replies for requests addressed to `to`.
    pub fn script(&self, to: &str, replies: Vec<Reply>) {
        let mut scripts = self.scripts.lock().unwrap();
        scripts.entry(to.to_string()).or_default().extend(replies);
    }

    /// Reply the same way to every unscripted request addressed to `to`.
    pub fn always(&self, to: &str, reply: Reply) {
        let mut fallbacks = self.fallbacks.lock().unwrap();
        fallbacks.insert(to.to_string(), reply);
    }

    pub fn set_health(&self, status: HealthStatus) {
        *self.health.lock().unwrap() = Some(status);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, to: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.to == to)
            .collect()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn next_reply(&self, to: &str) -> Reply {
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(to)
            .and_then(|queue| queue.pop_front());

        scripted.unwrap_or_else(|| {
            self.fallbacks
                .lock()
                .unwrap()
                .get(to)
                .cloned()
                .unwrap_or_else(|| Reply::Accept(Some(format!("mock-{}", to))))
        })
    }
}

impl Default for MockEmailClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn answer(reply: Reply) -> DeliveryResult<SendReceipt> {
    let mut reply = reply;
    loop {
        match reply {
            Reply::Accept(message_id) => return Ok(SendReceipt { message_id }),
            Reply::Reject { status, message } => {
                return Err(DeliveryError::ApiError { status, message })
            }
            Reply::Cancelled => return Err(DeliveryError::Cancelled),
            Reply::Hang => std::future::pending::<()>().await,
            Reply::Delayed(delay, inner) => {
                tokio::time::sleep(delay).await;
                reply = *inner;
            }
        }
    }
}

#[async_trait]
impl AsyncEmailClient for MockEmailClient {
    async fn send_email(&self, message: &EmailMessage) -> DeliveryResult<SendReceipt> {
        self.track_call("send_email");
        self.calls.lock().unwrap().push(RecordedCall {
            to: message.to.clone(),
            subject: message.subject.clone(),
            at: Instant::now(),
        });

        let reply = self.next_reply(&message.to);
        answer(reply).await
    }

    async fn health(&self) -> DeliveryResult<HealthStatus> {
        self.track_call("health");
        self.health
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DeliveryError::HttpError("Connection failed".to_string()))
    }
}
