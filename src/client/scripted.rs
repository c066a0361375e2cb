//! In-memory transport for component tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::client::transport::ApiTransport;
use crate::utils::error::{DashboardError, DashboardResult};

/// A canned reply
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with this body
    Body(String),

    /// Fail as if the connection was refused
    ConnectionRefused,

    /// Respond with this body after a delay
    Delayed(Duration, String),
}

/// A recorded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub path: String,
    pub params: Vec<(&'static str, String)>,
}

impl Request {
    /// Whether a parameter with this key was sent
    pub fn has_param(&self, key: &str) -> bool {
        self.params.iter().any(|(k, _)| *k == key)
    }
}

/// Transport that answers from per-path reply queues and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `path`
    pub fn push(&self, path: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Queue a JSON body for `path`
    pub fn push_json(&self, path: &str, body: serde_json::Value) -> &Self {
        self.push(path, Reply::Body(body.to_string()))
    }

    /// All requests seen so far
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// The most recent request for `path`
    pub fn last_request(&self, path: &str) -> Option<Request> {
        self.requests
            .lock()
            .iter()
            .rev()
            .find(|r| r.path == path)
            .cloned()
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn get(&self, path: &str, params: &[(&'static str, String)]) -> DashboardResult<String> {
        self.requests.lock().push(Request {
            path: path.to_string(),
            params: params.to_vec(),
        });

        let reply = self
            .replies
            .lock()
            .get_mut(path)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Reply::ConnectionRefused);

        match reply {
            Reply::Body(body) => Ok(body),
            Reply::Delayed(delay, body) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
            Reply::ConnectionRefused => Err(DashboardError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("no route to {}", path),
            ))),
        }
    }
}
