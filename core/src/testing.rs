//! Scripted transport for exercising effect handlers, the dispatcher and the
//! store without a network.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::NetworkError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

pub(crate) const BASE_URL: &str = "http://todo.test";

enum Reply {
    Respond { status: u16, body: String },
    Fail(String),
    Panic,
}

struct Scripted {
    delay: Duration,
    reply: Reply,
}

/// Replies to `(method, path)` pairs from per-route FIFO queues.
///
/// Paths are given without the base URL. A request with no queued reply
/// fails with a transport error naming the route.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    routes: Mutex<HashMap<(HttpMethod, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, method: HttpMethod, path: &str, delay: Duration, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(Scripted { delay, reply });
    }

    pub(crate) fn respond(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.respond_after(method, path, Duration::ZERO, status, body);
    }

    pub(crate) fn respond_after(
        &self,
        method: HttpMethod,
        path: &str,
        delay: Duration,
        status: u16,
        body: &str,
    ) {
        let reply = Reply::Respond {
            status,
            body: body.to_string(),
        };
        self.push(method, path, delay, reply);
    }

    pub(crate) fn fail(&self, method: HttpMethod, path: &str, message: &str) {
        self.push(method, path, Duration::ZERO, Reply::Fail(message.to_string()));
    }

    pub(crate) fn panic_on(&self, method: HttpMethod, path: &str) {
        self.push(method, path, Duration::ZERO, Reply::Panic);
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
        self.requests.lock().unwrap().push(request.clone());
        let path = request
            .path
            .strip_prefix(BASE_URL)
            .unwrap_or(&request.path)
            .to_string();
        let next = self
            .routes
            .lock()
            .unwrap()
            .get_mut(&(request.method, path.clone()))
            .and_then(VecDeque::pop_front);
        let Some(scripted) = next else {
            return Err(NetworkError::Transport(format!(
                "no scripted reply for {:?} {path}",
                request.method
            )));
        };

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        match scripted.reply {
            Reply::Respond { status, body } => Ok(HttpResponse { status, body }),
            Reply::Fail(message) => Err(NetworkError::Transport(message)),
            Reply::Panic => panic!("scripted panic for {path}"),
        }
    }
}

pub(crate) fn todo_json(id: u64, text: &str, completed: bool, owner_id: u64) -> String {
    serde_json::json!({"id": id, "todo": text, "completed": completed, "userId": owner_id})
        .to_string()
}
