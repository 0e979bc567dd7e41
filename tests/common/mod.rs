use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use homework_notifier::config::Config;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub const HOMEWORK_PATH: &str = "/api/user_api/homework_statuses/";
pub const PRACTICUM_TOKEN: &str = "practicum-test-token";
pub const TELEGRAM_TOKEN: &str = "123456:telegram-test-token";
pub const CHAT_ID: &str = "424242";

/// One GET received by the homework stub
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedPoll {
    pub authorization: Option<String>,
    pub from_date: Option<String>,
}

/// One sendMessage call received by the bot stub
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedMessage {
    pub path_token: String,
    pub body: Value,
}

impl RecordedMessage {
    #[allow(dead_code)]
    pub fn text(&self) -> &str {
        self.body["text"].as_str().unwrap_or_default()
    }
}

// Shared state of both fake upstreams. Responses are served in order;
// an empty queue answers `{"homeworks": []}`.
#[allow(dead_code)]
#[derive(Clone)]
pub struct StubApi {
    pub base_url: String,
    homework_replies: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
    polls: Arc<Mutex<Vec<RecordedPoll>>>,
    bot_reply: Arc<Mutex<(StatusCode, Value)>>,
    messages: Arc<Mutex<Vec<RecordedMessage>>>,
}

#[allow(dead_code)]
impl StubApi {
    pub async fn start() -> Self {
        let mut stub = Self {
            base_url: String::new(),
            homework_replies: Arc::new(Mutex::new(VecDeque::new())),
            polls: Arc::new(Mutex::new(Vec::new())),
            bot_reply: Arc::new(Mutex::new((StatusCode::OK, json!({ "ok": true, "result": {} })))),
            messages: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route(HOMEWORK_PATH, get(homework_statuses))
            .route("/{bot_token}/sendMessage", post(send_message))
            .with_state(stub.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = listener.local_addr().expect("Stub listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        stub.base_url = format!("http://{}", addr);
        stub
    }

    pub fn reply_json(&self, body: Value) {
        self.reply_raw(StatusCode::OK, body.to_string());
    }

    pub fn reply_raw(&self, status: StatusCode, body: impl Into<String>) {
        self.homework_replies
            .lock()
            .unwrap()
            .push_back((status, body.into()));
    }

    pub fn set_bot_reply(&self, status: StatusCode, body: Value) {
        *self.bot_reply.lock().unwrap() = (status, body);
    }

    pub fn polls(&self) -> Vec<RecordedPoll> {
        self.polls.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<RecordedMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.messages().iter().map(|m| m.text().to_string()).collect()
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, HOMEWORK_PATH)
    }

    /// Configuration pointing both clients at this stub
    pub fn config(&self, extra: &[(&str, &str)]) -> Config {
        let mut vars: HashMap<String, String> = HashMap::new();
        vars.insert("PRACTICUM_TOKEN".into(), PRACTICUM_TOKEN.into());
        vars.insert("TELEGRAM_TOKEN".into(), TELEGRAM_TOKEN.into());
        vars.insert("TELEGRAM_CHAT_ID".into(), CHAT_ID.into());
        vars.insert("PRACTICUM_ENDPOINT".into(), self.endpoint());
        vars.insert("TELEGRAM_API_URL".into(), self.base_url.clone());
        for (key, value) in extra {
            vars.insert(key.to_string(), value.to_string());
        }

        Config::from_vars(|key| vars.get(key).cloned()).expect("Stub config must be valid")
    }
}

async fn homework_statuses(
    State(stub): State<StubApi>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    stub.polls.lock().unwrap().push(RecordedPoll {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        from_date: params.get("from_date").cloned(),
    });

    stub.homework_replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| (StatusCode::OK, json!({ "homeworks": [] }).to_string()))
}

async fn send_message(
    State(stub): State<StubApi>,
    Path(bot_token): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.messages.lock().unwrap().push(RecordedMessage {
        path_token: bot_token,
        body,
    });

    let (status, reply) = stub.bot_reply.lock().unwrap().clone();
    (status, Json(reply))
}
