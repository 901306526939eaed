use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{AbortController, AbortSignal};
use crate::console;
use crate::protocol::{parse_scores, ScoreRecord, ScoreSubmission};
use crate::state::Difficulty;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A call to the remote score service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardRequest {
    Fetch { difficulty: Difficulty },
    Submit { initials: String, score: u32, difficulty: Difficulty },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Fetch,
    Submit,
}

impl LeaderboardRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            LeaderboardRequest::Fetch { .. } => RequestKind::Fetch,
            LeaderboardRequest::Submit { .. } => RequestKind::Submit,
        }
    }
}

/// Outcome of one request. `scores` is `None` on any failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReply {
    pub generation: u64,
    pub kind: RequestKind,
    pub scores: Option<Vec<ScoreRecord>>,
}

/// Single slot where async replies land until the next frame reads them.
pub type ScoreMailbox = Rc<RefCell<Option<ScoreReply>>>;

pub fn new_mailbox() -> ScoreMailbox {
    Rc::new(RefCell::new(None))
}

/// Stores a reply unless a newer one is already waiting.
pub fn deliver(mailbox: &ScoreMailbox, reply: ScoreReply) {
    let mut slot = mailbox.borrow_mut();
    match slot.as_ref() {
        Some(waiting) if waiting.generation > reply.generation => {}
        _ => *slot = Some(reply),
    }
}

pub trait Leaderboard {
    /// Starts a request. The outcome is only ever reported through `mailbox`.
    fn request(&self, request: LeaderboardRequest, generation: u64, mailbox: ScoreMailbox);
}

#[derive(Debug)]
pub enum LeaderboardError {
    Setup(String),
    Transport(gloo_net::Error),
    Status(u16),
    Timeout,
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardError::Setup(msg) => write!(f, "could not start request: {}", msg),
            LeaderboardError::Transport(e) => write!(f, "transport error: {}", e),
            LeaderboardError::Status(code) => write!(f, "unexpected status {}", code),
            LeaderboardError::Timeout => write!(f, "request timed out"),
        }
    }
}

impl From<gloo_net::Error> for LeaderboardError {
    fn from(e: gloo_net::Error) -> Self {
        LeaderboardError::Transport(e)
    }
}

pub fn scores_url(base: &str, difficulty: Difficulty) -> String {
    format!("{}/scores/?difficulty={}", base.trim_end_matches('/'), difficulty.as_str())
}

pub fn submit_url(base: &str) -> String {
    format!("{}/scores/new/", base.trim_end_matches('/'))
}

/// `fetch`-backed client with a per-request abort timer.
pub struct HttpLeaderboard {
    base_url: String,
    timeout_ms: u32,
}

impl HttpLeaderboard {
    pub fn new(base_url: &str, timeout_ms: u32) -> Self {
        Self { base_url: base_url.to_string(), timeout_ms }
    }
}

async fn send(
    base: &str,
    request: &LeaderboardRequest,
    signal: &AbortSignal,
) -> Result<Response, LeaderboardError> {
    let response = match request {
        LeaderboardRequest::Fetch { difficulty } => {
            Request::get(&scores_url(base, *difficulty))
                .abort_signal(Some(signal))
                .send()
                .await?
        }
        LeaderboardRequest::Submit { initials, score, difficulty } => {
            let submission =
                ScoreSubmission { initials, score: *score, difficulty: difficulty.as_str() };
            let body = submission.to_form();
            Request::post(&submit_url(base))
                .header("Content-type", FORM_CONTENT_TYPE)
                .abort_signal(Some(signal))
                .body(body)?
                .send()
                .await?
        }
    };
    Ok(response)
}

async fn perform(
    base: &str,
    request: &LeaderboardRequest,
    signal: &AbortSignal,
) -> Result<Vec<ScoreRecord>, LeaderboardError> {
    let response = send(base, request, signal).await?;
    if response.status() != 200 {
        return Err(LeaderboardError::Status(response.status()));
    }
    let body = response.text().await?;
    Ok(parse_scores(&body))
}

impl Leaderboard for HttpLeaderboard {
    fn request(&self, request: LeaderboardRequest, generation: u64, mailbox: ScoreMailbox) {
        let kind = request.kind();
        let controller = match AbortController::new() {
            Ok(c) => c,
            Err(e) => {
                let err = LeaderboardError::Setup(format!("{:?}", e));
                console::error(&format!("Leaderboard {:?}: {}", kind, err));
                deliver(&mailbox, ScoreReply { generation, kind, scores: None });
                return;
            }
        };

        let timed_out = Rc::new(Cell::new(false));
        let timer = {
            let controller = controller.clone();
            let timed_out = timed_out.clone();
            Timeout::new(self.timeout_ms, move || {
                timed_out.set(true);
                controller.abort();
            })
        };

        let base = self.base_url.clone();
        spawn_local(async move {
            let result = perform(&base, &request, &controller.signal()).await;
            // Finished either way; disarm the abort
            drop(timer);
            let scores = match result {
                Ok(rows) => Some(rows),
                Err(err) => {
                    let err = if timed_out.get() { LeaderboardError::Timeout } else { err };
                    console::warn(&format!("Leaderboard {:?}: {}", kind, err));
                    None
                }
            };
            deliver(&mailbox, ScoreReply { generation, kind, scores });
        });
    }
}
