//! In-memory [`Transport`] that replays canned responses.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use crate::api::{HttpResponse, Transport, TransportError};

type Scripted = Result<HttpResponse, String>;

/// Replays responses in order, optionally routed by URL path fragment.
///
/// A request whose path contains a routed fragment consumes that route's
/// queue; every other request consumes the default queue. Running out of
/// responses is reported as a transport failure.
#[derive(Default)]
pub struct ScriptedTransport {
    default: Mutex<VecDeque<Scripted>>,
    routes: Mutex<Vec<(String, VecDeque<Scripted>)>>,
    requested: Mutex<Vec<Url>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.push_default(Ok(response(status, body.into())));
        self
    }

    #[must_use]
    pub fn respond_json(self, body: serde_json::Value) -> Self {
        self.respond(200, body.to_string())
    }

    #[must_use]
    pub fn fail(self, reason: impl Into<String>) -> Self {
        self.push_default(Err(reason.into()));
        self
    }

    #[must_use]
    pub fn route(self, fragment: &str, status: u16, body: impl Into<String>) -> Self {
        self.push_route(fragment, Ok(response(status, body.into())));
        self
    }

    #[must_use]
    pub fn route_json(self, fragment: &str, body: serde_json::Value) -> Self {
        self.route(fragment, 200, body.to_string())
    }

    /// URLs requested so far, in request order.
    pub fn requested_urls(&self) -> Vec<Url> {
        self.requested.lock().map(|urls| urls.clone()).unwrap_or_default()
    }

    fn push_default(&self, scripted: Scripted) {
        if let Ok(mut queue) = self.default.lock() {
            queue.push_back(scripted);
        }
    }

    fn push_route(&self, fragment: &str, scripted: Scripted) {
        let Ok(mut routes) = self.routes.lock() else {
            return;
        };
        match routes.iter_mut().find(|(existing, _)| existing == fragment) {
            Some((_, queue)) => queue.push_back(scripted),
            None => routes.push((fragment.to_string(), VecDeque::from([scripted]))),
        }
    }

    fn next_for(&self, url: &Url) -> Option<Scripted> {
        if let Ok(mut routes) = self.routes.lock()
            && let Some((_, queue)) = routes
                .iter_mut()
                .find(|(fragment, queue)| url.path().contains(fragment.as_str()) && !queue.is_empty())
        {
            return queue.pop_front();
        }
        self.default.lock().ok()?.pop_front()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.clone());
        }
        match self.next_for(url) {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(TransportError::other(url.as_str(), reason)),
            None => Err(TransportError::other(url.as_str(), "no scripted response left")),
        }
    }
}

fn response(status: u16, body: String) -> HttpResponse {
    let status_text = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or_default()
        .to_string();
    HttpResponse {
        status,
        status_text,
        body,
    }
}
