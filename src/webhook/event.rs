//! Delivery header extraction and event classification.

use axum::http::HeaderMap;
use serde::Deserialize;

/// Header carrying `sha256=<hex>`.
pub const X_HUB_SIGNATURE_256: &str = "x-hub-signature-256";
/// Header naming the event type (`push`, `ping`, ...).
pub const X_GITHUB_EVENT: &str = "x-github-event";
/// Per-delivery GUID assigned by the sender. Logged only.
pub const X_GITHUB_DELIVERY: &str = "x-github-delivery";

/// The delivery headers the gateway cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryHeaders {
    /// Raw signature header; empty when absent or not valid UTF-8.
    pub signature: String,
    pub event: Option<String>,
    pub delivery_id: Option<String>,
}

impl DeliveryHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            signature: get(X_HUB_SIGNATURE_256).unwrap_or_default(),
            event: get(X_GITHUB_EVENT),
            delivery_id: get(X_GITHUB_DELIVERY),
        }
    }
}

/// What to do with an authenticated delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Accepted,
    Ignored,
}

/// Matches the event-type header against the single accepted value.
#[derive(Debug, Clone)]
pub struct EventFilter {
    accepted: String,
}

impl EventFilter {
    pub fn new(accepted: impl Into<String>) -> Self {
        Self {
            accepted: accepted.into(),
        }
    }

    pub fn accepted(&self) -> &str {
        &self.accepted
    }

    /// Exact, case-sensitive comparison. A missing header is ignored.
    pub fn classify(&self, event: Option<&str>) -> EventDisposition {
        match event {
            Some(event) if event == self.accepted => EventDisposition::Accepted,
            _ => EventDisposition::Ignored,
        }
    }
}

/// A few fields of a push payload, for the operational log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSummary {
    pub git_ref: Option<String>,
    pub head_commit: Option<String>,
    pub pusher: Option<String>,
}

#[derive(Deserialize)]
struct RawPush {
    #[serde(rename = "ref")]
    git_ref: Option<String>,
    after: Option<String>,
    pusher: Option<RawPusher>,
}

#[derive(Deserialize)]
struct RawPusher {
    name: Option<String>,
}

impl PushSummary {
    /// Best-effort parse. Only call this after the signature has been verified.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let raw: RawPush = serde_json::from_slice(body).ok()?;
        Some(Self {
            git_ref: raw.git_ref,
            head_commit: raw.after,
            pusher: raw.pusher.and_then(|p| p.name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(X_HUB_SIGNATURE_256, HeaderValue::from_static("sha256=00"));
        headers.insert(X_GITHUB_EVENT, HeaderValue::from_static("push"));
        headers.insert(X_GITHUB_DELIVERY, HeaderValue::from_static("72d3162e"));

        let parsed = DeliveryHeaders::from_headers(&headers);
        assert_eq!(parsed.signature, "sha256=00");
        assert_eq!(parsed.event.as_deref(), Some("push"));
        assert_eq!(parsed.delivery_id.as_deref(), Some("72d3162e"));
    }

    #[test]
    fn missing_headers_are_empty() {
        let parsed = DeliveryHeaders::from_headers(&HeaderMap::new());
        assert_eq!(parsed, DeliveryHeaders::default());
    }

    #[test]
    fn non_utf8_signature_is_empty() {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_HUB_SIGNATURE_256,
            HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap(),
        );
        assert_eq!(DeliveryHeaders::from_headers(&headers).signature, "");
    }

    #[test]
    fn classify_is_exact() {
        let filter = EventFilter::new("push");
        assert_eq!(filter.classify(Some("push")), EventDisposition::Accepted);
        assert_eq!(filter.classify(Some("Push")), EventDisposition::Ignored);
        assert_eq!(filter.classify(Some("ping")), EventDisposition::Ignored);
        assert_eq!(filter.classify(None), EventDisposition::Ignored);
    }

    #[test]
    fn push_summary_from_payload() {
        let body = br#"{"ref":"refs/heads/main","after":"abc123","pusher":{"name":"octo"},"commits":[]}"#;
        let summary = PushSummary::from_body(body).unwrap();
        assert_eq!(summary.git_ref.as_deref(), Some("refs/heads/main"));
        assert_eq!(summary.head_commit.as_deref(), Some("abc123"));
        assert_eq!(summary.pusher.as_deref(), Some("octo"));

        assert!(PushSummary::from_body(b"not json").is_none());
    }
}
