//! Access log format module
//!
//! Supports `combined` (Apache/Nginx), `common` (CLF), `json`, and custom
//! patterns with `$variable` substitution.

use chrono::Local;

/// One access log line worth of request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: chrono::DateTime<Local>,
    pub method: String,
    pub path: String,
    /// Query string without the leading `?`
    pub query: Option<String>,
    pub http_version: String,
    pub status: u16,
    pub body_bytes: u64,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new entry timestamped now; response fields filled later
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Format the entry according to the named or custom format
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => self.combined(),
            "common" => self.common(),
            "json" => self.json(),
            custom => self.custom(custom),
        }
    }

    fn request_line(&self) -> String {
        format!("{} {} HTTP/{}", self.method, self.request_uri(), self.http_version)
    }

    fn request_uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }

    fn time_local(&self) -> String {
        self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string()
    }

    /// `$remote_addr - - [$time_local] "$request" $status $bytes "$referer" "$ua"`
    fn combined(&self) -> String {
        format!(
            "{} \"{}\" \"{}\"",
            self.common(),
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// Common Log Format (CLF)
    fn common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time_local(),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    /// JSON structured log format
    ///
    /// Hand-built; the handful of fields does not warrant a serde round
    /// trip.
    fn json(&self) -> String {
        let optional = |v: &Option<String>| match v {
            Some(s) => format!("\"{}\"", escape_json(s)),
            None => "null".to_string(),
        };

        format!(
            r#"{{"remote_addr":"{}","time":"{}","method":"{}","path":"{}","query":{},"http_version":"{}","status":{},"body_bytes":{},"referer":{},"user_agent":{},"request_time_us":{}}}"#,
            escape_json(&self.remote_addr),
            self.time.to_rfc3339(),
            escape_json(&self.method),
            escape_json(&self.path),
            optional(&self.query),
            escape_json(&self.http_version),
            self.status,
            self.body_bytes,
            optional(&self.referer),
            optional(&self.user_agent),
            self.request_time_us,
        )
    }

    /// Custom format with `$variable` substitution
    fn custom(&self, pattern: &str) -> String {
        #[allow(clippy::cast_precision_loss)]
        let request_time_s = self.request_time_us as f64 / 1_000_000.0;

        // Longer names first so e.g. $request_time wins over $request
        let substitutions = [
            ("$remote_addr", self.remote_addr.clone()),
            ("$time_local", self.time_local()),
            ("$time_iso8601", self.time.to_rfc3339()),
            ("$request_time", format!("{request_time_s:.3}")),
            ("$request_method", self.method.clone()),
            ("$request_uri", self.request_uri()),
            ("$request", self.request_line()),
            ("$status", self.status.to_string()),
            ("$body_bytes_sent", self.body_bytes.to_string()),
            (
                "$http_referer",
                self.referer.clone().unwrap_or_else(|| "-".to_string()),
            ),
            (
                "$http_user_agent",
                self.user_agent.clone().unwrap_or_else(|| "-".to_string()),
            ),
        ];

        let mut line = pattern.to_string();
        for (name, value) in substitutions {
            line = line.replace(name, &value);
        }
        line
    }
}

/// Escape special characters for JSON string
fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.50".to_string(),
            "GET".to_string(),
            "/press-button".to_string(),
        );
        entry.status = 200;
        entry.body_bytes = 0;
        entry.user_agent = Some("Mozilla/5.0".to_string());
        entry.request_time_us = 301_200;
        entry
    }

    #[test]
    fn test_combined() {
        let log = press_entry().format("combined");
        assert!(log.contains("192.168.1.50"));
        assert!(log.contains("\"GET /press-button HTTP/1.1\""));
        assert!(log.contains("200 0"));
        assert!(log.contains("Mozilla/5.0"));
    }

    #[test]
    fn test_common_omits_user_agent() {
        let log = press_entry().format("common");
        assert!(log.contains("\"GET /press-button HTTP/1.1\""));
        assert!(!log.contains("Mozilla/5.0"));
    }

    #[test]
    fn test_json() {
        let log = press_entry().format("json");
        assert!(log.contains(r#""remote_addr":"192.168.1.50""#));
        assert!(log.contains(r#""path":"/press-button""#));
        assert!(log.contains(r#""status":200"#));
        assert!(log.contains(r#""referer":null"#));
        assert!(log.contains(r#""request_time_us":301200"#));
    }

    #[test]
    fn test_custom_pattern() {
        let log = press_entry().format("$request_method $request_uri -> $status in $request_time");
        assert_eq!(log, "GET /press-button -> 200 in 0.301");
    }

    #[test]
    fn test_query_included_in_request_line() {
        let mut entry = press_entry();
        entry.path = "/".to_string();
        entry.query = Some("t=1".to_string());
        assert!(entry.format("common").contains("\"GET /?t=1 HTTP/1.1\""));
    }
}
