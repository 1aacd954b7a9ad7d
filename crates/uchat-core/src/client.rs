use serde::Serialize;

/// Coarse description of the caller derived from its `User-Agent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientInfo {
    pub device: String,
    pub os: String,
    pub browser: String,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            device: "Desktop".to_owned(),
            os: "Unknown".to_owned(),
            browser: "Unknown".to_owned(),
        }
    }
}

impl ClientInfo {
    /// Classify a raw `User-Agent` header value
    ///
    /// Only a handful of families are recognised. Anything else reports
    /// `Unknown` with a `Desktop` device.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();

        // iOS agents also advertise "like Mac OS X"
        let (os, device) = if ua.contains("iphone") || ua.contains("ipad") {
            ("iOS", "Mobile")
        } else if ua.contains("android") {
            ("Android", "Mobile")
        } else if ua.contains("windows") {
            ("Windows", "Desktop")
        } else if ua.contains("mac") {
            ("Mac", "Desktop")
        } else if ua.contains("linux") {
            ("Linux", "Desktop")
        } else {
            ("Unknown", "Desktop")
        };

        // Chromium derivatives carry "chrome" and "safari" tokens too
        let browser = if ua.contains("edg/") || ua.contains("edge") {
            "Edge"
        } else if ua.contains("firefox") || ua.contains("fxios") {
            "Firefox"
        } else if ua.contains("chrome") || ua.contains("crios") {
            "Chrome"
        } else if ua.contains("safari") {
            "Safari"
        } else {
            "Unknown"
        };

        Self {
            device: device.to_owned(),
            os: os.to_owned(),
            browser: browser.to_owned(),
        }
    }
}

/// Per-request caller details, inserted as a request extension by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    /// Best-effort caller address, `unknown` when nothing is available
    pub ip: String,
    /// Raw `User-Agent` header, empty when absent
    pub user_agent: String,
    pub info: ClientInfo,
}

impl ClientContext {
    pub fn new(ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        let user_agent = user_agent.into();
        let info = ClientInfo::from_user_agent(&user_agent);

        Self {
            ip: ip.into(),
            user_agent,
            info,
        }
    }

    /// Context for calls that did not pass through the HTTP middleware
    pub fn unknown() -> Self {
        Self::new("unknown", "")
    }
}
