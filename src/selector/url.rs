//! Probe URL construction.

/// Maps a candidate endpoint to the URL used to test its liveness.
pub trait ProbeUrlBuilder: Send + Sync {
    fn build(&self, endpoint: &str) -> String;
}

/// Builds resource manager cluster-info URLs, e.g.
/// `http://rm1:8088/ws/v1/cluster/info?anonymous=true`.
#[derive(Debug, Clone)]
pub struct ClusterInfoUrlBuilder {
    path: String,
    anonymous: bool,
}

impl ClusterInfoUrlBuilder {
    pub fn new(path: impl Into<String>, anonymous: bool) -> Self {
        Self {
            path: path.into(),
            anonymous,
        }
    }
}

impl Default for ClusterInfoUrlBuilder {
    fn default() -> Self {
        Self::new("ws/v1/cluster/info", true)
    }
}

impl ProbeUrlBuilder for ClusterInfoUrlBuilder {
    fn build(&self, endpoint: &str) -> String {
        let mut url = format!(
            "{}/{}",
            endpoint.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );
        if self.anonymous {
            url.push_str("?anonymous=true");
        }
        url
    }
}
