use std::path::PathBuf;

pub fn default_agent_binary() -> PathBuf {
    PathBuf::from("agent-cli")
}

/// Market research coordinator; it fans out to the web and developer-community agents
pub fn default_agent_id() -> String {
    "69a0221026973c6deb9ae315".to_string()
}

pub fn default_timeout_sec() -> u64 {
    300
}

pub fn default_max_attempts() -> u32 {
    3
}

pub fn default_backoff_base_ms() -> u64 {
    1000
}
