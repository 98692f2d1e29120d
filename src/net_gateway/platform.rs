use std::fmt::{Display, Formatter};

/// Operating-system family whose wireless tooling the gateway drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// NetworkManager (`nmcli`)
    Linux,
    /// `airport` + `networksetup`
    MacOs,
    /// `netsh wlan`
    Windows,
    Unsupported(String),
}

impl Platform {
    /// Family of the running process.
    pub fn detect() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    /// Accepts Rust target names and `uname`-style names (`darwin`).
    pub fn from_name(name: &str) -> Self {
        let lower = name.trim().to_lowercase();
        match lower.as_str() {
            "linux" => Platform::Linux,
            "macos" | "darwin" => Platform::MacOs,
            "windows" => Platform::Windows,
            _ => Platform::Unsupported(lower),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "darwin",
            Platform::Windows => "windows",
            Platform::Unsupported(name) => name.as_str(),
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
