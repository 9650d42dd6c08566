#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Platform {
    MacOs,
    Windows,
    // Linux and the BSDs.
    Freedesktop,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Platform::Freedesktop,
            _ => Platform::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
            Platform::Freedesktop => "freedesktop",
            Platform::Other => "other",
        }
    }
}
