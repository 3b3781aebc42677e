use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Amparo";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base URL of the remote triage backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Port the local UI server binds on loopback.
pub const DEFAULT_UI_PORT: u16 = 4810;

/// Get the application data directory
/// ~/Amparo/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Amparo")
}

/// File holding the persisted session slot (current user + role).
pub fn session_file() -> PathBuf {
    app_data_dir().join("session.json")
}

/// Directory of static UI assets served to the browser.
pub fn assets_dir() -> PathBuf {
    std::env::var("AMPARO_ASSETS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("assets"))
}

/// Backend base URL, overridable via `AMPARO_BACKEND_URL`.
pub fn backend_url() -> String {
    std::env::var("AMPARO_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
}

/// Loopback address for the UI server, port overridable via `AMPARO_UI_PORT`.
pub fn ui_bind_addr() -> SocketAddr {
    let port = std::env::var("AMPARO_UI_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_UI_PORT);
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port)
}

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Amparo"));
    }

    #[test]
    fn session_file_under_app_data() {
        let file = session_file();
        assert!(file.starts_with(app_data_dir()));
        assert!(file.ends_with("session.json"));
    }

    #[test]
    fn ui_bind_addr_is_loopback() {
        let addr = ui_bind_addr();
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn app_name_is_amparo() {
        assert_eq!(APP_NAME, "Amparo");
    }

    #[test]
    fn default_filter_mentions_crate() {
        assert!(default_log_filter().contains("amparo"));
    }
}
