//! Readiness report.
//!
//! Built once, when the listener is bound, from the bound address and the
//! LAN address picked by [`crate::net::interfaces`].

use std::net::{IpAddr, SocketAddr};

use colored::Colorize;

use crate::net::{interfaces, ServerHandle};
use crate::workspace::WorkspacePath;

/// URLs at which the server can be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachabilityInfo {
    pub local_url: String,
    pub network_url: Option<String>,
}

impl ReachabilityInfo {
    /// Derive URLs from the bound address and an optional LAN address.
    ///
    /// Wildcard binds (`0.0.0.0`, `::`) are shown as `localhost`.
    pub fn new(bound: SocketAddr, lan: Option<IpAddr>) -> Self {
        let local_host = if bound.ip().is_unspecified() {
            "localhost".to_string()
        } else {
            url_host(bound.ip())
        };

        Self {
            local_url: format!("http://{}:{}", local_host, bound.port()),
            network_url: lan.map(|ip| format!("http://{}:{}", url_host(ip), bound.port())),
        }
    }

    /// Compute from a bound listener, enumerating interfaces once.
    ///
    /// Returns `None` when the socket's address cannot be read; no report is
    /// emitted in that case.
    pub fn resolve(handle: &ServerHandle) -> Option<Self> {
        match handle.local_addr() {
            Ok(bound) => Some(Self::new(bound, interfaces::lan_address())),
            Err(e) => {
                tracing::warn!(error = %e, "Listener address unavailable, skipping readiness report");
                None
            }
        }
    }
}

fn url_host(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => v4.to_string(),
        IpAddr::V6(v6) => format!("[{}]", v6),
    }
}

/// Render the boxed report printed to stdout.
pub fn render_report(workspace: &WorkspacePath, info: &ReachabilityInfo) -> String {
    // (plain, styled) pairs; widths come from the plain text.
    let mut lines: Vec<(String, String)> = Vec::new();

    let serving = format!("Serving {}", workspace);
    lines.push((serving.clone(), serving.green().to_string()));
    lines.push((String::new(), String::new()));

    let (prefix, space) = if info.network_url.is_some() {
        ("- ", "            ")
    } else {
        ("", "  ")
    };
    let label = format!("{}Local:", prefix);
    lines.push((
        format!("{}{}{}", label, space, info.local_url),
        format!("{}{}{}", label.bold(), space, info.local_url),
    ));

    if let Some(network_url) = &info.network_url {
        let label = "- On Your Network:";
        lines.push((
            format!("{}  {}", label, network_url),
            format!("{}  {}", label.bold(), network_url),
        ));
    }

    draw_box(&lines)
}

fn draw_box(lines: &[(String, String)]) -> String {
    const PAD_X: usize = 3;
    const MARGIN: &str = "  ";

    let width = lines
        .iter()
        .map(|(plain, _)| plain.chars().count())
        .max()
        .unwrap_or(0)
        + PAD_X * 2;

    let border = |s: String| s.green().to_string();
    let blank = format!("{}{}{}", border("│".into()), " ".repeat(width), border("│".into()));

    let mut out = String::from("\n");
    out.push_str(&format!("{}{}\n", MARGIN, border(format!("┌{}┐", "─".repeat(width)))));
    out.push_str(&format!("{}{}\n", MARGIN, blank));
    for (plain, styled) in lines {
        let fill = width - PAD_X - plain.chars().count();
        out.push_str(&format!(
            "{}{}{}{}{}{}\n",
            MARGIN,
            border("│".into()),
            " ".repeat(PAD_X),
            styled,
            " ".repeat(fill),
            border("│".into()),
        ));
    }
    out.push_str(&format!("{}{}\n", MARGIN, blank));
    out.push_str(&format!("{}{}\n", MARGIN, border(format!("└{}┘", "─".repeat(width)))));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn workspace() -> WorkspacePath {
        crate::workspace::resolve(Some("/")).unwrap()
    }

    #[test]
    fn test_wildcard_bind_shown_as_localhost() {
        let info = ReachabilityInfo::new("0.0.0.0:3000".parse().unwrap(), None);
        assert_eq!(info.local_url, "http://localhost:3000");
        assert_eq!(info.network_url, None);

        let info = ReachabilityInfo::new("[::]:3000".parse().unwrap(), None);
        assert_eq!(info.local_url, "http://localhost:3000");
    }

    #[test]
    fn test_specific_bind_and_lan() {
        let lan = Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 5)));
        let info = ReachabilityInfo::new("127.0.0.1:8080".parse().unwrap(), lan);
        assert_eq!(info.local_url, "http://127.0.0.1:8080");
        assert_eq!(info.network_url.as_deref(), Some("http://192.168.1.5:8080"));

        let info = ReachabilityInfo::new("[::1]:8080".parse().unwrap(), None);
        assert_eq!(info.local_url, "http://[::1]:8080");
    }

    #[test]
    fn test_report_contains_urls() {
        let info = ReachabilityInfo {
            local_url: "http://localhost:3000".into(),
            network_url: Some("http://192.168.1.5:3000".into()),
        };
        let report = render_report(&workspace(), &info);
        assert!(report.contains("Serving /"));
        assert!(report.contains("http://localhost:3000"));
        assert!(report.contains("On Your Network:"));
        assert!(report.contains("http://192.168.1.5:3000"));
    }

    #[test]
    fn test_report_without_network() {
        let info = ReachabilityInfo {
            local_url: "http://localhost:3000".into(),
            network_url: None,
        };
        let report = render_report(&workspace(), &info);
        assert!(report.contains("http://localhost:3000"));
        assert!(!report.contains("On Your Network"));
        assert!(!report.contains("- "));
    }
}
