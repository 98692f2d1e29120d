//! One `WirelessBackend` per platform family, chosen once at startup.
//! Each backend maps the four abstract operations onto its native tooling and
//! keeps that tooling's output format behind `parse`.

use std::sync::Arc;

use tracing::debug;

use super::command::{CommandOutput, CommandRunner};
use super::parse::{self, NetworkRecord};
use super::platform::Platform;
use crate::error::{GatewayError, GatewayResult};

pub const AIRPORT: &str =
    "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";
pub const NETWORKSETUP: &str = "/usr/sbin/networksetup";
/// Interface used on macOS when none is configured or discovered.
pub const DEFAULT_MAC_DEVICE: &str = "en0";

pub trait WirelessBackend: Send + Sync {
    fn scan(&self) -> GatewayResult<Vec<NetworkRecord>>;
    /// SSID of the associated network, `None` when not connected.
    fn current(&self) -> GatewayResult<Option<String>>;
    /// `password` is only passed on when non-empty.
    fn join(&self, ssid: &str, password: &str) -> GatewayResult<()>;
    fn disconnect(&self) -> GatewayResult<()>;
}

/// Select the backend for `platform`.
pub fn backend_for(
    platform: &Platform,
    runner: Arc<dyn CommandRunner>,
    wifi_device: Option<String>,
) -> Arc<dyn WirelessBackend> {
    match platform {
        Platform::Linux => Arc::new(NmcliBackend { runner }),
        Platform::MacOs => Arc::new(AirportBackend { runner, device: wifi_device }),
        Platform::Windows => Arc::new(NetshBackend { runner }),
        Platform::Unsupported(name) => Arc::new(UnsupportedBackend { name: name.clone() }),
    }
}

/// Query commands: stderr, else a fixed message.
fn query_output(out: CommandOutput, fallback: &str) -> GatewayResult<String> {
    if out.success() {
        Ok(out.stdout)
    } else {
        Err(GatewayError::command(out.stderr_or(fallback)))
    }
}

/// Action commands: stderr, else stdout.
fn action_output(out: CommandOutput) -> GatewayResult<()> {
    if out.success() {
        Ok(())
    } else {
        Err(GatewayError::command(out.stderr_or_stdout()))
    }
}

/// NetworkManager via `nmcli`.
pub struct NmcliBackend {
    runner: Arc<dyn CommandRunner>,
}

impl WirelessBackend for NmcliBackend {
    fn scan(&self) -> GatewayResult<Vec<NetworkRecord>> {
        let out = self.runner.run("nmcli", &["-t", "-f", "SSID,SIGNAL,SECURITY", "device", "wifi", "list"]);
        Ok(parse::nmcli_scan(&query_output(out, "nmcli failed")?))
    }

    fn current(&self) -> GatewayResult<Option<String>> {
        let out = self.runner.run("nmcli", &["-t", "-f", "ACTIVE,SSID", "dev", "wifi"]);
        Ok(parse::nmcli_current(&query_output(out, "nmcli failed")?))
    }

    fn join(&self, ssid: &str, password: &str) -> GatewayResult<()> {
        let mut args = vec!["device", "wifi", "connect", ssid];
        if !password.is_empty() {
            args.extend(["password", password]);
        }
        action_output(self.runner.run("nmcli", &args))
    }

    fn disconnect(&self) -> GatewayResult<()> {
        // Power-cycle networking; stop at the first failure.
        action_output(self.runner.run("nmcli", &["networking", "off"]))?;
        action_output(self.runner.run("nmcli", &["networking", "on"]))
    }
}

/// macOS `airport` for scans and `networksetup` for everything else.
pub struct AirportBackend {
    runner: Arc<dyn CommandRunner>,
    device: Option<String>,
}

impl AirportBackend {
    /// Configured device, else the Wi-Fi hardware port, else `en0`.
    fn device(&self) -> String {
        if let Some(d) = &self.device {
            return d.clone();
        }
        let out = self.runner.run(NETWORKSETUP, &["-listallhardwareports"]);
        let found = if out.success() { parse::wifi_device(&out.stdout) } else { None };
        found.unwrap_or_else(|| {
            debug!(target: "net_gateway", "no Wi-Fi hardware port found; using {}", DEFAULT_MAC_DEVICE);
            DEFAULT_MAC_DEVICE.to_string()
        })
    }
}

impl WirelessBackend for AirportBackend {
    fn scan(&self) -> GatewayResult<Vec<NetworkRecord>> {
        let out = self.runner.run(AIRPORT, &["-s"]);
        Ok(parse::airport_scan(&query_output(out, "airport failed")?))
    }

    fn current(&self) -> GatewayResult<Option<String>> {
        let dev = self.device();
        let out = self.runner.run(NETWORKSETUP, &["-getairportnetwork", &dev]);
        Ok(parse::airport_current(&query_output(out, "networksetup failed")?))
    }

    fn join(&self, ssid: &str, password: &str) -> GatewayResult<()> {
        let dev = self.device();
        let mut args = vec!["-setairportnetwork", dev.as_str(), ssid];
        if !password.is_empty() {
            args.push(password);
        }
        action_output(self.runner.run(NETWORKSETUP, &args))
    }

    fn disconnect(&self) -> GatewayResult<()> {
        let dev = self.device();
        action_output(self.runner.run(NETWORKSETUP, &["-setairportpower", &dev, "off"]))?;
        action_output(self.runner.run(NETWORKSETUP, &["-setairportpower", &dev, "on"]))
    }
}

/// Windows `netsh wlan`.
pub struct NetshBackend {
    runner: Arc<dyn CommandRunner>,
}

impl WirelessBackend for NetshBackend {
    fn scan(&self) -> GatewayResult<Vec<NetworkRecord>> {
        let out = self.runner.run("netsh", &["wlan", "show", "networks", "mode=Bssid"]);
        Ok(parse::netsh_scan(&query_output(out, "netsh failed")?))
    }

    fn current(&self) -> GatewayResult<Option<String>> {
        let out = self.runner.run("netsh", &["wlan", "show", "interfaces"]);
        Ok(parse::netsh_current(&query_output(out, "netsh failed")?))
    }

    /// netsh connects through a stored profile named after the SSID; the
    /// password is not used.
    fn join(&self, ssid: &str, password: &str) -> GatewayResult<()> {
        if !password.is_empty() {
            debug!(target: "net_gateway", "netsh connects via saved profile; password ignored");
        }
        let ssid_arg = format!("ssid={}", ssid);
        let name_arg = format!("name={}", ssid);
        action_output(self.runner.run("netsh", &["wlan", "connect", &ssid_arg, &name_arg]))
    }

    fn disconnect(&self) -> GatewayResult<()> {
        action_output(self.runner.run("netsh", &["wlan", "disconnect"]))
    }
}

/// Every operation fails without running anything.
pub struct UnsupportedBackend {
    name: String,
}

impl WirelessBackend for UnsupportedBackend {
    fn scan(&self) -> GatewayResult<Vec<NetworkRecord>> { Err(GatewayError::unsupported(&self.name)) }
    fn current(&self) -> GatewayResult<Option<String>> { Err(GatewayError::unsupported(&self.name)) }
    fn join(&self, _ssid: &str, _password: &str) -> GatewayResult<()> { Err(GatewayError::unsupported(&self.name)) }
    fn disconnect(&self) -> GatewayResult<()> { Err(GatewayError::unsupported(&self.name)) }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod backend_tests;
