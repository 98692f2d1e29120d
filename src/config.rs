use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Args, Parser};

use crate::net_gateway::platform::Platform;

pub const DEFAULT_FS_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8765);
pub const DEFAULT_NET_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8234);

/// Which origins may call a gateway from a browser context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// `Access-Control-Allow-Origin: *`
    Any,
    Origins(Vec<String>),
}

impl CorsPolicy {
    /// Comma separated origin list; empty or `*` means any origin.
    pub fn parse(s: &str) -> Self {
        let origins: Vec<String> = s
            .split(',')
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(|o| o.to_string())
            .collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            CorsPolicy::Any
        } else {
            CorsPolicy::Origins(origins)
        }
    }
}

impl Default for CorsPolicy {
    fn default() -> Self { CorsPolicy::Any }
}

/// Framing shared by both gateways, handed to the server constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub bind: SocketAddr,
    pub cors: CorsPolicy,
}

impl GatewayConfig {
    pub fn filesystem_default() -> Self {
        Self { bind: DEFAULT_FS_ADDR, cors: CorsPolicy::Any }
    }

    pub fn network_default() -> Self {
        Self { bind: DEFAULT_NET_ADDR, cors: CorsPolicy::Any }
    }
}

/// Network Gateway startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetConfig {
    pub gateway: GatewayConfig,
    /// Platform family chosen once at startup.
    pub platform: Platform,
    /// macOS interface override (e.g. `en1`); discovered when unset.
    pub wifi_device: Option<String>,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self { gateway: GatewayConfig::network_default(), platform: Platform::detect(), wifi_device: None }
    }
}

// Flags common to every binary.
#[derive(Debug, Clone, Args)]
pub struct CorsArgs {
    /// Allowed CORS origins, comma separated (`*` for any)
    #[arg(long, env = "HOSTBRIDGE_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,
}

#[derive(Debug, Clone, Args)]
pub struct FsArgs {
    /// Filesystem Gateway bind address
    #[arg(long, env = "HOSTBRIDGE_FS_ADDR", default_value_t = DEFAULT_FS_ADDR)]
    pub fs_addr: SocketAddr,
}

impl FsArgs {
    pub fn config(&self, cors: &CorsArgs) -> GatewayConfig {
        GatewayConfig { bind: self.fs_addr, cors: CorsPolicy::parse(&cors.cors_origins) }
    }
}

#[derive(Debug, Clone, Args)]
pub struct NetArgs {
    /// Network Gateway bind address
    #[arg(long, env = "HOSTBRIDGE_NET_ADDR", default_value_t = DEFAULT_NET_ADDR)]
    pub net_addr: SocketAddr,

    /// Override platform detection: linux, macos (darwin), windows
    #[arg(long, env = "HOSTBRIDGE_PLATFORM")]
    pub platform: Option<String>,

    /// Wireless interface used on macOS
    #[arg(long, env = "HOSTBRIDGE_WIFI_DEVICE")]
    pub wifi_device: Option<String>,
}

impl NetArgs {
    pub fn config(&self, cors: &CorsArgs) -> NetConfig {
        let platform = match &self.platform {
            Some(name) => Platform::from_name(name),
            None => Platform::detect(),
        };
        NetConfig {
            gateway: GatewayConfig { bind: self.net_addr, cors: CorsPolicy::parse(&cors.cors_origins) },
            platform,
            wifi_device: self.wifi_device.clone().filter(|d| !d.trim().is_empty()),
        }
    }
}

/// Flags of the combined binary. Every flag falls back to an environment
/// variable, then to the built-in default.
#[derive(Debug, Clone, Parser)]
#[command(name = "hostbridge", version, about = "Loopback filesystem and Wi-Fi gateways")]
pub struct Cli {
    #[command(flatten)]
    pub fs: FsArgs,
    #[command(flatten)]
    pub net: NetArgs,
    #[command(flatten)]
    pub cors: CorsArgs,
}

impl Cli {
    pub fn fs_config(&self) -> GatewayConfig {
        self.fs.config(&self.cors)
    }

    pub fn net_config(&self) -> NetConfig {
        self.net.config(&self.cors)
    }
}

/// Flags of the filesystem-only binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "fs_gateway", version, about = "Loopback filesystem gateway")]
pub struct FsCli {
    #[command(flatten)]
    pub fs: FsArgs,
    #[command(flatten)]
    pub cors: CorsArgs,
}

impl FsCli {
    pub fn config(&self) -> GatewayConfig {
        self.fs.config(&self.cors)
    }
}

/// Flags of the network-only binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "net_gateway", version, about = "Loopback Wi-Fi gateway")]
pub struct NetCli {
    #[command(flatten)]
    pub net: NetArgs,
    #[command(flatten)]
    pub cors: CorsArgs,
}

impl NetCli {
    pub fn config(&self) -> NetConfig {
        self.net.config(&self.cors)
    }
}
