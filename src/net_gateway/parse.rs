//! Parsers for the text printed by each platform's wireless tooling.
//! All functions are pure; they never fail and skip lines they cannot read.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// One network seen by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkRecord {
    pub ssid: String,
    pub signal: Option<String>,
    pub secured: bool,
}

static BSSID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[0-9A-Fa-f]{1,2}:){5}[0-9A-Fa-f]{1,2}$").unwrap());

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

fn value_after_colon(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, v)| v.trim())
}

/// Split one line of `nmcli -t` output. `\:` and `\\` are escapes for a
/// literal colon and backslash inside a field.
pub fn split_terse(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) => cur.push(next),
                None => cur.push('\\'),
            },
            ':' => fields.push(std::mem::take(&mut cur)),
            _ => cur.push(c),
        }
    }
    fields.push(cur);
    fields
}

/// `nmcli -t -f SSID,SIGNAL,SECURITY device wifi list`
pub fn nmcli_scan(out: &str) -> Vec<NetworkRecord> {
    let mut nets = Vec::new();
    for line in out.lines() {
        if line.is_empty() { continue; }
        let fields = split_terse(line);
        let ssid = fields[0].clone();
        let signal = fields.get(1).and_then(|s| non_empty(s));
        let security = fields.get(2).map(|s| s.trim()).unwrap_or("");
        nets.push(NetworkRecord { ssid, signal, secured: !security.is_empty() && security != "--" });
    }
    nets
}

/// `nmcli -t -f ACTIVE,SSID dev wifi`: the SSID on the row flagged `yes`.
pub fn nmcli_current(out: &str) -> Option<String> {
    out.lines()
        .map(split_terse)
        .find(|f| f.len() >= 2 && f[0] == "yes")
        .map(|f| f[1].clone())
}

/// `airport -s`. The first line is the column header. SSIDs are right
/// aligned and may contain spaces, so the row is split at the BSSID column
/// when one is present; otherwise the first token is taken as the SSID.
pub fn airport_scan(out: &str) -> Vec<NetworkRecord> {
    let mut nets = Vec::new();
    for line in out.lines().skip(1) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() { continue; }
        match tokens.iter().position(|t| BSSID.is_match(t)) {
            Some(idx) => nets.push(NetworkRecord {
                ssid: tokens[..idx].join(" "),
                signal: tokens.get(idx + 1).map(|s| s.to_string()),
                secured: tokens.last().is_some_and(|t| *t != "NONE"),
            }),
            None => nets.push(NetworkRecord { ssid: tokens[0].to_string(), signal: None, secured: true }),
        }
    }
    nets
}

/// `networksetup -getairportnetwork <dev>` prints `Current Wi-Fi Network: <ssid>`,
/// or a sentence without a colon when not associated.
pub fn airport_current(out: &str) -> Option<String> {
    value_after_colon(out).and_then(non_empty)
}

/// Device of the Wi-Fi (or AirPort) port in `networksetup -listallhardwareports`.
pub fn wifi_device(out: &str) -> Option<String> {
    let mut lines = out.lines();
    while let Some(line) = lines.next() {
        if line.contains("Wi-Fi") || line.contains("AirPort") {
            let device = lines.next().and_then(|l| l.split_whitespace().nth(1));
            return device.map(|d| d.to_string());
        }
    }
    None
}

/// `netsh wlan show networks mode=Bssid`
pub fn netsh_scan(out: &str) -> Vec<NetworkRecord> {
    let mut nets: Vec<NetworkRecord> = Vec::new();
    for line in out.lines() {
        let line = line.trim();
        if line.starts_with("SSID ") {
            if let Some(ssid) = value_after_colon(line) {
                nets.push(NetworkRecord { ssid: ssid.to_string(), signal: None, secured: true });
            }
            continue;
        }
        let Some(last) = nets.last_mut() else { continue };
        if line.starts_with("Authentication") {
            if let Some(auth) = value_after_colon(line) {
                last.secured = auth != "Open";
            }
        } else if line.starts_with("Signal") && last.signal.is_none() {
            last.signal = value_after_colon(line).and_then(non_empty);
        }
    }
    nets
}

/// `netsh wlan show interfaces`: the first `SSID : <name>` row.
pub fn netsh_current(out: &str) -> Option<String> {
    out.lines()
        .map(|l| l.trim())
        .find(|l| l.to_lowercase().starts_with("ssid") && l.contains(':'))
        .and_then(value_after_colon)
        .map(|s| s.to_string())
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod parse_tests;
