//! Network Gateway over real HTTP with a scripted process runner, so the
//! commands that would have run are observable and nothing touches the radio.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use hostbridge::config::{GatewayConfig, NetConfig};
use hostbridge::net_gateway::command::CommandOutput;
use hostbridge::net_gateway::testing::ScriptedRunner;
use hostbridge::net_gateway::{self, Platform};

async fn spawn(platform: Platform, runner: Arc<ScriptedRunner>) -> String {
    let config = NetConfig { gateway: GatewayConfig::network_default(), platform, wifi_device: None };
    let app = net_gateway::router_with_runner(&config, runner);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}", addr)
}

fn runner(outputs: Vec<CommandOutput>) -> Arc<ScriptedRunner> {
    Arc::new(ScriptedRunner::new(outputs))
}

#[tokio::test]
async fn networks_lists_scan_results() -> Result<()> {
    let r = runner(vec![CommandOutput::ok("Home:82:WPA2\nCafe:40:--")]);
    let base = spawn(Platform::Linux, r.clone()).await;

    let resp = reqwest::get(format!("{base}/networks")).await?;
    assert_eq!(resp.status().as_u16(), 200);
    let v: Value = resp.json().await?;
    assert_eq!(v, json!([
        {"ssid": "Home", "signal": "82", "secured": true},
        {"ssid": "Cafe", "signal": "40", "secured": false},
    ]));
    assert_eq!(r.calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn scan_failure_uses_stderr_or_fallback() -> Result<()> {
    let base = spawn(Platform::Linux, runner(vec![CommandOutput::failed(10, "")])).await;
    let resp = reqwest::get(format!("{base}/networks")).await?;
    assert_eq!(resp.status().as_u16(), 500);
    assert_eq!(resp.json::<Value>().await?, json!({"error": "nmcli failed"}));

    let base = spawn(Platform::Linux, runner(vec![CommandOutput::failed(10, "Wi-Fi is disabled")])).await;
    let resp = reqwest::get(format!("{base}/networks")).await?;
    assert_eq!(resp.json::<Value>().await?, json!({"error": "Wi-Fi is disabled"}));
    Ok(())
}

#[tokio::test]
async fn current_reports_ssid_or_null() -> Result<()> {
    let base = spawn(Platform::Linux, runner(vec![CommandOutput::ok("no:Other\nyes:Home")])).await;
    let v: Value = reqwest::get(format!("{base}/current")).await?.json().await?;
    assert_eq!(v, json!({"ssid": "Home"}));

    let base = spawn(Platform::Linux, runner(vec![CommandOutput::ok("no:Other")])).await;
    let resp = reqwest::get(format!("{base}/current")).await?;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.json::<Value>().await?, json!({"ssid": null}));
    Ok(())
}

#[tokio::test]
async fn join_without_ssid_is_400_and_runs_nothing() -> Result<()> {
    let r = runner(vec![]);
    let base = spawn(Platform::Linux, r.clone()).await;
    let client = reqwest::Client::new();

    for body in [json!({"ssid": "", "password": "pw"}), json!({"password": "pw"})] {
        let resp = client.post(format!("{base}/join")).json(&body).send().await?;
        assert_eq!(resp.status().as_u16(), 400);
        assert_eq!(resp.json::<Value>().await?, json!({"error": "ssid required"}));
    }
    let resp = client.post(format!("{base}/join")).body("{{{").send().await?;
    assert_eq!(resp.status().as_u16(), 400);

    assert!(r.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn join_and_disconnect_success() -> Result<()> {
    let r = runner(vec![]);
    let base = spawn(Platform::Linux, r.clone()).await;
    let client = reqwest::Client::new();

    let resp = client.post(format!("{base}/join")).json(&json!({"ssid": "Home", "password": "pw"})).send().await?;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.json::<Value>().await?, json!({"ok": true}));

    let resp = client.post(format!("{base}/disconnect")).send().await?;
    assert_eq!(resp.json::<Value>().await?, json!({"ok": true}));

    let calls = r.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], vec!["nmcli", "device", "wifi", "connect", "Home", "password", "pw"]);
    Ok(())
}

#[tokio::test]
async fn join_failure_surfaces_tool_output() -> Result<()> {
    let out = CommandOutput { code: 4, stdout: "Error: Connection activation failed.".into(), stderr: String::new() };
    let base = spawn(Platform::Linux, runner(vec![out])).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/join"))
        .json(&json!({"ssid": "Home"}))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 500);
    assert_eq!(resp.json::<Value>().await?, json!({"error": "Error: Connection activation failed."}));
    Ok(())
}

#[tokio::test]
async fn unsupported_platform_fails_every_route_without_commands() -> Result<()> {
    let r = runner(vec![]);
    let base = spawn(Platform::Unsupported("plan9".into()), r.clone()).await;
    let client = reqwest::Client::new();
    let expected = json!({"error": "Unsupported OS: plan9"});

    let resp = client.get(format!("{base}/networks")).send().await?;
    assert_eq!(resp.status().as_u16(), 500);
    assert_eq!(resp.json::<Value>().await?, expected);

    let resp = client.get(format!("{base}/current")).send().await?;
    assert_eq!(resp.status().as_u16(), 500);
    assert_eq!(resp.json::<Value>().await?, expected);

    let resp = client.post(format!("{base}/join")).json(&json!({"ssid": "Home"})).send().await?;
    assert_eq!(resp.status().as_u16(), 500);
    assert_eq!(resp.json::<Value>().await?, expected);

    let resp = client.post(format!("{base}/disconnect")).send().await?;
    assert_eq!(resp.status().as_u16(), 500);
    assert_eq!(resp.json::<Value>().await?, expected);

    assert!(r.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404() -> Result<()> {
    let base = spawn(Platform::Linux, runner(vec![])).await;
    let resp = reqwest::get(format!("{base}/nope")).await?;
    assert_eq!(resp.status().as_u16(), 404);
    assert_eq!(resp.json::<Value>().await?, json!({"error": "Unknown route"}));
    assert_eq!(resp_cors(&base).await?, "*");
    Ok(())
}

async fn resp_cors(base: &str) -> Result<String> {
    let resp = reqwest::Client::new()
        .get(format!("{base}/networks"))
        .header("Origin", "http://localhost:8000")
        .send()
        .await?;
    Ok(resp.headers()["access-control-allow-origin"].to_str()?.to_string())
}
