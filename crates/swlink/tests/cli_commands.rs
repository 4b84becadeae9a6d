#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::{Command, Output};

fn swlink(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_swlink"))
        .args(["--log-level", "error", "--format", "json"])
        .args(args)
        .output()
        .expect("swlink should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "swlink-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

#[test]
fn crc_reference_vectors() {
    let output = swlink(&["crc", "--text", "123456789"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("\"crc\":\"0x29b1\""));

    let output = swlink(&["crc", "--text", "123456789", "--init", "0"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("\"crc\":\"0x31c3\""));
}

#[test]
fn frame_encode_then_decode() {
    let output = swlink(&["frame", "encode", "--target", "2", "--protocol", "2", "--hex", "6162"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("\"frame\":\"020261627337\""));
    assert!(out.contains("\"size\":6"));

    let output = swlink(&["frame", "decode", "020261627337"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("\"target_addr\":2"));
    assert!(out.contains("\"protocol\":\"RAW\""));
    assert!(out.contains("\"payload\":\"6162\""));
}

#[test]
fn corrupted_frame_returns_60() {
    let output = swlink(&["frame", "decode", "020261627338"]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("checksum mismatch"));

    let output = swlink(&["frame", "decode", "0102"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn packet_create_then_decode() {
    let output = swlink(&[
        "packet", "create", "--device", "1", "--target", "2", "--apid", "0x100", "--text", "hi",
    ]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("\"frame\":\"02010100c00000016869654f\""));
    assert!(out.contains("\"packets_sent\":1"));

    let output = swlink(&["packet", "decode", "02010100c00000016869654f"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("\"apid\":256"));
    assert!(out.contains("\"packet_type\":\"telemetry\""));
    assert!(out.contains("\"user_data\":\"6869\""));
    assert!(out.contains("\"bytes_received\":12"));
}

#[test]
fn packet_with_bad_apid_is_usage_error() {
    let output = swlink(&["packet", "create", "--target", "2", "--apid", "0x800", "--text", "x"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn route_with_inline_table() {
    let base = [
        "route", "--device", "1", "--ports", "2", "--route", "2:0", "--route", "3:1",
        "--connected", "0,1",
    ];

    let output = swlink(&[&base[..], &["2"][..]].concat());
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("\"decision\":\"forward\""));
    assert!(out.contains("\"port\":0"));

    let output = swlink(&[&base[..], &["3"][..]].concat());
    assert!(stdout(&output).contains("\"port\":1"));

    let output = swlink(&[&base[..], &["1"][..]].concat());
    assert!(stdout(&output).contains("\"decision\":\"local\""));

    let output = swlink(&[&base[..], &["5"][..]].concat());
    assert_eq!(output.status.code(), Some(66));
}

#[test]
fn route_from_config_file() {
    let dir = unique_temp_dir("route");
    let path = dir.join("router.json");
    std::fs::write(
        &path,
        r#"{ "device_addr": 1, "num_ports": 2, "routes": [{ "dest_addr": 2, "output_port": 1 }] }"#,
    )
    .expect("config should be writable");
    let path_arg = path.to_string_lossy().into_owned();

    // Port 1 is not connected in this config.
    let output = swlink(&["route", "--config", &path_arg, "2"]);
    assert_eq!(output.status.code(), Some(66));
    assert!(String::from_utf8_lossy(&output.stderr).contains("link on port 1"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn version_prints_package_version() {
    let output = swlink(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}
