use std::path::PathBuf;
use std::process::{Command, Output};

use bytes::BytesMut;
use framelink_wire::{encode_frame, Frame};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/framelink-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn framelink(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_framelink"))
        .args(args)
        .output()
        .expect("binary should run")
}

#[test]
fn send_then_recv_roundtrip() {
    let dir = unique_temp_dir("roundtrip");
    let path = dir.join("frames.bin");
    let path = path.to_str().unwrap();

    let sent = framelink(&["send", path, "--id", "7", "--data", "Hi", "--format", "json"]);
    assert!(sent.status.success(), "send failed: {sent:?}");

    // Exactly the 6 wire bytes of the Hi frame.
    let wire = std::fs::read(path).unwrap();
    assert_eq!(wire, vec![0x55, 0x07, 0x02, 0x48, 0x69, 0x24]);

    let recv = framelink(&["recv", path, "--format", "json"]);
    assert!(recv.status.success(), "recv failed: {recv:?}");
    let stdout = String::from_utf8(recv.stdout).unwrap();
    assert!(stdout.contains("\"message_id\":7"), "stdout: {stdout}");
    assert!(stdout.contains("\"valid\":true"), "stdout: {stdout}");
    assert!(stdout.contains("\"payload\":\"Hi\""), "stdout: {stdout}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_then_strict_recv_fails_with_data_invalid() {
    let dir = unique_temp_dir("corrupt");
    let clean = dir.join("clean.bin");
    let bad = dir.join("bad.bin");

    let sent = framelink(&["send", clean.to_str().unwrap(), "--id", "7", "--data", "Hi"]);
    assert!(sent.status.success());

    let corrupted = framelink(&[
        "corrupt",
        clean.to_str().unwrap(),
        "--output",
        bad.to_str().unwrap(),
        "--probability",
        "1.0",
        "--seed",
        "42",
    ]);
    assert!(corrupted.status.success(), "corrupt failed: {corrupted:?}");
    assert_ne!(std::fs::read(&clean).unwrap(), std::fs::read(&bad).unwrap());

    let strict = framelink(&["recv", bad.to_str().unwrap(), "--strict", "--format", "json"]);
    assert_eq!(strict.status.code(), Some(60), "strict recv: {strict:?}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn scan_resyncs_past_garbage() {
    let dir = unique_temp_dir("scan");
    let path = dir.join("noisy.bin");

    let frame = Frame::new(9, &b"signal"[..]).unwrap();
    let mut wire = BytesMut::new();
    encode_frame(&frame, &mut wire);

    let mut noisy = vec![0xAB, 0xCD, 0xEF];
    noisy.extend_from_slice(&wire);
    std::fs::write(&path, &noisy).unwrap();

    let scan = framelink(&["scan", path.to_str().unwrap(), "--format", "json"]);
    assert!(scan.status.success(), "scan failed: {scan:?}");
    let stdout = String::from_utf8(scan.stdout).unwrap();
    assert!(stdout.contains("\"message_id\":9"), "stdout: {stdout}");
    assert!(stdout.contains("\"valid\":true"), "stdout: {stdout}");

    // The direct receive path refuses the same file: it expects a frame
    // boundary at byte zero.
    let recv = framelink(&["recv", path.to_str().unwrap()]);
    assert_eq!(recv.status.code(), Some(60), "recv: {recv:?}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn recv_reports_truncated_file() {
    let dir = unique_temp_dir("truncated");
    let path = dir.join("cut.bin");

    // Header declares 6 payload bytes, file ends after 2.
    std::fs::write(&path, [0x55, 0x01, 0x06, 0xAA, 0xBB]).unwrap();

    let recv = framelink(&["recv", path.to_str().unwrap()]);
    assert_eq!(recv.status.code(), Some(60), "recv: {recv:?}");
    let stderr = String::from_utf8(recv.stderr).unwrap();
    assert!(stderr.contains("ended inside a frame"), "stderr: {stderr}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn version_prints_package_version() {
    let version = framelink(&["version"]);
    assert!(version.status.success());
    let stdout = String::from_utf8(version.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn zero_length_payload_roundtrip() {
    let dir = unique_temp_dir("zerolen");
    let path = dir.join("empty.bin");
    let path = path.to_str().unwrap();

    let sent = framelink(&["send", path, "--id", "17"]);
    assert!(sent.status.success());

    // marker, id, length 0, checksum == id
    assert_eq!(std::fs::read(path).unwrap(), vec![0x55, 0x11, 0x00, 0x11]);

    let recv = framelink(&["recv", path, "--strict", "--format", "json"]);
    assert!(recv.status.success(), "recv failed: {recv:?}");
    let stdout = String::from_utf8(recv.stdout).unwrap();
    assert!(stdout.contains("\"length\":0"), "stdout: {stdout}");
    assert!(stdout.contains("\"valid\":true"), "stdout: {stdout}");

    let _ = std::fs::remove_dir_all(&dir);
}
