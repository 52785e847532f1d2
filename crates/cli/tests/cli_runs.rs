use assert_cmd::cargo::cargo_bin_cmd;

#[test]
fn nodectl_help_lists_the_surfaces() {
    let output = cargo_bin_cmd!("nodectl")
        .arg("--help")
        .output()
        .expect("CLI execution failed");
    assert!(
        output.status.success(),
        "CLI exited with status {:?}",
        output.status
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lnd"), "stdout missing lnd: {stdout}");
    assert!(stdout.contains("core"), "stdout missing core: {stdout}");
    assert!(
        stdout.contains("balances"),
        "stdout missing balances: {stdout}"
    );
}

#[test]
fn missing_node_configuration_is_reported() {
    let output = cargo_bin_cmd!("nodectl")
        .args(["lnd", "getinfo"])
        .output()
        .expect("CLI execution failed");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no eligible node"),
        "stderr missing diagnosis: {stderr}"
    );
}

#[test]
fn registry_profile_supplies_the_connection() {
    let path = std::env::temp_dir().join("nodectl-test-nodes.json");
    std::fs::write(
        &path,
        r#"[{
            "id": "ln0",
            "label": "test",
            "address": "127.0.0.1:1",
            "command_set": "lnd_rest",
            "credential": "deadbeef"
        }]"#,
    )
    .expect("write nodes file");

    // Port 1 refuses connections, so a transport error proves the profile
    // was selected and dialed.
    let output = cargo_bin_cmd!("nodectl")
        .args([
            "--nodes",
            path.to_str().expect("utf-8 path"),
            "--timeout",
            "5",
            "lnd",
            "getinfo",
        ])
        .output()
        .expect("CLI execution failed");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("transport"),
        "selection should reach the transport, stderr: {stderr}"
    );
}
