use std::process::Stdio;

use crate::common::isolated_command;

#[test]
fn version_command_prints_product_line() {
    let output = isolated_command()
        .arg("version")
        .stdin(Stdio::null())
        .output()
        .expect("process should start");

    assert!(output.status.success(), "status: {:?}", output.status);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("MCP Server Template v{}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn invalid_port_aborts_startup_with_exit_code_one() {
    let output = isolated_command()
        .args(["start", "--transport", "stdio"])
        .env("PORT", "abc")
        .stdin(Stdio::null())
        .output()
        .expect("process should start");

    assert_eq!(output.status.code(), Some(1), "status: {:?}", output.status);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to start MCP server") && stderr.contains("PORT"),
        "stderr: {stderr}"
    );
    assert!(output.stdout.is_empty(), "stdout must stay clean");
}

#[test]
fn debug_flag_adds_detailed_error_on_failure() {
    let output = isolated_command()
        .args(["start", "--debug"])
        .env("PORT", "not-a-port")
        .stdin(Stdio::null())
        .output()
        .expect("process should start");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Detailed error:"), "stderr: {stderr}");
}
