use anyhow::Result;
use std::process::Command;
use tempfile::TempDir;

fn campaign_split() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_campaign_split"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn fatal_error_is_reported_once_with_failing_status() -> Result<()> {
    let dir = TempDir::new()?;
    let output = campaign_split()
        .arg("--input")
        .arg(dir.path().join("absent"))
        .arg("--output")
        .arg(dir.path().join("out"))
        .output()?;

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let all = format!("{}{}", stdout, stderr);
    assert_eq!(all.matches("reading input dir").count(), 1, "{}", all);
    assert!(all.contains("run aborted"));
    assert!(!stderr.contains("Error:"), "{}", stderr);
    Ok(())
}

#[test]
fn empty_input_exits_cleanly() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::create_dir(dir.path().join("in"))?;
    let status = campaign_split()
        .arg("--input")
        .arg(dir.path().join("in"))
        .arg("--output")
        .arg(dir.path().join("out"))
        .status()?;

    assert!(status.success());
    assert_eq!(std::fs::read_dir(dir.path().join("out"))?.count(), 0);
    Ok(())
}
