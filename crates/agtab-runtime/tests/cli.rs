//! End-to-end runs of the `agtab` binary against a scripted tmux and a
//! fake procfs tree.

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const FAKE_TMUX: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
case "$1" in
  list-panes) cat "$dir/panes" ;;
  capture-pane) cat "$dir/capture-$3" 2>/dev/null || exit 1 ;;
  *) echo "$*" >> "$dir/calls" ;;
esac
"#;

const CODEX_WORKING: &str =
    "\u{2022} Working on parser fix (3s \u{2022} esc to interrupt)\n\u{203a} \n";

struct Scene {
    _tmp: tempfile::TempDir,
    tmux_dir: PathBuf,
    proc_root: PathBuf,
}

impl Scene {
    /// One window `main:1` whose bash shell (pid 100) runs codex (pid 200).
    fn codex_working() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");
        let tmux_dir = tmp.path().join("tmux");
        let proc_root = tmp.path().join("proc");
        fs::create_dir_all(&tmux_dir).expect("mkdir");

        let script = tmux_dir.join("tmux");
        fs::write(&script, FAKE_TMUX).expect("script");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");
        fs::write(tmux_dir.join("panes"), "main:1 100 0\n").expect("panes");
        fs::write(tmux_dir.join("capture-main:1"), CODEX_WORKING).expect("capture");

        write_proc(&proc_root, 100, 1, "bash", b"-bash\0");
        write_proc(&proc_root, 200, 100, "codex", b"codex\0");

        Self {
            _tmp: tmp,
            tmux_dir,
            proc_root,
        }
    }

    fn agtab(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_agtab"));
        cmd.args(args)
            .arg("--tmux-bin")
            .arg(self.tmux_dir.join("tmux"))
            .arg("--proc-root")
            .arg(&self.proc_root);
        clean_env(&mut cmd);
        cmd
    }

    fn calls(&self) -> String {
        fs::read_to_string(self.tmux_dir.join("calls")).unwrap_or_default()
    }
}

fn write_proc(root: &Path, pid: u32, ppid: u32, comm: &str, cmdline: &[u8]) {
    let dir = root.join(pid.to_string());
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(
        dir.join("stat"),
        format!("{pid} ({comm}) S {ppid} {pid} {pid} 0"),
    )
    .expect("stat");
    fs::write(dir.join("cmdline"), cmdline).expect("cmdline");
    fs::write(dir.join("comm"), format!("{comm}\n")).expect("comm");
}

fn clean_env(cmd: &mut Command) {
    for key in [
        "AGTAB_TMUX_SOCKET_PATH",
        "AGTAB_TMUX_SOCKET_NAME",
        "AGTAB_CONFIG",
        "AGTAB_LOG",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "agtab failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn once_dry_run_prints_labels_without_renaming() {
    let scene = Scene::codex_working();
    let output = scene
        .agtab(&["once", "--dry-run"])
        .output()
        .expect("run agtab");
    assert_eq!(stdout(&output), "main:1\tx \u{1f9e0} parser\n");
    assert_eq!(scene.calls(), "");
}

#[test]
fn once_renames_window() {
    let scene = Scene::codex_working();
    let output = scene.agtab(&["once"]).output().expect("run agtab");
    assert_eq!(stdout(&output), "main:1\tx \u{1f9e0} parser\n");
    assert_eq!(
        scene.calls(),
        "rename-window -t main:1 x \u{1f9e0} parser\n"
    );
}

#[test]
fn once_with_no_tmux_server_prints_nothing() {
    let scene = Scene::codex_working();
    fs::remove_file(scene.tmux_dir.join("panes")).expect("rm");
    let output = scene.agtab(&["once"]).output().expect("run agtab");
    assert_eq!(stdout(&output), "");
}

#[test]
fn config_file_is_validated() {
    let scene = Scene::codex_working();
    let config = scene.tmux_dir.join("agtab.toml");
    fs::write(&config, "stability_threshold = 0\n").expect("config");
    let config = config.to_str().expect("utf-8 path");
    let output = scene
        .agtab(&["once", "--config", config])
        .output()
        .expect("run agtab");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("stability_threshold"));
    assert_eq!(scene.calls(), "");
}

#[test]
fn classify_reads_stdin() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_agtab"));
    cmd.arg("classify")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    clean_env(&mut cmd);
    let mut child = cmd.spawn().expect("spawn agtab");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(CODEX_WORKING.as_bytes())
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(json["active"], serde_json::json!(true));
    assert_eq!(json["topic"], serde_json::json!("parser"));
    assert_eq!(json["attention_signature"], serde_json::Value::Null);
}
