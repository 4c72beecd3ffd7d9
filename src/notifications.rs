#[cfg(any(target_os = "macos", test))]
use std::io;
#[cfg(any(target_os = "macos", test))]
use std::process::{Command, Stdio};

/// Audio feedback when a task's countdown runs out.
/// Every implementation must swallow its own failures.
pub trait FinishCue {
    fn play_finish_cue(&self, task_name: &str);
}

/// Rings the terminal bell; on macOS also posts a notification with a chime
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalCue;

impl FinishCue for TerminalCue {
    fn play_finish_cue(&self, task_name: &str) {
        ring_bell();
        notify_task_done(task_name);
    }
}

fn ring_bell() {
    use std::io::Write;

    let mut stdout = std::io::stdout();
    if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
        tracing::debug!(error = %e, "terminal bell unavailable");
    }
}

/// Send a desktop notification when a task is finished
pub fn notify_task_done(task_name: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "🎉 {}" with title "Kids Timer" sound name "Glass""#,
            task_name.replace('"', "\\\"")
        );

        let mut command = Command::new("osascript");
        command.arg("-e").arg(&script);
        if let Err(e) = spawn_detached(&mut command) {
            tracing::debug!(error = %e, "desktop notification unavailable");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = task_name;
    }
}

/// Start `command` without waiting for it; its output is discarded
#[cfg(any(target_os = "macos", test))]
fn spawn_detached(command: &mut Command) -> io::Result<()> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(drop)
}
