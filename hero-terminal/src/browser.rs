/// Opens links in the system browser
use hero_core::LinkOpener;
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

/// Hands URLs to the platform's default opener without waiting for it
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    type Error = io::Error;

    fn open_in_new_context(&mut self, url: &str) -> io::Result<()> {
        spawn_reaped(opener_command(url)).map(|_| ())
    }
}

/// Start `cmd` detached from the screen and reap it on a background thread
fn spawn_reaped(mut cmd: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    // The child must not draw over the alternate screen
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(thread::spawn(move || {
        let status = child.wait();
        match &status {
            Ok(s) if !s.success() => log::warn!("link opener exited with {s}"),
            Err(e) => log::warn!("waiting for link opener: {e}"),
            Ok(_) => {}
        }
        status
    }))
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_carries_url() {
        let cmd = opener_command("https://example.com");
        assert!(cmd.get_args().any(|a| a == "https://example.com"));
    }

    #[cfg(unix)]
    #[test]
    fn test_opener_child_is_reaped() {
        let waiter = spawn_reaped(Command::new("true")).unwrap();
        let status = waiter.join().unwrap().unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_missing_opener_is_an_error() {
        assert!(spawn_reaped(Command::new("hero-no-such-opener")).is_err());
    }
}
