//! Clipboard sink used by `passkey copy`.
//!
//! On Linux the text is piped into `wl-copy`, `xclip` or `xsel` when one
//! of them is installed: those tools keep serving the selection after
//! this process exits, which an in-process X11/Wayland owner cannot do.
//! Everywhere else (and as the Linux fallback) `arboard` is used.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::errors::{PasskeyError, Result};

/// Something that can take a plaintext string and expose it to the user.
pub trait ClipboardSink {
    /// Place `text` on the clipboard.
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

/// The host's system clipboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

/// External helpers tried in order on Linux, with their arguments.
#[cfg(target_os = "linux")]
const LINUX_HELPERS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard", "-i"]),
    ("xsel", &["--clipboard", "--input"]),
];

impl ClipboardSink for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        #[cfg(target_os = "linux")]
        {
            for (program, args) in LINUX_HELPERS {
                if let Some(result) = pipe_to(program, args, text) {
                    return result;
                }
            }
        }

        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| PasskeyError::ClipboardUnavailable(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| PasskeyError::ClipboardUnavailable(e.to_string()))
    }
}

/// Run `program` with `text` on stdin.
///
/// Returns `None` if the program is not installed so the caller can try
/// the next one.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn pipe_to(program: &str, args: &[&str], text: &str) -> Option<Result<()>> {
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            return Some(Err(PasskeyError::ClipboardUnavailable(format!(
                "failed to launch {program}: {e}"
            ))));
        }
    };

    let written = child
        .stdin
        .take()
        .map(|mut stdin| stdin.write_all(text.as_bytes()))
        .transpose();

    let status = child.wait();

    Some(match (written, status) {
        (Ok(_), Ok(status)) if status.success() => Ok(()),
        (Ok(_), Ok(status)) => Err(PasskeyError::ClipboardUnavailable(format!(
            "{program} exited with code {}",
            status.code().unwrap_or(-1)
        ))),
        (Err(e), _) | (_, Err(e)) => Err(PasskeyError::ClipboardUnavailable(format!(
            "{program}: {e}"
        ))),
    })
}
