//! Line-oriented edits of the Ghostty config file.
//!
//! An option line is any non-blank line that does not start with `#` and
//! contains `=`; its key is the trimmed text before the first `=`. Edits only
//! ever prefix matching option lines with `# ` or append one line, so every
//! other line survives byte for byte.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ConfigFileError;

const COMMENT_PREFIX: &str = "# ";
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Handle to the config file a session edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full file content, or an empty string when the file does not exist yet.
    pub fn read_all(&self) -> Result<String, ConfigFileError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(ConfigFileError::io(&self.path, err)),
        }
    }

    /// Replace the file content, creating parent directories as needed.
    ///
    /// The new content is written to a temp file next to the real file and
    /// renamed into place. A symlinked config is written through to its
    /// target so the link itself survives.
    pub fn write_all(&self, content: &str) -> Result<(), ConfigFileError> {
        let target = self.write_target();
        let parent = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|err| ConfigFileError::io(&parent, err))?;

        let mut staged =
            tempfile::NamedTempFile::new_in(&parent).map_err(|err| ConfigFileError::io(&parent, err))?;
        staged
            .write_all(content.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|err| ConfigFileError::io(staged.path(), err))?;
        let permissions = match fs::metadata(&target) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(_) => new_file_permissions(),
        };
        if let Some(permissions) = permissions {
            staged
                .as_file()
                .set_permissions(permissions)
                .map_err(|err| ConfigFileError::io(&target, err))?;
        }
        staged
            .persist(&target)
            .map_err(|err| ConfigFileError::io(&target, err.error))?;
        info!(path = %target.display(), bytes = content.len(), "wrote config file");
        Ok(())
    }

    /// The file a write replaces: the resolved link target when the config exists.
    fn write_target(&self) -> PathBuf {
        fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone())
    }

    /// Value of the last active assignment of `key`, or an empty string.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigFileError> {
        let text = self.read_all()?;
        Ok(value_in(&text, key).unwrap_or_default().to_string())
    }

    /// Comment out active lines for the key of `line`, then append `line`.
    pub fn append_line(&self, line: &str) -> Result<(), ConfigFileError> {
        let text = self.read_all()?;
        let updated = append_line_to(&text, line);
        self.write_all(&updated)
    }

    /// Comment out every active assignment of `key`.
    ///
    /// Returns `false` without touching the file when nothing matched.
    pub fn comment_out(&self, key: &str) -> Result<bool, ConfigFileError> {
        let text = self.read_all()?;
        let (updated, changed) = comment_out_in(&text, key);
        if !changed {
            debug!(key, "no active line to comment out");
            return Ok(false);
        }
        self.write_all(&updated)?;
        Ok(true)
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

/// Key of an active option line, if `line` is one.
pub fn option_key(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    trimmed.split_once('=').map(|(key, _)| key.trim())
}

/// Key of the assignment a user typed (text before the first `=`).
pub fn assignment_key(line: &str) -> Option<&str> {
    line.split_once('=')
        .map(|(key, _)| key.trim())
        .filter(|key| !key.is_empty())
}

pub fn value_in<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            let (name, value) = trimmed.split_once('=')?;
            (name.trim() == key).then(|| value.trim())
        })
        .last()
}

pub fn comment_out_in(text: &str, key: &str) -> (String, bool) {
    let mut changed = false;
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| {
            if option_key(line) == Some(key) {
                changed = true;
                format!("{COMMENT_PREFIX}{line}")
            } else {
                line.to_string()
            }
        })
        .collect();
    (lines.join("\n"), changed)
}

pub fn append_line_to(text: &str, line: &str) -> String {
    let mut out = match assignment_key(line) {
        Some(key) => comment_out_in(text, key).0,
        None => text.to_string(),
    };
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(line);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_key_skips_comments_and_blanks() {
        assert_eq!(option_key("font-size = 12"), Some("font-size"));
        assert_eq!(option_key("  theme=dark  "), Some("theme"));
        assert_eq!(option_key("# font-size = 12"), None);
        assert_eq!(option_key("   "), None);
        assert_eq!(option_key("no separator"), None);
    }

    #[test]
    fn later_assignment_wins() {
        let text = "a = 1\n# a = 3\nb = x\na = 2\n";
        assert_eq!(value_in(text, "a"), Some("2"));
        assert_eq!(value_in(text, "b"), Some("x"));
        assert_eq!(value_in(text, "c"), None);
    }

    #[test]
    fn value_keeps_everything_after_first_separator() {
        assert_eq!(
            value_in("keybind = ctrl+a=new_tab\n", "keybind"),
            Some("ctrl+a=new_tab")
        );
    }

    #[test]
    fn comment_out_preserves_other_lines() {
        let text = "# header\n\nfont-size = 10\ntheme = dark\n  font-size=11\n";
        let (updated, changed) = comment_out_in(text, "font-size");
        assert!(changed);
        assert_eq!(
            updated,
            "# header\n\n# font-size = 10\ntheme = dark\n#   font-size=11\n"
        );
        assert_eq!(updated.split('\n').count(), text.split('\n').count());
    }

    #[test]
    fn comment_out_twice_is_a_no_op() {
        let (first, changed) = comment_out_in("font-size = 10\n", "font-size");
        assert!(changed);
        let (second, changed_again) = comment_out_in(&first, "font-size");
        assert!(!changed_again);
        assert_eq!(first, second);
    }

    #[test]
    fn append_to_empty_text() {
        assert_eq!(append_line_to("", "font-size = 12"), "font-size = 12\n");
    }

    #[test]
    fn append_replaces_previous_assignment() {
        assert_eq!(
            append_line_to("font-size = 10\n", "font-size = 14"),
            "# font-size = 10\nfont-size = 14\n"
        );
    }

    #[test]
    fn append_adds_missing_trailing_newline() {
        assert_eq!(
            append_line_to("theme = dark", "font-size = 14"),
            "theme = dark\nfont-size = 14\n"
        );
    }

    #[test]
    fn append_without_separator_does_not_comment() {
        assert_eq!(
            append_line_to("font-size = 10\n", "font-size"),
            "font-size = 10\nfont-size\n"
        );
    }

    #[test]
    fn file_operations_round_trip_in_temp_dir() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let file = ConfigFile::new(dir.path().join("nested").join("config"));

        assert_eq!(file.read_all().expect("read missing"), "");
        assert!(!file.comment_out("font-size").expect("comment missing file"));
        assert!(!file.path().exists());

        file.append_line("font-size = 12").expect("append");
        assert_eq!(file.get_value("font-size").expect("get value"), "12");

        assert!(file.comment_out("font-size").expect("comment out"));
        assert_eq!(file.read_all().expect("read"), "# font-size = 12\n");
        assert_eq!(file.get_value("font-size").expect("get value"), "");
    }

    #[cfg(unix)]
    #[test]
    fn writes_go_through_a_symlinked_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let dotfiles = dir.path().join("dotfiles");
        fs::create_dir_all(&dotfiles).expect("create dotfiles dir");
        let real = dotfiles.join("ghostty-config");
        fs::write(&real, "theme = dark\n").expect("seed real config");
        let link = dir.path().join("config");
        std::os::unix::fs::symlink(&real, &link).expect("create symlink");

        let file = ConfigFile::new(&link);
        file.append_line("font-size = 14").expect("append");

        let meta = fs::symlink_metadata(&link).expect("stat link");
        assert!(meta.file_type().is_symlink(), "config link was replaced");
        assert_eq!(
            fs::read_to_string(&real).expect("read real config"),
            "theme = dark\nfont-size = 14\n"
        );
        assert_eq!(file.read_all().expect("read through link"), "theme = dark\nfont-size = 14\n");
    }

    #[cfg(unix)]
    #[test]
    fn new_config_is_world_readable_and_existing_mode_is_kept() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("create temp dir");
        let file = ConfigFile::new(dir.path().join("config"));
        file.write_all("theme = dark\n").expect("create config");
        let mode = fs::metadata(file.path()).expect("stat new config").permissions().mode();
        assert_eq!(mode & 0o777, 0o644);

        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o600)).expect("chmod");
        file.write_all("theme = light\n").expect("rewrite config");
        let mode = fs::metadata(file.path()).expect("stat rewritten config").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
