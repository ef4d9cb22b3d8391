//! Bootstrap file import injection
//!
//! Makes sure the application's bootstrap module (by default
//! `appengine_config.py`) starts with `import <lib>` so the managed directory
//! is put on `sys.path` before anything else is imported.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, fs as fs_err};

/// Default bootstrap file name
pub const DEFAULT_BOOTSTRAP_FILE: &str = "appengine_config.py";

/// What the injector did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The file did not exist and was written with the import line
    Created,
    /// The import line was prepended to existing content
    Updated,
    /// The import line was already there, nothing was written
    AlreadyPresent,
}

/// The import line for a managed directory
pub fn import_line(lib_name: &str) -> String {
    format!("import {lib_name}")
}

/// True when some line of `content` imports the managed directory
fn has_import(content: &str, import: &str) -> bool {
    content.lines().any(|line| is_import_of(line, import))
}

/// `import <lib>` as a whole statement: a trailing comment, `as <alias>`,
/// `;` or `, <other>` may follow, a longer module name may not
fn is_import_of(line: &str, import: &str) -> bool {
    let code = line.split('#').next().unwrap_or_default().trim();
    let Some(rest) = code.strip_prefix(import) else {
        return false;
    };
    rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == ';' || c == ',')
}

/// Prepend `import <lib_name>` to the bootstrap file unless already present.
///
/// The new content goes to a temporary file next to the bootstrap file which
/// then replaces it, so an interrupted write never leaves a truncated file.
pub fn inject(path: &Path, lib_name: &str) -> Result<BootstrapOutcome> {
    let import = import_line(lib_name);

    let (existing, outcome) = if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| fs_err::read_failed(path.display().to_string(), e.to_string()))?;
        (content, BootstrapOutcome::Updated)
    } else {
        (String::new(), BootstrapOutcome::Created)
    };

    if has_import(&existing, &import) {
        tracing::debug!(path = %path.display(), "import already present");
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    tracing::debug!(path = %path.display(), ?outcome, "writing import line");
    write_atomically(path, &format!("{import}\n{existing}"))?;

    Ok(outcome)
}

fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let write_err = |reason: String| fs_err::write_failed(path.display().to_string(), reason);

    // A symlinked bootstrap file is patched in place of its target
    let target = match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            dunce::canonicalize(path).map_err(|e| write_err(e.to_string()))?
        }
        _ => path.to_path_buf(),
    };
    let permissions = fs::metadata(&target).ok().map(|meta| meta.permissions());

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| write_err(e.to_string()))?;
    temp.write_all(content.as_bytes())
        .map_err(|e| write_err(e.to_string()))?;
    if let Some(permissions) = permissions {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| write_err(e.to_string()))?;
    }
    temp.persist(&target)
        .map_err(|e| write_err(e.error.to_string()))?;
    Ok(())
}
