//! Symbolic link creation
//!
//! The reconciler never branches on the platform itself; it receives a
//! [`LinkCreator`] picked once by [`detect`].

use std::io;
use std::path::Path;

use crate::error::{Result, link as link_err};

/// What the link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Directory,
    File,
}

/// Capability to create a symbolic link at `link` pointing to `source`
pub trait LinkCreator {
    fn create(&self, source: &Path, link: &Path, kind: LinkKind) -> Result<()>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Plain `symlink(2)`, available to every user on Unix
#[cfg(unix)]
#[derive(Debug, Default)]
pub struct NativeSymlink;

#[cfg(unix)]
impl LinkCreator for NativeSymlink {
    fn create(&self, source: &Path, link: &Path, _kind: LinkKind) -> Result<()> {
        std::os::unix::fs::symlink(source, link).map_err(|e| map_link_error(source, link, &e))
    }

    fn name(&self) -> &'static str {
        "native symlink"
    }
}

/// `CreateSymbolicLinkW`: the standard library first asks for an
/// unprivileged (developer mode) link and retries with the privileged call
#[cfg(windows)]
#[derive(Debug, Default)]
pub struct WindowsSymlink;

#[cfg(windows)]
impl LinkCreator for WindowsSymlink {
    fn create(&self, source: &Path, link: &Path, kind: LinkKind) -> Result<()> {
        let result = match kind {
            LinkKind::Directory => std::os::windows::fs::symlink_dir(source, link),
            LinkKind::File => std::os::windows::fs::symlink_file(source, link),
        };
        result.map_err(|e| map_link_error(source, link, &e))
    }

    fn name(&self) -> &'static str {
        "windows symlink"
    }
}

/// `ERROR_PRIVILEGE_NOT_HELD`
const PRIVILEGE_NOT_HELD: i32 = 1314;

fn map_link_error(source: &Path, link: &Path, e: &io::Error) -> crate::error::GaenvError {
    if e.kind() == io::ErrorKind::PermissionDenied || e.raw_os_error() == Some(PRIVILEGE_NOT_HELD) {
        link_err::permission_denied(link.display().to_string(), e.to_string())
    } else {
        link_err::failed(
            link.display().to_string(),
            source.display().to_string(),
            e.to_string(),
        )
    }
}

/// Pick the link creator for the running platform
#[cfg(unix)]
pub fn detect() -> Box<dyn LinkCreator> {
    Box::new(NativeSymlink)
}

/// Pick the link creator for the running platform
#[cfg(windows)]
pub fn detect() -> Box<dyn LinkCreator> {
    Box::new(WindowsSymlink)
}
