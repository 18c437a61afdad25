use std::error::Error;
use std::ffi::CString;
use std::fmt;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::record::{AttrFlags, DeviceId, FieldMask, StatusRecord, Timestamp};

/// Options for one metadata query. Immutable; passed by reference so that no
/// option state outlives a single call.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions {
    /// Follow the final symlink instead of reporting on the link itself.
    pub follow_symlinks: bool,
    /// Do not trigger automounts while resolving the path.
    pub no_automount: bool,
    /// Request only the `stat(2)`-compatible field set.
    pub basic_only: bool,
}

/// Failure of a metadata query.
#[derive(Debug)]
pub enum QueryError {
    /// The `statx` syscall itself is unavailable. No path can succeed, so
    /// callers should treat this as fatal for the whole run.
    Unsupported,
    /// The query failed for this path only.
    Path { path: PathBuf, source: io::Error },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Unsupported => write!(
                f,
                "the statx syscall is not supported (Linux kernel 4.11 or newer is required)"
            ),
            QueryError::Path { path, source } => {
                write!(f, "cannot statx '{}': {}", path.display(), source)
            }
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QueryError::Unsupported => None,
            QueryError::Path { source, .. } => Some(source),
        }
    }
}

fn timestamp(ts: &libc::statx_timestamp) -> Timestamp {
    Timestamp {
        secs: ts.tv_sec,
        nanos: ts.tv_nsec,
    }
}

/// Query extended file status for `path` with a single `statx(2)` call.
///
/// `ENOSYS` maps to [`QueryError::Unsupported`]; every other failure maps to
/// [`QueryError::Path`] with the offending path attached.
#[cfg(target_os = "linux")]
pub fn query_status(path: &Path, opts: &QueryOptions) -> Result<StatusRecord, QueryError> {
    let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| QueryError::Path {
        path: path.to_owned(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "path contains a NUL byte"),
    })?;

    let mut flags = libc::AT_SYMLINK_NOFOLLOW;
    if opts.no_automount {
        flags |= libc::AT_NO_AUTOMOUNT;
    }
    if opts.follow_symlinks {
        flags &= !libc::AT_SYMLINK_NOFOLLOW;
    }

    let mask = if opts.basic_only {
        libc::STATX_BASIC_STATS
    } else {
        libc::STATX_ALL
    };

    debug!(
        "statx {:?} flags={:#x} mask={:#x}",
        path, flags, mask
    );

    let mut raw: libc::statx = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statx(libc::AT_FDCWD, c_path.as_ptr(), flags, mask, &mut raw) };
    if rc != 0 {
        let err = io::Error::last_os_error();
        return Err(match err.raw_os_error() {
            Some(libc::ENOSYS) => QueryError::Unsupported,
            _ => QueryError::Path {
                path: path.to_owned(),
                source: err,
            },
        });
    }

    Ok(StatusRecord {
        mask: FieldMask::from_bits_retain(raw.stx_mask),
        block_size: raw.stx_blksize,
        size: raw.stx_size,
        blocks: raw.stx_blocks,
        mode: raw.stx_mode,
        inode: raw.stx_ino,
        link_count: raw.stx_nlink,
        uid: raw.stx_uid,
        gid: raw.stx_gid,
        atime: timestamp(&raw.stx_atime),
        btime: timestamp(&raw.stx_btime),
        ctime: timestamp(&raw.stx_ctime),
        mtime: timestamp(&raw.stx_mtime),
        device: DeviceId {
            major: raw.stx_dev_major,
            minor: raw.stx_dev_minor,
        },
        rdev: DeviceId {
            major: raw.stx_rdev_major,
            minor: raw.stx_rdev_minor,
        },
        attributes: AttrFlags::from_bits_retain(raw.stx_attributes),
        attributes_mask: AttrFlags::from_bits_retain(raw.stx_attributes_mask),
    })
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
