//! `ScaffoldFilesystem` implementation over `std::fs`.

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::Mode;
use crate::ports::{OwnershipOutcome, PathState, ScaffoldFilesystem};

/// Real filesystem, one syscall per port method.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl ScaffoldFilesystem for LocalFilesystem {
    fn probe(&self, path: &Path) -> io::Result<PathState> {
        let metadata = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(PathState::Missing),
            Err(err) => return Err(err),
        };

        if !metadata.is_dir() {
            return Ok(PathState::NotDirectory);
        }
        if fs::read_dir(path)?.next().is_none() {
            Ok(PathState::EmptyDirectory)
        } else {
            Ok(PathState::PopulatedDirectory)
        }
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn set_mode(&self, path: &Path, mode: Mode) -> io::Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(mode.bits()))?;
        }
        #[cfg(not(unix))]
        let _ = (path, mode);
        Ok(())
    }

    fn mode(&self, path: &Path) -> io::Result<Option<Mode>> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let bits = fs::symlink_metadata(path)?.permissions().mode() & 0o777;
            Ok(Mode::new(bits))
        }
        #[cfg(not(unix))]
        {
            fs::symlink_metadata(path)?;
            Ok(None)
        }
    }

    fn set_owner(&self, path: &Path, owner: &str) -> io::Result<OwnershipOutcome> {
        let (user, group) = split_owner(owner);

        #[cfg(unix)]
        {
            let Some(uid) = lookup_uid(user)? else {
                return Ok(OwnershipOutcome::Skipped(format!("unknown user '{}'", user)));
            };
            let gid = match group {
                Some(group) => match lookup_gid(group)? {
                    Some(gid) => Some(gid),
                    None => return Ok(OwnershipOutcome::Skipped(format!("unknown group '{}'", group))),
                },
                None => None,
            };
            nix::unistd::chown(path, Some(uid), gid).map_err(io::Error::from)?;
            Ok(OwnershipOutcome::Applied)
        }
        #[cfg(not(unix))]
        {
            let _ = (path, user, group);
            Ok(OwnershipOutcome::Skipped("ownership is not supported on this platform".into()))
        }
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }
}

/// `"user"` or `"user:group"`; either side may be a name or a numeric id.
fn split_owner(owner: &str) -> (&str, Option<&str>) {
    match owner.split_once(':') {
        Some((user, group)) => (user.trim(), Some(group.trim())),
        None => (owner.trim(), None),
    }
}

#[cfg(unix)]
fn lookup_uid(user: &str) -> io::Result<Option<nix::unistd::Uid>> {
    use nix::unistd::{Uid, User};

    if let Ok(id) = user.parse::<u32>() {
        return Ok(Some(Uid::from_raw(id)));
    }
    if user.is_empty() {
        return Ok(None);
    }
    let found = User::from_name(user).map_err(io::Error::from)?;
    Ok(found.map(|entry| entry.uid))
}

#[cfg(unix)]
fn lookup_gid(group: &str) -> io::Result<Option<nix::unistd::Gid>> {
    use nix::unistd::{Gid, Group};

    if let Ok(id) = group.parse::<u32>() {
        return Ok(Some(Gid::from_raw(id)));
    }
    if group.is_empty() {
        return Ok(None);
    }
    let found = Group::from_name(group).map_err(io::Error::from)?;
    Ok(found.map(|entry| entry.gid))
}
