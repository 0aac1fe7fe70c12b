//! One-time merge of per-version store files into the canonical file
//!
//! The debugger backend writes a separate `saved-breakpoints-<version>` file
//! per interpreter version. To present a single breakpoint set regardless of
//! which version launches next, every sibling is absorbed into the canonical
//! file exactly once and then replaced by a filesystem link to it. Once all
//! siblings are links, re-running the merge is a no-op.

use crate::paths::{StorePaths, CANONICAL_NAME};
use bp_core::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(unix)]
use std::os::unix::fs::symlink;
#[cfg(windows)]
use std::os::windows::fs::symlink_file as symlink;

/// Filesystem changes a merge run will perform
///
/// Computed up front so callers can inspect (and tests can assert) what a
/// merge is about to do before anything is touched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergePlan {
    /// Siblings whose contents must be absorbed into the canonical file
    /// before being replaced with links
    pub absorb: Vec<PathBuf>,
    /// Version files that do not exist yet and will be created as links
    pub link: Vec<PathBuf>,
}

impl MergePlan {
    /// True when executing the plan would touch nothing
    pub fn is_noop(&self) -> bool {
        self.absorb.is_empty() && self.link.is_empty()
    }
}

/// Compute the merge plan for the current directory state
///
/// `active_version` is the interpreter version the next debug session will
/// run under; its store file is created as a link if missing entirely.
pub fn plan(paths: &StorePaths, active_version: Option<&str>) -> Result<MergePlan> {
    let canonical = paths.canonical_file();
    let mut plan = MergePlan::default();

    for sibling in paths.sibling_files()? {
        if !is_link_to(&sibling, &canonical) {
            plan.absorb.push(sibling);
        }
    }

    if let Some(version) = active_version {
        let version_file = paths.version_file(version);
        let exists = fs::symlink_metadata(&version_file).is_ok();
        if !exists && !plan.absorb.contains(&version_file) {
            plan.link.push(version_file);
        }
    }

    Ok(plan)
}

/// Execute a previously computed plan
///
/// Each absorbed sibling is read in full before anything is deleted; a
/// sibling that cannot be read aborts the merge with its contents intact so
/// no breakpoint is lost. After execution every version file is a link to
/// the canonical file.
///
/// Links target the bare canonical file name: sibling and canonical always
/// share a directory, and a relative target stays valid however the store
/// directory is addressed (relative `--store-dir`, renamed parent).
pub fn execute(paths: &StorePaths, plan: &MergePlan) -> Result<()> {
    paths.ensure_dir()?;
    let canonical = paths.canonical_file();
    ensure_exists(&canonical)?;

    for sibling in &plan.absorb {
        let contents = fs::read_to_string(sibling)?;
        append(&canonical, &contents)?;
        fs::remove_file(sibling)?;
        symlink(Path::new(CANONICAL_NAME), sibling)?;
        info!(sibling = %sibling.display(), "absorbed version store file");
    }

    for version_file in &plan.link {
        symlink(Path::new(CANONICAL_NAME), version_file)?;
        debug!(file = %version_file.display(), "linked version store file");
    }

    Ok(())
}

/// Plan and execute in one step, returning the executed plan
pub fn merge(paths: &StorePaths, active_version: Option<&str>) -> Result<MergePlan> {
    let plan = plan(paths, active_version)?;
    if !plan.is_noop() {
        execute(paths, &plan)?;
    }
    Ok(plan)
}

/// Verify link identity by reading the target, not just link-ness
///
/// Accepts both the bare-name targets this merger writes and absolute
/// targets left behind by the backend or earlier store layouts.
fn is_link_to(path: &Path, canonical: &Path) -> bool {
    match fs::read_link(path) {
        Ok(target) => target == Path::new(CANONICAL_NAME) || target == canonical,
        Err(_) => false,
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(())
}

fn append(path: &Path, contents: &str) -> Result<()> {
    use std::io::Write;
    let mut file = fs::OpenOptions::new().append(true).open(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}
