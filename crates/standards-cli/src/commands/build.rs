//! `standards build`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fd_lock::RwLock;
use standards_analysis::build::{build_index, build_index_and_write, BuildRequest};

use crate::cli::BuildArgs;
use crate::context::{emit, Context};
use crate::error::CliError;

pub fn run_build(ctx: &Context, args: &BuildArgs, out: &mut dyn Write) -> Result<u8, CliError> {
    let req = BuildRequest::new(&ctx.root, ctx.build_config());

    let report = if args.dry_run {
        build_index(&req)?
    } else {
        let lock_path = lock_path(&req.index_path());
        let lock_err = |e: std::io::Error| CliError::Lock {
            path: lock_path.display().to_string(),
            message: e.to_string(),
        };
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(lock_err)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(lock_err)?;
        let mut lock = RwLock::new(file);
        let _guard = lock.write().map_err(lock_err)?;
        tracing::debug!(path = %lock_path.display(), "acquired index write lock");
        build_index_and_write(&req)?
    };

    for warning in &report.warnings {
        tracing::debug!(%warning, "build warning");
    }
    let verb = if args.dry_run { "validated" } else { "wrote" };
    emit(
        out,
        None,
        &format!("{verb} {}: {}\n", report.index_path.display(), report.summary_line()),
    )?;
    Ok(0)
}

/// `<index>.lock` next to the index.
fn lock_path(index_path: &Path) -> PathBuf {
    let mut name = index_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    index_path.with_file_name(name)
}
