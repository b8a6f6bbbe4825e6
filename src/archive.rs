use crate::context::Context;
use crate::error::Error;
use crate::request::PackagingRequest;
use crate::result::Result;
use crate::utils;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use time::{OffsetDateTime, UtcOffset};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Package `request.source_dir()` into `request.archive_path()`.
///
/// Entries are named relative to `root_dir`, so everything lands under a
/// single `base_dir/` prefix. The archive is built in a temporary file next
/// to the destination and renamed into place once complete; on failure the
/// destination is left as it was.
pub fn create_zip(ctx: &Context, request: &PackagingRequest) -> Result<PathBuf> {
    let source_dir = request.source_dir();
    if !source_dir.is_dir() {
        return Err(Error::SourceNotFound(source_dir));
    }

    let archive_path = request.archive_path();
    let archive_dir = request.archive_dir();
    utils::ensure_dir(archive_dir)?;

    let temp = tempfile::Builder::new()
        .prefix(".plugin-zip-")
        .suffix(".tmp")
        .tempfile_in(archive_dir)?;

    let skip = InProgress::new(archive_dir, temp.path(), &archive_path)?;

    let mut zip = ZipWriter::new(temp);
    let walkdir = WalkDir::new(&source_dir).sort_by_file_name();

    for entry in walkdir {
        let entry = entry?;
        let path = entry.path();
        let relative = path
            .strip_prefix(&source_dir)
            .map_err(|_| io::Error::other(format!("{} escaped the source tree", path.display())))?;
        let name = utils::entry_name(&request.base_dir.join(relative))?;

        if entry.file_type().is_dir() {
            add_directory(ctx, &mut zip, &name, &entry.metadata()?)?;
        } else if path.is_file() {
            if skip.matches(path) {
                continue;
            }
            add_file(ctx, &mut zip, &name, path)?;
        } else if path.is_dir() {
            // Linked directories are recorded but never descended into
            add_directory(ctx, &mut zip, &name, &fs::metadata(path)?)?;
        } else if ctx.verbose {
            println!("Skipping {}", path.display());
        }
    }

    let temp = zip.finish()?;
    temp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(temp.path(), fs::Permissions::from_mode(0o644))?;
    }

    temp.persist(&archive_path)?;
    Ok(archive_path)
}

fn add_directory(
    ctx: &Context,
    zip: &mut ZipWriter<tempfile::NamedTempFile>,
    name: &str,
    metadata: &fs::Metadata,
) -> Result<()> {
    if ctx.verbose {
        println!("Adding {}/", name);
    }
    zip.add_directory(format!("{}/", name), entry_options(metadata))?;
    Ok(())
}

fn add_file(
    ctx: &Context,
    zip: &mut ZipWriter<tempfile::NamedTempFile>,
    name: &str,
    path: &Path,
) -> Result<()> {
    if ctx.verbose {
        println!("Adding {}", name);
    }

    let mut file = File::open(path)?;
    let metadata = file.metadata()?;
    zip.start_file(name, entry_options(&metadata))?;
    io::copy(&mut file, zip)?;
    Ok(())
}

fn entry_options(metadata: &fs::Metadata) -> SimpleFileOptions {
    let mut options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(metadata.len() >= u32::MAX as u64);

    if let Some(modified) = modified_time(metadata) {
        options = options.last_modified_time(modified);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        options = options.unix_permissions(metadata.permissions().mode() & 0o7777);
    }

    options
}

/// File modification time as local wall-clock time in ZIP form;
/// `None` outside 1980..=2107
fn modified_time(metadata: &fs::Metadata) -> Option<DateTime> {
    let local = local_time(OffsetDateTime::from(metadata.modified().ok()?));
    DateTime::from_date_and_time(
        u16::try_from(local.year()).ok()?,
        u8::from(local.month()),
        local.day(),
        local.hour(),
        local.minute(),
        local.second(),
    )
    .ok()
}

/// Shift to the local offset in effect at `at`, staying in UTC when the
/// offset cannot be determined
fn local_time(at: OffsetDateTime) -> OffsetDateTime {
    let offset = UtcOffset::local_offset_at(at).unwrap_or(UtcOffset::UTC);
    at.to_offset(offset)
}

/// Identifies the archive being written (and its final name) so it is never
/// packed into itself when the output lives inside the source tree.
struct InProgress {
    dir: PathBuf,
    names: [Option<std::ffi::OsString>; 2],
}

impl InProgress {
    fn new(archive_dir: &Path, temp: &Path, archive: &Path) -> Result<Self> {
        Ok(Self {
            dir: archive_dir.canonicalize()?,
            names: [
                temp.file_name().map(OsStr::to_os_string),
                archive.file_name().map(OsStr::to_os_string),
            ],
        })
    }

    fn matches(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name() else {
            return false;
        };
        if !self.names.iter().flatten().any(|n| n == file_name) {
            return false;
        }

        path.parent()
            .and_then(|p| p.canonicalize().ok())
            .is_some_and(|p| p == self.dir)
    }
}
