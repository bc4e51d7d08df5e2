//! Packaging a project into a `.love` archive

use super::ensure_project;
use crate::error::{Error, IoContext, Result};
use crate::report::{Action, Outcome, Reporter, Status};
use crate::session::Session;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Zip every project file outside the build directory
///
/// The archive is written to `<root>/<build_directory>/<love_output>/<name>.<ext>`,
/// `name` defaulting to the project folder's name. A file is left out when the
/// path of its folder, relative to the project root, contains the build
/// directory name anywhere (so `my.build.tools/` is excluded too). Entry names
/// are the files' paths relative to the project root, `/`-separated.
///
/// Returns the path of the written archive.
pub fn package(
    session: &Session,
    output_name: Option<&str>,
    reporter: &mut impl Reporter,
) -> Result<PathBuf> {
    let config = &session.config;
    let output_name = output_name
        .map(str::to_string)
        .unwrap_or_else(|| session.project_name());

    let archive_dir = config.archive_dir(&session.root);
    let archive_name = format!("{}.{}", output_name, config.archive_extension);
    reporter.report(Status::new(
        Action::Archive,
        archive_dir.join(&archive_name).display().to_string(),
        Outcome::Started,
    ));

    ensure_project(session)?;

    fs::create_dir_all(&archive_dir)
        .with_context(|| format!("Failed to create directory: {}", archive_dir.display()))?;

    let archive_path = archive_dir.join(&archive_name);
    let file = File::create(&archive_path)
        .with_context(|| format!("Failed to create {}", archive_path.display()))?;

    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for entry in WalkDir::new(&session.root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            Error::io(format!("Failed to walk {}", session.root.display()), e.into())
        })?;
        if !entry.file_type().is_file() || entry.path() == archive_path {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(&session.root)
            .unwrap_or(entry.path());
        if is_excluded(relative, &config.build_directory) {
            continue;
        }

        let name = entry_name(relative);
        zip.start_file(name.as_str(), options)
            .map_err(|e| zip_error(&archive_path, e))?;

        let mut source = File::open(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        io::copy(&mut source, &mut zip)
            .with_context(|| format!("Failed to write {} to the archive", name))?;

        reporter.report(Status::new(Action::ArchiveEntry, name, Outcome::Created));
    }

    zip.finish().map_err(|e| zip_error(&archive_path, e))?;

    reporter.report(Status::new(
        Action::Archive,
        archive_path.display().to_string(),
        Outcome::Created,
    ));
    Ok(archive_path)
}

/// Whether the folder holding `relative` mentions the build directory name
///
/// An empty name is contained in every folder path, so it excludes everything.
fn is_excluded(relative: &Path, build_directory: &str) -> bool {
    relative
        .parent()
        .is_some_and(|dir| dir.to_string_lossy().contains(build_directory))
}

fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn zip_error(archive: &Path, e: zip::result::ZipError) -> Error {
    Error::io(
        format!("Failed to write {}", archive.display()),
        io::Error::other(e),
    )
}
