//! Library listing and importing from the shared libraries folder

use super::{ensure_project, includes};
use crate::error::{Error, IoContext, Result};
use crate::report::{Action, Outcome, Reporter, Status};
use crate::session::Session;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Folder inside a project that receives imported libraries
pub const LIB_DIR: &str = "lib";

/// Suffix tried when a library name has no exact match
pub const LIBRARY_SUFFIX: &str = ".lua";

/// Names available in the libraries folder, sorted case-insensitively
pub fn list_libraries(session: &Session) -> Result<Vec<String>> {
    let folder = session.libraries_folder();
    if !folder.is_dir() {
        return Err(Error::LibrariesFolderMissing(folder.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(folder)
        .with_context(|| format!("Failed to read {}", folder.display()))?
    {
        let entry = entry.with_context(|| format!("Failed to read {}", folder.display()))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    names.sort_by_key(|name| name.to_lowercase());
    Ok(names)
}

/// Locate a library: exact name first, then with the `.lua` suffix
///
/// Names must be plain relative paths: empty names or names with `..`,
/// `.` or a root never resolve.
pub fn resolve_library(folder: &Path, name: &str) -> Option<PathBuf> {
    let mut components = Path::new(name).components().peekable();
    if components.peek().is_none() || !components.all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }

    let exact = folder.join(name);
    if exact.exists() {
        return Some(exact);
    }

    let suffixed = folder.join(format!("{}{}", name, LIBRARY_SUFFIX));
    suffixed.exists().then_some(suffixed)
}

/// Copy each named library into `<project>/lib` and register it as `lib.<name>`
///
/// The batch stops at the first name that cannot be found in the libraries
/// folder: libraries before it stay imported, later names are never tried,
/// and [`Error::LibraryNotFound`] is returned. A library that is found but
/// fails to copy is reported and the batch continues.
pub fn import_libraries(
    session: &Session,
    names: &[String],
    reporter: &mut impl Reporter,
) -> Result<()> {
    ensure_project(session)?;

    let lib_dir = session.root.join(LIB_DIR);
    if !lib_dir.exists() {
        fs::create_dir(&lib_dir)
            .with_context(|| format!("Failed to create directory: {}", lib_dir.display()))?;
        reporter.report(Status::new(Action::Folder, LIB_DIR, Outcome::Created));
    }

    for lib_name in names {
        let Some(source) = resolve_library(session.libraries_folder(), lib_name) else {
            reporter.report(Status::new(
                Action::Library,
                lib_name,
                Outcome::Failed("library does not exist".to_string()),
            ));
            return Err(Error::LibraryNotFound(lib_name.clone()));
        };

        reporter.report(Status::new(Action::Library, lib_name, Outcome::Started));

        let file_name = source.file_name().map(PathBuf::from).unwrap_or_default();
        if let Err(e) = copy_entry(&source, &lib_dir.join(file_name)) {
            reporter.report(Status::new(
                Action::Library,
                lib_name,
                Outcome::Failed(e.to_string()),
            ));
            continue;
        }
        reporter.report(Status::new(Action::Library, lib_name, Outcome::Created));

        match includes::append(&session.includes_path(), lib_name, "lib.") {
            Ok(true) => reporter.report(Status::new(Action::Include, lib_name, Outcome::Created)),
            Ok(false) => {}
            Err(e) => reporter.report(Status::new(
                Action::Include,
                lib_name,
                Outcome::Failed(e.to_string()),
            )),
        }
    }

    Ok(())
}

/// Copy a file verbatim, or a directory tree recursively
///
/// Copying a directory onto an existing destination fails.
fn copy_entry(source: &Path, dest: &Path) -> Result<()> {
    if source.is_file() {
        fs::copy(source, dest).with_context(|| {
            format!("Failed to copy {} to {}", source.display(), dest.display())
        })?;
        return Ok(());
    }

    if dest.exists() {
        return Err(Error::io(
            format!("Failed to copy {}", source.display()),
            std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", dest.display()),
            ),
        ));
    }

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| {
            Error::io(format!("Failed to walk {}", source.display()), e.into())
        })?;
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::templates::TemplateRegistry;
    use tempfile::TempDir;

    struct Fixture {
        _libs: TempDir,
        project: TempDir,
        session: Session,
    }

    fn fixture() -> Fixture {
        let libs = TempDir::new().unwrap();
        fs::write(libs.path().join("X.lua"), "return 'x'").unwrap();
        fs::write(libs.path().join("Z.lua"), "return 'z'").unwrap();
        fs::write(libs.path().join("anim8"), "return 'anim8'").unwrap();
        fs::create_dir_all(libs.path().join("hump/sub")).unwrap();
        fs::write(libs.path().join("hump/init.lua"), "-- hump").unwrap();
        fs::write(libs.path().join("hump/sub/timer.lua"), "-- timer").unwrap();

        let project = TempDir::new().unwrap();
        fs::write(project.path().join("main.lua"), "").unwrap();
        fs::write(project.path().join("includes.lua"), "").unwrap();

        let config = Config {
            libraries_folder: libs.path().to_path_buf(),
            ..Config::default()
        };
        let session = Session::new(
            project.path().to_path_buf(),
            config,
            TemplateRegistry::builtin(),
        );

        Fixture {
            _libs: libs,
            project,
            session,
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn includes(fx: &Fixture) -> String {
        fs::read_to_string(fx.project.path().join("includes.lua")).unwrap()
    }

    #[test]
    fn test_list_libraries_sorted_case_insensitively() {
        let fx = fixture();
        fs::write(fx.session.libraries_folder().join("Bump.lua"), "").unwrap();

        let libs = list_libraries(&fx.session).unwrap();
        assert_eq!(libs, vec!["anim8", "Bump.lua", "hump", "X.lua", "Z.lua"]);
    }

    #[test]
    fn test_list_missing_folder() {
        let mut fx = fixture();
        fx.session.config.libraries_folder = PathBuf::from("/nonexistent/libs");
        assert!(matches!(
            list_libraries(&fx.session),
            Err(Error::LibrariesFolderMissing(_))
        ));
    }

    #[test]
    fn test_import_suffixed_file() {
        let fx = fixture();
        let mut statuses: Vec<Status> = Vec::new();

        import_libraries(&fx.session, &names(&["X"]), &mut statuses).unwrap();

        assert_eq!(
            fs::read_to_string(fx.project.path().join("lib/X.lua")).unwrap(),
            "return 'x'"
        );
        assert_eq!(includes(&fx), "X = require 'lib.X'\n");
    }

    #[test]
    fn test_exact_match_wins_over_suffix() {
        let fx = fixture();
        import_libraries(&fx.session, &names(&["anim8"]), &mut Vec::<Status>::new()).unwrap();

        assert!(fx.project.path().join("lib/anim8").is_file());
        assert_eq!(includes(&fx), "anim8 = require 'lib.anim8'\n");
    }

    #[test]
    fn test_import_directory_tree() {
        let fx = fixture();
        import_libraries(&fx.session, &names(&["hump"]), &mut Vec::<Status>::new()).unwrap();

        let lib = fx.project.path().join("lib/hump");
        assert_eq!(fs::read_to_string(lib.join("init.lua")).unwrap(), "-- hump");
        assert_eq!(
            fs::read_to_string(lib.join("sub/timer.lua")).unwrap(),
            "-- timer"
        );
    }

    #[test]
    fn test_missing_library_stops_batch() {
        let fx = fixture();
        let mut statuses: Vec<Status> = Vec::new();

        let err = import_libraries(&fx.session, &names(&["X", "Y", "Z"]), &mut statuses)
            .unwrap_err();

        assert!(matches!(err, Error::LibraryNotFound(ref name) if name == "Y"));
        assert!(fx.project.path().join("lib/X.lua").exists());
        assert!(!fx.project.path().join("lib/Z.lua").exists());
        assert_eq!(includes(&fx), "X = require 'lib.X'\n");
        assert!(!statuses.iter().any(|s| s.subject == "Z"));
    }

    #[test]
    fn test_creates_lib_folder() {
        let fx = fixture();
        assert!(!fx.project.path().join(LIB_DIR).exists());
        let mut statuses: Vec<Status> = Vec::new();

        import_libraries(&fx.session, &[], &mut statuses).unwrap();

        assert!(fx.project.path().join(LIB_DIR).is_dir());
        assert_eq!(statuses.len(), 1);
    }

    #[test]
    fn test_reimporting_directory_fails_per_item() {
        let fx = fixture();
        import_libraries(&fx.session, &names(&["hump"]), &mut Vec::<Status>::new()).unwrap();
        let mut statuses: Vec<Status> = Vec::new();

        import_libraries(&fx.session, &names(&["hump", "X"]), &mut statuses).unwrap();

        assert_eq!(statuses.iter().filter(|s| s.is_failure()).count(), 1);
        assert_eq!(
            includes(&fx),
            "hump = require 'lib.hump'\nX = require 'lib.X'\n"
        );
    }

    #[test]
    fn test_import_outside_project() {
        let fx = fixture();
        fs::remove_file(fx.project.path().join("main.lua")).unwrap();

        let err = import_libraries(&fx.session, &names(&["X"]), &mut Vec::<Status>::new())
            .unwrap_err();
        assert!(matches!(err, Error::NotAProject(_)));
        assert!(!fx.project.path().join(LIB_DIR).exists());
    }

    #[test]
    fn test_names_outside_libraries_folder_never_resolve() {
        let fx = fixture();
        let folder = fx.session.libraries_folder();

        assert_eq!(resolve_library(folder, ""), None);
        assert_eq!(resolve_library(folder, "."), None);
        assert_eq!(resolve_library(folder, "../X"), None);
        assert_eq!(resolve_library(folder, "hump/../X"), None);
        assert_eq!(
            resolve_library(folder, "hump/sub/timer"),
            Some(folder.join("hump/sub/timer.lua"))
        );
    }

    #[test]
    fn test_empty_library_name_stops_batch() {
        let fx = fixture();

        let err = import_libraries(&fx.session, &names(&["", "X"]), &mut Vec::<Status>::new())
            .unwrap_err();

        assert!(matches!(err, Error::LibraryNotFound(ref name) if name.is_empty()));
        assert_eq!(fs::read_dir(fx.project.path().join(LIB_DIR)).unwrap().count(), 0);
        assert_eq!(includes(&fx), "");
    }
}
