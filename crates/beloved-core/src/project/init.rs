//! Project initialization: base folder, subfolders and seed files

use crate::report::{Action, Outcome, Reporter, Status};
use crate::session::{Session, PROJECT_NAME_PARAM};
use std::fs;
use std::path::Path;

/// Create `<root>/<name>` with the configured subfolders and seed files
///
/// Every folder and file is reported individually. Existing items are
/// skipped, and a failure on one item does not stop the others. When the
/// project folder exists afterwards, `session.root` moves into it.
pub fn init(session: &mut Session, name: &str, reporter: &mut impl Reporter) {
    session
        .parameters
        .insert(PROJECT_NAME_PARAM.to_string(), name.to_string());

    let project_dir = session.root.join(name);

    reporter.report(Status::new(Action::Folder, name, Outcome::Started));
    create_folder(&project_dir, name, reporter);

    for dir_name in &session.config.directories {
        let label = format!("{}/{}", name, dir_name);
        create_folder(&project_dir.join(dir_name), &label, reporter);
    }

    for file_name in &session.config.files {
        let label = format!("{}/{}", name, file_name);
        let target = project_dir.join(file_name);

        if target.exists() {
            reporter.report(Status::new(Action::File, label, Outcome::Skipped));
            continue;
        }

        let outcome = match session.registry.render(file_name, &session.parameters) {
            Ok(content) => match fs::write(&target, content.unwrap_or_default()) {
                Ok(()) => Outcome::Created,
                Err(e) => Outcome::Failed(e.to_string()),
            },
            Err(e) => Outcome::Failed(e.to_string()),
        };
        reporter.report(Status::new(Action::File, label, outcome));
    }

    if project_dir.is_dir() {
        session.root = project_dir;
    }
}

fn create_folder(path: &Path, label: &str, reporter: &mut impl Reporter) {
    let outcome = if path.exists() {
        Outcome::Skipped
    } else {
        match fs::create_dir(path) {
            Ok(()) => Outcome::Created,
            Err(e) => Outcome::Failed(e.to_string()),
        }
    };
    reporter.report(Status::new(Action::Folder, label, outcome));
}
