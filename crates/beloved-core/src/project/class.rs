//! Class stub generation

use super::{ensure_project, includes};
use crate::error::Result;
use crate::report::{Action, Outcome, Reporter, Status};
use crate::session::{Session, CLASS_NAME_PARAM};
use crate::templates::CLASS_TEMPLATE;
use std::fs;

/// Create `<name>.lua` for each class name and register it in `includes.lua`
///
/// Fails without writing anything when `session.root` is not a project.
/// Existing class files are skipped; a class that cannot be rendered or
/// written is reported and the remaining names are still processed.
pub fn add_classes(session: &Session, names: &[String], reporter: &mut impl Reporter) -> Result<()> {
    ensure_project(session)?;

    for class_name in names {
        let target = session.root.join(format!("{}.lua", class_name));

        if target.exists() {
            reporter.report(Status::new(Action::Class, class_name, Outcome::Skipped));
            continue;
        }

        reporter.report(Status::new(Action::Class, class_name, Outcome::Started));

        let mut params = session.parameters.clone();
        params.insert(CLASS_NAME_PARAM.to_string(), class_name.clone());

        let content = match session.registry.render(CLASS_TEMPLATE, &params) {
            Ok(content) => content.unwrap_or_default(),
            Err(e) => {
                reporter.report(Status::new(
                    Action::Class,
                    class_name,
                    Outcome::Failed(e.to_string()),
                ));
                continue;
            }
        };

        if let Err(e) = fs::write(&target, content) {
            reporter.report(Status::new(
                Action::Class,
                class_name,
                Outcome::Failed(e.to_string()),
            ));
            continue;
        }
        reporter.report(Status::new(Action::Class, class_name, Outcome::Created));

        match includes::append(&session.includes_path(), class_name, "") {
            Ok(true) => {
                reporter.report(Status::new(Action::Include, class_name, Outcome::Created))
            }
            Ok(false) => {}
            Err(e) => reporter.report(Status::new(
                Action::Include,
                class_name,
                Outcome::Failed(e.to_string()),
            )),
        }
    }

    Ok(())
}
