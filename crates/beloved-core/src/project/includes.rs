//! Includes manifest (`includes.lua`) registration

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Registration line for `name`, e.g. `Player = require 'Player'`
pub fn require_line(name: &str, prefix: &str) -> String {
    format!("{} = require '{}{}'\n", name, prefix, name)
}

/// Append a registration line to the manifest at `path`
///
/// A project without a manifest is left alone; returns whether a line was
/// written. Duplicate registrations are not filtered.
pub fn append(path: &Path, name: &str, prefix: &str) -> io::Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }

    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(require_line(name, prefix).as_bytes())?;
    Ok(true)
}
