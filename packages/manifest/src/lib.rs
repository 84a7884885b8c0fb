// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Module with helpers to rewrite the `version` field of a JSON manifest.

use std::fs::{read_to_string, write};
use std::io;
use std::path::{Path, PathBuf, absolute};

use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

/// Failure classes produced by [`set_version`].
///
/// Every variant carries the absolute path of the manifest it refers to, so the
/// message printed for the operator names the file that caused the failure.
#[derive(Debug, Error)]
pub enum Error {
    /// The manifest file could not be read.
    #[error("Failed to read {}", path.display())]
    Read {
        /// Path the read was attempted on.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
    /// The manifest content is not valid JSON.
    #[error("Failed to parse {}", path.display())]
    Parse {
        /// Path of the manifest that failed to parse.
        path: PathBuf,
        /// Parser diagnostic with line and column information.
        #[source]
        source: serde_json::Error,
    },
    /// The top-level JSON value is not an object, so there is no `version`
    /// entry to rewrite.
    #[error("Top-level value of {} is not a JSON object", path.display())]
    NotAnObject {
        /// Path of the offending manifest.
        path: PathBuf,
    },
    /// The updated manifest could not be serialized back to JSON text.
    #[error("Failed to serialize {}", path.display())]
    Serialize {
        /// Path of the manifest being rewritten.
        path: PathBuf,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },
    /// The updated manifest could not be written back to disk.
    #[error("Failed to write {}", path.display())]
    Write {
        /// Path the write was attempted on.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
}

/// Override the `version` entry of the JSON manifest at `path` with the given value.
///
/// This implementation uses `serde_json` with the `preserve_order` feature to ensure
/// that the manifest is updated without changing the order of entries; a manifest
/// without a `version` entry gets one appended after the existing keys. The file is
/// re-serialized with 4-space indentation regardless of its previous layout, and the
/// version string is stored verbatim, without any format validation.
///
/// Nothing is written until the manifest has been read, parsed and re-serialized, so
/// any failure up to that point leaves the file untouched.
pub fn set_version(path: &Path, version: &str) -> Result<(), Error> {
    // Resolution is lexical, relative to the current working directory.
    let path = absolute(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let content = read_to_string(&path).map_err(|source| Error::Read {
        path: path.clone(),
        source,
    })?;

    let mut manifest: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| Error::Parse {
            path: path.clone(),
            source,
        })?;

    let Some(entries) = manifest.as_object_mut() else {
        return Err(Error::NotAnObject { path });
    };
    entries.insert(
        "version".to_owned(),
        serde_json::Value::String(version.to_owned()),
    );

    let mut new_content = to_pretty_json(&manifest).map_err(|source| Error::Serialize {
        path: path.clone(),
        source,
    })?;
    new_content.push(b'\n');
    write(&path, new_content).map_err(|source| Error::Write { path, source })?;

    Ok(())
}

/// Serialize a JSON value with 4-space indentation, the manifest house style.
fn to_pretty_json(value: &serde_json::Value) -> serde_json::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(128);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn to_pretty_json_indentation_test() -> Result<()> {
        let value = json!({
            "name": "demo",
            "requirements": ["first", "second"],
            "options": {"port": 8080, "tls": false}
        });

        let expected = indoc! {r#"
            {
                "name": "demo",
                "requirements": [
                    "first",
                    "second"
                ],
                "options": {
                    "port": 8080,
                    "tls": false
                }
            }"#};
        assert_eq!(expected, String::from_utf8(to_pretty_json(&value)?)?);

        Ok(())
    }

    #[test]
    fn to_pretty_json_empty_object_test() -> Result<()> {
        let rendered = to_pretty_json(&json!({}))?;
        assert_eq!("{}", String::from_utf8(rendered)?);

        Ok(())
    }
}
