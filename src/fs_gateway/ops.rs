//! Filesystem operations behind the gateway routes.
//!
//! Each function performs exactly one host filesystem action, synchronously,
//! and reports the outcome as Entry Records (or text lines for `read`). Paths
//! are resolved to absolute form first; no containment check is applied.

use std::fs;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::paths::{absolute, base_name, display, is_binary_path};
use crate::envelope::EntryRecord;
use crate::error::GatewayResult;

/// Immediate children of `directory` in enumeration order.
/// Directories report size 0, files their byte length; symlinks are followed.
pub fn list(directory: &str) -> GatewayResult<Vec<EntryRecord>> {
    let entries = fs::read_dir(directory)?;
    let base = absolute(directory)?;
    let mut out = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        let full = base.join(&name);
        let meta = fs::metadata(&full)?;
        if meta.is_dir() {
            out.push(EntryRecord::dir(name, display(&full)));
        } else {
            out.push(EntryRecord::file(name, display(&full), meta.len()));
        }
    }
    Ok(out)
}

/// Text files come back as their lines with terminators stripped; files with a
/// binary extension come back as one base64 element.
pub fn read(path: &str) -> GatewayResult<Vec<String>> {
    let full = absolute(path)?;
    if is_binary_path(path) {
        let bytes = fs::read(&full)?;
        return Ok(vec![STANDARD.encode(bytes)]);
    }
    let text = fs::read_to_string(&full)?;
    Ok(split_lines(&text))
}

/// Splits on `\r\n`, `\n` and a lone `\r`. A trailing terminator does not
/// produce an empty last line.
fn split_lines(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(i) => {
                out.push(rest[..i].to_string());
                let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + skip..];
            }
            None => {
                out.push(rest.to_string());
                break;
            }
        }
    }
    out
}

/// Overwrites `path`. Binary content is base64 and is decoded before the file
/// is opened; the write itself is not atomic.
pub fn write(path: &str, content: &str, binary: bool) -> GatewayResult<EntryRecord> {
    let full = absolute(path)?;
    if binary {
        // Tolerate line-wrapped base64.
        let compact: String = content.split_whitespace().collect();
        let bytes = STANDARD.decode(compact.as_bytes())?;
        fs::write(&full, bytes)?;
    } else {
        fs::write(&full, content.as_bytes())?;
    }
    let size = fs::metadata(&full)?.len();
    Ok(EntryRecord::file(base_name(&full), display(&full), size))
}

/// Creates `path` and any missing ancestors; an existing directory is fine.
pub fn mkdir(path: &str) -> GatewayResult<EntryRecord> {
    let full = absolute(path)?;
    fs::create_dir_all(&full)?;
    Ok(EntryRecord::dir(base_name(&full), display(&full)))
}

/// Removes a file, an empty directory, or with `recursive` a whole tree.
/// A symlink is removed as a link, never followed.
pub fn delete(path: &str, recursive: bool) -> GatewayResult<EntryRecord> {
    let full = absolute(path)?;
    let is_dir = fs::symlink_metadata(&full).map(|m| m.is_dir()).unwrap_or(false);
    if is_dir {
        if recursive {
            fs::remove_dir_all(&full)?;
        } else {
            fs::remove_dir(&full)?;
        }
        Ok(EntryRecord::dir("Deleted", display(&full)))
    } else {
        fs::remove_file(&full)?;
        Ok(EntryRecord::file("Deleted", display(&full), 0))
    }
}

#[cfg(test)]
#[path = "ops_tests.rs"]
mod ops_tests;
