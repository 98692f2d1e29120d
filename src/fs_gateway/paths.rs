use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

use crate::error::GatewayResult;

/// Extensions read and written as raw bytes rather than UTF-8 text.
pub const BINARY_EXTENSIONS: [&str; 5] = [".png", ".jpg", ".jpeg", ".bin", ".dat"];

/// Resolve a request path to absolute form against the process working
/// directory. `.` and `..` are folded lexically; symlinks are left alone and
/// nothing restricts where the result points.
pub fn absolute(p: &str) -> GatewayResult<PathBuf> {
    let pb = PathBuf::from(p);
    Ok(pb.absolutize()?.to_path_buf())
}

pub fn display(p: &Path) -> String {
    p.to_string_lossy().to_string()
}

/// Last path component, or an empty string for a root.
pub fn base_name(p: &Path) -> String {
    p.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
}

/// Case-insensitive suffix match against [`BINARY_EXTENSIONS`].
pub fn is_binary_path(p: &str) -> bool {
    let lower = p.to_lowercase();
    BINARY_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
