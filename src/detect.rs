//! Content-based detection heuristics.

use std::collections::HashMap;
use std::fs::Metadata;
use std::sync::LazyLock;

/// How many leading bytes of a file are sampled for binary detection.
pub const BINARY_SAMPLE_BYTES: usize = 8000;

/// Fraction of invalid UTF-8 positions above which a sample is called binary.
pub const BINARY_INVALID_RATIO: f64 = 0.05;

static SHEBANG_INTERPRETERS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("bash", "bash"),
        ("sh", "bash"),
        ("python", "python"),
        ("python3", "python"),
        ("node", "javascript"),
    ])
});

/// Estimates whether a byte sample is binary data rather than readable text,
/// by the ratio of invalid UTF-8 positions. An empty sample defaults to text.
pub fn is_probably_binary(data: &[u8]) -> bool {
    if data.is_empty() {
        return false;
    }
    let mut rest = &data[..data.len().min(BINARY_SAMPLE_BYTES)];
    let mut valid: usize = 0;
    let mut invalid: usize = 0;
    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(s) => {
                valid += s.chars().count();
                break;
            }
            Err(e) => {
                let good = e.valid_up_to();
                if let Ok(s) = std::str::from_utf8(&rest[..good]) {
                    valid += s.chars().count();
                }
                invalid += 1;
                rest = &rest[good + 1..];
            }
        }
    }
    let total = valid + invalid;
    if total == 0 {
        return false;
    }
    invalid as f64 / total as f64 > BINARY_INVALID_RATIO
}

/// Maps a first-line interpreter directive to a language token. Unknown
/// interpreters pass through as their literal name.
pub fn detect_shebang(content: &[u8]) -> Option<String> {
    let first_line = content.split(|&b| b == b'\n').next()?;
    let first_line = String::from_utf8_lossy(first_line);
    if !first_line.starts_with("#!/") {
        return None;
    }
    let last_part = first_line.rsplit('/').next()?;
    let interpreter = last_part.strip_prefix("env ").unwrap_or(last_part).trim();
    if interpreter.is_empty() {
        return None;
    }
    Some(
        SHEBANG_INTERPRETERS
            .get(interpreter)
            .copied()
            .map_or_else(|| interpreter.to_string(), str::to_string),
    )
}

#[cfg(unix)]
pub fn is_executable(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
pub fn is_executable(_metadata: &Metadata) -> bool {
    false
}
