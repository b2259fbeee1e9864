//! Static lookup tables for file classification: reserved filenames,
//! unprocessable extensions, and the canonical-type alias table. All lookups
//! are case-insensitive.

use std::collections::HashMap;
use std::sync::LazyLock;

static RESERVED_FILES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("go.mod", "golang module manifest"),
        ("go.sum", "golang dependency checksum lockfile"),
        ("package.json", "javascript/typescript package manifest"),
        (
            "package-lock.json",
            "javascript/typescript project dependency lockfile",
        ),
        (".gitignore", "gitignore file"),
    ])
});

static UNPROCESSABLE_TYPES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // image types
        ("jpg", "image/jpg"),
        ("jpeg", "image/jpg"),
        ("jfif", "image/jpg"),
        ("pjpeg", "image/jpg"),
        ("pjp", "image/jpg"),
        ("png", "image/png"),
        ("apng", "image/png"),
        ("heic", "image/heic"),
        ("pdf", "image/pdf"),
        ("gif", "image/gif"),
        ("svg", "image/svg+xml"),
        ("webp", "image/webp"),
        ("ico", "image/x-icon"),
        ("cur", "image/x-icon"),
        ("bmp", "image/bmp"),
        ("tif", "image/tiff"),
        ("tiff", "image/tiff"),
        // video types
        ("avi", "video/x-msvideo"),
        ("mp4", "video/mp4"),
        ("mpeg", "video/mpeg"),
        ("webm", "video/webm"),
        // audio types
        ("aac", "audio/aac"),
        ("mid", "audio/midi"),
        ("midi", "audio/midi"),
        ("mp3", "audio/mp3"),
        ("wav", "audio/wav"),
        ("weba", "audio/webm"),
        // compressed data
        ("gz", "gzip compressed file"),
        ("zip", "zip compressed file"),
        ("7z", "7z compressed file"),
        ("rar", "rar archive file"),
        ("tar", "tar archive file"),
        ("jar", "java archive file"),
        // binaries, executables
        ("dll", "windows dynamic library file"),
        ("exe", "windows executable file"),
    ])
});

static CANONICAL_TYPES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // config types
        ("yaml", "YAML"),
        ("yml", "YAML"),
        ("xml", "XML"),
        ("json", "JSON data"),
        ("jsonl", "JSON data"),
        ("json data", "JSON data"),
        // text types
        ("markdown", "markdown"),
        ("md", "markdown"),
        ("text/plain", "plain text"),
        ("plain text", "plain text"),
        ("text", "plain text"),
        ("txt", "plain text"),
        ("readme.md", "readme file"),
        ("readme.txt", "readme file"),
        ("readme", "readme file"),
        ("readme file", "readme file"),
        // code types
        ("html", "HTML"),
        ("html5", "HTML"),
        ("hypertext markup language", "HTML"),
        ("css", "CSS"),
        ("style sheet", "CSS"),
        ("styles", "CSS"),
        ("python", "python code"),
        ("py", "python code"),
        ("python code", "python code"),
        ("go", "golang code"),
        ("golang", "golang code"),
        ("golang code", "golang code"),
        ("bash", "bash/shell script"),
        ("sh", "bash/shell script"),
        ("shell", "bash/shell script"),
        ("bash/shell script", "bash/shell script"),
        ("js", "javascript code"),
        ("mjs", "javascript code"),
        ("javascript", "javascript code"),
        ("javascript code", "javascript code"),
        ("jsx", "react code"),
        ("tsx", "react code"),
        ("react", "react code"),
        ("react code", "react code"),
        ("ts", "typescript code"),
        ("typescript", "typescript code"),
        ("typescript code", "typescript code"),
        ("cs", "c-sharp code"),
        ("c-sharp", "c-sharp code"),
        ("c sharp", "c-sharp code"),
        ("c#", "c-sharp code"),
        ("c-sharp code", "c-sharp code"),
    ])
});

/// Filenames that carry no information worth describing.
pub fn is_ignored(filename: &str) -> bool {
    let filename = filename.to_lowercase();
    if filename == "license" {
        return true;
    }
    matches!(last_extension(&filename), Some("ds_store"))
}

/// Looks up a reserved filename with a pre-assigned type that doubles as
/// its description.
pub fn resolve_reserved(filename: &str) -> Option<&'static str> {
    RESERVED_FILES.get(filename.to_lowercase().as_str()).copied()
}

/// Looks up the file's last extension against the media/archive/executable
/// table.
pub fn resolve_unprocessable(filename: &str) -> Option<&'static str> {
    let filename = filename.to_lowercase();
    let ext = last_extension(&filename)?;
    UNPROCESSABLE_TYPES.get(ext).copied()
}

/// Resolves a free-form type token to its canonical display label.
/// Idempotent: canonical labels resolve to themselves.
pub fn resolve_canonical(token: &str) -> Option<&'static str> {
    CANONICAL_TYPES.get(token.to_lowercase().as_str()).copied()
}

fn last_extension(filename: &str) -> Option<&str> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() { None } else { Some(ext) }
}
