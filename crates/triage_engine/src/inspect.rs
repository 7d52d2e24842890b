use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use triage_logging::triage_warn;

/// Bytes examined when sniffing a file's type.
const SNIFF_LEN: u64 = 512;

/// What the file system can tell about a candidate upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub file_name: String,
    /// Content type implied by the file name; `None` for unlisted extensions.
    pub declared_mime: Option<String>,
    pub size: u64,
}

pub fn inspect_file(path: &Path) -> io::Result<FileInfo> {
    let file = File::open(path)?;
    let meta = file.metadata()?;
    if !meta.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
    }

    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN).read_to_end(&mut head)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    // The name decides the type. Content only confirms it.
    let declared_mime = mime_for_name(&file_name);
    if let Some(declared) = declared_mime {
        if !head.is_empty() && sniff_mime(&head) != Some(declared) {
            triage_warn!("{} does not look like {}", file_name, declared);
        }
    }

    Ok(FileInfo {
        path: path.to_path_buf(),
        file_name,
        declared_mime: declared_mime.map(str::to_string),
        size: meta.len(),
    })
}

/// `application/pdf` for the PDF magic, `text/plain` for NUL-free UTF-8.
pub fn sniff_mime(head: &[u8]) -> Option<&'static str> {
    if head.starts_with(b"%PDF-") {
        return Some("application/pdf");
    }
    if head.is_empty() || head.contains(&0) {
        return None;
    }
    match std::str::from_utf8(head) {
        Ok(_) => Some("text/plain"),
        // A multi-byte sequence cut off by the sniff window is still text.
        Err(err) if err.error_len().is_none() => Some("text/plain"),
        Err(_) => None,
    }
}

pub fn mime_for_name(file_name: &str) -> Option<&'static str> {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".txt") {
        Some("text/plain")
    } else if lower.ends_with(".pdf") {
        Some("application/pdf")
    } else {
        None
    }
}
