//! Exported HTML file layout.

use std::fs;
use std::path::{Path, PathBuf};

/// Extension of exported page files.
pub const EXPORT_EXTENSION: &str = "html";

/// Write an exported page to `<dir>/<file_stem>.html`.
///
/// The file starts with a single attribution line linking back to the
/// source page, followed by the page HTML unchanged. `dir` is created if
/// missing.
pub(crate) fn write_export(
    dir: &Path,
    file_stem: &str,
    link: &str,
    title: &str,
    html: &str,
) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{file_stem}.{EXPORT_EXTENSION}"));
    let mut contents = attribution_line(link, title);
    contents.push_str(html);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Source attribution line prepended to every exported page.
pub(crate) fn attribution_line(link: &str, title: &str) -> String {
    format!(
        "<p>Source: <a href=\"{}\">{}</a></p>\n",
        escape_html(link),
        escape_html(title)
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
