//! HTML page rendering.

use std::fmt::Write;

use super::metadata::ImportMetadata;

/// Render the page for one package.
pub fn render_page(meta: &ImportMetadata) -> Result<String, std::fmt::Error> {
    let mut html = String::with_capacity(512);
    let go_import = &meta.go_import;
    let docs_url = escape(&meta.docs_url);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    writeln!(
        html,
        "<meta name=\"go-import\" content=\"{} {} {}\">",
        escape(&go_import.import_prefix),
        escape(&go_import.vcs),
        escape(&go_import.repo_root),
    )?;
    if let Some(source) = &meta.go_source {
        writeln!(
            html,
            "<meta name=\"go-source\" content=\"{} {} {} {}\">",
            escape(&source.prefix),
            escape(&source.home),
            escape(&source.directory),
            escape(&source.file),
        )?;
    }
    if meta.redirect {
        writeln!(
            html,
            "<meta http-equiv=\"refresh\" content=\"0; url='{}'\">",
            docs_url
        )?;
    }
    html.push_str("</head>\n<body>\n");

    if meta.redirect {
        writeln!(html, "Redirecting to <a href=\"{0}\">{0}</a>", docs_url)?;
    } else {
        let repo_root = escape(&go_import.repo_root);
        writeln!(html, "Repository: <a href=\"{0}\">{0}</a>", repo_root)?;
        html.push_str("<br>\n");
        writeln!(html, "Godoc: <a href=\"{0}\">{0}</a>", docs_url)?;
    }

    html.push_str("</body>\n</html>\n");
    Ok(html)
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
