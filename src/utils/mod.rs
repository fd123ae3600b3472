//! Filename helpers for uploads and the merged download.

use unicode_normalization::UnicodeNormalization;

/// Name used for the download when none was requested.
pub const DEFAULT_OUTPUT_STEM: &str = "merged";

/// Normalize an uploaded filename into a safe, ASCII-only name.
///
/// The name is NFKD-normalized so accented letters keep their base letter,
/// then anything still non-ASCII is dropped. `/` and whitespace runs become
/// single underscores, every character outside `[A-Za-z0-9_.-]` (including
/// `\`) is removed and leading or trailing dots and underscores are stripped.
/// The result may be empty.
///
/// Applying it twice yields the same result as applying it once.
///
/// ```
/// use pdfmerge::utils::secure_filename;
///
/// assert_eq!(secure_filename("My cool report.pdf"), "My_cool_report.pdf");
/// assert_eq!(secure_filename("../../etc/passwd"), "etc_passwd");
/// assert_eq!(secure_filename("résumé.pdf"), "resume.pdf");
/// ```
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' { ' ' } else { c })
        .collect();

    let joined = ascii.split_ascii_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    filtered.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Check whether `name` has a `.pdf` extension, ignoring case.
pub fn has_pdf_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
}

/// Derive the download filename from the optional user-supplied name.
///
/// Blank or fully-unsafe names fall back to `merged`; `.pdf` is appended
/// unless already present.
///
/// ```
/// use pdfmerge::utils::output_filename;
///
/// assert_eq!(output_filename(None), "merged.pdf");
/// assert_eq!(output_filename(Some("Report")), "Report.pdf");
/// assert_eq!(output_filename(Some("report.PDF")), "report.PDF");
/// ```
pub fn output_filename(requested: Option<&str>) -> String {
    let requested = requested.map(str::trim).unwrap_or_default();
    let requested = if requested.is_empty() {
        DEFAULT_OUTPUT_STEM
    } else {
        requested
    };

    let mut name = secure_filename(requested);
    if name.is_empty() {
        name = DEFAULT_OUTPUT_STEM.to_string();
    }

    if !name.to_ascii_lowercase().ends_with(".pdf") {
        name.push_str(".pdf");
    }

    name
}

/// Format a byte count as a human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
