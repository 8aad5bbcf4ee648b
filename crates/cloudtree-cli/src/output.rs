//! Output rendering for CLI commands
//!
//! Commands hand domain values to an [`OutputFormatter`] and never branch on
//! the output format themselves. The human formatter prints checkmarked
//! summaries and indented detail lines; the JSON formatter prints one
//! pretty-printed document per command on stdout. Diagnostics go to stderr
//! in both modes.

use cloudtree_core::domain::{AccountInfo, Entry, FileEntry, FolderEntry};
use cloudtree_core::usecases::{Classified, MirrorReport};
use serde_json::json;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Renders command results
pub trait OutputFormatter {
    /// Progress note; JSON output stays silent
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    /// A finished action: `message` for people, `value` for machines
    fn done(&self, message: &str, value: serde_json::Value);
    fn account(&self, account: &AccountInfo);
    fn folders(&self, folders: &[FolderEntry]);
    fn entries(&self, entries: &[Entry]);
    fn classified(&self, found: &Classified);
    fn mirror_report(&self, report: &MirrorReport);
    /// Downloaded text; printed verbatim in human mode
    fn content(&self, file: &FileEntry, text: &str);
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

// ============================================================================
// Human
// ============================================================================

pub struct HumanFormatter;

impl HumanFormatter {
    fn print(&self, lines: Vec<String>) {
        for line in lines {
            println!("{line}");
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn info(&self, message: &str) {
        println!("  {}", message);
    }
    fn warn(&self, message: &str) {
        eprintln!("\u{26a0} Warning: {}", message);
    }
    fn done(&self, message: &str, _value: serde_json::Value) {
        println!("\u{2713} {}", message);
    }
    fn account(&self, account: &AccountInfo) {
        self.print(account_lines(account));
    }
    fn folders(&self, folders: &[FolderEntry]) {
        let mut lines = vec![format!(
            "\u{2713} {} root folder{}",
            folders.len(),
            plural(folders.len())
        )];
        lines.extend(folders.iter().map(|f| format!("  {}/", f.display_path)));
        self.print(lines);
    }
    fn entries(&self, entries: &[Entry]) {
        if entries.is_empty() {
            println!("  (empty)");
        }
        self.print(entries.iter().map(|e| format!("  {}", entry_line(e))).collect());
    }
    fn classified(&self, found: &Classified) {
        self.print(classified_lines(found));
        if found.skipped > 0 {
            self.warn(&format!(
                "{} entr{} of another kind skipped",
                found.skipped,
                if found.skipped == 1 { "y" } else { "ies" }
            ));
        }
    }
    fn mirror_report(&self, report: &MirrorReport) {
        let (summary, errors) = report_lines(report);
        self.print(summary);
        for line in errors {
            eprintln!("{line}");
        }
    }
    fn content(&self, _file: &FileEntry, text: &str) {
        print!("{text}");
    }
}

/// One line per entry kind: folders end in `/`, files carry their size
pub fn entry_line(entry: &Entry) -> String {
    match entry {
        Entry::File(f) => file_line(f),
        Entry::Folder(f) => format!("{}/", f.display_path),
        Entry::Other(o) => match (&o.path, &o.name) {
            (Some(path), _) => format!("{}  [{}]", path, o.tag),
            (None, Some(name)) => format!("{}  [{}]", name, o.tag),
            (None, None) => format!("[{}]", o.tag),
        },
    }
}

fn file_line(file: &FileEntry) -> String {
    format!("{}  ({})", file.display_path, format_bytes(file.size))
}

fn account_lines(account: &AccountInfo) -> Vec<String> {
    let mut lines = vec![
        format!("\u{2713} Signed in as {}", account.display_name),
        format!(
            "  Email:      {}{}",
            account.email,
            if account.email_verified {
                ""
            } else {
                " (unverified)"
            }
        ),
        format!("  Account ID: {}", account.account_id),
    ];
    if let Some(country) = &account.country {
        lines.push(format!("  Country:    {}", country));
    }
    lines
}

fn classified_lines(found: &Classified) -> Vec<String> {
    let mut lines = vec![format!(
        "\u{2713} {} file{}, {} folder{}",
        found.files.len(),
        plural(found.files.len()),
        found.folders.len(),
        plural(found.folders.len())
    )];
    lines.extend(found.folders.iter().map(|f| format!("  {}/", f.display_path)));
    lines.extend(found.files.iter().map(|f| format!("  {}", file_line(f))));
    lines
}

/// Summary lines for stdout and error lines for stderr
fn report_lines(report: &MirrorReport) -> (Vec<String>, Vec<String>) {
    let files = report.files_downloaded as usize;
    let folders = report.folders_created as usize;
    let summary = vec![format!(
        "\u{2713} Pulled {} file{} and {} folder{} ({})",
        files,
        plural(files),
        folders,
        plural(folders),
        format_bytes(report.bytes_downloaded)
    )];

    let mut errors = Vec::new();
    if !report.is_clean() {
        errors.push(format!(
            "\u{2717} {} error{} occurred:",
            report.errors.len(),
            plural(report.errors.len())
        ));
        errors.extend(report.errors.iter().map(|e| format!("  - {e}")));
    }
    (summary, errors)
}

// ============================================================================
// JSON
// ============================================================================

pub struct JsonFormatter;

impl JsonFormatter {
    fn print(&self, value: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }
}

impl OutputFormatter for JsonFormatter {
    fn info(&self, _message: &str) {}
    fn warn(&self, message: &str) {
        eprintln!("{}", json!({"level": "warning", "message": message}));
    }
    fn done(&self, _message: &str, value: serde_json::Value) {
        self.print(&value);
    }
    fn account(&self, account: &AccountInfo) {
        self.print(&json!(account));
    }
    fn folders(&self, folders: &[FolderEntry]) {
        self.print(&json!(folders));
    }
    fn entries(&self, entries: &[Entry]) {
        self.print(&json!(entries));
    }
    fn classified(&self, found: &Classified) {
        self.print(&classified_json(found));
    }
    fn mirror_report(&self, report: &MirrorReport) {
        self.print(&json!(report));
    }
    fn content(&self, file: &FileEntry, text: &str) {
        self.print(&json!({"path": file.display_path, "content": text}));
    }
}

fn classified_json(found: &Classified) -> serde_json::Value {
    json!({
        "files": found.files,
        "folders": found.folders,
        "skipped": found.skipped,
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Returns "" for one and "s" otherwise
pub fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Format bytes as a human-readable string (e.g., "2.1 GB").
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
