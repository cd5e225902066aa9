use crate::rename::RenamedFile;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of an inspect operation
#[derive(Debug, Serialize, Deserialize)]
pub struct InspectResult {
    pub sample: String,
    pub directory: String,
    pub is_sequence: bool,
    /// printf-style pattern, e.g. `img_%03d.png`
    pub pattern: String,
    pub regex: String,
    /// `-1` for a single file
    pub start_number: i64,
    pub sample_number: Option<u64>,
    pub file_count: usize,
    pub messages: Vec<String>,
}

/// Result of a gaps operation
#[derive(Debug, Serialize, Deserialize)]
pub struct GapsResult {
    pub pattern: String,
    pub start_number: i64,
    pub missing: Vec<String>,
}

/// Result of a list operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResult {
    pub pattern: String,
    pub files: Vec<String>,
    /// Frame number of each entry of `files`
    #[serde(default)]
    pub frames: Vec<Option<u64>>,
}

/// Result of a rename operation
#[derive(Debug, Serialize, Deserialize)]
pub struct RenameResult {
    pub pattern: String,
    pub output_root: String,
    pub destination_dir: String,
    pub moved: bool,
    pub files: usize,
    pub renamed: Vec<RenamedFile>,
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for InspectResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "inspect",
            "sample": self.sample,
            "directory": self.directory,
            "kind": if self.is_sequence { "sequence" } else { "single" },
            "pattern": self.pattern,
            "regex": self.regex,
            "start_number": self.start_number,
            "sample_number": self.sample_number,
            "file_count": self.file_count,
            "messages": self.messages,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.is_sequence {
            let _ = writeln!(output, "Sequence: {}", self.pattern);
            let _ = writeln!(output, "Start number: {}", self.start_number);
            if let Some(sample) = self.sample_number {
                let _ = writeln!(output, "Sample frame: {}", sample);
            }
        } else {
            let _ = writeln!(output, "Single file: {}", self.sample);
        }
        let _ = writeln!(output, "Files of this type: {}", self.file_count);

        for message in &self.messages {
            let _ = writeln!(output, "Note: {}", message);
        }

        output
    }
}

impl OutputFormatter for GapsResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "gaps",
            "pattern": self.pattern,
            "start_number": self.start_number,
            "missing": self.missing,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.missing.is_empty() {
            return format!("No missing frames in {}\n", self.pattern);
        }

        let mut output = format!(
            "{} missing frame(s) in {}:\n",
            self.missing.len(),
            self.pattern
        );
        for name in &self.missing {
            let _ = writeln!(output, "  {}", name);
        }
        output
    }
}

impl OutputFormatter for ListResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "list",
            "pattern": self.pattern,
            "count": self.files.len(),
            "files": self.files,
            "frames": self.frames,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        for name in &self.files {
            let _ = writeln!(output, "{}", name);
        }
        output
    }
}

impl OutputFormatter for RenameResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "rename",
            "pattern": self.pattern,
            "output_root": self.output_root,
            "destination_dir": self.destination_dir,
            "moved": self.moved,
            "files": self.files,
            "renamed": self.renamed,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let verb = if self.moved { "Renamed" } else { "Copied" };
        format!(
            "✓ {} {} file(s) from {} into {}\n",
            verb, self.files, self.pattern, self.destination_dir
        )
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
