//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use warpack_core::BuildReport;

pub struct JsonFormatter;

#[derive(Serialize)]
struct BuildOutput<'a> {
    output_path: String,
    entries: &'a [String],
    files_added: usize,
    files_skipped: usize,
    duplicates_skipped: usize,
    bytes_written: u64,
    archive_size: u64,
    compression_ratio: f64,
    duration_ms: u128,
    warnings: &'a [String],
}

impl<'a> BuildOutput<'a> {
    fn new(report: &'a BuildReport) -> Self {
        Self {
            output_path: report.output_path.display().to_string(),
            entries: &report.entries,
            files_added: report.files_added,
            files_skipped: report.files_skipped,
            duplicates_skipped: report.duplicates_skipped,
            bytes_written: report.bytes_written,
            archive_size: report.archive_size,
            compression_ratio: report.compression_ratio(),
            duration_ms: report.duration.as_millis(),
            warnings: &report.warnings,
        }
    }
}

impl JsonFormatter {
    fn render<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    fn output<T: Serialize>(value: &T) -> Result<()> {
        writeln!(io::stdout(), "{}", Self::render(value)?)?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_build_result(&self, operation: &str, report: &BuildReport) -> Result<()> {
        Self::output(&JsonOutput::success(operation, BuildOutput::new(report)))
    }

    fn format_descriptor(&self, xml: &str) -> Result<()> {
        #[derive(Serialize)]
        struct DescriptorOutput<'a> {
            path: &'a str,
            content: &'a str,
        }

        let data = DescriptorOutput {
            path: warpack_core::assembly::paths::DESCRIPTOR_PATH,
            content: xml,
        };
        Self::output(&JsonOutput::success("web-xml", data))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error(operation, format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData<'a> {
            message: &'a str,
        }

        // Warnings go to stderr so stdout stays a single JSON document.
        if let Ok(json) = Self::render(&JsonOutput::success("warning", WarningData { message })) {
            let _ = writeln!(io::stderr(), "{json}");
        }
    }
}
