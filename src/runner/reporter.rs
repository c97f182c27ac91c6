use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Write;

use crate::Result;
use crate::runner::types::{RunReport, TestStatus};

/// 报告格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Text,
}

pub struct TestReporter {
    format: ReportFormat,
    color: bool,
}

impl TestReporter {
    pub fn new(format: ReportFormat) -> Self {
        Self {
            format,
            color: false,
        }
    }

    /// 只在输出到终端时着色，写文件时保持纯文本
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn render(&self, report: &RunReport) -> Result<String> {
        match self.format {
            ReportFormat::Json => self.render_json(report),
            ReportFormat::Text => Ok(self.render_text(report)),
        }
    }

    pub fn write_to<W: Write>(&self, report: &RunReport, mut out: W) -> Result<()> {
        let rendered = self.render(report)?;
        out.write_all(rendered.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// 4 空格缩进的 JSON
    fn render_json(&self, report: &RunReport) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        report.serialize(&mut serializer)?;
        buf.push(b'\n');
        // serde_json 只会输出合法 UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn render_text(&self, report: &RunReport) -> String {
        let summary = &report.summary;
        let mut out = String::new();

        let _ = writeln!(out, "***");
        let _ = writeln!(out, "TEST SUMMARY");
        let _ = writeln!(out, "------------");
        let _ = writeln!(out, "Tests passed: {}", summary.passed);
        let _ = writeln!(out, "Tests failed: {}", summary.failed);
        let _ = writeln!(
            out,
            "Success percentage : {:.2}%",
            summary.success_percentage
        );
        let _ = writeln!(
            out,
            "Total elapsed time: {:.3} seconds",
            summary.total_elapsed.as_secs_f64()
        );
        let _ = writeln!(out, "***");

        for result in &report.results {
            let _ = writeln!(out, "{}", result.name);
            let _ = writeln!(out, "\tStatus:{}", self.status_label(result.status));
            let _ = writeln!(out, "\tElapsed time: {:.6}", result.elapsed.as_secs_f64());
            if let Some(message) = result.error_message() {
                let _ = writeln!(out, "\tError message: {}", message);
            }
        }

        out
    }

    fn status_label(&self, status: TestStatus) -> String {
        if !self.color {
            return status.to_string();
        }
        match status {
            TestStatus::Passed => status.as_str().green().to_string(),
            TestStatus::Failed => status.as_str().red().bold().to_string(),
        }
    }
}

impl Default for TestReporter {
    fn default() -> Self {
        Self::new(ReportFormat::Json)
    }
}
