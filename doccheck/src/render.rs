//! 보고서와 문서를 텍스트나 JSON 으로 보여 준다

use crate::error::Result;
use clap::ValueEnum;
use serde::Serialize;
use shared::{Catalog, Category, Guidance, Recommendation, Report, Severity};
use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 화면 폭은 바이트가 아니라 글자 수로 센다
fn padded(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(pad))
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|c| c.chars().count()).max().unwrap_or(0)
}

fn write_reports(out: &mut String, reports: &[Report]) -> fmt::Result {
    for report in reports {
        if report.issues.is_empty() {
            writeln!(out, "{}: ok", report.document)?;
            continue;
        }
        writeln!(
            out,
            "{}: {} error(s), {} warning(s)",
            report.document,
            report.count(Severity::Error),
            report.count(Severity::Warning)
        )?;
        for issue in &report.issues {
            writeln!(out, "  {}", issue)?;
        }
    }
    Ok(())
}

pub fn render_reports(reports: &[Report], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(reports)?);
    }

    let mut out = String::new();
    write_reports(&mut out, reports)?;
    Ok(out)
}

#[derive(Serialize)]
struct CategoryGroup<'a> {
    category: Category,
    crates: Vec<&'a Recommendation>,
}

fn write_catalog(out: &mut String, catalog: &Catalog) -> fmt::Result {
    if let Some(title) = &catalog.title {
        writeln!(out, "{}", title)?;
    }
    for (category, crates) in catalog.by_category() {
        writeln!(out, "\n[{}]", category)?;
        let width = column_width(crates.iter().map(|r| r.name.as_str()));
        for rec in crates {
            writeln!(out, "  {}  {}", padded(&rec.name, width), rec.purpose)?;
        }
    }
    Ok(())
}

pub fn render_catalog(catalog: &Catalog, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        let groups: Vec<CategoryGroup> = catalog
            .by_category()
            .into_iter()
            .map(|(category, crates)| CategoryGroup { category, crates })
            .collect();
        return Ok(serde_json::to_string_pretty(&groups)?);
    }

    let mut out = String::new();
    write_catalog(&mut out, catalog)?;
    Ok(out)
}

fn write_commands(out: &mut String, guidance: &Guidance) -> fmt::Result {
    let lines: Vec<String> = guidance.commands.iter().map(|c| c.command_line()).collect();
    let width = column_width(lines.iter().map(String::as_str));

    for (command, line) in guidance.commands.iter().zip(&lines) {
        let kind = command
            .kind
            .map(|k| k.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<12} {}  {}",
            kind,
            padded(line, width),
            command.description.as_deref().unwrap_or("")
        )?;
    }
    for policy in &guidance.policies {
        writeln!(out, "{:<12} {}: {}", "policy", policy.subject, policy.language)?;
    }
    Ok(())
}

/// 문서에 적힌 명령마다 한 줄: 역할, 명령줄, 설명
pub fn render_commands(guidance: &Guidance) -> Result<String> {
    let mut out = String::new();
    write_commands(&mut out, guidance)?;
    Ok(out)
}
