//! Text rendering of reports and plans for the terminal.

use std::io::{self, Write};

use anyhow::Result;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::data::{AnalysisReport, Branch, MigrationPlan};

const NAME_WIDTH: usize = 35;

/// Prints a report to stdout, colored when stdout is a terminal.
pub fn print_report(report: &AnalysisReport) -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_report(&mut stdout, report)?;
    Ok(())
}

/// Prints a plan to stdout, colored when stdout is a terminal.
pub fn print_plan(plan: &MigrationPlan) -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_plan(&mut stdout, plan)?;
    Ok(())
}

/// Writes the summary, branch table and blockers of a report.
pub fn write_report<W: WriteColor>(out: &mut W, report: &AnalysisReport) -> io::Result<()> {
    writeln!(out)?;
    styled(out, "📊 Git Flow Analysis Report", None, true)?;
    writeln!(out)?;
    writeln!(out)?;

    label(out, "Repository: ")?;
    writeln!(out, "{}", report.repo_path)?;
    label(out, "Analyzed at: ")?;
    writeln!(out, "{}", report.analyzed_at.to_rfc3339())?;
    label(out, "Git Flow detected: ")?;
    if report.git_flow_detected {
        styled(out, "Yes", Some(Color::Green), false)?;
    } else {
        styled(out, "No", Some(Color::Red), false)?;
    }
    writeln!(out)?;
    label(out, "Total branches: ")?;
    writeln!(out, "{}", report.total_branches)?;
    label(out, "Active: ")?;
    styled(out, &report.active_branches.to_string(), Some(Color::Green), false)?;
    label(out, " | Stale: ")?;
    styled(out, &report.stale_branches.to_string(), Some(Color::Yellow), false)?;
    writeln!(out)?;
    writeln!(out)?;

    label(out, "Migration Readiness: ")?;
    styled(
        out,
        &format!("{}/100", report.readiness_score),
        Some(score_color(report.readiness_score)),
        true,
    )?;
    writeln!(out, " {}", if report.is_ready { "✅" } else { "❌" })?;
    writeln!(out)?;

    write!(out, "{}", render_branch_table(&report.all_branches))?;
    writeln!(out)?;

    if report.blockers.is_empty() {
        styled(
            out,
            "✅ No blockers found, this repository is ready for migration!",
            Some(Color::Green),
            false,
        )?;
        writeln!(out)?;
        return Ok(());
    }

    styled(out, "🚫 Migration Blockers:", Some(Color::Red), true)?;
    writeln!(out)?;
    writeln!(out)?;
    for blocker in &report.blockers {
        styled(out, &format!("  ✖ {}", blocker.title), Some(Color::Red), false)?;
        writeln!(out)?;
        writeln!(out, "    {}", blocker.description)?;
        styled(
            out,
            &format!("    💡 Fix: {}", blocker.remediation),
            Some(Color::Yellow),
            false,
        )?;
        writeln!(out)?;
        writeln!(out)?;
    }

    Ok(())
}

/// Writes a numbered list of migration steps.
pub fn write_plan<W: WriteColor>(out: &mut W, plan: &MigrationPlan) -> io::Result<()> {
    writeln!(out)?;
    styled(out, "🗺️  Migration Plan", None, true)?;
    writeln!(out)?;
    writeln!(out)?;
    label(out, "Repository: ")?;
    writeln!(out, "{}", plan.report.repo_path)?;
    label(out, "Backup tags: ")?;
    writeln!(out, "{}/<branch>", plan.backup_tag_prefix)?;
    label(out, "Archive EOL: ")?;
    writeln!(out, "{}", plan.archive_eol.format("%Y-%m-%d"))?;
    writeln!(out)?;

    for step in &plan.steps {
        write!(out, "{:>3}. ", step.order)?;
        styled(
            out,
            &format!("[{}]", action_label(step.action)),
            Some(Color::Cyan),
            false,
        )?;
        write!(out, " {}", step.description)?;
        if step.is_destructive {
            styled(out, " (destructive)", Some(Color::Yellow), false)?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} of {} steps rewrite or remove history. Nothing has been changed.",
        plan.destructive_step_count(),
        plan.steps.len()
    )?;

    Ok(())
}

/// Renders the branch table, long-lived branches first.
///
/// Plain text without color so that it can be embedded anywhere.
pub fn render_branch_table(branches: &[Branch]) -> String {
    let mut sorted: Vec<&Branch> = branches.iter().collect();
    sorted.sort_by_key(|b| b.branch_type.display_rank());

    let mut table = format!(
        "{:<NAME_WIDTH$} {:<12} {:>10} {:>6} {:>6}  {}\n",
        "Branch", "Type", "Age (days)", "Ahead", "Behind", "Status"
    );
    for branch in sorted {
        table.push_str(&format!(
            "{:<NAME_WIDTH$} {:<12} {:>10} {:>6} {:>6}  {}\n",
            truncate(branch.name(), NAME_WIDTH),
            branch.branch_type.as_str(),
            branch.age_in_days,
            branch.fact.ahead_of_main,
            branch.fact.behind_main,
            status(branch)
        ));
    }
    table
}

fn status(branch: &Branch) -> &'static str {
    if branch.is_stale {
        "stale"
    } else if branch.is_merged() {
        "merged"
    } else {
        "active"
    }
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(width - 1).collect();
        short.push('…');
        short
    }
}

fn action_label(action: crate::data::MigrationAction) -> &'static str {
    use crate::data::MigrationAction;
    match action {
        MigrationAction::Backup => "backup",
        MigrationAction::Merge => "merge",
        MigrationAction::Rebase => "rebase",
        MigrationAction::Archive => "archive",
        MigrationAction::Delete => "delete",
    }
}

fn score_color(score: u8) -> Color {
    match score {
        80.. => Color::Green,
        50..=79 => Color::Yellow,
        _ => Color::Red,
    }
}

fn label<W: WriteColor>(out: &mut W, text: &str) -> io::Result<()> {
    styled(out, text, None, true)
}

fn styled<W: WriteColor>(
    out: &mut W,
    text: &str,
    color: Option<Color>,
    bold: bool,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(color).set_bold(bold))?;
    write!(out, "{text}")?;
    out.reset()
}
