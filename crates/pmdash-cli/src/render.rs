use std::io::{self, IsTerminal, Write};

use pmdash_core::badges::Badge;
use pmdash_core::presenter::{Notice, ToastKind};
use pmdash_core::views::Listing;
use pmdash_core::views::dashboard::DashboardView;
use pmdash_core::views::gantt::{self, GanttView};
use pmdash_core::views::ml::{MlInsights, ModelInfoView, TrainingSummary};
use pmdash_core::views::notes::{self, NotesView};
use pmdash_core::views::projects::{COLUMNS, ProjectDetails, ProjectRow};
use pmdash_core::views::reports::ReportRow;
use pmdash_core::views::tasks::BoardColumn;
use pmdash_shared::{CriticalPath, HealthStatus};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Toasts become one stderr line each.
    pub fn notice(&self, notice: &Notice) {
        let tag = match notice.kind {
            ToastKind::Success => self.paint("ok", "32"),
            ToastKind::Error => self.paint("error", "31"),
            ToastKind::Info => self.paint("info", "36"),
        };
        eprintln!("[{tag}] {}", notice.message);
    }

    fn badge(&self, label: &str, badge: Badge) -> String {
        let code = match badge.class {
            "badge-active" | "badge-low" => "32",
            "badge-completed" => "34",
            "badge-on-hold" | "badge-medium" => "33",
            "badge-high" | "badge-critical" => "31",
            _ => "0",
        };
        let text = if badge.recognized {
            label.to_string()
        } else {
            format!("{label}?")
        };
        self.paint(&text, code)
    }

    pub fn health<W: Write>(&self, out: &mut W, health: &HealthStatus) -> anyhow::Result<()> {
        writeln!(out, "status   {}", health.status)?;
        if let Some(version) = &health.version {
            writeln!(out, "version  {version}")?;
        }
        Ok(())
    }

    pub fn dashboard<W: Write>(&self, out: &mut W, view: &DashboardView) -> anyhow::Result<()> {
        for card in view.stat_cards() {
            writeln!(out, "{:<20} {}", card.label, card.value)?;
        }
        writeln!(out)?;
        writeln!(out, "Recent Projects")?;
        for project in &view.recent {
            writeln!(out, "  {}  {}", project.number, project.name)?;
        }
        Ok(())
    }

    pub fn projects<W: Write>(&self, out: &mut W, listing: &Listing<ProjectRow>) -> anyhow::Result<()> {
        if let Some(message) = listing.empty_message() {
            writeln!(out, "{message}")?;
            return Ok(());
        }

        // The browser's trailing "Actions" column has no meaning here.
        let headers = COLUMNS[..COLUMNS.len() - 1].to_vec();
        let rows = listing
            .items()
            .iter()
            .map(|row| {
                vec![
                    row.number.clone(),
                    row.name.clone(),
                    row.pm_name.clone(),
                    self.badge(&row.status_label, row.status_badge),
                    row.budget.clone(),
                    row.start_date.clone(),
                    row.end_date.clone(),
                ]
            })
            .collect();
        write_table(out, &headers, rows)
    }

    pub fn project_details<W: Write>(
        &self,
        out: &mut W,
        details: &ProjectDetails,
    ) -> anyhow::Result<()> {
        let status = self.badge(&details.status_label, details.status_badge);
        let fields = [
            ("Project Number", details.number.as_str()),
            ("Project Name", details.name.as_str()),
            ("PM Name", details.pm_name.as_str()),
            ("Status", status.as_str()),
            ("Budget", details.budget.as_str()),
            ("Actual Cost", details.actual_cost.as_str()),
            ("Budget Variance", details.budget_variance.as_str()),
            ("Region", details.region.as_str()),
            ("CCRs", details.ccrs.as_str()),
            ("Orders", details.orders.as_str()),
            ("Estimated Hours", details.estimated_hours.as_str()),
            ("Actual Hours", details.actual_hours.as_str()),
        ];
        for (label, value) in fields {
            writeln!(out, "{label:<16} {value}")?;
        }
        Ok(())
    }

    pub fn task_board<W: Write>(&self, out: &mut W, board: &Listing<BoardColumn>) -> anyhow::Result<()> {
        if let Some(message) = board.empty_message() {
            writeln!(out, "{message}")?;
            return Ok(());
        }

        for column in board.items() {
            writeln!(out, "{}", self.paint(&column.title, "1"))?;
            let rows = column
                .cards
                .iter()
                .map(|card| {
                    vec![
                        card.id.to_string(),
                        card.name.clone(),
                        self.badge(&card.priority, card.priority_badge),
                        card.due.clone().unwrap_or_default(),
                        card.description.clone(),
                    ]
                })
                .collect();
            write_table(&mut *out, &["ID", "Task", "Priority", "Due", "Description"], rows)?;
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn notes<W: Write>(&self, out: &mut W, view: &NotesView) -> anyhow::Result<()> {
        match view {
            NotesView::Placeholder => writeln!(out, "{}", notes::SELECT_PROJECT)?,
            NotesView::Empty => writeln!(out, "{}", notes::NO_NOTES)?,
            NotesView::Notes(cards) => {
                for card in cards {
                    writeln!(out, "#{} {}", card.id, self.paint(&card.title, "1"))?;
                    if !card.content.is_empty() {
                        writeln!(out, "{}", card.content)?;
                    }
                    if !card.tags.is_empty() {
                        writeln!(out, "tags: {}", card.tags.join(", "))?;
                    }
                    writeln!(out, "{}", card.byline)?;
                    writeln!(out)?;
                }
            }
        }
        Ok(())
    }

    pub fn reports<W: Write>(&self, out: &mut W, listing: &Listing<ReportRow>) -> anyhow::Result<()> {
        if let Some(message) = listing.empty_message() {
            writeln!(out, "{message}")?;
            return Ok(());
        }
        let rows = listing
            .items()
            .iter()
            .map(|row| {
                vec![
                    row.report_type.clone(),
                    row.report_name.clone(),
                    row.created_by.clone(),
                    row.created_date.clone(),
                    row.file_path.clone().unwrap_or_default(),
                ]
            })
            .collect();
        write_table(
            out,
            &["Report Type", "Report Name", "Created By", "Created Date", "File"],
            rows,
        )
    }

    pub fn gantt<W: Write>(&self, out: &mut W, view: &GanttView) -> anyhow::Result<()> {
        let rows = view
            .rows
            .iter()
            .map(|row| {
                vec![
                    format!("{}{}", "  ".repeat(row.depth), row.text),
                    row.start.clone(),
                    row.end.clone(),
                    row.progress.clone(),
                ]
            })
            .collect();
        write_table(&mut *out, &["Task", "Start", "End", "Progress"], rows)?;
        if let Some(marker) = &view.today {
            writeln!(out, "{}", marker.title)?;
        }
        Ok(())
    }

    pub fn critical_path<W: Write>(&self, out: &mut W, path: &CriticalPath) -> anyhow::Result<()> {
        writeln!(out, "Total Duration: {}", gantt::total_duration_label(path))?;
        let rows = path
            .critical_path
            .iter()
            .map(|item| vec![item.kind.clone(), item.number.clone(), item.duration.to_string()])
            .collect();
        write_table(out, &["Type", "Number", "Duration (days)"], rows)
    }

    pub fn insights<W: Write>(&self, out: &mut W, insights: &MlInsights) -> anyhow::Result<()> {
        let delay = &insights.delay;
        writeln!(out, "Project          {}", insights.project_number)?;
        writeln!(
            out,
            "Predicted delay  {} days ({})",
            delay.days,
            self.badge(&delay.risk_label, delay.risk_badge)
        )?;
        writeln!(out, "Confidence       {}", delay.confidence.label)?;
        writeln!(
            out,
            "Risk level       {} (confidence {})",
            insights.risk.label, insights.risk.confidence.label
        )?;
        writeln!(out)?;

        if !insights.factors.is_empty() {
            let rows = insights
                .factors
                .iter()
                .map(|factor| vec![factor.name.clone(), factor.value.clone()])
                .collect();
            write_table(&mut *out, &["Factor", "Value"], rows)?;
            writeln!(out)?;
        }

        writeln!(out, "Recommended Actions")?;
        for recommendation in &insights.recommendations {
            writeln!(out, "  - {recommendation}")?;
        }
        Ok(())
    }

    pub fn training<W: Write>(&self, out: &mut W, summary: &TrainingSummary) -> anyhow::Result<()> {
        writeln!(out, "Delay Predictor  Final MAE: {}", summary.final_mae)?;
        writeln!(out, "                 Training Samples: {}", summary.delay_samples)?;
        writeln!(out, "Risk Classifier  Final Accuracy: {}", summary.final_accuracy)?;
        writeln!(out, "                 Training Samples: {}", summary.risk_samples)?;
        Ok(())
    }

    pub fn model_info<W: Write>(&self, out: &mut W, view: &ModelInfoView) -> anyhow::Result<()> {
        for (title, card) in [
            ("Delay Predictor", &view.delay_predictor),
            ("Risk Classifier", &view.risk_classifier),
        ] {
            writeln!(out, "{}", self.paint(title, "1"))?;
            writeln!(out, "  Type:         {}", card.kind)?;
            writeln!(out, "  Architecture: {}", card.architecture)?;
            writeln!(out, "  Features:     {}", card.features)?;
            writeln!(out, "  Classes:      {}", card.classes)?;
        }
        writeln!(out)?;
        writeln!(out, "Training History")?;
        match view.history.empty_message() {
            Some(message) => writeln!(out, "{message}")?,
            None => {
                let rows = view
                    .history
                    .items()
                    .iter()
                    .map(|row| {
                        vec![
                            row.model.clone(),
                            row.date.clone(),
                            row.samples.clone(),
                            row.accuracy.clone(),
                        ]
                    })
                    .collect();
                write_table(out, &["Model", "Training Date", "Samples", "Accuracy"], rows)?;
            }
        }
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(mut writer: W, headers: &[&str], rows: Vec<Vec<String>>) -> anyhow::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for (header, width) in headers.iter().zip(&widths) {
        write!(writer, "{header:width$} ")?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "{:-<width$} ", "")?;
    }
    writeln!(writer)?;

    for row in rows {
        for (cell, width) in row.iter().zip(&widths) {
            let visible = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            write!(writer, "{cell}{} ", " ".repeat(width.saturating_sub(visible)))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            escaped = ch != 'm';
            continue;
        }
        if ch == '\x1b' {
            escaped = true;
            continue;
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use pmdash_core::views::Listing;
    use pmdash_core::views::notes::NotesView;

    use super::*;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("render");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn table_pads_to_widest_cell() {
        let out = rendered(|buf| {
            write_table(
                buf,
                &["ID", "Name"],
                vec![vec!["1".to_string(), "Fiber build".to_string()]],
            )
        });
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID Name        ");
        assert_eq!(lines[1], "-- ----------- ");
        assert_eq!(lines[2], "1  Fiber build ");
    }

    #[test]
    fn ansi_codes_do_not_count_toward_width() {
        assert_eq!(strip_ansi("\x1b[31mHigh\x1b[0m"), "High");
    }

    #[test]
    fn empty_listings_print_their_message() {
        let renderer = Renderer::new(false);
        let out = rendered(|buf| renderer.reports(buf, &Listing::Empty("No reports generated yet")));
        assert_eq!(out, "No reports generated yet\n");

        let out = rendered(|buf| renderer.notes(buf, &NotesView::Placeholder));
        assert_eq!(out, "Select a project to view notes\n");
    }

    #[test]
    fn unrecognized_badges_are_marked() {
        let renderer = Renderer::new(false);
        let badge = Badge {
            class: "badge-active",
            recognized: false,
        };
        assert_eq!(renderer.badge("PAUSED", badge), "PAUSED?");
    }
}
