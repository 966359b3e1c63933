//! Output formatters: console, JSON and Markdown renderings of the reports

use crate::analytics::CareerRoadmap;
use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::matching::engine::MatchResult;
use crate::output::report::*;
use crate::profile::store::ProfileSnapshot;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering reports in one output format
pub trait OutputFormatter {
    fn format_matches(&self, report: &MatchReport) -> Result<String>;
    fn format_dashboard(&self, report: &DashboardReport) -> Result<String>;
    fn format_profile(&self, snapshot: &ProfileSnapshot) -> Result<String>;
    fn format_roadmap(&self, roadmap: &CareerRoadmap) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with colored score badges
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

const BAR_WIDTH: usize = 20;

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("STRONG", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            _ => ("WEAK", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_bar(value: f64, max: f64) -> String {
        let filled = if max > 0.0 {
            ((value / max).clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        format!("{}{}", "■".repeat(filled), "·".repeat(BAR_WIDTH - filled))
    }

    fn format_match(&self, index: usize, result: &MatchResult, report: &MatchReport) -> String {
        let listing = &result.listing;
        let mut output = format!(
            "{}. {} {} {}\n",
            index,
            self.colorize(&listing.title, Color::White),
            self.colorize(&format!("@ {}", listing.company), Color::BrightBlack),
            self.format_score_badge(result.match_score)
        );
        output.push_str(&format!(
            "   Match: {}% | {} | {} | {}\n",
            result.match_score,
            listing.location,
            listing.job_type,
            listing.salary.as_ref().map(|s| s.to_string()).unwrap_or_else(|| "n/a".to_string())
        ));
        if !result.matching_skills.is_empty() {
            output.push_str(&format!(
                "   Matching skills: {}\n",
                self.colorize(&result.matching_skills.join(", "), Color::Green)
            ));
        }

        if self.detailed {
            let b = &result.breakdown;
            output.push_str(&format!(
                "   Skills {:.0} | Experience {:.0} | Location {:.0} | Role {:.0}\n",
                b.skills, b.experience, b.location, b.role
            ));
            if let Some(skills) = report.breakdown_for(&listing.id) {
                for skill in skills {
                    output.push_str(&format!(
                        "     {:<20} {} {}%\n",
                        skill.name,
                        Self::format_bar(skill.percentage as f64, 100.0),
                        skill.percentage
                    ));
                }
            }
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_matches(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("JOB MATCHES", 1));
        output.push_str(&format!(
            "Target role: {} | Location: {} | Source: {}\n",
            report.profile.target_role, report.profile.location_preference, report.metadata.listing_source
        ));
        if report.metadata.demo_mode {
            output.push_str(&self.colorize("Demo mode: scores are placeholders\n", Color::Yellow));
        }
        if !report.filters.is_empty() {
            output.push_str(&format!("Filters: {}\n", report.filters.join(", ")));
        }

        let page = &report.page;
        if page.items.is_empty() {
            output.push_str(&self.colorize("\nNo job listings match the current filters.\n", Color::Yellow));
            return Ok(output);
        }

        output.push('\n');
        let offset = (page.current_page - 1) * page.page_size;
        for (i, result) in page.items.iter().enumerate() {
            output.push_str(&self.format_match(offset + i + 1, result, report));
            output.push('\n');
        }

        output.push_str(&format!(
            "Page {} of {} ({} matches)",
            page.current_page, page.total_pages, page.total_items
        ));
        if page.has_prev {
            output.push_str(&format!(" | previous: --page {}", page.current_page - 1));
        }
        if page.has_next {
            output.push_str(&format!(" | next: --page {}", page.current_page + 1));
        }
        output.push('\n');
        Ok(output)
    }

    fn format_dashboard(&self, report: &DashboardReport) -> Result<String> {
        let mut output = String::new();
        let analytics = &report.analytics;
        let profile = &report.profile;

        let title = if profile.name.trim().is_empty() {
            "CAREER DASHBOARD".to_string()
        } else {
            format!("CAREER DASHBOARD: {}", profile.name)
        };
        output.push_str(&self.format_header(&title, 1));
        output.push_str(&format!(
            "{} | {:.1} years | {} | {} skills\n",
            if profile.job_title.is_empty() { "No title" } else { profile.job_title.as_str() },
            profile.experience_years,
            profile.education,
            profile.skill_count
        ));

        output.push_str(&self.format_header("Overview", 2));
        output.push_str(&format!("Profile completion:    {}%\n", analytics.profile_completion));
        output.push_str(&format!("Market demand:         {}/100\n", analytics.average_market_demand));
        output.push_str(&format!(
            "Salary potential:      {}\n",
            self.colorize(&format_currency(analytics.salary_potential), Color::Green)
        ));
        output.push_str(&format!("Competitiveness:       {}%\n", analytics.strength.market_competitiveness));
        output.push_str(&format!("Growth potential:      {}%\n", analytics.strength.growth_potential));

        output.push_str(&self.format_header("Insights", 2));
        output.push_str(&format!("  • {}\n", self.colorize(&analytics.skill_gap_insight, Color::Cyan)));
        output.push_str(&format!("  • {}\n", self.colorize(&analytics.market_trend_insight, Color::Cyan)));

        let roadmap = &analytics.roadmap;
        if let Some(current) = roadmap.current_step() {
            output.push_str(&self.format_header("Career Path", 2));
            output.push_str(&format!("Now:  {}\n", self.colorize(&current.title, Color::Green)));
            if let Some(next) = roadmap.next_step() {
                output.push_str(&format!("Next: {}\n", next_step_title(next)));
            }
        }

        if !analytics.skill_gaps.is_empty() {
            output.push_str(&self.format_header("Skill Gaps", 3));
            for gap in &analytics.skill_gaps {
                output.push_str(&format!(
                    "  {:<20} {} {}\n",
                    gap.name,
                    Self::format_bar(gap.gap as f64, 100.0),
                    gap.gap
                ));
            }
        }

        if !report.top_matches.is_empty() {
            output.push_str(&self.format_header("Top Matches", 2));
            for result in &report.top_matches {
                output.push_str(&format!(
                    "  {} {} @ {} ({}%)\n",
                    self.format_score_badge(result.match_score),
                    result.listing.title,
                    result.listing.company,
                    result.match_score
                ));
            }
        }

        let suggestions = &analytics.strength.suggestions;
        let all: Vec<&String> = suggestions
            .profile_strength
            .iter()
            .chain(&suggestions.market_competitiveness)
            .chain(&suggestions.growth_potential)
            .collect();
        if !all.is_empty() {
            output.push_str(&self.format_header("Suggestions", 2));
            for suggestion in all {
                output.push_str(&format!("  • {}\n", self.colorize(suggestion, Color::Yellow)));
            }
        }

        if self.detailed {
            for chart in &report.charts {
                if chart.points.is_empty() {
                    continue;
                }
                output.push_str(&self.format_header(&chart.title, 3));
                let max = chart.points.iter().map(|p| p.value).fold(0.0, f64::max);
                for point in &chart.points {
                    output.push_str(&format!(
                        "  {:<20} {} {}\n",
                        point.label,
                        Self::format_bar(point.value, max),
                        point.value
                    ));
                }
            }
        }

        output.push_str(&format!(
            "\n{} Generated by career-match v{} at {}\n",
            self.colorize("ℹ", Color::Blue),
            report.metadata.version,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        Ok(output)
    }

    fn format_profile(&self, snapshot: &ProfileSnapshot) -> Result<String> {
        let mut output = String::new();
        let profile = &snapshot.profile;

        output.push_str(&self.format_header("PROFILE", 1));
        output.push_str(&format!("Name:        {}\n", profile.name));
        output.push_str(&format!("Email:       {}\n", profile.email));
        output.push_str(&format!("Location:    {}\n", profile.location));
        output.push_str(&format!("Title:       {}\n", profile.job_title));
        output.push_str(&format!("Education:   {}\n", profile.education));
        output.push_str(&format!("Experience:  {:.1} years\n", profile.experience));
        if profile.current_salary > 0 {
            output.push_str(&format!("Salary:      {}\n", format_currency(profile.current_salary)));
        }
        if let Some(linkedin) = &profile.linkedin {
            output.push_str(&format!("LinkedIn:    {}\n", linkedin));
        }

        output.push_str(&self.format_header("Skills", 2));
        if snapshot.skills.is_empty() {
            output.push_str("  No skills yet\n");
        }
        for skill in &snapshot.skills {
            output.push_str(&format!(
                "  {:<20} {:<13} {:.1} yrs  {}\n",
                skill.name,
                skill.level.label(),
                skill.experience,
                self.colorize(&skill.id.to_string(), Color::BrightBlack)
            ));
        }

        output.push_str(&self.format_header("Work History", 2));
        if snapshot.experience.is_empty() {
            output.push_str("  No entries yet\n");
        }
        for entry in &snapshot.experience {
            let end = if entry.current {
                "present".to_string()
            } else {
                entry
                    .end_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "present".to_string())
            };
            output.push_str(&format!(
                "  {} @ {} ({} to {})  {}\n",
                entry.title,
                entry.company,
                entry.start_date,
                end,
                self.colorize(&entry.id.to_string(), Color::BrightBlack)
            ));
        }

        let prefs = &snapshot.preferences;
        output.push_str(&self.format_header("Preferences", 2));
        output.push_str(&format!("Target role: {}\n", prefs.target_role));
        output.push_str(&format!("Location:    {}\n", prefs.location_preference.label()));
        output.push_str(&format!("Work type:   {}\n", prefs.work_type.label()));
        if prefs.salary_expectation > 0 {
            output.push_str(&format!("Salary:      {}\n", format_currency(prefs.salary_expectation)));
        }
        output.push_str(&format!("Relocate:    {}\n", if prefs.willing_to_relocate { "yes" } else { "no" }));
        Ok(output)
    }

    fn format_roadmap(&self, roadmap: &CareerRoadmap) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header(&format!("CAREER ROADMAP: {}", roadmap.track.label()), 1));
        output.push_str(&format!(
            "Target role: {} | {:.1} years | current salary {}\n",
            if roadmap.target_role.is_empty() { "none" } else { roadmap.target_role.as_str() },
            roadmap.current_experience,
            format_currency(roadmap.current_salary)
        ));

        output.push_str(&self.format_header("Career Path", 2));
        for step in &roadmap.career_path {
            let marker = if step.current { "▶" } else { " " };
            let title = if step.current {
                self.colorize(&step.title, Color::Green)
            } else {
                step.title.clone()
            };
            output.push_str(&format!("{} {}. {}\n     {}\n", marker, step.step, title, step.description));
            if let Some(alternative) = &step.alternative_title {
                output.push_str(&format!(
                    "     {}\n",
                    self.colorize(&format!("Alternative path: {}", alternative), Color::Cyan)
                ));
            }
        }

        output.push_str(&self.format_header("Skill Timeline", 2));
        for stage in &roadmap.timeline {
            output.push_str(&format!(
                "{} {}\n  {}\n",
                self.colorize(&stage.period, Color::Yellow),
                stage.title,
                stage.description
            ));
            if !stage.skills.is_empty() {
                output.push_str(&format!("  Learn: {}\n", stage.skills.join(", ")));
            }
        }

        output.push_str(&self.format_header("Salary by Experience", 3));
        let max = roadmap.salary_curve.iter().map(|p| p.salary).max().unwrap_or(0) as f64;
        for point in &roadmap.salary_curve {
            output.push_str(&format!(
                "  {:>2} yrs {} {}\n",
                point.years,
                Self::format_bar(point.salary as f64, max),
                format_currency(point.salary)
            ));
        }
        if roadmap.role_modifier != 1.0 {
            output.push_str(&format!(
                "  Future points include a x{:.2} adjustment for the target role\n",
                roadmap.role_modifier
            ));
        }
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_matches(&self, report: &MatchReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_dashboard(&self, report: &DashboardReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_profile(&self, snapshot: &ProfileSnapshot) -> Result<String> {
        self.to_json(snapshot)
    }

    fn format_roadmap(&self, roadmap: &CareerRoadmap) -> Result<String> {
        self.to_json(roadmap)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: u8) -> &'static str {
        match score {
            90..=100 => "🟢 Excellent",
            80..=89 => "🟡 Strong",
            70..=79 => "🟠 Good",
            60..=69 => "🔴 Fair",
            _ => "🔴 Weak",
        }
    }

    fn metadata_line(&self, metadata: &ReportMetadata) -> String {
        if !self.include_metadata {
            return String::new();
        }
        format!(
            "**Generated:** {} | **Source:** {}{}\n\n",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            metadata.listing_source,
            if metadata.demo_mode { " | **Demo mode**" } else { "" }
        )
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_matches(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::from("# Job Matches\n\n");
        output.push_str(&self.metadata_line(&report.metadata));
        output.push_str(&format!(
            "**Target role:** {} | **Location:** {}\n\n",
            report.profile.target_role, report.profile.location_preference
        ));
        if !report.filters.is_empty() {
            output.push_str(&format!("**Filters:** {}\n\n", report.filters.join(", ")));
        }

        if report.page.items.is_empty() {
            output.push_str("_No job listings match the current filters._\n");
            return Ok(output);
        }

        output.push_str("| Score | Title | Company | Location | Salary | Matching skills |\n");
        output.push_str("|---|---|---|---|---|---|\n");
        for result in &report.page.items {
            let listing = &result.listing;
            output.push_str(&format!(
                "| {}% {} | {} | {} | {} | {} | {} |\n",
                result.match_score,
                Self::markdown_score_badge(result.match_score),
                listing.title,
                listing.company,
                listing.location,
                listing.salary.as_ref().map(|s| s.to_string()).unwrap_or_default(),
                result.matching_skills.join(", ")
            ));
        }

        output.push_str(&format!(
            "\nPage {} of {} ({} matches)\n",
            report.page.current_page, report.page.total_pages, report.page.total_items
        ));
        Ok(output)
    }

    fn format_dashboard(&self, report: &DashboardReport) -> Result<String> {
        let analytics = &report.analytics;
        let mut output = String::from("# Career Dashboard\n\n");
        output.push_str(&self.metadata_line(&report.metadata));

        output.push_str("## Overview\n\n");
        output.push_str(&format!("- **Profile completion:** {}%\n", analytics.profile_completion));
        output.push_str(&format!("- **Market demand:** {}/100\n", analytics.average_market_demand));
        output.push_str(&format!("- **Salary potential:** {}\n", format_currency(analytics.salary_potential)));
        output.push_str(&format!(
            "- **Market competitiveness:** {}%\n",
            analytics.strength.market_competitiveness
        ));
        output.push_str(&format!("- **Growth potential:** {}%\n\n", analytics.strength.growth_potential));

        output.push_str("## Insights\n\n");
        output.push_str(&format!("> {}\n>\n> {}\n\n", analytics.skill_gap_insight, analytics.market_trend_insight));

        if let Some(current) = analytics.roadmap.current_step() {
            output.push_str(&format!("## Career Path\n\n- **Now:** {}\n", current.title));
            if let Some(next) = analytics.roadmap.next_step() {
                output.push_str(&format!("- **Next:** {}\n", next_step_title(next)));
            }
            output.push('\n');
        }

        if !analytics.skill_gaps.is_empty() {
            output.push_str("## Skill Gaps\n\n| Skill | Demand | Gap |\n|---|---|---|\n");
            for gap in &analytics.skill_gaps {
                output.push_str(&format!("| {} | {} | {} |\n", gap.name, gap.demand, gap.gap));
            }
            output.push('\n');
        }

        if !report.top_matches.is_empty() {
            output.push_str("## Top Matches\n\n");
            for result in &report.top_matches {
                output.push_str(&format!(
                    "- **{}** at {}: {}% {}\n",
                    result.listing.title,
                    result.listing.company,
                    result.match_score,
                    Self::markdown_score_badge(result.match_score)
                ));
            }
            output.push('\n');
        }

        for chart in report.charts.iter().filter(|c| !c.points.is_empty()) {
            output.push_str(&format!("### {}\n\n| Label | Value |\n|---|---|\n", chart.title));
            for point in &chart.points {
                output.push_str(&format!("| {} | {} |\n", point.label, point.value));
            }
            output.push('\n');
        }
        Ok(output)
    }

    fn format_profile(&self, snapshot: &ProfileSnapshot) -> Result<String> {
        let profile = &snapshot.profile;
        let mut output = format!("# {}\n\n", if profile.name.is_empty() { "Profile" } else { profile.name.as_str() });
        output.push_str(&format!(
            "{} | {} | {:.1} years | {}\n\n",
            profile.job_title, profile.location, profile.experience, profile.education
        ));

        output.push_str("## Skills\n\n| Skill | Level | Years |\n|---|---|---|\n");
        for skill in &snapshot.skills {
            output.push_str(&format!("| {} | {} | {:.1} |\n", skill.name, skill.level, skill.experience));
        }

        output.push_str("\n## Work History\n\n");
        for entry in &snapshot.experience {
            output.push_str(&format!("- {} at {} (since {})\n", entry.title, entry.company, entry.start_date));
        }

        output.push_str(&format!(
            "\n## Preferences\n\n- Target role: {}\n- Location: {}\n- Work type: {}\n",
            snapshot.preferences.target_role,
            snapshot.preferences.location_preference.label(),
            snapshot.preferences.work_type.label()
        ));
        Ok(output)
    }

    fn format_roadmap(&self, roadmap: &CareerRoadmap) -> Result<String> {
        let mut output = format!("# Career Roadmap: {}\n\n", roadmap.track.label());
        output.push_str(&format!(
            "**Experience:** {:.1} years | **Current salary:** {}\n\n",
            roadmap.current_experience,
            format_currency(roadmap.current_salary)
        ));

        output.push_str("## Career Path\n\n");
        for step in &roadmap.career_path {
            let title = if step.current {
                format!("**{}** (current)", step.title)
            } else {
                step.title.clone()
            };
            output.push_str(&format!("{}. {}: {}\n", step.step, title, step.description));
            if let Some(alternative) = &step.alternative_title {
                output.push_str(&format!("   - Alternative path: {}\n", alternative));
            }
        }

        output.push_str("\n## Skill Timeline\n\n");
        for stage in &roadmap.timeline {
            output.push_str(&format!("### {}: {}\n\n{}\n\n", stage.period, stage.title, stage.description));
            for skill in &stage.skills {
                output.push_str(&format!("- {}\n", skill));
            }
            if !stage.skills.is_empty() {
                output.push('\n');
            }
        }

        output.push_str("## Salary by Experience\n\n| Years | Salary |\n|---|---|\n");
        for point in &roadmap.salary_curve {
            output.push_str(&format!("| {} | {} |\n", point.years, format_currency(point.salary)));
        }
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::with_options(config.color_output, config.detailed, true, true)
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_matches(&self, report: &MatchReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_matches(report)
    }

    pub fn generate_dashboard(&self, report: &DashboardReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_dashboard(report)
    }

    pub fn generate_profile(&self, snapshot: &ProfileSnapshot, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_profile(snapshot)
    }

    pub fn generate_roadmap(&self, roadmap: &CareerRoadmap, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_roadmap(roadmap)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn next_step_title(step: &crate::analytics::roadmap::RoadmapStep) -> String {
    match &step.alternative_title {
        Some(alternative) => format!("{} (or {})", step.title, alternative),
        None => step.title.clone(),
    }
}

/// "$92,500"
pub fn format_currency(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, stem: &str, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}{}.txt", stem, timestamp_suffix),
        OutputFormat::Json => format!("{}{}.json", stem, timestamp_suffix),
        OutputFormat::Markdown => format!("{}{}.md", stem, timestamp_suffix),
    }
}
