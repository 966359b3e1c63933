//! Resume text extraction and catalog-based skill detection

use crate::error::{CareerMatchError, Result};
use log::{debug, info};
use pulldown_cmark::{Event, Parser, Tag};
use regex::{Regex, RegexBuilder};
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

/// Markdown reduced to its text and inline code, one line per block
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&content))
    }
}

pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_) | Tag::TableRow) => {
                text.push('\n')
            }
            Event::End(Tag::TableCell) => text.push(' '),
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read a resume as plain text. Supports .txt, .md and .markdown.
pub async fn extract_resume_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CareerMatchError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let text = match extension.as_str() {
        "txt" => PlainTextExtractor.extract(path).await?,
        "md" | "markdown" => MarkdownExtractor.extract(path).await?,
        _ => {
            return Err(CareerMatchError::UnsupportedFormat(format!(
                "Unsupported resume file: {} (expected .txt or .md)",
                path.display()
            )))
        }
    };
    info!("Extracted {} characters from {}", text.len(), path.display());
    Ok(text)
}

/// Skills recognized in resume text, in reporting order
pub const SKILL_CATALOG: &[&str] = &[
    "JavaScript", "TypeScript", "Python", "Java", "C#", "C++", "Ruby", "PHP", "Go", "Swift",
    "React", "Angular", "Vue", "Node.js", "Express", "Django", "Flask", "Spring", "ASP.NET",
    "HTML", "CSS", "SCSS", "Sass", "Bootstrap", "Tailwind", "Material UI", "jQuery",
    "SQL", "MongoDB", "PostgreSQL", "MySQL", "SQLite", "Oracle", "Redis", "Firebase",
    "AWS", "Azure", "Google Cloud", "Docker", "Kubernetes", "Jenkins", "CircleCI", "GitLab CI",
    "Git", "GitHub", "BitBucket", "SVN", "Mercurial",
    "Agile", "Scrum", "Kanban", "Jira", "Confluence", "Trello",
    "TensorFlow", "PyTorch", "scikit-learn", "Pandas", "NumPy", "R",
    "Mobile", "iOS", "Android", "React Native", "Flutter", "Machine Learning", "AI",
];

/// Catalog entries that are also everyday words; these only match with exact casing
const CASE_SENSITIVE: &[&str] = &["Go", "R", "AI", "Express", "Spring", "Swift", "Oracle"];

fn catalog_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        SKILL_CATALOG
            .iter()
            .filter_map(|&skill| {
                // Boundaries are any non-word character, so "C++" and "C#" match too
                let pattern = format!(r"(?:^|[^\w]){}(?:$|[^\w])", regex::escape(skill));
                RegexBuilder::new(&pattern)
                    .case_insensitive(!CASE_SENSITIVE.contains(&skill))
                    .build()
                    .ok()
                    .map(|re| (skill, re))
            })
            .collect()
    })
}

/// Catalog skills mentioned in `text` as whole words, in catalog order
pub fn extract_skills(text: &str) -> Vec<String> {
    let skills: Vec<String> = catalog_patterns()
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(skill, _)| skill.to_string())
        .collect();
    debug!("Detected {} catalog skills", skills.len());
    skills
}
