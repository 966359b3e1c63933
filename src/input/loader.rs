//! Listing source: loads job listings from JSON or CSV files, or the embedded samples

use crate::error::{CareerMatchError, Result};
use crate::input::file_detector::FileType;
use crate::input::listing::{parse_lenient_date, JobListing, Salary};
use crate::input::sample;
use log::{info, warn};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// One CSV row. Every column is optional text so a bad cell skips a field, not the file.
#[derive(Debug, Deserialize)]
struct CsvListingRow {
    id: Option<String>,
    title: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    salary: Option<String>,
    #[serde(default, alias = "jobType")]
    job_type: Option<String>,
    #[serde(default, alias = "experience", alias = "experienceRange")]
    experience_range: Option<String>,
    #[serde(default)]
    skills: Option<String>,
    #[serde(default, alias = "postedDate")]
    posted_date: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Load listings from `path`, or the embedded sample set when no path is given
pub async fn load_listings(path: Option<&Path>) -> Result<Vec<JobListing>> {
    match path {
        Some(path) => load_listing_file(path).await,
        None => {
            info!("Using embedded sample listings");
            Ok(sample::sample_listings())
        }
    }
}

pub async fn load_listing_file(path: &Path) -> Result<Vec<JobListing>> {
    if !path.exists() {
        return Err(CareerMatchError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let listings = match detect_file_type(path)? {
        FileType::Json => {
            info!("Reading JSON listings: {}", path.display());
            let content = fs::read_to_string(path).await?;
            parse_json_listings(&content)?
        }
        FileType::Csv => {
            info!("Importing CSV listings: {}", path.display());
            let content = fs::read_to_string(path).await?;
            parse_csv_listings(&content)?
        }
        FileType::Unknown => {
            return Err(CareerMatchError::UnsupportedFormat(format!(
                "Unsupported listing file: {}",
                path.display()
            )));
        }
    };

    info!("Loaded {} listings from {}", listings.len(), path.display());
    Ok(listings)
}

fn detect_file_type(path: &Path) -> Result<FileType> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| CareerMatchError::InvalidInput(format!("File has no extension: {}", path.display())))?;

    Ok(FileType::from_extension(extension))
}

/// Parse a JSON array of listings. Entries that do not form a listing are
/// skipped with a warning; a document that is not an array is an error.
pub fn parse_json_listings(content: &str) -> Result<Vec<JobListing>> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(content)?;

    let mut listings = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<JobListing>(entry) {
            Ok(listing) => listings.push(listing),
            Err(e) => warn!("Skipping JSON listing {}: {}", index, e),
        }
    }
    Ok(listings)
}

/// Parse CSV listings. Rows without an id or title are skipped with a warning.
pub fn parse_csv_listings(content: &str) -> Result<Vec<JobListing>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut listings = Vec::new();
    for (index, row) in reader.deserialize::<CsvListingRow>().enumerate() {
        let row_number = index + 2; // header is line 1
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping CSV row {}: {}", row_number, e);
                continue;
            }
        };

        let (id, title) = match (non_empty(row.id), non_empty(row.title)) {
            (Some(id), Some(title)) => (id, title),
            _ => {
                warn!("Skipping CSV row {}: missing id or title", row_number);
                continue;
            }
        };

        listings.push(JobListing {
            id,
            title,
            company: row.company.unwrap_or_default(),
            location: row.location.unwrap_or_default(),
            salary: non_empty(row.salary).map(|s| match s.parse::<u32>() {
                Ok(amount) => Salary::Amount(amount),
                Err(_) => Salary::Range(s),
            }),
            job_type: row.job_type.unwrap_or_default(),
            experience_range: non_empty(row.experience_range),
            skills: row.skills.as_deref().map(split_skills).unwrap_or_default(),
            posted_date: row.posted_date.as_deref().and_then(parse_lenient_date),
            description: non_empty(row.description),
        });
    }

    Ok(listings)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Skills cells use ';' when present, falling back to ','
fn split_skills(cell: &str) -> Vec<String> {
    let separator = if cell.contains(';') { ';' } else { ',' };
    cell.split(separator)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_csv_with_camel_case_headers() {
        let csv = "id,title,company,location,salary,jobType,experience,skills,postedDate\n\
                   j1,Backend Developer,Acme,Remote,\"$90,000 - $120,000\",Full-time,3-5 years,Python;Django;SQL,2024-03-01\n\
                   j2,Data Analyst,Globex,\"Austin, TX\",85000,Contract,,SQL,\n";
        let listings = parse_csv_listings(csv).unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].skills, vec!["Python", "Django", "SQL"]);
        assert_eq!(listings[0].salary_bounds(), (Some(90_000), Some(120_000)));
        assert_eq!(listings[1].salary, Some(Salary::Amount(85_000)));
        assert_eq!(listings[1].experience_range, None);
        assert_eq!(listings[1].posted_date, None);
    }

    #[test]
    fn skips_rows_missing_identity() {
        let csv = "id,title,skills\n,Nameless,Rust\nj3,Rust Engineer,\"Rust, Tokio\"\n";
        let listings = parse_csv_listings(csv).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].skills, vec!["Rust", "Tokio"]);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_json_listings("{ not json").is_err());
        assert!(parse_json_listings(r#"{"id": "j1"}"#).is_err());
    }

    #[test]
    fn json_entries_with_numeric_fields_are_kept() {
        let json = r#"[
            {"id": "j1", "title": "Backend Developer", "experience": "2-5 years"},
            {"id": 2, "title": "Data Engineer", "experience": 5}
        ]"#;
        let listings = parse_json_listings(json).unwrap();
        let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["j1", "2"]);
        assert_eq!(listings[1].experience().map(|r| r.min_years), Some(5.0));
    }

    #[test]
    fn malformed_json_entries_are_skipped() {
        let json = r#"[
            {"id": "j1", "title": "Backend Developer"},
            {"id": "j2"},
            {"id": "j3", "title": "QA Engineer", "skills": "Selenium"},
            {"id": "j4", "title": "SRE", "skills": ["Kubernetes"]}
        ]"#;
        let listings = parse_json_listings(json).unwrap();
        let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["j1", "j4"]);
    }
}
