//! Job listing records and the tolerant parsers for their loosely formatted fields

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(deserialize_with = "deserialize_text_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: Option<Salary>,
    #[serde(default, alias = "jobType")]
    pub job_type: String,
    #[serde(
        default,
        alias = "experience",
        alias = "experienceRange",
        deserialize_with = "deserialize_optional_text_or_number"
    )]
    pub experience_range: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, alias = "postedDate", deserialize_with = "deserialize_lenient_date")]
    pub posted_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Salary as found upstream: either "$X,000 - $Y,000" or a plain number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Salary {
    Amount(u32),
    Range(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceRange {
    pub min_years: f64,
    /// `None` for open-ended ranges such as "10+ years"
    pub max_years: Option<f64>,
}

/// Work arrangement derived from a listing's free-text location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationFamily {
    Remote,
    Hybrid,
    OnSite,
}

impl JobListing {
    pub fn experience(&self) -> Option<ExperienceRange> {
        self.experience_range.as_deref().and_then(ExperienceRange::parse)
    }

    pub fn location_family(&self) -> LocationFamily {
        LocationFamily::of(&self.location)
    }

    pub fn salary_bounds(&self) -> (Option<u32>, Option<u32>) {
        self.salary.as_ref().map(Salary::bounds).unwrap_or((None, None))
    }
}

impl Salary {
    pub fn bounds(&self) -> (Option<u32>, Option<u32>) {
        match self {
            Salary::Amount(amount) => (Some(*amount), Some(*amount)),
            Salary::Range(text) => {
                let mut amounts = amount_regex()
                    .captures_iter(text)
                    .filter_map(|cap| cap[1].replace(',', "").parse::<u32>().ok());
                let low = amounts.next();
                let high = amounts.next().or(low);
                (low, high)
            }
        }
    }

    pub fn lower_bound(&self) -> Option<u32> {
        self.bounds().0
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Salary::Amount(amount) => write!(f, "${}", amount),
            Salary::Range(text) => f.write_str(text),
        }
    }
}

impl ExperienceRange {
    /// Parse "N-M years", "N+ years" or a bare "N years" (at least N).
    /// Returns `None` when no number can be found.
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(cap) = bounded_range_regex().captures(text) {
            let a: f64 = cap[1].parse().ok()?;
            let b: f64 = cap[2].parse().ok()?;
            return Some(Self {
                min_years: a.min(b),
                max_years: Some(a.max(b)),
            });
        }
        if let Some(cap) = open_range_regex().captures(text) {
            let min_years: f64 = cap[1].parse().ok()?;
            return Some(Self { min_years, max_years: None });
        }
        None
    }
}

impl LocationFamily {
    pub fn of(location: &str) -> Self {
        let lower = location.to_lowercase();
        if lower.contains("remote") {
            LocationFamily::Remote
        } else if lower.contains("hybrid") {
            LocationFamily::Hybrid
        } else {
            LocationFamily::OnSite
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LocationFamily::Remote => "Remote",
            LocationFamily::Hybrid => "Hybrid",
            LocationFamily::OnSite => "On-site",
        }
    }
}

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$?\s*(\d[\d,]*)").expect("valid salary pattern"))
}

fn bounded_range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)?)\s*(?:-|–|to)\s*(\d+(?:\.\d+)?)").expect("valid range pattern")
    })
}

fn open_range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)\s*\+?").expect("valid open range pattern"))
}

/// Upstream datasets mix numeric and text ids and experience values
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Integer(n) => n.to_string(),
            TextOrNumber::Float(n) => n.to_string(),
        }
    }
}

fn deserialize_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(String::from))
}

/// Accepts "YYYY-MM-DD" or an RFC 3339 timestamp; anything else becomes `None`
fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_lenient_date))
}

pub fn parse_lenient_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            log::warn!("Ignoring unparsable posted date '{}'", value);
            None
        })
}
