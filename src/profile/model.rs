//! Profile data structures: the user, their skills, preferences and work history

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub location: String,
    pub education: Education,
    /// Years of professional experience, derived from work history or entered manually
    pub experience: f64,
    pub current_salary: u32,
    pub job_title: String,
    pub linkedin: Option<String>,
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Education {
    #[default]
    None,
    HighSchool,
    Associates,
    Bachelors,
    Masters,
    PhD,
}

/// Proficiency levels, ordered from least to most proficient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub level: SkillLevel,
    #[serde(default)]
    pub experience: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocationPreference {
    Remote,
    Hybrid,
    OnSite,
    /// Free text such as a city name
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkType {
    FullTime,
    PartTime,
    Contract,
    Freelance,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub target_role: String,
    pub location_preference: LocationPreference,
    pub work_type: WorkType,
    pub salary_expectation: u32,
    pub willing_to_relocate: bool,
    pub certifications: bool,
}

/// A work-history entry. Only used to derive total years of experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
}

impl Education {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::HighSchool => "High School",
            Self::Associates => "Associate's",
            Self::Bachelors => "Bachelor's",
            Self::Masters => "Master's",
            Self::PhD => "PhD",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "" | "none" => Some(Self::None),
            "highschool" => Some(Self::HighSchool),
            "associates" | "associate" => Some(Self::Associates),
            "bachelors" | "bachelor" => Some(Self::Bachelors),
            "masters" | "master" => Some(Self::Masters),
            "phd" | "doctorate" => Some(Self::PhD),
            _ => None,
        }
    }

    pub fn is_set(self) -> bool {
        self != Self::None
    }
}

impl From<String> for Education {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_else(|| {
            log::warn!("Unknown education level '{}', treating as None", value);
            Self::None
        })
    }
}

impl From<Education> for String {
    fn from(value: Education) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl SkillLevel {
    pub const fn ordered() -> [Self; 4] {
        [Self::Beginner, Self::Intermediate, Self::Advanced, Self::Expert]
    }

    /// Numeric index 1..=4 shared by matching and the salary/analytics estimators
    pub const fn index(self) -> u32 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
            Self::Expert => 4,
        }
    }

    /// Proficiency as a percentage (25 per level)
    pub const fn proficiency(self) -> u8 {
        (self.index() * 25) as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(value.trim()))
    }
}

impl From<String> for SkillLevel {
    /// Unknown levels fall back to Beginner, the lowest index
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

impl From<SkillLevel> for String {
    fn from(value: SkillLevel) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Skill {
    pub fn new(name: impl Into<String>, level: SkillLevel, experience: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            level,
            experience: experience.max(0.0),
        }
    }

    /// Lowercase, trimmed name used for every case-insensitive comparison
    pub fn normalized_name(&self) -> String {
        normalize_skill_name(&self.name)
    }
}

pub fn normalize_skill_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl LocationPreference {
    pub fn label(&self) -> &str {
        match self {
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
            Self::OnSite => "On-site",
            Self::Other(text) => text,
        }
    }
}

impl Default for LocationPreference {
    fn default() -> Self {
        Self::Remote
    }
}

impl From<String> for LocationPreference {
    fn from(value: String) -> Self {
        let normalized: String = value
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "remote" => Self::Remote,
            "hybrid" => Self::Hybrid,
            "onsite" | "office" | "inoffice" => Self::OnSite,
            _ => Self::Other(value.trim().to_string()),
        }
    }
}

impl From<LocationPreference> for String {
    fn from(value: LocationPreference) -> Self {
        value.label().to_string()
    }
}

impl WorkType {
    pub fn label(&self) -> &str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Freelance => "Freelance",
            Self::Other(text) => text,
        }
    }
}

impl Default for WorkType {
    fn default() -> Self {
        Self::FullTime
    }
}

impl From<String> for WorkType {
    fn from(value: String) -> Self {
        let normalized: String = value
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "fulltime" => Self::FullTime,
            "parttime" => Self::PartTime,
            "contract" => Self::Contract,
            "freelance" => Self::Freelance,
            _ => Self::Other(value.trim().to_string()),
        }
    }
}

impl From<WorkType> for String {
    fn from(value: WorkType) -> Self {
        value.label().to_string()
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            target_role: "Software Developer".to_string(),
            location_preference: LocationPreference::Remote,
            work_type: WorkType::FullTime,
            salary_expectation: 0,
            willing_to_relocate: false,
            certifications: false,
        }
    }
}

impl WorkExperience {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            company: company.into(),
            start_date,
            current: end_date.is_none(),
            end_date,
            description: String::new(),
        }
    }

    /// Duration in years; open entries run until `today`
    pub fn years(&self, today: NaiveDate) -> f64 {
        let end = if self.current {
            today
        } else {
            self.end_date.unwrap_or(today)
        };
        let days = (end - self.start_date).num_days().max(0);
        days as f64 / 365.25
    }
}

/// Total years across all entries, rounded to one decimal place
pub fn derive_experience_years(entries: &[WorkExperience], today: NaiveDate) -> f64 {
    let total: f64 = entries.iter().map(|entry| entry.years(today)).sum();
    (total * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn skill_level_index_is_one_through_four() {
        let indices: Vec<u32> = SkillLevel::ordered().iter().map(|l| l.index()).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert_eq!(SkillLevel::Expert.proficiency(), 100);
    }

    #[test]
    fn unknown_skill_level_falls_back_to_beginner() {
        let level: SkillLevel = serde_json::from_str("\"Guru\"").unwrap();
        assert_eq!(level, SkillLevel::Beginner);

        let level: SkillLevel = serde_json::from_str("\"advanced\"").unwrap();
        assert_eq!(level, SkillLevel::Advanced);
    }

    #[test]
    fn education_accepts_apostrophe_labels() {
        let education: Education = serde_json::from_str("\"Master's\"").unwrap();
        assert_eq!(education, Education::Masters);
        assert_eq!(serde_json::to_string(&Education::Bachelors).unwrap(), "\"Bachelor's\"");
    }

    #[test]
    fn location_preference_tolerates_free_text() {
        assert_eq!(LocationPreference::from("On-site".to_string()), LocationPreference::OnSite);
        assert_eq!(
            LocationPreference::from(" Berlin ".to_string()),
            LocationPreference::Other("Berlin".to_string())
        );
    }

    #[test]
    fn derives_years_from_work_history() {
        let today = date(2024, 1, 1);
        let entries = vec![
            WorkExperience::new("Developer", "Acme", date(2019, 1, 1), Some(date(2021, 1, 1))),
            WorkExperience::new("Senior Developer", "Globex", date(2021, 1, 1), None),
        ];
        assert_eq!(derive_experience_years(&entries, today), 5.0);
    }

    #[test]
    fn entries_ending_before_they_start_count_as_zero() {
        let entry = WorkExperience::new("Intern", "Acme", date(2022, 6, 1), Some(date(2022, 1, 1)));
        assert_eq!(entry.years(date(2024, 1, 1)), 0.0);
    }
}
