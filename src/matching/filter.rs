//! Listing filters and result pagination

use crate::input::listing::{JobListing, LocationFamily};
use crate::matching::engine::MatchResult;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceBucket {
    Entry,
    Mid,
    Senior,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryBand {
    UpTo50k,
    From50kTo80k,
    From80kTo120k,
    Over120k,
}

#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub role: Option<String>,
    pub location: Option<LocationFamily>,
    pub experience: Option<ExperienceBucket>,
    pub salary: Option<SalaryBand>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl ExperienceBucket {
    /// Buckets classify a listing by the lower end of its experience range
    fn contains(self, min_years: f64) -> bool {
        match self {
            ExperienceBucket::Entry => min_years < 2.0,
            ExperienceBucket::Mid => (2.0..5.0).contains(&min_years),
            ExperienceBucket::Senior => (5.0..8.0).contains(&min_years),
            ExperienceBucket::Expert => min_years >= 8.0,
        }
    }
}

impl ExperienceBucket {
    pub const fn label(self) -> &'static str {
        match self {
            ExperienceBucket::Entry => "0-2 years",
            ExperienceBucket::Mid => "2-5 years",
            ExperienceBucket::Senior => "5-8 years",
            ExperienceBucket::Expert => "8+ years",
        }
    }
}

impl FromStr for ExperienceBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0-2" => Ok(ExperienceBucket::Entry),
            "2-5" => Ok(ExperienceBucket::Mid),
            "5-8" => Ok(ExperienceBucket::Senior),
            "8+" => Ok(ExperienceBucket::Expert),
            other => Err(format!(
                "Invalid experience bucket: {}. Supported: 0-2, 2-5, 5-8, 8+",
                other
            )),
        }
    }
}

impl SalaryBand {
    fn contains(self, salary: u32) -> bool {
        match self {
            SalaryBand::UpTo50k => salary <= 50_000,
            SalaryBand::From50kTo80k => (50_000..=80_000).contains(&salary),
            SalaryBand::From80kTo120k => (80_000..=120_000).contains(&salary),
            SalaryBand::Over120k => salary >= 120_000,
        }
    }
}

impl SalaryBand {
    pub const fn label(self) -> &'static str {
        match self {
            SalaryBand::UpTo50k => "up to $50k",
            SalaryBand::From50kTo80k => "$50k-$80k",
            SalaryBand::From80kTo120k => "$80k-$120k",
            SalaryBand::Over120k => "$120k+",
        }
    }
}

impl FromStr for SalaryBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace(['_', ','], "").to_lowercase().as_str() {
            "0-50000" | "0-50k" => Ok(SalaryBand::UpTo50k),
            "50000-80000" | "50k-80k" => Ok(SalaryBand::From50kTo80k),
            "80000-120000" | "80k-120k" => Ok(SalaryBand::From80kTo120k),
            "120000+" | "120k+" => Ok(SalaryBand::Over120k),
            other => Err(format!(
                "Invalid salary bucket: {}. Supported: 0-50000, 50000-80000, 80000-120000, 120000+",
                other
            )),
        }
    }
}

pub fn parse_location_family(value: &str) -> Result<LocationFamily, String> {
    let normalized: String = value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    match normalized.as_str() {
        "remote" => Ok(LocationFamily::Remote),
        "hybrid" => Ok(LocationFamily::Hybrid),
        "onsite" => Ok(LocationFamily::OnSite),
        _ => Err(format!("Invalid location: {}. Supported: remote, hybrid, on-site", value)),
    }
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.role.is_none()
            && self.location.is_none()
            && self.experience.is_none()
            && self.salary.is_none()
            && self.search.as_deref().map_or(true, |s| s.trim().is_empty())
    }

    pub fn matches(&self, listing: &JobListing) -> bool {
        if let Some(role) = &self.role {
            if !listing.title.to_lowercase().contains(&role.trim().to_lowercase()) {
                return false;
            }
        }

        if let Some(family) = self.location {
            if listing.location_family() != family {
                return false;
            }
        }

        if let Some(bucket) = self.experience {
            match listing.experience() {
                Some(range) if bucket.contains(range.min_years) => {}
                _ => return false,
            }
        }

        // Listings without a parsable salary are kept
        if let Some(bucket) = self.salary {
            if let Some(low) = listing.salary.as_ref().and_then(|s| s.lower_bound()) {
                if !bucket.contains(low) {
                    return false;
                }
            }
        }

        if let Some(term) = &self.search {
            let term = term.trim().to_lowercase();
            if !term.is_empty() {
                let hit = listing.title.to_lowercase().contains(&term)
                    || listing.company.to_lowercase().contains(&term)
                    || listing.skills.iter().any(|s| s.to_lowercase().contains(&term));
                if !hit {
                    return false;
                }
            }
        }

        true
    }

    /// Human-readable labels for the active filters
    pub fn describe(&self) -> Vec<String> {
        let mut labels = Vec::new();
        if let Some(role) = &self.role {
            labels.push(format!("role: {}", role));
        }
        if let Some(location) = self.location {
            labels.push(format!("location: {}", location.label()));
        }
        if let Some(bucket) = self.experience {
            labels.push(format!("experience: {}", bucket.label()));
        }
        if let Some(band) = self.salary {
            labels.push(format!("salary: {}", band.label()));
        }
        if let Some(term) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            labels.push(format!("search: {}", term.trim()));
        }
        labels
    }

    /// Keep matching results, preserving rank order
    pub fn apply(&self, results: Vec<MatchResult>) -> Vec<MatchResult> {
        if self.is_empty() {
            return results;
        }
        results.into_iter().filter(|r| self.matches(&r.listing)).collect()
    }
}

/// Slice `items` into a 1-based page; out-of-range pages clamp to the nearest valid one
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let current_page = page.clamp(1, total_pages.max(1));

    let start = ((current_page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        current_page,
        page_size,
        total_pages: total_pages.max(1),
        total_items,
        has_prev: current_page > 1,
        has_next: current_page < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::sample::sample_listings;

    #[test]
    fn location_filter_uses_family() {
        let filter = JobFilter {
            location: Some(LocationFamily::Hybrid),
            ..Default::default()
        };
        let hybrid: Vec<String> = sample_listings()
            .into_iter()
            .filter(|l| filter.matches(l))
            .map(|l| l.id)
            .collect();
        assert_eq!(hybrid, vec!["job_fs_1", "job_ds_1", "job_be_2"]);
    }

    #[test]
    fn experience_bucket_uses_lower_bound() {
        let filter = JobFilter {
            experience: Some("8+".parse().unwrap()),
            ..Default::default()
        };
        let senior: Vec<String> = sample_listings()
            .into_iter()
            .filter(|l| filter.matches(l))
            .map(|l| l.id)
            .collect();
        assert_eq!(senior, vec!["job_be_2"]);
    }

    #[test]
    fn salary_and_search_filters() {
        let filter = JobFilter {
            salary: Some("120000+".parse().unwrap()),
            search: Some("kafka".into()),
            ..Default::default()
        };
        let ids: Vec<String> = sample_listings()
            .into_iter()
            .filter(|l| filter.matches(l))
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["job_be_2"]);
    }

    #[test]
    fn describes_active_filters() {
        let filter = JobFilter {
            location: Some(LocationFamily::Remote),
            salary: Some(SalaryBand::Over120k),
            search: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(filter.describe(), vec!["location: Remote", "salary: $120k+"]);
        assert!(JobFilter::default().is_empty());
    }

    #[test]
    fn rejects_unknown_buckets() {
        assert!("3-4".parse::<ExperienceBucket>().is_err());
        assert!("lots".parse::<SalaryBand>().is_err());
        assert!(parse_location_family("moon").is_err());
        assert_eq!(parse_location_family("On-site"), Ok(LocationFamily::OnSite));
    }

    #[test]
    fn pagination_clamps_page() {
        let items: Vec<u32> = (1..=20).collect();

        let page = paginate(&items, 3, 9);
        assert_eq!(page.items, vec![19, 20]);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_prev);
        assert!(!page.has_next);

        let page = paginate(&items, 99, 9);
        assert_eq!(page.current_page, 3);

        let page = paginate(&items, 0, 9);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items.len(), 9);
    }

    #[test]
    fn pagination_of_empty_list() {
        let page = paginate::<u32>(&[], 1, 9);
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next);
    }
}
