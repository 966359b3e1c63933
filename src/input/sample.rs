//! Embedded sample data used when no listing file is supplied

use crate::analytics::market::MarketSkillDemand;
use crate::input::listing::{parse_lenient_date, JobListing, Salary};

struct SampleListing {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    salary: &'static str,
    job_type: &'static str,
    experience: &'static str,
    posted: &'static str,
    skills: &'static [&'static str],
}

const SAMPLE_LISTINGS: &[SampleListing] = &[
    SampleListing {
        id: "job_fe_1",
        title: "Junior Frontend Developer",
        company: "WebTech Solutions",
        location: "Remote",
        salary: "$60,000 - $80,000",
        job_type: "Full-time",
        experience: "0-2 years",
        posted: "2024-09-28",
        skills: &["JavaScript", "HTML", "CSS", "React", "Responsive Design", "Git"],
    },
    SampleListing {
        id: "job_fe_2",
        title: "Senior Frontend Developer",
        company: "TechCorp",
        location: "Remote",
        salary: "$100,000 - $130,000",
        job_type: "Full-time",
        experience: "5-8 years",
        posted: "2024-09-15",
        skills: &["JavaScript", "React", "TypeScript", "CSS", "HTML", "Redux"],
    },
    SampleListing {
        id: "job_fs_1",
        title: "Full Stack Developer",
        company: "InnovateSoft",
        location: "San Francisco, CA (Hybrid)",
        salary: "$90,000 - $120,000",
        job_type: "Full-time",
        experience: "3-5 years",
        posted: "2024-09-18",
        skills: &["JavaScript", "React", "Node.js", "MongoDB", "Express", "Git"],
    },
    SampleListing {
        id: "job_be_1",
        title: "Backend Developer",
        company: "DataStream",
        location: "Austin, TX",
        salary: "$85,000 - $110,000",
        job_type: "Full-time",
        experience: "2-5 years",
        posted: "2024-09-20",
        skills: &["Python", "Django", "PostgreSQL", "REST APIs", "Docker"],
    },
    SampleListing {
        id: "job_do_1",
        title: "DevOps Engineer",
        company: "CloudNine Systems",
        location: "Remote",
        salary: "$110,000 - $140,000",
        job_type: "Full-time",
        experience: "4-7 years",
        posted: "2024-09-22",
        skills: &["AWS", "Docker", "Kubernetes", "Terraform", "CI/CD", "Linux"],
    },
    SampleListing {
        id: "job_ds_1",
        title: "Data Scientist",
        company: "Insight Analytics",
        location: "New York, NY (Hybrid)",
        salary: "$115,000 - $145,000",
        job_type: "Full-time",
        experience: "3-6 years",
        posted: "2024-09-10",
        skills: &["Python", "SQL", "Machine Learning", "Pandas", "Statistics"],
    },
    SampleListing {
        id: "job_ma_1",
        title: "Mobile App Developer",
        company: "AppWorks",
        location: "Seattle, WA",
        salary: "$95,000 - $125,000",
        job_type: "Contract",
        experience: "2-4 years",
        posted: "2024-09-12",
        skills: &["React Native", "JavaScript", "TypeScript", "iOS", "Android"],
    },
    SampleListing {
        id: "job_ux_1",
        title: "UI/UX Designer",
        company: "PixelPerfect",
        location: "Remote",
        salary: "$80,000 - $105,000",
        job_type: "Full-time",
        experience: "2-5 years",
        posted: "2024-09-25",
        skills: &["Figma", "User Research", "Prototyping", "HTML", "CSS"],
    },
    SampleListing {
        id: "job_be_2",
        title: "Principal Backend Engineer",
        company: "ScaleGrid",
        location: "Chicago, IL (Hybrid)",
        salary: "$150,000 - $190,000",
        job_type: "Full-time",
        experience: "10+ years",
        posted: "2024-08-30",
        skills: &["Java", "Go", "Distributed Systems", "AWS", "Kafka"],
    },
    SampleListing {
        id: "job_qa_1",
        title: "QA Engineer",
        company: "TechHelp",
        location: "Denver, CO",
        salary: "$65,000 - $85,000",
        job_type: "Part-time",
        experience: "1-3 years",
        posted: "2024-09-05",
        skills: &["Testing", "Selenium", "JavaScript", "Jira"],
    },
];

pub fn sample_listings() -> Vec<JobListing> {
    SAMPLE_LISTINGS
        .iter()
        .map(|s| JobListing {
            id: s.id.to_string(),
            title: s.title.to_string(),
            company: s.company.to_string(),
            location: s.location.to_string(),
            salary: Some(Salary::Range(s.salary.to_string())),
            job_type: s.job_type.to_string(),
            experience_range: Some(s.experience.to_string()),
            skills: s.skills.iter().map(|k| k.to_string()).collect(),
            posted_date: parse_lenient_date(s.posted),
            description: None,
        })
        .collect()
}

/// Reference market demand (0-100) and yearly growth (%) per skill
pub fn market_demand() -> Vec<MarketSkillDemand> {
    [
        ("JavaScript", 92, 5),
        ("React", 88, 12),
        ("Node.js", 83, 8),
        ("Python", 85, 15),
        ("TypeScript", 78, 20),
        ("AWS", 86, 18),
        ("Docker", 75, 10),
        ("SQL", 80, 3),
    ]
    .into_iter()
    .map(|(name, demand, growth)| MarketSkillDemand::new(name, demand, growth))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_ids_are_unique() {
        let listings = sample_listings();
        let ids: HashSet<_> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids.len(), listings.len());
    }

    #[test]
    fn sample_fields_parse() {
        for listing in sample_listings() {
            assert!(listing.experience().is_some(), "{} has no range", listing.id);
            assert!(listing.salary_bounds().0.is_some(), "{} has no salary", listing.id);
            assert!(listing.posted_date.is_some(), "{} has no date", listing.id);
        }
    }
}
