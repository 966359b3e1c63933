//! Career roadmaps: per-track career path, skill timeline and salary curve,
//! personalized for the profile's experience, skills, salary and target role

use crate::profile::model::{normalize_skill_name, Preferences, Skill, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Roadmap families a target role maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleTrack {
    Default,
    Frontend,
    Backend,
    FullStack,
    DevOps,
    Data,
    Mobile,
    UiUx,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub step: u8,
    pub title: String,
    pub description: String,
    pub current: bool,
    /// Set on the next step when the target role is not on this track's path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStage {
    pub period: String,
    pub title: String,
    pub description: String,
    /// Stage skills the profile does not have yet
    pub skills: Vec<String>,
    pub existing_skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryPoint {
    pub years: u32,
    pub salary: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRoadmap {
    pub track: RoleTrack,
    pub target_role: String,
    pub career_path: Vec<RoadmapStep>,
    pub timeline: Vec<RoadmapStage>,
    pub salary_curve: Vec<SalaryPoint>,
    pub current_experience: f64,
    /// Stated salary, or an estimate read off the track's curve
    pub current_salary: u32,
    /// Multiplier applied to future points for the target role, 1.0 when none applies
    pub role_modifier: f64,
}

struct TrackData {
    path: [(&'static str, &'static str); 4],
    timeline: [Stage; 3],
    salaries: [(u32, u32); 7],
}

struct Stage {
    period: &'static str,
    title: &'static str,
    description: &'static str,
    skills: &'static [&'static str],
}

const PERIODS: [&str; 3] = ["First 3 months", "Months 4-6", "Months 7-12"];

/// Yearly raise used when extrapolating past either end of a curve
const YEARLY_INCREASE: f64 = 10_000.0;

/// Checked in order; the first keyword contained in the target role wins
const ROLE_MODIFIERS: [(&str, f64); 11] = [
    ("frontend", 1.0),
    ("backend", 1.05),
    ("fullstack", 1.1),
    ("devops", 1.15),
    ("data", 1.2),
    ("machine learning", 1.25),
    ("ai", 1.3),
    ("manager", 1.2),
    ("director", 1.5),
    ("architect", 1.3),
    ("lead", 1.15),
];

impl RoleTrack {
    pub fn for_role(target_role: &str) -> Self {
        let role = target_role.to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| role.contains(k));

        if has(&["full stack", "full-stack", "fullstack"]) {
            RoleTrack::FullStack
        } else if has(&["frontend", "front-end", "front end"]) {
            RoleTrack::Frontend
        } else if has(&["backend", "back-end", "back end"]) {
            RoleTrack::Backend
        } else if has(&["devops", "site reliability", "sre", "cloud", "infrastructure"]) {
            RoleTrack::DevOps
        } else if has(&["data", "machine learning", "ml engineer"]) {
            RoleTrack::Data
        } else if has(&["mobile", "ios", "android"]) {
            RoleTrack::Mobile
        } else if has(&["ui/ux", "ux", "designer"]) {
            RoleTrack::UiUx
        } else {
            RoleTrack::Default
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RoleTrack::Default => "General",
            RoleTrack::Frontend => "Frontend",
            RoleTrack::Backend => "Backend",
            RoleTrack::FullStack => "Full Stack",
            RoleTrack::DevOps => "DevOps",
            RoleTrack::Data => "Data Science",
            RoleTrack::Mobile => "Mobile",
            RoleTrack::UiUx => "UI/UX",
        }
    }

    /// The track's standard salary curve
    pub fn salary_curve(self) -> Vec<SalaryPoint> {
        self.data()
            .salaries
            .iter()
            .map(|&(years, salary)| SalaryPoint { years, salary })
            .collect()
    }

    fn data(self) -> TrackData {
        match self {
            RoleTrack::Default => TrackData {
                path: [
                    ("Junior Developer", "Build fundamental skills and gain experience in real-world projects"),
                    ("Mid-Level Developer", "Take on more responsibility and deepen technical knowledge"),
                    ("Senior Developer", "Lead projects and mentor junior team members"),
                    ("Technical Lead / Architect", "Design systems and make high-level technical decisions"),
                ],
                timeline: [
                    stage(0, "Build Fundamentals", "Master core skills and best practices",
                        &["Problem Solving", "Version Control", "Testing", "Documentation"]),
                    stage(1, "Expand Technical Knowledge", "Learn more advanced concepts and tools",
                        &["Design Patterns", "Advanced Tools", "CI/CD", "Code Review"]),
                    stage(2, "Specialize and Apply", "Deepen knowledge in specific areas",
                        &["System Design", "Performance Optimization", "Mentoring", "Technical Leadership"]),
                ],
                salaries: [(0, 60_000), (1, 70_000), (2, 80_000), (3, 90_000), (5, 110_000), (7, 130_000), (10, 160_000)],
            },
            RoleTrack::Frontend => TrackData {
                path: [
                    ("Junior Frontend Developer", "Build UI components and learn core frontend technologies"),
                    ("Mid-Level Frontend Developer", "Create complex UIs and implement advanced frontend patterns"),
                    ("Senior Frontend Developer", "Lead frontend architecture and optimize performance"),
                    ("Frontend Architect", "Design scalable frontend systems and establish best practices"),
                ],
                timeline: [
                    stage(0, "Master Core Frontend Technologies",
                        "Deepen knowledge of HTML, CSS, JavaScript and frameworks",
                        &["HTML5", "CSS3", "JavaScript", "React Basics", "Responsive Design"]),
                    stage(1, "Advanced Frontend Concepts", "Learn state management, testing, and optimization",
                        &["TypeScript", "Redux/Context API", "Frontend Testing", "Web Performance"]),
                    stage(2, "Frontend Architecture",
                        "Build scalable frontend systems and explore advanced patterns",
                        &["Design Systems", "Micro-frontends", "SSR/SSG", "Web Accessibility", "Frontend Security"]),
                ],
                salaries: [(0, 65_000), (1, 75_000), (2, 85_000), (3, 95_000), (5, 115_000), (7, 135_000), (10, 165_000)],
            },
            RoleTrack::Backend => TrackData {
                path: [
                    ("Junior Backend Developer", "Build APIs and services, learn database fundamentals"),
                    ("Mid-Level Backend Developer", "Design complex backend systems and handle scale"),
                    ("Senior Backend Developer", "Architect high-performance distributed systems"),
                    ("Backend Architect", "Lead technical vision and design enterprise-scale systems"),
                ],
                timeline: [
                    stage(0, "Backend Fundamentals", "Master core backend technologies and concepts",
                        &["API Design", "Database Design", "Authentication", "Server Management"]),
                    stage(1, "Advanced Backend Development", "Learn about scaling, performance, and reliability",
                        &["Caching Strategies", "Message Queues", "Microservices", "Performance Testing"]),
                    stage(2, "Backend Architecture", "Design complex distributed systems",
                        &["Distributed Systems", "High Availability", "Database Optimization", "System Design Patterns"]),
                ],
                salaries: [(0, 70_000), (1, 80_000), (2, 90_000), (3, 105_000), (5, 125_000), (7, 145_000), (10, 175_000)],
            },
            RoleTrack::FullStack => TrackData {
                path: [
                    ("Junior Full Stack Developer", "Build end-to-end features with guidance"),
                    ("Mid-Level Full Stack Developer", "Implement complex features across the stack"),
                    ("Senior Full Stack Developer", "Design and lead full product implementations"),
                    ("Full Stack Architect", "Architect scalable systems and guide technical strategy"),
                ],
                timeline: [
                    stage(0, "Full Stack Foundations", "Strengthen skills across the entire technology stack",
                        &["Frontend Frameworks", "Backend APIs", "Database Design", "Authentication"]),
                    stage(1, "End-to-End Implementation", "Build complete features independently",
                        &["State Management", "Advanced Database", "API Design", "UI/UX Implementation"]),
                    stage(2, "Full Stack Architecture", "Design scalable end-to-end solutions",
                        &["System Design", "Performance Optimization", "Security Best Practices", "DevOps Integration"]),
                ],
                salaries: [(0, 75_000), (1, 85_000), (2, 95_000), (3, 110_000), (5, 130_000), (7, 150_000), (10, 180_000)],
            },
            RoleTrack::DevOps => TrackData {
                path: [
                    ("Junior DevOps Engineer", "Learn CI/CD and infrastructure automation"),
                    ("DevOps Engineer", "Implement robust pipelines and infrastructure as code"),
                    ("Senior DevOps Engineer", "Design scalable infrastructure and optimize operations"),
                    ("DevOps Architect", "Define cloud strategy and lead organizational transformation"),
                ],
                timeline: [
                    stage(0, "DevOps Fundamentals", "Master core DevOps tools and practices",
                        &["CI/CD Pipelines", "Infrastructure as Code", "Containerization", "Cloud Platforms"]),
                    stage(1, "Advanced DevOps", "Implement complex automation and monitoring",
                        &["Kubernetes", "Cloud Architecture", "Observability", "Security Automation"]),
                    stage(2, "DevOps Leadership", "Optimize infrastructure and guide best practices",
                        &["Multi-cloud Strategy", "Cost Optimization", "Disaster Recovery", "Site Reliability Engineering"]),
                ],
                salaries: [(0, 75_000), (1, 85_000), (2, 100_000), (3, 115_000), (5, 135_000), (7, 155_000), (10, 185_000)],
            },
            RoleTrack::Data => TrackData {
                path: [
                    ("Junior Data Scientist", "Apply statistical methods and build basic models"),
                    ("Data Scientist", "Develop sophisticated models and extract actionable insights"),
                    ("Senior Data Scientist", "Lead data initiatives and design complex models"),
                    ("Principal Data Scientist / AI Architect", "Define AI strategy and pioneer innovative solutions"),
                ],
                timeline: [
                    stage(0, "Data Science Foundations", "Strengthen core statistical and programming skills",
                        &["Python for Data Science", "Statistical Analysis", "Data Visualization", "Data Cleaning"]),
                    stage(1, "Advanced ML Techniques", "Master machine learning algorithms and model building",
                        &["Machine Learning", "Deep Learning", "Feature Engineering", "Model Evaluation"]),
                    stage(2, "End-to-End Data Science", "Build production-ready ML systems",
                        &["MLOps", "Data Engineering", "Experiment Tracking", "Model Deployment"]),
                ],
                salaries: [(0, 85_000), (1, 95_000), (2, 110_000), (3, 125_000), (5, 145_000), (7, 165_000), (10, 195_000)],
            },
            RoleTrack::Mobile => TrackData {
                path: [
                    ("Junior Mobile Developer", "Build UI components and implement basic features"),
                    ("Mobile Developer", "Create complete apps and optimize mobile performance"),
                    ("Senior Mobile Developer", "Architect complex mobile apps and lead development"),
                    ("Mobile Architect", "Define mobile strategy and platform-wide standards"),
                ],
                timeline: [
                    stage(0, "Mobile Fundamentals", "Master platform-specific and cross-platform development",
                        &["iOS or Android Fundamentals", "UI Development", "Mobile Architecture", "API Integration"]),
                    stage(1, "Advanced Mobile Development", "Implement complex features and optimize performance",
                        &["State Management", "Offline Support", "Push Notifications", "Performance Optimization"]),
                    stage(2, "Mobile Architecture", "Design scalable mobile applications",
                        &["Cross-platform Strategy", "CI/CD for Mobile", "App Store Optimization", "Enterprise Mobile Architecture"]),
                ],
                salaries: [(0, 70_000), (1, 80_000), (2, 95_000), (3, 110_000), (5, 130_000), (7, 150_000), (10, 180_000)],
            },
            RoleTrack::UiUx => TrackData {
                path: [
                    ("Junior UI/UX Designer", "Create UI components and learn design principles"),
                    ("UI/UX Designer", "Design complete experiences and conduct user research"),
                    ("Senior UI/UX Designer", "Lead design systems and complex product experiences"),
                    ("UX Director / Design Lead", "Define design strategy and direct user experience vision"),
                ],
                timeline: [
                    stage(0, "Design Fundamentals", "Strengthen core design skills and tools",
                        &["UI Principles", "Wireframing", "Prototyping", "Design Tools (Figma/Sketch)"]),
                    stage(1, "UX Research & Testing", "Incorporate user-centered design methodologies",
                        &["User Research", "Usability Testing", "Information Architecture", "Interaction Design"]),
                    stage(2, "Advanced Design Systems", "Create scalable design systems and guide implementation",
                        &["Design Systems", "Accessibility", "Design Leadership", "Design Ops"]),
                ],
                salaries: [(0, 65_000), (1, 75_000), (2, 90_000), (3, 105_000), (5, 125_000), (7, 145_000), (10, 170_000)],
            },
        }
    }
}

const fn stage(
    period: usize,
    title: &'static str,
    description: &'static str,
    skills: &'static [&'static str],
) -> Stage {
    Stage {
        period: PERIODS[period],
        title,
        description,
        skills,
    }
}

impl CareerRoadmap {
    pub fn current_step(&self) -> Option<&RoadmapStep> {
        self.career_path.iter().find(|step| step.current)
    }

    pub fn next_step(&self) -> Option<&RoadmapStep> {
        let current = self.career_path.iter().position(|step| step.current)?;
        self.career_path.get(current + 1)
    }
}

/// Roadmap for the profile's target role
pub fn career_roadmap(profile: &UserProfile, skills: &[Skill], preferences: &Preferences) -> CareerRoadmap {
    career_roadmap_for(&preferences.target_role, profile, skills)
}

/// Roadmap for an explicit role, ignoring the stored target role
pub fn career_roadmap_for(target_role: &str, profile: &UserProfile, skills: &[Skill]) -> CareerRoadmap {
    let track = RoleTrack::for_role(target_role);
    let data = track.data();
    let experience = if profile.experience.is_finite() { profile.experience.max(0.0) } else { 0.0 };

    let standard = track.salary_curve();
    let (salary_curve, role_modifier) =
        personalized_salary_curve(&standard, experience, profile.current_salary, target_role);
    let current_salary = if profile.current_salary > 0 {
        profile.current_salary
    } else {
        estimate_salary(&standard, experience)
    };

    CareerRoadmap {
        track,
        target_role: target_role.trim().to_string(),
        career_path: career_path(&data, experience, target_role),
        timeline: skill_timeline(&data, skills),
        salary_curve,
        current_experience: experience,
        current_salary,
        role_modifier,
    }
}

fn career_path(data: &TrackData, experience: f64, target_role: &str) -> Vec<RoadmapStep> {
    let current = match experience {
        e if e < 3.0 => 0,
        e if e < 5.0 => 1,
        e if e < 8.0 => 2,
        _ => 3,
    };

    let mut path: Vec<RoadmapStep> = data
        .path
        .iter()
        .enumerate()
        .map(|(index, (title, description))| RoadmapStep {
            step: index as u8 + 1,
            title: title.to_string(),
            description: description.to_string(),
            current: index == current,
            alternative_title: None,
        })
        .collect();

    let role = target_role.trim();
    if !role.is_empty() {
        let role_lower = role.to_lowercase();
        let on_path = path.iter().any(|step| step.title.to_lowercase().contains(&role_lower));
        if !on_path {
            if let Some(next) = path.get_mut(current + 1) {
                next.alternative_title = Some(role.to_string());
            }
        }
    }
    path
}

fn skill_timeline(data: &TrackData, skills: &[Skill]) -> Vec<RoadmapStage> {
    let owned: HashSet<String> = skills.iter().map(Skill::normalized_name).collect();

    data.timeline
        .iter()
        .map(|stage| {
            let (existing, new): (Vec<String>, Vec<String>) = stage
                .skills
                .iter()
                .map(|s| s.to_string())
                .partition(|s| owned.contains(&normalize_skill_name(s)));

            let mut description = stage.description.to_string();
            if !existing.is_empty() {
                description.push_str(&format!(" You already have experience with {}.", join_with_and(&existing)));
            }

            RoadmapStage {
                period: stage.period.to_string(),
                title: stage.title.to_string(),
                description,
                skills: new,
                existing_skills: existing,
            }
        })
        .collect()
}

/// "A", "A and B", "A, B and C"
fn join_with_and(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}

/// Shift the curve toward a stated salary, then apply the target-role modifier
/// to points ahead of the user's experience.
fn personalized_salary_curve(
    standard: &[SalaryPoint],
    experience: f64,
    current_salary: u32,
    target_role: &str,
) -> (Vec<SalaryPoint>, f64) {
    let mut curve = standard.to_vec();

    if current_salary > 0 {
        if let Some(anchor) = standard
            .iter()
            .find(|p| (p.years as f64 - experience).abs() < 1.0)
        {
            let diff = (current_salary as f64 - anchor.salary as f64) / anchor.salary as f64;
            for point in curve.iter_mut().filter(|p| p.years as f64 >= experience) {
                // Adjustment fades out over ten years
                let factor = 1.0 - (point.years as f64 - experience).max(0.0) / 10.0;
                point.salary = scale(point.salary, 1.0 + diff * factor);
            }
        }
    }

    let role = target_role.to_lowercase();
    let modifier = if role.trim().is_empty() {
        1.0
    } else {
        ROLE_MODIFIERS
            .iter()
            .find(|(key, _)| role.contains(key))
            .map(|&(_, modifier)| modifier)
            .unwrap_or(1.0)
    };
    if modifier != 1.0 {
        for point in curve.iter_mut().filter(|p| p.years as f64 > experience) {
            point.salary = scale(point.salary, modifier);
        }
    }
    (curve, modifier)
}

fn scale(salary: u32, factor: f64) -> u32 {
    (salary as f64 * factor).round().max(0.0) as u32
}

/// Salary read off a curve: interpolated between points, extrapolated at
/// [`YEARLY_INCREASE`] per year beyond either end.
pub fn estimate_salary(curve: &[SalaryPoint], experience: f64) -> u32 {
    let lower = curve
        .iter()
        .filter(|p| p.years as f64 <= experience)
        .max_by_key(|p| p.years);
    let upper = curve
        .iter()
        .filter(|p| p.years as f64 >= experience)
        .min_by_key(|p| p.years);

    let estimate = match (lower, upper) {
        (Some(low), _) if low.years as f64 == experience => low.salary as f64,
        (Some(low), Some(high)) => {
            let ratio = (experience - low.years as f64) / (high.years - low.years) as f64;
            low.salary as f64 + (high.salary as f64 - low.salary as f64) * ratio
        }
        (Some(low), None) => low.salary as f64 + (experience - low.years as f64) * YEARLY_INCREASE,
        (None, Some(high)) => high.salary as f64 - (high.years as f64 - experience) * YEARLY_INCREASE,
        (None, None) => 70_000.0 + experience * YEARLY_INCREASE,
    };
    estimate.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::SkillLevel;

    fn profile(years: f64, salary: u32) -> UserProfile {
        UserProfile {
            experience: years,
            current_salary: salary,
            ..UserProfile::default()
        }
    }

    #[test]
    fn target_role_selects_track() {
        assert_eq!(RoleTrack::for_role("Senior Frontend Engineer"), RoleTrack::Frontend);
        assert_eq!(RoleTrack::for_role("Full Stack Developer"), RoleTrack::FullStack);
        assert_eq!(RoleTrack::for_role("Data Scientist"), RoleTrack::Data);
        assert_eq!(RoleTrack::for_role("iOS Developer"), RoleTrack::Mobile);
        assert_eq!(RoleTrack::for_role("Product Designer"), RoleTrack::UiUx);
        assert_eq!(RoleTrack::for_role("Software Developer"), RoleTrack::Default);
        assert_eq!(RoleTrack::for_role(""), RoleTrack::Default);
    }

    #[test]
    fn current_step_follows_experience() {
        let roadmap = career_roadmap_for("Backend Developer", &profile(4.0, 0), &[]);
        assert_eq!(roadmap.track, RoleTrack::Backend);
        assert_eq!(roadmap.current_step().map(|s| s.title.as_str()), Some("Mid-Level Backend Developer"));
        assert_eq!(roadmap.next_step().map(|s| s.step), Some(3));
        // "Backend Developer" appears in the path, so no alternative is offered
        assert!(roadmap.career_path.iter().all(|s| s.alternative_title.is_none()));

        let veteran = career_roadmap_for("Backend Developer", &profile(12.0, 0), &[]);
        assert_eq!(veteran.current_step().map(|s| s.step), Some(4));
        assert!(veteran.next_step().is_none());
    }

    #[test]
    fn off_path_role_becomes_alternative_next_step() {
        let roadmap = career_roadmap_for("Engineering Manager", &profile(1.0, 0), &[]);
        assert_eq!(roadmap.track, RoleTrack::Default);
        assert_eq!(roadmap.career_path[1].alternative_title.as_deref(), Some("Engineering Manager"));
    }

    #[test]
    fn timeline_separates_owned_skills() {
        let skills = vec![
            Skill::new("javascript", SkillLevel::Advanced, 3.0),
            Skill::new("HTML5", SkillLevel::Expert, 5.0),
        ];
        let roadmap = career_roadmap_for("Frontend Developer", &profile(1.0, 0), &skills);
        let first = &roadmap.timeline[0];

        assert_eq!(first.existing_skills, vec!["HTML5", "JavaScript"]);
        assert_eq!(first.skills, vec!["CSS3", "React Basics", "Responsive Design"]);
        assert!(first.description.ends_with("You already have experience with HTML5 and JavaScript."));
        assert!(roadmap.timeline[1].existing_skills.is_empty());
    }

    #[test]
    fn salary_estimate_interpolates_and_extrapolates() {
        let curve = RoleTrack::Default.salary_curve();
        assert_eq!(estimate_salary(&curve, 3.0), 90_000);
        assert_eq!(estimate_salary(&curve, 4.0), 100_000);
        assert_eq!(estimate_salary(&curve, 12.0), 180_000);

        let roadmap = career_roadmap_for("Software Developer", &profile(4.0, 0), &[]);
        assert_eq!(roadmap.current_salary, 100_000);
        assert_eq!(roadmap.role_modifier, 1.0);
        assert_eq!(roadmap.salary_curve, curve);
    }

    #[test]
    fn stated_salary_shifts_future_points() {
        // 10% above the 2-year point; the shift fades by a tenth per year
        let roadmap = career_roadmap_for("Software Developer", &profile(2.0, 88_000), &[]);
        let salary_at = |years: u32| roadmap.salary_curve.iter().find(|p| p.years == years).map(|p| p.salary);

        assert_eq!(roadmap.current_salary, 88_000);
        assert_eq!(salary_at(1), Some(70_000));
        assert_eq!(salary_at(2), Some(88_000));
        assert_eq!(salary_at(3), Some(98_100));
        assert_eq!(salary_at(10), Some(163_200));
    }

    #[test]
    fn role_modifier_applies_ahead_of_experience() {
        let roadmap = career_roadmap_for("DevOps Engineer", &profile(3.0, 0), &[]);
        assert_eq!(roadmap.role_modifier, 1.15);
        let salaries: Vec<u32> = roadmap.salary_curve.iter().map(|p| p.salary).collect();
        assert_eq!(salaries, vec![75_000, 85_000, 100_000, 115_000, 155_250, 178_250, 212_750]);
    }
}
