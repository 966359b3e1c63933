//! CLI interface for the career matcher

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "career-match")]
#[command(about = "Match your skills and preferences against job listings")]
#[command(long_about = "Keep a local career profile, rank job listings by weighted fit, and review profile analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank job listings against the stored profile
    Match {
        /// Listings file (JSON or CSV); sample listings when omitted
        #[arg(short, long)]
        listings: Option<PathBuf>,

        /// Keep only titles containing this role
        #[arg(long)]
        role: Option<String>,

        /// Location family: remote, hybrid, on-site
        #[arg(long)]
        location: Option<String>,

        /// Experience bucket: 0-2, 2-5, 5-8, 8+
        #[arg(long)]
        experience: Option<String>,

        /// Salary bucket: 0-50000, 50000-80000, 80000-120000, 120000+
        #[arg(long)]
        salary: Option<String>,

        /// Free-text search over title, company and skills
        #[arg(short, long)]
        search: Option<String>,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Results per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Output detailed score breakdowns
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Placeholder scores instead of real matching
        #[arg(long)]
        demo: bool,

        /// Seed for demo scores
        #[arg(long, requires = "demo")]
        seed: Option<u64>,
    },

    /// Show profile analytics and the best matches
    Dashboard {
        /// Listings file (JSON or CSV); sample listings when omitted
        #[arg(short, long)]
        listings: Option<PathBuf>,

        /// Number of top matches to include
        #[arg(short, long, default_value_t = 3)]
        top: usize,

        /// Include chart series
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Show the career roadmap for the target role
    Roadmap {
        /// Role to plan for instead of the stored target role
        #[arg(short, long)]
        role: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Manage the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage skills
    Skills {
        #[command(subcommand)]
        action: SkillAction,
    },

    /// Manage work history
    Experience {
        #[command(subcommand)]
        action: ExperienceAction,
    },

    /// Manage job preferences
    Preferences {
        #[command(subcommand)]
        action: PreferencesAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create the default profile if none exists
    Init,

    /// Show the full profile
    Show {
        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Update profile fields
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// None, High School, Associate's, Bachelor's, Master's, PhD
        #[arg(long)]
        education: Option<String>,
        /// Years of experience (overrides the value derived from work history)
        #[arg(long)]
        years: Option<f64>,
        #[arg(long)]
        salary: Option<u32>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        linkedin: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SkillAction {
    /// List skills
    List,

    /// Add a skill
    Add {
        name: String,
        /// Beginner, Intermediate, Advanced, Expert
        #[arg(short, long, default_value = "Intermediate")]
        level: String,
        /// Years of experience with the skill
        #[arg(short, long, default_value_t = 0.0)]
        years: f64,
    },

    /// Edit a skill by name or id
    Edit {
        skill: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        level: Option<String>,
        #[arg(short, long)]
        years: Option<f64>,
    },

    /// Remove a skill by name or id
    Remove { skill: String },

    /// Detect skills in a resume (.txt or .md) and add the new ones
    Import {
        resume: PathBuf,
        /// Level assigned to imported skills
        #[arg(short, long, default_value = "Intermediate")]
        level: String,
        /// Only list the detected skills
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
pub enum ExperienceAction {
    /// List work history
    List,

    /// Add a work history entry
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: String,
        /// Start date, YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// End date, YYYY-MM-DD; omit for a current role
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Remove a work history entry by id
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum PreferencesAction {
    /// Show preferences
    Show,

    /// Update preferences
    Set {
        #[arg(long)]
        role: Option<String>,
        /// Remote, Hybrid, On-site or a city
        #[arg(long)]
        location: Option<String>,
        /// Full-time, Part-time, Contract, Freelance
        #[arg(long)]
        work_type: Option<String>,
        #[arg(long)]
        salary: Option<u32>,
        #[arg(long)]
        relocate: Option<bool>,
        #[arg(long)]
        certifications: Option<bool>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_match_filters() {
        let cli = Cli::try_parse_from([
            "career-match", "match", "--location", "remote", "--salary", "120000+", "--page", "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Match { location, salary, page, demo, .. } => {
                assert_eq!(location.as_deref(), Some("remote"));
                assert_eq!(salary.as_deref(), Some("120000+"));
                assert_eq!(page, 2);
                assert!(!demo);
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn seed_requires_demo() {
        assert!(Cli::try_parse_from(["career-match", "match", "--seed", "4"]).is_err());
        assert!(Cli::try_parse_from(["career-match", "match", "--demo", "--seed", "4"]).is_ok());
    }

    #[test]
    fn parses_roadmap_role_override() {
        let cli = Cli::try_parse_from(["career-match", "roadmap", "--role", "DevOps Engineer"]).unwrap();
        match cli.command {
            Commands::Roadmap { role, output, .. } => {
                assert_eq!(role.as_deref(), Some("DevOps Engineer"));
                assert!(output.is_none());
            }
            _ => panic!("expected roadmap command"),
        }
    }

    #[test]
    fn parses_skill_import() {
        let cli = Cli::try_parse_from(["career-match", "skills", "import", "cv.md", "--dry-run"]).unwrap();
        match cli.command {
            Commands::Skills { action: SkillAction::Import { resume, level, dry_run } } => {
                assert_eq!(resume, PathBuf::from("cv.md"));
                assert_eq!(level, "Intermediate");
                assert!(dry_run);
            }
            _ => panic!("expected skills import command"),
        }
    }

    #[test]
    fn output_format_parsing() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn extension_validation() {
        assert!(validate_file_extension(Path::new("jobs.CSV"), &["json", "csv"]).is_ok());
        assert!(validate_file_extension(Path::new("jobs.txt"), &["json", "csv"]).is_err());
        assert!(validate_file_extension(Path::new("jobs"), &["json", "csv"]).is_err());
    }
}
