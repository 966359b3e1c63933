//! career-match: rank job listings against a local career profile

use career_match::analytics::{career_roadmap_for, dashboard_analytics, MarketSkillDemand};
use career_match::cli::{
    self, Cli, Commands, ConfigAction, ExperienceAction, PreferencesAction, ProfileAction, SkillAction,
};
use career_match::config::{Config, OutputFormat};
use career_match::error::{CareerMatchError, Result};
use career_match::input::{self, sample, JobListing};
use career_match::matching::filter::{parse_location_family, paginate, ExperienceBucket, JobFilter, SalaryBand};
use career_match::matching::{DemoScorer, MatchEngine, MatchResult};
use career_match::output::{save_report_to_file, DashboardReport, MatchReport, ReportGenerator, ReportMetadata};
use career_match::profile::{Education, ProfileRepository, ProfileSnapshot, Skill, SkillLevel, SkillUpdate, WorkExperience};
use chrono::NaiveDate;
use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use uuid::Uuid;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Match {
            listings,
            role,
            location,
            experience,
            salary,
            search,
            page,
            page_size,
            detailed,
            output,
            save,
            demo,
            seed,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let filter = JobFilter {
                role,
                location: location
                    .as_deref()
                    .map(parse_location_family)
                    .transpose()
                    .map_err(CareerMatchError::InvalidInput)?,
                experience: experience
                    .as_deref()
                    .map(str::parse::<ExperienceBucket>)
                    .transpose()
                    .map_err(CareerMatchError::InvalidInput)?,
                salary: salary
                    .as_deref()
                    .map(str::parse::<SalaryBand>)
                    .transpose()
                    .map_err(CareerMatchError::InvalidInput)?,
                search,
            };

            let repository = open_repository(&config).await?;
            let snapshot = repository.snapshot().await?;
            let listing_file = read_listings(listings.as_deref()).await?;

            let engine = MatchEngine::from_config(&config.matching)?;
            let demo_mode = demo || config.matching.demo_mode;
            let results = if demo_mode {
                info!("Demo mode: assigning placeholder scores");
                DemoScorer::new(seed.or(config.matching.demo_seed)).score(&listing_file.listings)
            } else {
                ranked_matches(&engine, &repository, &snapshot, &listing_file.listings).await?
            };

            let filtered = filter.apply(results);
            let page = paginate(&filtered, page, page_size.unwrap_or(config.output.page_size));
            info!(
                "{} of {} listings pass the filters",
                filtered.len(),
                listing_file.listings.len()
            );

            let report = MatchReport::new(
                &engine,
                &snapshot,
                filter.describe(),
                page,
                ReportMetadata::new(listing_file.source, demo_mode),
            );

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                detailed || config.output.detailed,
                true,
                true,
            );
            let content = generator.generate_matches(&report, format)?;
            emit(&content, save.as_deref())?;
        }

        Commands::Dashboard {
            listings,
            top,
            detailed,
            output,
            save,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let repository = open_repository(&config).await?;
            let snapshot = repository.snapshot().await?;
            let listing_file = read_listings(listings.as_deref()).await?;

            let engine = MatchEngine::from_config(&config.matching)?;
            let top_matches: Vec<MatchResult> = ranked_matches(&engine, &repository, &snapshot, &listing_file.listings)
                .await?
                .into_iter()
                .take(top)
                .collect();

            let market: Vec<MarketSkillDemand> = sample::market_demand();
            let analytics = dashboard_analytics(&snapshot, &market, &config.analytics);
            let report = DashboardReport::new(
                &snapshot,
                analytics,
                top_matches,
                ReportMetadata::new(listing_file.source, false),
            );

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                detailed || config.output.detailed,
                true,
                true,
            );
            let content = generator.generate_dashboard(&report, format)?;
            emit(&content, save.as_deref())?;
        }

        Commands::Roadmap { role, output, save } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let repository = open_repository(&config).await?;
            let snapshot = repository.snapshot().await?;

            let target_role = role.unwrap_or_else(|| snapshot.preferences.target_role.clone());
            let roadmap = career_roadmap_for(&target_role, &snapshot.profile, &snapshot.skills);
            info!("Roadmap track for '{}': {}", target_role, roadmap.track.label());

            let content = ReportGenerator::from_config(&config.output).generate_roadmap(&roadmap, format)?;
            emit(&content, save.as_deref())?;
        }

        Commands::Profile { action } => {
            let repository = open_repository(&config).await?;
            match action {
                ProfileAction::Init => {
                    // open_repository already created it when missing
                    println!("✅ Profile ready in {}", config.data_dir().display());
                }
                ProfileAction::Show { output } => {
                    let format = resolve_format(output.as_deref(), &config)?;
                    let snapshot = repository.snapshot().await?;
                    let generator = ReportGenerator::from_config(&config.output);
                    println!("{}", generator.generate_profile(&snapshot, format)?);
                }
                ProfileAction::Set {
                    name,
                    email,
                    location,
                    education,
                    years,
                    salary,
                    title,
                    linkedin,
                } => {
                    let mut profile = repository.profile().await?;
                    if let Some(name) = name {
                        profile.name = name;
                    }
                    if let Some(email) = email {
                        profile.email = email;
                    }
                    if let Some(location) = location {
                        profile.location = location;
                    }
                    if let Some(education) = education {
                        profile.education = Education::parse(&education).ok_or_else(|| {
                            CareerMatchError::InvalidInput(format!("Unknown education level: {}", education))
                        })?;
                    }
                    if let Some(years) = years {
                        profile.experience = years;
                    }
                    if let Some(salary) = salary {
                        profile.current_salary = salary;
                    }
                    if let Some(title) = title {
                        profile.job_title = title;
                    }
                    if let Some(linkedin) = linkedin {
                        profile.linkedin = Some(linkedin).filter(|url| !url.trim().is_empty());
                    }
                    repository.save_profile(&profile).await?;
                    println!("✅ Profile updated");
                }
            }
        }

        Commands::Skills { action } => {
            let repository = open_repository(&config).await?;
            match action {
                SkillAction::List => {
                    let skills = repository.skills().await?;
                    if skills.is_empty() {
                        println!("No skills yet. Add one with: career-match skills add <name>");
                    }
                    for skill in skills {
                        println!(
                            "  • {} ({}, {:.1} yrs) [{}]",
                            skill.name, skill.level, skill.experience, skill.id
                        );
                    }
                }
                SkillAction::Add { name, level, years } => {
                    let skill = repository.add_skill(&name, parse_level(&level)?, years).await?;
                    println!("✅ Added {} ({})", skill.name, skill.level);
                }
                SkillAction::Edit {
                    skill,
                    name,
                    level,
                    years,
                } => {
                    let existing = resolve_skill(&repository, &skill).await?;
                    let update = SkillUpdate {
                        name,
                        level: level.as_deref().map(parse_level).transpose()?,
                        experience: years,
                    };
                    let updated = repository.edit_skill(existing.id, update).await?;
                    println!("✅ Updated {} ({}, {:.1} yrs)", updated.name, updated.level, updated.experience);
                }
                SkillAction::Remove { skill } => {
                    let existing = resolve_skill(&repository, &skill).await?;
                    let removed = repository.remove_skill(existing.id).await?;
                    println!("🗑️  Removed {}", removed.name);
                }
                SkillAction::Import { resume, level, dry_run } => {
                    cli::validate_file_extension(&resume, &["txt", "md", "markdown"])
                        .map_err(|e| CareerMatchError::InvalidInput(format!("Resume file: {}", e)))?;
                    let level = parse_level(&level)?;
                    let text = input::extract_resume_text(&resume).await?;
                    let detected = input::extract_skills(&text);

                    if detected.is_empty() {
                        println!("No known skills found in {}", resume.display());
                    } else if dry_run {
                        println!("Detected skills: {}", detected.join(", "));
                    } else {
                        let import = repository.import_skills(&detected, level).await?;
                        for skill in &import.added {
                            println!("✅ Added {} ({})", skill.name, skill.level);
                        }
                        if !import.skipped.is_empty() {
                            println!("Already on profile: {}", import.skipped.join(", "));
                        }
                    }
                }
            }
        }

        Commands::Experience { action } => {
            let repository = open_repository(&config).await?;
            let today = chrono::Local::now().date_naive();
            match action {
                ExperienceAction::List => {
                    let entries = repository.experience().await?;
                    if entries.is_empty() {
                        println!("No work history yet");
                    }
                    for entry in entries {
                        println!(
                            "  • {} @ {} ({:.1} yrs) [{}]",
                            entry.title,
                            entry.company,
                            entry.years(today),
                            entry.id
                        );
                    }
                }
                ExperienceAction::Add {
                    title,
                    company,
                    start,
                    end,
                    description,
                } => {
                    let start = parse_date(&start)?;
                    let end = end.as_deref().map(parse_date).transpose()?;
                    let mut entry = WorkExperience::new(title, company, start, end);
                    entry.description = description.unwrap_or_default();
                    let years = repository.add_experience(entry, today).await?;
                    println!("✅ Added work history entry, total experience now {:.1} years", years);
                }
                ExperienceAction::Remove { id } => {
                    let years = repository.remove_experience(parse_id(&id)?, today).await?;
                    println!("🗑️  Removed entry, total experience now {:.1} years", years);
                }
            }
        }

        Commands::Preferences { action } => {
            let repository = open_repository(&config).await?;
            match action {
                PreferencesAction::Show => {
                    let prefs = repository.preferences().await?;
                    println!("Target role: {}", prefs.target_role);
                    println!("Location:    {}", prefs.location_preference.label());
                    println!("Work type:   {}", prefs.work_type.label());
                    println!("Salary:      {}", prefs.salary_expectation);
                    println!("Relocate:    {}", prefs.willing_to_relocate);
                    println!("Certified:   {}", prefs.certifications);
                }
                PreferencesAction::Set {
                    role,
                    location,
                    work_type,
                    salary,
                    relocate,
                    certifications,
                } => {
                    let mut prefs = repository.preferences().await?;
                    if let Some(role) = role {
                        prefs.target_role = role;
                    }
                    if let Some(location) = location {
                        prefs.location_preference = location.into();
                    }
                    if let Some(work_type) = work_type {
                        prefs.work_type = work_type.into();
                    }
                    if let Some(salary) = salary {
                        prefs.salary_expectation = salary;
                    }
                    if let Some(relocate) = relocate {
                        prefs.willing_to_relocate = relocate;
                    }
                    if let Some(certifications) = certifications {
                        prefs.certifications = certifications;
                    }
                    repository.save_preferences(&prefs).await?;
                    println!("✅ Preferences updated");
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("📋 Configuration ({})", config_path.display());
                println!("{}", toml::to_string_pretty(&config)?);
            }
            Some(ConfigAction::Reset) => {
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset to defaults");
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

struct ListingFile {
    listings: Vec<JobListing>,
    source: String,
}

async fn read_listings(path: Option<&Path>) -> Result<ListingFile> {
    if let Some(path) = path {
        cli::validate_file_extension(path, &["json", "csv"])
            .map_err(|e| CareerMatchError::InvalidInput(format!("Listings file: {}", e)))?;
    }
    let listings = input::load_listings(path).await?;
    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "sample data".to_string());
    Ok(ListingFile { listings, source })
}

/// Rank listings, reusing scores stored from earlier runs with the same profile and settings
async fn ranked_matches(
    engine: &MatchEngine,
    repository: &ProfileRepository,
    snapshot: &ProfileSnapshot,
    listings: &[JobListing],
) -> Result<Vec<MatchResult>> {
    let mut cache = repository.score_cache().await;
    let results = engine.compute_matches_cached(
        &mut cache,
        &snapshot.profile,
        &snapshot.skills,
        &snapshot.preferences,
        listings,
    );
    repository.save_score_cache(&cache).await?;
    Ok(results)
}

async fn open_repository(config: &Config) -> Result<ProfileRepository> {
    let repository = ProfileRepository::open(config.data_dir());
    if repository.initialize().await? {
        println!("👋 Created a new profile in {}", config.data_dir().display());
    }
    Ok(repository)
}

fn resolve_format(output: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match output {
        Some(format) => cli::parse_output_format(format).map_err(CareerMatchError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn emit(content: &str, save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            save_report_to_file(content, path)?;
            println!("💾 Saved report to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Accept either a skill id or a case-insensitive name
async fn resolve_skill(repository: &ProfileRepository, reference: &str) -> Result<Skill> {
    if let Ok(id) = Uuid::parse_str(reference.trim()) {
        if let Some(skill) = repository.skills().await?.into_iter().find(|s| s.id == id) {
            return Ok(skill);
        }
    }
    repository
        .find_skill(reference)
        .await?
        .ok_or_else(|| CareerMatchError::NotFound(format!("Skill '{}'", reference)))
}

fn parse_level(level: &str) -> Result<SkillLevel> {
    SkillLevel::parse(level).ok_or_else(|| {
        CareerMatchError::InvalidInput(format!(
            "Unknown skill level: {}. Supported: Beginner, Intermediate, Advanced, Expert",
            level
        ))
    })
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| CareerMatchError::InvalidInput(format!("Invalid date '{}': {}", value, e)))
}

fn parse_id(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|e| CareerMatchError::InvalidInput(format!("Invalid id '{}': {}", value, e)))
}
