//! Key-value persistence for profile data
//!
//! Each key is stored as a JSON document under the data directory. Reads of
//! a missing key resolve to the type's default value, matching the
//! "get(key) -> value | default" contract the matching layer relies on.

use crate::error::{CareerMatchError, Result};
use crate::matching::cache::ScoreCache;
use crate::profile::model::{
    derive_experience_years, normalize_skill_name, Preferences, Skill, SkillLevel, UserProfile,
    WorkExperience,
};
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

pub const USER_PROFILE_KEY: &str = "user_profile";
pub const USER_SKILLS_KEY: &str = "user_skills";
pub const USER_EXPERIENCE_KEY: &str = "user_experience";
pub const USER_PREFERENCES_KEY: &str = "user_preferences";
pub const SCORE_CACHE_KEY: &str = "score_cache";

pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(CareerMatchError::Storage(format!("Invalid storage key: '{}'", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    pub async fn get<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => {
                let value = serde_json::from_str(&content).map_err(|e| {
                    CareerMatchError::Storage(format!("Corrupt value for key '{}': {}", key, e))
                })?;
                Ok(value)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Key '{}' not found, using default", key);
                Ok(T::default())
            }
            Err(e) => Err(CareerMatchError::Io(e)),
        }
    }

    pub async fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.root).await?;

        // Write-then-rename so a crash never leaves a half-written document
        let tmp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &path).await?;
        debug!("Stored key '{}' at {}", key, path.display());
        Ok(())
    }

    pub async fn contains(&self, key: &str) -> Result<bool> {
        let path = self.key_path(key)?;
        Ok(fs::try_exists(&path).await?)
    }
}

/// Changes applied by [`ProfileRepository::edit_skill`]
#[derive(Debug, Clone, Default)]
pub struct SkillUpdate {
    pub name: Option<String>,
    pub level: Option<SkillLevel>,
    pub experience: Option<f64>,
}

/// Outcome of [`ProfileRepository::import_skills`]
#[derive(Debug, Clone, Default)]
pub struct SkillImport {
    pub added: Vec<Skill>,
    /// Names already on the profile
    pub skipped: Vec<String>,
}

/// Full snapshot of everything the matcher and analytics read
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileSnapshot {
    pub profile: UserProfile,
    pub skills: Vec<Skill>,
    pub preferences: Preferences,
    pub experience: Vec<WorkExperience>,
}

pub struct ProfileRepository {
    store: JsonFileStore,
}

impl ProfileRepository {
    pub fn new(store: JsonFileStore) -> Self {
        Self { store }
    }

    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileStore::new(data_dir))
    }

    /// Create the default profile and preferences on first run
    pub async fn initialize(&self) -> Result<bool> {
        if self.store.contains(USER_PROFILE_KEY).await? {
            return Ok(false);
        }
        info!("Creating default profile in {}", self.store.root().display());
        self.store.set(USER_PROFILE_KEY, &UserProfile::default()).await?;
        self.store.set(USER_PREFERENCES_KEY, &Preferences::default()).await?;
        self.store.set(USER_SKILLS_KEY, &Vec::<Skill>::new()).await?;
        self.store.set(USER_EXPERIENCE_KEY, &Vec::<WorkExperience>::new()).await?;
        Ok(true)
    }

    pub async fn snapshot(&self) -> Result<ProfileSnapshot> {
        self.snapshot_at(chrono::Local::now().date_naive()).await
    }

    /// Snapshot with experience years re-derived as of `today`, so a current
    /// role keeps accruing time. A profile without work history keeps its
    /// manually entered years.
    pub async fn snapshot_at(&self, today: NaiveDate) -> Result<ProfileSnapshot> {
        let mut profile = self.profile().await?;
        let experience = self.experience().await?;
        if !experience.is_empty() {
            profile.experience = derive_experience_years(&experience, today);
        }
        Ok(ProfileSnapshot {
            profile,
            skills: self.skills().await?,
            preferences: self.preferences().await?,
            experience,
        })
    }

    pub async fn profile(&self) -> Result<UserProfile> {
        self.store.get(USER_PROFILE_KEY).await
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        if !profile.experience.is_finite() || profile.experience < 0.0 {
            return Err(CareerMatchError::InvalidInput(format!(
                "Experience must be a non-negative number of years, got {}",
                profile.experience
            )));
        }
        self.store.set(USER_PROFILE_KEY, profile).await
    }

    pub async fn skills(&self) -> Result<Vec<Skill>> {
        self.store.get(USER_SKILLS_KEY).await
    }

    pub async fn add_skill(&self, name: &str, level: SkillLevel, experience: f64) -> Result<Skill> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CareerMatchError::InvalidInput("Skill name cannot be empty".to_string()));
        }
        validate_years(experience)?;

        let mut skills = self.skills().await?;
        let normalized = normalize_skill_name(name);
        if skills.iter().any(|s| s.normalized_name() == normalized) {
            return Err(CareerMatchError::DuplicateSkill(name.to_string()));
        }

        let skill = Skill::new(name, level, experience);
        skills.push(skill.clone());
        self.store.set(USER_SKILLS_KEY, &skills).await?;
        info!("Added skill '{}' ({})", skill.name, skill.level);
        Ok(skill)
    }

    /// Add each named skill at `level`, skipping names the profile already has
    pub async fn import_skills(&self, names: &[String], level: SkillLevel) -> Result<SkillImport> {
        let mut import = SkillImport::default();
        for name in names {
            match self.add_skill(name, level, 0.0).await {
                Ok(skill) => import.added.push(skill),
                Err(CareerMatchError::DuplicateSkill(name)) => {
                    debug!("Skipping existing skill '{}'", name);
                    import.skipped.push(name);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(import)
    }

    pub async fn edit_skill(&self, id: Uuid, update: SkillUpdate) -> Result<Skill> {
        let mut skills = self.skills().await?;

        if let Some(new_name) = &update.name {
            let normalized = normalize_skill_name(new_name);
            if normalized.is_empty() {
                return Err(CareerMatchError::InvalidInput("Skill name cannot be empty".to_string()));
            }
            if skills.iter().any(|s| s.id != id && s.normalized_name() == normalized) {
                return Err(CareerMatchError::DuplicateSkill(new_name.trim().to_string()));
            }
        }
        if let Some(years) = update.experience {
            validate_years(years)?;
        }

        let skill = skills
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CareerMatchError::NotFound(format!("Skill {}", id)))?;

        if let Some(name) = update.name {
            skill.name = name.trim().to_string();
        }
        if let Some(level) = update.level {
            skill.level = level;
        }
        if let Some(years) = update.experience {
            skill.experience = years;
        }
        let updated = skill.clone();

        self.store.set(USER_SKILLS_KEY, &skills).await?;
        Ok(updated)
    }

    pub async fn remove_skill(&self, id: Uuid) -> Result<Skill> {
        let mut skills = self.skills().await?;
        let position = skills
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CareerMatchError::NotFound(format!("Skill {}", id)))?;
        let removed = skills.remove(position);
        self.store.set(USER_SKILLS_KEY, &skills).await?;
        info!("Removed skill '{}'", removed.name);
        Ok(removed)
    }

    /// Find a skill by case-insensitive name
    pub async fn find_skill(&self, name: &str) -> Result<Option<Skill>> {
        let normalized = normalize_skill_name(name);
        Ok(self
            .skills()
            .await?
            .into_iter()
            .find(|s| s.normalized_name() == normalized))
    }

    pub async fn preferences(&self) -> Result<Preferences> {
        self.store.get(USER_PREFERENCES_KEY).await
    }

    pub async fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        self.store.set(USER_PREFERENCES_KEY, preferences).await
    }

    pub async fn experience(&self) -> Result<Vec<WorkExperience>> {
        self.store.get(USER_EXPERIENCE_KEY).await
    }

    pub async fn add_experience(&self, entry: WorkExperience, today: NaiveDate) -> Result<f64> {
        if let Some(end) = entry.end_date {
            if end < entry.start_date {
                return Err(CareerMatchError::InvalidInput(format!(
                    "End date {} is before start date {}",
                    end, entry.start_date
                )));
            }
        }
        let mut entries = self.experience().await?;
        entries.push(entry);
        self.store.set(USER_EXPERIENCE_KEY, &entries).await?;
        self.refresh_experience_years(&entries, today).await
    }

    pub async fn remove_experience(&self, id: Uuid, today: NaiveDate) -> Result<f64> {
        let mut entries = self.experience().await?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(CareerMatchError::NotFound(format!("Experience entry {}", id)));
        }
        self.store.set(USER_EXPERIENCE_KEY, &entries).await?;
        self.refresh_experience_years(&entries, today).await
    }

    /// Stored match scores. A corrupt cache is discarded rather than reported.
    pub async fn score_cache(&self) -> ScoreCache {
        match self.store.get(SCORE_CACHE_KEY).await {
            Ok(cache) => cache,
            Err(e) => {
                warn!("Discarding unreadable score cache: {}", e);
                ScoreCache::new()
            }
        }
    }

    pub async fn save_score_cache(&self, cache: &ScoreCache) -> Result<()> {
        self.store.set(SCORE_CACHE_KEY, cache).await
    }

    /// Re-derive the profile's years of experience from its work history.
    /// An empty history leaves the stored value untouched.
    async fn refresh_experience_years(&self, entries: &[WorkExperience], today: NaiveDate) -> Result<f64> {
        let mut profile = self.profile().await?;
        if entries.is_empty() {
            return Ok(profile.experience);
        }
        profile.experience = derive_experience_years(entries, today);
        self.store.set(USER_PROFILE_KEY, &profile).await?;
        Ok(profile.experience)
    }
}

fn validate_years(years: f64) -> Result<()> {
    if years.is_finite() && years >= 0.0 {
        Ok(())
    } else {
        Err(CareerMatchError::InvalidInput(format!(
            "Years of experience must be non-negative, got {}",
            years
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> (tempfile::TempDir, ProfileRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = ProfileRepository::open(dir.path());
        (dir, repo)
    }

    #[tokio::test]
    async fn missing_keys_resolve_to_defaults() {
        let (_dir, repo) = repository();
        let profile = repo.profile().await.unwrap();
        assert_eq!(profile, UserProfile::default());
        assert!(repo.skills().await.unwrap().is_empty());
        assert_eq!(repo.preferences().await.unwrap().target_role, "Software Developer");
    }

    #[tokio::test]
    async fn initialize_only_runs_once() {
        let (_dir, repo) = repository();
        assert!(repo.initialize().await.unwrap());
        assert!(!repo.initialize().await.unwrap());
    }

    #[tokio::test]
    async fn skill_names_are_unique_case_insensitively() {
        let (_dir, repo) = repository();
        repo.add_skill("JavaScript", SkillLevel::Advanced, 3.0).await.unwrap();

        let duplicate = repo.add_skill("  javascript ", SkillLevel::Beginner, 1.0).await;
        assert!(matches!(duplicate, Err(CareerMatchError::DuplicateSkill(_))));
        assert_eq!(repo.skills().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn import_skips_existing_skills() {
        let (_dir, repo) = repository();
        repo.add_skill("Docker", SkillLevel::Advanced, 2.0).await.unwrap();

        let names = vec!["docker".to_string(), "Kubernetes".to_string(), "Go".to_string()];
        let import = repo.import_skills(&names, SkillLevel::Beginner).await.unwrap();

        let added: Vec<&str> = import.added.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(added, vec!["Kubernetes", "Go"]);
        assert_eq!(import.skipped, vec!["docker"]);
        // The existing entry keeps its level
        let docker = repo.find_skill("Docker").await.unwrap().unwrap();
        assert_eq!(docker.level, SkillLevel::Advanced);
    }

    #[tokio::test]
    async fn edit_rejects_rename_onto_existing_skill() {
        let (_dir, repo) = repository();
        repo.add_skill("React", SkillLevel::Intermediate, 2.0).await.unwrap();
        let rust = repo.add_skill("Rust", SkillLevel::Beginner, 0.5).await.unwrap();

        let clash = repo
            .edit_skill(rust.id, SkillUpdate { name: Some("REACT".into()), ..Default::default() })
            .await;
        assert!(matches!(clash, Err(CareerMatchError::DuplicateSkill(_))));

        let updated = repo
            .edit_skill(rust.id, SkillUpdate { level: Some(SkillLevel::Advanced), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(updated.level, SkillLevel::Advanced);
        assert_eq!(updated.name, "Rust");
    }

    #[tokio::test]
    async fn removing_unknown_skill_is_not_found() {
        let (_dir, repo) = repository();
        let result = repo.remove_skill(Uuid::new_v4()).await;
        assert!(matches!(result, Err(CareerMatchError::NotFound(_))));
    }

    #[tokio::test]
    async fn work_history_updates_profile_years() {
        let (_dir, repo) = repository();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();

        let entry = WorkExperience::new("Engineer", "Acme", start, None);
        let id = entry.id;
        let years = repo.add_experience(entry, today).await.unwrap();
        assert_eq!(years, 3.0);
        assert_eq!(repo.profile().await.unwrap().experience, 3.0);

        // Removing the last entry keeps the last known years
        let years = repo.remove_experience(id, today).await.unwrap();
        assert_eq!(years, 3.0);
    }

    #[tokio::test]
    async fn snapshot_rederives_years_for_current_role() {
        let (_dir, repo) = repository();
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let added_on = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        repo.add_experience(WorkExperience::new("Engineer", "Acme", start, None), added_on)
            .await
            .unwrap();
        assert_eq!(repo.profile().await.unwrap().experience, 1.0);

        let later = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let snapshot = repo.snapshot_at(later).await.unwrap();
        assert_eq!(snapshot.profile.experience, 4.0);
    }

    #[tokio::test]
    async fn snapshot_keeps_manual_years_without_history() {
        let (_dir, repo) = repository();
        let profile = UserProfile { experience: 6.5, ..UserProfile::default() };
        repo.save_profile(&profile).await.unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let snapshot = repo.snapshot_at(today).await.unwrap();
        assert_eq!(snapshot.profile.experience, 6.5);
    }

    #[tokio::test]
    async fn corrupt_score_cache_starts_empty() {
        let (dir, repo) = repository();
        assert!(repo.score_cache().await.is_empty());

        tokio::fs::write(dir.path().join("score_cache.json"), "{ truncated").await.unwrap();
        assert!(repo.score_cache().await.is_empty());
    }

    #[tokio::test]
    async fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let result: Result<UserProfile> = store.get("../escape").await;
        assert!(matches!(result, Err(CareerMatchError::Storage(_))));
    }
}
