//! User profile model and its storage

pub mod model;
pub mod store;

pub use model::{
    Education, LocationPreference, Preferences, Skill, SkillLevel, UserProfile, WorkExperience,
    WorkType,
};
pub use store::{JsonFileStore, ProfileRepository, ProfileSnapshot, SkillImport, SkillUpdate};
