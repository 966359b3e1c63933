//! Input processing module
//! Handles listing records, file detection, import, resume text and the embedded sample data

pub mod file_detector;
pub mod listing;
pub mod loader;
pub mod resume;
pub mod sample;

pub use listing::{ExperienceRange, JobListing, LocationFamily, Salary};
pub use loader::{load_listing_file, load_listings};
pub use resume::{extract_resume_text, extract_skills};
