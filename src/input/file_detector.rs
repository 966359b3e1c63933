//! Listing file type detection

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Json,
    Csv,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "json" => FileType::Json,
            "csv" => FileType::Csv,
            _ => FileType::Unknown,
        }
    }
}
