/// The only file extension accepted for uploads.
pub const ACCEPTED_EXTENSION: &str = ".geojson";

/// Result of one completed file read, handed over exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub contents: String,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    UnsupportedFileType { file_name: String },
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::UnsupportedFileType { file_name } => write!(
                f,
                "invalid file type uploaded ({file_name}): only {ACCEPTED_EXTENSION} files are supported"
            ),
        }
    }
}

impl std::error::Error for UploadError {}

/// Gate applied before any parse attempt.
pub fn check_file_type(file_name: &str) -> Result<(), UploadError> {
    let ext_len = ACCEPTED_EXTENSION.len();
    let accepted = file_name.len() > ext_len
        && file_name
            .get(file_name.len() - ext_len..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ACCEPTED_EXTENSION));
    if accepted {
        Ok(())
    } else {
        Err(UploadError::UnsupportedFileType {
            file_name: file_name.to_string(),
        })
    }
}
