use crate::site::SiteDataset;

/// Download payload for the currently loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetExport {
    pub file_name: String,
    /// Compact GeoJSON with sorted object keys.
    pub contents: String,
    /// blake3 hex digest of `contents`.
    pub content_hash: String,
}

impl SiteDataset {
    /// Serialize the in-memory dataset. Equal datasets export to identical bytes.
    pub fn export(&self, file_name: impl Into<String>) -> Result<DatasetExport, serde_json::Error> {
        let contents = self.collection().to_geojson_string()?;
        let content_hash = blake3::hash(contents.as_bytes()).to_hex().to_string();
        Ok(DatasetExport {
            file_name: file_name.into(),
            contents,
            content_hash,
        })
    }

    /// Content identity of the dataset, independent of input formatting.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        self.export(String::new()).map(|e| e.content_hash)
    }
}
