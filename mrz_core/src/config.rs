use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DocumentRecord;
use crate::MrzError;
use crate::MrzFormat;
use crate::MrzResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["mrz.toml", ".mrz.toml", ".config/mrz.toml"];

/// Configuration loaded from an `mrz.toml` file.
///
/// ```toml
/// format = "td3"
///
/// [defaults]
/// document_type = "P"
/// issuing_country = "UTO"
/// nationality = "UTO"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct MrzConfig {
	/// Format used when none is requested explicitly. Kept as written so an
	/// unsupported name is reported with the name the user typed.
	#[serde(default)]
	pub format: Option<String>,
	/// Values used for any record field left empty.
	#[serde(default)]
	pub defaults: DocumentRecord,
}

impl MrzConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> MrzResult<Option<MrzConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: MrzConfig =
			toml::from_str(&content).map_err(|e| MrzError::ConfigParse(e.to_string()))?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// The configured default format, if any.
	pub fn default_format(&self) -> MrzResult<Option<MrzFormat>> {
		self.format
			.as_deref()
			.map(str::parse::<MrzFormat>)
			.transpose()
	}
}

/// A record file holds either a single record or a `records` list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordFile {
	Batch { records: Vec<DocumentRecord> },
	Single(DocumentRecord),
}

impl From<RecordFile> for Vec<DocumentRecord> {
	fn from(file: RecordFile) -> Self {
		match file {
			RecordFile::Batch { records } => records,
			RecordFile::Single(record) => vec![record],
		}
	}
}

/// Read the records stored at `path`.
///
/// The format is chosen by extension: `json`, `toml`, `yaml` or `yml`.
pub fn load_records(path: &Path) -> MrzResult<Vec<DocumentRecord>> {
	let content = std::fs::read_to_string(path).map_err(|e| MrzError::RecordFile {
		path: path.display().to_string(),
		reason: e.to_string(),
	})?;
	let format = path
		.extension()
		.and_then(|e| e.to_str())
		.unwrap_or("")
		.to_ascii_lowercase();

	let records = parse_records(&content, &format, &path.display().to_string())?;
	tracing::debug!(path = %path.display(), count = records.len(), "loaded records");

	Ok(records)
}

/// Parse record file content in the given format.
pub fn parse_records(
	content: &str,
	format: &str,
	path_display: &str,
) -> MrzResult<Vec<DocumentRecord>> {
	let record_error = |reason: String| MrzError::RecordFile {
		path: path_display.to_string(),
		reason,
	};

	let file: RecordFile = match format {
		"json" => serde_json::from_str(content).map_err(|e| record_error(e.to_string()))?,
		"toml" => toml::from_str(content).map_err(|e| record_error(e.to_string()))?,
		"yaml" | "yml" => {
			serde_yaml_ng::from_str(content).map_err(|e| record_error(e.to_string()))?
		}
		other => return Err(MrzError::UnsupportedRecordFormat(other.to_string())),
	};

	Ok(file.into())
}
