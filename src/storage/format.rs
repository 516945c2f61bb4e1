use std::path::Path;

use serde::de::DeserializeOwned;

/// The syntax a document is written in.
///
/// Filter and listing documents share the same shape in every format, so the
/// format only decides which decoder reads the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// YAML, the default.
    #[default]
    Yaml,
    /// TOML. Lists of mappings are written as arrays of tables.
    Toml,
    /// JSON.
    Json,
}

impl Format {
    /// Chooses a format from a file extension.
    ///
    /// `.toml` and `.json` select their formats (case-insensitively);
    /// anything else, including no extension, is read as YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Self::Toml,
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// Decodes `content` into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid in this format or does not
    /// have the shape of `T`.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, FormatError> {
        Ok(match self {
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
        })
    }
}

/// Errors raised while decoding a document.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The YAML could not be parsed or bound.
    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The TOML could not be parsed or bound.
    #[error("invalid TOML document: {0}")]
    Toml(#[from] toml::de::Error),
    /// The JSON could not be parsed or bound.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use test_case::test_case;

    use super::*;

    #[test_case("filters.yaml", Format::Yaml)]
    #[test_case("filters.yml", Format::Yaml)]
    #[test_case("filters.TOML", Format::Toml)]
    #[test_case("nested/dir/listing.json", Format::Json)]
    #[test_case("filters", Format::Yaml; "no extension")]
    #[test_case("filters.txt", Format::Yaml; "unknown extension")]
    fn chooses_format_from_extension(path: &str, expected: Format) {
        assert_eq!(Format::from_path(Path::new(path)), expected);
    }

    #[test]
    fn every_format_decodes_the_same_shape() {
        let yaml = "score: 600\n";
        let toml = "score = 600\n";
        let json = r#"{"score": 600}"#;

        for (format, content) in [
            (Format::Yaml, yaml),
            (Format::Toml, toml),
            (Format::Json, json),
        ] {
            let value: BTreeMap<String, u32> = format.parse(content).unwrap();
            assert_eq!(value["score"], 600);
        }
    }

    #[test]
    fn malformed_content_reports_its_format() {
        let error = Format::Json
            .parse::<BTreeMap<String, u32>>("{")
            .unwrap_err();
        assert!(matches!(error, FormatError::Json(_)));
        assert!(error.to_string().starts_with("invalid JSON document:"));
    }
}
