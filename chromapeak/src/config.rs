//! YAML configuration for [`PipelineOptions`]
//!
//! Every level of the options is `#[serde(default)]`, so a file only
//! needs the keys it changes:
//!
//! ```yaml
//! sigma: 3.0
//! resolve:
//!   maxColors: 3
//!   minDistance: 12.0
//! ```

use crate::{Error, PipelineOptions, Result};
use std::path::Path;
use tracing::debug;

/// Parse and validate options from YAML text
pub fn parse_options(yaml: &str) -> Result<PipelineOptions> {
    // An empty document deserializes as null, not as an empty mapping
    let options: PipelineOptions = if yaml.trim().is_empty() {
        PipelineOptions::default()
    } else {
        serde_yaml::from_str(yaml)?
    };
    options.validate()?;
    Ok(options)
}

/// Load and validate options from a YAML file
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<PipelineOptions> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;
    let options = parse_options(&contents)?;
    debug!(path = %path.display(), "pipeline options loaded");
    Ok(options)
}

/// Serialize options as YAML
pub fn to_yaml(options: &PipelineOptions) -> Result<String> {
    Ok(serde_yaml::to_string(options)?)
}

/// Save options to a YAML file
pub fn save_options<P: AsRef<Path>>(options: &PipelineOptions, path: P) -> Result<()> {
    let path = path.as_ref();
    let yaml = to_yaml(options)?;
    std::fs::write(path, yaml).map_err(|source| Error::ConfigFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromapeak_hue::{ChromaGate, ResolveMode, WeightMode};

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let o = parse_options("sigma: 3.5\nresolve:\n  maxColors: 3\n").unwrap();
        let d = PipelineOptions::default();
        assert_eq!(o.sigma, 3.5);
        assert_eq!(o.resolve.max_colors, 3);
        // Keys missing inside a present section come from the stage default
        assert_eq!(o.resolve.threshold, 0.0);
        assert_eq!(o.peaks, d.peaks);
        assert_eq!(o.histogram, d.histogram);
    }

    #[test]
    fn test_enum_names() {
        let yaml = "histogram:\n  weightMode: count\n  chromaGate: smooth\nresolve:\n  mode: peak\n";
        let o = parse_options(yaml).unwrap();
        assert_eq!(o.histogram.weight_mode, WeightMode::Count);
        assert_eq!(o.histogram.chroma_gate, ChromaGate::Smooth);
        assert_eq!(o.resolve.mode, ResolveMode::Peak);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse_options("").unwrap(), PipelineOptions::default());
        assert_eq!(parse_options("{}").unwrap(), PipelineOptions::default());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(parse_options("peaks:\n  minHeightRatio: 2.0\n").is_err());
        assert!(matches!(
            parse_options("sigma: [1, 2]"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut o = PipelineOptions::default();
        o.histogram.lightness_margin = 0.1;
        o.resolve.mode = ResolveMode::Peak;
        let back = parse_options(&to_yaml(&o).unwrap()).unwrap();
        assert_eq!(back, o);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("chromapeak-{}.yaml", std::process::id()));
        let mut o = PipelineOptions::default();
        o.sigma = 1.5;
        o.resolve.max_colors = 7;
        save_options(&o, &path).unwrap();
        let back = load_options(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(back, o);
    }

    #[test]
    fn test_missing_file() {
        let err = load_options("/nonexistent/chromapeak.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigFile { .. }));
    }
}
