use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use clap::ValueEnum;
use mdpost::core::io::TrajectoryReader;
use mdpost::core::io::gro::GroReader;
use mdpost::core::io::xyz::XyzReader;
use mdpost::core::models::trajectory::Trajectory;
use mdpost::engine::computes::msd::MeanSquaredDisplacement;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_PRECISION: usize = 3;
const DEFAULT_ORIGIN_SPACING: usize = 1;
const DEFAULT_OUTPUT_STEM: &str = "msd";

/// On-disk layout of a trajectory source file.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrajectoryFormat {
    /// Fixed-column GROMACS coordinate snapshots.
    Gro,
    /// Whitespace-separated XYZ snapshots.
    Xyz,
}

impl TrajectoryFormat {
    pub fn build_reader(&self, precision: usize) -> Box<dyn TrajectoryReader> {
        match self {
            TrajectoryFormat::Gro => Box::new(GroReader::new(precision)),
            TrajectoryFormat::Xyz => Box::new(XyzReader::new()),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialTrajectoryConfig {
    format: Option<TrajectoryFormat>,
    precision: Option<usize>,
    sources: Option<Vec<PathBuf>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialMsdConfig {
    #[serde(rename = "output-stem")]
    output_stem: Option<PathBuf>,
    #[serde(rename = "origin-spacing")]
    origin_spacing: Option<usize>,
    types: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAnalysisConfig {
    trajectory: Option<PartialTrajectoryConfig>,
    msd: Option<PartialMsdConfig>,
}

/// Fully merged settings for one `analyze` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub format: TrajectoryFormat,
    pub precision: usize,
    pub sources: Vec<PathBuf>,
    pub output_stem: PathBuf,
    pub origin_spacing: usize,
    pub types: Vec<String>,
}

impl PartialAnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Merges the file values with CLI arguments; arguments win wherever
    /// both supply a value.
    pub fn merge_with_cli(mut self, args: &AnalyzeArgs) -> Result<AnalysisConfig> {
        let traj = self.trajectory.take().unwrap_or_default();
        let msd = self.msd.take().unwrap_or_default();

        let sources = if args.trajectory.is_empty() {
            traj.sources.unwrap_or_default()
        } else {
            args.trajectory.clone()
        };
        if sources.is_empty() {
            return Err(CliError::Config(
                "At least one trajectory source is required, either under `trajectory.sources` or via --trajectory.".to_string(),
            ));
        }

        let origin_spacing = args
            .origin_spacing
            .or(msd.origin_spacing)
            .unwrap_or(DEFAULT_ORIGIN_SPACING);
        if origin_spacing == 0 {
            return Err(CliError::Config(
                "`msd.origin-spacing` must be at least 1.".to_string(),
            ));
        }

        let types = if args.types.is_empty() {
            msd.types.unwrap_or_default()
        } else {
            args.types.clone()
        };

        Ok(AnalysisConfig {
            format: args
                .format
                .or(traj.format)
                .unwrap_or(TrajectoryFormat::Gro),
            precision: args.precision.or(traj.precision).unwrap_or(DEFAULT_PRECISION),
            sources,
            output_stem: args
                .output_stem
                .clone()
                .or(msd.output_stem)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_STEM)),
            origin_spacing,
            types,
        })
    }
}

impl AnalysisConfig {
    pub fn build_trajectory(&self) -> Trajectory {
        let mut trajectory = Trajectory::new(self.format.build_reader(self.precision));
        for source in &self.sources {
            trajectory.attach(source);
        }
        trajectory
    }

    pub fn build_msd(&self) -> MeanSquaredDisplacement {
        let mut msd = MeanSquaredDisplacement::new(&self.output_stem, self.origin_spacing);
        for name in &self.types {
            msd.add_type(name);
        }
        msd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn base_args(config: &Path) -> AnalyzeArgs {
        AnalyzeArgs {
            config: config.to_path_buf(),
            trajectory: Vec::new(),
            format: None,
            precision: None,
            output_stem: None,
            origin_spacing: None,
            types: Vec::new(),
        }
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("analysis.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn file_values_merge_with_defaults() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [trajectory]
            sources = ["run.gro"]

            [msd]
            types = ["OW"]
            "#,
        );

        let config = PartialAnalysisConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&base_args(&path))
            .unwrap();

        assert_eq!(config.format, TrajectoryFormat::Gro);
        assert_eq!(config.precision, 3);
        assert_eq!(config.origin_spacing, 1);
        assert_eq!(config.output_stem, PathBuf::from("msd"));
        assert_eq!(config.sources, vec![PathBuf::from("run.gro")]);
        assert_eq!(config.types, vec!["OW".to_string()]);
    }

    #[test]
    fn full_file_is_honored() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [trajectory]
            format = "xyz"
            precision = 4
            sources = ["a.xyz", "b.xyz"]

            [msd]
            output-stem = "results/water"
            origin-spacing = 5
            types = ["OW", "HW1"]
            "#,
        );

        let config = PartialAnalysisConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&base_args(&path))
            .unwrap();

        assert_eq!(config.format, TrajectoryFormat::Xyz);
        assert_eq!(config.precision, 4);
        assert_eq!(
            config.sources,
            vec![PathBuf::from("a.xyz"), PathBuf::from("b.xyz")]
        );
        assert_eq!(config.output_stem, PathBuf::from("results/water"));
        assert_eq!(config.origin_spacing, 5);
        assert_eq!(config.types, vec!["OW".to_string(), "HW1".to_string()]);
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [trajectory]
            format = "xyz"
            sources = ["file.xyz"]

            [msd]
            origin-spacing = 5
            types = ["OW"]
            "#,
        );

        let mut args = base_args(&path);
        args.trajectory = vec![PathBuf::from("cli.gro")];
        args.format = Some(TrajectoryFormat::Gro);
        args.precision = Some(5);
        args.output_stem = Some(PathBuf::from("override"));
        args.origin_spacing = Some(2);
        args.types = vec!["NA".to_string(), "CL".to_string()];

        let config = PartialAnalysisConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.format, TrajectoryFormat::Gro);
        assert_eq!(config.precision, 5);
        assert_eq!(config.sources, vec![PathBuf::from("cli.gro")]);
        assert_eq!(config.output_stem, PathBuf::from("override"));
        assert_eq!(config.origin_spacing, 2);
        assert_eq!(config.types, vec!["NA".to_string(), "CL".to_string()]);
    }

    #[test]
    fn missing_sources_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [msd]
            types = ["OW"]
            "#,
        );

        let result = PartialAnalysisConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&base_args(&path));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn zero_origin_spacing_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [trajectory]
            sources = ["run.gro"]

            [msd]
            origin-spacing = 0
            "#,
        );

        let result = PartialAnalysisConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&base_args(&path));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [trajectory]
            sources = ["run.gro"]
            wrap-coordinates = true
            "#,
        );

        let result = PartialAnalysisConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = PartialAnalysisConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn built_trajectory_reads_the_configured_sources() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("run.gro");
        let mut snapshot = String::from("t= 0.0\n1\n");
        snapshot.push_str(&format!("{:>10}{:>5}{:>5}", "1MOL", "OW", 1));
        for value in [1.0, 2.0, 3.0, 0.0, 0.0, 0.0] {
            snapshot.push_str(&format!("{:8.3}", value));
        }
        snapshot.push_str("\n5.0 5.0 5.0\n");
        fs::write(&source, snapshot).unwrap();

        let config = AnalysisConfig {
            format: TrajectoryFormat::Gro,
            precision: 3,
            sources: vec![source],
            output_stem: PathBuf::from("msd"),
            origin_spacing: 1,
            types: vec!["OW".to_string()],
        };

        let mut trajectory = config.build_trajectory();
        let frames = trajectory.frames().unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].num_particles(), 1);
    }

    #[test]
    fn built_msd_selects_configured_types() {
        let config = AnalysisConfig {
            format: TrajectoryFormat::Gro,
            precision: 3,
            sources: vec![PathBuf::from("run.gro")],
            output_stem: PathBuf::from("out/water"),
            origin_spacing: 2,
            types: vec!["OW".to_string(), "NA".to_string()],
        };

        let msd = config.build_msd();
        assert_eq!(msd.selected_types(), ["OW".to_string(), "NA".to_string()]);
        assert_eq!(msd.output_path("OW"), PathBuf::from("out/water_OW.dat"));
    }
}
