use crate::error::ConfigError;
use clap::Parser;
use serde::Deserialize;

/// Optional config file, merged under the CLI flags
pub const CONFIG_FILE: &str = "bpsweep.toml";

/// The control-flow microbenchmarks swept when `--benchmarks` is not given
pub const DEFAULT_BENCHMARKS: &[&str] = &[
    "CCa", "CCe", "CCh", "CCh_st", "CCm", "CCl", "CRd", "CRf", "CS1", "CS3",
];

/// The gem5 branch predictors swept when `--predictors` is not given
pub const DEFAULT_PREDICTORS: &[&str] = &["LocalBP", "BiModeBP", "PerceptronBP"];

#[derive(Parser, Deserialize, Debug, Default)]
#[command(author, version, about)]
#[serde(default)]
pub struct OptionalConfig {
    /// Benchmark workloads to sweep, each a subdirectory of the benchmarks dir
    #[arg(short, long, value_delimiter = ',')]
    pub benchmarks: Option<Vec<String>>,

    /// Branch predictor variants to sweep, passed to gem5 as --bp-type
    #[arg(short, long, value_delimiter = ',')]
    pub predictors: Option<Vec<String>>,

    /// How many simulator processes may run at once. Defaults to 1 (sequential)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Path to the gem5 binary
    #[arg(long)]
    pub simulator: Option<String>,

    /// Directory holding one `<benchmark>/bench` workload binary per benchmark
    #[arg(long)]
    pub benchmarks_dir: Option<String>,

    /// Simulation config script handed to gem5
    #[arg(long)]
    pub config_script: Option<String>,

    /// Output directory gem5 writes into, passed as --outdir
    #[arg(short, long)]
    pub outdir: Option<String>,

    /// Name stats files "<benchmark>-stats.txt" instead of
    /// "<benchmark>-<predictor>-stats.txt". Runs of the same benchmark under
    /// different predictors then overwrite each other's stats file!
    #[arg(long)]
    pub untagged_stats: bool,

    /// Also ask gem5 for config.ini/config.json snapshots of each run
    #[arg(long)]
    pub dump_config: bool,
}

impl OptionalConfig {
    pub fn get_args() -> Self {
        Self::parse()
    }

    pub fn get_toml() -> Result<Self, ConfigError> {
        match std::fs::read_to_string(CONFIG_FILE) {
            Ok(text) => toml::from_str(&text)
                .map_err(|e| ConfigError::BadConfigFile(CONFIG_FILE.into(), e)),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Fields set on `self` win over fields set on `rhs`
    pub fn merge(self, rhs: Self) -> Self {
        Self {
            benchmarks: self.benchmarks.or(rhs.benchmarks),
            predictors: self.predictors.or(rhs.predictors),
            jobs: self.jobs.or(rhs.jobs),
            simulator: self.simulator.or(rhs.simulator),
            benchmarks_dir: self.benchmarks_dir.or(rhs.benchmarks_dir),
            config_script: self.config_script.or(rhs.config_script),
            outdir: self.outdir.or(rhs.outdir),
            untagged_stats: self.untagged_stats || rhs.untagged_stats,
            dump_config: self.dump_config || rhs.dump_config,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub benchmarks: Vec<String>,
    pub predictors: Vec<String>,
    pub jobs: usize,
    pub simulator: String,
    pub benchmarks_dir: String,
    pub config_script: String,
    pub outdir: String,
    pub untagged_stats: bool,
    pub dump_config: bool,
}

impl TryFrom<OptionalConfig> for Config {
    type Error = ConfigError;

    fn try_from(config: OptionalConfig) -> Result<Self, ConfigError> {
        let benchmarks = config
            .benchmarks
            .unwrap_or_else(|| DEFAULT_BENCHMARKS.iter().map(|s| s.to_string()).collect());
        if benchmarks.is_empty() {
            return Err(ConfigError::NoBenchmarks);
        }

        let predictors = config
            .predictors
            .unwrap_or_else(|| DEFAULT_PREDICTORS.iter().map(|s| s.to_string()).collect());
        if predictors.is_empty() {
            return Err(ConfigError::NoPredictors);
        }

        let jobs = config.jobs.unwrap_or(1);
        if jobs == 0 {
            return Err(ConfigError::ZeroJobs);
        }

        Ok(Self {
            benchmarks,
            predictors,
            jobs,
            simulator: config
                .simulator
                .unwrap_or_else(|| "./build/X86/gem5.opt".into()),
            benchmarks_dir: config.benchmarks_dir.unwrap_or_else(|| "microbench".into()),
            config_script: config
                .config_script
                .unwrap_or_else(|| "configs/deprecated/example/se.py".into()),
            outdir: config.outdir.unwrap_or_else(|| "out".into()),
            untagged_stats: config.untagged_stats,
            dump_config: config.dump_config,
        })
    }
}

impl Config {
    pub fn get() -> Result<Self, ConfigError> {
        OptionalConfig::get_args()
            .merge(OptionalConfig::get_toml()?)
            .try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_parse() {
        let config = OptionalConfig::parse_from([
            "bpsweep",
            "--jobs",
            "8",
            "--untagged-stats",
            "-b",
            "CCa,CCe",
        ]);
        assert_eq!(config.jobs, Some(8));
        assert!(config.untagged_stats);
        assert_eq!(
            config.benchmarks.as_deref(),
            Some(&["CCa".to_string(), "CCe".to_string()][..])
        );
        assert!(!config.dump_config);
    }

    #[test]
    fn toml_config_parses_partial_files() {
        let config: OptionalConfig =
            toml::from_str("jobs = 8\npredictors = [\"LocalBP\"]").unwrap();
        assert_eq!(config.jobs, Some(8));
        assert_eq!(config.predictors.as_deref(), Some(&["LocalBP".to_string()][..]));
        assert_eq!(config.benchmarks, None);
    }

    #[test]
    fn cli_flags_win_over_toml() {
        let cli = OptionalConfig {
            jobs: Some(4),
            ..Default::default()
        };
        let file: OptionalConfig = toml::from_str("jobs = 8\noutdir = \"elsewhere\"").unwrap();

        let merged = cli.merge(file);
        assert_eq!(merged.jobs, Some(4));
        assert_eq!(merged.outdir.as_deref(), Some("elsewhere"));
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let config = Config::try_from(OptionalConfig::default()).unwrap();
        assert_eq!(config.jobs, 1);
        assert_eq!(config.simulator, "./build/X86/gem5.opt");
        assert_eq!(config.benchmarks.len(), 10);
        assert_eq!(config.predictors.len(), 3);
        assert_eq!(config.outdir, "out");
        assert!(!config.untagged_stats);
    }

    #[test]
    fn empty_lists_are_rejected() {
        let no_benchmarks = OptionalConfig {
            benchmarks: Some(vec![]),
            ..Default::default()
        };
        assert!(matches!(
            Config::try_from(no_benchmarks),
            Err(ConfigError::NoBenchmarks)
        ));

        let no_predictors = OptionalConfig {
            predictors: Some(vec![]),
            ..Default::default()
        };
        assert!(matches!(
            Config::try_from(no_predictors),
            Err(ConfigError::NoPredictors)
        ));
    }

    #[test]
    fn zero_jobs_is_rejected() {
        let config = OptionalConfig {
            jobs: Some(0),
            ..Default::default()
        };
        assert!(matches!(Config::try_from(config), Err(ConfigError::ZeroJobs)));
    }
}
