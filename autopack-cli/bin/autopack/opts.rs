//! Command line argument parsing for autopack

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use autopack_cli::config::PASSWORD_ENV;
use autopack_cli::CliConfig;
use autopack_core::Threading;

/// Smart archive dispatcher
///
/// Recognizes what the source is, decides whether to compress or extract,
/// and runs the matching external tool.
#[derive(Parser, Debug)]
#[command(
    name = "autopack",
    version = "0.1.1",
    about = "Compress or extract archives with the right tool for the format",
    long_about = "autopack inspects the source (file signature first, extension second) \
                 and either packs it into the archive named by the target or extracts \
                 it into the target directory. The last positional argument is the target."
)]
#[allow(clippy::struct_excessive_bools, clippy::option_option)]
pub struct AutopackOpts {
    /// Sources followed by the target
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Guided interactive mode
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,

    /// Archive password (prompted for when given without a value)
    #[arg(
        short = 'p',
        long = "password",
        value_name = "PASSWORD",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "",
        env = PASSWORD_ENV,
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Compression level 1-9 (6 when given without a value)
    #[arg(
        short = 'l',
        long = "level",
        value_name = "LEVEL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "6",
        value_parser = clap::value_parser!(u32).range(1..=9)
    )]
    pub level: Option<u32>,

    /// Thread count 1-1024 (auto-detected when given without a value)
    #[arg(
        short = 't',
        long = "threads",
        value_name = "NUM",
        num_args = 0..=1,
        require_equals = true,
        value_parser = clap::value_parser!(u32).range(1..=1024)
    )]
    pub threads: Option<Option<u32>>,

    /// Print extra progress information
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Print timing and compression statistics
    #[arg(long = "benchmark")]
    pub benchmark: bool,

    /// Test the archive after creating it
    #[arg(long = "verify")]
    pub verify: bool,

    /// Leave out files matching PATTERN (repeatable)
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Only archive files matching PATTERN (repeatable)
    #[arg(long = "include", value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Force the archive format (zip, 7z, tar, tar.gz, tgz, tar.bz2, tar.xz, rar, lz4, zstd, xar)
    #[arg(long = "format", value_name = "TYPE")]
    pub format: Option<String>,
}

/// Short options that also take a value glued to the flag (`-l5`)
const ATTACHED_VALUE_SHORTS: [char; 3] = ['p', 'l', 't'];

/// Rewrites `-l5`, `-t4` and `-pPASS` into the `-l=5` form.
///
/// The optional-value flags require `=` so that a following positional is
/// never taken as their value; the glued short form is accepted here
/// instead. Arguments after `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut positional_only = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if positional_only {
                return arg;
            }
            if arg == "--" {
                positional_only = true;
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let mut chars = text.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some('-'), Some(short), Some(next))
                    if ATTACHED_VALUE_SHORTS.contains(&short) && next != '=' =>
                {
                    OsString::from(format!("-{short}={}", &text[2..]))
                }
                _ => arg,
            }
        })
        .collect()
}

impl AutopackOpts {
    /// Parses the process arguments, accepting glued short values.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments, help and version.
    pub fn parse_env() -> Result<Self, clap::Error> {
        Self::try_parse_from(normalize_args(std::env::args_os()))
    }

    /// Build CLI configuration from the parsed options
    pub fn config(&self) -> CliConfig {
        let (sources, target) = if self.interactive || self.paths.len() < 2 {
            (self.paths.iter().take(1).cloned().collect(), None)
        } else {
            let (target, sources) = self.paths.split_last().map_or_else(
                || (None, Vec::new()),
                |(target, sources)| (Some(target.clone()), sources.to_vec()),
            );
            (sources, target)
        };

        let ask_password = self.password.as_deref() == Some("");

        CliConfig {
            interactive: self.interactive,
            sources,
            target,
            password: self.password.clone().filter(|password| !password.is_empty()),
            ask_password,
            level: self.level,
            threads: self.threads.map(Threading::from),
            verbose: self.verbose,
            benchmark: self.benchmark,
            verify: self.verify,
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            format: self.format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AutopackOpts {
        match AutopackOpts::try_parse_from(args) {
            Ok(opts) => opts,
            Err(e) => panic!("failed to parse {args:?}: {e}"),
        }
    }

    #[test]
    /// The last positional is the target, everything before it a source.
    fn splits_sources_and_target() {
        let config = parse(&["autopack", "a.txt", "dir/", "out.zip"]).config();
        assert_eq!(config.sources, [PathBuf::from("a.txt"), PathBuf::from("dir/")]);
        assert_eq!(config.target, Some(PathBuf::from("out.zip")));
        assert!(!config.interactive);
    }

    #[test]
    fn single_path_has_no_target() {
        let config = parse(&["autopack", "only"]).config();
        assert_eq!(config.sources, [PathBuf::from("only")]);
        assert_eq!(config.target, None);
    }

    #[test]
    fn interactive_takes_first_path_as_source() {
        let config = parse(&["autopack", "-i", "data"]).config();
        assert!(config.interactive);
        assert_eq!(config.sources, [PathBuf::from("data")]);
        assert_eq!(config.target, None);
    }

    #[test]
    /// Optional values are attached with `=`; bare flags use their defaults.
    fn optional_values() {
        let opts = parse(&["autopack", "-l", "-t", "src", "out.zip"]);
        assert_eq!(opts.level, Some(6));
        assert_eq!(opts.threads, Some(None));
        assert_eq!(opts.paths.len(), 2);
        assert_eq!(opts.config().threads, Some(Threading::Auto));

        let opts = parse(&["autopack", "--level=9", "-t=4", "src", "out.zip"]);
        assert_eq!(opts.level, Some(9));
        assert_eq!(opts.config().threads, Some(Threading::Exact(4)));

        let opts = parse(&["autopack", "src", "out.zip"]);
        assert_eq!(opts.level, None);
        assert_eq!(opts.threads, None);
    }

    #[test]
    /// Values glued to the short flag are accepted as well.
    fn glued_short_values() {
        let args = normalize_args(["autopack", "-l5", "-t4", "-pPW", "src", "out.7z"]);
        let config = AutopackOpts::try_parse_from(args).unwrap().config();
        assert_eq!(config.level, Some(5));
        assert_eq!(config.threads, Some(Threading::Exact(4)));
        assert_eq!(config.password.as_deref(), Some("PW"));
        assert_eq!(config.sources, [PathBuf::from("src")]);

        let args = normalize_args(["autopack", "-l=3", "--", "-l5", "out.zip"]);
        assert_eq!(args[1], "-l=3");
        assert_eq!(args[3], "-l5");
        let opts = AutopackOpts::try_parse_from(args).unwrap();
        assert_eq!(opts.paths, [PathBuf::from("-l5"), PathBuf::from("out.zip")]);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(AutopackOpts::try_parse_from(["autopack", "--level=0", "a", "b"]).is_err());
        assert!(AutopackOpts::try_parse_from(["autopack", "--level=10", "a", "b"]).is_err());
        assert!(AutopackOpts::try_parse_from(["autopack", "--threads=0", "a", "b"]).is_err());
        assert!(AutopackOpts::try_parse_from(["autopack", "--threads=1025", "a", "b"]).is_err());
    }

    #[test]
    fn bare_password_asks_for_one() {
        let config = parse(&["autopack", "-p", "src", "out.7z"]).config();
        assert!(config.ask_password);
        assert_eq!(config.password, None);

        let config = parse(&["autopack", "--password=s3cret", "src", "out.7z"]).config();
        assert!(!config.ask_password);
        assert_eq!(config.password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn repeatable_filters_and_format() {
        let config = parse(&[
            "autopack",
            "--include",
            r".*\.rs",
            "--include",
            r".*\.toml",
            "--exclude",
            "target/.*",
            "--format",
            "tgz",
            "--verbose",
            "--benchmark",
            "--verify",
            "src",
            "backup",
        ])
        .config();
        assert_eq!(config.include, [r".*\.rs", r".*\.toml"]);
        assert_eq!(config.exclude, ["target/.*"]);
        assert_eq!(config.format.as_deref(), Some("tgz"));
        assert!(config.verbose && config.benchmark && config.verify);
    }
}
