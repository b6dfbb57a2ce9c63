//! Build identifier stamping.
//!
//! This composes the string that ends up as `yumebox_constants::build::GIT_VERSION`,
//! e.g. `Alpha-d33dbbe2`.
//!
//! The identifier is opaque to everything that consumes it,
//! the parts are only used here to build it.

//---------------------------------------------------------------------------------------------------- Use
use std::{
    fmt,
    fs::read_to_string,
    io,
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    git::{head_paths, GitError, GitSource, MAX_HASH_LENGTH, MIN_HASH_LENGTH},
    macros::config_struct,
    time::{yymmdd, SOURCE_DATE_EPOCH},
};

//---------------------------------------------------------------------------------------------------- Const
/// The environment variable that, when set at build time,
/// replaces the stamped identifier entirely.
pub const OVERRIDE_ENV: &str = "YUMEBOX_GIT_VERSION";

/// Filename of the stamp config, found at the workspace root.
pub const CONFIG_FILE_NAME: &str = "version.toml";

/// Used in place of any git metadata that could not be determined.
pub const UNKNOWN: &str = "unknown";

/// A `rerun-if-changed` path that never exists, so `cargo` reruns the build script on every build.
pub const ALWAYS_RERUN: &str = ".yumebox-always-rerun";

/// Header to put at the start of the generated config file.
const HEADER: &str = r"## YumeBox build identifier config.
##
## The identifier is the non-empty parts of
## `channel`, commit hash, `suffix` and timestamp joined by '-',
## e.g. `Alpha-d33dbbe2`.
##
## Setting the `YUMEBOX_GIT_VERSION` environment variable
## at build time ignores this file entirely.

";

//---------------------------------------------------------------------------------------------------- Errors
/// An error reading a [`StampConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read `{}`: {source}", .path.display())]
    Io {
        /// The config file.
        path: PathBuf,
        /// The underlying IO error.
        source: io::Error,
    },

    /// The file is not a valid config.
    #[error("failed to parse `{}`: {source}", .path.display())]
    Parse {
        /// The config file.
        path: PathBuf,
        /// The underlying `toml` error.
        source: toml::de::Error,
    },

    /// A field was out of its valid range.
    #[error(
        "`hash_length` must be within {min}..={max}, found {found}",
        min = MIN_HASH_LENGTH,
        max = MAX_HASH_LENGTH
    )]
    HashLength {
        /// The configured length.
        found: usize,
    },
}

/// An invalid build identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StampError {
    /// The identifier was empty (or only whitespace).
    #[error("build identifier is empty")]
    Empty,

    /// The identifier contained a control character, e.g. a newline.
    #[error("build identifier {0:?} contains a control character")]
    ControlCharacter(String),
}

//---------------------------------------------------------------------------------------------------- StampConfig
config_struct! {
    /// Config for composing the build identifier, read from [`CONFIG_FILE_NAME`].
    #[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
    #[serde(deny_unknown_fields, default)]
    pub struct StampConfig {
        /// The release channel label placed at the
        /// start of the build identifier.
        ///
        /// If empty, the current git branch is used.
        ///
        /// Type         | String
        /// Examples     | "Alpha", "Beta", ""
        pub channel: String,

        /// The length of the abbreviated commit hash.
        ///
        /// `git` may output more characters if
        /// the hash would otherwise be ambiguous.
        ///
        /// Type         | Number
        /// Valid values | 4..=40
        pub hash_length: usize,

        #[comment_out = true]
        /// Text appended after the commit hash.
        ///
        /// Type         | String
        /// Examples     | "", "foss", "meta"
        pub suffix: String,

        #[comment_out = true]
        /// Append the build date (`yyMMdd`) to the identifier.
        ///
        /// Honours `SOURCE_DATE_EPOCH` for reproducible builds.
        ///
        /// Type         | boolean
        /// Valid values | true, false
        pub include_timestamp: bool,
    }
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            channel: "Alpha".to_owned(),
            hash_length: 8,
            suffix: String::new(),
            include_timestamp: false,
        }
    }
}

impl StampConfig {
    /// Returns a default [`StampConfig`], with doc comments.
    ///
    /// # Panics
    /// This panics if the default config cannot be serialized, which is a bug.
    pub fn documented_config() -> String {
        let str = toml::ser::to_string_pretty(&Self::default()).unwrap();
        let mut doc = toml_edit::DocumentMut::from_str(&str).unwrap();
        Self::write_docs(doc.as_table_mut());
        format!("{HEADER}{doc}")
    }

    /// Parse a [`StampConfig`] from `toml` text.
    ///
    /// `path` is only used for error messages.
    ///
    /// # Errors
    /// Will return an [`Err`] if the text is not a valid config.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if !(MIN_HASH_LENGTH..=MAX_HASH_LENGTH).contains(&config.hash_length) {
            return Err(ConfigError::HashLength {
                found: config.hash_length,
            });
        }

        Ok(config)
    }

    /// Attempts to read a config file in [`toml`] format from the given [`Path`].
    ///
    /// # Errors
    /// Will return an [`Err`] if the file cannot be read or if the file is not a valid config.
    pub fn read_from_path(file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = file.as_ref();

        let text = read_to_string(file).map_err(|source| ConfigError::Io {
            path: file.to_path_buf(),
            source,
        })?;

        Self::from_toml(&text, file)
    }

    /// Like [`StampConfig::read_from_path`], although a missing file returns the default config.
    ///
    /// # Errors
    /// Same as [`StampConfig::read_from_path`], except for [`io::ErrorKind::NotFound`].
    pub fn read_or_default(file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::read_from_path(file) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no stamp config found, using default");
                Ok(Self::default())
            }
            other => other,
        }
    }
}

//---------------------------------------------------------------------------------------------------- Stamp
/// The parts the build identifier is composed of.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stamp {
    /// The release channel, or the branch if none was configured.
    pub channel: String,
    /// Abbreviated commit hash.
    pub commit: String,
    /// The checked out branch.
    pub branch: String,
    /// [`StampConfig::suffix`].
    pub suffix: String,
    /// `yyMMdd`, empty unless [`StampConfig::include_timestamp`].
    pub timestamp: String,
}

impl Stamp {
    /// Collect a [`Stamp`] from `git`.
    ///
    /// Anything `git` fails to provide becomes [`UNKNOWN`], the errors are returned
    /// alongside so the caller can report them.
    pub fn collect(
        config: &StampConfig,
        git: &impl GitSource,
        now: DateTime<Utc>,
    ) -> (Self, Vec<GitError>) {
        let mut errors = Vec::new();
        let mut or_unknown = |result: Result<String, GitError>| {
            result.unwrap_or_else(|e| {
                tracing::warn!("{e}");
                errors.push(e);
                UNKNOWN.to_owned()
            })
        };

        let commit = or_unknown(git.short_commit(config.hash_length));
        let branch = or_unknown(git.branch());

        let channel = if config.channel.trim().is_empty() {
            branch.clone()
        } else {
            config.channel.trim().to_owned()
        };

        let timestamp = if config.include_timestamp {
            yymmdd(now)
        } else {
            String::new()
        };

        let stamp = Self {
            channel,
            commit,
            branch,
            suffix: config.suffix.trim().to_owned(),
            timestamp,
        };

        (stamp, errors)
    }

    /// The build identifier, e.g. `Alpha-d33dbbe2`.
    pub fn identifier(&self) -> String {
        [
            self.channel.as_str(),
            self.commit.as_str(),
            self.suffix.as_str(),
            self.timestamp.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
    }

    /// `KEY=value` lines describing this stamp, for consumption by other build tooling.
    pub fn to_properties(&self) -> String {
        let identifier = self.identifier();

        [
            ("GIT_VERSION", identifier.as_str()),
            ("GIT_COMMIT_HASH", self.commit.as_str()),
            ("GIT_BRANCH", self.branch.as_str()),
            ("GIT_SUFFIX", self.suffix.as_str()),
            ("BUILD_TIMESTAMP", self.timestamp.as_str()),
        ]
        .into_iter()
        .map(|(key, value)| format!("{key}={value}\n"))
        .collect()
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

//---------------------------------------------------------------------------------------------------- Free functions
/// Check `identifier` can be embedded as a build identifier, returning it trimmed.
///
/// ```rust
/// # use yumebox_helper::stamp::*;
/// assert_eq!(validate_identifier(" Alpha-d33dbbe2\n"), Ok("Alpha-d33dbbe2"));
/// assert_eq!(validate_identifier("  "), Err(StampError::Empty));
/// assert!(validate_identifier("a\nb").is_err());
/// ```
///
/// # Errors
/// The trimmed identifier must be non-empty and free of control characters.
pub fn validate_identifier(identifier: &str) -> Result<&str, StampError> {
    let identifier = identifier.trim();

    if identifier.is_empty() {
        return Err(StampError::Empty);
    }

    if identifier.chars().any(char::is_control) {
        return Err(StampError::ControlCharacter(identifier.to_owned()));
    }

    Ok(identifier)
}

/// Resolve the final build identifier.
///
/// `override_` (the value of [`OVERRIDE_ENV`]) wins if it is [`Some`],
/// otherwise a [`Stamp`] is collected. Git errors are returned alongside.
///
/// # Errors
/// Returns an error if the result fails [`validate_identifier`].
pub fn resolve(
    config: &StampConfig,
    git: &impl GitSource,
    override_: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(String, Vec<GitError>), StampError> {
    if let Some(identifier) = override_ {
        return Ok((validate_identifier(identifier)?.to_owned(), Vec::new()));
    }

    let (stamp, errors) = Stamp::collect(config, git, now);
    let identifier = validate_identifier(&stamp.identifier())?.to_owned();

    Ok((identifier, errors))
}

/// The `cargo:rerun-if-*` lines a build script stamping the repository at `root` should print.
///
/// `clock` is whether the build time comes from the system clock rather than
/// [`SOURCE_DATE_EPOCH`]. A timestamped identifier then goes stale every day,
/// so [`ALWAYS_RERUN`] is added.
pub fn rerun_triggers(root: &Path, config: &StampConfig, clock: bool) -> Vec<String> {
    let mut paths = vec![root.join(CONFIG_FILE_NAME)];
    paths.extend(head_paths(root));

    if config.include_timestamp && clock {
        paths.push(root.join(ALWAYS_RERUN));
    }

    paths
        .into_iter()
        .map(|path| format!("cargo:rerun-if-changed={}", path.display()))
        .chain(
            [OVERRIDE_ENV, SOURCE_DATE_EPOCH]
                .into_iter()
                .map(|env| format!("cargo:rerun-if-env-changed={env}")),
        )
        .collect()
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::time::from_unix;

    /// A [`GitSource`] returning fixed values.
    struct FakeGit {
        commit: Option<&'static str>,
        branch: Option<&'static str>,
    }

    impl FakeGit {
        const REPO: Self = Self {
            commit: Some("d33dbbe2"),
            branch: Some("main"),
        };

        const NO_REPO: Self = Self {
            commit: None,
            branch: None,
        };
    }

    fn fake_err() -> GitError {
        GitError::Status {
            args: "fake".into(),
            code: Some(128),
            stderr: "fatal: not a git repository".into(),
        }
    }

    impl GitSource for FakeGit {
        fn short_commit(&self, len: usize) -> Result<String, GitError> {
            self.commit
                .map(|c| c.chars().take(len).collect())
                .ok_or_else(fake_err)
        }

        fn branch(&self) -> Result<String, GitError> {
            self.branch.map(str::to_owned).ok_or_else(fake_err)
        }
    }

    fn now() -> DateTime<Utc> {
        // October 20th 2023
        from_unix(1_697_840_310).unwrap()
    }

    #[test]
    fn default_identifier() {
        let (stamp, errors) = Stamp::collect(&StampConfig::default(), &FakeGit::REPO, now());
        assert!(errors.is_empty());
        assert_eq!(stamp.identifier(), "Alpha-d33dbbe2");
        assert_eq!(stamp.to_string(), "Alpha-d33dbbe2");
    }

    #[test]
    fn empty_channel_uses_branch() {
        let config = StampConfig {
            channel: "  ".into(),
            hash_length: 7,
            ..Default::default()
        };
        let (stamp, _) = Stamp::collect(&config, &FakeGit::REPO, now());
        assert_eq!(stamp.identifier(), "main-d33dbbe");
    }

    #[test]
    fn suffix_and_timestamp() {
        let config = StampConfig {
            suffix: "foss".into(),
            include_timestamp: true,
            ..Default::default()
        };
        let (stamp, _) = Stamp::collect(&config, &FakeGit::REPO, now());
        assert_eq!(stamp.identifier(), "Alpha-d33dbbe2-foss-231020");
    }

    #[test]
    fn git_failure_is_unknown() {
        let (stamp, errors) = Stamp::collect(&StampConfig::default(), &FakeGit::NO_REPO, now());
        assert_eq!(errors.len(), 2);
        assert_eq!(stamp.branch, UNKNOWN);
        assert_eq!(stamp.identifier(), "Alpha-unknown");
    }

    #[test]
    fn properties() {
        let (stamp, _) = Stamp::collect(&StampConfig::default(), &FakeGit::REPO, now());
        assert_eq!(
            stamp.to_properties(),
            "GIT_VERSION=Alpha-d33dbbe2\n\
             GIT_COMMIT_HASH=d33dbbe2\n\
             GIT_BRANCH=main\n\
             GIT_SUFFIX=\n\
             BUILD_TIMESTAMP=\n"
        );
    }

    #[test]
    fn override_wins() {
        let (id, errors) = resolve(
            &StampConfig::default(),
            &FakeGit::NO_REPO,
            Some(" Beta-0123abcd \n"),
            now(),
        )
        .unwrap();
        assert_eq!(id, "Beta-0123abcd");
        assert!(errors.is_empty());

        let err = resolve(&StampConfig::default(), &FakeGit::REPO, Some(""), now()).unwrap_err();
        assert_eq!(err, StampError::Empty);
    }

    #[test]
    fn resolve_stamps() {
        let (id, errors) = resolve(&StampConfig::default(), &FakeGit::NO_REPO, None, now()).unwrap();
        assert_eq!(id, "Alpha-unknown");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn rerun_triggers_follow_the_clock() {
        let root = Path::new("/repo");
        let always = format!(
            "cargo:rerun-if-changed={}",
            root.join(ALWAYS_RERUN).display()
        );

        let triggers = rerun_triggers(root, &StampConfig::default(), true);
        assert_eq!(triggers.len(), 5);
        assert!(triggers.contains(&format!(
            "cargo:rerun-if-changed={}",
            root.join(CONFIG_FILE_NAME).display()
        )));
        assert!(triggers.contains(&format!("cargo:rerun-if-env-changed={OVERRIDE_ENV}")));
        assert!(triggers.contains(&format!("cargo:rerun-if-env-changed={SOURCE_DATE_EPOCH}")));
        assert!(!triggers.contains(&always));

        let config = StampConfig {
            include_timestamp: true,
            ..Default::default()
        };
        assert!(rerun_triggers(root, &config, true).contains(&always));
        // A fixed `SOURCE_DATE_EPOCH` is already tracked.
        assert!(!rerun_triggers(root, &config, false).contains(&always));
    }

    #[test]
    fn control_characters() {
        assert_eq!(
            validate_identifier("Alpha\u{7}-1"),
            Err(StampError::ControlCharacter("Alpha\u{7}-1".into()))
        );
        assert!(validate_identifier("Alpha-d33d\r\nbbe2").is_err());
        assert_eq!(validate_identifier("Alpha d33dbbe2"), Ok("Alpha d33dbbe2"));
    }

    #[test]
    fn documented_config() {
        let str = StampConfig::documented_config();
        assert!(str.contains("## The release channel label"));
        assert!(str.contains("#suffix = \"\""));

        let config = StampConfig::from_toml(&str, Path::new(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, StampConfig::default());
    }

    #[test]
    fn unknown_fields_rejected() {
        let err = StampConfig::from_toml("channl = \"Beta\"", Path::new(CONFIG_FILE_NAME))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn partial_config() {
        let config =
            StampConfig::from_toml("channel = \"Beta\"", Path::new(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.channel, "Beta");
        assert_eq!(config.hash_length, StampConfig::default().hash_length);
    }

    #[test]
    fn hash_length_range() {
        let err = StampConfig::from_toml("hash_length = 2", Path::new(CONFIG_FILE_NAME))
            .unwrap_err();
        assert!(matches!(err, ConfigError::HashLength { found: 2 }), "{err}");
    }

    #[test]
    fn read_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        assert_eq!(
            StampConfig::read_or_default(&path).unwrap(),
            StampConfig::default()
        );
        assert!(matches!(
            StampConfig::read_from_path(&path),
            Err(ConfigError::Io { .. })
        ));

        std::fs::write(&path, "include_timestamp = true\n").unwrap();
        let config = StampConfig::read_or_default(&path).unwrap();
        assert!(config.include_timestamp);

        std::fs::write(&path, "include_timestamp = ").unwrap();
        assert!(matches!(
            StampConfig::read_or_default(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
