use std::path::PathBuf;

use yumebox_helper::{
    git::GitCli,
    stamp::{rerun_triggers, resolve, StampConfig, CONFIG_FILE_NAME, OVERRIDE_ENV},
    time::{build_time, source_date_epoch},
};

fn main() {
    set_git_version_env();
}

/// This sets the `GIT_VERSION` environment variable.
fn set_git_version_env() {
    // `constants/` lives directly inside the workspace root.
    let root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap())
        .parent()
        .unwrap()
        .to_path_buf();

    let config = StampConfig::read_or_default(root.join(CONFIG_FILE_NAME))
        .unwrap_or_else(|e| panic!("invalid stamp config: {e}"));

    let override_ = std::env::var(OVERRIDE_ENV).ok();

    // The clock is only read when nothing else fixes the identifier.
    let clock = override_.is_none() && source_date_epoch().is_none();
    for trigger in rerun_triggers(&root, &config, clock) {
        println!("{trigger}");
    }

    let (git_version, git_errors) = resolve(
        &config,
        &GitCli::new(&root),
        override_.as_deref(),
        build_time(),
    )
    .unwrap_or_else(|e| panic!("cannot stamp GIT_VERSION: {e}"));

    for e in git_errors {
        println!("cargo:warning=git metadata unavailable, using `unknown`: {e}");
    }

    println!("cargo:rustc-env=GIT_VERSION={git_version}");
}
