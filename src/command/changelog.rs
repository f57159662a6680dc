//! Changelog command implementation.
use release_publisher::changelog::{
    complete_changelog, escape_msbuild_property,
};

use crate::{cli::ChangelogArgs, result::Result};

/// Print the release notes of a changelog file.
pub fn execute(changelog_args: &ChangelogArgs) -> Result<()> {
    let notes = complete_changelog(&changelog_args.path)?;

    if changelog_args.msbuild {
        println!("{}", escape_msbuild_property(&notes));
    } else {
        print!("{notes}");
    }

    Ok(())
}
