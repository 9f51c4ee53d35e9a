use clap::{ArgGroup, Parser};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "stowzip")]
#[command(version)]
#[command(about = "Create, list, and extract stored-method ZIP archives", long_about = None)]
#[command(group(ArgGroup::new("action").required(true)))]
#[command(after_help = "Examples:\n  \
  stowzip -c photos          pack photos/ into photos.zip\n  \
  stowzip -d photos.zip      extract into photos/\n  \
  stowzip -l photos.zip      list archive contents")]
pub struct Cli {
    /// Compress a file or directory into <PATH>.zip
    #[arg(short = 'c', value_name = "PATH", group = "action")]
    pub compress: Option<PathBuf>,

    /// Extract an archive into a directory named after it
    #[arg(short = 'd', value_name = "PATH", group = "action")]
    pub extract: Option<PathBuf>,

    /// List an archive's contents
    #[arg(short = 'l', value_name = "PATH", group = "action")]
    pub list: Option<PathBuf>,

    /// Continue past entries that fail to extract
    #[arg(short = 'k', long = "keep-going")]
    pub keep_going: bool,

    /// Verbose listing (sizes and checksums)
    #[arg(short = 'v')]
    pub verbose: bool,
}

/// Archive written next to the input: `photos/` -> `photos.zip`,
/// `notes.txt` -> `notes.txt.zip`.
pub fn archive_output_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("archive"));
    name.push(".zip");
    input.with_file_name(name)
}

/// Extraction directory next to the archive: `photos.zip` -> `photos/`.
/// An extensionless archive gets `.out` appended so the directory never
/// collides with the archive itself.
pub fn extract_output_dir(archive: &Path) -> PathBuf {
    let stem = archive
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("archive"));
    let mut dir = archive.with_file_name(stem);
    if dir == archive {
        dir.set_extension("out");
    }
    dir
}
