use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;

/// Writes `value` as pretty-printed JSON to `path`, or to stdout without one.
pub fn write_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let target = path.map_or_else(|| "stdout".to_owned(), |path| path.display().to_string());
    let mut writer: Box<dyn io::Write> = match path {
        Some(path) => Box::new(BufWriter::new(create_file(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer).with_context(|| format!("Failed to write to {target}"))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {target}"))
}

pub fn create_file(path: &Path) -> anyhow::Result<File> {
    File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))
}

pub fn open_file(file_kind: &str, path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Lists the files in `dir` whose names end with `suffix`, sorted by path.
pub fn list_files(dir: &Path, suffix: &str) -> anyhow::Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut files = vec![];
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
            .path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn create_dir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}
