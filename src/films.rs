use crate::config::Config;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

/// Read one title per line from any `BufRead` source.
/// Lines are kept verbatim: order, duplicates and surrounding whitespace survive.
/// Invalid UTF-8 is replaced rather than rejected, and a leading byte-order
/// mark is dropped.
pub fn read_titles<R: BufRead>(mut reader: R) -> Result<Vec<String>> {
    let mut titles = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .context("Failed to read film list")?;
        if n == 0 {
            break;
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }

        let line = String::from_utf8_lossy(&buf);
        let title = if titles.is_empty() {
            line.strip_prefix('\u{feff}').unwrap_or(&line[..])
        } else {
            &line[..]
        };
        titles.push(title.to_string());
    }
    Ok(titles)
}

/// Read the film list at `path`.
pub fn read_films(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    read_titles(BufReader::new(file))
}

/// Populate `config.films` from `config.path`.
pub fn load_into(config: &mut Config) -> Result<()> {
    config.films = read_films(&config.path)?;
    Ok(())
}
