use crate::config::Config;
use crate::events::{EventSink, UiEvent};
use crate::movie::Movie;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const FULL_CSV: &str = "full.csv";

pub const FULL_HEADER: [&str; 21] = [
    "Title",
    "Year",
    "Rated",
    "Released",
    "Runtime",
    "Genre",
    "Director",
    "Writer",
    "Actors",
    "Plot",
    "Language",
    "Country",
    "Awards",
    "Poster",
    "Metascore",
    "ImdbRating",
    "Type",
    "Dvd",
    "BoxOffice",
    "Production",
    "Website",
];

/// A single-column export of one movie field.
struct ColumnFile {
    file_name: &'static str,
    header: &'static str,
    what: &'static str,
    field: fn(&Movie) -> Option<&str>,
}

const COLUMN_FILES: [ColumnFile; 5] = [
    ColumnFile {
        file_name: "titles.csv",
        header: "Title",
        what: "Film titles",
        field: title,
    },
    ColumnFile {
        file_name: "years.csv",
        header: "Year",
        what: "Film years",
        field: year,
    },
    ColumnFile {
        file_name: "runtimes.csv",
        header: "Runtime",
        what: "Film runtimes",
        field: runtime,
    },
    ColumnFile {
        file_name: "genres.csv",
        header: "Genres",
        what: "Film genres",
        field: genre,
    },
    ColumnFile {
        file_name: "imdb_rating.csv",
        header: "imdb_ratings",
        what: "Film IMDB ratings",
        field: imdb_rating,
    },
];

fn title(m: &Movie) -> Option<&str> {
    m.title.as_deref()
}

fn year(m: &Movie) -> Option<&str> {
    m.year.as_deref()
}

fn runtime(m: &Movie) -> Option<&str> {
    m.runtime.as_deref()
}

fn genre(m: &Movie) -> Option<&str> {
    m.genre.as_deref()
}

fn imdb_rating(m: &Movie) -> Option<&str> {
    m.imdb_rating.as_deref()
}

/// Which files made it to disk and which didn't.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/// Write `full.csv` and, if enabled, the single-column files.
///
/// Every file is its own failure domain: an error is reported through `sink`
/// and the remaining files are still attempted. Nothing already written is
/// removed.
pub fn write_results(config: &Config, movies: &[Movie], sink: &dyn EventSink) -> WriteReport {
    let mut report = WriteReport::default();

    let full_path = config.output_path(FULL_CSV);
    let result = write_full(&full_path, movies);
    record(&mut report, sink, result, "All film info", FULL_CSV, full_path);

    if config.separate_files {
        for column in &COLUMN_FILES {
            let path = config.output_path(column.file_name);
            let result = write_column(&path, column, movies);
            record(&mut report, sink, result, column.what, column.file_name, path);
        }
    }

    report
}

fn record(
    report: &mut WriteReport,
    sink: &dyn EventSink,
    result: Result<()>,
    what: &'static str,
    target: &str,
    path: PathBuf,
) {
    match result {
        Ok(()) => {
            sink.send(UiEvent::FileWritten {
                what,
                path: path.clone(),
            });
            report.written.push(path);
        }
        Err(e) => {
            sink.send(UiEvent::WriteFailed {
                target: target.to_string(),
                message: format!("{:#}", e),
            });
            report.failed.push(path);
        }
    }
}

/// Row for `full.csv`, in `FULL_HEADER` order. Missing fields are empty.
pub fn full_row(m: &Movie) -> [&str; 21] {
    [
        &m.title,
        &m.year,
        &m.rated,
        &m.released,
        &m.runtime,
        &m.genre,
        &m.director,
        &m.writer,
        &m.actors,
        &m.plot,
        &m.language,
        &m.country,
        &m.awards,
        &m.poster,
        &m.metascore,
        &m.imdb_rating,
        &m.kind,
        &m.dvd,
        &m.box_office,
        &m.production,
        &m.website,
    ]
    .map(|field| field.as_deref().unwrap_or(""))
}

fn write_full(path: &Path, movies: &[Movie]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    wtr.write_record(FULL_HEADER)?;
    for movie in movies {
        wtr.write_record(full_row(movie))?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_column(path: &Path, column: &ColumnFile, movies: &[Movie]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    wtr.write_record([column.header])?;
    for movie in movies {
        wtr.write_record([(column.field)(movie).unwrap_or("")])?;
    }
    wtr.flush()?;
    Ok(())
}
