//! Command-line interface: argument definitions and command runners.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use encore::{
    clamp_offset, describe_offset, export_file_name, export_html, load_setlist, render_song,
    transpose_text_with, AppState, Command, DisplaySettingsState, FolderSession, Song,
    SongSource, TransposeOptions,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "setlist")]
#[command(version)]
#[command(about = "Render, transpose and export song charts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug logs
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Only show errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a song file to HTML
    Render(RenderArgs),

    /// Print a song file with its chords transposed
    Transpose {
        file: PathBuf,

        /// Semitones, clamped to -6..=6
        #[arg(allow_hyphen_values = true)]
        semitones: i32,

        /// Also transpose bare chord words in running text
        #[arg(long)]
        bare_chords: bool,
    },

    /// Build a standalone setlist document from a song folder
    Export {
        dir: PathBuf,

        /// Setlist name (defaults to the folder name)
        #[arg(long)]
        name: Option<String>,

        /// Output path (defaults to `<name>_Setlist.html`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render with the dark mode settings
        #[arg(long)]
        dark: bool,

        /// Display settings file (YAML or JSON)
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
    },

    /// Summarize an exported setlist
    Inspect { file: PathBuf },
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    pub file: PathBuf,

    /// Semitones to shift chords by, clamped to -6..=6
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    pub transpose: i32,

    /// Render with the dark mode settings
    #[arg(long)]
    pub dark: bool,

    /// Display settings file (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Also transpose bare chord words in running text
    #[arg(long)]
    pub bare_chords: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render(args) => {
            let html = render(&args)?;
            emit(args.output.as_deref(), &html)
        }
        Commands::Transpose {
            file,
            semitones,
            bare_chords,
        } => {
            let text = transpose(&file, semitones, bare_chords)?;
            emit(None, &text)
        }
        Commands::Export {
            dir,
            name,
            output,
            dark,
            settings,
        } => {
            let path = export(&dir, name, output, dark, settings.as_deref())?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Inspect { file } => {
            let html = read(&file)?;
            let state = load_setlist(&html)
                .with_context(|| format!("'{}' is not an exported setlist", file.display()))?;
            emit(None, &summarize(&state))
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
}

fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write '{}'", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<DisplaySettingsState> {
    match path {
        Some(path) => {
            let source = read(path)?;
            DisplaySettingsState::from_yaml(&source)
                .with_context(|| format!("Invalid settings file '{}'", path.display()))
        }
        None => Ok(DisplaySettingsState::default()),
    }
}

fn options(bare_chords: bool) -> TransposeOptions {
    TransposeOptions {
        match_bare_chords: bare_chords,
    }
}

pub fn render(args: &RenderArgs) -> Result<String> {
    let source = SongSource::read(&args.file)?;
    let settings = load_settings(args.settings.as_deref())?;

    let mut song = Song::new(1, source.name, source.content);
    song.transpose_by(args.transpose);

    Ok(render_song(
        &song,
        settings.current(args.dark),
        &options(args.bare_chords),
    ))
}

pub fn transpose(file: &Path, semitones: i32, bare_chords: bool) -> Result<String> {
    let text = read(file)?;
    Ok(transpose_text_with(
        &text,
        clamp_offset(semitones),
        &options(bare_chords),
    ))
}

/// Export every song in `dir` as a one-set setlist and return the written path.
pub fn export(
    dir: &Path,
    name: Option<String>,
    output: Option<PathBuf>,
    dark: bool,
    settings: Option<&Path>,
) -> Result<PathBuf> {
    let session = FolderSession::connect(dir)?;
    let sources = session.sync()?;
    let settings = load_settings(settings)?;

    let mut state = AppState::default();
    state.apply(Command::SetSetlistName(name.unwrap_or_else(|| session.name())));
    state.apply(Command::AddSongs(sources));
    for song in state.all_songs.clone() {
        state.apply(Command::AddSongToCurrentSet(song));
    }
    if dark {
        state.apply(Command::ToggleDarkMode);
    }
    state.export_date = Some(chrono::Utc::now().to_rfc3339());

    let html = export_html(&state, &settings)?;
    let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(&state.setlist_name)));
    emit(Some(&path), &html)?;
    info!(songs = state.all_songs.len(), "exported setlist");
    Ok(path)
}

/// Plain-text overview of a setlist.
pub fn summarize(state: &AppState) -> String {
    let mut lines = vec![state.setlist_name.clone()];
    if let Some(date) = &state.export_date {
        lines.push(format!("Exported {}", date));
    }
    for set in &state.sets {
        lines.push(format!(
            "{} ({}, {} songs)",
            set.name,
            set.color.name(),
            set.songs.len()
        ));
        for (index, song) in set.songs.iter().enumerate() {
            let key = song.current_key().unwrap_or_else(|| "key unknown".to_string());
            let mut line = format!("  {}. {} [{}]", index + 1, song.name, key);
            if song.key_transposition != 0 {
                line.push_str(&format!(" {}", describe_offset(song.key_transposition)));
            }
            lines.push(line);
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_render() {
        let cli = parse(&["setlist", "render", "song.md", "-t", "-3", "--dark"]);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.transpose, -3);
                assert!(args.dark);
                assert!(!args.bare_chords);
                assert_eq!(args.file, PathBuf::from("song.md"));
            }
            other => panic!("Expected render, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_semitones() {
        let cli = parse(&["setlist", "transpose", "song.md", "-2", "--bare-chords"]);
        match cli.command {
            Commands::Transpose {
                semitones,
                bare_chords,
                ..
            } => {
                assert_eq!(semitones, -2);
                assert!(bare_chords);
            }
            other => panic!("Expected transpose, got {:?}", other),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["setlist", "-v", "-q", "inspect", "x.html"]).is_err());
        assert!(parse(&["setlist", "inspect", "x.html", "--quiet"]).quiet);
    }

    #[test]
    fn test_render_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Song.md");
        fs::write(&file, "**Key:** C Major\n`[C]` hello").unwrap();

        let args = RenderArgs {
            file,
            transpose: 9,
            dark: false,
            settings: None,
            bare_chords: false,
            output: None,
        };
        let html = render(&args).unwrap();
        assert!(html.contains("F# Major"));
        assert!(html.contains("[F#]</code> hello"));
    }

    #[test]
    fn test_render_with_settings_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Song.md");
        fs::write(&file, "`[C]`hello").unwrap();
        let settings = dir.path().join("settings.yaml");
        fs::write(&settings, "dark:\n  showChords: false\n").unwrap();

        let args = RenderArgs {
            file,
            transpose: 0,
            dark: true,
            settings: Some(settings.clone()),
            bare_chords: false,
            output: None,
        };
        let html = render(&args).unwrap();
        assert_eq!(html, "<p class=\"mb-4\" style=\"color: #f8fafc\">hello</p>");

        fs::write(&settings, "dark: [").unwrap();
        let err = render(&args).unwrap_err();
        assert!(err.to_string().contains("Invalid settings file"));
    }

    #[test]
    fn test_transpose_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("chart.txt");
        fs::write(&file, "G C D\n[G]").unwrap();
        assert_eq!(transpose(&file, 2, false).unwrap(), "G C D\n[A]");
        assert_eq!(transpose(&file, 2, true).unwrap(), "A D E\n[A]");
        assert!(transpose(&dir.path().join("missing.txt"), 1, false).is_err());
    }

    #[test]
    fn test_export_then_summarize() {
        let dir = TempDir::new().unwrap();
        let songs = dir.path().join("songs");
        fs::create_dir(&songs).unwrap();
        fs::write(songs.join("Opener.md"), "**Key:** E Minor\n`[Em]` go").unwrap();
        fs::write(songs.join("Closer.txt"), "no key here").unwrap();

        let output = dir.path().join("out.html");
        let path = export(
            &songs,
            Some("Friday".to_string()),
            Some(output.clone()),
            false,
            None,
        )
        .unwrap();
        assert_eq!(path, output);

        let state = load_setlist(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(state.setlist_name, "Friday");
        assert!(state.export_date.is_some());

        let summary = summarize(&state);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "Friday");
        assert_eq!(lines[2], "Set 1 (blue, 2 songs)");
        assert_eq!(lines[3], "  1. Closer [key unknown]");
        assert_eq!(lines[4], "  2. Opener [E Minor]");
    }

    #[test]
    fn test_summarize_shows_offsets() {
        let mut state = AppState::default();
        state.apply(Command::AddSongs(vec![SongSource::new("A.md", "**Key:** A Major")]));
        let song = state.all_songs[0].clone();
        state.apply(Command::AddSongToCurrentSet(song));
        state.apply(Command::SelectSong(0));
        state.apply(Command::TransposeCurrentSong(-1));

        assert_eq!(
            summarize(&state),
            "My Setlist\nSet 1 (blue, 1 songs)\n  1. A [Ab Major] -1 (♭)"
        );
    }
}
