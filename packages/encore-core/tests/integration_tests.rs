//! Integration tests for the Encore core
//!
//! Exercise the public API end to end: import, state changes, transposition,
//! rendering and export.

use encore::{
    clamp_offset, describe_offset, export_html, load_setlist, render_markup, render_song,
    transpose_text, transpose_text_with, AppState, Command, DisplaySettings,
    DisplaySettingsState, FolderSession, SongSource, TransposeOptions,
};

const SONG: &str = r#"# Be Thou My Vision
**Key:** D Major

## Verse 1
`[D]`Be thou my `[G]`vi-`[D]`sion, O `[Bm]`Lord of my `[A]`heart
{harmony-high}Naught be all else{/harmony-high} to me

## Chorus
`[G/B]`Thou my best `[A7]`thought
{harmony-low}by day or by night{/harmony-low}
"#;

#[test]
fn test_identity_at_zero() {
    assert_eq!(transpose_text(SONG, 0), SONG);
    assert_eq!(
        transpose_text_with(SONG, 0, &TransposeOptions::with_bare_chords()),
        SONG
    );
}

#[test]
fn test_round_trip_every_offset() {
    for k in -6..=6 {
        let up = transpose_text(SONG, k);
        // Every root here is a natural, which both spelling tables agree on.
        assert_eq!(transpose_text(&up, -k), SONG, "offset {}", k);
    }
}

#[test]
fn test_transposed_song_renders() {
    let html = render_markup(&transpose_text(SONG, 2), &DisplaySettings::light());
    assert!(html.contains("E Major"));
    assert!(html.contains("[E]</code>Be thou my"));
    assert!(html.contains("[A/C#]</code>Thou"));
    assert!(html.contains("[B7]</code>thought"));
    assert!(html.contains("<span class=\"harmony-high\""));
    assert!(html.contains("section-chorus"));
}

#[test]
fn test_performance_view_settings() {
    let mut settings = DisplaySettings::dark();
    settings.show_chords = false;
    settings.show_key = false;
    settings.show_harmony_low = false;
    settings.bold_chorus = true;

    let html = render_markup(SONG, &settings);
    assert!(!html.contains("<code"));
    assert!(!html.contains("Key:"));
    assert!(!html.contains("harmony-low"));
    assert!(html.contains("by day or by night"));
    assert!(html.contains("<strong class=\"chorus-line\">Thou my best thought</strong>"));
}

#[test]
fn test_offsets() {
    assert_eq!(clamp_offset(9), 6);
    assert_eq!(clamp_offset(-9), -6);
    assert_eq!(describe_offset(clamp_offset(-20)), "-6 (♭♭♭♭♭♭)");
}

#[test]
fn test_folder_to_export_and_back() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Vision.md"), SONG).unwrap();
    std::fs::write(dir.path().join("Doxology.txt"), "`[G]` Praise").unwrap();

    let session = FolderSession::connect(dir.path()).unwrap();
    let mut state = AppState::default();
    state.apply(Command::AddSongs(session.sync().unwrap()));
    assert_eq!(state.all_songs.len(), 2);

    for song in state.all_songs.clone() {
        state.apply(Command::AddSongToCurrentSet(song));
    }
    state.apply(Command::SelectSong(1));
    state.apply(Command::TransposeCurrentSong(-2));

    let current = state.current_song().unwrap();
    assert_eq!(current.name, "Vision");
    let view = render_song(current, &DisplaySettings::light(), &TransposeOptions::default());
    assert!(view.contains("C Major"));

    let settings = DisplaySettingsState::default();
    let html = export_html(&state, &settings).unwrap();
    let restored = load_setlist(&html).unwrap();
    assert_eq!(restored, state);
    assert_eq!(restored.sets[0].songs[1].key_transposition, -2);
}

#[test]
fn test_imported_sources_are_independent_copies() {
    let mut state = AppState::default();
    state.apply(Command::AddSongs(vec![SongSource::new("A.md", "`[C]`")]));
    let song = state.all_songs[0].clone();
    state.apply(Command::AddSongToCurrentSet(song));
    state.apply(Command::SelectSong(0));
    state.apply(Command::TransposeCurrentSong(1));

    assert_eq!(state.sets[0].songs[0].key_transposition, 1);
    assert_eq!(state.all_songs[0].key_transposition, 0);
}
