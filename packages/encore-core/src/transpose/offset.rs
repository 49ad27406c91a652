/// Lowest semitone offset a song may carry.
pub const MIN_OFFSET: i32 = -6;
/// Highest semitone offset a song may carry.
pub const MAX_OFFSET: i32 = 6;

/// Clamp a requested offset into the song range `[-6, 6]`.
///
/// Out-of-range requests are corrected, never rejected.
pub fn clamp_offset(semitones: i32) -> i32 {
    semitones.clamp(MIN_OFFSET, MAX_OFFSET)
}

/// Human-readable label for an offset: `Original`, `+2 (♯♯)`, `-3 (♭♭♭)`.
///
/// The glyph run never grows past the song range; larger offsets keep their
/// number but show six glyphs.
pub fn describe_offset(semitones: i32) -> String {
    let glyphs = clamp_offset(semitones).unsigned_abs() as usize;
    match semitones {
        0 => "Original".to_string(),
        n if n > 0 => format!("+{} ({})", n, "♯".repeat(glyphs)),
        n => format!("{} ({})", n, "♭".repeat(glyphs)),
    }
}
