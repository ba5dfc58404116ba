//! Music theory utilities for harmonic compatibility
//!
//! Provides key parsing and the circle-of-fifths distance used by both the
//! compatibility scorer and the transition analyzer. The lookup tables live
//! here so the two key scores can never disagree.

use std::fmt;

/// Circle-of-fifths position indexed by root semitone (0=C, 1=C#, ..., 11=B)
///
/// C=0, G=1, D=2, A=3, E=4, B=5, F#=6, C#=7, G#=8, D#=9, A#=10, F=11
pub static FIFTHS_POSITION: [u8; 12] = [0, 7, 2, 9, 4, 11, 6, 1, 8, 3, 10, 5];

/// Offset added to the fifths position of minor keys (positions 12-23)
pub const MINOR_OFFSET: u8 = 12;

/// Key compatibility by circle-of-fifths distance: (max distance, score)
static KEY_DISTANCE_SCORES: [(u8, f64); 4] = [(0, 1.0), (1, 0.8), (2, 0.6), (3, 0.4)];

/// Score for keys further apart than any entry in `KEY_DISTANCE_SCORES`
const DISTANT_KEY_SCORE: f64 = 0.2;

const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Musical key with root note and scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MusicalKey {
    /// Root note as semitone offset from C (0=C, 1=C#, 2=D, ..., 11=B)
    pub root: u8,
    /// true = minor, false = major
    pub minor: bool,
}

impl MusicalKey {
    /// C major, the key assumed when a track has none
    pub const C_MAJOR: Self = Self::new(0, false);

    pub const fn new(root: u8, minor: bool) -> Self {
        Self {
            root: root % 12,
            minor,
        }
    }

    /// Parse key string like "Am", "C#m", "F", "Bb", "Amin"
    ///
    /// Supported formats:
    /// - Single letter: C, D, E, F, G, A, B
    /// - With sharp: C#, D#, F#, G#, A#
    /// - With flat: Db, Eb, Gb, Ab, Bb
    /// - Minor suffix: Am, C#m, Bbm, Amin
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let mut chars = s.chars().peekable();

        let base_root = match chars.next()?.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };

        let root = match chars.peek() {
            Some('#') => {
                chars.next();
                (base_root + 1) % 12
            }
            Some('b') => {
                chars.next();
                (base_root + 11) % 12
            }
            _ => base_root,
        };

        let remaining: String = chars.collect::<String>().to_lowercase();
        let minor = match remaining.trim() {
            "" | "maj" | "major" => false,
            "m" | "min" | "minor" => true,
            _ => return None,
        };

        Some(Self { root, minor })
    }

    /// Position on the 24-slot circle of fifths (majors 0-11, minors 12-23)
    pub fn fifths_position(&self) -> u8 {
        let base = FIFTHS_POSITION[self.root as usize];
        if self.minor {
            base + MINOR_OFFSET
        } else {
            base
        }
    }

    /// Steps between two keys on the circle of fifths (0-6)
    ///
    /// The position difference is reduced on the 12-cycle, so a minor key
    /// and a major key are compared by their shared fifths ordering.
    pub fn fifths_distance(&self, other: &MusicalKey) -> u8 {
        let diff = self.fifths_position() as i16 - other.fifths_position() as i16;
        let r = diff.rem_euclid(12) as u8;
        r.min(12 - r)
    }
}

impl fmt::Display for MusicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let note = NOTE_NAMES[self.root as usize];
        if self.minor {
            write!(f, "{}m", note)
        } else {
            f.write_str(note)
        }
    }
}

/// Harmonic compatibility of two keys (0.2-1.0)
///
/// 1.0 for the same position, stepping down by 0.2 per fifth up to three
/// steps, 0.2 beyond that.
pub fn key_compatibility(a: &MusicalKey, b: &MusicalKey) -> f64 {
    let distance = a.fifths_distance(b);
    KEY_DISTANCE_SCORES
        .iter()
        .find(|(max, _)| distance <= *max)
        .map(|(_, score)| *score)
        .unwrap_or(DISTANT_KEY_SCORE)
}
