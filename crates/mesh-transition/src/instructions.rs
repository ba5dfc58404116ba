//! Human-readable mixing instructions
//!
//! Renders a [`TransitionAnalysis`] as an ordered list of directives for the
//! DJ. No scoring happens here; every decision comes from the analysis.

use crate::features::FeatureVector;
use crate::transition::{TransitionAnalysis, TransitionType};

/// Only line emitted when no transition point was found
pub const NO_POINTS_MESSAGE: &str =
    "No optimal transition points found - mix manually on a phrase boundary";

const KEY_MATCH_THRESHOLD: f64 = 0.7;
const KEY_CLASH_THRESHOLD: f64 = 0.4;
const BPM_ADJUST_THRESHOLD: f64 = 5.0;
const ENERGY_MATCH_THRESHOLD: f64 = 0.8;
const ENERGY_CLASH_THRESHOLD: f64 = 0.3;

/// Confidence label: High (>= 0.8), Medium (>= 0.5) or Low
pub fn confidence_label(confidence: f64) -> &'static str {
    if confidence >= 0.8 {
        "High"
    } else if confidence >= 0.5 {
        "Medium"
    } else {
        "Low"
    }
}

/// Format seconds as M:SS
pub fn format_timecode(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

fn technique_directive(analysis: &TransitionAnalysis, from: &FeatureVector) -> String {
    match analysis.transition_type {
        TransitionType::Beatmatch => format!(
            "Beatmatch: sync the incoming track to {:.1} BPM and blend over {:.0} seconds",
            from.tempo_bpm(),
            analysis.recommended_length
        ),
        TransitionType::EchoOut => {
            "Echo out: throw an echo on the outgoing track and drop the incoming track on the next downbeat"
                .to_string()
        }
        TransitionType::FilterFade => format!(
            "Filter fade: sweep a high-pass filter over the outgoing track while fading in over {:.0} seconds",
            analysis.recommended_length
        ),
        TransitionType::QuickCut => {
            "Quick cut: switch tracks on the phrase boundary with no overlap".to_string()
        }
    }
}

/// Render `analysis` for a mix from `from` into `to`
///
/// With no transition points the fallback message is the only line.
pub fn format_instructions(
    analysis: &TransitionAnalysis,
    from: &FeatureVector,
    to: &FeatureVector,
) -> Vec<String> {
    let Some(best) = analysis.best_point() else {
        return vec![NO_POINTS_MESSAGE.to_string()];
    };

    let mut lines = vec![format!(
        "Cue out at {} in the outgoing track, bring in the incoming track from {}",
        format_timecode(best.from_track_time),
        format_timecode(best.to_track_time)
    )];

    lines.push(technique_directive(analysis, from));

    if analysis.key_compatibility_score > KEY_MATCH_THRESHOLD {
        lines.push(format!(
            "Keys {} and {} are harmonically compatible",
            from.key(),
            to.key()
        ));
    } else if analysis.key_compatibility_score < KEY_CLASH_THRESHOLD {
        lines.push(format!(
            "Keys {} and {} clash - keep the overlap short or cut the mids",
            from.key(),
            to.key()
        ));
    }

    let bpm_diff = to.tempo_bpm() - from.tempo_bpm();
    if bpm_diff.abs() > BPM_ADJUST_THRESHOLD {
        lines.push(format!(
            "Adjust tempo: {:.1} BPM into {:.1} BPM ({:+.1} BPM)",
            from.tempo_bpm(),
            to.tempo_bpm(),
            bpm_diff
        ));
    }

    if analysis.energy_match_score > ENERGY_MATCH_THRESHOLD {
        lines.push(format!(
            "Energy flows smoothly ({:.2} to {:.2})",
            from.energy(),
            to.energy()
        ));
    } else if analysis.energy_match_score < ENERGY_CLASH_THRESHOLD {
        lines.push(format!(
            "Large energy change ({:.2} to {:.2}) - ride the volume and EQ through the blend",
            from.energy(),
            to.energy()
        ));
    }

    lines.push(format!(
        "Confidence: {} ({:.0}%)",
        confidence_label(analysis.confidence),
        analysis.confidence * 100.0
    ));

    lines
}
