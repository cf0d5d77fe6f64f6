//! Frame-cursor driver shared by fighters and Stands.
//!
//! One call per tick. The cursor moves once every `clip.speed` ticks, and the
//! playback policy decides where it goes at the end of the range.

use standoff_core::archetype::ActionClip;
use standoff_core::enums::Playback;
use standoff_core::types::FrameRange;

/// World facts the position-gated and freeze policies depend on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gate {
    pub jump_loop: Option<FrameRange>,
    /// Above the airborne threshold.
    pub airborne: bool,
    /// On (or below) the ground line.
    pub grounded: bool,
    pub freeze_frame: Option<u16>,
    /// The freeze-to-point clip's button is still held.
    pub held: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Playing,
    /// A one-shot (or released freeze, or landed jump) ran past its last frame.
    Complete,
}

/// Advance `frame` within `clip` by one tick.
pub fn advance(
    clip: &ActionClip,
    playback: Playback,
    frame: &mut u16,
    hold: &mut u16,
    gate: &Gate,
) -> Step {
    *hold += 1;
    if *hold < clip.speed {
        return Step::Playing;
    }
    *hold = 0;

    let FrameRange { start, end } = clip.frames;
    match playback {
        Playback::Loop => {
            *frame = if *frame >= end { start } else { *frame + 1 };
            Step::Playing
        }
        Playback::OneShot => finish_toward(frame, end),
        Playback::Hold => {
            if *frame < end {
                *frame += 1;
            }
            Step::Playing
        }
        Playback::FreezeToPoint => {
            if gate.held {
                let stop = gate.freeze_frame.unwrap_or(end).min(end);
                if *frame < stop {
                    *frame += 1;
                }
                Step::Playing
            } else {
                finish_toward(frame, end)
            }
        }
        Playback::PositionGated => match gate.jump_loop {
            Some(range) if *frame < range.start => {
                *frame += 1;
                Step::Playing
            }
            Some(range) if gate.airborne => {
                *frame = if *frame >= range.end {
                    range.start
                } else {
                    *frame + 1
                };
                Step::Playing
            }
            Some(_) if gate.grounded => finish_toward(frame, end),
            // Between the ground and the threshold: hold.
            Some(_) => Step::Playing,
            // Without a loop the landing itself ends the jump.
            None => {
                if *frame < end {
                    *frame += 1;
                }
                Step::Playing
            }
        },
    }
}

fn finish_toward(frame: &mut u16, end: u16) -> Step {
    if *frame < end {
        *frame += 1;
        Step::Playing
    } else {
        Step::Complete
    }
}
