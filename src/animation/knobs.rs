use std::collections::BTreeMap;

use crate::animation::metadata::MAX_FRAMES;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{MdlError, MdlResult};
use crate::script::command::Command;

/// Value used for a knob that no `vary` directive declares: multiplying by it is a no-op.
pub const NEUTRAL_KNOB_VALUE: f64 = 1.0;

/// Per-frame knob values built from every `vary` directive.
///
/// Each knob keeps two views: the governed track (`Some` only on frames covered by one of its
/// variations) and a held track used for lookups, where uncovered frames take the value of the
/// nearest earlier covered frame, or the first covered value before any range starts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KnobTimeline {
    governed: BTreeMap<String, Vec<Option<f64>>>,
    held: BTreeMap<String, Vec<f64>>,
}

impl KnobTimeline {
    /// Interpolate every `vary` directive over `num_frames` frames.
    ///
    /// Fails on the first variation whose range is non-increasing, reaches past the last frame,
    /// or overlaps a frame already governed by another variation of the same knob.
    pub fn build(commands: &[Command], num_frames: u64) -> MdlResult<Self> {
        if num_frames > MAX_FRAMES {
            return Err(MdlError::syntax(format!(
                "frame count {num_frames} exceeds the supported maximum of {MAX_FRAMES}"
            )));
        }
        let mut governed: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();

        for command in commands {
            let Command::Vary {
                knob,
                start_frame,
                end_frame,
                start_value,
                end_value,
            } = command
            else {
                continue;
            };
            let (start, end) = (*start_frame, *end_frame);

            if start >= end {
                return Err(MdlError::syntax(format!(
                    "non-increasing frame range for knob '{knob}': start frame {start} is not before end frame {end}"
                )));
            }
            if start < 0 {
                return Err(MdlError::syntax(format!(
                    "negative start frame {start} for knob '{knob}'"
                )));
            }
            if end as u64 >= num_frames {
                return Err(MdlError::syntax(format!(
                    "frame range exceeds declared frame count for knob '{knob}': end frame {end} is not below {num_frames}"
                )));
            }

            let track = governed
                .entry(knob.clone())
                .or_insert_with(|| vec![None; num_frames as usize]);
            let delta = (end_value - start_value) / (end - start) as f64;

            for i in start..=end {
                let slot = &mut track[i as usize];
                if slot.is_some() {
                    return Err(MdlError::syntax(format!(
                        "duplicate variation for frame {i} of knob '{knob}'"
                    )));
                }
                // Pin the endpoint so accumulated rounding never drifts from `end_value`.
                *slot = Some(if i == end {
                    *end_value
                } else {
                    start_value + delta * (i - start) as f64
                });
            }
        }

        let held = governed
            .iter()
            .map(|(name, track)| (name.clone(), hold_track(track)))
            .collect();

        Ok(Self {
            governed,
            held,
        })
    }

    /// Names of every declared knob, sorted.
    pub fn knob_names(&self) -> impl Iterator<Item = &str> {
        self.governed.keys().map(String::as_str)
    }

    /// Whether any `vary` directive declares `knob`.
    pub fn is_declared(&self, knob: &str) -> bool {
        self.governed.contains_key(knob)
    }

    /// Governed values of `knob`, one slot per frame (`None` where no variation applies).
    pub fn track(&self, knob: &str) -> Option<&[Option<f64>]> {
        self.governed.get(knob).map(Vec::as_slice)
    }

    /// Value a command referencing `knob` sees at `frame`.
    ///
    /// No knob, an undeclared knob, or a frame past the timeline yields [`NEUTRAL_KNOB_VALUE`].
    pub fn resolve(&self, knob: Option<&str>, frame: FrameIndex) -> f64 {
        knob.and_then(|k| self.held.get(k))
            .and_then(|track| track.get(frame.as_usize()).copied())
            .unwrap_or(NEUTRAL_KNOB_VALUE)
    }

    /// All declared knob values at `frame`.
    pub fn frame_values(&self, frame: FrameIndex) -> BTreeMap<&str, f64> {
        self.held
            .iter()
            .filter_map(|(name, track)| {
                track
                    .get(frame.as_usize())
                    .map(|v| (name.as_str(), *v))
            })
            .collect()
    }
}

fn hold_track(track: &[Option<f64>]) -> Vec<f64> {
    let first = track.iter().flatten().next().copied();
    let mut last = first;
    track
        .iter()
        .map(|slot| {
            if slot.is_some() {
                last = *slot;
            }
            last.unwrap_or(NEUTRAL_KNOB_VALUE)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/knobs.rs"]
mod tests;
