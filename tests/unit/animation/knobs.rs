use super::*;
use crate::script::Script;

fn timeline(src: &str, num_frames: u64) -> MdlResult<KnobTimeline> {
    KnobTimeline::build(&Script::parse(src).unwrap().commands, num_frames)
}

#[test]
fn five_frames_zero_to_hundred() {
    let t = timeline("vary k 0 4 0 100", 5).unwrap();
    let values: Vec<f64> = t.track("k").unwrap().iter().map(|v| v.unwrap()).collect();
    assert_eq!(values, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
}

#[test]
fn endpoints_are_exact_and_steps_are_uniform() {
    for (start, end, a, b) in [
        (0i64, 2i64, 0.1, 0.7),
        (3, 10, 1.0, -1.0),
        (1, 8, 0.3, 1.9),
        (0, 99, 0.0, 1.0),
    ] {
        let src = format!("vary k {start} {end} {a} {b}");
        let t = timeline(&src, 100).unwrap();
        let track = t.track("k").unwrap();
        assert_eq!(track[start as usize], Some(a));
        assert_eq!(track[end as usize], Some(b));

        let step = (b - a) / (end - start) as f64;
        for i in start..end {
            let cur = track[i as usize].unwrap();
            let next = track[i as usize + 1].unwrap();
            assert!(((next - cur) - step).abs() < 1e-9, "{src} at {i}");
        }
    }
}

#[test]
fn non_increasing_range_is_rejected() {
    for src in ["vary k 3 3 0 1", "vary k 4 2 0 1"] {
        let err = timeline(src, 10).unwrap_err();
        assert!(matches!(err, MdlError::Syntax(_)));
        assert!(err.to_string().contains("non-increasing frame range"));
    }
}

#[test]
fn range_past_last_frame_is_rejected() {
    let err = timeline("vary k 0 5 0 1", 5).unwrap_err();
    assert!(err.to_string().contains("exceeds declared frame count"));
    assert!(timeline("vary k 0 4 0 1", 5).is_ok());
}

#[test]
fn overlapping_ranges_fail_at_first_shared_frame() {
    let err = timeline("vary k 0 5 0 1 vary k 3 8 1 2", 10).unwrap_err();
    assert!(matches!(err, MdlError::Syntax(_)));
    assert!(err.to_string().contains("duplicate variation for frame 3 of knob 'k'"));
}

#[test]
fn different_knobs_may_share_frames() {
    let t = timeline("vary a 0 3 0 3 vary b 0 3 3 0", 4).unwrap();
    assert_eq!(t.knob_names().collect::<Vec<_>>(), vec!["a", "b"]);
    let vals = t.frame_values(FrameIndex(1));
    assert_eq!(vals.get("a"), Some(&1.0));
    assert_eq!(vals.get("b"), Some(&2.0));
}

#[test]
fn adjacent_ranges_chain() {
    let t = timeline("vary k 0 2 0 2 vary k 3 5 10 20", 6).unwrap();
    let track = t.track("k").unwrap();
    assert!(track.iter().all(Option::is_some));
    assert_eq!(track[3], Some(10.0));
}

#[test]
fn undeclared_knob_resolves_to_neutral() {
    let t = timeline("vary k 0 1 5 6", 2).unwrap();
    assert_eq!(t.resolve(Some("other"), FrameIndex(0)), NEUTRAL_KNOB_VALUE);
    assert_eq!(t.resolve(None, FrameIndex(1)), NEUTRAL_KNOB_VALUE);
    assert!(!t.is_declared("other"));
}

#[test]
fn uncovered_frames_hold_nearest_governed_value() {
    let t = timeline("vary k 2 4 10 30", 8).unwrap();
    let track = t.track("k").unwrap();
    assert_eq!(track[0], None);
    assert_eq!(track[6], None);

    assert_eq!(t.resolve(Some("k"), FrameIndex(0)), 10.0);
    assert_eq!(t.resolve(Some("k"), FrameIndex(3)), 20.0);
    assert_eq!(t.resolve(Some("k"), FrameIndex(7)), 30.0);
}

#[test]
fn no_variations_builds_empty_timeline() {
    let t = timeline("sphere 0 0 0 1", 3).unwrap();
    assert_eq!(t.knob_names().count(), 0);
    assert!(t.frame_values(FrameIndex(0)).is_empty());
}

#[test]
fn oversized_frame_count_is_rejected_before_allocating() {
    let err = timeline("vary k 0 1 0 1", MAX_FRAMES + 1).unwrap_err();
    assert!(matches!(err, MdlError::Syntax(_)));
}
