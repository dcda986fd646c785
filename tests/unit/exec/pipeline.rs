use super::*;
use crate::encode::sink::{InMemorySink, SinkEvent};

fn config() -> RenderConfig {
    RenderConfig {
        width: 24,
        height: 24,
        step_3d: 8,
        ..RenderConfig::default()
    }
}

#[test]
fn threading_defaults_and_validation() {
    let t = RenderThreading::default();
    assert!(!t.parallel);
    assert_eq!(t.threads, None);
    assert_eq!(t.chunk_size, 16);
    t.validate().unwrap();

    let bad = RenderThreading {
        threads: Some(0),
        ..RenderThreading::default()
    };
    assert!(matches!(bad.validate(), Err(MdlError::Validation(_))));
}

#[test]
fn analyze_resolves_metadata_and_knobs() {
    let script = Script::parse("frames 4\nbasename spin\nvary k 0 3 0 1\nmove 1 0 0 k\n").unwrap();
    let a = analyze(&script).unwrap();
    assert_eq!(a.metadata.base_name, "spin");
    assert_eq!(a.metadata.num_frames, 4);
    assert!(a.knobs.is_declared("k"));
    assert_eq!(a.knobs.resolve(Some("k"), FrameIndex(3)), 1.0);
}

#[test]
fn analyze_rejects_undefined_material_before_rendering() {
    let script = Script::parse("sphere shiny 0 0 0 5\n").unwrap();
    let err = analyze(&script).unwrap_err();
    assert!(matches!(err, MdlError::Syntax(_)));
    assert!(err.to_string().contains("undefined constants 'shiny'"));

    let mut sink = InMemorySink::new();
    assert!(render_script(&script, &config(), &mut sink).is_err());
    assert!(sink.events.is_empty());
}

#[test]
fn analyze_rejects_unbalanced_pop() {
    let script = Script::parse("push\npop\nmove 1 1 1\npop\n").unwrap();
    let err = analyze(&script).unwrap_err();
    assert!(matches!(
        err,
        MdlError::StackUnderflow {
            frame: 0,
            command: 3
        }
    ));
}

#[test]
fn dangling_vary_fails_with_zero_frames_rendered() {
    let script = Script::parse("vary k 0 3 0 1\nbox 0 0 0 1 1 1\n").unwrap();
    let mut sink = InMemorySink::new();
    let err = render_script(&script, &config(), &mut sink).unwrap_err();
    assert!(matches!(err, MdlError::Syntax(_)));
    assert!(sink.events.is_empty());
}

#[test]
fn animation_saves_every_frame_then_assembles_once() {
    let script =
        Script::parse("frames 3\nbasename orbit\nvary k 0 2 0 10\nmove 1 0 0 k\nline 2 2 0 2 2 0\n")
            .unwrap();
    let mut sink = InMemorySink::new();
    let stats = render_script(&script, &config(), &mut sink).unwrap();

    assert_eq!(stats.frames_rendered, 3);
    assert_eq!(stats.images_saved, 3);
    assert_eq!(stats.animation, Some(PathBuf::from("orbit.gif")));
    assert_eq!(sink.events.len(), 4);
    match sink.events.last() {
        Some(SinkEvent::Assembled { base_name, frames }) => {
            assert_eq!(base_name, "orbit");
            assert_eq!(frames.len(), 3);
        }
        other => panic!("unexpected last event {other:?}"),
    }
}

#[test]
fn parallel_and_sequential_renders_match() {
    let src = "frames 7\nbasename p\nvary r 0 6 0 1\nmove 12 12 0\nrotate y 360 r\n\
               torus 0 0 0 2 6\nline -10 -10 0 10 10 0\n";
    let script = Script::parse(src).unwrap();

    let mut seq = InMemorySink::new();
    render_script(&script, &config(), &mut seq).unwrap();

    let mut cfg = config();
    cfg.threading = RenderThreading {
        parallel: true,
        threads: Some(3),
        chunk_size: 2,
    };
    let mut par = InMemorySink::new();
    render_script(&script, &cfg, &mut par).unwrap();

    assert_eq!(seq.events, par.events);
}

#[test]
fn zero_chunk_size_is_treated_as_one() {
    assert_eq!(normalized_chunk_size(0), 1);
    assert_eq!(normalized_chunk_size(5), 5);
}
