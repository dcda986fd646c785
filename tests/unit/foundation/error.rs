use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(MdlError::syntax("x").to_string().contains("syntax error:"));
    assert!(MdlError::parse("x").to_string().contains("parse error:"));
    assert!(
        MdlError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(MdlError::output("x").to_string().contains("output error:"));
}

#[test]
fn stack_underflow_names_frame_and_command() {
    let msg = MdlError::StackUnderflow {
        frame: 3,
        command: 7,
    }
    .to_string();
    assert!(msg.contains("frame 3"));
    assert!(msg.contains("#7"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MdlError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
