use super::*;
use crate::foundation::core::{Canvas, Rgb8};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mdlrender-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn target(color: Rgb8) -> DrawTarget {
    let mut t = DrawTarget::new(
        Canvas {
            width: 4,
            height: 3,
        },
        Rgb8::BLACK,
    );
    t.plot(0, 0, 0.0, color);
    t
}

#[test]
fn unknown_extensions_fall_back_to_png() {
    assert_eq!(
        resolve_image_path(Path::new("out/a.png")),
        (PathBuf::from("out/a.png"), ImageFormat::Png)
    );
    assert_eq!(
        resolve_image_path(Path::new("b.gif")),
        (PathBuf::from("b.gif"), ImageFormat::Gif)
    );
    assert_eq!(
        resolve_image_path(Path::new("noext")),
        (PathBuf::from("noext.png"), ImageFormat::Png)
    );
    assert_eq!(
        resolve_image_path(Path::new("c.weird")),
        (PathBuf::from("c.weird.png"), ImageFormat::Png)
    );
}

#[test]
fn save_frame_writes_png_with_bottom_left_origin() {
    let dir = scratch_dir("save");
    let mut sink = FileSink::new(&dir, 17);
    let written = sink
        .save_frame(&target(Rgb8::new(200, 10, 20)), &dir.join("nested/frame"))
        .unwrap();
    assert_eq!(written, dir.join("nested/frame.png"));

    let img = image::open(&written).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (4, 3));
    // (0, 0) in target space is the bottom-left pixel, i.e. the last image row.
    assert_eq!(img.get_pixel(0, 2).0, [200, 10, 20]);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn assemble_animation_writes_gif() {
    let dir = scratch_dir("gif");
    let mut sink = FileSink::new(dir.join("anims"), 17);
    let mut frames = Vec::new();
    for (i, c) in [Rgb8::WHITE, Rgb8::new(255, 0, 0)].into_iter().enumerate() {
        let p = dir.join(format!("frames/f{i:03}.png"));
        frames.push(sink.save_frame(&target(c), &p).unwrap());
    }

    let out = sink.assemble_animation("loop", &frames).unwrap();
    assert_eq!(out, dir.join("anims/loop.gif"));
    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn assembling_nothing_is_an_error() {
    let mut sink = FileSink::new(std::env::temp_dir(), 17);
    assert!(matches!(
        sink.assemble_animation("empty", &[]),
        Err(MdlError::Output(_))
    ));
}
