//! End-to-end capture through the public API with stand-in collaborators.

use std::fs;

use chrono::NaiveDate;
use selfie_core::{
    Camera, CameraError, Clipboard, ClipboardError, CopyPathStyle, CopyPayload, CopyStyle,
    FileType, ImageFrame, JsonFileStore, PreferenceStore, Preferences, Session,
};

struct StillCamera(ImageFrame);

impl Camera for StillCamera {
    fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.0.width, self.0.height))
    }

    fn capture(&mut self) -> Result<ImageFrame, CameraError> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
struct LastPayload(Option<CopyPayload>);

impl Clipboard for LastPayload {
    fn write(&mut self, payload: &CopyPayload) -> Result<(), ClipboardError> {
        self.0 = Some(payload.clone());
        Ok(())
    }
}

/// Left half black, right half white.
fn half_and_half(width: u32, height: u32) -> ImageFrame {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..height {
        for x in 0..width {
            let v = if x < width / 2 { 0 } else { 255 };
            pixels.extend_from_slice(&[v, v, v]);
        }
    }
    ImageFrame::new(width, height, pixels)
}

#[test]
fn stored_preferences_drive_a_mirrored_png_capture() {
    let dir = tempfile::tempdir().unwrap();
    let shots = dir.path().join("shots");
    fs::create_dir(&shots).unwrap();

    let store = JsonFileStore::new(dir.path().join("prefs.json"));
    let mut prefs = Preferences::new();
    prefs.set_width(200);
    prefs.set_height(100);
    prefs.set_flip_x(true);
    prefs.set_file_name("'me'-yyyyMMdd");
    prefs.set_file_type(FileType::Png);
    prefs.set_save_folder(&shots.to_string_lossy());
    prefs.set_copy_style(CopyStyle::PathText);
    prefs.set_copy_path_style(CopyPathStyle::HtmlImage);
    prefs.set_path_root(&dir.path().join("site").to_string_lossy());
    store.save(&prefs).unwrap();

    let prefs = store.load().unwrap();
    let mut session = Session::new(
        StillCamera(half_and_half(400, 300)),
        LastPayload::default(),
        prefs,
    );
    let at = NaiveDate::from_ymd_opt(2023, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 0)
        .unwrap();
    let saved = session.capture_at(&at).unwrap().unwrap();

    assert_eq!(saved.path, shots.join("me-20231231.png"));
    assert_eq!(
        saved.payload,
        CopyPayload::Text(r#"<img alt="me-20231231" src="../shots/me-20231231.png">"#.into())
    );

    let img = image::open(&saved.path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (200, 100));
    // Mirrored: the white half is now on the left
    assert_eq!(img.get_pixel(10, 50).0, [255, 255, 255]);
    assert_eq!(img.get_pixel(190, 50).0, [0, 0, 0]);

    let (_, clipboard, _) = session.into_parts();
    assert_eq!(clipboard.0, Some(saved.payload));
}

#[test]
fn file_reference_copy_uses_file_url() {
    let dir = tempfile::tempdir().unwrap();
    let mut prefs = Preferences::new();
    prefs.set_copy_style(CopyStyle::FileReference);

    let path = dir.path().join("plain.jpg");
    let mut session = Session::new(
        StillCamera(half_and_half(128, 96)),
        LastPayload::default(),
        prefs,
    );
    let saved = session.capture_to(&path).unwrap().unwrap();

    match saved.payload {
        CopyPayload::FileUrl(url) => {
            assert!(url.starts_with("file:///"));
            assert!(url.ends_with("/plain.jpg"));
        }
        other => panic!("unexpected payload {other:?}"),
    }
    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
}
