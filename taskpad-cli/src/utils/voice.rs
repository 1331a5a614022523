//! Voice notes are stored as `data:` URLs so any audio player can read them.

use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub fn encode_voice_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Could not read voice note {}", path.display()))?;

    Ok(encode_voice(&bytes, mime_for(path)))
}

fn encode_voice(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("ogg") | Some("oga") | Some("opus") => "audio/ogg",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") | Some("mp4") => "audio/mp4",
        _ => "audio/webm",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_as_data_url() {
        assert_eq!(encode_voice(b"abc", "audio/webm"), "data:audio/webm;base64,YWJj");
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for(Path::new("note.MP3")), "audio/mpeg");
        assert_eq!(mime_for(Path::new("note.ogg")), "audio/ogg");
        assert_eq!(mime_for(Path::new("note")), "audio/webm");
    }

    #[test]
    fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo.wav");
        std::fs::write(&path, b"abc").unwrap();

        assert_eq!(encode_voice_file(&path).unwrap(), "data:audio/wav;base64,YWJj");
        assert!(encode_voice_file(&dir.path().join("missing.wav")).is_err());
    }
}
