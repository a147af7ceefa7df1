//! Optional HUD font
//!
//! The font only gates HUD text. Missing or unreadable fonts are not
//! fatal: the game runs with every non-text visual intact.

use color_eyre::{Result, eyre::WrapErr, eyre::eyre};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// sfnt/collection/web font signatures
const FONT_MAGIC: [[u8; 4]; 6] = [
    [0x00, 0x01, 0x00, 0x00],
    *b"OTTO",
    *b"true",
    *b"ttcf",
    *b"wOFF",
    *b"wOF2",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudFont {
    pub path: PathBuf,
}

impl HudFont {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file =
            File::open(path).wrap_err_with(|| format!("opening font {}", path.display()))?;
        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)
            .wrap_err_with(|| format!("reading font header of {}", path.display()))?;
        check_magic(&magic)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

fn check_magic(magic: &[u8; 4]) -> Result<()> {
    if FONT_MAGIC.contains(magic) {
        Ok(())
    } else {
        Err(eyre!("not a font file (header {:02x?})", magic))
    }
}

/// Load the HUD font, logging and swallowing any failure
pub fn load_hud_font(path: &Path) -> Option<HudFont> {
    match HudFont::load(path) {
        Ok(font) => {
            log::info!("HUD font loaded from {}", font.path.display());
            Some(font)
        }
        Err(err) => {
            log::warn!("HUD text disabled: {err:#}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "neon-assault-{}-{}",
            std::process::id(),
            name
        ));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_missing_font_is_none() {
        assert!(load_hud_font(Path::new("/definitely/not/here.ttf")).is_none());
    }

    #[test]
    fn test_truetype_header_accepted() {
        let path = temp_file("ok.ttf", &[0x00, 0x01, 0x00, 0x00, 0x00, 0x10]);
        let font = HudFont::load(&path).unwrap();
        assert_eq!(font.path, path);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_non_font_rejected() {
        let path = temp_file("bad.ttf", b"hello world");
        assert!(HudFont::load(&path).is_err());
        assert!(load_hud_font(&path).is_none());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_truncated_font_rejected() {
        let path = temp_file("short.ttf", b"OT");
        assert!(HudFont::load(&path).is_err());
        std::fs::remove_file(path).unwrap();
    }
}
