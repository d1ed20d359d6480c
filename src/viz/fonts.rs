//! Font resolution for the `ab_glyph` text path.
//!
//! `ab_glyph` only knows fonts that were registered with plotters. Each font file is
//! registered once, under its own family name; callers get that name back and pass
//! it into every text style explicitly.

use crate::error::{DotPlotError, Result};
use plotters::style::FontStyle;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use super::types::FontSource;

/// Probed in order by [`FontSource::Auto`]. Korean-capable faces first.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/Library/Fonts/AppleGothic.ttf",
    "C:\\Windows\\Fonts\\malgun.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
];

/// Font files seen so far → family name, or the reason plotters rejected them.
/// Rejections are kept so a bad file is not read and leaked again on retry.
static REGISTERED: OnceLock<Mutex<HashMap<PathBuf, std::result::Result<String, String>>>> =
    OnceLock::new();

/// Resolve a font source to a registered family name. `Ok(None)` means "draw no text".
pub fn resolve_family(source: &FontSource) -> Result<Option<String>> {
    match source {
        FontSource::Disabled => Ok(None),
        FontSource::File(path) => register_file(path).map(Some),
        FontSource::Auto => {
            for candidate in SYSTEM_FONT_CANDIDATES {
                let path = Path::new(candidate);
                if !path.is_file() {
                    continue;
                }
                match register_file(path) {
                    Ok(family) => return Ok(Some(family)),
                    Err(e) => log::debug!("skipping font candidate: {e}"),
                }
            }
            log::warn!("no usable system font found; rendering without text");
            Ok(None)
        }
    }
}

/// Register a font file (once per path) and return its family name.
pub fn register_file(path: &Path) -> Result<String> {
    let registry = REGISTERED.get_or_init(|| Mutex::new(HashMap::new()));
    let mut map = registry
        .lock()
        .map_err(|_| DotPlotError::Render("font registry lock poisoned".into()))?;
    let font_error = |reason: String| DotPlotError::Font {
        path: path.to_path_buf(),
        reason,
    };
    match map.get(path) {
        Some(Ok(family)) => return Ok(family.clone()),
        Some(Err(reason)) => return Err(font_error(reason.clone())),
        None => {}
    }

    let bytes = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;
    let family = format!("dotplot-font-{}", map.len());
    // Plotters keeps `&'static` font data; each path is leaked at most once.
    let data: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match plotters::style::register_font(&family, FontStyle::Normal, data) {
        Ok(()) => {
            log::info!("registered font {} as {family}", path.display());
            map.insert(path.to_path_buf(), Ok(family.clone()));
            Ok(family)
        }
        Err(e) => {
            let reason = std::any::type_name_of_val(&e).to_string();
            log::warn!("font {} rejected: {reason}", path.display());
            map.insert(path.to_path_buf(), Err(reason.clone()));
            Err(font_error(reason))
        }
    }
}

/// Whether `path` has been read before (registered or rejected).
#[cfg(test)]
fn is_cached(path: &Path) -> bool {
    REGISTERED
        .get()
        .and_then(|m| m.lock().ok().map(|m| m.contains_key(path)))
        .unwrap_or(false)
}
