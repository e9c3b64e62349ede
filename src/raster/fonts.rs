use ab_glyph::FontVec;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Fonts tried, in order, when none is configured.  CJK-capable fonts come
/// first so that Chinese weekday headers render.
static SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/gnu-free/FreeSans.otf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// What a piece of card text is, for picking its font
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FontRole {
    Title,
    Weekday,
    Date,
}

/// Font files to use.  Roles without a path of their own fall back to
/// `default`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FontPaths {
    pub default: Option<PathBuf>,
    pub title: Option<PathBuf>,
    pub weekday: Option<PathBuf>,
    pub date: Option<PathBuf>,
}

/// A set of fully loaded fonts.
///
/// Holding a `FontSet` means every font it names has been read and parsed,
/// so layout and painting always see the same metrics.
#[derive(Clone)]
pub struct FontSet {
    default: Option<Arc<FontVec>>,
    title: Option<Arc<FontVec>>,
    weekday: Option<Arc<FontVec>>,
    date: Option<Arc<FontVec>>,
}

impl FontSet {
    /// Loads every configured font; when no default is configured, the
    /// first readable system font is used
    pub fn load(paths: &FontPaths) -> Result<FontSet, FontError> {
        let default = match &paths.default {
            Some(p) => load_font(p)?,
            None => discover()?,
        };
        let role = |p: &Option<PathBuf>| p.as_deref().map(load_font).transpose();
        Ok(FontSet {
            default: Some(Arc::new(default)),
            title: role(&paths.title)?.map(Arc::new),
            weekday: role(&paths.weekday)?.map(Arc::new),
            date: role(&paths.date)?.map(Arc::new),
        })
    }

    /// A font set with no fonts; text is skipped and only shapes render
    pub fn none() -> FontSet {
        FontSet {
            default: None,
            title: None,
            weekday: None,
            date: None,
        }
    }

    pub fn get(&self, role: FontRole) -> Option<&FontVec> {
        let specific = match role {
            FontRole::Title => &self.title,
            FontRole::Weekday => &self.weekday,
            FontRole::Date => &self.date,
        };
        specific.as_ref().or(self.default.as_ref()).map(|f| &**f)
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none()
    }
}

impl fmt::Debug for FontSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSet")
            .field("default", &self.default.is_some())
            .field("title", &self.title.is_some())
            .field("weekday", &self.weekday.is_some())
            .field("date", &self.date.is_some())
            .finish()
    }
}

fn load_font(path: &Path) -> Result<FontVec, FontError> {
    let data = read_file(path)?;
    let font = FontVec::try_from_vec(data).map_err(|_| FontError::Invalid(path.to_owned()))?;
    info!(path = %path.display(), "loaded font");
    Ok(font)
}

fn read_file(path: &Path) -> Result<Vec<u8>, FontError> {
    std::fs::read(path).map_err(|source| FontError::Read {
        path: path.to_owned(),
        source,
    })
}

fn discover() -> Result<FontVec, FontError> {
    for candidate in SYSTEM_FONTS {
        let path = Path::new(candidate);
        if !path.is_file() {
            continue;
        }
        match load_font(path) {
            Ok(font) => return Ok(font),
            Err(e) => debug!(error = %e, "skipping system font"),
        }
    }
    Err(FontError::NotFound)
}

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file {}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is not a usable TrueType/OpenType font", .0.display())]
    Invalid(PathBuf),
    #[error("no usable system font found; pass one with --font")]
    NotFound,
}
