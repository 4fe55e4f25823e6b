use crate::Surface;
use facecube_common::Rgb;
use usvg::{Options, fontdb};

const FACE_TEMPLATE_SVG: &str = include_str!("face_template.svg");

/// Family name of the embedded font. System fonts are never consulted.
const FONT_FAMILY: &str = "Hack";

pub const FONT_SIZE_PX: f32 = 40.0;

/// How a face label is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureMode {
    /// 256x256, face color background, white ink, text only when shown.
    Reveal { show_text: bool },
    /// 256x512, white background, black ink, text whenever non-empty.
    Label,
}

impl TextureMode {
    pub fn size(self) -> (u32, u32) {
        match self {
            TextureMode::Reveal { .. } => (256, 256),
            TextureMode::Label => (256, 512),
        }
    }
}

/// Errors from rasterizing or exporting a surface.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("svg layout failed: {0}")]
    Layout(#[from] usvg::Error),
    #[error("cannot allocate a {width}x{height} bitmap")]
    Allocation { width: u32, height: u32 },
    #[error("png encoding failed: {0}")]
    Encode(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns (text, background, mode) into a fresh [`Surface`].
///
/// Holds the font database so repeated synthesis does not reload fonts.
pub struct TextureSynthesizer {
    fontdb: fontdb::Database,
}

impl TextureSynthesizer {
    pub fn new() -> Self {
        let mut fontdb = fontdb::Database::new();
        fontdb.load_font_data(epaint_default_fonts::HACK_REGULAR.to_vec());
        fontdb.set_sans_serif_family(FONT_FAMILY);
        fontdb.set_monospace_family(FONT_FAMILY);
        Self { fontdb }
    }

    /// Rasterize a face. Never fails: if layout breaks, the surface is
    /// background only and a warning is logged.
    pub fn synthesize(&self, text: &str, background: Rgb, mode: TextureMode) -> Surface {
        match self.try_synthesize(text, background, mode) {
            Ok(surface) => surface,
            Err(e) => {
                tracing::warn!("face rasterization degraded to background: {e}");
                let (width, height) = mode.size();
                let [r, g, b] = paper(background, mode).to_array();
                let pixels = [r, g, b, 255]
                    .into_iter()
                    .cycle()
                    .take((width * height * 4) as usize)
                    .collect();
                Surface::from_rgba(width, height, pixels)
            }
        }
    }

    pub fn try_synthesize(
        &self,
        text: &str,
        background: Rgb,
        mode: TextureMode,
    ) -> Result<Surface, TextureError> {
        let (width, height) = mode.size();
        let svg = face_svg(text, background, mode);

        let mut opt = Options::default();
        opt.font_family = FONT_FAMILY.into();
        opt.font_size = FONT_SIZE_PX;
        opt.languages = vec!["en".into()];
        let tree = usvg::Tree::from_data(svg.as_bytes(), &opt, &self.fontdb)?;

        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(TextureError::Allocation { width, height })?;
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        tracing::debug!(
            width,
            height,
            chars = text.chars().count(),
            ?mode,
            "synthesized face surface"
        );
        Ok(Surface::from_rgba(width, height, pixmap.take()))
    }
}

impl Default for TextureSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

fn paper(background: Rgb, mode: TextureMode) -> Rgb {
    match mode {
        TextureMode::Reveal { .. } => background,
        TextureMode::Label => Rgb::WHITE,
    }
}

fn ink(mode: TextureMode) -> Rgb {
    match mode {
        TextureMode::Reveal { .. } => Rgb::WHITE,
        TextureMode::Label => Rgb::BLACK,
    }
}

fn shows_text(text: &str, mode: TextureMode) -> bool {
    match mode {
        TextureMode::Reveal { show_text } => show_text,
        TextureMode::Label => !text.is_empty(),
    }
}

fn face_svg(text: &str, background: Rgb, mode: TextureMode) -> String {
    let (width, height) = mode.size();
    let text_element = if shows_text(text, mode) {
        format!(
            r#"<text x="{cx}" y="{cy}" font-family="{FONT_FAMILY}" font-size="{FONT_SIZE_PX}" fill="{fill}" text-anchor="middle" dominant-baseline="central" xml:space="preserve">{label}</text>"#,
            cx = width / 2,
            cy = height / 2,
            fill = ink(mode).to_hex(),
            label = escape_xml(text),
        )
    } else {
        String::new()
    };
    FACE_TEMPLATE_SVG
        .replace("{{WIDTH}}", &width.to_string())
        .replace("{{HEIGHT}}", &height.to_string())
        .replace("{{BACKGROUND_COLOR}}", &paper(background, mode).to_hex())
        .replace("{{TEXT}}", &text_element)
}

/// Escape text content so user input cannot alter the document.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if !is_xml_char(c) || (c.is_control() && !c.is_whitespace()) => {}
            c => out.push(c),
        }
    }
    out
}

/// The XML 1.0 `Char` production. Anything else fails the whole parse.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}
