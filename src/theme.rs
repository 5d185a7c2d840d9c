//! Piece visuals: the hero identity of each chess kind, the vector art it
//! is drawn with, and constructors for the widget shapes the view embeds.
//! Everything here is stateless; a kind missing from the registry simply
//! renders nothing.

use iced::widget::svg::{Handle, Svg};
use iced::widget::{container, text, Column, Container};
use iced::{Alignment, Border, Color, Element, Length, Pixels, Theme};
use once_cell::sync::Lazy;

use rules::types::{Kind, Piece, Side};

/// Display identity of a piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hero {
    pub name: &'static str,
    pub abbr: &'static str,
}

static HEROES: &[(Kind, Hero)] = &[
    (Kind::King, Hero { name: "Iron Man", abbr: "IM" }),
    (Kind::Queen, Hero { name: "Spider-Man", abbr: "SP" }),
    (Kind::Bishop, Hero { name: "Black Panther", abbr: "BP" }),
    (Kind::Knight, Hero { name: "Captain America", abbr: "CA" }),
    (Kind::Rook, Hero { name: "Rhino", abbr: "RH" }),
    (Kind::Pawn, Hero { name: "Green Goblin", abbr: "GG" }),
];

/// Registry lookup. `None` when no hero is registered for the kind.
pub fn hero(kind: Kind) -> Option<Hero> {
    HEROES.iter().find(|(k, _)| *k == kind).map(|(_, h)| *h)
}

// --- Hand-drawn head portraits, one per kind ---

// Iron Man: red and gold helmet with glowing eyes.
const KING_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">
    <!-- Helmet base -->
    <ellipse cx="32" cy="34" rx="22" ry="26" fill="#b71c1c"/>
    <!-- Gold faceplate -->
    <path d="M16 28 Q18 18 32 14 Q46 18 48 28 L46 44 Q40 50 32 52 Q24 50 18 44 Z" fill="#ffd600"/>
    <!-- Red helmet top -->
    <path d="M18 28 Q20 16 32 12 Q44 16 46 28 L42 26 Q38 20 32 18 Q26 20 22 26 Z" fill="#d32f2f"/>
    <!-- Eyes -->
    <path d="M21 30 L28 28 L29 34 L22 35 Z" fill="#e3f2fd" opacity="0.95"/>
    <path d="M43 30 L36 28 L35 34 L42 35 Z" fill="#e3f2fd" opacity="0.95"/>
    <!-- Eye glow -->
    <path d="M22 31 L27 29 L28 33 L23 34 Z" fill="#90caf9"/>
    <path d="M42 31 L37 29 L36 33 L41 34 Z" fill="#90caf9"/>
    <!-- Mouth slit -->
    <rect x="26" y="40" width="12" height="1.5" rx="0.5" fill="#b71c1c" opacity="0.7"/>
    <!-- Chin line -->
    <path d="M26 44 Q32 48 38 44" fill="none" stroke="#c6a700" stroke-width="1"/>
    <!-- Forehead line -->
    <line x1="32" y1="12" x2="32" y2="22" stroke="#c6a700" stroke-width="1.2"/>
</svg>"##;

// Spider-Man: red mask, web pattern, big white eyes.
const QUEEN_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">
    <!-- Head shape -->
    <ellipse cx="32" cy="34" rx="22" ry="26" fill="#d32f2f"/>
    <!-- Web lines from center -->
    <g stroke="#8b0000" stroke-width="0.8" fill="none" opacity="0.6">
        <line x1="32" y1="10" x2="32" y2="58"/>
        <line x1="32" y1="34" x2="10" y2="20"/>
        <line x1="32" y1="34" x2="54" y2="20"/>
        <line x1="32" y1="34" x2="10" y2="48"/>
        <line x1="32" y1="34" x2="54" y2="48"/>
        <line x1="32" y1="34" x2="12" y2="34"/>
        <line x1="32" y1="34" x2="52" y2="34"/>
        <!-- Concentric arcs -->
        <ellipse cx="32" cy="34" rx="6" ry="7"/>
        <ellipse cx="32" cy="34" rx="12" ry="13"/>
        <ellipse cx="32" cy="34" rx="18" ry="20"/>
    </g>
    <!-- Left eye -->
    <path d="M17 26 Q22 20 28 24 L26 34 Q22 38 16 34 Z" fill="white" stroke="#222" stroke-width="1.2"/>
    <!-- Right eye -->
    <path d="M47 26 Q42 20 36 24 L38 34 Q42 38 48 34 Z" fill="white" stroke="#222" stroke-width="1.2"/>
</svg>"##;

// Black Panther: dark mask, silver claw marks, pointed ears.
const BISHOP_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">
    <!-- Background -->
    <rect width="64" height="64" rx="8" fill="#2a1f0e" opacity="0.3"/>
    <!-- Ears/points -->
    <polygon points="13,22 17,6 25,22" fill="#1a1a2e"/>
    <polygon points="51,22 47,6 39,22" fill="#1a1a2e"/>
    <polygon points="15,21 17,9 23,21" fill="#2a2a40"/>
    <polygon points="49,21 47,9 41,21" fill="#2a2a40"/>
    <!-- Head shape -->
    <ellipse cx="32" cy="36" rx="21" ry="24" fill="#1a1a2e"/>
    <!-- Forehead mask detail lines -->
    <g stroke="#c0c0c0" stroke-width="0.8" fill="none" opacity="0.35">
        <path d="M32 14 Q26 24 22 36"/>
        <path d="M32 14 Q38 24 42 36"/>
        <path d="M32 18 L32 26"/>
    </g>
    <!-- Brow ridge -->
    <path d="M14 30 Q22 24 32 22 Q42 24 50 30" fill="#222240" opacity="0.8"/>
    <!-- Angular glowing eyes -->
    <path d="M18 32 L26 28 L29 33 L22 37 Z" fill="white"/>
    <path d="M46 32 L38 28 L35 33 L42 37 Z" fill="white"/>
    <path d="M19 32 L26 29 L28 33 L22 36 Z" fill="#e0e8ff" opacity="0.8"/>
    <path d="M45 32 L38 29 L36 33 L42 36 Z" fill="#e0e8ff" opacity="0.8"/>
    <!-- Claw marks, left cheek -->
    <g stroke="#c0c0c0" stroke-width="1.8" stroke-linecap="round" opacity="0.7">
        <line x1="16" y1="34" x2="22" y2="46"/>
        <line x1="19" y1="33" x2="25" y2="45"/>
        <line x1="22" y1="32" x2="28" y2="44"/>
    </g>
    <!-- Claw marks, right cheek -->
    <g stroke="#c0c0c0" stroke-width="1.8" stroke-linecap="round" opacity="0.7">
        <line x1="48" y1="34" x2="42" y2="46"/>
        <line x1="45" y1="33" x2="39" y2="45"/>
        <line x1="42" y1="32" x2="36" y2="44"/>
    </g>
    <!-- Nose bridge -->
    <path d="M30 34 L32 40 L34 34" fill="none" stroke="#444" stroke-width="0.8"/>
    <!-- Mouth area -->
    <path d="M26 46 Q32 50 38 46" fill="none" stroke="#333" stroke-width="0.8"/>
    <!-- Necklace -->
    <path d="M12 50 Q22 58 32 60 Q42 58 52 50" fill="none" stroke="#c0c0c0" stroke-width="1.8"/>
    <g fill="#c0c0c0">
        <circle cx="16" cy="51" r="2.2"/>
        <circle cx="22" cy="55" r="2.2"/>
        <circle cx="29" cy="57.5" r="2.2"/>
        <circle cx="35" cy="57.5" r="2.2"/>
        <circle cx="42" cy="55" r="2.2"/>
        <circle cx="48" cy="51" r="2.2"/>
    </g>
</svg>"##;

// Captain America: blue helmet, white A, wings, set jaw.
const KNIGHT_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">
    <!-- Helmet base -->
    <ellipse cx="32" cy="34" rx="22" ry="26" fill="#1565c0"/>
    <path d="M14 32 Q18 16 32 10 Q46 16 50 32 Q44 22 32 18 Q20 22 14 32Z" fill="#1565c0"/>
    <path d="M18 28 Q22 18 32 14 Q42 18 46 28" fill="none" stroke="white" stroke-width="1.5" opacity="0.5"/>
    <!-- Wing on left side -->
    <g fill="white" opacity="0.9">
        <path d="M10 26 L6 20 L14 24Z"/>
        <path d="M10 24 L4 16 L14 22Z"/>
        <path d="M11 22 L3 12 L15 20Z"/>
    </g>
    <!-- Wing on right side -->
    <g fill="white" opacity="0.9">
        <path d="M54 26 L58 20 L50 24Z"/>
        <path d="M54 24 L60 16 L50 22Z"/>
        <path d="M53 22 L61 12 L49 20Z"/>
    </g>
    <!-- White "A" on forehead -->
    <text x="32" y="24" text-anchor="middle" font-size="14" font-weight="900" fill="white" font-family="Arial, sans-serif">A</text>
    <!-- Face area -->
    <path d="M16 32 Q16 36 18 42 Q22 50 32 52 Q42 50 46 42 Q48 36 48 32 Q44 30 32 28 Q20 30 16 32Z" fill="#e8b88a"/>
    <!-- Eyes -->
    <ellipse cx="25" cy="34" rx="3.5" ry="2.5" fill="white"/>
    <ellipse cx="39" cy="34" rx="3.5" ry="2.5" fill="white"/>
    <circle cx="25" cy="34" r="1.8" fill="#1565c0"/>
    <circle cx="39" cy="34" r="1.8" fill="#1565c0"/>
    <!-- Determined brow -->
    <path d="M20 30 L29 31" stroke="#7a5530" stroke-width="1.5" stroke-linecap="round"/>
    <path d="M44 30 L35 31" stroke="#7a5530" stroke-width="1.5" stroke-linecap="round"/>
    <!-- Nose -->
    <path d="M31 37 Q32 40 33 37" fill="#d4a574" stroke="#c69060" stroke-width="0.5"/>
    <!-- Mouth -->
    <path d="M27 44 Q32 46 37 44" fill="none" stroke="#8b6040" stroke-width="1.2"/>
    <!-- Chin strap -->
    <path d="M16 32 Q14 40 18 48" fill="none" stroke="#0d47a1" stroke-width="2"/>
    <path d="M48 32 Q50 40 46 48" fill="none" stroke="#0d47a1" stroke-width="2"/>
    <!-- Helmet edge around face -->
    <path d="M16 32 Q20 30 32 28 Q44 30 48 32" fill="none" stroke="#0d47a1" stroke-width="1.5"/>
</svg>"##;

// Rhino: gray armored head with horn.
const ROOK_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">
    <!-- Horn -->
    <polygon points="32,2 28,18 36,18" fill="#bdbdbd" stroke="#9e9e9e" stroke-width="0.5"/>
    <!-- Head shape -->
    <ellipse cx="32" cy="36" rx="24" ry="24" fill="#757575"/>
    <!-- Armor plating lines -->
    <g stroke="#616161" stroke-width="1.2" fill="none">
        <path d="M14 26 Q22 20 32 18 Q42 20 50 26"/>
        <path d="M12 34 Q20 28 32 26 Q44 28 52 34"/>
        <path d="M16 44 Q24 50 32 52 Q40 50 48 44"/>
    </g>
    <!-- Brow ridge -->
    <path d="M14 28 Q22 22 32 20 Q42 22 50 28" fill="#616161"/>
    <!-- Small angry eyes -->
    <ellipse cx="24" cy="32" rx="4" ry="3" fill="white"/>
    <ellipse cx="40" cy="32" rx="4" ry="3" fill="white"/>
    <circle cx="25" cy="32" r="2" fill="#333"/>
    <circle cx="41" cy="32" r="2" fill="#333"/>
    <path d="M18 28 L28 30" stroke="#444" stroke-width="2" stroke-linecap="round"/>
    <path d="M46 28 L36 30" stroke="#444" stroke-width="2" stroke-linecap="round"/>
    <!-- Nose -->
    <ellipse cx="32" cy="40" rx="5" ry="3" fill="#616161"/>
    <!-- Mouth -->
    <path d="M24 48 Q32 52 40 48" fill="none" stroke="#444" stroke-width="1.5"/>
    <!-- Chin armor -->
    <path d="M20 50 Q32 58 44 50" fill="#616161" opacity="0.5"/>
</svg>"##;

// Green Goblin: green face, purple hood, menacing grin.
const PAWN_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">
    <!-- Pointy hood -->
    <polygon points="32,2 22,22 42,22" fill="#4a148c"/>
    <!-- Ear points -->
    <polygon points="12,26 8,16 20,24" fill="#2e7d32"/>
    <polygon points="52,26 56,16 44,24" fill="#2e7d32"/>
    <!-- Head -->
    <ellipse cx="32" cy="36" rx="20" ry="22" fill="#4caf50"/>
    <!-- Hood shadow on forehead -->
    <path d="M22 22 Q32 18 42 22 Q38 26 32 28 Q26 26 22 22Z" fill="#388e3c"/>
    <!-- Yellow menacing eyes -->
    <path d="M20 30 L28 28 L28 34 L20 35Z" fill="#ffeb3b"/>
    <path d="M44 30 L36 28 L36 34 L44 35Z" fill="#ffeb3b"/>
    <circle cx="25" cy="31" r="2" fill="#b71c1c"/>
    <circle cx="39" cy="31" r="2" fill="#b71c1c"/>
    <!-- Angry brows -->
    <path d="M18 27 L29 27" stroke="#1b5e20" stroke-width="2" stroke-linecap="round"/>
    <path d="M46 27 L35 27" stroke="#1b5e20" stroke-width="2" stroke-linecap="round"/>
    <!-- Nose -->
    <path d="M30 36 Q32 40 34 36" fill="#388e3c"/>
    <!-- Menacing grin -->
    <path d="M22 44 Q27 42 32 44 Q37 42 42 44" fill="none" stroke="#1b5e20" stroke-width="1.5"/>
    <path d="M22 44 Q32 52 42 44" fill="#1b5e20"/>
    <!-- Teeth -->
    <g fill="#fff">
        <rect x="25" y="44" width="3" height="3" rx="0.5"/>
        <rect x="29" y="44" width="3" height="3" rx="0.5"/>
        <rect x="33" y="44" width="3" height="3" rx="0.5"/>
        <rect x="37" y="44" width="3" height="3" rx="0.5"/>
    </g>
</svg>"##;

static GLYPHS: &[(Kind, &str)] = &[
    (Kind::King, KING_SVG),
    (Kind::Queen, QUEEN_SVG),
    (Kind::Bishop, BISHOP_SVG),
    (Kind::Knight, KNIGHT_SVG),
    (Kind::Rook, ROOK_SVG),
    (Kind::Pawn, PAWN_SVG),
];

// Parsed once; `Handle` clones share the underlying data.
static HANDLES: Lazy<Vec<(Kind, Handle)>> = Lazy::new(|| {
    GLYPHS
        .iter()
        .map(|(kind, source)| (*kind, Handle::from_memory(source.as_bytes())))
        .collect()
});

fn glyph_handle(kind: Kind) -> Option<Handle> {
    HANDLES.iter().find(|(k, _)| *k == kind).map(|(_, h)| h.clone())
}

/// The bare head portrait at the given pixel size.
pub fn glyph(kind: Kind, size: f32) -> Option<Svg> {
    let handle = glyph_handle(kind)?;
    Some(Svg::new(handle).width(Length::Fixed(size)).height(Length::Fixed(size)))
}

fn side_color(side: Side) -> Color {
    match side {
        Side::Light => Color::from_rgb8(0xff, 0xb3, 0x00),
        Side::Dark => Color::from_rgb8(0x37, 0x47, 0x4f),
    }
}

struct TeamRing {
    side: Side,
    radius: f32,
}

impl container::StyleSheet for TeamRing {
    type Style = Theme;

    fn appearance(&self, _theme: &Theme) -> container::Appearance {
        container::Appearance {
            border: Border {
                color: side_color(self.side),
                width: 2.0,
                radius: self.radius.into(),
            },
            ..container::Appearance::default()
        }
    }
}

fn ring_style(side: Side, radius: f32) -> iced::theme::Container {
    iced::theme::Container::Custom(Box::new(TeamRing { side, radius }))
}

/// Full piece element for a board square: ringed portrait over the two
/// letter hero tag. `None` when the kind has no registry entry.
pub fn board_piece<'a, M: 'a>(piece: Piece, glyph_size: f32) -> Option<Element<'a, M>> {
    let info = hero(piece.kind)?;
    let art = glyph(piece.kind, glyph_size)?;
    let ringed = Container::new(art)
        .padding(2)
        .style(ring_style(piece.side, glyph_size / 2.0 + 2.0));
    let tag = text(info.abbr)
        .size(Pixels(9.0))
        .style(iced::theme::Text::Color(side_color(piece.side)));
    Some(
        Column::new()
            .align_items(Alignment::Center)
            .push(ringed)
            .push(tag)
            .into(),
    )
}

/// Mini element for the capture trays.
pub fn captured_piece<'a, M: 'a>(piece: Piece, size: f32) -> Option<Element<'a, M>> {
    hero(piece.kind)?;
    let art = glyph(piece.kind, size)?;
    Some(
        Container::new(art)
            .padding(1)
            .style(ring_style(piece.side, size / 2.0 + 1.0))
            .into(),
    )
}

/// Option element for the promotion panel: portrait plus full hero name.
pub fn promo_choice<'a, M: 'a>(kind: Kind, side: Side, glyph_size: f32) -> Option<Element<'a, M>> {
    let info = hero(kind)?;
    let art = glyph(kind, glyph_size)?;
    Some(
        Column::new()
            .align_items(Alignment::Center)
            .spacing(4)
            .push(
                Container::new(art)
                    .padding(2)
                    .style(ring_style(side, glyph_size / 2.0 + 2.0)),
            )
            .push(text(info.name).size(Pixels(11.0)))
            .into(),
    )
}
