use palette::{IntoColor, Oklch, Srgb};

/// A concrete color for annotation painting.
///
/// Derived shades (a block's darker bottom rule, a hover tint) are computed
/// in Oklch so lightness changes look even across hues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Oklch { l: f32, c: f32, h: f32, a: f32 },
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch { l, c, h, a: 1.0 }
    }

    pub const fn oklcha(l: f32, c: f32, h: f32, a: f32) -> Self {
        Self::Oklch { l, c, h, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self::Rgb {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    pub fn to_rgb(&self) -> Rgb {
        match *self {
            Self::Rgb { r, g, b } => Rgb::new(r, g, b),
            Self::Oklch { l, c, h, .. } => oklch_to_rgb(l, c, h),
        }
    }

    pub fn alpha(&self) -> f32 {
        match *self {
            Self::Oklch { a, .. } => a,
            Self::Rgb { .. } => 1.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        let (l, c, h) = self.to_oklch();
        Self::Oklch {
            l,
            c,
            h,
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn lighten(self, amount: f32) -> Self {
        self.shift_lightness(amount)
    }

    pub fn darken(self, amount: f32) -> Self {
        self.shift_lightness(-amount)
    }

    fn shift_lightness(self, delta: f32) -> Self {
        let (l, c, h) = self.to_oklch();
        Self::Oklch {
            l: (l + delta).clamp(0.0, 1.0),
            c,
            h,
            a: self.alpha(),
        }
    }

    fn to_oklch(&self) -> (f32, f32, f32) {
        match *self {
            Self::Oklch { l, c, h, .. } => (l, c, h),
            Self::Rgb { r, g, b } => rgb_to_oklch(r, g, b),
        }
    }
}

fn oklch_to_rgb(l: f32, c: f32, h: f32) -> Rgb {
    let oklch = Oklch::new(l, c, h);
    let srgb: Srgb = oklch.into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();

    Rgb::new(r, g, b)
}

fn rgb_to_oklch(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let srgb: Srgb = Srgb::new(r, g, b).into_format::<f32>();
    let oklch: Oklch = srgb.into_color();
    (oklch.l, oklch.chroma, oklch.hue.into_positive_degrees())
}
