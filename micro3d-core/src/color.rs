/// 8-bit-per-channel RGBA color and its packed pixel form.
///
/// The frame buffer stores colors packed as `0xAARRGGBB`. Colors built with
/// [`Color::rgb`] carry a zero alpha byte and so pack to plain `0x00RRGGBB`,
/// the format most display sinks expect. No blending is ever performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const DARK_RED: Color = Color::rgb(0xc0, 0, 0);
    /// Background the host clears to before every frame.
    pub const LIGHT_GREY: Color = Color::rgb(240, 240, 240);

    pub const fn from_channels(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0 }
    }

    /// Pack into `0xAARRGGBB`.
    pub const fn pack(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Inverse of [`Color::pack`].
    pub const fn unpack(value: u32) -> Self {
        Self {
            a: (value >> 24) as u8,
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Bytes in RGBA order with the alpha forced opaque, for canvas-style sinks.
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color::unpack(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.pack()
    }
}
