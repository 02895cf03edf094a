use serde::{Deserialize, Serialize};

/// Packed 8-bit-per-channel color in `0xAARRGGBB` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Argb(pub u32);

impl Argb {
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    #[must_use]
    pub const fn new(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(
            ((alpha as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32,
        )
    }

    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(0xFF, red, green, blue)
    }

    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | ((alpha as u32) << 24))
    }

    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.alpha() == 0
    }

    /// Returns the color with its alpha multiplied by `factor` (clamped to `0..=1`).
    #[must_use]
    pub fn scale_alpha(self, factor: f64) -> Self {
        let factor = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.with_alpha((f64::from(self.alpha()) * factor) as u8)
    }
}

impl Default for Argb {
    fn default() -> Self {
        Self::rgb(32, 32, 32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    Alpha,
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    const fn bit(self) -> u8 {
        match self {
            Self::Alpha => 1 << 0,
            Self::Red => 1 << 1,
            Self::Green => 1 << 2,
            Self::Blue => 1 << 3,
        }
    }
}

/// Set of channels a `ColorAnimate` is allowed to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMask {
    bits: u8,
}

impl ChannelMask {
    const ALL_BITS: u8 = ColorChannel::Alpha.bit()
        | ColorChannel::Red.bit()
        | ColorChannel::Green.bit()
        | ColorChannel::Blue.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn with_channel(self, channel: ColorChannel) -> Self {
        Self {
            bits: self.bits | channel.bit(),
        }
    }

    #[must_use]
    pub const fn without_channel(self, channel: ColorChannel) -> Self {
        Self {
            bits: self.bits & !channel.bit(),
        }
    }

    #[must_use]
    pub const fn contains(self, channel: ColorChannel) -> bool {
        (self.bits & channel.bit()) != 0
    }
}

impl Default for ChannelMask {
    fn default() -> Self {
        Self::all()
    }
}

/// Interpolates between two colors as a pure function of progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorAnimate {
    start: Argb,
    end: Argb,
    mask: ChannelMask,
}

impl ColorAnimate {
    #[must_use]
    pub fn new(start: Argb, end: Argb) -> Self {
        Self {
            start,
            end,
            mask: ChannelMask::all(),
        }
    }

    #[must_use]
    pub fn with_mask(mut self, mask: ChannelMask) -> Self {
        self.mask = mask;
        self
    }

    #[must_use]
    pub fn start(self) -> Argb {
        self.start
    }

    #[must_use]
    pub fn end(self) -> Argb {
        self.end
    }

    /// Color at `progress`. Progress outside `0..=1` is honored and the channel saturates.
    #[must_use]
    pub fn color_at(self, progress: f64) -> Argb {
        Argb::new(
            self.channel(ColorChannel::Alpha, self.start.alpha(), self.end.alpha(), progress),
            self.channel(ColorChannel::Red, self.start.red(), self.end.red(), progress),
            self.channel(ColorChannel::Green, self.start.green(), self.end.green(), progress),
            self.channel(ColorChannel::Blue, self.start.blue(), self.end.blue(), progress),
        )
    }

    fn channel(self, channel: ColorChannel, start: u8, end: u8, progress: f64) -> u8 {
        if !self.mask.contains(channel) || !progress.is_finite() {
            return start;
        }
        let delta = (f64::from(end) - f64::from(start)) * progress;
        (i32::from(start) + delta.trunc() as i32).clamp(0, 255) as u8
    }
}
