/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (alpha is dropped)
    pub fn parse(css: &str) -> Option<Self> {
        let hex = css.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();

        match hex.len() {
            3 => {
                let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some(Self(digits.next()??, digits.next()??, digits.next()??))
            }
            6 | 8 => Some(Self(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        }
    }

    /// Parse, falling back to `fallback` for anything unrecognised
    pub fn parse_or(css: &str, fallback: Rgb) -> Self {
        Self::parse(css).unwrap_or(fallback)
    }

    /// Composite `self` at `alpha` (0.0..=1.0) over `under`
    pub fn over(self, under: Rgb, alpha: f64) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| {
            (f64::from(top) * alpha + f64::from(bottom) * (1.0 - alpha)).round() as u8
        };
        Rgb(mix(self.0, under.0), mix(self.1, under.1), mix(self.2, under.2))
    }
}
