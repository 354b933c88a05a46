use ratatui::style::Color;

use crate::domain::weather::{Presentation, WeatherCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub top: Color,
    pub bottom: Color,
    pub surface: Color,
    pub accent: Color,
    pub text: Color,
    pub muted_text: Color,
    pub border: Color,
    pub particle: Color,
    pub star: Color,
    pub cloud: Color,
    pub info: Color,
    pub warning: Color,
    pub danger: Color,
    pub temp_freezing: Color,
    pub temp_cold: Color,
    pub temp_mild: Color,
    pub temp_warm: Color,
    pub temp_hot: Color,
    pub range_track: Color,
}

/// Reads the colour hints the terminal exports; `NO_COLOR` wins.
pub fn detect_color_capability() -> ColorCapability {
    let var = |name: &str| std::env::var(name).unwrap_or_default().to_lowercase();
    if std::env::var_os("NO_COLOR").is_some() {
        ColorCapability::Basic16
    } else if matches!(var("COLORTERM").as_str(), "truecolor" | "24bit") {
        ColorCapability::TrueColor
    } else if var("TERM").ends_with("256color") {
        ColorCapability::Xterm256
    } else {
        ColorCapability::Basic16
    }
}

type Rgb = (u8, u8, u8);

/// Sky gradient and accent seed for each category.
fn sky_palette(category: WeatherCategory) -> (Rgb, Rgb, Rgb) {
    match category {
        WeatherCategory::ClearDay => ((13, 53, 102), (30, 102, 158), (255, 215, 117)),
        WeatherCategory::ClearNight => ((9, 18, 44), (21, 43, 79), (173, 216, 255)),
        WeatherCategory::Cloudy => ((25, 36, 51), (48, 63, 84), (210, 223, 235)),
        WeatherCategory::CloudyNight => ((20, 26, 40), (34, 42, 62), (194, 207, 224)),
        WeatherCategory::Rainy => ((17, 47, 88), (32, 73, 126), (153, 214, 255)),
        WeatherCategory::Thunderstorm => ((28, 25, 66), (42, 40, 97), (255, 223, 112)),
        WeatherCategory::Snowy => ((27, 51, 77), (43, 74, 106), (237, 247, 255)),
        WeatherCategory::Misty => ((30, 34, 40), (50, 55, 62), (216, 220, 224)),
        WeatherCategory::Unknown => ((28, 36, 51), (42, 53, 73), (205, 219, 234)),
    }
}

pub fn theme_for(presentation: Presentation, capability: ColorCapability) -> Theme {
    let (mut top, mut bottom, accent_seed) = sky_palette(presentation.category);

    // Categories without a night variant still darken after sunset.
    let has_night_variant = matches!(
        presentation.category,
        WeatherCategory::ClearNight | WeatherCategory::CloudyNight
    );
    if presentation.is_night && !has_night_variant {
        top = mix_rgb(top, (4, 8, 20), 0.35);
        bottom = mix_rgb(bottom, (4, 8, 20), 0.35);
    }

    if capability == ColorCapability::Basic16 {
        return basic16_theme(presentation);
    }

    let surface = mix_rgb(bottom, (8, 12, 20), 0.45);
    let text = readable((240, 245, 250), surface, 4.7);
    let muted = readable((183, 198, 214), surface, 3.2);
    let accent = readable(accent_seed, surface, 3.0);
    let border = readable(mix_rgb(surface, accent, 0.54), surface, 2.25);
    let range_track = readable(muted, surface, 2.6);

    let rgb = |c: Rgb| match capability {
        ColorCapability::Xterm256 => xterm256(c),
        _ => Color::Rgb(c.0, c.1, c.2),
    };
    Theme {
        top: rgb(top),
        bottom: rgb(bottom),
        surface: rgb(surface),
        accent: rgb(accent),
        text: rgb(text),
        muted_text: rgb(muted),
        border: rgb(border),
        particle: rgb(readable((153, 190, 230), top, 2.0)),
        star: rgb(readable((255, 250, 220), top, 4.0)),
        cloud: rgb(readable((200, 210, 222), top, 1.8)),
        info: rgb(readable((125, 211, 252), surface, 3.0)),
        warning: rgb(readable((251, 191, 36), surface, 3.0)),
        danger: rgb(readable((248, 113, 113), surface, 3.0)),
        temp_freezing: rgb(readable((147, 197, 253), surface, 2.3)),
        temp_cold: rgb(readable((56, 189, 248), surface, 2.3)),
        temp_mild: rgb(readable((110, 231, 183), surface, 2.3)),
        temp_warm: rgb(readable((251, 191, 36), surface, 2.3)),
        temp_hot: rgb(readable((248, 113, 113), surface, 2.3)),
        range_track: rgb(range_track),
    }
}

fn basic16_theme(presentation: Presentation) -> Theme {
    let bottom = match presentation.category {
        WeatherCategory::ClearDay | WeatherCategory::Rainy | WeatherCategory::Snowy => Color::Blue,
        WeatherCategory::Thunderstorm => Color::Magenta,
        WeatherCategory::Cloudy | WeatherCategory::Misty => Color::DarkGray,
        WeatherCategory::ClearNight | WeatherCategory::CloudyNight | WeatherCategory::Unknown => {
            Color::Black
        }
    };

    Theme {
        top: Color::Black,
        bottom,
        surface: Color::Black,
        accent: Color::Cyan,
        text: Color::White,
        muted_text: Color::Gray,
        border: Color::LightCyan,
        particle: Color::Gray,
        star: Color::LightYellow,
        cloud: Color::Gray,
        info: Color::LightCyan,
        warning: Color::Yellow,
        danger: Color::LightRed,
        temp_freezing: Color::LightBlue,
        temp_cold: Color::Cyan,
        temp_mild: Color::Green,
        temp_warm: Color::Yellow,
        temp_hot: Color::LightRed,
        range_track: Color::Gray,
    }
}

pub fn condition_color(theme: &Theme, category: WeatherCategory) -> Color {
    match category {
        WeatherCategory::ClearDay => theme.warning,
        WeatherCategory::ClearNight => theme.star,
        WeatherCategory::Cloudy | WeatherCategory::CloudyNight => theme.muted_text,
        WeatherCategory::Rainy => theme.info,
        WeatherCategory::Snowy => theme.text,
        WeatherCategory::Misty => theme.cloud,
        WeatherCategory::Thunderstorm => theme.danger,
        WeatherCategory::Unknown => theme.accent,
    }
}

pub fn temp_color(theme: &Theme, temp_c: f32) -> Color {
    if temp_c <= -8.0 {
        theme.temp_freezing
    } else if temp_c <= 2.0 {
        theme.temp_cold
    } else if temp_c <= 16.0 {
        theme.temp_mild
    } else if temp_c <= 28.0 {
        theme.temp_warm
    } else {
        theme.temp_hot
    }
}

/// Vertical sky gradient colour for row `y` of `height`.
pub fn sky_color(theme: &Theme, y: u16, height: u16) -> Color {
    match (theme.top, theme.bottom) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let t = if height <= 1 {
                0.0
            } else {
                f32::from(y) / f32::from(height - 1)
            };
            let (r, g, b) = mix_rgb((r1, g1, b1), (r2, g2, b2), t);
            Color::Rgb(r, g, b)
        }
        (top, bottom) => {
            if y < height / 2 {
                top
            } else {
                bottom
            }
        }
    }
}

fn mix_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| -> u8 {
        (f32::from(x) + (f32::from(y) - f32::from(x)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Lightens `fg` until it reaches `min_ratio` against `bg`. Every sky and
/// surface colour is dark, so white is the fallback.
fn readable(fg: Rgb, bg: Rgb, min_ratio: f32) -> Rgb {
    (0..=10u8)
        .map(|step| mix_rgb(fg, (255, 255, 255), f32::from(step) / 10.0))
        .find(|candidate| contrast(*candidate, bg) >= min_ratio)
        .unwrap_or((255, 255, 255))
}

fn contrast(a: Rgb, b: Rgb) -> f32 {
    let (la, lb) = (luminance(a), luminance(b));
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// WCAG relative luminance.
fn luminance((r, g, b): Rgb) -> f32 {
    let linear = |v: u8| {
        let s = f32::from(v) / 255.0;
        if s <= 0.04045 {
            s / 12.92
        } else {
            ((s + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
}

/// Nearest entry of the 6x6x6 xterm colour cube.
fn xterm256((r, g, b): Rgb) -> Color {
    let level = |v: u8| (u16::from(v) * 5 + 127) / 255;
    Color::Indexed((16 + 36 * level(r) + 6 * level(g) + level(b)) as u8)
}
