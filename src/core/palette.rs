//! Color plan inference.

use serde::{Deserialize, Serialize};

use crate::core::model::{TpoTags, Weather};
use crate::core::signals::Signals;
use crate::core::vocab::ColorKey;

/// Suggested palette for the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPlan
{
    pub base: ColorKey,
    pub accent: ColorKey,
    pub bottom_hint: ColorKey,
    pub shoe_hint: ColorKey,
}

/// Temperature-driven base/accent pair used when the user named no usable
/// color
fn seasonal_pair(feels_c: f64) -> (ColorKey, ColorKey)
{
    if feels_c <= 8.0
    {
        (ColorKey::Navy, ColorKey::Beige)
    }
    else if feels_c <= 16.0
    {
        (ColorKey::Gray, ColorKey::Navy)
    }
    else if feels_c <= 23.0
    {
        (ColorKey::Neutral, ColorKey::Blue)
    }
    else
    {
        (ColorKey::White, ColorKey::Green)
    }
}

/// Derive a color plan from signals, weather and occasion.
///
/// Explicit color preferences win outright. The seasonal fallback is toned
/// down for formal/smart occasions, then warmed up for dates.
pub fn plan_colors(
    weather: &Weather,
    tags: &TpoTags,
    signals: &Signals,
) -> ColorPlan
{
    let avoided = |c: &ColorKey| {
        signals
            .avoid_colors
            .contains(c)
    };
    let liked: Vec<ColorKey> = signals
        .prefer_colors
        .iter()
        .copied()
        .filter(|c| !avoided(c))
        .collect();

    let (base, accent) = match liked.as_slice()
    {
        [first, second, ..] => (*first, *second),
        [only] => (*only, ColorKey::Neutral),
        [] =>
        {
            let (mut base, mut accent) = seasonal_pair(weather.feels_c);

            if tags.any_of(&["formal", "smart"])
            {
                if matches!(base, ColorKey::White | ColorKey::Green | ColorKey::Pink)
                {
                    base = ColorKey::Navy;
                }
                if matches!(accent, ColorKey::Red | ColorKey::Pink | ColorKey::Vivid)
                {
                    accent = ColorKey::White;
                }
            }

            if tags.contains("date") && matches!(base, ColorKey::Navy | ColorKey::Gray)
            {
                accent = ColorKey::Pink;
            }

            (base, accent)
        }
    };

    let shoe_hint = if avoided(&ColorKey::Black) { ColorKey::Navy } else { ColorKey::Black };

    let bottom_hint = if weather.rain
    {
        ColorKey::Dark
    }
    else if base == ColorKey::White
    {
        ColorKey::Navy
    }
    else
    {
        ColorKey::Gray
    };

    ColorPlan { base, accent, bottom_hint, shoe_hint }
}
