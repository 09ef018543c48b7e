use std::{fmt, str::FromStr};

use serde_json::json;

use crate::{HttpCamera, Result};

pub const WHITE_BALANCE_ENDPOINT: &str = "/video/whiteBalance";
pub const WHITE_BALANCE_TINT_ENDPOINT: &str = "/video/whiteBalanceTint";

/// Lighting presets, indexed 0 to 4 in the order listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhiteBalancePreset {
    Sunlight,
    Tungsten,
    Fluorescent,
    Shade,
    Cloudy,
}

impl WhiteBalancePreset {
    pub const ALL: [WhiteBalancePreset; 5] = [
        WhiteBalancePreset::Sunlight,
        WhiteBalancePreset::Tungsten,
        WhiteBalancePreset::Fluorescent,
        WhiteBalancePreset::Shade,
        WhiteBalancePreset::Cloudy,
    ];

    /// Colour temperature in kelvin.
    pub fn white_balance(self) -> u32 {
        match self {
            WhiteBalancePreset::Sunlight => 5600,
            WhiteBalancePreset::Tungsten => 3200,
            WhiteBalancePreset::Fluorescent => 4000,
            WhiteBalancePreset::Shade => 4500,
            WhiteBalancePreset::Cloudy => 6500,
        }
    }

    pub fn tint(self) -> i32 {
        match self {
            WhiteBalancePreset::Sunlight | WhiteBalancePreset::Cloudy => 10,
            WhiteBalancePreset::Tungsten => 0,
            WhiteBalancePreset::Fluorescent | WhiteBalancePreset::Shade => 15,
        }
    }

    fn name(self) -> &'static str {
        match self {
            WhiteBalancePreset::Sunlight => "sunlight",
            WhiteBalancePreset::Tungsten => "tungsten",
            WhiteBalancePreset::Fluorescent => "fluorescent",
            WhiteBalancePreset::Shade => "shade",
            WhiteBalancePreset::Cloudy => "cloudy",
        }
    }
}

impl fmt::Display for WhiteBalancePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown white balance preset `{0}`, expected a name or an index from 0 to 4")]
pub struct UnknownPreset(pub String);

impl FromStr for WhiteBalancePreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::ALL
                .get(index)
                .copied()
                .ok_or_else(|| UnknownPreset(s.to_owned()));
        }

        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPreset(s.to_owned()))
    }
}

impl HttpCamera {
    /// Writes the preset's white balance, then its tint. Stops at the
    /// first write the camera rejects.
    pub async fn set_white_balance_preset(&self, preset: WhiteBalancePreset) -> Result<()> {
        self.put(
            WHITE_BALANCE_ENDPOINT,
            &json!({ "whiteBalance": preset.white_balance() }),
        )
        .await?
        .error_for_status()?;

        self.put(
            WHITE_BALANCE_TINT_ENDPOINT,
            &json!({ "whiteBalanceTint": preset.tint() }),
        )
        .await?
        .error_for_status()?;

        Ok(())
    }
}
