//! 点検項目・推奨区分のカタログ
//!
//! 全セッションで共通の固定リスト。順序はPDF/CSVの出力順そのもの。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 点検チェックリスト（表示順）
pub const CHECK_ITEMS: &[&str] = &[
    "Engine - Visual & Oil Leaks",
    "Engine - Compression / Idle / Noises",
    "Engine - Belts & Hoses",
    "Fluids - Oil / Coolant / Transmission",
    "Drivetrain - Axles / CV Joints",
    "Emission - Catalytic Converter",
    "Scratch & Dent Check",
    "Transmission / Clutch",
    "Brakes - Pads / Rotors / Fluid",
    "Suspension & Steering",
    "Tires - Tread & Pressure",
    "Exhaust System",
    "Cooling System - Radiator / Hoses",
    "Battery & Charging System",
    "Lights & Electrical",
    "Air Conditioning / Heating",
    "Interior - Seats / Electronics",
    "Body - Rust / Paint / Panels",
    "Frame & Underbody",
    "Test Drive - Noise / Vibration / Handling",
];

/// 項目ごとの判定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    #[default]
    Pass,
    Minor,
    Major,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 3] = [ItemStatus::Pass, ItemStatus::Minor, ItemStatus::Major];

    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Pass => "Pass",
            ItemStatus::Minor => "Minor",
            ItemStatus::Major => "Major",
        }
    }

    /// ラベルから判定を取得（大文字小文字・前後空白を無視）
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .ok_or_else(|| format!("Unknown status: {}. Use Pass, Minor, or Major", s))
    }
}

/// 購入アドバイス（推奨区分）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[default]
    #[serde(rename = "Buy as-is")]
    BuyAsIs,
    #[serde(rename = "Negotiate price (minor issues)")]
    Negotiate,
    #[serde(rename = "Get major repairs before buying")]
    MajorRepairs,
    #[serde(rename = "Avoid purchase - too risky")]
    Avoid,
}

impl Recommendation {
    pub const ALL: [Recommendation; 4] = [
        Recommendation::BuyAsIs,
        Recommendation::Negotiate,
        Recommendation::MajorRepairs,
        Recommendation::Avoid,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::BuyAsIs => "Buy as-is",
            Recommendation::Negotiate => "Negotiate price (minor issues)",
            Recommendation::MajorRepairs => "Get major repairs before buying",
            Recommendation::Avoid => "Avoid purchase - too risky",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Recommendation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("Unknown recommendation: {}", s))
    }
}
