//! Shared test utilities for integration tests
//!
//! Provides fixture wardrobes, weather snapshots and a preconfigured
//! binary runner used across multiple test files.

#![allow(dead_code)]

use std::process::Command;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use ootd::{Wardrobe, WardrobeItem, Weather};

/// Weather snapshot with the fields tests usually vary
pub fn weather(
    feels_c: f64,
    rain: bool,
) -> Weather
{
    Weather {
        city: "Seoul,KR".into(),
        temp_c: feels_c,
        feels_c,
        humidity: 55,
        wind_ms: 2.0,
        rain,
        desc: "test".into(),
    }
}

/// Wardrobe with only the given tops; other categories empty
pub fn tops_only(tops: Vec<WardrobeItem>) -> Wardrobe
{
    Wardrobe { tops, ..Wardrobe::default() }
}

/// Small two-per-slot wardrobe used by reroll and CLI tests
pub fn pair_wardrobe() -> Wardrobe
{
    Wardrobe {
        tops: vec![
            WardrobeItem::new("oxford shirt", &["smart", "casual"]).with_warmth(2.5),
            WardrobeItem::new("grey tee", &["casual"]).with_warmth(2.0),
        ],
        bottoms: vec![
            WardrobeItem::new("chinos", &["smart", "casual"]).with_warmth(2.5),
            WardrobeItem::new("jeans", &["casual"]).with_warmth(2.5),
        ],
        outer: vec![
            WardrobeItem::new("mac coat", &["smart"])
                .with_warmth(3.5)
                .with_rain_ok(true),
            WardrobeItem::new("denim jacket", &["casual"])
                .with_warmth(3.0)
                .with_rain_ok(false),
        ],
        shoes: vec![
            WardrobeItem::new("derbies", &["smart"]).with_rain_ok(false),
            WardrobeItem::new("sneakers", &["casual"]).with_rain_ok(true),
        ],
        extras: vec![WardrobeItem::new("folding umbrella", &["rain"])],
    }
}

/// Temp working directory, optionally seeded with a wardrobe file at the
/// default location
pub fn workdir(wardrobe: Option<&Wardrobe>) -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    if let Some(w) = wardrobe
    {
        tmp.child(".ootd/wardrobe.json")
            .write_str(&serde_json::to_string_pretty(w).expect("serialize wardrobe"))
            .expect("write wardrobe");
    }
    tmp
}

/// The `ootd` binary, run inside `dir` with a clean OOTD_* environment
pub fn ootd(dir: &assert_fs::TempDir) -> Command
{
    let mut cmd = Command::cargo_bin("ootd").expect("bin");
    cmd.current_dir(dir.path())
        .env_remove("OOTD_LOG")
        .env_remove("OOTD_SESSION_PATH")
        .env_remove("OOTD_WARDROBE_PATH")
        .env_remove("OOTD_DEFAULT_CITY")
        .arg("--no-color");
    cmd
}
