//! Build script for vitrine-display-fw
//!
//! - Sets up linker search paths for memory.x
//! - Validates showcase.toml at compile time

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    setup_linker();
    validate_config();
}

/// Make memory.x visible to the linker
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x")).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate showcase.toml at compile time
///
/// A missing file is already a compile error through `include_str!` in
/// main.rs, so only syntax and values are checked here.
fn validate_config() {
    println!("cargo:rerun-if-changed=showcase.toml");

    let content = fs::read_to_string("showcase.toml")
        .unwrap_or_else(|e| fail("Cannot read showcase.toml", &[e.to_string()]));

    let config: toml::Value = toml::from_str(&content).unwrap_or_else(|e| {
        let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
        fail("Invalid TOML syntax in showcase.toml", &lines)
    });

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_rotation(&config, &mut errors);
    validate_display(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid showcase configuration", &errors);
    }
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    let body: Vec<String> = lines
        .iter()
        .map(|line| {
            let line: String = line.chars().take(63).collect();
            format!("║  • {:<63} ║", line)
        })
        .collect();

    panic!(
        "\n╔{bar}╗\n║  ERROR: {title:<59}║\n╠{bar}╣\n{body}\n╚{bar}╝\n",
        bar = "═".repeat(68),
        body = body.join("\n"),
    );
}

/// Only `[rotation]` and `[display]` are understood by the firmware parser
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let table = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    for (name, value) in table {
        match (name.as_str(), value) {
            ("rotation" | "display", toml::Value::Table(_)) => {}
            ("rotation" | "display", _) => errors.push(format!("[{}] must be a table", name)),
            _ => errors.push(format!("Unknown section or key '{}'", name)),
        }
    }
}

/// Integer field in range, if present
fn check_int(
    section: &toml::value::Table,
    section_name: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match section.get(key) {
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => Some(*v),
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section_name, key, min, max));
            None
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section_name, key));
            None
        }
        None => None,
    }
}

fn validate_rotation(config: &toml::Value, errors: &mut Vec<String>) {
    let rotation = match config.get("rotation") {
        Some(toml::Value::Table(t)) => t,
        _ => return,
    };

    for key in rotation.keys() {
        if !["dwell_ms", "tick_ms"].contains(&key.as_str()) {
            errors.push(format!("[rotation] unknown key '{}'", key));
        }
    }

    let dwell = check_int(rotation, "rotation", "dwell_ms", 1, u32::MAX as i64, errors);
    let tick = check_int(rotation, "rotation", "tick_ms", 1, u32::MAX as i64, errors);

    // Firmware defaults are 2000 / 30
    let dwell = dwell.unwrap_or(2000);
    let tick = tick.unwrap_or(30);
    if tick > dwell {
        errors.push(format!(
            "[rotation] tick_ms ({}) must not exceed dwell_ms ({})",
            tick, dwell
        ));
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let display = match config.get("display") {
        Some(toml::Value::Table(t)) => t,
        _ => return,
    };

    for key in display.keys() {
        if !["i2c_address", "column_offset", "contrast", "inverted"].contains(&key.as_str()) {
            errors.push(format!("[display] unknown key '{}'", key));
        }
    }

    check_int(display, "display", "i2c_address", 0, 0x7F, errors);
    check_int(display, "display", "column_offset", 0, 4, errors);
    check_int(display, "display", "contrast", 0, 0xFF, errors);

    if let Some(value) = display.get("inverted") {
        if !value.is_bool() {
            errors.push("[display] inverted must be true or false".to_string());
        }
    }
}
