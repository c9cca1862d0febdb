//! Build script for sonarwatch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates detector.toml and compiles it into a `DetectorConfig` const

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use sonarwatch_core::config::{ConfigError, DetectorConfig, DisplayPins, PinConfig, PinMap};

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate detector.toml and write `detector_config.rs` into OUT_DIR
fn generate_config() {
    println!("cargo:rerun-if-changed=detector.toml");

    let config_path = Path::new("detector.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: detector.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a detector.toml configuration file.       ║\n\
            ║  Please create one in the sonarwatch-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read detector.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let value: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in detector.toml                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    let config = read_config(&value, &mut errors);

    if errors.is_empty() {
        if let Err(e) = config.validate() {
            errors.push(describe_config_error(e));
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in detector.toml                   ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("detector_config.rs"), render_config(&config)).unwrap();

    println!("cargo:warning=detector.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build a `DetectorConfig`, starting from the defaults
fn read_config(value: &toml::Value, errors: &mut Vec<String>) -> DetectorConfig {
    let mut config = DetectorConfig::default();

    match value.get("detector") {
        Some(toml::Value::Table(detector)) => {
            if let Some(v) = read_u32(detector, "detector", "threshold_cm", errors) {
                config.threshold_cm = v;
            }
            if let Some(v) = read_u32(detector, "detector", "period_ms", errors) {
                config.period_ms = v;
            }
            config.echo_timeout_us = read_u32(detector, "detector", "echo_timeout_us", errors);
        }
        Some(_) => errors.push("[detector] must be a table".to_string()),
        None => {}
    }

    let pins = match value.get("pins") {
        Some(toml::Value::Table(t)) => t,
        _ => {
            errors.push("Missing [pins] section".to_string());
            return config;
        }
    };
    let display = match pins.get("display") {
        Some(toml::Value::Table(t)) => t,
        _ => {
            errors.push("Missing [pins.display] section".to_string());
            return config;
        }
    };

    let data = match display.get("data") {
        Some(toml::Value::Array(items)) if items.len() == 4 => {
            let mut data = [PinConfig::default(); 4];
            for (slot, item) in data.iter_mut().zip(items) {
                *slot = parse_pin(item, "pins.display.data", errors);
            }
            data
        }
        _ => {
            errors.push("[pins.display] data must list 4 pins (D4..D7)".to_string());
            return config;
        }
    };

    config.pins = PinMap {
        trigger: read_pin(pins, "pins", "trigger", errors),
        echo: read_pin(pins, "pins", "echo", errors),
        indicator: read_pin(pins, "pins", "indicator", errors),
        display: DisplayPins {
            rs: read_pin(display, "pins.display", "rs", errors),
            en: read_pin(display, "pins.display", "en", errors),
            data,
        },
    };

    config
}

fn read_u32(
    table: &toml::map::Map<String, toml::Value>,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<u32> {
    match table.get(key) {
        Some(toml::Value::Integer(v)) => match u32::try_from(*v) {
            Ok(v) => Some(v),
            Err(_) => {
                errors.push(format!("[{}] {} out of range: {}", section, key, v));
                None
            }
        },
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
        None => None,
    }
}

fn read_pin(
    table: &toml::map::Map<String, toml::Value>,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> PinConfig {
    match table.get(key) {
        Some(value) => parse_pin(value, &format!("{}.{}", section, key), errors),
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            PinConfig::default()
        }
    }
}

fn parse_pin(value: &toml::Value, path: &str, errors: &mut Vec<String>) -> PinConfig {
    match value.as_str().and_then(PinConfig::parse) {
        Some(pin) => pin,
        None => {
            errors.push(format!("{}: invalid pin {} (expected \"gpioN\")", path, value));
            PinConfig::default()
        }
    }
}

fn describe_config_error(e: ConfigError) -> String {
    match e {
        ConfigError::ZeroThreshold => "threshold_cm must be at least 1".to_string(),
        ConfigError::ZeroPeriod => "period_ms must be at least 1".to_string(),
        ConfigError::ZeroEchoTimeout => "echo_timeout_us must be at least 1".to_string(),
        ConfigError::InvalidPin(pin) => format!("gpio{} does not exist", pin),
        ConfigError::DuplicatePin(pin) => format!("gpio{} is assigned twice", pin),
        ConfigError::UnsupportedInversion(pin) => {
            format!("gpio{} cannot be inverted (indicator only)", pin)
        }
    }
}

fn render_pin(pin: &PinConfig) -> String {
    format!(
        "PinConfig {{ pin: {}, inverted: {}, pull_up: {} }}",
        pin.pin, pin.inverted, pin.pull_up
    )
}

fn render_config(config: &DetectorConfig) -> String {
    let timeout = match config.echo_timeout_us {
        Some(us) => format!("Some({})", us),
        None => "None".to_string(),
    };
    let pins = &config.pins;
    let data = pins
        .display
        .data
        .iter()
        .map(render_pin)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "// Generated from detector.toml by build.rs\n\
         pub const DETECTOR_CONFIG: DetectorConfig = DetectorConfig {{\n    \
             threshold_cm: {},\n    \
             period_ms: {},\n    \
             echo_timeout_us: {},\n    \
             pins: PinMap {{\n        \
                 trigger: {},\n        \
                 echo: {},\n        \
                 indicator: {},\n        \
                 display: DisplayPins {{\n            \
                     rs: {},\n            \
                     en: {},\n            \
                     data: [{}],\n        \
                 }},\n    \
             }},\n\
         }};\n",
        config.threshold_cm,
        config.period_ms,
        timeout,
        render_pin(&pins.trigger),
        render_pin(&pins.echo),
        render_pin(&pins.indicator),
        render_pin(&pins.display.rs),
        render_pin(&pins.display.en),
        data,
    )
}
