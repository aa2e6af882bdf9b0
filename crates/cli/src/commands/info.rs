//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use log_parser::event_path_for;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    recording: String,
    trigger: TriggerInfo,
    simulator: SimulatorInfo,
    alignment: AlignmentInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sinks: Vec<SinkInfo>,
}

#[derive(Serialize)]
struct TriggerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trigger_time: Option<f64>,
    target_hz: f64,
    segment_length_s: f64,
    prominence: f64,
}

#[derive(Serialize)]
struct SimulatorInfo {
    log_path: String,
    event_path: String,
    reference_event: String,
}

#[derive(Serialize)]
struct AlignmentInfo {
    strict_range: bool,
}

#[derive(Serialize)]
struct SinkInfo {
    name: String,
    sink_type: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&blueprint, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint, args);
    }

    Ok(())
}

fn build_config_info(blueprint: &contracts::SessionBlueprint, args: &InfoArgs) -> ConfigInfo {
    let sinks = if args.sinks {
        blueprint
            .sinks
            .iter()
            .map(|s| SinkInfo {
                name: s.name.clone(),
                sink_type: format!("{:?}", s.sink_type),
            })
            .collect()
    } else {
        Vec::new()
    };

    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        recording: blueprint.recording.path.display().to_string(),
        trigger: TriggerInfo {
            audio_path: blueprint
                .trigger
                .audio_path
                .as_ref()
                .map(|p| p.display().to_string()),
            trigger_time: blueprint.trigger.trigger_time,
            target_hz: blueprint.trigger.target_hz,
            segment_length_s: blueprint.trigger.segment_length_s,
            prominence: blueprint.trigger.prominence,
        },
        simulator: SimulatorInfo {
            log_path: blueprint.simulator.log_path.display().to_string(),
            event_path: event_path_for(&blueprint.simulator.log_path)
                .display()
                .to_string(),
            reference_event: blueprint.simulator.reference_event.clone(),
        },
        alignment: AlignmentInfo {
            strict_range: blueprint.alignment.strict_range,
        },
        sinks,
    }
}

fn print_config_info(blueprint: &contracts::SessionBlueprint, args: &InfoArgs) {
    println!("\n📋 Session Configuration ({:?})", blueprint.version);

    println!("\n🎞  Recording");
    println!("   └─ {}", blueprint.recording.path.display());

    println!("\n🔊 Trigger");
    match blueprint.trigger.trigger_time {
        Some(time) => println!("   ├─ Pre-selected: {time} s"),
        None => match blueprint.trigger.audio_path {
            Some(ref path) => println!("   ├─ Audio track: {}", path.display()),
            None => println!("   ├─ Audio track: (none)"),
        },
    }
    println!("   ├─ Target: {} Hz", blueprint.trigger.target_hz);
    println!(
        "   ├─ Segment length: {} s",
        blueprint.trigger.segment_length_s
    );
    println!("   └─ Prominence: {}", blueprint.trigger.prominence);

    println!("\n🚗 Simulator");
    println!("   ├─ Log: {}", blueprint.simulator.log_path.display());
    println!(
        "   ├─ Events: {}",
        event_path_for(&blueprint.simulator.log_path).display()
    );
    println!(
        "   └─ Reference event: {}",
        blueprint.simulator.reference_event
    );

    println!("\n⚙️  Alignment");
    println!(
        "   └─ Out-of-range reference: {}",
        if blueprint.alignment.strict_range {
            "error"
        } else {
            "clamp"
        }
    );

    if args.sinks && !blueprint.sinks.is_empty() {
        println!("\n📤 Sinks ({})", blueprint.sinks.len());
        for (i, sink) in blueprint.sinks.iter().enumerate() {
            let is_last = i == blueprint.sinks.len() - 1;
            let prefix = if is_last { "└─" } else { "├─" };
            println!("   {} {} ({:?})", prefix, sink.name, sink.sink_type);
        }
    } else {
        println!("\n📤 Sinks: {}", blueprint.sinks.len());
    }

    println!();
}
