//! Config validation.
//!
//! Rules:
//! - at least one trigger source: audio_path or a pre-selected trigger_time
//! - target_hz / segment_length_s / prominence > 0
//! - reference_event non-empty
//! - sink names non-empty and unique

use std::collections::HashSet;

use contracts::{SessionBlueprint, SessionError};

/// Validate a SessionBlueprint.
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &SessionBlueprint) -> Result<(), SessionError> {
    validate_trigger(blueprint)?;
    validate_simulator(blueprint)?;
    validate_sinks(blueprint)?;
    Ok(())
}

fn validate_trigger(blueprint: &SessionBlueprint) -> Result<(), SessionError> {
    let trigger = &blueprint.trigger;

    if trigger.audio_path.is_none() && trigger.trigger_time.is_none() {
        return Err(SessionError::config_validation(
            "trigger",
            "either audio_path or trigger_time must be set",
        ));
    }

    if trigger.target_hz <= 0.0 {
        return Err(SessionError::config_validation(
            "trigger.target_hz",
            format!("target_hz must be > 0, got {}", trigger.target_hz),
        ));
    }

    if trigger.segment_length_s <= 0.0 {
        return Err(SessionError::config_validation(
            "trigger.segment_length_s",
            format!(
                "segment_length_s must be > 0, got {}",
                trigger.segment_length_s
            ),
        ));
    }

    if trigger.prominence <= 0.0 {
        return Err(SessionError::config_validation(
            "trigger.prominence",
            format!("prominence must be > 0, got {}", trigger.prominence),
        ));
    }

    if let Some(t) = trigger.trigger_time {
        if t < 0.0 {
            return Err(SessionError::config_validation(
                "trigger.trigger_time",
                format!("trigger_time must be >= 0, got {t}"),
            ));
        }
    }

    Ok(())
}

fn validate_simulator(blueprint: &SessionBlueprint) -> Result<(), SessionError> {
    if blueprint.simulator.reference_event.is_empty() {
        return Err(SessionError::config_validation(
            "simulator.reference_event",
            "reference_event cannot be empty",
        ));
    }
    Ok(())
}

fn validate_sinks(blueprint: &SessionBlueprint) -> Result<(), SessionError> {
    let mut seen = HashSet::new();
    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        if sink.name.is_empty() {
            return Err(SessionError::config_validation(
                format!("sinks[{idx}].name"),
                "sink name cannot be empty",
            ));
        }
        if !seen.insert(&sink.name) {
            return Err(SessionError::config_validation(
                format!("sinks[name={}]", sink.name),
                "duplicate sink name",
            ));
        }
    }
    Ok(())
}
