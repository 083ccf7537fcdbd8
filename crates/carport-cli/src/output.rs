//! Output formatting for CLI responses

use anyhow::{Error, Result};
use carport_interface::{ButtonEvent, NotificationSet};
use carport_profile::{CarModel, ProfileField as P, VehicleProfile};
use colored::*;
use serde::Serialize;
use serde_json::json;

/// Outcome of one replayed cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub cycle: usize,
    pub button_events: Vec<ButtonEvent>,
    pub notifications: NotificationSet,
    pub requested_enabled: bool,
    pub enabled: bool,
    pub hud_speed: f64,
    pub messages: usize,
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

pub fn print_models(models: &[CarModel], json: bool) -> Result<()> {
    if json {
        let entries: Vec<_> = models
            .iter()
            .map(|m| {
                json!({
                    "id": m.id(),
                    "tag": m,
                    "no_factory_controller": m.is_no_factory_controller(),
                })
            })
            .collect();
        return print_json(&json!({ "success": true, "models": entries }));
    }

    println!("{}", "Supported models:".bold());
    for model in models {
        let marker = if model.is_no_factory_controller() {
            " (no ACC)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("  {}{}", model.id(), marker);
    }
    Ok(())
}

pub fn print_profile(profile: &VehicleProfile, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({ "success": true, "profile": profile }));
    }

    let g = profile.geometry();
    let d = profile.dynamics();
    let t = profile.thresholds();
    let f = profile.features();
    let estimated = |field| {
        if profile.estimated().contains(field) {
            " ~".yellow().to_string()
        } else {
            String::new()
        }
    };

    println!("{} {}", "Profile:".bold(), profile.model().id());
    println!("  mass              {:>10.1} kg{}", g.mass, estimated(P::Mass));
    println!("  wheelbase         {:>10.3} m{}", g.wheelbase, estimated(P::Wheelbase));
    println!(
        "  center to front   {:>10.3} m{}",
        g.center_to_front,
        estimated(P::CenterToFront)
    );
    println!("  steer ratio       {:>10.2}{}", g.steer_ratio, estimated(P::SteerRatio));
    println!(
        "  rot. inertia      {:>10.1} kg·m²{}",
        d.rotational_inertia,
        estimated(P::RotationalInertia)
    );
    println!(
        "  tire stiffness    {:>10.0} / {:.0} N/rad{}",
        d.tire_stiffness.front,
        d.tire_stiffness.rear,
        estimated(P::TireStiffnessFactor)
    );
    println!(
        "  min enable speed  {:>10.2} m/s{}",
        t.min_enable_speed,
        estimated(P::MinEnableSpeed)
    );
    println!("  min steer speed   {:>10.2} m/s", t.min_steer_speed);
    println!(
        "  interceptor       {:>10}",
        if f.has_gas_interceptor { "yes".green() } else { "no".normal() }
    );
    println!(
        "  factory ACC       {:>10}",
        if f.no_factory_controller { "no".normal() } else { "yes".green() }
    );
    if !profile.estimated().is_empty() {
        println!("  {} estimated value", "~".yellow());
    }
    Ok(())
}

pub fn print_replay(reports: &[CycleReport], json: bool) -> Result<()> {
    if json {
        return print_json(&json!({ "success": true, "cycles": reports }));
    }

    for report in reports {
        let events: Vec<String> = report
            .button_events
            .iter()
            .map(|e| format!("{:?}{}", e.kind, if e.pressed { "↓" } else { "↑" }))
            .collect();
        let enabled = match (report.requested_enabled, report.enabled) {
            (true, true) => "enabled".green(),
            (true, false) => "gated".red(),
            (false, _) => "disabled".normal(),
        };
        println!(
            "{:>5}  {:<8} {:<16} {} ({} msgs)",
            report.cycle,
            enabled,
            events.join(","),
            report.notifications,
            report.messages
        );
    }
    Ok(())
}
