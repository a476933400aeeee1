// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::geometry::BoundingBox;
use colored::*;
use std::time::Duration;

/// Summary of one tessellation for display
#[derive(Debug, Clone, Copy)]
pub struct MeshSummary {
    pub vertices: usize,
    pub triangles: usize,
    pub bounds: BoundingBox,
    pub duration: Duration,
}

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a generated mesh
    pub fn report_mesh(formula: &str, summary: &MeshSummary) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Surface:".bold(), formula.cyan());
        println!("{}", "━".repeat(80).bright_black());
        Self::print_metric("Vertices", &summary.vertices.to_string());
        Self::print_metric("Triangles", &summary.triangles.to_string());
        for (label, value) in Self::bounds_metrics(&summary.bounds) {
            Self::print_metric(label, &value);
        }
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(summary.duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());

        if summary.triangles == 0 {
            Self::report_warning("every triangle was clipped or discarded");
        }
    }

    fn bounds_metrics(bounds: &BoundingBox) -> Vec<(&'static str, String)> {
        if bounds.is_empty() {
            return vec![("Z range", "empty".to_string())];
        }
        let center = bounds.center();
        let size = bounds.size();
        vec![
            (
                "Z range",
                format!("{:.4} .. {:.4}", bounds.min.z, bounds.max.z),
            ),
            (
                "Center",
                format!("({:.4}, {:.4}, {:.4})", center.x, center.y, center.z),
            ),
            (
                "Extent",
                format!("{:.4} x {:.4} x {:.4}", size.x, size.y, size.z),
            ),
        ]
    }

    /// Report a single evaluated value
    pub fn report_value(formula: &str, value: f64) {
        let shown = if value.is_finite() {
            value.to_string().green()
        } else {
            value.to_string().yellow()
        };
        println!("{} = {}", formula.cyan(), shown);
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message.red());
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("{} {}", "Warning:".yellow().bold(), message);
    }

    fn print_metric(name: &str, value: &str) {
        println!("  {} {}", format!("{}:", name).bright_black(), value.cyan());
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
