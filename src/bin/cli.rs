// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Texsurf CLI

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use texsurf::cli::reporter::{MeshSummary, Reporter};
use texsurf::{parser, GridConfig, Kernel};

#[derive(Parser)]
#[command(name = "texsurf")]
#[command(about = "Texsurf - LaTeX-style formula surfaces", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream after implicit multiplication
    Tokens {
        /// Formula, e.g. "2x\sin{y}"
        formula: String,
    },

    /// Parse a formula and output the AST as JSON
    Parse {
        formula: String,
    },

    /// Evaluate a formula once
    Eval {
        formula: String,

        /// Variable binding, repeatable
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
        vars: Vec<(String, f64)>,
    },

    /// Tessellate a formula over the sampling grid
    Mesh {
        formula: String,

        /// Variable binding, repeatable
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
        vars: Vec<(String, f64)>,

        /// Configuration file (defaults to texsurf.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Samples per axis
        #[arg(long)]
        step: Option<usize>,

        /// Half-extent of the sampled square
        #[arg(long)]
        range: Option<f32>,

        /// Keep geometry beyond the z bounds
        #[arg(long)]
        no_clip: bool,

        /// Output raw coordinates instead of display-scaled ones
        #[arg(long)]
        no_remap: bool,

        /// Shared grid vertices with a triangle-strip index buffer
        #[arg(long)]
        indexed: bool,

        /// Dump the buffers as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli.command) {
        Reporter::report_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Tokens { formula } => {
            let tokens = parser::lex(&formula)?;
            let shown: Vec<String> = tokens.iter().map(ToString::to_string).collect();
            println!("{}", shown.join(" "));
        }
        Commands::Parse { formula } => {
            let ast = parser::parse_expression(&formula)?;
            println!("{}", serde_json::to_string_pretty(&ast)?);
        }
        Commands::Eval { formula, vars } => {
            let kernel = Kernel::new(&formula, vars)?;
            let value = kernel.evaluator().evaluate()?;
            Reporter::report_value(&formula, value);
        }
        Commands::Mesh {
            formula,
            vars,
            config,
            step,
            range,
            no_clip,
            no_remap,
            indexed,
            json,
        } => {
            let mut grid = match config {
                Some(path) => GridConfig::from_file(&path)?,
                None => GridConfig::load()?,
            };
            if let Some(step) = step {
                grid.step = step;
            }
            if let Some(range) = range {
                grid.range = range;
            }
            grid.clip &= !no_clip;
            grid.remap &= !no_remap;
            grid.validate().context("Invalid grid configuration")?;

            mesh_command(&formula, vars, grid, indexed, json)?;
        }
        Commands::Version => {
            println!("Texsurf v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn mesh_command(
    formula: &str,
    vars: Vec<(String, f64)>,
    grid: GridConfig,
    indexed: bool,
    json: bool,
) -> Result<()> {
    let kernel = Kernel::new(formula, vars)?;
    let start = std::time::Instant::now();

    let summary = if indexed {
        let surface = kernel.generate_indexed(grid)?;
        if json {
            println!("{}", serde_json::to_string(&surface)?);
            return Ok(());
        }
        MeshSummary {
            vertices: surface.vertex_count(),
            triangles: surface.indices.len().saturating_sub(2),
            bounds: surface.bounding_box(),
            duration: start.elapsed(),
        }
    } else {
        let mesh = kernel.generate(grid)?;
        if json {
            println!("{}", serde_json::to_string(&mesh)?);
            return Ok(());
        }
        MeshSummary {
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            bounds: mesh.bounding_box(),
            duration: start.elapsed(),
        }
    };

    Reporter::report_mesh(formula, &summary);
    Ok(())
}

fn parse_binding(s: &str) -> Result<(String, f64)> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=VALUE, got {s:?}"))?;
    let value = value
        .trim()
        .parse()
        .with_context(|| format!("invalid value for {}", name.trim()))?;
    Ok((name.trim().to_owned(), value))
}
