// Wed Jan 15 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "typetree-codegen")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Compiles TypeTree dumps into class definitions and typed objects", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a dump into a class registry
    Compile(CompileArgs),
    /// Build a typed object from a decoded tree
    Materialize(MaterializeArgs),
    /// Summarize the namespaces and classes of a dump
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct CompileArgs {
    pub dump: PathBuf,

    #[arg(short, long, default_value = "registry.json")]
    pub output: PathBuf,

    /// Also write a definitions listing per namespace under this directory
    #[arg(long)]
    pub listing: Option<PathBuf>,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub layouts: bool,

    #[arg(long)]
    pub compact: bool,
}

#[derive(Parser, Debug)]
pub struct MaterializeArgs {
    pub dump: PathBuf,

    /// Fully-qualified name of the class to build
    #[arg(long)]
    pub class: String,

    /// Decoded tree as JSON; an array builds one object per element
    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Reserved attribute as name=value, value parsed as JSON when possible
    #[arg(long = "reserved", value_parser = parse_reserved)]
    pub reserved: Vec<(String, serde_json::Value)>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub dump: PathBuf,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print every generated class
    #[arg(long)]
    pub classes: bool,
}

pub fn parse_reserved(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing attribute name in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((name.to_string(), value))
}

impl CompileArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.dump.exists() {
            return Err(format!("Dump file does not exist: {:?}", self.dump));
        }
        Ok(())
    }
}

impl MaterializeArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.dump.exists() {
            return Err(format!("Dump file does not exist: {:?}", self.dump));
        }
        if !self.input.exists() {
            return Err(format!("Input file does not exist: {:?}", self.input));
        }
        if self.class.trim().is_empty() {
            return Err("Class name must not be empty".to_string());
        }
        Ok(())
    }
}
