// Wed Jan 15 2026 - Alex

use super::args::{Args, Command, CompileArgs, InspectArgs, MaterializeArgs};
use crate::compiler::{CompileOutput, CompilePass};
use crate::config::Config;
use crate::materialize::{Materializer, ReservedValues, Value};
use crate::output::{JsonDump, JsonSerializer, ListingFormatter};
use crate::registry::Registry;
use crate::schema::SchemaStore;
use anyhow::Context;
use colored::Colorize;
use std::fs;
use std::path::Path;

pub struct CommandHandler {
    quiet: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn execute(mut self, args: Args) -> anyhow::Result<()> {
        self.quiet = args.quiet;
        if args.no_color {
            colored::control::set_override(false);
        }

        self.setup_logging(&args)?;

        match args.command {
            Command::Compile(compile_args) => self.handle_compile(compile_args),
            Command::Materialize(materialize_args) => self.handle_materialize(materialize_args),
            Command::Inspect(inspect_args) => self.handle_inspect(inspect_args),
        }
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = if args.quiet {
            log::LevelFilter::Error
        } else {
            match args.log_level.to_lowercase().as_str() {
                "trace" => log::LevelFilter::Trace,
                "debug" => log::LevelFilter::Debug,
                "info" => log::LevelFilter::Info,
                "warn" => log::LevelFilter::Warn,
                "error" => log::LevelFilter::Error,
                _ => log::LevelFilter::Info,
            }
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()
            .context("Logger already initialized")?;

        Ok(())
    }

    fn handle_compile(&self, args: CompileArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let output = compile(&args.dump, args.config.as_deref())?;
        self.print_report(&output);

        let serializer = JsonSerializer::new()
            .with_pretty_print(!args.compact)
            .with_layouts(args.layouts);
        let value = serializer.registry_value(&output.registry, Some(&output.report));
        serializer
            .write_to_file(&value, &args.output)
            .with_context(|| format!("Failed to write {:?}", args.output))?;
        self.success(&format!("Registry written to: {:?}", args.output));

        if let Some(dir) = &args.listing {
            let written = ListingFormatter::new()
                .write_to_dir(&output.registry, &output.report, dir)
                .with_context(|| format!("Failed to write listings under {:?}", dir))?;
            self.success(&format!("{} namespace listings written under: {:?}", written.len(), dir));
        }

        Ok(())
    }

    fn handle_materialize(&self, args: MaterializeArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let output = compile(&args.dump, args.config.as_deref())?;
        let registry: &'static Registry = output.registry.install()?;

        let mut reserved = ReservedValues::new();
        for (name, value) in &args.reserved {
            reserved.insert(name, Value::from(value.clone()))?;
        }

        let raw = fs::read_to_string(&args.input).with_context(|| format!("Failed to read {:?}", args.input))?;
        let tree: serde_json::Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;

        let materializer = Materializer::new(registry);
        let rendered = match tree {
            serde_json::Value::Array(items) => {
                let objects: Vec<(String, Value)> = items
                    .into_iter()
                    .map(|item| (args.class.clone(), Value::from(item)))
                    .collect();
                let mut dumped = Vec::with_capacity(objects.len());
                let mut failures = 0usize;
                for (i, result) in materializer.materialize_batch(&objects, &reserved).into_iter().enumerate() {
                    match result {
                        Ok(instance) => dumped.push(instance.dump_json()),
                        Err(e) => {
                            failures += 1;
                            log::error!("Object #{}: {}", i, e);
                            dumped.push(serde_json::Value::Null);
                        }
                    }
                }
                if failures > 0 {
                    self.warning(&format!("{} of {} objects failed", failures, objects.len()));
                }
                serde_json::Value::Array(dumped)
            }
            tree => {
                let instance = materializer.materialize(&args.class, &Value::from(tree), &reserved)?;
                if !self.quiet {
                    println!("{} {}", "[+]".green(), instance);
                }
                instance.dump_json()
            }
        };

        match &args.output {
            Some(path) => {
                JsonSerializer::new()
                    .write_to_file(&rendered, path)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                self.success(&format!("Objects written to: {:?}", path));
            }
            None => println!("{}", JsonSerializer::new().render(&rendered)?),
        }

        Ok(())
    }

    fn handle_inspect(&self, args: InspectArgs) -> anyhow::Result<()> {
        let raw = fs::read_to_string(&args.dump).with_context(|| format!("Failed to read {:?}", args.dump))?;
        let store = SchemaStore::parse(&raw)?;
        let output = CompilePass::new(load_config(args.config.as_deref())?).run(&store)?;

        println!("{}", "Namespaces".cyan().bold());
        for (namespace, imports) in &output.report.namespace_imports {
            let classes = store
                .classes()
                .filter(|schema| schema.namespace() == namespace.as_deref())
                .count();
            println!(
                "  {} ({} classes)",
                namespace.as_deref().unwrap_or("<default namespace>").white().bold(),
                classes
            );
            for import in imports {
                println!("    {}", import.to_string().dimmed());
            }
        }

        println!("{}", "Topological order".cyan().bold());
        for (i, fqn) in output.report.order.iter().enumerate() {
            println!("  {:>4}  {}", i, fqn);
        }

        self.print_report(&output);

        if args.classes {
            for fqn in &output.report.order {
                if let Some(descriptor) = output.registry.get(fqn) {
                    let lineage: Vec<&str> = output
                        .registry
                        .lineage(fqn)?
                        .iter()
                        .map(|d| d.ident.as_str())
                        .collect();
                    println!("{} {}", "[*]".cyan(), lineage.join(" <- ").dimmed());
                    print!("{}", descriptor);
                }
            }
        }

        Ok(())
    }

    fn print_report(&self, output: &CompileOutput) {
        let report = &output.report;
        for duplicate in &report.duplicates {
            self.warning(&duplicate.to_string());
        }
        for warning in &report.warnings {
            self.warning(&warning.to_string());
        }
        for skipped in &report.skipped {
            self.warning(&format!("Skipped {}", skipped));
        }

        if self.quiet {
            return;
        }
        println!("{}", "Compile summary".cyan().bold());
        println!("  Classes:          {}", output.registry.len());
        println!("  Skipped:          {}", report.skipped.len());
        println!("  Empty:            {}", report.empty.len());
        println!("  Fallback fields:  {}", report.fallback_count());
        println!("  Duplicate names:  {}", report.duplicates.len());
        if report.is_clean() {
            self.success("No problems found");
        }
    }

    fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "[+]".green(), message);
        }
    }

    fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "[!]".yellow(), message);
        }
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load(path).with_context(|| format!("Failed to load config {:?}", path))?,
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

fn compile(dump: &Path, config: Option<&Path>) -> anyhow::Result<CompileOutput> {
    let config = load_config(config)?;
    let raw = fs::read_to_string(dump).with_context(|| format!("Failed to read {:?}", dump))?;
    let output = CompilePass::new(config).compile_str(&raw)?;
    Ok(output)
}
