use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fxgen_config::{FxConfig, LoggingConfig};
use fxgen_hir::{printer, CompilationUnit, ImportDecl, TypeDecl, TypeResolver};
use fxgen_setter::{FieldSetterGenerator, GenerationReport, SetterOccurrence, TypeUnwrapper};
use fxgen_types::Type;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fxgen", version, about = "JavaFX property setter generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate @FXSetter setters for a serialized compilation unit
    Generate(GenerateArgs),
    /// Print the setter parameter type for a declared field type
    Unwrap(UnwrapArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// JSON file holding `unit` and `occurrences`
    input: PathBuf,
    /// Config file to use instead of discovering `fxgen.toml`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
    /// Print every annotated type in full after injection
    #[arg(long, conflicts_with = "json")]
    full: bool,
}

#[derive(Args)]
struct UnwrapArgs {
    /// Java type, e.g. `ListProperty<String>`
    ty: String,
    /// Package of the compilation unit the type is written in
    #[arg(long)]
    package: Option<String>,
}

#[derive(Deserialize)]
struct GenerateInput {
    unit: CompilationUnit,
    #[serde(default)]
    occurrences: Vec<SetterOccurrence>,
}

#[derive(Serialize)]
struct GenerateOutput<'a> {
    reports: &'a [GenerationReport],
    summary: Summary,
}

#[derive(Serialize)]
struct Summary {
    generated: usize,
    errors: usize,
    warnings: usize,
}

impl Summary {
    fn of(reports: &[GenerationReport]) -> Self {
        let diagnostics = || reports.iter().flat_map(|r| r.diagnostics.iter());
        Self {
            generated: reports.iter().map(|r| r.generated().count()).sum(),
            errors: diagnostics().filter(|d| d.is_error()).count(),
            warnings: diagnostics().filter(|d| !d.is_error()).count(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Unwrap(args) => {
            fxgen_config::init_tracing(&LoggingConfig::default());
            let ty = Type::parse(&args.ty).with_context(|| format!("invalid type `{}`", args.ty))?;
            let mut unit = CompilationUnit::new(args.package);
            unit.imports.push(ImportDecl::TypeStar {
                package: "javafx.beans.property".to_string(),
            });
            let unwrapper = TypeUnwrapper::new(TypeResolver::new(&unit));
            println!("{}", unwrapper.unwrap(&ty));
            Ok(0)
        }
    }
}

fn generate(args: GenerateArgs) -> Result<i32> {
    let config = load_config(&args)?;
    fxgen_config::init_tracing(&config.logging);

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let GenerateInput {
        mut unit,
        occurrences,
    } = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    tracing::debug!(
        input = %args.input.display(),
        occurrences = occurrences.len(),
        "running @FXSetter generation"
    );

    let reports = FieldSetterGenerator::new(&config).process_unit(&mut unit, &occurrences);
    let summary = Summary::of(&reports);
    let exit = if summary.errors > 0 { 1 } else { 0 };

    if args.json {
        let out = serde_json::to_string_pretty(&GenerateOutput {
            reports: &reports,
            summary,
        })?;
        println!("{out}");
    } else if args.full {
        print_types(&unit, &reports, &summary);
    } else {
        print_reports(&reports, &summary);
    }
    Ok(exit)
}

fn load_config(args: &GenerateArgs) -> Result<FxConfig> {
    if let Some(path) = &args.config {
        return FxConfig::load_from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }
    let dir = args
        .input
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let (config, _path) = fxgen_config::load_for_dir(dir)
        .with_context(|| format!("failed to load config for {}", dir.display()))?;
    Ok(config)
}

fn print_reports(reports: &[GenerationReport], summary: &Summary) {
    for report in reports {
        let mut owner = TypeDecl::new(report.owner.as_str());
        report.apply(&mut owner);
        if !owner.methods.is_empty() {
            println!("// {}", report.owner);
            for method in &owner.methods {
                print!("{}", printer::print_method(method));
            }
        }
        for diagnostic in &report.diagnostics {
            println!("{}: {diagnostic}", report.owner);
        }
    }
    print_summary(summary);
}

fn print_types(unit: &CompilationUnit, reports: &[GenerationReport], summary: &Summary) {
    let mut owners: Vec<&str> = Vec::new();
    for report in reports {
        if !owners.contains(&report.owner.as_str()) {
            owners.push(&report.owner);
        }
    }
    for owner in owners {
        if let Some(ty) = unit.type_decl(owner) {
            println!("// {owner}");
            print!("{}", printer::print_type(ty));
        }
    }
    for report in reports {
        for diagnostic in &report.diagnostics {
            println!("{}: {diagnostic}", report.owner);
        }
    }
    print_summary(summary);
}

fn print_summary(summary: &Summary) {
    println!(
        "summary: {} generated, {} errors, {} warnings",
        summary.generated, summary.errors, summary.warnings
    );
}
