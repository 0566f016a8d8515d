//! upa CLI binary entry point.
//! Resolves configuration, runs the analysis and writes the report.

use clap::Parser;
use upa::analyzer::Analyzer;
use upa::cli::{Cli, Commands};
use upa::runner::ProcessRunner;
use upa::{config, output, utils};

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Analyze {
            language,
            dir,
            out,
            output,
            fix,
            prompt,
            stdout,
        } => {
            let eff = match config::resolve_effective(
                dir.as_deref(),
                language.as_deref(),
                out.as_deref(),
                output.as_deref(),
                if fix { Some(true) } else { None },
                if prompt { Some(true) } else { None },
            ) {
                Ok(eff) => eff,
                Err(err) => {
                    eprintln!("{} {}", utils::error_prefix(), err);
                    std::process::exit(2);
                }
            };
            let Some(language) = eff.language.clone() else {
                eprintln!(
                    "{} Language is not configured. Pass --language or add language to upa.toml (one of: {}).",
                    utils::error_prefix(),
                    eff.registry.keys().join(", ")
                );
                std::process::exit(2);
            };
            if eff.config_path.is_none() {
                eprintln!("{} No upa.toml found; using built-in languages.", utils::note_prefix());
            }
            if !eff.project_dir.is_dir() {
                eprintln!(
                    "{} Project directory not found: {}",
                    utils::error_prefix(),
                    eff.project_dir.display()
                );
                std::process::exit(2);
            }

            let analyzer = Analyzer::new(eff.registry.clone(), ProcessRunner);
            let report = match analyzer.analyze(&language, &eff.project_dir, eff.fix) {
                Ok(r) => r,
                Err(err) => {
                    eprintln!("{} {}", utils::error_prefix(), err);
                    std::process::exit(1);
                }
            };
            let rendered = output::render(&report, &eff.output, eff.prompt);
            if stdout {
                print!("{}", rendered);
                return;
            }
            if let Err(err) = output::write_report(&eff.out, &rendered) {
                eprintln!("{} {}", utils::error_prefix(), err);
                std::process::exit(1);
            }
            eprintln!(
                "{} {} linter and {} compiler issue(s)",
                utils::info_prefix(),
                report.linter_issues.len(),
                report.compiler_issues.len()
            );
            println!("Analysis written to {}", eff.out.display());
        }
        Commands::Languages { dir } => {
            let eff = match config::resolve_effective(dir.as_deref(), None, None, None, None, None) {
                Ok(eff) => eff,
                Err(err) => {
                    eprintln!("{} {}", utils::error_prefix(), err);
                    std::process::exit(2);
                }
            };
            for eco in eff.registry.iter() {
                let build = eco
                    .build
                    .as_ref()
                    .map(|b| b.join(" "))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<10} {} {}  (decoder: {}, build: {})",
                    eco.key,
                    eco.tool,
                    eco.analyze_args.join(" "),
                    eco.decoder.name(),
                    build
                );
            }
        }
    }
}
