mod config;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use log::info;

use snippets::ExtractConfig;
use snippets::audit::{self, Finding};
use snippets::block::CodeBlock;
use snippets::extract::write_blocks;

use crate::config::FileConfig;

#[derive(Parser)]
#[command(
    name = "snippets",
    version,
    about = "Write the tagged fenced code blocks of a Markdown file to numbered files"
)]
struct Cli {
    /// TOML file with default settings (flags take precedence)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Markdown document to scan [default: README.md]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Existing directory for the output files [default: examples]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Language tag that must follow the opening fence [default: rust]
    #[arg(short, long)]
    tag: Option<String>,

    /// Text written before every block [default: "#![deny(warnings)]"]
    #[arg(long)]
    preamble: Option<String>,

    /// Output file name prefix [default: readme]
    #[arg(long)]
    prefix: Option<String>,

    /// Output file extension [default: rs]
    #[arg(long)]
    extension: Option<String>,

    /// Fence delimiter [default: ```]
    #[arg(long)]
    fence: Option<String>,

    /// Scan and audit only, don't write (exit 1 if the audit reports anything)
    #[arg(long, conflicts_with = "list")]
    check: bool,

    /// List matched blocks and their target files, don't write
    #[arg(long)]
    list: bool,

    /// Suppress audit warnings and the summary line (--check still sets the exit code)
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored diagnostic output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<ExtractConfig, config::ConfigError> {
        let mut resolved = ExtractConfig::default();
        if let Some(path) = &self.config {
            FileConfig::load_from_path(path)?.apply(&mut resolved);
        }
        FileConfig {
            document_path: self.input.clone(),
            output_dir: self.output_dir.clone(),
            tag: self.tag.clone(),
            fence: self.fence.clone(),
            preamble: self.preamble.clone(),
            prefix: self.prefix.clone(),
            extension: self.extension.clone(),
        }
        .apply(&mut resolved);
        Ok(resolved)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let color_choice = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let config = match cli.resolve_config() {
        Ok(c) => c,
        Err(e) => fail(&e),
    };
    info!("using {:?}", config);

    let scanner = match config.scanner() {
        Ok(s) => s,
        Err(e) => fail(&e),
    };
    let source = match config.read_document() {
        Ok(s) => s,
        Err(e) => fail(&e),
    };
    let blocks = scanner.scan(&source);

    // Set up codespan file database
    let mut files = SimpleFiles::new();
    let file_id = files.add(config.document_path.display().to_string(), source.clone());
    let findings = audit::audit(&source, file_id, &config.fence, &config.tag, &blocks);

    if !cli.quiet {
        emit_findings(color_choice, &files, &findings);
    }

    if cli.check {
        if findings.is_empty() {
            eprintln!(
                "ok: {} block(s) in {}",
                blocks.len(),
                config.document_path.display()
            );
            return;
        }
        process::exit(1);
    }

    if cli.list {
        print_blocks(&config, &source, &blocks);
        return;
    }

    match write_blocks(&config, &blocks) {
        Ok(extraction) => {
            if !cli.quiet {
                eprintln!(
                    "ok: wrote {} file(s) to {}",
                    extraction.count(),
                    config.output_dir.display()
                );
            }
        }
        Err(e) => fail(&e),
    }
}

fn fail(error: &dyn std::error::Error) -> ! {
    eprintln!("error: {}", error);
    process::exit(1);
}

fn print_blocks(config: &ExtractConfig, source: &str, blocks: &[CodeBlock]) {
    for block in blocks {
        println!(
            "{}\t{}\tline {}",
            block.index,
            config.output_path(block.index).display(),
            block.line(source)
        );
    }
}

fn emit_findings(
    color_choice: ColorChoice,
    files: &SimpleFiles<String, String>,
    findings: &[Finding],
) {
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    for finding in findings {
        let diagnostic = finding.to_diagnostic();
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, &diagnostic);
    }
}
