use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::block::CodeBlock;
use crate::error::ExtractError;
use crate::scanner::Scanner;

/// Everything one extraction run needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// Document to scan.
    pub document_path: PathBuf,
    /// Existing directory that receives the output files.
    pub output_dir: PathBuf,
    /// Language identifier that must directly follow the opening fence.
    pub tag: String,
    pub fence: String,
    /// Written verbatim before every block body.
    pub preamble: String,
    pub prefix: String,
    pub extension: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            document_path: PathBuf::from("README.md"),
            output_dir: PathBuf::from("examples"),
            tag: "rust".to_string(),
            fence: "```".to_string(),
            preamble: "#![deny(warnings)]".to_string(),
            prefix: "readme".to_string(),
            extension: "rs".to_string(),
        }
    }
}

impl ExtractConfig {
    pub fn scanner(&self) -> Result<Scanner, ExtractError> {
        Ok(Scanner::new(&self.fence, &self.tag)?)
    }

    /// Target path for the block at `index`.
    pub fn output_path(&self, index: usize) -> PathBuf {
        output_path(&self.output_dir, &self.prefix, index, &self.extension)
    }

    /// Read the configured document in full.
    pub fn read_document(&self) -> Result<String, ExtractError> {
        std::fs::read_to_string(&self.document_path).map_err(|source| ExtractError::Read {
            path: self.document_path.clone(),
            source,
        })
    }
}

/// The files written by one run, in index order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub written: Vec<PathBuf>,
}

impl Extraction {
    pub fn count(&self) -> usize {
        self.written.len()
    }
}

/// `<dir>/<prefix>_<index>.<extension>`
pub fn output_path(dir: &Path, prefix: &str, index: usize, extension: &str) -> PathBuf {
    dir.join(format!("{}_{}.{}", prefix, index, extension))
}

/// Output file content for one block: preamble immediately followed by the body.
pub fn render(preamble: &str, block: &CodeBlock) -> String {
    let mut out = String::with_capacity(preamble.len() + block.content.len());
    out.push_str(preamble);
    out.push_str(&block.content);
    out
}

/// Scan the configured document and write one file per matched block.
///
/// Existing files are overwritten and never removed, so outputs left over
/// from an earlier run with more blocks survive. The first I/O failure
/// aborts the run and leaves already-written files in place.
pub fn extract(config: &ExtractConfig) -> Result<Extraction, ExtractError> {
    let scanner = config.scanner()?;
    let source = config.read_document()?;
    let blocks = scanner.scan(&source);
    info!(
        "found {} `{}` block(s) in {}",
        blocks.len(),
        config.tag,
        config.document_path.display()
    );
    write_blocks(config, &blocks)
}

/// Write already-scanned `blocks` to their output files.
pub fn write_blocks(
    config: &ExtractConfig,
    blocks: &[CodeBlock],
) -> Result<Extraction, ExtractError> {
    let mut extraction = Extraction::default();
    for block in blocks {
        let path = config.output_path(block.index);
        write_block(&path, &config.preamble, block)?;
        debug!("wrote block {} to {}", block.index, path.display());
        extraction.written.push(path);
    }
    Ok(extraction)
}

fn write_block(path: &Path, preamble: &str, block: &CodeBlock) -> Result<(), ExtractError> {
    let to_write_error = |source: std::io::Error| ExtractError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(to_write_error)?;
    file.write_all(render(preamble, block).as_bytes()).map_err(to_write_error)?;
    file.flush().map_err(to_write_error)
}
