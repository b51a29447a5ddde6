use crate::generate::{Connect, Generator};
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use testgen_core::generation::GenerationConfig;
use testgen_core::paths::derive_output_path;
use testgen_core::report::{BatchReport, FileFailure, FileOutcome, Written};

const SEPARATOR: &str = "----------------------------------------";

/// Process every path in order. A failing file never stops the batch.
pub async fn run_batch<C: Connect>(
    paths: &[PathBuf],
    config: &GenerationConfig,
    connector: &C,
) -> BatchReport {
    let mut report = BatchReport::new();

    for (index, path) in paths.iter().enumerate() {
        println!(
            "[{}/{}] Processing {} ...",
            index + 1,
            paths.len(),
            path.display()
        );

        let outcome = process_file(path, config, connector).await;

        match &outcome {
            Ok(written) => println!(
                "{} {} ({} bytes)",
                "Wrote test specification to".green(),
                written.output.display(),
                written.bytes_written
            ),
            Err(failure) => eprintln!("{} {}", "Error:".red().bold(), failure),
        }
        println!("{SEPARATOR}");

        report.record(outcome);
    }

    report
}

/// Read one design document, generate its test specification and write it
/// next to the document under `tests`.
///
/// The output path is derived first: an input whose output path cannot be
/// represented is rejected before any I/O.
pub async fn process_file<C: Connect>(
    path: &Path,
    config: &GenerationConfig,
    connector: &C,
) -> FileOutcome {
    let output = derive_output_path(path).map_err(|e| FileFailure::InvalidPath { path: e.0 })?;

    let document = read_document(path).await?;
    log::info!("Read {} bytes from {}", document.len(), path.display());

    let client = connector
        .connect()
        .await
        .map_err(|e| FileFailure::ClientInit {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let text = client
        .generate(config, &document)
        .await
        .map_err(|e| FileFailure::Generation {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    write_output(path, &output, &text).await?;

    Ok(Written {
        input: path.to_path_buf(),
        output,
        bytes_written: text.len(),
    })
}

async fn read_document(path: &Path) -> Result<String, FileFailure> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => FileFailure::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => FileFailure::ReadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })?;

    String::from_utf8(bytes).map_err(|e| FileFailure::Decoding {
        path: path.to_path_buf(),
        message: e.utf8_error().to_string(),
    })
}

async fn write_output(input: &Path, output: &Path, text: &str) -> Result<(), FileFailure> {
    let write_failed = |e: std::io::Error| FileFailure::WriteFailed {
        path: input.to_path_buf(),
        output: output.to_path_buf(),
        message: e.to_string(),
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(write_failed)?;
    }

    tokio::fs::write(output, text).await.map_err(write_failed)
}
