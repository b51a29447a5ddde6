use crate::prelude::{println, *};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use testgen_core::generation::{GenerationConfig, DEFAULT_MODEL};
use testgen_core::report::BatchReport;

mod auth;
mod batch;
mod error;
mod generate;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate CSV test specifications from design documents using Gemini on Vertex AI.\n\n\
                  Each <PATH> is read, sent to the model, and the answer is written to the same path \
                  with `docs` replaced by `tests` and `.md` replaced by `.csv`."
)]
pub struct App {
    /// Design documents to generate test specifications for
    pub paths: Vec<PathBuf>,

    #[clap(flatten)]
    vertex: VertexOptions,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct VertexOptions {
    /// Google Cloud project id
    #[clap(long, env = "GOOGLE_CLOUD_PROJECT", default_value = generate::DEFAULT_PROJECT)]
    project: String,

    /// Vertex AI region
    #[clap(long, env = "GOOGLE_CLOUD_LOCATION", default_value = generate::DEFAULT_LOCATION)]
    location: String,

    /// Gemini model name
    #[clap(long, env = "TESTGEN_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// OAuth access token (defaults to `gcloud auth print-access-token`)
    #[clap(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Print the summary as JSON
    #[clap(long)]
    json: bool,

    /// Whether to display additional information.
    #[clap(long, env = "TESTGEN_VERBOSE", default_value = "false")]
    verbose: bool,
}

impl From<VertexOptions> for generate::ClientSettings {
    fn from(options: VertexOptions) -> Self {
        Self {
            project: options.project,
            location: options.location,
            model: options.model,
            access_token: options.access_token,
        }
    }
}

/// Exit status when no input paths are given.
const USAGE_EXIT_STATUS: u8 = 1;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();
    color_eyre::install()?;

    let status = run(App::parse(), generate::VertexConnector::new).await?;

    Ok(ExitCode::from(status))
}

/// Run the batch and return the process exit status.
///
/// Per-file failures are reported, not escalated: the status is non-zero only
/// when no paths were given, in which case nothing is read and no connector
/// is built.
async fn run<C, F>(app: App, connector: F) -> Result<u8>
where
    C: generate::Connect,
    F: FnOnce(generate::ClientSettings) -> C,
{
    if app.paths.is_empty() {
        App::command().print_help()?;
        println!();
        return Ok(USAGE_EXIT_STATUS);
    }

    let settings = generate::ClientSettings::from(app.vertex);
    if app.global.verbose {
        println!("Project: {}", settings.project);
        println!("Location: {}", settings.location);
        println!("Model: {}", settings.model);
        println!();
    }

    let config = GenerationConfig::default();
    let connector = connector(settings);

    let report = batch::run_batch(&app.paths, &config, &connector).await;

    print_summary(&report, app.global.json)?;

    Ok(0)
}

fn print_summary(report: &BatchReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["Input", "Output", "Result"]);

    for outcome in report.outcomes() {
        match outcome {
            Ok(written) => table.add_row(prettytable::row![
                written.input.display(),
                written.output.display(),
                format!("{} bytes", written.bytes_written)
            ]),
            Err(failure) => {
                table.add_row(prettytable::row![failure.path().display(), "-", failure.kind()])
            }
        };
    }

    table.printstd();
    println!(
        "\n{} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    /// Refuses every connection; counts how often it was asked.
    struct RefusingConnector<'a> {
        connects: &'a Cell<usize>,
    }

    struct NoClient;

    impl generate::Generator for NoClient {
        async fn generate(
            &self,
            _config: &GenerationConfig,
            _document: &str,
        ) -> Result<String, Error> {
            Err(Error::Network("no client".to_string()))
        }
    }

    impl generate::Connect for RefusingConnector<'_> {
        type Client = NoClient;

        async fn connect(&self) -> Result<NoClient, Error> {
            self.connects.set(self.connects.get() + 1);
            Err(Error::ClientInit("refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_no_paths_exits_with_usage_status_without_connecting() {
        let built = Cell::new(false);
        let connects = Cell::new(0);
        let app = App::try_parse_from(["testgen"]).unwrap();

        let status = run(app, |_| {
            built.set(true);
            RefusingConnector {
                connects: &connects,
            }
        })
        .await
        .unwrap();

        assert_eq!(status, 1);
        assert!(!built.get());
        assert_eq!(connects.get(), 0);
    }

    #[tokio::test]
    async fn test_per_file_failures_still_exit_zero() {
        let temp_dir = TempDir::new().unwrap();
        let existing = temp_dir.path().join("docs/a.md");
        std::fs::create_dir_all(existing.parent().unwrap()).unwrap();
        std::fs::write(&existing, "doc").unwrap();
        let missing = temp_dir.path().join("docs/missing.md");
        let connects = Cell::new(0);

        let app = App::try_parse_from([
            std::ffi::OsStr::new("testgen"),
            existing.as_os_str(),
            missing.as_os_str(),
        ])
        .unwrap();

        let status = run(app, |_| RefusingConnector {
            connects: &connects,
        })
        .await
        .unwrap();

        assert_eq!(status, 0);
        assert_eq!(connects.get(), 1);
        assert!(!temp_dir.path().join("tests").exists());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        App::command().debug_assert();
    }

    #[test]
    fn test_paths_are_kept_in_order() {
        let app = App::try_parse_from(["testgen", "docs/b.md", "docs/a.md"]).unwrap();
        assert_eq!(
            app.paths,
            vec![PathBuf::from("docs/b.md"), PathBuf::from("docs/a.md")]
        );
    }

    #[test]
    fn test_no_paths_parses_to_empty_list() {
        let app = App::try_parse_from(["testgen"]).unwrap();
        assert!(app.paths.is_empty());
    }

    #[test]
    fn test_vertex_options_flow_into_client_settings() {
        let app = App::try_parse_from([
            "testgen",
            "--project",
            "acme",
            "--location",
            "asia-northeast1",
            "--access-token",
            "ya29.token",
            "docs/a.md",
        ])
        .unwrap();

        let settings = generate::ClientSettings::from(app.vertex);
        assert_eq!(settings.project, "acme");
        assert_eq!(settings.location, "asia-northeast1");
        assert_eq!(settings.access_token.as_deref(), Some("ya29.token"));
    }
}
