use crate::adapters::XlsxSource;
use crate::core::aggregator::ReportAggregator;
use crate::core::parser::RecordParser;
use crate::core::renderer::ReportRenderer;
use crate::core::schema::SchemaValidator;
use crate::core::sorter::RecordSorter;
use crate::core::{ConfigProvider, ParsedExport, Pipeline, Report, SavedReport, Storage};
use crate::utils::error::{ConvertError, Result};
use chrono::{Local, NaiveDateTime};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ILLEGAL_FILE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).expect("file name pattern is valid")
});

/// Default report file name for a document title.
pub fn report_file_name(title: &str) -> String {
    let name = ILLEGAL_FILE_CHARS.replace_all(title.trim(), "_");
    let name = name.trim_matches('.');
    if name.is_empty() {
        "Reservierungen.xlsx".to_string()
    } else {
        format!("{}.xlsx", name)
    }
}

/// Ticketleo export in, sorted reservation report out.
pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    renderer: ReportRenderer,
    generated_at: Option<NaiveDateTime>,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            renderer: ReportRenderer::default(),
            generated_at: None,
        }
    }

    pub fn with_renderer(mut self, renderer: ReportRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Pins the summary timestamp instead of reading the local clock.
    pub fn with_generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn destination(&self, title: &str) -> PathBuf {
        match self.config.output_path() {
            Some(path) => path.to_path_buf(),
            None => self.config.output_dir().join(report_file_name(title)),
        }
    }

    fn input_path(&self) -> Result<&Path> {
        self.config
            .input_path()
            .ok_or_else(|| ConvertError::MissingConfigError {
                field: "input".to_string(),
            })
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    fn extract(&self) -> Result<ParsedExport> {
        let input = self.input_path()?;
        tracing::debug!("Reading export from {}", input.display());

        let bytes = self.storage.read_file(input)?;
        let source = XlsxSource::from_bytes(bytes)?;

        let title = SchemaValidator::validate(&source)?;
        let reservations = RecordParser::new().parse(&source);

        Ok(ParsedExport {
            title,
            reservations,
        })
    }

    fn transform(&self, export: ParsedExport) -> Result<Report> {
        let reservations = RecordSorter::sort(export.reservations);
        let generated_at = self
            .generated_at
            .unwrap_or_else(|| Local::now().naive_local());
        let totals = ReportAggregator::aggregate(&reservations, generated_at);

        tracing::debug!(
            "{} bookings, {} reserved seats",
            totals.booking_count,
            totals.total_seats
        );

        Ok(Report {
            title: export.title,
            reservations,
            totals,
        })
    }

    fn load(&self, report: &Report) -> Result<SavedReport> {
        let destination = self.destination(&report.title);

        if !self.config.overwrite() && self.storage.exists(&destination) {
            return Err(ConvertError::SaveFailedError {
                path: destination.display().to_string(),
                reason: "file already exists".to_string(),
            });
        }

        let data = self.renderer.render(report)?;

        tracing::debug!(
            "Writing report ({} bytes) to {}",
            data.len(),
            destination.display()
        );
        self.storage
            .write_file(&destination, &data)
            .map_err(|e| ConvertError::SaveFailedError {
                path: destination.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(SavedReport {
            path: destination,
            bytes: data.len(),
        })
    }
}
