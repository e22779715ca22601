use crate::core::{ConversionSummary, Pipeline, Report};
use crate::utils::error::Result;
use crate::utils::monitor::{ConversionMonitor, Phase};

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: ConversionMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: ConversionMonitor::new(monitor_enabled),
        }
    }

    pub fn monitor(&self) -> &ConversionMonitor {
        &self.monitor
    }

    /// Extract and transform only; nothing is written.
    pub fn prepare(&self) -> Result<Report> {
        tracing::info!("Extracting reservations...");
        self.monitor.begin_phase();
        let export = self.pipeline.extract()?;
        tracing::info!(
            "Extracted {} reservations from '{}'",
            export.reservations.len(),
            export.title
        );
        self.monitor.finish_phase(Phase::Extract, export.reservations.len() as u64);

        tracing::info!("Sorting and aggregating...");
        self.monitor.begin_phase();
        let report = self.pipeline.transform(export)?;
        self.monitor.finish_phase(Phase::Transform, report.totals.booking_count as u64);

        Ok(report)
    }

    pub fn run(&self) -> Result<ConversionSummary> {
        tracing::info!("Starting conversion");

        let report = self.prepare()?;

        tracing::info!("Rendering report...");
        self.monitor.begin_phase();
        let saved = self.pipeline.load(&report)?;
        tracing::info!("Report saved to: {}", saved.path.display());
        self.monitor.finish_phase(Phase::Load, saved.bytes as u64);
        self.monitor.log_summary();

        Ok(ConversionSummary {
            output_path: saved.path,
            title: report.title,
            booking_count: report.totals.booking_count,
            total_seats: report.totals.total_seats,
            bytes_written: saved.bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ParsedExport, ReportTotals, SavedReport};
    use crate::domain::model::Reservation;
    use crate::utils::error::ConvertError;
    use chrono::NaiveDate;
    use std::cell::Cell;
    use std::path::PathBuf;

    struct StubPipeline {
        fail_extract: bool,
        loads: Cell<usize>,
    }

    impl StubPipeline {
        fn new(fail_extract: bool) -> Self {
            Self {
                fail_extract,
                loads: Cell::new(0),
            }
        }
    }

    impl Pipeline for StubPipeline {
        fn extract(&self) -> Result<ParsedExport> {
            if self.fail_extract {
                return Err(ConvertError::MissingTitleError {
                    reason: "cell A1 is empty".to_string(),
                });
            }
            Ok(ParsedExport {
                title: "Gala".to_string(),
                reservations: vec![Reservation {
                    number: 1,
                    first_name: "Eva".to_string(),
                    last_name: "Huber".to_string(),
                    price: 18,
                    seat_count: 3,
                    seats: "D1,D2,D3".to_string(),
                }],
            })
        }

        fn transform(&self, export: ParsedExport) -> Result<Report> {
            Ok(Report {
                title: export.title,
                totals: ReportTotals {
                    booking_count: export.reservations.len(),
                    total_seats: 3,
                    generated_at: NaiveDate::from_ymd_opt(2025, 1, 4)
                        .unwrap()
                        .and_hms_opt(9, 5, 0)
                        .unwrap(),
                },
                reservations: export.reservations,
            })
        }

        fn load(&self, report: &Report) -> Result<SavedReport> {
            self.loads.set(self.loads.get() + 1);
            Ok(SavedReport {
                path: PathBuf::from(format!("{}.xlsx", report.title)),
                bytes: 4096,
            })
        }
    }

    #[test]
    fn test_run_returns_summary() {
        let engine = EtlEngine::new(StubPipeline::new(false));
        let summary = engine.run().unwrap();

        assert_eq!(summary.output_path, PathBuf::from("Gala.xlsx"));
        assert_eq!(summary.title, "Gala");
        assert_eq!(summary.booking_count, 1);
        assert_eq!(summary.total_seats, 3);
        assert_eq!(summary.bytes_written, 4096);
        assert!(engine.monitor().phases().is_empty());
    }

    #[test]
    fn test_monitoring_follows_each_phase() {
        let engine = EtlEngine::new_with_monitoring(StubPipeline::new(false), true);
        engine.run().unwrap();

        let phases: Vec<(Phase, u64)> = engine
            .monitor()
            .phases()
            .iter()
            .map(|s| (s.phase, s.items))
            .collect();
        assert_eq!(
            phases,
            vec![(Phase::Extract, 1), (Phase::Transform, 1), (Phase::Load, 4096)]
        );
    }

    #[test]
    fn test_monitoring_stops_at_failed_phase() {
        let engine = EtlEngine::new_with_monitoring(StubPipeline::new(true), true);
        assert!(engine.run().is_err());
        assert!(engine.monitor().phases().is_empty());
    }

    #[test]
    fn test_failed_extract_skips_load() {
        let engine = EtlEngine::new(StubPipeline::new(true));

        assert!(matches!(
            engine.run(),
            Err(ConvertError::MissingTitleError { .. })
        ));
        assert_eq!(engine.pipeline.loads.get(), 0);
    }

    #[test]
    fn test_prepare_does_not_load() {
        let engine = EtlEngine::new(StubPipeline::new(false));
        let report = engine.prepare().unwrap();

        assert_eq!(report.reservations.len(), 1);
        assert_eq!(engine.pipeline.loads.get(), 0);
    }
}
