//! Cycle scheduling
//!
//! One cycle visits every category in random order, and every source of a
//! category in random order, pausing between sources. Cycles repeat with a
//! long pause until the scheduler is stopped.

use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::feeds::{Source, SourceCatalog};
use crate::pipeline::{ArticlePipeline, SourceReport};

/// Totals for one full pass over the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub sources_scanned: usize,
    pub sources_skipped: usize,
    pub entries_seen: usize,
    pub duplicates: usize,
    pub transform_failures: usize,
    pub persist_failures: usize,
    pub created: usize,
    /// Set when a stop or an abort ended the pass early
    pub interrupted: bool,
}

impl CycleReport {
    fn absorb(&mut self, source: &SourceReport) {
        self.sources_scanned += 1;
        if source.skipped {
            self.sources_skipped += 1;
        }
        self.entries_seen += source.entries;
        self.duplicates += source.duplicates;
        self.transform_failures += source.transform_failures;
        self.persist_failures += source.persist_failures;
        self.created += source.created;
    }
}

/// Cloneable handle that stops a running scheduler
#[derive(Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }
}

pub struct CycleScheduler {
    catalog: SourceCatalog,
    pipeline: Arc<ArticlePipeline>,
    source_delay: Duration,
    cycle_interval: Duration,
    stop: StopHandle,
}

impl CycleScheduler {
    pub fn new(
        catalog: SourceCatalog,
        pipeline: Arc<ArticlePipeline>,
        source_delay: Duration,
        cycle_interval: Duration,
    ) -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            catalog,
            pipeline,
            source_delay,
            cycle_interval,
            stop: StopHandle { tx: Arc::new(tx) },
        }
    }

    pub fn from_config(config: &Config, catalog: SourceCatalog, pipeline: Arc<ArticlePipeline>) -> Self {
        Self::new(catalog, pipeline, config.source_delay(), config.cycle_interval())
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Runs cycles until stopped; returns the number of completed cycles
    ///
    /// A cycle cut short by a stop is not counted.
    #[instrument(skip(self))]
    pub async fn run(&self) -> u64 {
        info!(sources = self.catalog.len(), "Starting continuous cycles...");
        let mut cycles = 0u64;

        while !self.stop.is_stopped() {
            let report = self.run_cycle().await;
            if report.interrupted {
                info!(
                    created = report.created,
                    scanned = report.sources_scanned,
                    "Cycle interrupted"
                );
                break;
            }
            cycles += 1;

            info!(
                cycle = cycles,
                created = report.created,
                scanned = report.sources_scanned,
                skipped = report.sources_skipped,
                duplicates = report.duplicates,
                transform_failures = report.transform_failures,
                persist_failures = report.persist_failures,
                "Cycle complete"
            );

            if self.pause(self.cycle_interval).await {
                break;
            }
        }

        info!(cycles, "Scheduler stopped");
        cycles
    }

    /// One pass over every category and source
    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();

        for category in shuffled::<String>(self.catalog.categories().map(String::from).collect()) {
            info!(category = %category, "Scanning category");

            for source in shuffled::<Source>(self.catalog.sources(&category).to_vec()) {
                if self.stop.is_stopped() {
                    report.interrupted = true;
                    return report;
                }

                match self.pipeline.process_source(&source).await {
                    Ok(source_report) => report.absorb(&source_report),
                    Err(e) => {
                        error!(source = %source.url, error = %e, "Unrecoverable error, stopping");
                        self.stop.stop();
                        report.interrupted = true;
                        return report;
                    }
                }

                if self.pause(self.source_delay).await {
                    report.interrupted = true;
                    return report;
                }
            }
        }

        report
    }

    /// Sleeps for `duration`; returns true if a stop arrived meanwhile
    async fn pause(&self, duration: Duration) -> bool {
        let mut rx = self.stop.tx.subscribe();
        if *rx.borrow() {
            return true;
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => self.stop.is_stopped(),
            _ = rx.changed() => true,
        }
    }
}

fn shuffled<T>(mut items: Vec<T>) -> Vec<T> {
    items.shuffle(&mut rand::thread_rng());
    items
}
