//! Log sinks and the statement-trace driver.
//!
//! The driver owns the print-policy cache, runs the policy check, and only
//! on a positive decision pays for parameter resolution and statement
//! reconstruction. Failures inside the driver are logged and swallowed so
//! the instrumented data-access call is never affected.

use std::time::Instant;

use crate::config::TracerConfig;
use crate::error::TraceResult;
use crate::params::{BoundParams, ParamSlot, resolve_parameters};
use crate::policy::{PolicyResolver, PrintPolicyCache, method_name};
use crate::reconstruct::reconstruct;

/// Shape of a statement's return value; yields the summary count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementResult {
    /// A returned collection of rows.
    Collection(usize),
    /// A returned key-value map.
    Map(usize),
    /// An optional single row.
    Optional(bool),
    /// A single non-null object, or an update treated as one row.
    Single,
    /// A null/absent result.
    Absent,
}

impl StatementResult {
    /// The count reported in the log line.
    pub fn total(&self) -> usize {
        match self {
            Self::Collection(n) | Self::Map(n) => *n,
            Self::Optional(present) => usize::from(*present),
            Self::Single => 1,
            Self::Absent => 0,
        }
    }
}

/// Everything one statement execution hands to the tracer.
#[derive(Debug)]
pub struct StatementExecution<'a> {
    /// Dotted identity of the logical operation.
    pub identity: &'a str,
    /// Execution time already measured by the caller.
    pub elapsed_ms: u64,
    pub result: StatementResult,
    /// Raw parameterized SQL as prepared for execution.
    pub sql: &'a str,
    /// Declared parameter slots, one per placeholder.
    pub slots: &'a [ParamSlot],
    pub params: &'a BoundParams,
}

/// Pluggable log sink: exactly one record per observed execution.
pub trait SqlPrinter {
    /// Emit a record without the statement text (suppressed statements).
    fn emit_summary(&self, identity: &str, total: usize, elapsed_ms: u64);

    /// Emit a record including the reconstructed statement.
    fn emit_full(&self, identity: &str, total: usize, elapsed_ms: u64, sql: &str);
}

/// Default sink over `tracing`, labeling lines with the identity's method
/// name segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSqlPrinter;

impl SqlPrinter for TracingSqlPrinter {
    fn emit_summary(&self, identity: &str, total: usize, elapsed_ms: u64) {
        tracing::info!("{},total:{},{}ms", method_name(identity), total, elapsed_ms);
    }

    fn emit_full(&self, identity: &str, total: usize, elapsed_ms: u64, sql: &str) {
        tracing::info!("{},total:{},{}ms {}", method_name(identity), total, elapsed_ms, sql);
    }
}

/// Drives the pipeline: policy check, parameter resolution, statement
/// reconstruction, emission.
pub struct SqlTracer<R, P> {
    cache: PrintPolicyCache,
    resolver: R,
    printer: P,
    config: TracerConfig,
}

impl<R: PolicyResolver, P: SqlPrinter> SqlTracer<R, P> {
    pub fn new(resolver: R, printer: P, config: TracerConfig) -> Self {
        Self {
            cache: PrintPolicyCache::new(),
            resolver,
            printer,
            config,
        }
    }

    /// Observe one statement execution. Never fails.
    ///
    /// This is the boundary instrumented call sites go through: any error
    /// raised while building or emitting the log line is recorded at error
    /// level and swallowed, leaving the instrumented call's own outcome
    /// untouched.
    pub fn observe(&self, execution: &StatementExecution<'_>) {
        let started = tracing::enabled!(tracing::Level::DEBUG).then(Instant::now);
        if let Err(error) = self.print(execution) {
            tracing::error!("failed to log sql for {}: {}", execution.identity, error);
        }
        if let Some(started) = started {
            // Very long statements make the reconstruction itself measurable.
            tracing::debug!("log line built in {}ms", started.elapsed().as_millis());
        }
    }

    /// The fallible pipeline, for hosts that want the error themselves.
    ///
    /// When the policy suppresses the statement, only the summary record is
    /// emitted and neither parameter resolution nor reconstruction runs.
    pub fn print(&self, execution: &StatementExecution<'_>) -> TraceResult<()> {
        let log_sql =
            self.cache
                .should_log(execution.identity, &self.resolver, self.config.default_print)?;
        let total = execution.result.total();

        if !log_sql {
            self.printer
                .emit_summary(execution.identity, total, execution.elapsed_ms);
            return Ok(());
        }

        let literals = resolve_parameters(execution.slots, execution.params)?;
        let sql = reconstruct(&literals, execution.sql);
        self.printer
            .emit_full(execution.identity, total, execution.elapsed_ms, &sql);
        Ok(())
    }

    /// The memoized print decisions.
    pub fn cache(&self) -> &PrintPolicyCache {
        &self.cache
    }
}
