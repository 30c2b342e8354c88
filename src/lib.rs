//! # sqltrace — bound-SQL statement logging
//!
//! Reconstructs the SQL actually sent to the database — every `?`
//! placeholder substituted with its bound runtime value, whitespace
//! collapsed to one line — and logs it with execution timing, gated by a
//! memoized per-statement print policy. The logged text is meant to be a
//! copy-pasteable reconstruction for operators debugging slow queries or
//! auditing data access.
//!
//! ## Quick example
//!
//! ```rust
//! use sqltrace::prelude::*;
//!
//! let tracer = SqlTracer::new(
//!     StaticPolicyResolver::new(),
//!     TracingSqlPrinter,
//!     TracerConfig::default(),
//! );
//!
//! let slots = [ParamSlot::input("id")];
//! let params = BoundParams::scalar(42i64);
//! tracer.observe(&StatementExecution {
//!     identity: "user_dao.find_by_id",
//!     elapsed_ms: 3,
//!     result: StatementResult::Optional(true),
//!     sql: "SELECT *\n  FROM users\n WHERE id = ?",
//!     slots: &slots,
//!     params: &params,
//! });
//! // => INFO find_by_id,total:1,3ms SELECT * FROM users WHERE id = 42
//! ```
//!
//! Statement interception, policy declaration syntax, and log routing all
//! belong to the host; the crate only needs an identity, the raw SQL, the
//! slots, and the bound values.

pub mod config;
pub mod error;
pub mod params;
pub mod policy;
pub mod printer;
pub mod reconstruct;
pub mod value;

pub mod prelude {
    pub use crate::config::TracerConfig;
    pub use crate::error::{TraceError, TraceResult};
    pub use crate::params::{BoundParams, ParamMode, ParamObject, ParamSlot, resolve_parameters};
    pub use crate::policy::{
        PolicyOverrides, PolicyResolver, PrintOverride, PrintPolicyCache, StaticPolicyResolver,
    };
    pub use crate::printer::{
        SqlPrinter, SqlTracer, StatementExecution, StatementResult, TracingSqlPrinter,
    };
    pub use crate::reconstruct::reconstruct;
    pub use crate::value::{Literal, Value, format_literal};
}
