//! Contract layer - public API for inter-module communication
//!
//! Transport-agnostic models, the quote output contract and the native client trait.

pub mod client;
pub mod error;
pub mod model;
pub mod quote;

pub use client::FpackApi;
pub use error::{Dependent, FpackError};
pub use model::{
    BatchOutcome, Client, ColumnKind, ColumnView, CompositionRow, Equipment, GlobalProject,
    GlobalProjectStats, Group, GroupItem, GroupItemView, Incompatibility, ItemKind, ItemStatus,
    NewColumn, NewEquipment, NewGlobalProject, NewGroupItem, NewProduct, NewProject, NewRobot,
    NewTemplate, Price, Product, Project, ProjectProgress, Robot, RobotIncompatibility,
    RobotPrice, Selection, Supplier, Template, TemplateColumn, UnitPrice,
};
pub use quote::{
    Diagnostic, GlobalQuote, LineKind, PricedLine, Quote, QuoteLine, QuoteRequest, QuoteSummary,
    QuoteTotals,
};
