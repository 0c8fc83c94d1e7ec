//! Core library for the slab-sync command line application.
//!
//! The tool reads a published price list, derives a single slab price from
//! it, converts that price with a live exchange rate, and writes both values
//! into the tagged linear expressions of a planning workbook. Workbook IO
//! lives under [`logistix::slab::io`], the cell model in
//! [`logistix::slab::model`], the price derivation in
//! [`logistix::slab::extract`] and [`logistix::slab::pricing`], the
//! cross-sheet matching in [`logistix::slab::constraints`] and
//! [`logistix::slab::reconcile`], and the end-to-end run under
//! [`logistix::slab::sync`].

pub mod logistix;

pub use logistix::slab::{
    Result, ToolError, config, constraints, error, extract, io, model, pricing, reconcile, scan,
    sync, text,
};
